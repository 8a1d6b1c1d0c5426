use super::ActivityEntry;

/// A generated user and their activity log.
///
/// Built once by a generation worker and moved to a persistence worker.
/// Nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub activity_log: Vec<ActivityEntry>,
}

impl User {
    /// Creates the user for a 0-based job index.
    ///
    /// # Arguments
    /// * `job` - Index of the job this user is generated from
    /// * `activity_log` - Entries in generation order
    ///
    /// # Notes
    /// The id is `job + 1` and the email is derived from the id.
    pub fn from_job(job: u64, activity_log: Vec<ActivityEntry>) -> Self {
        let id = job + 1;
        Self {
            id,
            email: email_for(id),
            activity_log,
        }
    }
}

pub fn email_for(id: u64) -> String {
    format!("user{}@company.com", id)
}
