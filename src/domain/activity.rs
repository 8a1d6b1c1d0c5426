use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Something a user did, as recorded in their activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoggedIn,
    LoggedOut,
    CreatedRecord,
    DeletedRecord,
    UpdatedAccount,
}

impl Action {
    /// Every action, in a fixed order. Random selection indexes into this.
    pub const ALL: [Action; 5] = [
        Action::LoggedIn,
        Action::LoggedOut,
        Action::CreatedRecord,
        Action::DeletedRecord,
        Action::UpdatedAccount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::LoggedIn => "logged in",
            Action::LoggedOut => "logged out",
            Action::CreatedRecord => "created record",
            Action::DeletedRecord => "deleted record",
            Action::UpdatedAccount => "updated account",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub action: Action,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(action: Action, timestamp: DateTime<Utc>) -> Self {
        Self { action, timestamp }
    }

    /// RFC3339 with whole seconds and a `Z` suffix, e.g. `2024-05-01T12:30:00Z`.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_action_labels_are_distinct() {
        let labels: HashSet<_> = Action::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), Action::ALL.len());
        assert!(labels.contains("logged in"));
        assert!(labels.contains("updated account"));
    }

    #[test]
    fn test_action_display_matches_label() {
        for action in Action::ALL {
            assert_eq!(action.to_string(), action.label());
        }
    }

    #[test]
    fn test_timestamp_formatting() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let entry = ActivityEntry::new(Action::CreatedRecord, ts);
        assert_eq!(entry.timestamp_rfc3339(), "2024-05-01T12:30:00Z");
    }
}
