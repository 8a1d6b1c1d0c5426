use std::fmt::Write;

use crate::domain::User;

/// Renders the plain-text activity report for a user.
///
/// ```text
/// UID: 1; Email: user1@company.com;
/// Activity Log:
/// 0. [logged in] at 2024-05-01T12:30:00Z
/// ```
pub fn render_report(user: &User) -> String {
    let mut output = format!("UID: {}; Email: {};\nActivity Log:\n", user.id, user.email);
    for (index, entry) in user.activity_log.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(
            output,
            "{}. [{}] at {}",
            index,
            entry.action,
            entry.timestamp_rfc3339()
        );
    }
    output
}
