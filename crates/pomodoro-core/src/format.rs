//! Human-readable time formatting.

/// Format seconds as "MM:SS" (minutes are not wrapped into hours).
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format seconds as "Hh Mm", dropping leftover seconds.
pub fn format_hours_minutes(secs: u64) -> String {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
