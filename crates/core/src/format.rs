//! Display formatting for dates and relative times

use chrono::{DateTime, NaiveDate, Utc};

/// `Feb 1` style date used inside message text
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Compact relative time for inbox rows: `now`, `15m`, `2h`, `3d`
pub fn inbox_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();

    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / 1440)
    }
}

/// Relative time under a message bubble
pub fn message_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    if minutes < 1440 {
        return format!("{}h ago", minutes / 60);
    }

    match minutes / 1440 {
        1 => "Yesterday".to_string(),
        days if days < 7 => format!("{} days ago", days),
        _ => at.format("%-m/%-d/%Y").to_string(),
    }
}
