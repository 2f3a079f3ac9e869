use time::{OffsetDateTime, macros::format_description};

/// Current local time as `YYYY-MM-DD HH:MM:SS`, falling back to UTC when the
/// local offset can't be determined.
pub fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format(now)
}

pub fn format(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(&format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
