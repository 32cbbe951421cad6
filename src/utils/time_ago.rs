use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Renders how long ago `then` was, relative to `now`.
///
/// The largest whole unit is used (seconds, minutes, hours or days), with the
/// singular form for a count of one. Timestamps in the future are clamped to
/// "0 seconds ago".
///
/// # Arguments
///
/// * `then` - The moment being described, e.g. a file's last update.
/// * `now` - The reference moment, usually the time of the request.
///
/// # Returns
///
/// A string such as "1 minute ago" or "3 days ago".
///
/// # Examples
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use flounder_index::utils::rendered_time_ago;
///
/// let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// assert_eq!(rendered_time_ago(now - Duration::hours(2), now), "2 hours ago");
/// ```
pub fn rendered_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let ago = (now - then).num_seconds().max(0);

    let (count, unit) = if ago < MINUTE {
        (ago, "second")
    } else if ago < HOUR {
        (ago / MINUTE, "minute")
    } else if ago < DAY {
        (ago / HOUR, "hour")
    } else {
        (ago / DAY, "day")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
