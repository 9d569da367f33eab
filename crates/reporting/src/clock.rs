use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use frigate_core::RawTimestamp;

/// Formats an event start as `"<Weekday>, <hh>:<mm> <AM|PM>"` in `offset`.
///
/// Returns an empty string when the timestamp is unusable.
pub fn clock_label(start: &RawTimestamp, offset: UtcOffset) -> String {
    let format = format_description!("[weekday], [hour repr:12]:[minute] [period]");
    start
        .as_f64()
        .filter(|secs| secs.is_finite())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs.floor() as i64).ok())
        .and_then(|moment| moment.to_offset(offset).format(&format).ok())
        .unwrap_or_default()
}
