//! Resolves "today" in the user's timezone.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The current calendar date in the given canonical timezone, e.g.
/// "Pacific/Auckland".
///
/// The aggregation functions take "today" as a plain [Date] argument; this
/// is where embedders get that date from, so that the current-period
/// summary rolls over at the user's midnight rather than UTC's.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known
/// timezone name.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let now = OffsetDateTime::now_utc();

    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| now.to_offset(tz.get_offset_utc(&now).to_utc()).date())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
