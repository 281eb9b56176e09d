//! Calendar (datetime/date/time) formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{EncodeError, EncodeErrorKind};
use crate::options::Options;

/// A calendar value accepted by [`crate::encode`].
///
/// `Aware` carries its own UTC offset and always has one to format.
/// `Naive` has none; formatting it requires [`Options::NAIVE_UTC`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Calendar {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// Formats `cal` as ISO-8601 text.
pub(crate) fn format(cal: &Calendar, options: Options) -> Result<String, EncodeError> {
    let omit_micros = options.contains(Options::OMIT_MICROSECONDS);
    match cal {
        Calendar::Aware(dt) => Ok(format_datetime(dt.naive_local(), omit_micros) + &format_offset(dt.offset(), options)),
        Calendar::Naive(dt) => {
            if !options.contains(Options::NAIVE_UTC) {
                return Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
                    "naive datetime without NAIVE_UTC".to_string(),
                )));
            }
            let offset = if options.contains(Options::UTC_Z) {
                "Z".to_string()
            } else {
                "+00:00".to_string()
            };
            Ok(format_datetime(*dt, omit_micros) + &offset)
        }
        Calendar::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
        Calendar::Time(t) => Ok(format_time(*t, omit_micros)),
    }
}

/// Formats `cal` for use as an object key: naive datetimes are ISO-formatted
/// with no offset suffix and, unlike [`format`], need no [`Options::NAIVE_UTC`]
/// — there is no ambiguity to guard against when the output carries no zone
/// marker in the first place.
pub(crate) fn format_key(cal: &Calendar, options: Options) -> Result<String, EncodeError> {
    let omit_micros = options.contains(Options::OMIT_MICROSECONDS);
    match cal {
        Calendar::Naive(dt) => Ok(format_datetime(*dt, omit_micros)),
        _ => format(cal, options),
    }
}

pub(crate) fn format_datetime(dt: NaiveDateTime, omit_micros: bool) -> String {
    format!("{}T{}", dt.date().format("%Y-%m-%d"), format_time(dt.time(), omit_micros))
}

fn format_time(t: NaiveTime, omit_micros: bool) -> String {
    let nanos = t.nanosecond();
    if omit_micros || nanos == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", t.format("%H:%M:%S"), nanos / 1000)
    }
}

fn format_offset(offset: &FixedOffset, options: Options) -> String {
    if offset.local_minus_utc() == 0 && options.contains(Options::UTC_Z) {
        return "Z".to_string();
    }
    let total_minutes = offset.local_minus_utc() / 60;
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let total_minutes = total_minutes.abs();
    format!("{sign}{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
