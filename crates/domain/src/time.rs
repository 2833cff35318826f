//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, NaiveTime, SubsecRound, Utc};

/// UTC timestamp used for `creation_time` and search bounds.
pub type Timestamp = DateTime<Utc>;

/// Calendar date, as accepted by the connection query (`YYYY-MM-DD`).
pub type Date = NaiveDate;

/// Wire format of [`Date`] values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Drop sub-microsecond digits; stored timestamps keep microseconds.
#[must_use]
pub fn to_micros(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(6)
}

/// Midnight UTC at the start of `date`.
#[must_use]
pub fn start_of_day(date: Date) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns the underlying [`chrono::ParseError`] when `value` does not match
/// [`DATE_FORMAT`].
pub fn parse_date(value: &str) -> Result<Date, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}
