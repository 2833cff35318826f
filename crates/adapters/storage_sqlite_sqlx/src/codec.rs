//! Column encodings shared by the repositories.

use std::str::FromStr;

use udaconnect_domain::time::Timestamp;

/// Microseconds since the Unix epoch, so SQL compares and orders numbers.
///
/// Covers every representable [`Timestamp`], including years past 9999.
pub(crate) fn encode_timestamp(ts: Timestamp) -> i64 {
    ts.timestamp_micros()
}

pub(crate) fn decode_timestamp(micros: i64) -> Result<Timestamp, sqlx::Error> {
    Timestamp::from_timestamp_micros(micros)
        .ok_or_else(|| sqlx::Error::Decode(format!("timestamp {micros} is out of range").into()))
}

pub(crate) fn decode_id<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
