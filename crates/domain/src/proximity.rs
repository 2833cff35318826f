//! Proximity window: the date range and distance bounding a contact search.

use chrono::Days;

use crate::error::{UdaConnectError, ValidationError};
use crate::time::{Date, Timestamp, start_of_day};

/// Distance used when the caller does not supply one.
pub const DEFAULT_DISTANCE_METERS: f64 = 5.0;

/// Bounds of a contact search.
///
/// Both dates are inclusive whole days in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityWindow {
    pub start_date: Date,
    pub end_date: Date,
    pub meters: f64,
}

impl ProximityWindow {
    /// Build a window, checking that the dates are ordered and the distance
    /// is a finite non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] on an inverted date range or an
    /// invalid distance.
    pub fn new(start_date: Date, end_date: Date, meters: f64) -> Result<Self, UdaConnectError> {
        let window = Self {
            start_date,
            end_date,
            meters,
        };
        window.validate()?;
        Ok(window)
    }

    /// Check window invariants.
    ///
    /// # Errors
    ///
    /// See [`ProximityWindow::new`].
    pub fn validate(&self) -> Result<(), UdaConnectError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::InvertedDateRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            }
            .into());
        }
        if !self.meters.is_finite() || self.meters < 0.0 {
            return Err(ValidationError::InvalidDistance(self.meters.to_string()).into());
        }
        Ok(())
    }

    /// Half-open `[from, to)` timestamp range covering both dates entirely.
    #[must_use]
    pub fn time_range(&self) -> (Timestamp, Timestamp) {
        let from = start_of_day(self.start_date);
        let to = self
            .end_date
            .checked_add_days(Days::new(1))
            .map_or(Timestamp::MAX_UTC, start_of_day);
        (from, to)
    }

    /// Whether two points `meters_apart` from each other count as a contact.
    #[must_use]
    pub fn is_within(&self, meters_apart: f64) -> bool {
        meters_apart <= self.meters
    }
}
