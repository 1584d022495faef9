//! Wall-clock timestamps stamped on accepted transitions.

use super::ParseRecordedAtError;
use chrono::{NaiveDateTime, Timelike};
use mockable::Clock;
use std::fmt;

/// Storage format for transition timestamps.
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layouts spreadsheet programs rewrite stored timestamps into.
const LEGACY_FORMATS: [&str; 3] = ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M", "%Y-%m-%d %H:%M"];

/// Local wall-clock time, at one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordedAt(NaiveDateTime);

impl RecordedAt {
    /// Reads the current local time from `clock`.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        Self::from_naive(clock.local().naive_local())
    }

    /// Wraps a naive date-time, dropping sub-second precision.
    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Parses the `YYYY-MM-DD HH:MM:SS` storage form.
    ///
    /// Slash-separated dates and minute-resolution times, as a spreadsheet
    /// leaves them after an edit, are also read. Display always writes the
    /// storage form back.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecordedAtError`] when the text matches none of the
    /// accepted layouts.
    pub fn parse(value: &str) -> Result<Self, ParseRecordedAtError> {
        let text = value.trim();
        std::iter::once(RECORDED_AT_FORMAT)
            .chain(LEGACY_FORMATS)
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(Self)
            .ok_or_else(|| ParseRecordedAtError(value.to_owned()))
    }

    /// Parses an optional stored cell, where blank means "never stamped".
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecordedAtError`] when a non-blank cell is malformed.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ParseRecordedAtError> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    /// Returns the wrapped date-time.
    #[must_use]
    pub const fn into_inner(self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for RecordedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RECORDED_AT_FORMAT))
    }
}
