//! The calendar range a timeline covers.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Upper bound on the number of years a single timeline may cover.
pub const MAX_SPAN_YEARS: i32 = 1000;

/// Start year of the decade containing `year` (e.g. 1995 → 1990, -3 → -10).
pub fn decade_start(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// An inclusive range of years, `start_year..=end_year`.
///
/// Decades group the covered years by [`decade_start`], so the first and last
/// decade may hold fewer than ten years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct TimelineSpan {
    start_year: i32,
    end_year: i32,
}

#[derive(Deserialize)]
struct RawSpan {
    start_year: i32,
    end_year: i32,
}

impl TryFrom<RawSpan> for TimelineSpan {
    type Error = TimelineError;

    fn try_from(raw: RawSpan) -> Result<Self> {
        TimelineSpan::new(raw.start_year, raw.end_year)
    }
}

impl TimelineSpan {
    /// Create a span covering `start_year..=end_year`.
    ///
    /// # Errors
    /// Returns `TimelineError::InvalidSpan` if `end_year < start_year`, the
    /// span is longer than [`MAX_SPAN_YEARS`], or either year lies outside
    /// the calendar `NaiveDate` can represent.
    pub fn new(start_year: i32, end_year: i32) -> Result<Self> {
        let calendar = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        for year in [start_year, end_year] {
            if !calendar.contains(&year) {
                return Err(TimelineError::InvalidSpan(format!(
                    "year {} is outside {}..={}",
                    year,
                    calendar.start(),
                    calendar.end()
                )));
            }
        }
        if end_year < start_year {
            return Err(TimelineError::InvalidSpan(format!(
                "end year {} is before start year {}",
                end_year, start_year
            )));
        }
        let len = i64::from(end_year) - i64::from(start_year) + 1;
        if len > i64::from(MAX_SPAN_YEARS) {
            return Err(TimelineError::InvalidSpan(format!(
                "{} years exceeds the maximum of {}",
                len, MAX_SPAN_YEARS
            )));
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    /// Span from the start of the birth decade through `current_year`.
    pub fn from_birth_year(birth_year: i32, current_year: i32) -> Result<Self> {
        Self::new(decade_start(birth_year), current_year)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// Start years of every decade touched by the span, ascending.
    pub fn decades(&self) -> impl Iterator<Item = i32> {
        (decade_start(self.start_year)..=decade_start(self.end_year)).step_by(10)
    }

    /// Covered years that fall in the decade starting at `decade`.
    pub fn years_in_decade(&self, decade: i32) -> RangeInclusive<i32> {
        decade.max(self.start_year)..=(decade + 9).min(self.end_year)
    }
}
