//! Opening hours in the OpenStreetMap `opening_hours` style.
//!
//! Supports the common subset used for weekly business hours: day codes
//! and day ranges (`mo-fr`), comma lists of `HH:MM-HH:MM` ranges, `off`,
//! clause separators `;` and `", "`, and the literal `24/7`. Anything else
//! (dates, week numbers, comments) is skipped.
//!
//! The parsed form is display oriented: weekdays with identical hours are
//! grouped into [`DisplayableWeekPortion`]s. Writing a schedule back out in
//! the mini-language is not supported.

mod parser;
mod portion;
mod time;
mod weekday;

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub use parser::SkippedFragment;
pub use portion::DisplayableWeekPortion;
pub use time::{DayTime, DayTimeRange, TimeError};
pub use weekday::{Weekday, WeekdaySet};

/// A weekly schedule as ordered display portions.
///
/// Portions are sorted by the sort index of their last weekday. Ordinary
/// weekdays only appear when open; public and school holidays also appear
/// when closed.
///
/// # Examples
///
/// ```
/// use place_core::hours::{OpeningHours, Weekday};
///
/// let hours = OpeningHours::parse("mo-fr 09:00-17:00; sa 10:00-14:00");
/// assert_eq!(hours.portions().len(), 2);
/// assert_eq!(hours.portions()[0].label(), "Mon - Fri");
///
/// let saturday = hours.portion_for(Weekday::Saturday).unwrap();
/// assert_eq!(saturday.ranges()[0].to_string(), "10:00 - 14:00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OpeningHours {
    portions: Vec<DisplayableWeekPortion>,
}

impl OpeningHours {
    /// Parse an opening-hours string. Never fails; unsupported fragments
    /// are dropped.
    pub fn parse(raw: &str) -> Self {
        parser::parse(raw).hours
    }

    /// Parse an opening-hours string and report the dropped fragments.
    pub fn parse_with_diagnostics(raw: &str) -> ParsedHours {
        parser::parse(raw)
    }

    /// Open every day of the week, around the clock.
    pub fn always_open() -> Self {
        let all_day = DayTimeRange::new(DayTime::MIDNIGHT, DayTime::MIDNIGHT);
        Self {
            portions: vec![DisplayableWeekPortion::new(Weekday::WEEK, vec![all_day])],
        }
    }

    fn from_portions(portions: Vec<DisplayableWeekPortion>) -> Self {
        Self { portions }
    }

    /// Portions in display order.
    pub fn portions(&self) -> &[DisplayableWeekPortion] {
        &self.portions
    }

    pub fn into_portions(self) -> Vec<DisplayableWeekPortion> {
        self.portions
    }

    /// Whether nothing usable was parsed.
    pub fn is_empty(&self) -> bool {
        self.portions.is_empty()
    }

    /// The portion containing `day`, if the day has any listed hours.
    pub fn portion_for(&self, day: Weekday) -> Option<&DisplayableWeekPortion> {
        self.portions
            .iter()
            .find(|portion| portion.weekdays().contains(&day))
    }
}

impl FromStr for OpeningHours {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Deserializes from the single-string encoding, e.g. an OpenStreetMap
/// `opening_hours` tag value.
impl<'de> Deserialize<'de> for OpeningHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A parsed schedule together with the fragments that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHours {
    pub hours: OpeningHours,
    pub skipped: Vec<SkippedFragment>,
}

impl ParsedHours {
    /// Whether every fragment of the input was used.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parse an opening-hours string into display portions.
pub fn parse_opening_hours(raw: &str) -> Vec<DisplayableWeekPortion> {
    OpeningHours::parse(raw).into_portions()
}
