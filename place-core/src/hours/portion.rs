//! Display groups of weekdays sharing the same hours.

use super::time::DayTimeRange;
use super::weekday::Weekday;

/// Weekdays that share one identical, ordered list of opening ranges.
///
/// Weekdays are kept in display order: sorted by sort index, then rotated
/// so that a cyclic run such as Saturday, Sunday, Monday reads as one
/// block starting on Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayableWeekPortion {
    weekdays: Vec<Weekday>,
    ranges: Vec<DayTimeRange>,
}

impl DisplayableWeekPortion {
    /// Create a portion, putting the weekdays into display order.
    pub fn new(weekdays: impl IntoIterator<Item = Weekday>, ranges: Vec<DayTimeRange>) -> Self {
        Self {
            weekdays: display_order(weekdays.into_iter().collect()),
            ranges,
        }
    }

    /// Weekdays in display order.
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Opening ranges, in the order they were written.
    pub fn ranges(&self) -> &[DayTimeRange] {
        &self.ranges
    }

    /// Whether the portion covers a public or school holiday.
    pub fn has_special_day(&self) -> bool {
        self.weekdays.iter().any(|day| day.is_special())
    }

    /// Whether the portion means "closed" (no ranges).
    pub fn is_closed(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sort index of the last weekday in display order.
    ///
    /// Portions are ordered by where they end in the week.
    pub fn end_index(&self) -> usize {
        self.weekdays.last().map_or(usize::MAX, |day| day.sort_index())
    }

    /// Heading for display: "Mon - Fri" for several days, the full name
    /// for a single day.
    ///
    /// # Examples
    ///
    /// ```
    /// use place_core::hours::{DisplayableWeekPortion, Weekday};
    ///
    /// let weekend = DisplayableWeekPortion::new([Weekday::Sunday, Weekday::Saturday], vec![]);
    /// assert_eq!(weekend.label(), "Sat - Sun");
    ///
    /// let monday = DisplayableWeekPortion::new([Weekday::Monday], vec![]);
    /// assert_eq!(monday.label(), "Monday");
    /// ```
    pub fn label(&self) -> String {
        match self.weekdays.as_slice() {
            [] => String::new(),
            [only] => only.name().to_string(),
            [first, .., last] => format!("{} - {}", first.short_name(), last.short_name()),
        }
    }
}

/// Sort weekdays canonically, then rotate a cyclic run to start after its gap.
///
/// Rotation only applies to fewer than seven days: while the last day is
/// the weekly predecessor of the first, the last day moves to the front.
fn display_order(mut weekdays: Vec<Weekday>) -> Vec<Weekday> {
    weekdays.sort_by_key(|day| day.sort_index());
    weekdays.dedup();

    if weekdays.len() >= 7 {
        return weekdays;
    }

    while let (Some(&first), Some(&last)) = (weekdays.first(), weekdays.last()) {
        if first.previous() != Some(last) {
            break;
        }
        weekdays.rotate_right(1);
    }

    weekdays
}
