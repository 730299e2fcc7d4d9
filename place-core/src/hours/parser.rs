//! Opening-hours clause parser.
//!
//! Parsing is best-effort: fragments that do not fit the supported grammar
//! are dropped and reported as [`SkippedFragment`]s, and the rest of the
//! string is still used. The steps are:
//!
//! 1. Split the lower-cased string into clauses on `;` and `", "`.
//! 2. Accumulate each clause's ranges onto its weekdays.
//! 3. Fold "until midnight" + "from midnight" pairs on consecutive days
//!    into one overnight range on the first day.
//! 4. Group weekdays with identical range lists into display portions.

use tracing::{debug, trace};

use super::portion::DisplayableWeekPortion;
use super::time::{DayTimeRange, TimeError};
use super::weekday::{Weekday, WeekdaySet};
use super::{OpeningHours, ParsedHours};

/// Whole-string literal meaning open around the clock.
const ALWAYS_OPEN: &str = "24/7";

/// Hour-spec literal meaning closed.
const CLOSED: &str = "off";

/// A fragment of the input that contributed nothing to the schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkippedFragment {
    /// A day token that is not one of the supported day codes
    #[error("unknown weekday `{0}`")]
    UnknownWeekday(String),

    /// A day range that does not walk the weekly cycle (e.g. `su-ph`)
    #[error("weekday range `{0}` does not form a weekly run")]
    MalformedWeekdayRange(String),

    /// A time range token that is not `HH:MM-HH:MM`
    #[error("malformed time range `{token}`: {source}")]
    MalformedTimeRange { token: String, source: TimeError },

    /// A weekday clause with more than one hour-spec token
    #[error("unsupported clause `{0}`")]
    UnsupportedClause(String),

    /// An hour-spec with no weekdays to apply it to
    #[error("hours `{0}` do not follow any weekdays")]
    HoursWithoutWeekdays(String),
}

/// Parse an opening-hours string, collecting what had to be dropped.
pub(super) fn parse(raw: &str) -> ParsedHours {
    if raw == ALWAYS_OPEN {
        return ParsedHours {
            hours: OpeningHours::always_open(),
            skipped: Vec::new(),
        };
    }

    let lowered = raw.to_lowercase();
    let mut state = ClauseState::default();
    for clause in lowered.split(';').flat_map(|part| part.split(", ")) {
        state.clause(clause);
    }

    let ClauseState {
        mut table, skipped, ..
    } = state;
    merge_across_midnight(&mut table);

    ParsedHours {
        hours: OpeningHours::from_portions(group(table)),
        skipped,
    }
}

/// Ranges accumulated per weekday, indexed by sort index.
///
/// `None` means the weekday was never mentioned; `Some(vec![])` means it
/// was explicitly closed.
#[derive(Debug, Clone, Default)]
struct WeekTable([Option<Vec<DayTimeRange>>; 9]);

impl WeekTable {
    fn get(&self, day: Weekday) -> Option<&Vec<DayTimeRange>> {
        self.0[day.sort_index()].as_ref()
    }

    fn get_mut(&mut self, day: Weekday) -> Option<&mut Vec<DayTimeRange>> {
        self.0[day.sort_index()].as_mut()
    }

    fn entry(&mut self, day: Weekday) -> &mut Vec<DayTimeRange> {
        self.0[day.sort_index()].get_or_insert_with(Vec::new)
    }

    fn close(&mut self, day: Weekday) {
        self.0[day.sort_index()] = Some(Vec::new());
    }

    fn take(&mut self, day: Weekday) -> Option<Vec<DayTimeRange>> {
        self.0[day.sort_index()].take()
    }
}

/// Left-to-right clause accumulation state.
#[derive(Debug, Default)]
struct ClauseState {
    table: WeekTable,
    /// Weekdays the next hour-spec applies to.
    active: WeekdaySet,
    /// Set once a weekday clause carried hours; the next weekday clause
    /// then starts a fresh set instead of extending this one.
    hours_attached: bool,
    skipped: Vec<SkippedFragment>,
}

impl ClauseState {
    fn clause(&mut self, clause: &str) {
        let clause = clause.trim();
        if clause.is_empty() {
            return;
        }

        let hour_spec = if clause.starts_with(char::is_alphabetic) {
            if self.hours_attached {
                self.active.clear();
                self.hours_attached = false;
            }

            let tokens: Vec<&str> = clause.split(char::is_whitespace).collect();
            self.add_weekdays(tokens[0]);

            match tokens.as_slice() {
                [_] => return,
                [_, hours] => {
                    self.hours_attached = true;
                    *hours
                }
                _ => {
                    self.skip(SkippedFragment::UnsupportedClause(clause.to_string()));
                    return;
                }
            }
        } else {
            clause
        };

        self.apply_hours(hour_spec);
    }

    fn add_weekdays(&mut self, token: &str) {
        for group in token.split(',') {
            let mut ends = group.split('-');
            let first = ends.next().unwrap_or_default();

            match (ends.next(), ends.next()) {
                (None, _) => match Weekday::from_code(first) {
                    Some(day) => self.active.insert(day),
                    None => self.skip(SkippedFragment::UnknownWeekday(group.to_string())),
                },
                (Some(last), None) => {
                    let (Some(first), Some(last)) =
                        (Weekday::from_code(first), Weekday::from_code(last))
                    else {
                        self.skip(SkippedFragment::UnknownWeekday(group.to_string()));
                        continue;
                    };

                    match weekday_run(first, last) {
                        Some(run) => run.into_iter().for_each(|day| self.active.insert(day)),
                        None => {
                            self.skip(SkippedFragment::MalformedWeekdayRange(group.to_string()))
                        }
                    }
                }
                (Some(_), Some(_)) => {
                    self.skip(SkippedFragment::MalformedWeekdayRange(group.to_string()))
                }
            }
        }
    }

    fn apply_hours(&mut self, spec: &str) {
        if self.active.is_empty() {
            self.skip(SkippedFragment::HoursWithoutWeekdays(spec.to_string()));
            return;
        }

        if spec == CLOSED {
            for day in self.active.iter() {
                self.table.close(day);
            }
            return;
        }

        let mut ranges = Vec::new();
        for token in spec.split(',') {
            match DayTimeRange::parse(token) {
                Ok(range) => ranges.push(range),
                Err(source) => self.skip(SkippedFragment::MalformedTimeRange {
                    token: token.to_string(),
                    source,
                }),
            }
        }
        if ranges.is_empty() {
            return;
        }

        for day in self.active.iter() {
            self.table.entry(day).extend_from_slice(&ranges);
        }
    }

    fn skip(&mut self, fragment: SkippedFragment) {
        debug!(%fragment, "skipping opening-hours fragment");
        self.skipped.push(fragment);
    }
}

/// Walk the weekly cycle from `first` to `last` inclusive.
///
/// Returns `None` when `last` cannot be reached, which happens whenever a
/// holiday is one end of a range with two different ends.
fn weekday_run(first: Weekday, last: Weekday) -> Option<Vec<Weekday>> {
    let mut run = vec![first];
    let mut current = first;

    for _ in 0..Weekday::WEEK.len() {
        if current == last {
            return Some(run);
        }
        current = current.next()?;
        run.push(current);
    }

    None
}

/// Fold a range starting at midnight into the previous day's range ending
/// at midnight, when that range starts later than this one ends.
///
/// Weekdays are visited in sort order against a snapshot of the table, and
/// each weekday gives up at most one range.
fn merge_across_midnight(table: &mut WeekTable) {
    let snapshot = table.clone();

    for day in Weekday::ALL {
        let (Some(ranges), Some(previous)) = (snapshot.get(day), day.previous()) else {
            continue;
        };

        for (index, range) in ranges.iter().enumerate() {
            if !range.from.is_midnight() {
                continue;
            }

            let Some(extendable) = table.get_mut(previous).and_then(|earlier| {
                earlier.iter_mut().find(|candidate| {
                    candidate.to.is_midnight()
                        && candidate.from.total_minutes() > range.to.total_minutes()
                })
            }) else {
                continue;
            };

            extendable.to = range.to;
            trace!(from = ?previous, into = ?day, until = %range.to, "merged overnight range");

            if let Some(own) = table.get_mut(day) {
                if index < own.len() {
                    own.remove(index);
                }
            }
            break;
        }
    }
}

/// Group weekdays by (holiday kind, ranges) and order the portions by
/// where they end in the week.
fn group(mut table: WeekTable) -> Vec<DisplayableWeekPortion> {
    let mut groups: Vec<(GroupKey, Vec<Weekday>)> = Vec::new();

    for day in Weekday::ALL {
        let Some(ranges) = table.take(day) else {
            continue;
        };
        let key = GroupKey {
            is_holiday: day == Weekday::Holiday,
            is_school_holiday: day == Weekday::SchoolHoliday,
            ranges,
        };

        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, days)) => days.push(day),
            None => groups.push((key, vec![day])),
        }
    }

    let mut portions: Vec<DisplayableWeekPortion> = groups
        .into_iter()
        .map(|(key, days)| DisplayableWeekPortion::new(days, key.ranges))
        .filter(|portion| !portion.is_closed() || portion.has_special_day())
        .collect();

    portions.sort_by_key(DisplayableWeekPortion::end_index);
    portions
}

/// Weekdays share a portion only with identical ranges and holiday kind.
#[derive(Debug, PartialEq, Eq)]
struct GroupKey {
    is_holiday: bool,
    is_school_holiday: bool,
    ranges: Vec<DayTimeRange>,
}
