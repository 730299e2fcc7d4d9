//! Weekday codes used by the opening-hours mini-language.

use std::fmt;

/// A day an opening-hours clause can apply to.
///
/// The seven calendar weekdays form a cycle (Sunday is followed by Monday).
/// Public holidays and school holidays sit outside that cycle: they have no
/// successor or predecessor and are never part of a weekday range.
///
/// # Examples
///
/// ```
/// use place_core::hours::Weekday;
///
/// assert_eq!(Weekday::from_code("mo"), Some(Weekday::Monday));
/// assert_eq!(Weekday::Sunday.next(), Some(Weekday::Monday));
/// assert_eq!(Weekday::Holiday.next(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Holiday,
    SchoolHoliday,
}

impl Weekday {
    /// Every weekday in sort-index order, holidays last.
    pub const ALL: [Weekday; 9] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Holiday,
        Weekday::SchoolHoliday,
    ];

    /// The seven calendar weekdays, Monday first.
    pub const WEEK: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Parse a lower-case two-letter day code (`mo`..`su`, `ph`, `sh`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "mo" => Some(Weekday::Monday),
            "tu" => Some(Weekday::Tuesday),
            "we" => Some(Weekday::Wednesday),
            "th" => Some(Weekday::Thursday),
            "fr" => Some(Weekday::Friday),
            "sa" => Some(Weekday::Saturday),
            "su" => Some(Weekday::Sunday),
            "ph" => Some(Weekday::Holiday),
            "sh" => Some(Weekday::SchoolHoliday),
            _ => None,
        }
    }

    /// The lower-case day code.
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "mo",
            Weekday::Tuesday => "tu",
            Weekday::Wednesday => "we",
            Weekday::Thursday => "th",
            Weekday::Friday => "fr",
            Weekday::Saturday => "sa",
            Weekday::Sunday => "su",
            Weekday::Holiday => "ph",
            Weekday::SchoolHoliday => "sh",
        }
    }

    /// The following calendar weekday, or `None` for holidays.
    pub fn next(self) -> Option<Self> {
        match self {
            Weekday::Monday => Some(Weekday::Tuesday),
            Weekday::Tuesday => Some(Weekday::Wednesday),
            Weekday::Wednesday => Some(Weekday::Thursday),
            Weekday::Thursday => Some(Weekday::Friday),
            Weekday::Friday => Some(Weekday::Saturday),
            Weekday::Saturday => Some(Weekday::Sunday),
            Weekday::Sunday => Some(Weekday::Monday),
            Weekday::Holiday | Weekday::SchoolHoliday => None,
        }
    }

    /// The preceding calendar weekday, or `None` for holidays.
    pub fn previous(self) -> Option<Self> {
        match self {
            Weekday::Monday => Some(Weekday::Sunday),
            Weekday::Tuesday => Some(Weekday::Monday),
            Weekday::Wednesday => Some(Weekday::Tuesday),
            Weekday::Thursday => Some(Weekday::Wednesday),
            Weekday::Friday => Some(Weekday::Thursday),
            Weekday::Saturday => Some(Weekday::Friday),
            Weekday::Sunday => Some(Weekday::Saturday),
            Weekday::Holiday | Weekday::SchoolHoliday => None,
        }
    }

    /// Canonical display position: Monday is 0, Sunday 6, holiday 7,
    /// school holiday 8.
    pub fn sort_index(self) -> usize {
        self as usize
    }

    /// Whether this is a public or school holiday.
    pub fn is_special(self) -> bool {
        matches!(self, Weekday::Holiday | Weekday::SchoolHoliday)
    }

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
            Weekday::Holiday => "Public holiday",
            Weekday::SchoolHoliday => "School holiday",
        }
    }

    /// Abbreviated English name. Holidays keep their full name.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
            Weekday::Holiday | Weekday::SchoolHoliday => self.name(),
        }
    }

    /// The matching calendar weekday, or `None` for holidays.
    pub fn to_chrono(self) -> Option<chrono::Weekday> {
        match self {
            Weekday::Monday => Some(chrono::Weekday::Mon),
            Weekday::Tuesday => Some(chrono::Weekday::Tue),
            Weekday::Wednesday => Some(chrono::Weekday::Wed),
            Weekday::Thursday => Some(chrono::Weekday::Thu),
            Weekday::Friday => Some(chrono::Weekday::Fri),
            Weekday::Saturday => Some(chrono::Weekday::Sat),
            Weekday::Sunday => Some(chrono::Weekday::Sun),
            Weekday::Holiday | Weekday::SchoolHoliday => None,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of weekdays stored as a bitmask over [`Weekday::sort_index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u16);

impl WeekdaySet {
    /// The empty set.
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.sort_index();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.sort_index()) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in sort-index order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}
