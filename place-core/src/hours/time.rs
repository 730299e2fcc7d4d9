//! Time-of-day handling for opening hours.
//!
//! Opening-hours strings give times as "HH:MM" and ranges as
//! "HH:MM-HH:MM". Hours are taken modulo 24, so "24:00" is midnight.
//! Minutes are kept as written.

use chrono::NaiveTime;
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time or time range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day as hour and minute.
///
/// Midnight doubles as a range boundary: a range ending at midnight runs
/// to the end of the day, and one starting at midnight may continue the
/// previous day's late opening.
///
/// # Examples
///
/// ```
/// use place_core::hours::DayTime;
///
/// let t = DayTime::parse("09:30").unwrap();
/// assert_eq!(t.hour(), 9);
/// assert_eq!(t.minute(), 30);
///
/// // 24:00 wraps to midnight
/// assert_eq!(DayTime::parse("24:00").unwrap(), DayTime::MIDNIGHT);
///
/// assert!(DayTime::parse("0930").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayTime {
    hour: u32,
    minute: u32,
}

impl DayTime {
    /// 00:00.
    pub const MIDNIGHT: DayTime = DayTime { hour: 0, minute: 0 };

    /// Create a time, normalizing the hour modulo 24.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute,
        }
    }

    /// Parse "H:M" with exactly one colon and two unsigned integers.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        if minute.contains(':') {
            return Err(TimeError::new("expected a single colon"));
        }

        let hour = parse_number(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_number(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Ok(Self::new(hour, minute))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Returns the minute as written.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn total_minutes(&self) -> u32 {
        (self.hour * 60).saturating_add(self.minute)
    }

    pub fn is_midnight(&self) -> bool {
        *self == Self::MIDNIGHT
    }

    /// Converts to a `NaiveTime`, or `None` when the minute is out of range.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

impl From<NaiveTime> for DayTime {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self::new(time.hour(), time.minute())
    }
}

impl Ord for DayTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_minutes()
            .cmp(&other.total_minutes())
            .then_with(|| self.hour.cmp(&other.hour))
            .then_with(|| self.minute.cmp(&other.minute))
    }
}

impl PartialOrd for DayTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One opening interval within a day.
///
/// A range whose `to` is midnight is open until the end of the day. After
/// parsing, a range may also end *before* it starts (e.g. 18:00-02:00),
/// meaning it runs past midnight into the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayTimeRange {
    pub from: DayTime,
    pub to: DayTime,
}

impl DayTimeRange {
    pub fn new(from: DayTime, to: DayTime) -> Self {
        Self { from, to }
    }

    /// Parse "HH:MM-HH:MM".
    ///
    /// # Examples
    ///
    /// ```
    /// use place_core::hours::{DayTime, DayTimeRange};
    ///
    /// let range = DayTimeRange::parse("09:00-17:30").unwrap();
    /// assert_eq!(range.from, DayTime::new(9, 0));
    /// assert_eq!(range.to, DayTime::new(17, 30));
    ///
    /// assert!(DayTimeRange::parse("09:00").is_err());
    /// assert!(DayTimeRange::parse("09:00-12:00-13:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split('-');
        let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TimeError::new("expected HH:MM-HH:MM format"));
        };

        Ok(Self {
            from: DayTime::parse(from)?,
            to: DayTime::parse(to)?,
        })
    }

    /// Whether the range runs to or past the end of the day.
    pub fn crosses_midnight(&self) -> bool {
        self.to.is_midnight() || self.to < self.from
    }
}

impl fmt::Display for DayTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from, self.to)
    }
}

/// Parse an unsigned decimal number made of ASCII digits only.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = DayTime::parse("00:00").unwrap();
        assert_eq!(t, DayTime::MIDNIGHT);

        let t = DayTime::parse("23:59").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = DayTime::parse("7:5").unwrap();
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 5);
    }

    #[test]
    fn hour_wraps_modulo_24() {
        assert_eq!(DayTime::parse("24:00").unwrap(), DayTime::MIDNIGHT);
        assert_eq!(DayTime::parse("26:30").unwrap(), DayTime::new(2, 30));
    }

    #[test]
    fn minute_not_bounds_checked() {
        let t = DayTime::parse("10:75").unwrap();
        assert_eq!(t.minute(), 75);
        assert_eq!(t.total_minutes(), 675);
        assert_eq!(t.to_naive_time(), None);
    }

    #[test]
    fn parse_invalid_format() {
        assert!(DayTime::parse("").is_err());
        assert!(DayTime::parse("1000").is_err());
        assert!(DayTime::parse("10:").is_err());
        assert!(DayTime::parse(":30").is_err());
        assert!(DayTime::parse("10:00:00").is_err());
        assert!(DayTime::parse("ab:cd").is_err());
        assert!(DayTime::parse("-1:00").is_err());
        assert!(DayTime::parse("+1:00").is_err());
        assert!(DayTime::parse(" 9:00").is_err());
    }

    #[test]
    fn error_display() {
        let err = DayTime::parse("1000").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: expected HH:MM format");
    }

    #[test]
    fn display_format() {
        assert_eq!(DayTime::new(9, 5).to_string(), "09:05");
        assert_eq!(format!("{:?}", DayTime::new(18, 0)), "DayTime(18:00)");

        let range = DayTimeRange::new(DayTime::new(9, 0), DayTime::new(17, 0));
        assert_eq!(range.to_string(), "09:00 - 17:00");
    }

    #[test]
    fn ordering_by_minutes() {
        let early = DayTime::new(8, 0);
        let late = DayTime::new(20, 15);
        assert!(early < late);
        assert!(DayTime::MIDNIGHT < early);
        assert_eq!(early.cmp(&early), Ordering::Equal);
    }

    #[test]
    fn naive_time_conversion() {
        let t = DayTime::new(14, 30);
        let naive = t.to_naive_time().unwrap();
        assert_eq!(DayTime::from(naive), t);
    }

    #[test]
    fn parse_ranges() {
        let range = DayTimeRange::parse("18:00-24:00").unwrap();
        assert_eq!(range.from, DayTime::new(18, 0));
        assert!(range.to.is_midnight());
        assert!(range.crosses_midnight());

        let range = DayTimeRange::parse("09:00-17:00").unwrap();
        assert!(!range.crosses_midnight());

        let overnight = DayTimeRange::new(DayTime::new(22, 0), DayTime::new(3, 0));
        assert!(overnight.crosses_midnight());
    }

    #[test]
    fn parse_invalid_ranges() {
        assert!(DayTimeRange::parse("").is_err());
        assert!(DayTimeRange::parse("09:00").is_err());
        assert!(DayTimeRange::parse("09:00-").is_err());
        assert!(DayTimeRange::parse("09:00-17").is_err());
        assert!(DayTimeRange::parse("09:00-12:00-13:00").is_err());
        assert!(DayTimeRange::parse("09:00 - 17:00").is_err());
    }
}
