//! Wall-clock time handling for shuttle timetables.
//!
//! Timetables and class schedules exchange times as zero-padded "HH:MM"
//! strings. Internally a time is minutes since midnight, which keeps the
//! before/after comparisons and lead-time arithmetic trivial. There is no
//! date component: everything here is about a single service day.

use std::fmt;

/// Error returned when parsing an invalid time string.
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

/// A time of day, stored as minutes since midnight.
///
/// Guaranteed to be in `0..1440` by construction. Subtraction clamps at
/// midnight rather than wrapping to the previous day, because a "leave N
/// minutes early" reminder before 00:00 makes no sense for a shuttle that
/// only runs during the day.
///
/// # Examples
///
/// ```
/// use shuttle_server::domain::ClockTime;
///
/// let t = ClockTime::parse("08:40").unwrap();
/// assert_eq!(t.to_string(), "08:40");
/// assert_eq!(t.minutes(), 8 * 60 + 40);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, the floor for clamped subtraction.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Parse a time from "HH:MM" format.
    ///
    /// The input must be exactly five characters, zero-padded, with the
    /// hour in 00-23 and the minute in 00-59.
    ///
    /// # Examples
    ///
    /// ```
    /// use shuttle_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse("8:40").is_err());
    /// assert!(ClockTime::parse("0840").is_err());
    /// assert!(ClockTime::parse("24:00").is_err());
    /// assert!(ClockTime::parse("08:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self(hour * 60 + minute))
    }

    /// Construct from hour and minute components.
    ///
    /// Returns `None` when either component is out of range. Usable in
    /// const contexts for compile-time constants.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Construct from minutes since midnight.
    ///
    /// Returns `None` when the value is outside `0..1440`.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Subtract a number of minutes, clamping at midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use shuttle_server::domain::ClockTime;
    ///
    /// let t = ClockTime::parse("09:00").unwrap();
    /// assert_eq!(t.saturating_sub_minutes(60).to_string(), "08:00");
    ///
    /// // Never goes below 00:00
    /// let early = ClockTime::parse("00:30").unwrap();
    /// assert_eq!(early.saturating_sub_minutes(60).to_string(), "00:00");
    /// ```
    pub fn saturating_sub_minutes(&self, minutes: u16) -> Self {
        Self(self.0.saturating_sub(minutes))
    }

    /// Absolute distance to another time, in minutes.
    pub fn abs_diff_minutes(&self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<chrono::NaiveTime> for ClockTime {
    fn from(t: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

/// Parse two ASCII digit bytes into a u16.
fn parse_two_digits(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)? as u16;
    let d2 = (bytes[1] as char).to_digit(10)? as u16;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid() {
        assert_eq!(time("00:00").minutes(), 0);
        assert_eq!(time("23:59").minutes(), 1439);
        assert_eq!(time("08:15").minutes(), 495);
    }

    #[test]
    fn parse_rejects_bad_formats() {
        for s in ["", "8:40", "08-40", "08:4", "0840", "aa:bb", "08:40 "] {
            assert!(ClockTime::parse(s).is_err(), "should reject {s:?}");
        }
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
        assert!(ClockTime::parse("99:99").is_err());
    }

    #[test]
    fn subtraction_clamps_at_midnight() {
        assert_eq!(time("00:30").saturating_sub_minutes(60), time("00:00"));
        assert_eq!(time("01:00").saturating_sub_minutes(60), time("00:00"));
        assert_eq!(time("09:00").saturating_sub_minutes(60), time("08:00"));
    }

    #[test]
    fn ordering_follows_the_clock() {
        assert!(time("08:15") < time("08:40"));
        assert!(time("12:00") < time("15:00"));
        assert_eq!(time("10:10"), time("10:10"));
    }

    #[test]
    fn abs_diff_is_symmetric() {
        assert_eq!(time("08:00").abs_diff_minutes(time("08:05")), 5);
        assert_eq!(time("08:05").abs_diff_minutes(time("08:00")), 5);
        assert_eq!(time("08:00").abs_diff_minutes(time("08:00")), 0);
    }

    #[test]
    fn from_minutes_bounds() {
        assert!(ClockTime::from_minutes(1439).is_some());
        assert!(ClockTime::from_minutes(1440).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_parse_round_trip(h in 0u16..24, m in 0u16..60) {
                let rendered = format!("{h:02}:{m:02}");
                let parsed = ClockTime::parse(&rendered).unwrap();
                prop_assert_eq!(parsed.to_string(), rendered);
            }

            #[test]
            fn minutes_round_trip(mins in 0u16..1440) {
                let t = ClockTime::from_minutes(mins).unwrap();
                prop_assert_eq!(t.minutes(), mins);
                prop_assert_eq!(ClockTime::parse(&t.to_string()).unwrap(), t);
            }

            #[test]
            fn subtraction_never_underflows(mins in 0u16..1440, sub in 0u16..2000) {
                let t = ClockTime::from_minutes(mins).unwrap();
                let result = t.saturating_sub_minutes(sub);
                prop_assert!(result <= t);
                prop_assert!(result >= ClockTime::MIDNIGHT);
            }
        }
    }
}
