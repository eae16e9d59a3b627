//! Class sessions and the weekly schedule supplied per request.

use std::collections::HashMap;

use super::{ClockTime, Weekday};

/// A single class meeting on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSession {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ClassSession {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }
}

/// A week's worth of class sessions, keyed by weekday.
///
/// Supplied by the caller on every request and never stored.
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    days: HashMap<Weekday, Vec<ClassSession>>,
}

impl WeeklySchedule {
    pub fn new(days: HashMap<Weekday, Vec<ClassSession>>) -> Self {
        Self { days }
    }

    /// The sessions for a given day, in the order the caller supplied them.
    pub fn sessions_for(&self, day: Weekday) -> &[ClassSession] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The first and last class of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBracket {
    pub first: ClassSession,
    pub last: ClassSession,
}

/// Find the first and last class of the day.
///
/// Sessions are ordered by start time; `first` is the earliest-starting
/// session and `last` is the latest-starting one. Note that `last` is
/// chosen by start time, not end time: a session that starts later but
/// ends earlier than another still counts as the last class. This matches
/// the behavior clients have come to rely on.
///
/// Returns `None` for an empty day.
pub fn bracket_day(sessions: &[ClassSession]) -> Option<DayBracket> {
    let mut sorted: Vec<ClassSession> = sessions.to_vec();
    sorted.sort_by_key(|s| s.start);

    let first = *sorted.first()?;
    let last = *sorted.last()?;

    Some(DayBracket { first, last })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn session(start: &str, end: &str) -> ClassSession {
        ClassSession::new(time(start), time(end))
    }

    #[test]
    fn empty_day_has_no_bracket() {
        assert_eq!(bracket_day(&[]), None);
    }

    #[test]
    fn single_session_is_both_first_and_last() {
        let s = session("09:00", "10:00");
        let bracket = bracket_day(&[s]).unwrap();
        assert_eq!(bracket.first, s);
        assert_eq!(bracket.last, s);
    }

    #[test]
    fn brackets_by_start_time_regardless_of_input_order() {
        let sessions = vec![
            session("14:00", "15:00"),
            session("09:00", "10:00"),
            session("11:00", "12:00"),
        ];
        let bracket = bracket_day(&sessions).unwrap();
        assert_eq!(bracket.first, session("09:00", "10:00"));
        assert_eq!(bracket.last, session("14:00", "15:00"));
    }

    #[test]
    fn last_is_by_start_even_when_it_ends_earlier() {
        // The 15:00 session starts last but ends before the 13:00 one.
        // The latest-starting session still wins.
        let sessions = vec![
            session("13:00", "17:00"),
            session("15:00", "16:00"),
        ];
        let bracket = bracket_day(&sessions).unwrap();
        assert_eq!(bracket.last, session("15:00", "16:00"));
    }

    #[test]
    fn sessions_for_missing_day_is_empty() {
        let week = WeeklySchedule::default();
        assert!(week.sessions_for(Weekday::Monday).is_empty());
    }
}
