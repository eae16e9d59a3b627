//! Full-day notification planning.

use crate::domain::{ClassSession, ClockTime, Weekday, WeeklySchedule, bracket_day};
use crate::timetable::ShuttleTimetable;

use super::event::{NotificationEvent, NotificationKind, join_times};
use super::policy::{earliest_at_or_after, latest_before};
use super::{MORNING_LEAD_MINS, RECOMMEND_COUNT};

/// The outcome of planning one day.
#[derive(Debug, Clone, Default)]
pub struct DayPlan {
    /// Today's sessions, in the order the caller supplied them.
    pub today: Vec<ClassSession>,
    /// Zero, one, or two notifications (morning and/or evening).
    pub notifications: Vec<NotificationEvent>,
}

impl DayPlan {
    /// True when there are no classes today. Not an error: the caller
    /// reports a neutral "no classes" status.
    pub fn is_free_day(&self) -> bool {
        self.today.is_empty()
    }
}

/// Plan the day's notifications against the shuttle timetable.
///
/// Looks up `today` in the weekly schedule, brackets the day into first
/// and last class, and derives up to two notifications:
///
/// - Morning: triggers an hour before the first class (clamped at
///   midnight) and recommends the latest to-campus shuttles departing
///   strictly before class start.
/// - Evening: triggers at the end of the last class, with no lead time,
///   and recommends the earliest to-home shuttles at or after class end.
///
/// The asymmetry is intentional: the morning reminder needs walking
/// margin, the evening one fires as the student packs up.
///
/// Either notification is dropped when its candidate pool is empty.
pub fn plan_day(
    week: &WeeklySchedule,
    today: Weekday,
    timetable: &ShuttleTimetable,
) -> DayPlan {
    let sessions = week.sessions_for(today);

    let Some(bracket) = bracket_day(sessions) else {
        return DayPlan::default();
    };

    let mut notifications = Vec::with_capacity(2);

    if let Some(event) = morning_notification(bracket.first.start, timetable) {
        notifications.push(event);
    }
    if let Some(event) = evening_notification(bracket.last.end, timetable) {
        notifications.push(event);
    }

    DayPlan {
        today: sessions.to_vec(),
        notifications,
    }
}

fn morning_notification(
    first_start: ClockTime,
    timetable: &ShuttleTimetable,
) -> Option<NotificationEvent> {
    let shuttles = latest_before(&timetable.to_school, first_start, RECOMMEND_COUNT);
    if shuttles.is_empty() {
        return None;
    }

    let kind = NotificationKind::Morning;
    Some(NotificationEvent {
        kind,
        title: kind.title().to_string(),
        message: format!(
            "The last shuttles that make your {} class leave at {}.",
            first_start,
            join_times(&shuttles)
        ),
        trigger_time: first_start.saturating_sub_minutes(MORNING_LEAD_MINS),
        shuttles,
        reference_time: first_start,
        urgent: false,
    })
}

fn evening_notification(
    last_end: ClockTime,
    timetable: &ShuttleTimetable,
) -> Option<NotificationEvent> {
    let shuttles = earliest_at_or_after(&timetable.to_home, last_end, RECOMMEND_COUNT);
    if shuttles.is_empty() {
        return None;
    }

    let kind = NotificationKind::Evening;
    Some(NotificationEvent {
        kind,
        title: kind.title().to_string(),
        message: format!(
            "The earliest shuttles home after your {} class leave at {}.",
            last_end,
            join_times(&shuttles)
        ),
        trigger_time: last_end,
        shuttles,
        reference_time: last_end,
        urgent: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn times(strs: &[&str]) -> Vec<ClockTime> {
        strs.iter().map(|s| time(s)).collect()
    }

    fn session(start: &str, end: &str) -> ClassSession {
        ClassSession::new(time(start), time(end))
    }

    fn week_of(day: Weekday, sessions: Vec<ClassSession>) -> WeeklySchedule {
        WeeklySchedule::new(HashMap::from([(day, sessions)]))
    }

    fn timetable(to_school: &[&str], to_home: &[&str]) -> ShuttleTimetable {
        ShuttleTimetable {
            to_school: times(to_school),
            to_home: times(to_home),
            variants: Default::default(),
        }
    }

    #[test]
    fn typical_day_produces_both_notifications() {
        let week = week_of(
            Weekday::Monday,
            vec![session("09:00", "10:00"), session("14:00", "15:00")],
        );
        let timetable = timetable(
            &["07:30", "08:15", "08:40", "09:10"],
            &["14:30", "15:00", "15:20", "16:00"],
        );

        let plan = plan_day(&week, Weekday::Monday, &timetable);
        assert_eq!(plan.notifications.len(), 2);

        let morning = &plan.notifications[0];
        assert_eq!(morning.kind, NotificationKind::Morning);
        assert_eq!(morning.trigger_time, time("08:00"));
        assert_eq!(morning.shuttles, times(&["08:40", "08:15"]));
        assert_eq!(morning.reference_time, time("09:00"));
        assert!(!morning.urgent);

        let evening = &plan.notifications[1];
        assert_eq!(evening.kind, NotificationKind::Evening);
        assert_eq!(evening.trigger_time, time("15:00"));
        assert_eq!(evening.shuttles, times(&["15:00", "15:20"]));
        assert_eq!(evening.reference_time, time("15:00"));
    }

    #[test]
    fn free_day_yields_empty_plan() {
        let week = week_of(Weekday::Monday, vec![session("09:00", "10:00")]);

        let plan = plan_day(&week, Weekday::Tuesday, &ShuttleTimetable::default());
        assert!(plan.is_free_day());
        assert!(plan.notifications.is_empty());
    }

    #[test]
    fn day_with_empty_session_list_is_free() {
        let week = week_of(Weekday::Wednesday, vec![]);

        let plan = plan_day(&week, Weekday::Wednesday, &ShuttleTimetable::default());
        assert!(plan.is_free_day());
        assert!(plan.notifications.is_empty());
    }

    #[test]
    fn no_morning_notification_without_earlier_shuttle() {
        let week = week_of(Weekday::Monday, vec![session("08:00", "09:00")]);
        let timetable = timetable(&["08:30", "09:00"], &["09:00", "10:00"]);

        let plan = plan_day(&week, Weekday::Monday, &timetable);
        assert_eq!(plan.notifications.len(), 1);
        assert_eq!(plan.notifications[0].kind, NotificationKind::Evening);
    }

    #[test]
    fn no_evening_notification_after_last_shuttle() {
        let week = week_of(Weekday::Friday, vec![session("19:00", "21:00")]);
        let timetable = timetable(&["18:00"], &["18:00", "20:00"]);

        let plan = plan_day(&week, Weekday::Friday, &timetable);
        assert_eq!(plan.notifications.len(), 1);
        assert_eq!(plan.notifications[0].kind, NotificationKind::Morning);
    }

    #[test]
    fn early_first_class_clamps_trigger_to_midnight() {
        let week = week_of(Weekday::Monday, vec![session("00:30", "02:00")]);
        let timetable = timetable(&["00:10"], &["08:00"]);

        let plan = plan_day(&week, Weekday::Monday, &timetable);
        let morning = &plan.notifications[0];
        assert_eq!(morning.trigger_time, time("00:00"));
    }

    #[test]
    fn evening_anchors_on_latest_starting_session() {
        // The 15:00 class starts last but ends at 16:00, before the
        // 13:00 class ends. The evening reminder still follows it.
        let week = week_of(
            Weekday::Monday,
            vec![session("13:00", "17:00"), session("15:00", "16:00")],
        );
        let timetable = timetable(&["08:00"], &["16:00", "17:30"]);

        let plan = plan_day(&week, Weekday::Monday, &timetable);
        let evening = plan
            .notifications
            .iter()
            .find(|n| n.kind == NotificationKind::Evening)
            .unwrap();
        assert_eq!(evening.reference_time, time("16:00"));
        assert_eq!(evening.shuttles, times(&["16:00", "17:30"]));
    }

    #[test]
    fn today_preserves_caller_order() {
        let supplied = vec![session("14:00", "15:00"), session("09:00", "10:00")];
        let week = week_of(Weekday::Monday, supplied.clone());

        let plan = plan_day(&week, Weekday::Monday, &ShuttleTimetable::default());
        assert_eq!(plan.today, supplied);
    }

    #[test]
    fn message_mentions_class_time_and_shuttles() {
        let week = week_of(Weekday::Monday, vec![session("09:00", "10:00")]);
        let timetable = timetable(&["08:15", "08:40"], &["15:00"]);

        let plan = plan_day(&week, Weekday::Monday, &timetable);
        let morning = &plan.notifications[0];
        assert!(morning.message.contains("09:00"));
        assert!(morning.message.contains("08:40, 08:15"));
    }
}
