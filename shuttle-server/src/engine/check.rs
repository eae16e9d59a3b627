//! On-demand proximity check against the current clock.

use crate::domain::ClockTime;
use crate::timetable::ShuttleTimetable;

use super::event::{NotificationEvent, NotificationKind, join_times};
use super::policy::nearest_from;
use super::{EVENING_LEAD_MINS, MORNING_LEAD_MINS, PROXIMITY_WINDOW_MINS, RECOMMEND_COUNT};

/// Check whether either trigger time is close enough to `now` to surface
/// an urgent notification on the spot.
///
/// The morning trigger is an hour before the first class, the evening
/// trigger thirty minutes before the end of the last class. A trigger
/// fires when it is within five minutes of `now`, inclusive on the
/// boundary (exactly five minutes away still fires).
///
/// Shuttle recommendations use the plain timetable-order scan
/// ([`nearest_from`]), not the sorted day-plan policies. The evening
/// scan anchors on class end itself, not the thirty-minute-early
/// trigger, so it suggests shuttles catchable after class is out.
pub fn proximity_check(
    first_start: ClockTime,
    last_end: ClockTime,
    now: ClockTime,
    timetable: &ShuttleTimetable,
) -> Vec<NotificationEvent> {
    let mut events = Vec::with_capacity(2);

    let morning_trigger = first_start.saturating_sub_minutes(MORNING_LEAD_MINS);
    if within_window(now, morning_trigger) {
        let shuttles = nearest_from(&timetable.to_school, morning_trigger, RECOMMEND_COUNT);
        let kind = NotificationKind::Morning;
        events.push(NotificationEvent {
            kind,
            title: kind.title().to_string(),
            message: format!(
                "Your first class starts in an hour! Shuttles depart at {}.",
                join_times(&shuttles)
            ),
            trigger_time: morning_trigger,
            shuttles,
            reference_time: first_start,
            urgent: true,
        });
    }

    let evening_trigger = last_end.saturating_sub_minutes(EVENING_LEAD_MINS);
    if within_window(now, evening_trigger) {
        let shuttles = nearest_from(&timetable.to_home, last_end, RECOMMEND_COUNT);
        let kind = NotificationKind::Evening;
        events.push(NotificationEvent {
            kind,
            title: kind.title().to_string(),
            message: format!(
                "Your last class ends in thirty minutes! Shuttles depart at {}.",
                join_times(&shuttles)
            ),
            trigger_time: evening_trigger,
            shuttles,
            reference_time: last_end,
            urgent: true,
        });
    }

    events
}

fn within_window(now: ClockTime, trigger: ClockTime) -> bool {
    now.abs_diff_minutes(trigger) <= PROXIMITY_WINDOW_MINS
}
