//! Notification planning engine.
//!
//! Pure computation: given a weekly class schedule and the shuttle
//! timetable, derive the day's notifications (morning to-campus, evening
//! to-home) or check whether a trigger time is close enough to "now" to
//! warrant an urgent notification. Dispatch is the web layer's problem.

mod check;
mod event;
mod plan;
mod policy;

pub use check::proximity_check;
pub use event::{NotificationEvent, NotificationKind};
pub use plan::{DayPlan, plan_day};
pub use policy::{earliest_at_or_after, latest_before, nearest_from};

/// Morning notifications fire this many minutes before the first class.
pub const MORNING_LEAD_MINS: u16 = 60;

/// The evening proximity trigger sits this many minutes before the end
/// of the last class.
pub const EVENING_LEAD_MINS: u16 = 30;

/// Half-width of the proximity window, inclusive.
pub const PROXIMITY_WINDOW_MINS: u16 = 5;

/// How many shuttles each recommendation lists at most.
pub const RECOMMEND_COUNT: usize = 2;
