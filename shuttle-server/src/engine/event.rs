//! Notification events produced by the engine.

use crate::domain::ClockTime;

/// Which leg of the day a notification covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// To-campus reminder ahead of the first class.
    Morning,
    /// To-home reminder at the end of the last class.
    Evening,
}

impl NotificationKind {
    /// Wire name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        }
    }

    /// Title used when dispatching this kind of notification.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Morning => "School shuttle reminder",
            Self::Evening => "Home shuttle reminder",
        }
    }
}

/// A computed notification, ready to dispatch.
///
/// Ephemeral: constructed per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// When the notification is meant to surface.
    pub trigger_time: ClockTime,
    /// Recommended departures, at most two, in policy order.
    pub shuttles: Vec<ClockTime>,
    /// The class time the recommendation is anchored to.
    pub reference_time: ClockTime,
    /// Set for proximity-check notifications that should surface now.
    pub urgent: bool,
}

/// Render a shuttle list for message text, e.g. "08:40, 08:15".
pub(crate) fn join_times(times: &[ClockTime]) -> String {
    times
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
