//! The shuttle timetable and its mutable store.
//!
//! The timetable is process-lifetime state: it starts from the built-in
//! default and is only ever mutated by a full replace of one or both main
//! directions. Nothing is persisted across restarts.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::ClockTime;

/// Departure times for one route, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTimes {
    /// Shuttles heading to campus.
    pub to_school: Vec<ClockTime>,
    /// Shuttles heading home.
    pub to_home: Vec<ClockTime>,
}

/// The full shuttle timetable.
///
/// `to_school` and `to_home` are the main directional sequences used for
/// recommendations. `variants` holds named route variants (subway-station
/// and downtown runs) that are exposed for display but not consulted by
/// the notification engine.
///
/// Sequences are ascending by convention. Ordering is not enforced: an
/// unsorted replacement is accepted as given and quietly degrades
/// recommendation quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuttleTimetable {
    pub to_school: Vec<ClockTime>,
    pub to_home: Vec<ClockTime>,
    pub variants: BTreeMap<String, RouteTimes>,
}

/// A partial update to the main directions.
///
/// `None` fields leave the stored sequence untouched.
#[derive(Debug, Clone, Default)]
pub struct TimetableUpdate {
    pub to_school: Option<Vec<ClockTime>>,
    pub to_home: Option<Vec<ClockTime>>,
}

impl Default for ShuttleTimetable {
    fn default() -> Self {
        let mut variants = BTreeMap::new();
        variants.insert(
            "station".to_string(),
            RouteTimes {
                to_school: parse_all(STATION_TO_SCHOOL),
                to_home: parse_all(STATION_TO_HOME),
            },
        );
        variants.insert(
            "downtown".to_string(),
            RouteTimes {
                to_school: parse_all(DOWNTOWN_TO_SCHOOL),
                to_home: parse_all(DOWNTOWN_TO_HOME),
            },
        );

        Self {
            to_school: parse_all(MAIN_TO_SCHOOL),
            to_home: parse_all(MAIN_TO_HOME),
            variants,
        }
    }
}

/// Thread-safe handle to the current timetable.
///
/// Reads take a snapshot clone; writes atomically replace the requested
/// directions. Last writer wins, which is the whole locking contract.
#[derive(Clone)]
pub struct ScheduleStore {
    inner: Arc<RwLock<ShuttleTimetable>>,
}

impl ScheduleStore {
    pub fn new(timetable: ShuttleTimetable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(timetable)),
        }
    }

    /// Snapshot of the current timetable.
    pub async fn get(&self) -> ShuttleTimetable {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Overwrite the directions present in `update`, leaving the rest
    /// (including variants) untouched. Returns the updated snapshot.
    pub async fn replace(&self, update: TimetableUpdate) -> ShuttleTimetable {
        let mut guard = self.inner.write().await;
        if let Some(to_school) = update.to_school {
            guard.to_school = to_school;
        }
        if let Some(to_home) = update.to_home {
            guard.to_home = to_home;
        }
        guard.clone()
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(ShuttleTimetable::default())
    }
}

fn parse_all(raw: &[&str]) -> Vec<ClockTime> {
    raw.iter()
        .map(|s| ClockTime::parse(s).expect("built-in timetable literal"))
        .collect()
}

// Built-in timetable: main route, entry-road times to campus and
// departure times home.
#[rustfmt::skip]
const MAIN_TO_SCHOOL: &[&str] = &[
    "08:15", "08:20", "08:30", "08:35", "08:40", "08:50", "09:00", "09:05", "09:15", "09:30",
    "09:40", "09:45", "09:50", "09:55", "10:10", "10:15", "10:35", "10:45", "10:55", "11:00",
    "11:15", "11:25", "11:40", "11:45", "12:00", "12:10", "12:20", "12:35", "12:45", "13:00",
    "13:15", "13:25", "13:40", "13:55", "14:10", "14:25", "14:35", "14:50", "15:05", "15:20",
    "15:35", "15:50", "16:05", "16:20", "16:35", "16:50", "17:05", "17:20", "17:35", "17:50",
    "18:05", "18:20", "18:35", "18:50", "19:05", "19:20", "19:35", "19:50", "20:05", "20:15",
];

#[rustfmt::skip]
const MAIN_TO_HOME: &[&str] = &[
    "08:00", "08:05", "08:15", "08:20", "08:25", "08:35", "08:45", "08:50", "08:55", "09:00",
    "09:15", "09:25", "09:30", "09:35", "09:40", "09:55", "10:00", "10:20", "10:30", "10:40",
    "10:45", "11:00", "11:20", "11:25", "11:30", "11:45", "11:55", "12:05", "12:20", "12:30", "12:45",
    "13:00", "13:10", "13:25", "13:40", "13:55", "14:10", "14:20", "14:35", "14:50", "15:05",
    "15:20", "15:35", "15:50", "16:05", "16:20", "16:35", "16:50", "17:05", "17:20", "17:35",
    "17:50", "18:05", "18:20", "18:35", "18:50", "19:05", "19:20", "19:35", "19:50", "20:00",
];

#[rustfmt::skip]
const STATION_TO_SCHOOL: &[&str] = &[
    "08:15", "08:30", "08:35", "08:40", "08:50", "09:00", "09:05", "09:15", "09:30",
    "09:40", "09:45", "09:50", "09:55", "10:15", "10:35", "10:45", "10:55", "11:00",
    "11:15", "11:25", "11:40", "11:45", "12:00", "12:10", "12:20", "12:35", "12:45", "13:00",
    "13:15", "13:25", "13:40", "13:55", "14:10", "14:25", "14:50", "15:05", "15:20",
    "15:35", "15:50", "16:05", "16:20", "16:35", "16:50", "17:05", "17:20", "17:35", "17:50",
    "18:05", "18:20", "18:35", "18:50", "19:05", "19:20", "19:35", "19:50", "20:05", "20:15",
];

#[rustfmt::skip]
const STATION_TO_HOME: &[&str] = &[
    "08:00", "08:15", "08:20", "08:25", "08:35", "08:45", "08:50", "08:55", "09:00",
    "09:15", "09:25", "09:30", "09:35", "09:40", "09:55", "10:00", "10:20", "10:30",
    "10:40", "10:45", "11:00", "11:25", "11:30", "11:45", "11:55", "12:05", "12:20", "12:30", "12:45",
    "13:00", "13:10", "13:25", "13:40", "13:55", "14:10", "14:20", "14:35", "14:50", "15:05",
    "15:20", "15:35", "15:50", "16:05", "16:20", "16:35", "16:50", "17:05", "17:20", "17:35",
    "17:50", "18:05", "18:20", "18:35", "18:50", "19:05", "19:20", "19:35", "19:50", "20:00",
];

#[rustfmt::skip]
const DOWNTOWN_TO_SCHOOL: &[&str] = &[
    "08:20", "09:10", "10:25", "11:35", "13:25", "14:35", "15:55", "16:50", "18:25", "20:15",
];

#[rustfmt::skip]
const DOWNTOWN_TO_HOME: &[&str] = &[
    "08:05", "08:55", "10:10", "11:20", "13:10", "14:20", "15:40", "16:35", "18:10", "20:00",
];
