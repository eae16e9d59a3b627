//! Data transfer objects for web requests and responses.
//!
//! All times cross the wire as zero-padded "HH:MM" strings; conversion
//! to and from domain types happens at this boundary.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{ClassSession, ClockTime};
use crate::engine::NotificationEvent;
use crate::timetable::{RouteTimes, ShuttleTimetable};

/// Departure times for one route variant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTimesDto {
    pub to_school: Vec<String>,
    pub to_home: Vec<String>,
}

impl RouteTimesDto {
    fn from_route(route: &RouteTimes) -> Self {
        Self {
            to_school: render_times(&route.to_school),
            to_home: render_times(&route.to_home),
        }
    }
}

/// The full timetable as returned by the schedule endpoints.
///
/// Variants are flattened alongside the main directions, so the JSON
/// shape is `{ toSchool, toHome, station: {...}, downtown: {...} }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDto {
    pub to_school: Vec<String>,
    pub to_home: Vec<String>,
    #[serde(flatten)]
    pub variants: BTreeMap<String, RouteTimesDto>,
}

impl TimetableDto {
    pub fn from_timetable(timetable: &ShuttleTimetable) -> Self {
        Self {
            to_school: render_times(&timetable.to_school),
            to_home: render_times(&timetable.to_home),
            variants: timetable
                .variants
                .iter()
                .map(|(name, route)| (name.clone(), RouteTimesDto::from_route(route)))
                .collect(),
        }
    }
}

/// Envelope for the schedule endpoints.
#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: TimetableDto,
}

/// Partial timetable replacement. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimetableRequest {
    pub to_school: Option<Vec<String>>,
    pub to_home: Option<Vec<String>>,
}

/// One class session, as supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub start: String,
    pub end: String,
}

impl SessionDto {
    pub fn from_session(session: &ClassSession) -> Self {
        Self {
            start: session.start.to_string(),
            end: session.end.to_string(),
        }
    }
}

/// Request to compute the day's notifications.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub schedule: HashMap<String, Vec<SessionDto>>,
}

/// A computed notification.
///
/// Day-plan notifications carry the trigger time, recommended shuttles
/// and the anchoring class time; urgent proximity notifications carry
/// only the `urgent` marker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuttles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_time: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub urgent: bool,
}

impl NotificationDto {
    pub fn from_event(event: &NotificationEvent) -> Self {
        if event.urgent {
            Self {
                kind: event.kind.as_str(),
                title: event.title.clone(),
                message: event.message.clone(),
                time: None,
                shuttles: None,
                original_time: None,
                urgent: true,
            }
        } else {
            Self {
                kind: event.kind.as_str(),
                title: event.title.clone(),
                message: event.message.clone(),
                time: Some(event.trigger_time.to_string()),
                shuttles: Some(render_times(&event.shuttles)),
                original_time: Some(event.reference_time.to_string()),
                urgent: false,
            }
        }
    }
}

/// Response for the day-plan endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub notifications: Vec<NotificationDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_schedule: Option<Vec<SessionDto>>,
}

/// Request for the proximity check.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub schedule: CheckScheduleDto,
}

/// Bracket times for the proximity check. Both classes are optional and
/// fall back to server defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckScheduleDto {
    #[serde(default)]
    pub first_class: Option<FirstClassDto>,
    #[serde(default)]
    pub last_class: Option<LastClassDto>,
}

#[derive(Debug, Deserialize)]
pub struct FirstClassDto {
    pub start: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LastClassDto {
    pub end: Option<String>,
}

/// Response for the proximity check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub success: bool,
    pub notifications: Vec<NotificationDto>,
    pub current_time: String,
}

/// Request for the manual dispatch test.
#[derive(Debug, Default, Deserialize)]
pub struct TestKakaoRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Response for the manual dispatch test, reporting the local and API
/// delivery paths separately.
#[derive(Debug, Serialize)]
pub struct TestKakaoResponse {
    pub success: bool,
    pub api_success: bool,
    pub message: String,
    pub note: String,
}

/// Error envelope shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Render domain times as wire strings.
pub(super) fn render_times(times: &[ClockTime]) -> Vec<String> {
    times.iter().map(ToString::to_string).collect()
}

fn is_false(b: &bool) -> bool {
    !*b
}
