//! HTTP route handlers.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;

use crate::domain::{ClassSession, ClockTime, Weekday, WeeklySchedule};
use crate::engine::{plan_day, proximity_check};
use crate::kakao::Messenger;
use crate::timetable::TimetableUpdate;

use super::dto::*;
use super::state::AppState;

/// Fallback bracket times when the proximity check omits them.
const DEFAULT_FIRST_START: ClockTime = match ClockTime::from_hm(9, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const DEFAULT_LAST_END: ClockTime = match ClockTime::from_hm(18, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Create the application router.
///
/// `static_dir` is the path to the frontend assets directory.
pub fn create_router<M>(state: AppState<M>, static_dir: &str) -> Router
where
    M: Messenger + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/shuttle-schedule",
            get(get_schedule::<M>).put(update_schedule::<M>),
        )
        .route(
            "/api/calculate-notifications",
            post(calculate_notifications::<M>),
        )
        .route("/api/check-notifications", post(check_notifications::<M>))
        .route("/api/test-kakao", post(test_kakao::<M>))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Convert a handler panic into the generic 500 envelope.
///
/// The panic payload is logged, never surfaced.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal { message: detail }.into_response()
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Return the current shuttle timetable.
async fn get_schedule<M: Messenger>(
    State(state): State<AppState<M>>,
) -> Json<TimetableResponse> {
    let timetable = state.store.get().await;
    Json(TimetableResponse {
        success: true,
        message: None,
        data: TimetableDto::from_timetable(&timetable),
    })
}

/// Replace the main timetable directions present in the request body.
async fn update_schedule<M: Messenger>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> Result<Json<TimetableResponse>, AppError> {
    let req: UpdateTimetableRequest = parse_json(&body)?;

    let update = TimetableUpdate {
        to_school: req
            .to_school
            .map(|times| parse_time_list(&times, "toSchool"))
            .transpose()?,
        to_home: req
            .to_home
            .map(|times| parse_time_list(&times, "toHome"))
            .transpose()?,
    };

    let updated = state.store.replace(update).await;

    Ok(Json(TimetableResponse {
        success: true,
        message: Some("Shuttle timetable updated.".to_string()),
        data: TimetableDto::from_timetable(&updated),
    }))
}

/// Compute and dispatch the day's notifications.
async fn calculate_notifications<M: Messenger>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> Result<Json<CalculateResponse>, AppError> {
    let req: CalculateRequest = parse_json(&body)?;

    if req.schedule.is_empty() {
        return Err(AppError::Validation {
            message: "No schedule provided.".to_string(),
        });
    }

    let week = build_weekly_schedule(&req.schedule)?;

    let now = Local::now();
    let today = Weekday::from(now.weekday());
    let current_time = ClockTime::from(now.time());

    let timetable = state.store.get().await;
    let plan = plan_day(&week, today, &timetable);

    if plan.is_free_day() {
        return Ok(Json(CalculateResponse {
            success: true,
            message: Some("No classes today.".to_string()),
            notifications: vec![],
            current_time: None,
            today_schedule: None,
        }));
    }

    // Best-effort dispatch: delivery failures are logged and never fail
    // the request.
    for event in &plan.notifications {
        let delivered = state.messenger.send(&event.title, &event.message).await;
        if !delivered {
            tracing::warn!(kind = event.kind.as_str(), "notification dispatch failed");
        }
    }

    Ok(Json(CalculateResponse {
        success: true,
        message: None,
        notifications: plan
            .notifications
            .iter()
            .map(NotificationDto::from_event)
            .collect(),
        current_time: Some(current_time.to_string()),
        today_schedule: Some(plan.today.iter().map(SessionDto::from_session).collect()),
    }))
}

/// Check whether a trigger time falls within the window around now.
async fn check_notifications<M: Messenger>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> Result<Json<CheckResponse>, AppError> {
    let req: CheckRequest = parse_json(&body)?;

    let first_start = req
        .schedule
        .first_class
        .as_ref()
        .and_then(|c| c.start.as_deref())
        .map(|s| parse_time_field(s, "firstClass.start"))
        .transpose()?
        .unwrap_or(DEFAULT_FIRST_START);

    let last_end = req
        .schedule
        .last_class
        .as_ref()
        .and_then(|c| c.end.as_deref())
        .map(|s| parse_time_field(s, "lastClass.end"))
        .transpose()?
        .unwrap_or(DEFAULT_LAST_END);

    let now = ClockTime::from(Local::now().time());
    let timetable = state.store.get().await;

    let events = proximity_check(first_start, last_end, now, &timetable);

    Ok(Json(CheckResponse {
        success: true,
        notifications: events.iter().map(NotificationDto::from_event).collect(),
        current_time: now.to_string(),
    }))
}

/// Manually exercise the dispatch paths.
///
/// Always returns 200; the local and API outcomes are reported as
/// separate booleans.
async fn test_kakao<M: Messenger>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> Json<TestKakaoResponse> {
    let req: TestKakaoRequest = serde_json::from_slice(&body).unwrap_or_default();
    let title = req.title.unwrap_or_else(|| "Test notification".to_string());
    let message = req
        .message
        .unwrap_or_else(|| "This is a shuttle notification test.".to_string());

    let success = state.messenger.send(&title, &message).await;
    let api_success = state.kakao.send(&title, &message).await;

    Json(TestKakaoResponse {
        success,
        api_success,
        message: "Kakao notification test completed.".to_string(),
        note: "Real delivery requires user authentication.".to_string(),
    })
}

/// Parse a JSON body, logging rejects at debug level.
fn parse_json<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "request body rejected");
        AppError::Validation {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_time_field(s: &str, field: &str) -> Result<ClockTime, AppError> {
    ClockTime::parse(s).map_err(|e| AppError::Validation {
        message: format!("Invalid {field} time {s:?}: {e}"),
    })
}

fn parse_time_list(times: &[String], field: &str) -> Result<Vec<ClockTime>, AppError> {
    times.iter().map(|s| parse_time_field(s, field)).collect()
}

/// Build the domain schedule from the wire map.
///
/// Keys that are not weekday names are skipped rather than rejected;
/// they can never match "today" anyway.
fn build_weekly_schedule(
    schedule: &HashMap<String, Vec<SessionDto>>,
) -> Result<WeeklySchedule, AppError> {
    let mut days = HashMap::new();

    for (day_str, sessions) in schedule {
        let Ok(day) = Weekday::parse(day_str) else {
            tracing::debug!(day = %day_str, "ignoring unknown weekday key");
            continue;
        };

        let sessions = sessions
            .iter()
            .map(|s| {
                Ok(ClassSession::new(
                    parse_time_field(&s.start, "start")?,
                    parse_time_field(&s.end, "end")?,
                ))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        days.insert(day, sessions);
    }

    Ok(WeeklySchedule::new(days))
}

/// Application error type.
///
/// `Validation` surfaces its message to the caller as a 400. `Internal`
/// responds with a generic 500; the underlying detail is only logged.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation { message } => {
                tracing::debug!(%message, "request rejected");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                tracing::error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred while computing notifications.".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn default_bracket_times() {
        assert_eq!(DEFAULT_FIRST_START, time("09:00"));
        assert_eq!(DEFAULT_LAST_END, time("18:00"));
    }

    #[test]
    fn parse_time_list_reports_the_field() {
        let times = vec!["08:00".to_string(), "bad".to_string()];
        let err = parse_time_list(&times, "toSchool").unwrap_err();
        let AppError::Validation { message } = err else {
            panic!("expected validation error");
        };
        assert!(message.contains("toSchool"));
        assert!(message.contains("bad"));
    }

    #[test]
    fn internal_errors_respond_500() {
        let response = AppError::Internal {
            message: "exploded".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_respond_400() {
        let response = AppError::Validation {
            message: "bad input".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn panics_become_internal_errors() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new("boom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn weekly_schedule_skips_unknown_day_keys() {
        let mut schedule = HashMap::new();
        schedule.insert(
            "monday".to_string(),
            vec![SessionDto {
                start: "09:00".to_string(),
                end: "10:00".to_string(),
            }],
        );
        schedule.insert("someday".to_string(), vec![]);

        let week = build_weekly_schedule(&schedule).unwrap();
        assert_eq!(week.sessions_for(Weekday::Monday).len(), 1);
    }

    #[test]
    fn weekly_schedule_rejects_malformed_session_times() {
        let mut schedule = HashMap::new();
        schedule.insert(
            "monday".to_string(),
            vec![SessionDto {
                start: "9am".to_string(),
                end: "10:00".to_string(),
            }],
        );

        assert!(build_weekly_schedule(&schedule).is_err());
    }
}
