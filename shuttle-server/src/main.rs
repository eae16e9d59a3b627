use std::net::SocketAddr;

use shuttle_server::kakao::{ConsoleMessenger, KakaoClient, KakaoConfig};
use shuttle_server::timetable::ScheduleStore;
use shuttle_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

/// Directory of frontend assets served at the root.
const STATIC_DIR: &str = "public";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Kakao credentials come from the environment; missing credentials
    // are not fatal, API sends just report as failed.
    let kakao_config = KakaoConfig::from_env();
    if !kakao_config.is_complete() {
        eprintln!(
            "Warning: KAKAO_REST_API_KEY / KAKAO_SENDER_KEY / KAKAO_TEMPLATE_CODE not fully set. \
             Kakao API sends will be reported as failed."
        );
    }
    let kakao = KakaoClient::new(kakao_config).expect("Failed to create Kakao client");

    // Timetable starts from the built-in default; replaced via the API,
    // reset on restart.
    let store = ScheduleStore::default();

    let state = AppState::new(store, ConsoleMessenger, kakao);
    let app = create_router(state, STATIC_DIR);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Shuttle notification service listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                       - Health check");
    println!("  GET  /api/shuttle-schedule         - Current shuttle timetable");
    println!("  PUT  /api/shuttle-schedule         - Replace timetable directions");
    println!("  POST /api/calculate-notifications  - Plan today's notifications");
    println!("  POST /api/check-notifications      - Proximity check against now");
    println!("  POST /api/test-kakao               - Exercise the dispatch channel");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
