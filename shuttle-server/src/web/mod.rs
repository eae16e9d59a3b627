//! Web layer for the shuttle notification server.
//!
//! Provides HTTP endpoints for reading and replacing the shuttle
//! timetable and for computing notifications on demand.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
