//! Web layer for the place core.
//!
//! Provides HTTP endpoints for parsing opening hours and reconciling place
//! records the caller has already fetched.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
