//! HTTP surface of the itinerary cache.

mod routes;
mod state;

pub use routes::{AppError, ErrorResponse, create_router};
pub use state::AppState;
