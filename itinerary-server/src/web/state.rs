//! Application state for the web layer.

use std::sync::Arc;

use crate::Resolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside itinerary resolver
    pub resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }
}
