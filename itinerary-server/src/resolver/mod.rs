//! Itinerary resolution: store first, feed provider on a miss.

mod resolve;

pub use resolve::{ItineraryResolver, Resolution};
