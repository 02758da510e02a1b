//! Domain types for the itinerary cache.
//!
//! An [`Itinerary`] is the path and metadata of one transit line; the
//! [`ConsortiumMap`] groups lines by operator for keyword tagging.

mod consortium;
mod itinerary;

pub use consortium::{Consortium, ConsortiumMap};
pub use itinerary::{Itinerary, ItinerarySpot, UNKNOWN_SENSE};
