//! Core data models for the zone lookup.

pub mod candidate;
pub mod zone;

pub use candidate::{Components, GeocodeCandidate, GeocodeResponse, Geometry, ProviderStatus};
pub use zone::{Classification, Zone, ZoneSource};
