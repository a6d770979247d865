//! cazone - California zone lookup
//!
//! Geocodes a free-text address through OpenCage, picks the most specific
//! candidate and classifies it into a California zone. Shared by the `cazone`
//! CLI and the `cazone-server` binary.

pub mod config;
pub mod geocode;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod render;
pub mod scoring;
pub mod zone;

pub use config::Config;
pub use geocode::{GeocodeClient, GeocodeError};
pub use lookup::{LookupSession, ZoneLookup};
pub use models::{Classification, GeocodeCandidate, Zone, ZoneSource};
pub use normalize::normalize_address;
pub use render::{LookupStatus, LookupView};
pub use zone::{ZoneClassifier, ZonePolicy};
