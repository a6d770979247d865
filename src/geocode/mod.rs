//! OpenCage geocoding client.

mod client;
mod error;

pub use client::GeocodeClient;
pub use error::GeocodeError;
