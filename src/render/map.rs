//! OpenStreetMap embed URLs centered on a coordinate.

use serde::Serialize;
use url::Url;

const EMBED_BASE: &str = "https://www.openstreetmap.org/export/embed.html";
const VIEW_BASE: &str = "https://www.openstreetmap.org/";
const VIEW_ZOOM: u8 = 18;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEmbed {
    /// iframe source
    pub embed_url: String,
    /// Full map page
    pub link_url: String,
}

impl MapEmbed {
    /// `span` is the half-size of the bounding box in degrees.
    pub fn new(lat: f64, lng: f64, span: f64) -> Self {
        let bbox = format!(
            "{},{},{},{}",
            lng - span,
            lat - span,
            lng + span,
            lat + span
        );
        let marker = format!("{},{}", lat, lng);

        let embed_url = Url::parse_with_params(
            EMBED_BASE,
            &[
                ("bbox", bbox.as_str()),
                ("layer", "mapnik"),
                ("marker", marker.as_str()),
            ],
        )
        .map(String::from)
        .unwrap_or_default();

        let mut link = Url::parse_with_params(
            VIEW_BASE,
            &[("mlat", lat.to_string()), ("mlon", lng.to_string())],
        )
        .map(String::from)
        .unwrap_or_default();
        link.push_str(&format!("#map={}/{}/{}", VIEW_ZOOM, lat, lng));

        Self {
            embed_url,
            link_url: link,
        }
    }
}
