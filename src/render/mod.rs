//! Lookup presentation.
//!
//! The lookup pipeline produces a [`LookupView`]; renderers turn it into
//! terminal text or an HTML page. JSON output is the serde form of the view.

mod html;
mod map;
mod text;
mod view;

pub use html::{escape_html, HtmlRenderer};
pub use map::MapEmbed;
pub use text::TextRenderer;
pub use view::{format_address, Coordinates, LookupStatus, LookupView, MAX_ALTERNATIVES};

/// Turns a view into displayable output
pub trait Renderer {
    fn render(&self, view: &LookupView) -> String;
}

/// Serializes the view as pretty JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &LookupView) -> String {
        serde_json::to_string_pretty(view).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
