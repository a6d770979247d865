//! Plain-text rendering for the terminal.

use std::fmt::Write;

use super::{LookupStatus, LookupView, Renderer};

#[derive(Debug, Clone)]
pub struct TextRenderer {
    precision: usize,
}

impl TextRenderer {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Renderer for TextRenderer {
    fn render(&self, view: &LookupView) -> String {
        let mut out = String::new();
        let message = view.message.as_deref().unwrap_or_default();

        match view.status {
            LookupStatus::EmptyInput | LookupStatus::NotFound => {
                let _ = writeln!(out, "{}", message);
            }
            LookupStatus::ConfigError => {
                let _ = writeln!(out, "Falta tu API key");
                let _ = writeln!(out, "  {}", message);
            }
            LookupStatus::HttpError | LookupStatus::RequestError => {
                let _ = writeln!(out, "Error al buscar");
                let _ = writeln!(out, "  {}", message);
            }
            LookupStatus::Found => {
                let _ = writeln!(out, "Resultado más específico");
                if let Some(address) = &view.address {
                    let _ = writeln!(out, "  Dirección:   {}", address);
                }
                if let Some(coords) = &view.coordinates {
                    let _ = writeln!(out, "  Coordenadas: {}", coords.display(self.precision));
                }
                if let Some(zone) = &view.zone_label {
                    let _ = writeln!(out, "  Zona:        {}", zone);
                }
                if let Some(map) = &view.map {
                    let _ = writeln!(out, "  Mapa:        {}", map.link_url);
                }
                if !view.alternatives.is_empty() {
                    let _ = writeln!(out, "\n¿No es exacto? Prueba una sugerencia:");
                    for (idx, label) in view.alternatives.iter().enumerate() {
                        let _ = writeln!(out, "  [{}] {}", idx + 1, label);
                    }
                }
            }
        }

        out
    }
}
