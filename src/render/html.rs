//! HTML page rendering for the lookup server.

use std::fmt::Write;
use url::form_urlencoded;

use super::{LookupStatus, LookupView, Renderer};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>California Zone Checker</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
form { display: flex; gap: 8px; }
input[type=text] { flex: 1; padding: 8px; }
.card { border: 1px solid #ddd; border-radius: 8px; margin-top: 12px; }
.card.error { border-color: #d33; }
.card-header { padding: 8px 12px; font-weight: 600; border-bottom: 1px solid #eee; }
.card-body { padding: 8px 12px; }
.alts { display: grid; gap: 6px; list-style: none; padding: 0; margin: 0; }
</style>
</head>
<body>
<h1>California Zone Checker</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Link that re-runs the lookup for `query`
fn lookup_href(query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("/?q={}", encoded)
}

#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    precision: usize,
}

impl HtmlRenderer {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Search form. The submit button disables itself so a pending lookup is not re-submitted.
    fn form(&self, out: &mut String, value: &str) {
        let _ = write!(
            out,
            r#"<form method="get" action="/" onsubmit="this.querySelector('button').disabled = true">
<input type="text" id="direccion" name="q" value="{}" placeholder="Dirección en California" autofocus>
<button type="submit" id="buscar">Buscar</button>
</form>
"#,
            escape_html(value)
        );
    }

    fn card(out: &mut String, class: &str, header: Option<&str>, body: &str) {
        let _ = writeln!(out, r#"<div class="{}">"#, class);
        if let Some(header) = header {
            let _ = writeln!(out, r#"<div class="card-header">{}</div>"#, escape_html(header));
        }
        let _ = writeln!(out, r#"<div class="card-body">{}</div>"#, body);
        let _ = writeln!(out, "</div>");
    }

    fn result(&self, out: &mut String, view: &LookupView) {
        let mut body = String::new();
        if let Some(address) = &view.address {
            let _ = writeln!(body, "<p><b>Dirección:</b> {}</p>", escape_html(address));
        }
        if let Some(coords) = &view.coordinates {
            let _ = writeln!(
                body,
                "<p><b>Coordenadas:</b> {}</p>",
                coords.display(self.precision)
            );
        }
        if let Some(zone) = &view.zone_label {
            let _ = writeln!(body, "<p><b>Zona:</b> {}</p>", escape_html(zone));
        }
        Self::card(out, "card", Some("Resultado más específico"), &body);

        if let Some(map) = &view.map {
            let _ = write!(
                out,
                r#"<div id="mapa">
<iframe width="100%" height="450" frameborder="0" scrolling="no" src="{}"></iframe>
<small><a target="_blank" rel="noopener" href="{}">Ver en OpenStreetMap</a></small>
</div>
"#,
                escape_html(&map.embed_url),
                escape_html(&map.link_url)
            );
        }

        if !view.alternatives.is_empty() {
            let mut items = String::new();
            for label in &view.alternatives {
                let _ = writeln!(
                    items,
                    r#"<li><a class="alt-btn" href="{}">&#10145; {}</a></li>"#,
                    escape_html(&lookup_href(label)),
                    escape_html(label)
                );
            }
            Self::card(
                out,
                "card",
                Some("¿No es exacto? Prueba una sugerencia:"),
                &format!(r#"<ul class="alts">{}</ul>"#, items),
            );
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, view: &LookupView) -> String {
        let mut out = String::from(PAGE_HEAD);
        self.form(&mut out, &view.query);

        let message = escape_html(view.message.as_deref().unwrap_or_default());
        let _ = writeln!(out, r#"<div id="zona">"#);
        match view.status {
            LookupStatus::EmptyInput if message.is_empty() => {}
            LookupStatus::EmptyInput | LookupStatus::NotFound => {
                Self::card(&mut out, "card", None, &message)
            }
            LookupStatus::ConfigError => {
                Self::card(&mut out, "card error", Some("Falta tu API key"), &message)
            }
            LookupStatus::HttpError | LookupStatus::RequestError => Self::card(
                &mut out,
                "card error",
                Some("Error al buscar"),
                &format!("<code>{}</code>", message),
            ),
            LookupStatus::Found => self.result(&mut out, view),
        }
        let _ = writeln!(out, "</div>");

        out.push_str(PAGE_TAIL);
        out
    }
}
