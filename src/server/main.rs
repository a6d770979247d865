//! Lookup server.
//!
//! Serves the zone checker page (HTML with an embedded map) and a JSON API
//! over the same lookup pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cazone::config::DEFAULT_LOG_FILTER;
use cazone::render::{HtmlRenderer, Renderer};
use cazone::zone::overlapping_cities;
use cazone::{Config, LookupStatus, LookupView, ZoneLookup, ZonePolicy};

#[derive(Parser, Debug)]
#[command(name = "cazone-server")]
#[command(about = "California zone lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    default_policy: ZonePolicy,
    latitude_band: ZoneLookup,
    city_list: ZoneLookup,
    html: HtmlRenderer,
    has_api_key: bool,
}

impl AppState {
    fn lookup(&self, policy: ZonePolicy) -> &ZoneLookup {
        match policy {
            ZonePolicy::LatitudeBand => &self.latitude_band,
            ZonePolicy::CityList => &self.city_list,
        }
    }

    /// Requested policy, or the configured default
    fn policy(&self, requested: Option<&str>) -> Result<ZonePolicy, (StatusCode, String)> {
        match requested {
            Some(p) if !p.trim().is_empty() => p
                .parse()
                .map_err(|e: String| (StatusCode::BAD_REQUEST, e)),
            _ => Ok(self.default_policy),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("cazone lookup server");
    let config = Config::load(args.config.as_deref())?;

    let latitude_band = ZoneLookup::from_config(&config, Some(ZonePolicy::LatitudeBand))
        .context("Failed to create geocoding client")?;
    let city_list = ZoneLookup::from_config(&config, Some(ZonePolicy::CityList))
        .context("Failed to create geocoding client")?;

    for (city, zones) in overlapping_cities() {
        warn!("City {:?} is listed under several zones: {:?}", city, zones);
    }

    let has_api_key = config.geocoder.api_key().is_some();
    if !has_api_key {
        warn!("No OpenCage API key configured; lookups will report a configuration error");
    }

    let state = Arc::new(AppState {
        default_policy: config.zones.policy,
        latitude_band,
        city_list,
        html: HtmlRenderer::new(config.render.coordinate_precision),
        has_api_key,
    });

    // Build router
    let app = Router::new()
        .route("/", get(page_handler))
        .route("/health", get(health_handler))
        .route("/v1/lookup", get(lookup_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct LookupQueryParams {
    /// Free-text address
    q: Option<String>,
    /// Zone policy: latitude_band or city_list
    policy: Option<String>,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.has_api_key { "ok" } else { "degraded" },
        api_key: state.has_api_key,
        policy: state.default_policy.name(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    api_key: bool,
    policy: &'static str,
}

/// Zone checker page; `?q=` runs a lookup
async fn page_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQueryParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let policy = state.policy(params.policy.as_deref())?;

    let view = match params.q {
        Some(q) => state.lookup(policy).run(&q).await,
        None => {
            // First visit: just the form
            let mut view = LookupView::empty_input();
            view.message = None;
            view
        }
    };

    Ok(Html(state.html.render(&view)))
}

/// JSON lookup
async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQueryParams>,
) -> Result<(StatusCode, Json<LookupView>), (StatusCode, String)> {
    let policy = state.policy(params.policy.as_deref())?;
    let view = state
        .lookup(policy)
        .run(params.q.as_deref().unwrap_or_default())
        .await;

    let status = match view.status {
        LookupStatus::Found | LookupStatus::NotFound => StatusCode::OK,
        LookupStatus::EmptyInput => StatusCode::BAD_REQUEST,
        LookupStatus::ConfigError => StatusCode::SERVICE_UNAVAILABLE,
        LookupStatus::HttpError | LookupStatus::RequestError => StatusCode::BAD_GATEWAY,
    };

    Ok((status, Json(view)))
}
