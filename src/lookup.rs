//! The lookup pipeline: normalize, geocode, pick the best candidate, classify, build the view.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::geocode::{GeocodeClient, GeocodeError};
use crate::models::GeocodeCandidate;
use crate::normalize::normalize_address;
use crate::render::LookupView;
use crate::scoring::{pick_best, RegionBounds};
use crate::zone::{ZoneClassifier, ZonePolicy};

/// One configured lookup pipeline. Every call resolves to a [`LookupView`].
pub struct ZoneLookup {
    client: GeocodeClient,
    classifier: Box<dyn ZoneClassifier>,
    bounds: RegionBounds,
    map_span: f64,
}

impl ZoneLookup {
    pub fn new(client: GeocodeClient, classifier: Box<dyn ZoneClassifier>) -> Self {
        Self {
            client,
            classifier,
            bounds: RegionBounds::california(),
            map_span: 0.01,
        }
    }

    /// Build from configuration. `policy` overrides the configured zone policy.
    pub fn from_config(config: &Config, policy: Option<ZonePolicy>) -> Result<Self, GeocodeError> {
        let client = GeocodeClient::new(&config.geocoder)?;
        let policy = policy.unwrap_or(config.zones.policy);
        info!("Using zone policy {}", policy.name());

        Ok(Self::new(client, config.zones.classifier(policy)).with_map_span(config.render.map_span))
    }

    pub fn with_map_span(mut self, span: f64) -> Self {
        self.map_span = span;
        self
    }

    /// Build the view for a set of provider results. No I/O.
    pub fn resolve(&self, query: &str, results: &[GeocodeCandidate]) -> LookupView {
        let Some(best) = pick_best(results, &self.bounds) else {
            info!("No usable result for {:?}", query);
            return LookupView::not_found(query);
        };

        let zone = self.classifier.classify(&best.components, best.lat());
        debug!(
            "Best match {:?} classified as {:?}",
            best.formatted.as_deref().unwrap_or("-"),
            zone
        );

        LookupView::found(query, best, zone, results, self.map_span)
    }

    /// Run the whole pipeline for raw user input.
    pub async fn run(&self, raw: &str) -> LookupView {
        let query = normalize_address(raw);
        if query.is_empty() {
            return LookupView::empty_input();
        }

        info!("Looking up {:?}", query);
        match self.client.search(&query).await {
            Ok(results) => self.resolve(&query, &results),
            Err(err) => {
                warn!("Lookup for {:?} failed: {}", query, err);
                LookupView::from_error(&query, &err)
            }
        }
    }
}

/// A finished lookup tagged with the submission it belongs to
#[derive(Debug)]
pub struct SessionView {
    pub generation: u64,
    pub view: LookupView,
}

/// Runs lookups for an interactive front end, one at a time.
///
/// Submitting a new search aborts the one still in flight, so only the
/// latest submission produces a view.
pub struct LookupSession {
    lookup: Arc<ZoneLookup>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SessionView>,
}

impl LookupSession {
    /// Create a session and the receiver its finished views are delivered on.
    pub fn new(lookup: Arc<ZoneLookup>) -> (Self, mpsc::UnboundedReceiver<SessionView>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            lookup,
            generation: 0,
            pending: None,
            tx,
        };
        (session, rx)
    }

    /// Start a lookup, superseding any pending one. Returns its generation.
    pub fn submit(&mut self, raw: String) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let lookup = self.lookup.clone();
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            let view = lookup.run(&raw).await;
            let _ = tx.send(SessionView { generation, view });
        }));

        generation
    }

    /// Abort the pending lookup, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                info!("Superseding pending lookup #{}", self.generation);
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Whether a delivered view belongs to the latest submission.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl Drop for LookupSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
