// =====================================================================================
// SYMPTOM RECOMMENDATION SELECTOR
// =====================================================================================
//
// Idle -> (toggle) -> debounce -> Loading -> Ready | Empty | Failed
//
// A toggle inside the debounce window supersedes the pending one. Requests
// that already left are not cancelled; whichever resolves last wins.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use shared_config::AppConfig;
use shared_models::Locale;
use shared_utils::Translator;

use crate::models::{RecommendationCards, SelectorState};
use crate::services::catalog::CatalogService;
use crate::services::symptoms::SymptomSelection;

struct SelectorInner {
    selection: SymptomSelection,
    state: SelectorState,
}

#[derive(Clone)]
struct Shared {
    inner: Arc<Mutex<SelectorInner>>,
    catalog: CatalogService,
    translator: Arc<Translator>,
    cache: Cache<String, RecommendationCards>,
    generation: Arc<AtomicU64>,
    mounted: Arc<AtomicBool>,
    debounce: Duration,
}

pub struct RecommendationSelector {
    shared: Shared,
}

impl RecommendationSelector {
    pub fn new(config: &AppConfig, catalog: CatalogService, translator: Arc<Translator>) -> Self {
        Self {
            shared: Shared {
                inner: Arc::new(Mutex::new(SelectorInner {
                    selection: SymptomSelection::new(),
                    state: SelectorState::Idle,
                })),
                catalog,
                translator,
                cache: Cache::new(config.recommendation_cache_capacity),
                generation: Arc::new(AtomicU64::new(0)),
                mounted: Arc::new(AtomicBool::new(true)),
                debounce: Duration::from_millis(config.symptom_debounce_ms),
            },
        }
    }

    pub fn locale(&self) -> Locale {
        self.shared.catalog.locale()
    }

    pub async fn state(&self) -> SelectorState {
        self.shared.inner.lock().await.state.clone()
    }

    pub async fn selection(&self) -> SymptomSelection {
        self.shared.inner.lock().await.selection.clone()
    }

    /// Localized prompt for the idle state.
    pub fn prompt(&self) -> String {
        self.shared
            .translator
            .t(self.locale(), "recommendations.prompt", &[])
    }

    /// Toggles a symptom and schedules a debounced fetch.
    ///
    /// Returns the handle of the scheduled fetch, or `None` when nothing was
    /// scheduled (4th symptom, or the selection became empty).
    pub async fn toggle(&self, symptom: &str) -> Option<JoinHandle<()>> {
        let selection = {
            let mut inner = self.shared.inner.lock().await;
            if !inner.selection.toggle(symptom) {
                debug!("Symptom cap reached, ignoring '{}'", symptom);
                return None;
            }
            if inner.selection.is_empty() {
                inner.state = SelectorState::Idle;
                self.shared.generation.fetch_add(1, Ordering::SeqCst);
                return None;
            }
            inner.selection.clone()
        };

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = self.shared.clone();

        Some(tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            if shared.generation.load(Ordering::SeqCst) != generation {
                debug!("Symptom search for '{}' superseded", selection.cache_key());
                return;
            }
            shared.load(selection).await;
        }))
    }

    /// Re-issues the fetch for the current selection right away.
    pub async fn retry(&self) {
        let selection = self.selection().await;
        if selection.is_empty() {
            return;
        }
        self.shared.load(selection).await;
    }

    /// Later completions no longer touch state. In-flight requests still run.
    pub fn unmount(&self) {
        self.shared.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.load(Ordering::SeqCst)
    }
}

impl Shared {
    async fn apply(&self, state: SelectorState) {
        if !self.mounted.load(Ordering::SeqCst) {
            debug!("Selector unmounted, dropping state update");
            return;
        }
        self.inner.lock().await.state = state;
    }

    async fn load(&self, selection: SymptomSelection) {
        let key = selection.cache_key();

        // unfiltered `/checkups` would return the whole catalog
        let slugs = selection.slugs();
        if slugs.is_empty() {
            debug!("No known symptoms in '{}', nothing to recommend", key);
            self.apply(SelectorState::Empty).await;
            return;
        }

        if let Some(cards) = self.cache.get(&key).await {
            debug!("Recommendation cache hit for '{}'", key);
            self.apply(Self::state_for(cards)).await;
            return;
        }

        self.apply(SelectorState::Loading).await;

        match self.catalog.list_checkups(&slugs).await {
            Ok(checkups) => {
                let cards = RecommendationCards::aggregate(&checkups, &selection);
                info!("Built recommendations for '{}' from {} checkups", key, checkups.len());
                self.cache.insert(key, cards.clone()).await;
                self.apply(Self::state_for(cards)).await;
            }
            Err(e) => {
                error!("Failed to load recommendations for '{}': {}", key, e);
                let message = self
                    .translator
                    .t(self.catalog.locale(), "recommendations.error", &[]);
                self.apply(SelectorState::Failed(message)).await;
            }
        }
    }

    fn state_for(cards: RecommendationCards) -> SelectorState {
        if cards.is_empty() {
            SelectorState::Empty
        } else {
            SelectorState::Ready(cards)
        }
    }
}
