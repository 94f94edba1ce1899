//! The navigation state synchronizer
//!
//! A finite-state orchestrator driven by a message channel of merged
//! parameter events. The first event is processed immediately to avoid a
//! blank initial render; every later burst of events is coalesced over a
//! fixed debounce window so that, e.g., a tab switch plus a filter reset
//! arriving in the same tick produce exactly one downstream transition.
//!
//! Fetches run as spawned tasks and report back through an outcome channel.
//! Every outgoing request carries the generation of the transition that
//! produced it; a response stamped with an older generation is discarded,
//! so a slow earlier request can never overwrite a newer request's results.

use crate::config::EngineConfig;
use crate::models::{FilterState, NavigationIntent, NavigationState, StateDelta, Tab};
use crate::pagination::PageWindow;
use crate::query::payload::{aggregation_payload, result_payload};
use crate::query::sort::resolve_sort;
use crate::state::PageStore;
use crate::sync::events::{FetchKind, FetchOutcome, ParamEvent, SyncEffect, SyncHandle};
use crate::sync::title::{page_title, short_heading};
use crate::transport::{SearchResponse, SearchTransport};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const CHANNEL_CAPACITY: usize = 32;

/// Lifecycle of the synchronizer; there is no terminal state, it lives for
/// the embedding component's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No parameter event seen yet
    Idle,
    /// Processing the first event
    Initializing,
    /// Steady state; later events are debounced
    Active,
}

/// Decision table for facet refetches.
///
/// Facet counts depend on the tab scope and the search term but not on the
/// user's own filter selections, so a filter-only change never refetches
/// them.
pub fn should_refetch_facets(delta: &StateDelta, is_first: bool) -> bool {
    is_first || delta.search_term_changed || delta.tab_changed
}

/// Merges parameter streams into coherent state transitions and drives the
/// downstream fetches
pub struct NavigationStateSynchronizer {
    config: EngineConfig,
    transport: Arc<dyn SearchTransport>,
    page_store: Arc<dyn PageStore>,

    phase: SyncPhase,
    previous: Option<NavigationState>,
    filters_toggle: bool,
    generation: u64,
    redirect_in_progress: bool,

    /// Last successfully fetched page of hits; retained across failed
    /// fetches and reused after redirects
    results: Option<SearchResponse>,
    facets: Option<SearchResponse>,
    known_counts: HashMap<Tab, u64>,
    error_messages: Vec<String>,

    params_rx: mpsc::Receiver<ParamEvent>,
    render_ack_rx: mpsc::Receiver<()>,
    effects_tx: mpsc::Sender<SyncEffect>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    outcome_rx: mpsc::Receiver<FetchOutcome>,
}

impl NavigationStateSynchronizer {
    /// Create a synchronizer and the channel handle for its collaborators
    pub fn new(
        config: EngineConfig,
        transport: Arc<dyn SearchTransport>,
        page_store: Arc<dyn PageStore>,
    ) -> (Self, SyncHandle) {
        let (params_tx, params_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (render_ack_tx, render_ack_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (effects_tx, effects_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (outcome_tx, outcome_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let synchronizer = Self {
            config,
            transport,
            page_store,
            phase: SyncPhase::Idle,
            previous: None,
            filters_toggle: false,
            generation: 0,
            redirect_in_progress: false,
            results: None,
            facets: None,
            known_counts: HashMap::new(),
            error_messages: Vec::new(),
            params_rx,
            render_ack_rx,
            effects_tx,
            outcome_tx,
            outcome_rx,
        };

        let handle = SyncHandle {
            params: params_tx,
            render_ack: render_ack_tx,
            effects: effects_rx,
        };

        (synchronizer, handle)
    }

    /// Seed previously computed results, e.g. data fetched by the caller
    /// before a redirect
    pub fn with_seed_results(mut self, response: SearchResponse) -> Self {
        self.results = Some(response);
        self
    }

    /// Run until the parameter channel closes
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                maybe_event = self.params_rx.recv() => {
                    match maybe_event {
                        None => break,
                        Some(event) => {
                            let event = if self.phase == SyncPhase::Idle {
                                // First event is delivered immediately to
                                // avoid a blank initial render
                                event
                            } else {
                                self.coalesce(event).await
                            };
                            self.transition(event).await;
                        }
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.apply_outcome(outcome).await;
                }
            }
        }
        tracing::debug!("Parameter channel closed, synchronizer stopping");
    }

    /// Collect trailing events within the debounce window; the last one wins
    async fn coalesce(&mut self, mut latest: ParamEvent) -> ParamEvent {
        let window = Duration::from_millis(self.config.debounce_window_ms);
        while let Ok(Some(next)) = timeout(window, self.params_rx.recv()).await {
            latest = next;
        }
        latest
    }

    async fn transition(&mut self, event: ParamEvent) {
        if self.phase == SyncPhase::Idle {
            self.phase = SyncPhase::Initializing;
            tracing::debug!("First parameter event received");
        }

        let raw_tab = event.path.tab.clone().unwrap_or_default();
        let Some(tab) = Tab::from_route(&raw_tab) else {
            tracing::warn!(tab = %raw_tab, "Unknown tab in URL, redirecting to default");
            self.redirect_in_progress = true;
            self.emit(SyncEffect::Redirect {
                intent: NavigationIntent::RedirectToTab { tab: Tab::DEFAULT },
            })
            .await;
            return;
        };

        let state = NavigationState::derive(tab, &event.path, &event.query);
        let is_first = self.previous.is_none();
        let delta = state.delta_from(self.previous.as_ref());

        tracing::debug!(
            tab = %tab,
            page = state.page,
            tab_changed = delta.tab_changed,
            search_term_changed = delta.search_term_changed,
            "Applying navigation transition"
        );

        if delta.tab_changed {
            self.emit(SyncEffect::TabChanged { tab }).await;
            // Recompute the title against the counts we already know; the
            // fetch below refreshes it once new data arrives
            if let Some(count) = self.known_counts.get(&tab).copied() {
                self.emit_title(tab, count).await;
            }
        }

        if delta.search_term_changed {
            self.emit(SyncEffect::SearchTermChanged {
                term: state.search_term.clone(),
            })
            .await;
        }

        self.filters_toggle = !self.filters_toggle;
        self.emit(SyncEffect::StateApplied {
            state: state.clone(),
            filters_toggle: self.filters_toggle,
        })
        .await;

        if delta.page_changed {
            if let Err(e) = self.page_store.save_page(state.page).await {
                tracing::warn!(error = %e, "Failed to persist page number");
            }
        }

        self.generation += 1;

        if self.redirect_in_progress && self.results.is_some() {
            // Reuse the data computed before the redirect instead of
            // refetching, once the list collaborator has rendered
            self.redirect_in_progress = false;
            self.await_render_ack().await;
            let total = self.results.as_ref().map(SearchResponse::total).unwrap_or(0);
            self.known_counts.insert(tab, total);
            self.emit_title(tab, total).await;
            self.emit(SyncEffect::ResultsUpdated { tab, total }).await;
        } else {
            self.redirect_in_progress = false;
            let window = PageWindow::from_page(state.page, self.config.page_size);
            let sort = resolve_sort(tab, state.sort.as_deref());
            let body = result_payload(tab, &state.search_term, &state.filters, &window, &sort);
            self.dispatch_fetch(FetchKind::Results, tab, body);
        }

        if should_refetch_facets(&delta, is_first) {
            // Facets are scoped by tab and search term only, never by the
            // user's own filter selections
            let body = aggregation_payload(tab, &state.search_term, &FilterState::new());
            self.dispatch_fetch(FetchKind::Facets, tab, body);
        }

        self.previous = Some(state);
        if self.phase == SyncPhase::Initializing {
            self.phase = SyncPhase::Active;
        }
    }

    fn dispatch_fetch(&self, kind: FetchKind, tab: Tab, body: Value) {
        let generation = self.generation;
        let transport = Arc::clone(&self.transport);
        let outcome_tx = self.outcome_tx.clone();
        let index = tab.index_name().to_string();

        tokio::spawn(async move {
            let result = transport.search(&index, &body).await;
            let _ = outcome_tx
                .send(FetchOutcome {
                    generation,
                    kind,
                    tab,
                    result,
                })
                .await;
        });
    }

    async fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation < self.generation {
            tracing::debug!(
                generation = outcome.generation,
                current = self.generation,
                "Discarding stale response"
            );
            return;
        }

        match outcome.result {
            Ok(response) => match outcome.kind {
                FetchKind::Results => {
                    let total = response.total();
                    self.known_counts.insert(outcome.tab, total);
                    self.results = Some(response);
                    self.emit_title(outcome.tab, total).await;
                    self.emit(SyncEffect::ResultsUpdated {
                        tab: outcome.tab,
                        total,
                    })
                    .await;
                }
                FetchKind::Facets => {
                    self.facets = Some(response);
                    self.emit(SyncEffect::FacetsUpdated { tab: outcome.tab }).await;
                }
            },
            Err(e) => {
                // Stale-but-available: the message is surfaced, previously
                // rendered data stays in place, no retry
                let message = e.to_string();
                tracing::error!(error = %message, "Search fetch failed");
                self.error_messages.push(message.clone());
                self.emit(SyncEffect::FetchFailed { message }).await;
            }
        }
    }

    async fn await_render_ack(&mut self) {
        let wait = Duration::from_millis(self.config.render_ack_timeout_ms);
        match timeout(wait, self.render_ack_rx.recv()).await {
            Ok(Some(())) => tracing::debug!("Render acknowledged"),
            _ => {
                tracing::warn!("Render acknowledgement timed out, proceeding with cached data")
            }
        }
    }

    async fn emit_title(&self, tab: Tab, count: u64) {
        let full = page_title(tab.label(), count, &self.config.product_name);
        let short = short_heading(&full);
        self.emit(SyncEffect::TitleUpdated { full, short }).await;
    }

    async fn emit(&self, effect: SyncEffect) {
        if self.effects_tx.send(effect).await.is_err() {
            tracing::debug!("Effect receiver dropped");
        }
    }
}
