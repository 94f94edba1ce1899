//! Integration tests for the navigation state synchronizer: debounce
//! coalescing, redirect handling, fetch decisions and failure capture

use async_trait::async_trait;
use parking_lot::Mutex;
use research_portal_search::config::EngineConfig;
use research_portal_search::error::{AppError, Result};
use research_portal_search::models::{FilterDimension, NavigationIntent, PathParams, QueryParams, Tab};
use research_portal_search::state::InMemoryPageStore;
use research_portal_search::sync::{NavigationStateSynchronizer, ParamEvent, SyncEffect};
use research_portal_search::transport::{SearchResponse, SearchTransport};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Transport double that records every request body and answers with a
/// canned response (or a failure)
struct RecordingTransport {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    total: u64,
    fail: bool,
}

impl RecordingTransport {
    fn new(total: u64) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            total,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            total: 0,
            fail: true,
        }
    }

    fn requests(&self) -> Arc<Mutex<Vec<(String, Value)>>> {
        Arc::clone(&self.requests)
    }

    fn canned_response(total: u64) -> SearchResponse {
        serde_json::from_value(json!({
            "hits": {
                "total": total,
                "hits": [{ "_source": { "publicationName": "A study" } }]
            },
            "aggregations": {
                "year": { "buckets": [{ "key": 2019, "doc_count": 5 }] }
            }
        }))
        .unwrap()
    }
}

#[async_trait]
impl SearchTransport for RecordingTransport {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        self.requests.lock().push((index.to_string(), body.clone()));
        if self.fail {
            return Err(AppError::Transport("search engine unavailable".to_string()));
        }
        Ok(Self::canned_response(self.total))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn test_config() -> EngineConfig {
    EngineConfig {
        debounce_window_ms: 20,
        render_ack_timeout_ms: 200,
        ..EngineConfig::default()
    }
}

fn event(tab: &str, input: Option<&str>, pairs: &[(&str, &str)]) -> ParamEvent {
    ParamEvent {
        path: PathParams {
            tab: Some(tab.to_string()),
            input: input.map(str::to_string),
            page: None,
        },
        query: QueryParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        ),
    }
}

/// Collect effects until the channel stays quiet
async fn drain(effects: &mut mpsc::Receiver<SyncEffect>, quiet_ms: u64) -> Vec<SyncEffect> {
    let mut collected = Vec::new();
    while let Ok(Some(effect)) = timeout(Duration::from_millis(quiet_ms), effects.recv()).await {
        collected.push(effect);
    }
    collected
}

fn state_applied(effects: &[SyncEffect]) -> Vec<&SyncEffect> {
    effects
        .iter()
        .filter(|e| matches!(e, SyncEffect::StateApplied { .. }))
        .collect()
}

fn result_requests(requests: &[(String, Value)]) -> usize {
    requests.iter().filter(|(_, body)| body["size"] == json!(10)).count()
}

fn facet_requests(requests: &[(String, Value)]) -> usize {
    requests.iter().filter(|(_, body)| body["size"] == json!(0)).count()
}

#[tokio::test]
async fn first_event_fetches_immediately() {
    init_tracing();
    let transport = RecordingTransport::new(1234);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", Some("cancer"), &[]))
        .await
        .unwrap();

    let effects = drain(&mut handle.effects, 200).await;

    assert_eq!(state_applied(&effects).len(), 1);
    assert!(effects
        .iter()
        .any(|e| matches!(e, SyncEffect::ResultsUpdated { total: 1234, .. })));
    assert!(effects.iter().any(|e| matches!(
        e,
        SyncEffect::TitleUpdated { full, .. }
        if full == "Publications - (1,234 hits) - Search - Research Hub"
    )));

    let recorded = requests.lock();
    assert_eq!(result_requests(&recorded), 1);
    assert_eq!(facet_requests(&recorded), 1);

    // The result request matches the no-filter scenario: index scope plus
    // one fuzzy match, page one
    let (index, body) = recorded
        .iter()
        .find(|(_, body)| body["size"] == json!(10))
        .unwrap();
    assert_eq!(index, "publication");
    assert_eq!(body["from"], json!(0));
    let must = body["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 2);
}

#[tokio::test]
async fn burst_of_events_coalesces_to_last() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;

    // Three parameter changes inside the debounce window
    for year in ["2018", "2019", "2020"] {
        handle
            .params
            .send(event("publications", None, &[("year", year)]))
            .await
            .unwrap();
    }

    let effects = drain(&mut handle.effects, 200).await;
    let applied = state_applied(&effects);
    assert_eq!(applied.len(), 1, "burst must coalesce into one transition");

    match applied[0] {
        SyncEffect::StateApplied { state, .. } => {
            assert_eq!(state.filters.get(FilterDimension::Year), &["2020".to_string()]);
        }
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn unknown_tab_redirects_without_fetching() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("trending", None, &[]))
        .await
        .unwrap();

    let effects = drain(&mut handle.effects, 200).await;

    let redirects: Vec<_> = effects
        .iter()
        .filter(|e| {
            matches!(
                e,
                SyncEffect::Redirect {
                    intent: NavigationIntent::RedirectToTab { tab: Tab::Publications }
                }
            )
        })
        .collect();
    assert_eq!(redirects.len(), 1, "exactly one redirect");
    assert!(state_applied(&effects).is_empty());
    assert!(requests.lock().is_empty(), "no fetch for an unknown tab");
}

#[tokio::test]
async fn filter_only_changes_do_not_refetch_facets() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", Some("cancer"), &[]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;
    assert_eq!(facet_requests(&requests.lock()), 1);

    // Filter change only: results refetch, facets do not
    handle
        .params
        .send(event("publications", Some("cancer"), &[("juFo", "top")]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;
    assert_eq!(facet_requests(&requests.lock()), 1);
    assert_eq!(result_requests(&requests.lock()), 2);

    // Search term change: facets refetch
    handle
        .params
        .send(event("publications", Some("aerosol"), &[("juFo", "top")]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;
    assert_eq!(facet_requests(&requests.lock()), 2);
}

#[tokio::test]
async fn facet_requests_are_scoped_by_term_not_filters() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", Some("cancer"), &[("year", "2019")]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;

    let recorded = requests.lock();
    let (_, facet_body) = recorded
        .iter()
        .find(|(_, body)| body["size"] == json!(0))
        .expect("facet request");

    // The facet query carries the search term but none of the user's own
    // filter selections
    let must = facet_body["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 2);
    assert_eq!(must[1]["multi_match"]["query"], json!("cancer"));
}

#[tokio::test]
async fn fetch_failure_is_captured_and_stale_data_retained() {
    init_tracing();
    let transport = RecordingTransport::failing();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();

    let effects = drain(&mut handle.effects, 200).await;

    assert!(effects
        .iter()
        .any(|e| matches!(e, SyncEffect::FetchFailed { message } if message.contains("unavailable"))));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, SyncEffect::ResultsUpdated { .. })));
    // The transition itself still applied; only the data is missing
    assert_eq!(state_applied(&effects).len(), 1);
}

#[tokio::test]
async fn redirect_reuses_seeded_results_after_render_ack() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    let sync = sync.with_seed_results(RecordingTransport::canned_response(77));
    tokio::spawn(sync.run());

    // Ack queued ahead of time; the synchronizer consumes it when reusing
    // the seeded data
    handle.render_ack.send(()).await.unwrap();

    handle
        .params
        .send(event("trending", None, &[]))
        .await
        .unwrap();
    let effects = drain(&mut handle.effects, 200).await;
    assert!(effects
        .iter()
        .any(|e| matches!(e, SyncEffect::Redirect { .. })));

    // The post-redirect navigation arrives with a valid tab
    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();
    let effects = drain(&mut handle.effects, 300).await;

    assert!(effects
        .iter()
        .any(|e| matches!(e, SyncEffect::ResultsUpdated { total: 77, .. })));
    assert!(effects.iter().any(|e| matches!(
        e,
        SyncEffect::TitleUpdated { short, .. } if short == "Publications - (77 hits)"
    )));

    // No page of hits was refetched, only facet counts
    let recorded = requests.lock();
    assert_eq!(result_requests(&recorded), 0);
    assert_eq!(facet_requests(&recorded), 1);
}

#[tokio::test]
async fn filters_toggle_flips_on_every_transition() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();
    let first = drain(&mut handle.effects, 200).await;

    // An identical navigation still flips the toggle, so flip-detecting
    // consumers refresh exactly once per transition
    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();
    let second = drain(&mut handle.effects, 200).await;

    let toggle = |effects: &[SyncEffect]| {
        effects.iter().find_map(|e| match e {
            SyncEffect::StateApplied { filters_toggle, .. } => Some(*filters_toggle),
            _ => None,
        })
    };
    let a = toggle(&first).unwrap();
    let b = toggle(&second).unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn tab_switch_emits_tab_changed_and_refetches_facets() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let requests = transport.requests();
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        Arc::new(InMemoryPageStore::new()),
    );
    tokio::spawn(sync.run());

    handle
        .params
        .send(event("publications", None, &[]))
        .await
        .unwrap();
    drain(&mut handle.effects, 200).await;

    handle
        .params
        .send(event("fundings", None, &[]))
        .await
        .unwrap();
    let effects = drain(&mut handle.effects, 200).await;

    assert!(effects
        .iter()
        .any(|e| matches!(e, SyncEffect::TabChanged { tab: Tab::Fundings })));
    assert_eq!(facet_requests(&requests.lock()), 2);

    // The funding facet request carries the funding tab's extras
    let recorded = requests.lock();
    let (index, body) = recorded
        .iter()
        .filter(|(_, body)| body["size"] == json!(0))
        .last()
        .unwrap();
    assert_eq!(index, "funding");
    assert!(body["aggs"].get("scheme").is_some());
}

#[tokio::test]
async fn page_from_url_is_persisted() {
    init_tracing();
    let transport = RecordingTransport::new(10);
    let store = Arc::new(InMemoryPageStore::new());
    let (sync, mut handle) = NavigationStateSynchronizer::new(
        test_config(),
        Arc::new(transport),
        store.clone(),
    );
    tokio::spawn(sync.run());

    let mut paged = event("publications", None, &[]);
    paged.path.page = Some("4".to_string());
    handle.params.send(paged).await.unwrap();
    drain(&mut handle.effects, 200).await;

    use research_portal_search::state::PageStore;
    assert_eq!(store.load_page().await.unwrap(), Some(4));
}
