//! The query controller: owns the lifecycle of the one "current" query.
//!
//! Keystrokes come in through [`QueryController::on_input`]; the controller
//! debounces them (trailing edge only), serves repeats from a TTL cache,
//! keeps at most one request in flight by aborting the previous one before
//! issuing the next, and publishes the resulting view through a watch
//! channel. A superseded request can never touch the view or the cache: its
//! task is aborted, and the apply path re-checks the generation counter in
//! case the task was already past its last await when the abort landed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::cache::SuggestionCache;
use crate::client::render::{build_list, RenderedList};
use crate::client::transport::SuggestTransport;
use crate::config::Config;

/// What the suggestion widget should currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionView {
    /// No list on screen.
    #[default]
    Hidden,
    /// The merged flat list for `query`.
    Suggestions {
        query: String,
        list: RenderedList,
    },
    /// Transient error notice shown in place of suggestions.
    Notice(String),
}

pub const ERROR_NOTICE: &str = "Connection error. Please try again.";

/// Tuning knobs for one controller instance.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub min_chars: usize,
    /// Per-tier cap passed to the transport.
    pub limit: usize,
    pub debounce: Duration,
    pub cache_ttl: Duration,
    /// How long the error notice stays up before auto-dismissing.
    pub notice_ttl: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            min_chars: 2,
            limit: 5,
            debounce: Duration::from_millis(300),
            cache_ttl: Duration::from_secs(300),
            notice_ttl: Duration::from_secs(3),
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            min_chars: config.search.min_chars,
            limit: config.search.suggest_limit,
            debounce: config.client.debounce(),
            cache_ttl: config.client.cache_ttl(),
            notice_ttl: config.client.notice(),
        }
    }
}

struct Inner {
    cache: SuggestionCache,
    /// Generation of the most recently scheduled dispatch. Results only
    /// apply while their generation is still current.
    generation: u64,
    /// Debounce-plus-fetch task for the current generation.
    pending: Option<JoinHandle<()>>,
}

/// One controller per search-input widget. Instances share no state, so
/// multiple widgets on one page cannot interfere with each other.
pub struct QueryController {
    transport: Arc<dyn SuggestTransport>,
    settings: ControllerSettings,
    inner: Arc<Mutex<Inner>>,
    view: Arc<watch::Sender<SuggestionView>>,
}

impl QueryController {
    /// Must be constructed (and fed input) inside a tokio runtime: dispatch
    /// work runs on spawned tasks.
    pub fn new(transport: Arc<dyn SuggestTransport>, settings: ControllerSettings) -> Self {
        let (view, _) = watch::channel(SuggestionView::Hidden);
        let cache = SuggestionCache::new(settings.cache_ttl);
        Self {
            transport,
            settings,
            inner: Arc::new(Mutex::new(Inner {
                cache,
                generation: 0,
                pending: None,
            })),
            view: Arc::new(view),
        }
    }

    /// Observe view changes. Frontends re-render (and reset their cursor)
    /// on every change.
    pub fn subscribe(&self) -> watch::Receiver<SuggestionView> {
        self.view.subscribe()
    }

    /// Current view, for pull-style consumers and tests.
    pub fn view(&self) -> SuggestionView {
        self.view.borrow().clone()
    }

    /// Feed one keystroke's worth of input.
    ///
    /// Below the minimum length this cancels any scheduled or in-flight work
    /// and hides the list. Otherwise it schedules a trailing-edge debounced
    /// dispatch, superseding whatever was scheduled before.
    pub fn on_input(&self, raw: &str) {
        let query = raw.trim().to_string();

        let generation = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            if let Some(pending) = inner.pending.take() {
                pending.abort();
            }
            inner.generation
        };

        if query.chars().count() < self.settings.min_chars {
            self.view.send_replace(SuggestionView::Hidden);
            return;
        }

        let inner = Arc::clone(&self.inner);
        let transport = Arc::clone(&self.transport);
        let view = Arc::clone(&self.view);
        let settings = self.settings.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(settings.debounce).await;

            // Cache check happens at dispatch time, not at keystroke time,
            // so the entry consulted is the freshest one.
            let cached = {
                let mut guard = lock(&inner);
                if guard.generation != generation {
                    return;
                }
                guard.cache.get(&query)
            };
            if let Some(hits) = cached {
                let list = build_list(&hits, &query);
                publish_if_current(&inner, generation, &view, SuggestionView::Suggestions {
                    query,
                    list,
                });
                return;
            }

            match transport.fetch(&query, settings.limit).await {
                Ok(hits) => {
                    let list = build_list(&hits, &query);
                    let current = {
                        let mut guard = lock(&inner);
                        if guard.generation == generation {
                            guard.cache.insert(query.clone(), hits);
                            true
                        } else {
                            false
                        }
                    };
                    if current {
                        view.send_replace(SuggestionView::Suggestions { query, list });
                    }
                }
                Err(error) => {
                    tracing::debug!(%query, %error, "suggestion fetch failed");
                    if !publish_if_current(
                        &inner,
                        generation,
                        &view,
                        SuggestionView::Notice(ERROR_NOTICE.to_string()),
                    ) {
                        return;
                    }
                    tokio::time::sleep(settings.notice_ttl).await;
                    publish_if_current(&inner, generation, &view, SuggestionView::Hidden);
                }
            }
        });

        let mut guard = lock(&self.inner);
        // A newer keystroke may have arrived while spawning; it already
        // superseded this generation, so don't clobber its pending handle.
        if guard.generation == generation {
            guard.pending = Some(handle);
        } else {
            handle.abort();
        }
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.inner).pending.take() {
            pending.abort();
        }
    }
}

fn publish_if_current(
    inner: &Arc<Mutex<Inner>>,
    generation: u64,
    view: &watch::Sender<SuggestionView>,
    next: SuggestionView,
) -> bool {
    let guard = lock(inner);
    if guard.generation != generation {
        return false;
    }
    view.send_replace(next);
    true
}

fn lock(inner: &Arc<Mutex<Inner>>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::{SuggestTransport, TransportError};
    use crate::core::species::{Species, SpeciesHit, TieredHits};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    fn hits_for(name: &str) -> TieredHits {
        TieredHits {
            prefix: vec![SpeciesHit::from(Species::new(
                1,
                name,
                "Testus testus",
                "test",
            ))],
            contains: vec![],
        }
    }

    /// Mock transport with a per-query delay and optional failure, counting
    /// every call it receives.
    struct MockTransport {
        calls: StdMutex<Vec<String>>,
        delays: HashMap<String, Duration>,
        fail: bool,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                delays: HashMap::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SuggestTransport for MockTransport {
        async fn fetch(&self, query: &str, _limit: usize) -> Result<TieredHits, TransportError> {
            self.calls.lock().unwrap().push(query.to_string());
            let delay = self
                .delays
                .get(query)
                .copied()
                .unwrap_or(Duration::from_millis(10));
            tokio::time::sleep(delay).await;
            if self.fail {
                return Err(TransportError::Network("connection refused".into()));
            }
            Ok(hits_for(query))
        }
    }

    fn controller(transport: Arc<MockTransport>) -> QueryController {
        QueryController::new(transport, ControllerSettings::default())
    }

    fn shown_query(view: &SuggestionView) -> Option<&str> {
        match view {
            SuggestionView::Suggestions { query, .. } => Some(query),
            _ => None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_issues_no_request() {
        let transport = Arc::new(MockTransport::new());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("c");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(transport.calls().is_empty());
        assert_eq!(ctrl.view(), SuggestionView::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_only_the_last_keystroke() {
        let transport = Arc::new(MockTransport::new());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("ch");
        tokio::time::sleep(Duration::from_millis(100)).await;
        ctrl.on_input("cha");
        tokio::time::sleep(Duration::from_millis(100)).await;
        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(transport.calls(), vec!["chat"]);
        assert_eq!(shown_query(&ctrl.view()), Some("chat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_query_within_ttl_hits_the_cache() {
        let transport = Arc::new(MockTransport::new());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(transport.calls().len(), 1);
        let first = ctrl.view();

        ctrl.on_input("c"); // hides the list
        assert_eq!(ctrl.view(), SuggestionView::Hidden);

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(transport.calls().len(), 1, "second render must come from cache");
        assert_eq!(ctrl.view(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_ttl() {
        let transport = Arc::new(MockTransport::new());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(transport.calls().len(), 1);

        tokio::time::sleep(Duration::from_secs(301)).await;
        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_never_applies() {
        let transport = Arc::new(
            MockTransport::new()
                .with_delay("chat", Duration::from_secs(5))
                .with_delay("chien", Duration::from_millis(10)),
        );
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_millis(400)).await; // chat is in flight
        ctrl.on_input("chien");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(transport.calls(), vec!["chat", "chien"]);
        assert_eq!(shown_query(&ctrl.view()), Some("chien"));

        // Even long after chat's response would have arrived, the view
        // still reflects the most recently issued query.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(shown_query(&ctrl.view()), Some("chien"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_request_never_populates_the_cache() {
        let transport = Arc::new(MockTransport::new().with_delay("chat", Duration::from_secs(5)));
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_millis(400)).await;
        ctrl.on_input("chien");
        tokio::time::sleep(Duration::from_secs(10)).await;

        // Re-issuing "chat" must go back to the transport: the aborted
        // request was not allowed to cache anything.
        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(
            transport.calls().iter().filter(|q| *q == "chat").count(),
            2
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_then_dismisses_notice() {
        let transport = Arc::new(MockTransport::failing());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ctrl.view(), SuggestionView::Notice(ERROR_NOTICE.to_string()));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(ctrl.view(), SuggestionView::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_responses_are_not_cached() {
        let transport = Arc::new(MockTransport::failing());
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(5)).await;
        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_subscribers_see_updates() {
        let transport = Arc::new(MockTransport::new());
        let ctrl = controller(Arc::clone(&transport));
        let mut rx = ctrl.subscribe();

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert_eq!(shown_query(&view), Some("chat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_cancels_in_flight_work() {
        let transport = Arc::new(MockTransport::new().with_delay("chat", Duration::from_secs(5)));
        let ctrl = controller(Arc::clone(&transport));

        ctrl.on_input("chat");
        tokio::time::sleep(Duration::from_millis(400)).await;
        ctrl.on_input("");
        assert_eq!(ctrl.view(), SuggestionView::Hidden);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ctrl.view(), SuggestionView::Hidden, "aborted fetch must not render");
    }
}
