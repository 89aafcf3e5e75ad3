//! Headless search widget.
//!
//! Owns the full search lifecycle independent of any UI toolkit:
//! - debounced search-as-you-type (250ms quiescence window)
//! - at most one in-flight request, superseded requests aborted
//! - result pane and status line state
//! - keyboard shortcut handling (`/` to focus, Escape to clear)
//!
//! The UI layer forwards events in and reads the pane/status/busy state
//! back out every frame via [`SearchWidget::tick`].

pub mod markup;

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::{ResultItem, SearchClient, SearchResponse};
use crate::{MedlookError, Result};

/// Quiescence window before a keystroke triggers a search.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Fixed result limit sent with every request.
pub const RESULT_LIMIT: usize = 30;

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPane {
    /// Nothing to show (startup, cleared input)
    Empty,
    /// One card per item
    Results(Vec<ResultItem>),
    /// The single "No results" placeholder
    NoResults,
    /// The network-error placeholder
    Error,
}

/// Where the widget is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Requesting,
}

/// Shell-side effect of a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    FocusInput,
}

/// A spawned request waiting to settle.
///
/// Dropping the receiver is what guarantees a superseded response can
/// never be rendered, even if abort races with completion.
struct InFlight {
    task: JoinHandle<()>,
    rx: Receiver<Result<SearchResponse>>,
    query: String,
}

/// The search widget state machine.
pub struct SearchWidget {
    /// Last input text as reported by the shell.
    query: String,
    /// Deadline at which the pending debounce fires.
    debounce_deadline: Option<Instant>,
    /// The single in-flight request, if any.
    in_flight: Option<InFlight>,
    /// Busy indicator, set while a request is outstanding.
    busy: bool,
    /// Current results area content.
    pane: ResultsPane,
    /// Status line text.
    status: String,
    /// Search endpoint client.
    client: Arc<dyn SearchClient>,
    /// Tokio runtime handle requests are spawned on.
    runtime: Handle,
}

impl SearchWidget {
    /// Create a widget against the given search client.
    pub fn new(client: Arc<dyn SearchClient>, runtime: Handle) -> Self {
        Self {
            query: String::new(),
            debounce_deadline: None,
            in_flight: None,
            busy: false,
            pane: ResultsPane::Empty,
            status: String::new(),
            client,
            runtime,
        }
    }

    /// Record an input change and restart the debounce window.
    ///
    /// Only the last change within [`DEBOUNCE`] of quiescence results in
    /// a request.
    pub fn input_changed(&mut self, text: &str) {
        self.query = text.to_string();
        self.debounce_deadline = Some(Instant::now() + DEBOUNCE);
    }

    /// Trigger a search immediately (the Search button), bypassing the
    /// debounce timer.
    pub fn search_now(&mut self) {
        self.debounce_deadline = None;
        self.execute();
    }

    /// Advance the widget: fire an elapsed debounce and poll the
    /// in-flight request for a settled response.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.debounce_deadline {
            if now >= deadline {
                self.debounce_deadline = None;
                self.execute();
            }
        }
        self.poll_response();
    }

    /// Handle the `/` shortcut. Focuses the input only when it is not
    /// already focused; the shell must suppress the key's default effect
    /// when `FocusInput` is returned.
    pub fn on_slash(&self, input_focused: bool) -> KeyAction {
        if input_focused {
            KeyAction::None
        } else {
            KeyAction::FocusInput
        }
    }

    /// Handle the Escape shortcut: clear input, results and status,
    /// regardless of prior state. The shell refocuses the input.
    pub fn on_escape(&mut self) {
        self.query.clear();
        self.debounce_deadline = None;
        self.pane = ResultsPane::Empty;
        self.status.clear();
    }

    /// Record a successful clipboard copy in the status line.
    pub fn note_copied(&mut self, text: &str) {
        self.status = markup::copied_status(text);
    }

    /// Abort the in-flight request and release it. Called on drop; also
    /// available for explicit shutdown.
    pub fn teardown(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
        self.busy = false;
    }

    /// Last input text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current results area content.
    pub fn pane(&self) -> &ResultsPane {
        &self.pane
    }

    /// Current phase of the search cycle.
    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Requesting
        } else if self.debounce_deadline.is_some() {
            Phase::Debouncing
        } else {
            Phase::Idle
        }
    }

    /// Whether the shell should keep ticking soon (debounce pending or
    /// request outstanding).
    pub fn needs_tick(&self) -> bool {
        self.debounce_deadline.is_some() || self.in_flight.is_some()
    }

    /// The results area rendered as an escaped HTML fragment, for markup
    /// hosts embedding the widget.
    pub fn results_markup(&self) -> String {
        markup::results(&self.pane)
    }

    /// Issue a search for the current query.
    ///
    /// An empty trimmed query clears the pane and status without any
    /// network activity. Otherwise the previous in-flight request is
    /// aborted before the new one is spawned.
    fn execute(&mut self) {
        let query = self.query.trim().to_string();
        self.status.clear();
        if query.is_empty() {
            self.pane = ResultsPane::Empty;
            return;
        }

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(query = %previous.query, "superseding in-flight search");
            previous.task.abort();
        }

        self.busy = true;
        let (tx, rx) = mpsc::channel();
        let client = Arc::clone(&self.client);
        let request_query = query.clone();
        let task = self.runtime.spawn(async move {
            let result = client.search(&request_query, RESULT_LIMIT).await;
            // The receiver may already be gone if this request was
            // superseded; that is the silent-cancellation path.
            let _ = tx.send(result);
        });

        self.in_flight = Some(InFlight { task, rx, query });
    }

    /// Poll the in-flight request and apply its outcome.
    fn poll_response(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        let outcome = match in_flight.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => {
                self.in_flight = Some(in_flight);
                return;
            }
            Err(TryRecvError::Disconnected) => {
                // Task ended without replying (panicked or runtime shut
                // down); surface it like any other request failure.
                Err(MedlookError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "search task ended without a response",
                )))
            }
        };

        self.busy = false;
        match outcome {
            Ok(response) => self.render(response.items, &in_flight.query),
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", in_flight.query, e);
                self.pane = ResultsPane::Error;
                self.status = markup::STATUS_NETWORK_ERROR.to_string();
            }
        }
    }

    /// Render a settled response into the pane and status line.
    fn render(&mut self, items: Vec<ResultItem>, query: &str) {
        if items.is_empty() {
            self.pane = ResultsPane::NoResults;
            self.status = markup::STATUS_NO_RESULTS.to_string();
        } else {
            self.status = markup::status_found(items.len(), query);
            self.pane = ResultsPane::Results(items);
        }
    }
}

impl Drop for SearchWidget {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted backend: counts calls, records queries, and answers with
    /// one item per requested "hit". Queries starting with "slow" are
    /// delayed long enough to be superseded.
    struct ScriptedClient {
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
        hits: usize,
        fail: bool,
    }

    impl ScriptedClient {
        fn new(hits: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
                hits,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchClient for ScriptedClient {
        async fn search(&self, query: &str, limit: usize) -> Result<SearchResponse> {
            assert_eq!(limit, RESULT_LIMIT);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());

            if query.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            if self.fail {
                return Err(MedlookError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "refused",
                )));
            }

            let items = (0..self.hits)
                .map(|i| ResultItem {
                    code: format!("C{}", i),
                    source: "ICD-10-CM".to_string(),
                    description: format!("match for {}", query),
                })
                .collect();
            Ok(SearchResponse { items })
        }
    }

    fn widget_with(client: Arc<ScriptedClient>) -> SearchWidget {
        SearchWidget::new(client, Handle::current())
    }

    /// Tick until the in-flight request settles, yielding to the runtime
    /// between polls.
    async fn settle(widget: &mut SearchWidget) {
        for _ in 0..100 {
            widget.tick(Instant::now());
            if widget.phase() != Phase::Requesting {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("request never settled");
    }

    #[tokio::test]
    async fn test_empty_query_skips_network() {
        let client = Arc::new(ScriptedClient::new(3));
        let mut widget = widget_with(client.clone());

        widget.input_changed("   ");
        widget.search_now();

        assert_eq!(client.calls(), 0);
        assert_eq!(widget.pane(), &ResultsPane::Empty);
        assert_eq!(widget.status(), "");
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.is_busy());
    }

    #[tokio::test]
    async fn test_debounce_coalesces_rapid_keystrokes() {
        let client = Arc::new(ScriptedClient::new(1));
        let mut widget = widget_with(client.clone());

        widget.input_changed("f");
        widget.input_changed("fo");
        widget.input_changed("foo");

        // Window has not elapsed yet
        widget.tick(Instant::now());
        assert_eq!(client.calls(), 0);
        assert_eq!(widget.phase(), Phase::Debouncing);

        // Past the deadline the single request fires, for the final text
        widget.tick(Instant::now() + Duration::from_millis(300));
        settle(&mut widget).await;

        assert_eq!(client.calls(), 1);
        assert_eq!(client.queries.lock().unwrap().clone(), vec!["foo".to_string()]);
    }

    #[tokio::test]
    async fn test_button_bypasses_debounce() {
        let client = Arc::new(ScriptedClient::new(1));
        let mut widget = widget_with(client.clone());

        widget.input_changed("foo");
        widget.search_now();
        assert_eq!(widget.phase(), Phase::Requesting);
        assert!(widget.is_busy());

        settle(&mut widget).await;
        assert_eq!(client.calls(), 1);
        assert!(!widget.is_busy());
    }

    #[tokio::test]
    async fn test_status_and_pane_for_hits() {
        let client = Arc::new(ScriptedClient::new(3));
        let mut widget = widget_with(client.clone());

        widget.input_changed("foo");
        widget.search_now();
        settle(&mut widget).await;

        assert_eq!(widget.status(), "Found 3 results for \"foo\"");
        match widget.pane() {
            ResultsPane::Results(items) => assert_eq!(items.len(), 3),
            other => panic!("unexpected pane: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_results_placeholder() {
        let client = Arc::new(ScriptedClient::new(0));
        let mut widget = widget_with(client.clone());

        widget.input_changed("zz");
        widget.search_now();
        settle(&mut widget).await;

        assert_eq!(widget.pane(), &ResultsPane::NoResults);
        assert_eq!(widget.status(), "No results");
        assert_eq!(widget.results_markup().matches("No results").count(), 1);
    }

    #[tokio::test]
    async fn test_failure_surfaces_error_and_clears_busy() {
        let client = Arc::new(ScriptedClient::failing());
        let mut widget = widget_with(client.clone());

        widget.input_changed("foo");
        widget.search_now();
        settle(&mut widget).await;

        assert_eq!(widget.pane(), &ResultsPane::Error);
        assert_eq!(widget.status(), "Network error");
        assert!(!widget.is_busy());
    }

    #[tokio::test]
    async fn test_superseded_request_never_renders() {
        let client = Arc::new(ScriptedClient::new(1));
        let mut widget = widget_with(client.clone());

        widget.input_changed("slow query");
        widget.search_now();
        assert_eq!(widget.phase(), Phase::Requesting);

        // Supersede before the slow request completes
        widget.input_changed("fast");
        widget.search_now();
        settle(&mut widget).await;

        let status = widget.status().to_string();
        assert_eq!(status, "Found 1 results for \"fast\"");

        // Give the superseded request time to have completed, had it not
        // been aborted; the UI must not change.
        tokio::time::sleep(Duration::from_millis(300)).await;
        widget.tick(Instant::now());
        assert_eq!(widget.status(), status);
        match widget.pane() {
            ResultsPane::Results(items) => {
                assert_eq!(items[0].description, "match for fast");
            }
            other => panic!("unexpected pane: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_escape_resets_everything() {
        let client = Arc::new(ScriptedClient::new(2));
        let mut widget = widget_with(client.clone());

        widget.input_changed("foo");
        widget.search_now();
        settle(&mut widget).await;
        assert_ne!(widget.status(), "");

        widget.on_escape();

        assert_eq!(widget.query(), "");
        assert_eq!(widget.pane(), &ResultsPane::Empty);
        assert_eq!(widget.status(), "");
        assert_eq!(widget.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_escape_cancels_pending_debounce() {
        let client = Arc::new(ScriptedClient::new(1));
        let mut widget = widget_with(client.clone());

        widget.input_changed("foo");
        widget.on_escape();
        widget.tick(Instant::now() + Duration::from_millis(300));

        assert_eq!(client.calls(), 0);
        assert_eq!(widget.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_slash_focuses_only_when_unfocused() {
        let client = Arc::new(ScriptedClient::new(0));
        let widget = widget_with(client);

        assert_eq!(widget.on_slash(false), KeyAction::FocusInput);
        assert_eq!(widget.on_slash(true), KeyAction::None);
    }

    #[tokio::test]
    async fn test_copied_status() {
        let client = Arc::new(ScriptedClient::new(0));
        let mut widget = widget_with(client);

        widget.note_copied("A1 - d<1>");
        assert_eq!(widget.status(), "Copied: A1 - d<1>");
    }

    #[tokio::test]
    async fn test_teardown_aborts_in_flight() {
        let client = Arc::new(ScriptedClient::new(1));
        let mut widget = widget_with(client.clone());

        widget.input_changed("slow query");
        widget.search_now();
        widget.teardown();

        assert!(!widget.is_busy());
        assert_eq!(widget.phase(), Phase::Idle);
    }
}
