//! Search/browse session: query text, paginated results and live suggestions.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use log::{debug, error};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::sleep,
};

use crate::{
    CHANNEL_BUFFER_DEFAULT, PER_PAGE,
    debounce::Debouncer,
    ds::DirectoryApi,
    error::IiResult,
    model::{CompaniesPage, CompanyRecord},
};

pub static SUGGEST_DEBOUNCE: Duration = Duration::from_millis(180);

/// How long the suggestion panel stays up after the input loses focus, so a click on it still lands.
pub static BLUR_GRACE: Duration = Duration::from_millis(120);

#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub page: u32,
    pub pages: u32,
    pub companies: Vec<CompanyRecord>,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
}

pub struct SearchSession {
    state: SearchState,
    source: Arc<dyn DirectoryApi>,

    event_sender: mpsc::Sender<SearchEvent>,
    event_receiver: mpsc::Receiver<SearchEvent>,

    companies_requests: RequestSequence,
    companies_settled: u64,
    suggestions_requests: RequestSequence,
    suggestions_settled: u64,
    blur_requests: RequestSequence,

    suggest_debouncer: Debouncer<String>,
    blur_task: Option<JoinHandle<()>>,
}

enum SearchEvent {
    Companies {
        request_id: u64,
        result: IiResult<CompaniesPage>,
    },
    Suggestions {
        request_id: u64,
        result: IiResult<Vec<String>>,
    },
    HideSuggestions {
        blur_id: u64,
    },
}

/// Monotonic request ids; only the latest id may update the state.
#[derive(Clone, Default)]
struct RequestSequence(Arc<AtomicU64>);

impl RequestSequence {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn is_current(&self, id: u64) -> bool {
        self.current() == id
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            pages: 1,
            companies: vec![],
            suggestions: vec![],
            show_suggestions: false,
        }
    }
}

impl SearchSession {
    /// Must be called within a tokio runtime.
    pub fn new(source: Arc<dyn DirectoryApi>) -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<SearchEvent>(CHANNEL_BUFFER_DEFAULT);

        let suggestions_requests = RequestSequence::default();
        let suggest_debouncer = {
            let source = source.clone();
            let event_sender = event_sender.clone();
            let suggestions_requests = suggestions_requests.clone();

            Debouncer::new(SUGGEST_DEBOUNCE, move |text: String| {
                spawn_suggest(&source, &event_sender, &suggestions_requests, text);
            })
        };

        Self {
            state: SearchState::default(),
            source,

            event_sender,
            event_receiver,

            companies_requests: RequestSequence::default(),
            companies_settled: 0,
            suggestions_requests,
            suggestions_settled: 0,
            blur_requests: RequestSequence::default(),

            suggest_debouncer,
            blur_task: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading_companies(&self) -> bool {
        self.companies_requests.current() != self.companies_settled
    }

    pub fn is_loading_suggestions(&self) -> bool {
        self.suggestions_requests.current() != self.suggestions_settled
    }

    /// Whether something is still due to arrive on its own: a fetch, a debounced call or a blur timer.
    pub fn is_busy(&self) -> bool {
        self.is_loading_companies()
            || self.is_loading_suggestions()
            || self.suggest_debouncer.is_pending()
            || self.blur_task.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Suggestions to draw: the panel is open and the list is non-empty.
    pub fn visible_suggestions(&self) -> &[String] {
        if self.state.show_suggestions {
            &self.state.suggestions
        } else {
            &[]
        }
    }

    /// Initial load: first page of all companies and the default suggestions.
    pub fn mount(&mut self) {
        self.search("", 1);
        self.suggest("");
    }

    pub fn search(&mut self, query: &str, page: u32) {
        let request_id = self.companies_requests.next();
        let source = self.source.clone();
        let event_sender = self.event_sender.clone();
        let query = query.to_string();

        debug!("[Search] #{request_id} '{query}' page {page}");
        tokio::spawn(async move {
            let result = source.companies(&query, page, PER_PAGE).await;
            let _ = event_sender
                .send(SearchEvent::Companies { request_id, result })
                .await;
        });
    }

    /// Fetches suggestions right away, bypassing the debouncer.
    pub fn suggest(&mut self, text: &str) {
        spawn_suggest(
            &self.source,
            &self.event_sender,
            &self.suggestions_requests,
            text.to_string(),
        );
    }

    /// The query text changed.
    pub fn input(&mut self, text: &str) {
        self.state.query = text.to_string();
        self.show_suggestions();
        self.suggest_debouncer.call(text.to_string());
    }

    pub fn focus(&mut self) {
        self.show_suggestions();
    }

    pub fn blur(&mut self) {
        let blur_id = self.blur_requests.next();
        let event_sender = self.event_sender.clone();

        if let Some(handle) = self.blur_task.take() {
            handle.abort();
        }
        self.blur_task = Some(tokio::spawn(async move {
            sleep(BLUR_GRACE).await;
            let _ = event_sender
                .send(SearchEvent::HideSuggestions { blur_id })
                .await;
        }));
    }

    pub fn select_suggestion(&mut self, name: &str) {
        self.state.query = name.to_string();
        self.hide_suggestions();
        self.search(name, 1);
    }

    /// Runs the current query from its first page.
    pub fn submit(&mut self) {
        self.hide_suggestions();
        let query = self.state.query.clone();
        self.search(&query, 1);
    }

    /// Returns `false` without fetching when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.state.page >= self.state.pages {
            return false;
        }

        let query = self.state.query.clone();
        self.search(&query, self.state.page + 1);
        true
    }

    /// Returns `false` without fetching when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.state.page <= 1 {
            return false;
        }

        let query = self.state.query.clone();
        self.search(&query, self.state.page - 1);
        true
    }

    /// Applies every event that has already arrived. Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_receiver.try_recv() {
            changed |= self.on_event(event);
        }
        changed
    }

    /// Waits for the next event and applies it. Returns whether the state changed.
    pub async fn recv(&mut self) -> bool {
        match self.event_receiver.recv().await {
            Some(event) => self.on_event(event),
            None => false,
        }
    }

    fn show_suggestions(&mut self) {
        self.blur_requests.next();
        self.state.show_suggestions = true;
    }

    fn hide_suggestions(&mut self) {
        self.blur_requests.next();
        self.state.show_suggestions = false;
    }

    fn on_event(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Companies { request_id, result } => {
                if !self.companies_requests.is_current(request_id) {
                    debug!("[Search] Discard stale companies #{request_id}");
                    return false;
                }
                self.companies_settled = request_id;

                match result {
                    Ok(companies_page) => {
                        let (page, pages) = companies_page.page_bounds();
                        self.state.companies = companies_page.results;
                        self.state.page = page;
                        self.state.pages = pages;
                    }
                    Err(err) => {
                        error!("[Search] Companies fetch failed: {err}");
                        self.state.companies.clear();
                    }
                }
            }
            SearchEvent::Suggestions { request_id, result } => {
                if !self.suggestions_requests.is_current(request_id) {
                    debug!("[Search] Discard stale suggestions #{request_id}");
                    return false;
                }
                self.suggestions_settled = request_id;

                match result {
                    Ok(suggestions) => self.state.suggestions = suggestions,
                    Err(err) => {
                        error!("[Search] Suggestions fetch failed: {err}");
                        self.state.suggestions.clear();
                    }
                }
            }
            SearchEvent::HideSuggestions { blur_id } => {
                if !self.blur_requests.is_current(blur_id) {
                    return false;
                }
                self.state.show_suggestions = false;
            }
        }

        true
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.suggest_debouncer.cancel();
        if let Some(handle) = self.blur_task.take() {
            handle.abort();
        }
    }
}

fn spawn_suggest(
    source: &Arc<dyn DirectoryApi>,
    event_sender: &mpsc::Sender<SearchEvent>,
    suggestions_requests: &RequestSequence,
    text: String,
) {
    let request_id = suggestions_requests.next();
    let source = source.clone();
    let event_sender = event_sender.clone();

    tokio::spawn(async move {
        let result = source.suggestions(&text).await;
        let _ = event_sender
            .send(SearchEvent::Suggestions { request_id, result })
            .await;
    });
}
