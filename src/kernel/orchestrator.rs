//! Asynchronous search orchestration for a typeahead input.
//!
//! The orchestrator sits between raw input changes and an expensive search:
//!
//! - input goes through a [`RateLimiter`] (debounce inside throttle);
//! - emitted queries are answered from the [`QueryCache`] when possible, otherwise
//!   handed to the [`SearchHandler`](super::services::ports::SearchHandler);
//! - the caller reports loading state and options back through [`SearchProps`];
//! - [`SearchOrchestrator::derive_props`] produces what the widget renders.
//!
//! Searches follow an explicit `Idle -> Loading -> Idle` phase. The request recorded
//! when entering `Loading` is the only key a settling search is ever cached under.

use std::sync::Arc;
use std::time::Instant;

use super::cache::QueryCache;
use super::limiter::RateLimiter;
use super::props::{AllowNew, SearchProps, TypeaheadProps};
use super::services::ports::{SearchConfig, SearchRequest, SharedSearchHandler};

/// Caller hook that sees every input change before the orchestrator does.
pub type InputChangeHook<E> = Box<dyn FnMut(&str, &E) + Send>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading {
        request: SearchRequest,
    },
}

impl SearchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchPhase::Loading { .. })
    }
}

/// Outcome of feeding input or time into the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Requests handed to the search handler, in dispatch order.
    pub searches: Vec<SearchRequest>,
    /// Emitted queries answered from the cache instead.
    pub cache_hits: Vec<String>,
    /// Derived props may differ; the widget should re-render.
    pub state_changed: bool,
}

impl DispatchResult {
    pub fn merge(&mut self, other: DispatchResult) {
        self.searches.extend(other.searches);
        self.cache_hits.extend(other.cache_hits);
        self.state_changed |= other.state_changed;
    }
}

pub struct SearchOrchestrator<T, E = ()> {
    config: SearchConfig,
    allow_new: AllowNew<T>,
    handler: Option<SharedSearchHandler>,
    input_hook: Option<InputChangeHook<E>>,
    limiter: RateLimiter<String>,
    cache: QueryCache<T>,
    pending_query: String,
    phase: SearchPhase,
    props: SearchProps<T>,
    next_request_id: u64,
    torn_down: bool,
}

impl<T: Clone, E> SearchOrchestrator<T, E> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config.delay(), config.throttle()),
            config,
            allow_new: AllowNew::default(),
            handler: None,
            input_hook: None,
            cache: QueryCache::new(),
            pending_query: String::new(),
            phase: SearchPhase::Idle,
            props: SearchProps::default(),
            next_request_id: 0,
            torn_down: false,
        }
    }

    pub fn with_handler(mut self, handler: SharedSearchHandler) -> Self {
        self.set_handler(Some(handler));
        self
    }

    pub fn with_allow_new(mut self, allow_new: AllowNew<T>) -> Self {
        self.allow_new = allow_new;
        self
    }

    pub fn with_input_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str, &E) + Send + 'static,
    {
        self.input_hook = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Applies a new configuration. Timing, `min_length` or cache changes rebuild the
    /// dispatcher and discard whatever it still held; cached results are kept.
    pub fn set_config(&mut self, config: SearchConfig) {
        let rebuild = self.config.requires_rebuild(&config);
        self.config = config;
        if rebuild {
            self.rebuild_limiter("config");
        }
    }

    /// Swaps the search handler. A different handler rebuilds the dispatcher.
    pub fn set_handler(&mut self, handler: Option<SharedSearchHandler>) {
        let same = match (&self.handler, &handler) {
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        self.handler = handler;
        if !same {
            self.rebuild_limiter("handler");
        }
    }

    pub fn set_allow_new(&mut self, allow_new: AllowNew<T>) {
        self.allow_new = allow_new;
    }

    pub fn set_input_hook(&mut self, hook: Option<InputChangeHook<E>>) {
        self.input_hook = hook;
    }

    pub fn pending_query(&self) -> &str {
        &self.pending_query
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn current_request(&self) -> Option<&SearchRequest> {
        match &self.phase {
            SearchPhase::Loading { request } => Some(request),
            SearchPhase::Idle => None,
        }
    }

    /// Whether a completion for request `id` still belongs to the search in flight.
    /// Callers use this to drop out-of-order responses before touching their state.
    pub fn is_current_request(&self, id: u64) -> bool {
        self.current_request().is_some_and(|request| request.id == id)
    }

    pub fn cache(&self) -> &QueryCache<T> {
        &self.cache
    }

    pub fn props(&self) -> &SearchProps<T> {
        &self.props
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn handle_input_change(&mut self, query: &str, event: &E, now: Instant) -> DispatchResult {
        let mut result = DispatchResult::default();
        if let Some(hook) = self.input_hook.as_mut() {
            hook(query, event);
        }
        if self.torn_down {
            return result;
        }

        self.pending_query.clear();
        self.pending_query.push_str(query);
        result.state_changed = true;

        // An unsearchable value is still the latest one: whatever the limiter held
        // is now stale and must not fire.
        if !self.config.is_searchable(query) {
            if self.limiter.discard_pending() {
                tracing::trace!(target: "typeahead.limiter", "pending dispatch dropped");
            }
            return result;
        }

        if let Some(query) = self.limiter.push(query.to_string(), now) {
            self.run_search(query, &mut result);
        }
        result
    }

    /// Runs every dispatch whose timer has fired by `now`.
    pub fn poll(&mut self, now: Instant) -> DispatchResult {
        let mut result = DispatchResult::default();
        if self.torn_down {
            return result;
        }
        while let Some(query) = self.limiter.poll(now) {
            self.run_search(query, &mut result);
        }
        result
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.limiter.next_deadline()
    }

    /// Commits the caller's state for this render, then observes the loading edge.
    pub fn set_props(&mut self, props: SearchProps<T>) {
        let was_loading = self.props.is_loading;
        self.props = props;
        self.observe_loading_transition(was_loading);
    }

    pub fn derive_empty_label(&self) -> &str {
        if self.pending_query.is_empty() {
            return &self.config.prompt_text;
        }
        if self.props.is_loading {
            return &self.config.search_text;
        }
        &self.config.empty_label
    }

    pub fn derive_props(&self) -> TypeaheadProps<'_, T> {
        let cached = if self.config.use_cache {
            self.cache.get(&self.pending_query)
        } else {
            None
        };

        TypeaheadProps {
            is_loading: self.props.is_loading,
            min_length: self.config.min_length,
            empty_label: self.derive_empty_label(),
            allow_new: self.allow_new.resolve(self.props.is_loading),
            options: cached.unwrap_or(self.props.options.as_slice()),
        }
    }

    /// Cancels anything still scheduled. Later input and polls are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let had_pending = self.limiter.has_pending();
        self.limiter.cancel();
        self.torn_down = true;
        tracing::debug!(target: "typeahead.limiter", had_pending, "orchestrator torn down");
    }

    fn rebuild_limiter(&mut self, reason: &'static str) {
        let had_pending = self.limiter.has_pending();
        self.limiter.cancel();
        self.limiter = RateLimiter::new(self.config.delay(), self.config.throttle());
        tracing::debug!(
            target: "typeahead.limiter",
            reason,
            had_pending,
            delay_ms = self.config.delay_ms,
            throttle_ms = self.config.throttle_ms,
            "dispatcher rebuilt"
        );
    }

    fn run_search(&mut self, query: String, result: &mut DispatchResult) {
        if self.config.use_cache && self.cache.contains(&query) {
            tracing::debug!(target: "typeahead.search", query = %query, "cache hit");
            result.cache_hits.push(query);
            result.state_changed = true;
            return;
        }

        let Some(handler) = self.handler.clone() else {
            tracing::trace!(target: "typeahead.search", query = %query, "no search handler");
            return;
        };

        self.next_request_id += 1;
        let request = SearchRequest {
            id: self.next_request_id,
            query,
        };
        tracing::debug!(
            target: "typeahead.search",
            id = request.id,
            query = %request.query,
            "dispatching search"
        );
        self.phase = SearchPhase::Loading {
            request: request.clone(),
        };
        handler.search(&request);
        result.searches.push(request);
        result.state_changed = true;
    }

    fn observe_loading_transition(&mut self, was_loading: bool) {
        if self.props.is_loading || !was_loading {
            return;
        }

        match std::mem::take(&mut self.phase) {
            SearchPhase::Loading { request } if self.config.use_cache => {
                tracing::debug!(
                    target: "typeahead.search",
                    id = request.id,
                    query = %request.query,
                    options = self.props.options.len(),
                    "caching results"
                );
                self.cache.insert(request.query, self.props.options.clone());
            }
            SearchPhase::Loading { request } => {
                tracing::trace!(target: "typeahead.search", id = request.id, "search settled");
            }
            SearchPhase::Idle => {
                tracing::debug!(
                    target: "typeahead.search",
                    "loading settled without a dispatched search; not cached"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/orchestrator.rs"]
mod tests;
