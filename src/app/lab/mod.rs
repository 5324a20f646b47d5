//! Lab state: network sliders, cache toggle, the typeahead and the log pane.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use super::slider::Slider;
use super::widget::{ListTypeahead, Selection};
use crate::core::event::InputEvent;
use crate::kernel::services::ports::{NetworkProfile, Settings, SharedSearchHandler};
use crate::kernel::services::BackendBusReceiver;
use crate::kernel::{AllowNew, AsyncTypeahead, SearchOrchestrator, SearchProps};

mod input;
#[cfg(feature = "tui")]
mod render;
mod tick;

const LOG_BUFFER_CAP: usize = 200;
const MAX_LOG_DRAIN_PER_TICK: usize = 256;
const MAX_BACKEND_DRAIN_PER_TICK: usize = 256;

/// Builds the search handler for a network profile. Called again whenever the
/// latency or deviation slider moves.
pub type BackendFactory = Box<dyn Fn(NetworkProfile) -> SharedSearchHandler>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabFocus {
    Latency,
    Deviation,
    Throttle,
    Cache,
    Search,
}

impl LabFocus {
    const ORDER: [LabFocus; 5] = [
        LabFocus::Latency,
        LabFocus::Deviation,
        LabFocus::Throttle,
        LabFocus::Cache,
        LabFocus::Search,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct LatencyLab {
    latency: Slider,
    deviation: Slider,
    throttle: Slider,
    use_cache: bool,
    focus: LabFocus,
    typeahead: AsyncTypeahead<ListTypeahead, String, InputEvent>,
    backend_factory: BackendFactory,
    backend_rx: BackendBusReceiver,
    log_rx: Option<Receiver<String>>,
    logs: VecDeque<String>,
    is_loading: bool,
    options: Vec<String>,
    selection: Option<Selection>,
    should_quit: bool,
}

impl LatencyLab {
    pub fn new(
        settings: &Settings,
        backend_factory: BackendFactory,
        backend_rx: BackendBusReceiver,
        log_rx: Option<Receiver<String>>,
    ) -> Self {
        let latency =
            Slider::new("Latency", "ms", 0, 2000, 10).with_value(settings.network.latency_ms);
        let deviation = Slider::new("Random latency deviation", "%", 0, 100, 5)
            .with_value(u64::from(settings.network.deviation_pct));
        let throttle = Slider::new("Throttle (minimum time between requests)", "ms", 0, 1000, 10)
            .with_value(settings.search.throttle_ms);

        let mut config = settings.search.clone();
        config.throttle_ms = throttle.value();

        let profile = profile_from(&latency, &deviation);
        let orchestrator = SearchOrchestrator::new(config.clone())
            .with_handler(backend_factory(profile))
            .with_allow_new(AllowNew::Flag(true))
            .with_input_hook(|query: &str, _event: &InputEvent| {
                tracing::trace!(target: "typeahead.lab", query, "input changed");
            });

        let mut widget = ListTypeahead::new();
        widget.focus();

        let mut lab = Self {
            latency,
            deviation,
            throttle,
            use_cache: config.use_cache,
            focus: LabFocus::Search,
            typeahead: AsyncTypeahead::new(widget, orchestrator),
            backend_factory,
            backend_rx,
            log_rx,
            logs: VecDeque::new(),
            is_loading: false,
            options: Vec::new(),
            selection: None,
            should_quit: false,
        };
        lab.typeahead.render();

        tracing::info!(
            target: "typeahead.lab",
            latency_ms = profile.latency_ms,
            deviation = profile.deviation,
            throttle_ms = config.throttle_ms,
            use_cache = config.use_cache,
            "lab started"
        );
        lab
    }

    pub fn latency(&self) -> &Slider {
        &self.latency
    }

    pub fn deviation(&self) -> &Slider {
        &self.deviation
    }

    pub fn throttle(&self) -> &Slider {
        &self.throttle
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn focus(&self) -> LabFocus {
        self.focus
    }

    pub fn typeahead(&self) -> &AsyncTypeahead<ListTypeahead, String, InputEvent> {
        &self.typeahead
    }

    pub fn logs(&self) -> &VecDeque<String> {
        &self.logs
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn network_profile(&self) -> NetworkProfile {
        profile_from(&self.latency, &self.deviation)
    }

    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        self.typeahead.orchestrator().next_deadline()
    }

    /// Stops all pending dispatches. Responses still in flight are ignored afterwards.
    pub fn teardown(&mut self) {
        self.typeahead.teardown();
        tracing::info!(target: "typeahead.lab", "lab torn down");
    }

    /// Hands the caller-owned search state to the orchestrator and re-renders.
    fn commit_props(&mut self) {
        self.typeahead.set_props(SearchProps {
            is_loading: self.is_loading,
            options: self.options.clone(),
        });
        self.typeahead.render();
    }

    fn apply_network_profile(&mut self) {
        let profile = self.network_profile();
        tracing::info!(
            target: "typeahead.lab",
            latency_ms = profile.latency_ms,
            deviation = profile.deviation,
            "network profile changed"
        );
        let handler = (self.backend_factory)(profile);
        self.typeahead
            .orchestrator_mut()
            .set_handler(Some(handler));
    }

    fn apply_search_config(&mut self) {
        let mut config = self.typeahead.orchestrator().config().clone();
        config.throttle_ms = self.throttle.value();
        config.use_cache = self.use_cache;
        tracing::info!(
            target: "typeahead.lab",
            throttle_ms = config.throttle_ms,
            use_cache = config.use_cache,
            "search config changed"
        );
        self.typeahead.orchestrator_mut().set_config(config);
        self.typeahead.render();
    }

    fn push_log(&mut self, line: String) {
        self.logs.push_back(line);
        while self.logs.len() > LOG_BUFFER_CAP {
            self.logs.pop_front();
        }
    }
}

fn profile_from(latency: &Slider, deviation: &Slider) -> NetworkProfile {
    NetworkProfile {
        latency_ms: latency.value(),
        deviation: deviation.value() as f64 / 100.0,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/lab.rs"]
mod tests;
