//! Display adapter: pairs a [`SearchOrchestrator`] with the widget that renders it.

use std::time::Instant;

use super::orchestrator::{DispatchResult, SearchOrchestrator};
use super::props::{SearchProps, TypeaheadProps};

/// A selectable-list input that can render orchestrator output.
pub trait TypeaheadWidget<T> {
    fn render_props(&mut self, props: TypeaheadProps<'_, T>);
}

/// Forwards derived props to `W` unchanged and hands out the widget itself so callers
/// keep imperative control over it (focus, clear, ...).
pub struct AsyncTypeahead<W, T, E = ()> {
    orchestrator: SearchOrchestrator<T, E>,
    widget: W,
}

impl<W, T, E> AsyncTypeahead<W, T, E>
where
    W: TypeaheadWidget<T>,
    T: Clone,
{
    pub fn new(widget: W, orchestrator: SearchOrchestrator<T, E>) -> Self {
        Self {
            orchestrator,
            widget,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator<T, E> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut SearchOrchestrator<T, E> {
        &mut self.orchestrator
    }

    pub fn handle_input_change(&mut self, query: &str, event: &E, now: Instant) -> DispatchResult {
        self.orchestrator.handle_input_change(query, event, now)
    }

    pub fn poll(&mut self, now: Instant) -> DispatchResult {
        self.orchestrator.poll(now)
    }

    pub fn set_props(&mut self, props: SearchProps<T>) {
        self.orchestrator.set_props(props);
    }

    pub fn render(&mut self) {
        self.widget.render_props(self.orchestrator.derive_props());
    }

    pub fn teardown(&mut self) {
        self.orchestrator.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/adapter.rs"]
mod tests;
