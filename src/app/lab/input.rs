use std::time::Instant;

use super::{LabFocus, LatencyLab};
use crate::app::widget::WidgetOutcome;
use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyModifiers};

impl LatencyLab {
    /// Routes one input event. Returns whether anything visible changed.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        match &event {
            InputEvent::Key(key) => {
                let key = *key;
                self.handle_key(&key, &event, now)
            }
            InputEvent::Paste(text) if self.focus == LabFocus::Search => {
                let outcome = self.typeahead.widget_mut().insert_str(text);
                self.apply_widget_outcome(outcome, &event, now)
            }
            InputEvent::Paste(_) => false,
            InputEvent::Resize(_, _) => true,
            InputEvent::FocusGained | InputEvent::FocusLost => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &InputEvent, now: Instant) -> bool {
        if !key.is_press() {
            return false;
        }

        // Raw mode swallows SIGINT, so Ctrl+C is honoured from any focus.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        match key.code {
            KeyCode::Tab => return self.set_focus(self.focus.next()),
            KeyCode::BackTab => return self.set_focus(self.focus.prev()),
            _ => {}
        }

        if self.focus == LabFocus::Search {
            let outcome = self.typeahead.widget_mut().handle_key(key);
            return self.apply_widget_outcome(outcome, event, now);
        }

        if key.code == KeyCode::Char('q') && key.modifiers.is_empty() {
            self.should_quit = true;
            return true;
        }

        match (self.focus, key.code) {
            (LabFocus::Latency, KeyCode::Left) => self.adjust_network(|lab| lab.latency.decrement()),
            (LabFocus::Latency, KeyCode::Right) => self.adjust_network(|lab| lab.latency.increment()),
            (LabFocus::Deviation, KeyCode::Left) => {
                self.adjust_network(|lab| lab.deviation.decrement())
            }
            (LabFocus::Deviation, KeyCode::Right) => {
                self.adjust_network(|lab| lab.deviation.increment())
            }
            (LabFocus::Throttle, KeyCode::Left) => self.adjust_search(|lab| lab.throttle.decrement()),
            (LabFocus::Throttle, KeyCode::Right) => {
                self.adjust_search(|lab| lab.throttle.increment())
            }
            (LabFocus::Cache, KeyCode::Char(' ') | KeyCode::Enter) => self.adjust_search(|lab| {
                lab.use_cache = !lab.use_cache;
                true
            }),
            _ => false,
        }
    }

    fn set_focus(&mut self, focus: LabFocus) -> bool {
        if focus == self.focus {
            return false;
        }
        self.focus = focus;
        let widget = self.typeahead.widget_mut();
        if focus == LabFocus::Search {
            widget.focus();
        } else {
            widget.blur();
        }
        true
    }

    fn adjust_network(&mut self, change: impl FnOnce(&mut Self) -> bool) -> bool {
        if !change(self) {
            return false;
        }
        self.apply_network_profile();
        true
    }

    fn adjust_search(&mut self, change: impl FnOnce(&mut Self) -> bool) -> bool {
        if !change(self) {
            return false;
        }
        self.apply_search_config();
        true
    }

    fn apply_widget_outcome(
        &mut self,
        outcome: WidgetOutcome,
        event: &InputEvent,
        now: Instant,
    ) -> bool {
        match outcome {
            WidgetOutcome::Ignored => false,
            WidgetOutcome::Handled => true,
            WidgetOutcome::TextChanged => {
                let query = self.typeahead.widget().text().to_string();
                let result = self.typeahead.handle_input_change(&query, event, now);
                if result.state_changed {
                    self.typeahead.render();
                }
                true
            }
            WidgetOutcome::Selected(selection) => {
                tracing::info!(target: "typeahead.lab", selection = ?selection, "option selected");
                self.selection = Some(selection);
                true
            }
        }
    }
}
