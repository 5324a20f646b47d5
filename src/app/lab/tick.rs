use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use super::LatencyLab;
use crate::kernel::services::ports::BackendMessage;

impl LatencyLab {
    /// Fires due dispatches and drains backend and log messages. Called from the main
    /// loop after input handling and whenever the poll timeout elapses.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        changed |= self.poll_dispatcher(now);
        changed |= self.poll_backend();
        changed |= self.poll_logs();
        changed
    }

    fn poll_dispatcher(&mut self, now: Instant) -> bool {
        let result = self.typeahead.poll(now);
        if result.state_changed {
            self.typeahead.render();
        }
        result.state_changed
    }

    fn poll_backend(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..super::MAX_BACKEND_DRAIN_PER_TICK {
            match self.backend_rx.try_recv() {
                Ok(msg) => changed |= self.apply_backend_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!(target: "typeahead.lab", "backend bus disconnected");
                    break;
                }
            }
        }
        changed
    }

    /// Each message is committed on its own so a fast Started/Completed pair still
    /// shows the orchestrator a loading edge.
    fn apply_backend_message(&mut self, msg: BackendMessage) -> bool {
        if self.typeahead.orchestrator().is_torn_down() {
            return false;
        }

        match msg {
            BackendMessage::Started { .. } => {
                if self.is_loading {
                    return false;
                }
                self.is_loading = true;
            }
            BackendMessage::Completed { request, options } => {
                if !self.typeahead.orchestrator().is_current_request(request.id) {
                    tracing::debug!(
                        target: "typeahead.lab",
                        id = request.id,
                        query = %request.query,
                        "dropping stale response"
                    );
                    return false;
                }
                self.is_loading = false;
                self.options = options;
            }
        }

        self.commit_props();
        true
    }

    fn poll_logs(&mut self) -> bool {
        let Some(rx) = self.log_rx.take() else {
            return false;
        };

        let mut changed = false;
        let mut disconnected = false;

        for _ in 0..super::MAX_LOG_DRAIN_PER_TICK {
            match rx.try_recv() {
                Ok(line) => {
                    changed = true;
                    self.push_log(line);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if !disconnected {
            self.log_rx = Some(rx);
        }
        changed
    }
}
