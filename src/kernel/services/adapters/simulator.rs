//! Fake search backend with configurable latency and jitter.
//!
//! Every request is answered with a fixed set of strings derived from the query, after
//! a delay drawn from the [`NetworkProfile`]. Nothing is cancelled: a slow request can
//! finish after a faster, newer one.

use std::sync::Arc;

use crate::kernel::services::bus::BackendBusSender;
use crate::kernel::services::ports::{
    AsyncExecutor, BackendMessage, NetworkProfile, SearchHandler, SearchRequest,
};

pub const OPTIONS_PER_QUERY: usize = 5;

pub fn simulated_options(query: &str) -> Vec<String> {
    (0..OPTIONS_PER_QUERY)
        .map(|i| format!("{query}-option-{i}"))
        .collect()
}

pub struct SimulatedBackend {
    profile: NetworkProfile,
    executor: Arc<dyn AsyncExecutor>,
    bus: BackendBusSender,
}

impl SimulatedBackend {
    pub fn new(
        profile: NetworkProfile,
        executor: Arc<dyn AsyncExecutor>,
        bus: BackendBusSender,
    ) -> Self {
        Self {
            profile,
            executor,
            bus,
        }
    }

    pub fn profile(&self) -> NetworkProfile {
        self.profile
    }
}

impl SearchHandler for SimulatedBackend {
    fn search(&self, request: &SearchRequest) {
        let latency = self.profile.sample_latency(rand::random::<f64>());
        tracing::info!(
            target: "typeahead.backend",
            id = request.id,
            query = %request.query,
            latency_ms = latency.as_millis() as u64,
            "query start"
        );

        // Sent before spawning so the UI always sees Started ahead of Completed.
        let _ = self.bus.send(BackendMessage::Started {
            request: request.clone(),
            latency,
        });

        let bus = self.bus.clone();
        let request = request.clone();
        self.executor.spawn(Box::pin(async move {
            tokio::time::sleep(latency).await;
            let options = simulated_options(&request.query);
            tracing::info!(target: "typeahead.backend", id = request.id, "query end");
            let _ = bus.send(BackendMessage::Completed { request, options });
        }));
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/simulator.rs"]
mod tests;
