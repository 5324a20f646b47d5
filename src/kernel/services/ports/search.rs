use std::sync::Arc;
use std::time::Duration;

/// One invocation of the search handler. Ids grow monotonically per orchestrator so a
/// completion can always be matched to the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub id: u64,
    pub query: String,
}

/// Fire-and-forget search entry point. Implementations start the work and return;
/// results come back through the caller's own state (`SearchProps`).
pub trait SearchHandler: Send + Sync {
    fn search(&self, request: &SearchRequest);
}

impl<F> SearchHandler for F
where
    F: Fn(&SearchRequest) + Send + Sync,
{
    fn search(&self, request: &SearchRequest) {
        self(request)
    }
}

pub type SharedSearchHandler = Arc<dyn SearchHandler>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkProfile {
    pub latency_ms: u64,
    /// Fraction of `latency_ms` the actual delay may wander by, in `0.0..=1.0`.
    pub deviation: f64,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            deviation: 0.2,
        }
    }
}

impl NetworkProfile {
    /// Delay for one request given a uniform sample `r` in `[0, 1)`.
    pub fn sample_latency(&self, r: f64) -> Duration {
        let base = self.latency_ms as f64;
        let offset = (r - 0.5) * base * self.deviation.clamp(0.0, 1.0);
        Duration::from_micros(((base + offset).max(0.0) * 1000.0).round() as u64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendMessage {
    Started {
        request: SearchRequest,
        latency: Duration,
    },
    Completed {
        request: SearchRequest,
        options: Vec<String>,
    },
}

impl BackendMessage {
    pub fn request(&self) -> &SearchRequest {
        match self {
            BackendMessage::Started { request, .. } | BackendMessage::Completed { request, .. } => {
                request
            }
        }
    }
}
