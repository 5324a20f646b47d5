use std::future::Future;
use std::pin::Pin;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Where backend work runs. Ports never name a concrete runtime; the tokio-backed
/// implementation lives in `adapters::runtime`.
pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}
