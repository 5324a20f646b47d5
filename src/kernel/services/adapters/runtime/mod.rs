//! Async runtime adapter: runs backend futures off the UI thread.

mod async_runtime;

pub use async_runtime::{AsyncRuntime, TokioExecutor};
