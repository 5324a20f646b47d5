//! typeahead-lab: asynchronous typeahead search orchestration and a latency lab to
//! exercise it.
//!
//! Modules:
//! - core: terminal-independent input events
//! - kernel: search orchestrator, rate limiter, result cache, display adapter; ports and
//!   adapters for the simulated backend, settings and async runtime
//! - app: the lab (sliders, typeahead widget, log pane)
//! - tui: crossterm/ratatui glue (feature `tui`)

pub mod app;
pub mod core;
pub mod kernel;
#[cfg(feature = "tui")]
pub mod tui;
