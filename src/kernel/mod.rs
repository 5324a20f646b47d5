//! Headless search core (orchestrator, dispatcher, cache) and its service layer.

pub mod adapter;
pub mod cache;
pub mod limiter;
pub mod orchestrator;
pub mod props;
pub mod services;

pub use adapter::{AsyncTypeahead, TypeaheadWidget};
pub use cache::QueryCache;
pub use limiter::RateLimiter;
pub use orchestrator::{DispatchResult, InputChangeHook, SearchOrchestrator, SearchPhase};
pub use props::{AllowNew, AllowNewFn, SearchProps, TypeaheadProps};
