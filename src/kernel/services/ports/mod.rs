//! Service ports: traits + data contracts.

pub mod config;
pub mod runtime;
pub mod search;
pub mod settings;

pub use config::SearchConfig;
pub use runtime::{AsyncExecutor, BoxFuture};
pub use search::{BackendMessage, NetworkProfile, SearchHandler, SearchRequest, SharedSearchHandler};
pub use settings::{lab_search_config, NetworkSettings, Settings, SettingsError};
