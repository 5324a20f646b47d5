//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod runtime;
pub mod settings;
pub mod simulator;

pub use runtime::{AsyncRuntime, TokioExecutor};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from,
};
pub use simulator::{simulated_options, SimulatedBackend, OPTIONS_PER_QUERY};
