//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used by the kernel and the lab.
//! - `adapters`: runtime specific implementations (tokio, filesystem).

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{backend_bus, BackendBusReceiver, BackendBusSender};
