//! Framework-level types shared by the kernel and the frontends.

pub mod event;

pub use event::{InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
