//! Terminal frontend glue (crossterm + ratatui).
//!
//! Kept apart from `kernel` so the search core builds without any terminal crates.

pub mod crossterm;
pub mod terminal_guard;
