//! The latency lab: a terminal harness around the async typeahead.

mod lab;
pub mod slider;
pub mod widget;

pub use lab::{BackendFactory, LabFocus, LatencyLab};
pub use slider::Slider;
pub use widget::{ListTypeahead, MenuRow, Selection, WidgetOutcome};
