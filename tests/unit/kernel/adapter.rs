use super::*;
use crate::kernel::props::AllowNew;
use crate::kernel::services::ports::{SearchConfig, SearchRequest, SharedSearchHandler};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct SnapshotWidget {
    renders: usize,
    is_loading: bool,
    min_length: usize,
    empty_label: String,
    allow_new: bool,
    options: Vec<String>,
    focused: bool,
}

impl SnapshotWidget {
    fn focus(&mut self) {
        self.focused = true;
    }
}

impl TypeaheadWidget<String> for SnapshotWidget {
    fn render_props(&mut self, props: TypeaheadProps<'_, String>) {
        self.renders += 1;
        self.is_loading = props.is_loading;
        self.min_length = props.min_length;
        self.empty_label = props.empty_label.to_string();
        self.allow_new = props.allow_new.allows(props.options, "");
        self.options = props.options.to_vec();
    }
}

fn typeahead() -> (AsyncTypeahead<SnapshotWidget, String>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler: SharedSearchHandler = Arc::new(move |request: &SearchRequest| {
        sink.lock().unwrap().push(request.query.clone());
    });
    let config = SearchConfig {
        min_length: 1,
        delay_ms: 0,
        throttle_ms: 0,
        ..SearchConfig::default()
    };
    let orchestrator: SearchOrchestrator<String> = SearchOrchestrator::new(config)
        .with_handler(handler)
        .with_allow_new(AllowNew::Flag(true));
    (
        AsyncTypeahead::new(SnapshotWidget::default(), orchestrator),
        seen,
    )
}

#[test]
fn render_forwards_derived_props() {
    let (mut typeahead, _seen) = typeahead();

    typeahead.render();
    let widget = typeahead.widget();
    assert_eq!(widget.renders, 1);
    assert_eq!(widget.empty_label, "Type to search...");
    assert_eq!(widget.min_length, 1);
    assert!(widget.allow_new);
    assert!(widget.options.is_empty());
}

#[test]
fn input_flows_through_to_search_and_back() {
    let (mut typeahead, seen) = typeahead();
    let now = Instant::now();

    let result = typeahead.handle_input_change("ab", &(), now);
    assert_eq!(result.searches.len(), 1);
    assert_eq!(&*seen.lock().unwrap(), &["ab".to_string()]);

    typeahead.set_props(SearchProps {
        is_loading: true,
        options: Vec::new(),
    });
    typeahead.render();
    assert!(typeahead.widget().is_loading);
    assert!(!typeahead.widget().allow_new);
    assert_eq!(typeahead.widget().empty_label, "Searching...");

    typeahead.set_props(SearchProps {
        is_loading: false,
        options: vec!["ab-option-0".to_string()],
    });
    typeahead.render();
    assert_eq!(typeahead.widget().options, vec!["ab-option-0".to_string()]);
    assert!(typeahead.orchestrator().cache().contains("ab"));
}

#[test]
fn widget_handle_stays_reachable() {
    let (mut typeahead, _seen) = typeahead();

    typeahead.widget_mut().focus();
    typeahead.render();

    assert!(typeahead.widget().focused);
    assert_eq!(typeahead.widget().renders, 1);
}

#[test]
fn teardown_stops_dispatching() {
    let (mut typeahead, seen) = typeahead();

    typeahead.teardown();
    let result = typeahead.handle_input_change("abc", &(), Instant::now());

    assert!(result.searches.is_empty());
    assert!(seen.lock().unwrap().is_empty());
    assert!(typeahead.orchestrator().is_torn_down());
}
