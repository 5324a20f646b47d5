use super::*;
use crate::core::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::kernel::services::backend_bus;
use crate::kernel::services::ports::{BackendMessage, SearchRequest};
use crate::kernel::services::BackendBusSender;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct Harness {
    lab: LatencyLab,
    bus: BackendBusSender,
    requests: Arc<Mutex<Vec<SearchRequest>>>,
    profiles: Arc<Mutex<Vec<NetworkProfile>>>,
}

impl Harness {
    fn new(settings: Settings, log_rx: Option<Receiver<String>>) -> Self {
        let (bus, rx) = backend_bus();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let profiles = Arc::new(Mutex::new(Vec::new()));

        let factory: BackendFactory = {
            let requests = requests.clone();
            let profiles = profiles.clone();
            let bus = bus.clone();
            Box::new(move |profile| {
                profiles.lock().unwrap().push(profile);
                let requests = requests.clone();
                let bus = bus.clone();
                let handler: SharedSearchHandler = Arc::new(move |request: &SearchRequest| {
                    requests.lock().unwrap().push(request.clone());
                    let _ = bus.send(BackendMessage::Started {
                        request: request.clone(),
                        latency: Duration::ZERO,
                    });
                });
                handler
            })
        };

        Self {
            lab: LatencyLab::new(&settings, factory, rx, log_rx),
            bus,
            requests,
            profiles,
        }
    }

    fn key(&mut self, code: KeyCode, now: Instant) -> bool {
        self.lab
            .handle_input(InputEvent::Key(KeyEvent::simple(code)), now)
    }

    fn type_str(&mut self, text: &str, now: Instant) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch), now);
        }
    }

    fn queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.query.clone())
            .collect()
    }

    fn complete(&self, id: u64) {
        let request = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap();
        let options = vec![format!("{}-result", request.query)];
        self.bus
            .send(BackendMessage::Completed { request, options })
            .unwrap();
    }

    fn rendered_options(&self) -> Vec<String> {
        self.lab
            .typeahead()
            .widget()
            .menu_rows()
            .into_iter()
            .filter_map(|row| match row {
                crate::app::widget::MenuRow::Option(label) => Some(label.to_string()),
                crate::app::widget::MenuRow::Custom(_) => None,
            })
            .collect()
    }
}

fn harness() -> Harness {
    Harness::new(Settings::default(), None)
}

#[test]
fn focus_cycles_through_controls() {
    let mut h = harness();
    let t0 = Instant::now();
    assert_eq!(h.lab.focus(), LabFocus::Search);
    assert!(h.lab.typeahead().widget().is_focused());

    h.key(KeyCode::Tab, t0);
    assert_eq!(h.lab.focus(), LabFocus::Latency);
    assert!(!h.lab.typeahead().widget().is_focused());

    h.key(KeyCode::BackTab, t0);
    h.key(KeyCode::BackTab, t0);
    assert_eq!(h.lab.focus(), LabFocus::Cache);
}

#[test]
fn typing_dispatches_and_completion_fills_menu() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    assert_eq!(h.queries(), vec!["a"]);

    assert!(h.lab.tick(t0));
    assert!(h.lab.is_loading());
    assert!(h.lab.typeahead().widget().is_loading());

    h.complete(1);
    assert!(h.lab.tick(t0));
    assert!(!h.lab.is_loading());
    assert_eq!(h.lab.options(), ["a-result".to_string()]);
    assert_eq!(h.rendered_options(), vec!["a-result"]);
}

#[test]
fn trailing_keystroke_dispatches_at_window_end() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    h.type_str("b", t0 + Duration::from_millis(5));
    assert_eq!(h.queries(), vec!["a"]);
    assert!(h.lab.next_deadline().is_some());

    h.lab.tick(t0 + Duration::from_millis(20));
    assert_eq!(h.queries(), vec!["a", "ab"]);
}

#[test]
fn stale_response_is_dropped() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    h.type_str("b", t0 + Duration::from_millis(5));
    h.lab.tick(t0 + Duration::from_millis(20));
    assert_eq!(h.queries(), vec!["a", "ab"]);

    h.complete(2);
    h.complete(1);
    h.lab.tick(t0 + Duration::from_millis(30));

    assert!(!h.lab.is_loading());
    assert_eq!(h.lab.options(), ["ab-result".to_string()]);
}

#[test]
fn cache_toggle_answers_repeat_queries_locally() {
    let mut h = harness();
    let t0 = Instant::now();

    h.key(KeyCode::BackTab, t0);
    assert_eq!(h.lab.focus(), LabFocus::Cache);
    h.key(KeyCode::Char(' '), t0);
    assert!(h.lab.use_cache());
    assert!(h.lab.typeahead().orchestrator().config().use_cache);
    h.key(KeyCode::Tab, t0);

    h.type_str("a", t0);
    h.lab.tick(t0);
    h.complete(1);
    h.lab.tick(t0);
    assert_eq!(
        h.lab.typeahead().orchestrator().cache().get("a"),
        Some(&["a-result".to_string()][..])
    );

    let later = t0 + Duration::from_millis(100);
    h.key(KeyCode::Esc, later);
    h.type_str("a", later);
    h.lab.tick(later);

    assert_eq!(h.queries(), vec!["a"]);
    assert_eq!(h.rendered_options(), vec!["a-result"]);
}

#[test]
fn without_cache_repeat_queries_search_again() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    h.lab.tick(t0);
    h.complete(1);
    h.lab.tick(t0);

    let later = t0 + Duration::from_millis(100);
    h.key(KeyCode::Esc, later);
    h.type_str("a", later);
    assert_eq!(h.queries(), vec!["a", "a"]);
}

#[test]
fn network_sliders_rebuild_the_backend() {
    let mut h = harness();
    let t0 = Instant::now();
    assert_eq!(h.profiles.lock().unwrap().len(), 1);

    h.key(KeyCode::Tab, t0);
    assert!(h.key(KeyCode::Right, t0));
    assert_eq!(h.lab.latency().value(), 60);

    h.key(KeyCode::Tab, t0);
    h.key(KeyCode::Left, t0);
    assert_eq!(h.lab.deviation().value(), 15);

    let profiles = h.profiles.lock().unwrap();
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[1].latency_ms, 60);
    assert!((profiles[2].deviation - 0.15).abs() < 1e-9);
}

#[test]
fn slider_at_bound_does_not_rebuild() {
    let mut settings = Settings::default();
    settings.network.latency_ms = 0;
    let mut h = Harness::new(settings, None);
    let t0 = Instant::now();

    h.key(KeyCode::Tab, t0);
    assert!(!h.key(KeyCode::Left, t0));
    assert_eq!(h.profiles.lock().unwrap().len(), 1);
}

#[test]
fn throttle_slider_updates_config_and_drops_pending() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    h.type_str("b", t0 + Duration::from_millis(5));
    assert!(h.lab.next_deadline().is_some());

    h.key(KeyCode::BackTab, t0);
    h.key(KeyCode::BackTab, t0);
    assert_eq!(h.lab.focus(), LabFocus::Throttle);
    h.key(KeyCode::Right, t0 + Duration::from_millis(6));

    assert_eq!(h.lab.typeahead().orchestrator().config().throttle_ms, 30);
    assert_eq!(h.lab.next_deadline(), None);
    h.lab.tick(t0 + Duration::from_millis(100));
    assert_eq!(h.queries(), vec!["a"]);
}

#[test]
fn q_types_in_search_but_quits_elsewhere() {
    let mut h = harness();
    let t0 = Instant::now();

    h.key(KeyCode::Char('q'), t0);
    assert!(!h.lab.should_quit());
    assert_eq!(h.lab.typeahead().widget().text(), "q");

    h.key(KeyCode::Tab, t0);
    h.key(KeyCode::Char('q'), t0);
    assert!(h.lab.should_quit());
}

#[test]
fn ctrl_c_quits_from_search() {
    let mut h = harness();
    let event = InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(h.lab.handle_input(event, Instant::now()));
    assert!(h.lab.should_quit());
}

#[test]
fn paste_into_search_dispatches() {
    let mut h = harness();
    h.lab
        .handle_input(InputEvent::Paste("hello".to_string()), Instant::now());
    assert_eq!(h.queries(), vec!["hello"]);
}

fn last_request_id(h: &Harness) -> u64 {
    h.requests.lock().unwrap().last().map(|r| r.id).unwrap()
}

#[test]
fn enter_accepts_typed_text_when_idle() {
    let mut h = harness();
    let t0 = Instant::now();
    let settled = t0 + Duration::from_millis(50);

    h.type_str("zz", t0);
    h.lab.tick(settled);
    assert_eq!(h.queries(), vec!["z", "zz"]);
    h.complete(last_request_id(&h));
    h.lab.tick(settled);
    assert!(!h.lab.is_loading());

    h.key(KeyCode::Enter, settled);
    assert_eq!(
        h.lab.selection(),
        Some(&crate::app::widget::Selection::Custom("zz".to_string()))
    );
}

#[test]
fn enter_cannot_add_new_entry_while_loading() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("zz", t0);
    h.lab.tick(t0 + Duration::from_millis(50));
    assert!(h.lab.is_loading());

    assert!(!h.key(KeyCode::Enter, t0 + Duration::from_millis(50)));
    assert_eq!(h.lab.selection(), None);
}

#[test]
fn log_pane_keeps_latest_lines() {
    let (tx, rx) = mpsc::channel();
    let mut h = Harness::new(Settings::default(), Some(rx));
    for i in 0..250 {
        tx.send(format!("line {i}")).unwrap();
    }

    assert!(h.lab.tick(Instant::now()));
    assert_eq!(h.lab.logs().len(), 200);
    assert_eq!(h.lab.logs().front().map(String::as_str), Some("line 50"));
    assert_eq!(h.lab.logs().back().map(String::as_str), Some("line 249"));
}

#[test]
fn teardown_ignores_late_traffic() {
    let mut h = harness();
    let t0 = Instant::now();

    h.type_str("a", t0);
    h.type_str("b", t0 + Duration::from_millis(5));
    h.lab.teardown();

    h.lab.tick(t0 + Duration::from_millis(100));
    assert_eq!(h.queries(), vec!["a"]);
    assert!(!h.lab.is_loading());

    h.type_str("c", t0 + Duration::from_millis(200));
    assert_eq!(h.queries(), vec!["a"]);
}
