use super::*;
use crate::core::event::KeyModifiers;

fn props<'a>(
    options: &'a [String],
    allow_new: AllowNew<String>,
    is_loading: bool,
) -> TypeaheadProps<'a, String> {
    TypeaheadProps {
        is_loading,
        min_length: 1,
        empty_label: "No matches found.",
        allow_new,
        options,
    }
}

fn typed(text: &str) -> ListTypeahead {
    let mut widget = ListTypeahead::new();
    widget.focus();
    widget.insert_str(text);
    widget
}

fn press(widget: &mut ListTypeahead, code: KeyCode) -> WidgetOutcome {
    widget.handle_key(&KeyEvent::simple(code))
}

#[test]
fn typing_and_backspace_edit_by_grapheme() {
    let mut widget = typed("ne");
    assert_eq!(press(&mut widget, KeyCode::Char('e')), WidgetOutcome::TextChanged);
    widget.insert_str("\u{301}");
    assert_eq!(widget.text(), "nee\u{301}");

    assert_eq!(press(&mut widget, KeyCode::Backspace), WidgetOutcome::TextChanged);
    assert_eq!(widget.text(), "ne");
}

#[test]
fn backspace_on_empty_input_is_ignored() {
    let mut widget = typed("");
    assert_eq!(press(&mut widget, KeyCode::Backspace), WidgetOutcome::Ignored);
}

#[test]
fn control_chords_are_not_text() {
    let mut widget = typed("a");
    let outcome = widget.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(outcome, WidgetOutcome::Ignored);
    assert_eq!(widget.text(), "a");
}

#[test]
fn paste_strips_control_characters() {
    let mut widget = typed("");
    assert_eq!(widget.insert_str("ab\ncd"), WidgetOutcome::TextChanged);
    assert_eq!(widget.text(), "abcd");
    assert_eq!(widget.insert_str("\n"), WidgetOutcome::Ignored);
}

#[test]
fn menu_opens_at_min_length_when_focused() {
    let mut widget = ListTypeahead::new();
    widget.render_props(props(&[], AllowNew::Flag(false), false));
    assert!(!widget.is_menu_visible());

    widget.focus();
    assert!(!widget.is_menu_visible());
    widget.insert_str("a");
    assert!(widget.is_menu_visible());

    widget.blur();
    assert!(!widget.is_menu_visible());
}

#[test]
fn enter_selects_highlighted_option_and_closes_menu() {
    let options = vec!["a-option-0".to_string(), "a-option-1".to_string()];
    let mut widget = typed("a");
    widget.render_props(props(&options, AllowNew::Flag(false), false));

    press(&mut widget, KeyCode::Down);
    press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted(), Some(1));
    press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted(), Some(1));

    assert_eq!(
        press(&mut widget, KeyCode::Enter),
        WidgetOutcome::Selected(Selection::Existing("a-option-1".to_string()))
    );
    assert_eq!(widget.text(), "a-option-1");
    assert!(!widget.is_menu_visible());
}

#[test]
fn up_from_first_row_clears_highlight() {
    let options = vec!["x".to_string()];
    let mut widget = typed("a");
    widget.render_props(props(&options, AllowNew::Flag(false), false));

    press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted(), Some(0));
    press(&mut widget, KeyCode::Up);
    assert_eq!(widget.highlighted(), None);
}

#[test]
fn enter_without_highlight_accepts_custom_text_when_allowed() {
    let options = vec!["ab-option-0".to_string()];
    let mut widget = typed("ab");
    widget.render_props(props(&options, AllowNew::Flag(true), false));

    assert_eq!(
        widget.menu_rows(),
        vec![MenuRow::Option("ab-option-0"), MenuRow::Custom("ab")]
    );
    assert_eq!(
        press(&mut widget, KeyCode::Enter),
        WidgetOutcome::Selected(Selection::Custom("ab".to_string()))
    );
}

#[test]
fn custom_entry_hidden_when_disallowed_or_exact_match() {
    let options = vec!["ab".to_string()];
    let mut widget = typed("ab");

    widget.render_props(props(&options, AllowNew::Flag(false), false));
    assert_eq!(widget.menu_rows(), vec![MenuRow::Option("ab")]);

    widget.render_props(props(&options, AllowNew::Flag(true), false));
    assert_eq!(widget.menu_rows(), vec![MenuRow::Option("ab")]);

    widget.render_props(props(&[], AllowNew::Flag(false), false));
    assert_eq!(press(&mut widget, KeyCode::Enter), WidgetOutcome::Ignored);
}

#[test]
fn render_clamps_stale_highlight() {
    let options = vec!["a".to_string(), "b".to_string()];
    let mut widget = typed("q");
    widget.render_props(props(&options, AllowNew::Flag(false), false));
    press(&mut widget, KeyCode::Down);
    press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted(), Some(1));

    widget.render_props(props(&options[..1], AllowNew::Flag(false), true));
    assert_eq!(widget.highlighted(), None);
    assert!(widget.is_loading());
    assert_eq!(widget.empty_label(), "No matches found.");
}

#[test]
fn esc_clears_text() {
    let mut widget = typed("abc");
    assert_eq!(press(&mut widget, KeyCode::Esc), WidgetOutcome::TextChanged);
    assert_eq!(widget.text(), "");
    assert_eq!(press(&mut widget, KeyCode::Esc), WidgetOutcome::Ignored);
}

#[test]
fn width_counts_wide_chars() {
    let widget = typed("日本");
    assert_eq!(widget.text_width(), 4);
}
