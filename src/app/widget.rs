//! Single-line typeahead input with a dropdown of options.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::event::{KeyCode, KeyEvent};
use crate::kernel::{AllowNew, TypeaheadProps, TypeaheadWidget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Existing(String),
    Custom(String),
}

impl Selection {
    pub fn label(&self) -> &str {
        match self {
            Selection::Existing(label) | Selection::Custom(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    Ignored,
    Handled,
    TextChanged,
    Selected(Selection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow<'a> {
    Option(&'a str),
    Custom(&'a str),
}

/// Last props handed down by the adapter, owned so the widget outlives the borrow.
#[derive(Debug, Clone, Default)]
struct RenderedProps {
    is_loading: bool,
    min_length: usize,
    empty_label: String,
    allow_new: AllowNew<String>,
    options: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ListTypeahead {
    text: String,
    focused: bool,
    highlighted: Option<usize>,
    menu_dismissed: bool,
    rendered: RenderedProps,
}

impl ListTypeahead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_width(&self) -> usize {
        self.text.width()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Empties the input. Returns whether there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        self.highlighted = None;
        self.menu_dismissed = false;
        had_text
    }

    pub fn is_loading(&self) -> bool {
        self.rendered.is_loading
    }

    pub fn empty_label(&self) -> &str {
        &self.rendered.empty_label
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_menu_visible(&self) -> bool {
        self.focused
            && !self.menu_dismissed
            && self.text.chars().count() >= self.rendered.min_length
    }

    /// Rows of the open menu: every option (no client-side filtering), then the custom
    /// entry row when the typed text may be accepted as new.
    pub fn menu_rows(&self) -> Vec<MenuRow<'_>> {
        let mut rows: Vec<MenuRow<'_>> = self
            .rendered
            .options
            .iter()
            .map(|option| MenuRow::Option(option.as_str()))
            .collect();
        if self.offers_custom_entry() {
            rows.push(MenuRow::Custom(self.text.as_str()));
        }
        rows
    }

    pub fn insert_str(&mut self, s: &str) -> WidgetOutcome {
        let before = self.text.len();
        self.text.extend(s.chars().filter(|ch| !ch.is_control()));
        if self.text.len() == before {
            return WidgetOutcome::Ignored;
        }
        self.on_text_edited();
        WidgetOutcome::TextChanged
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> WidgetOutcome {
        if !key.is_press() {
            return WidgetOutcome::Ignored;
        }

        if let Some(ch) = key.text_char() {
            self.text.push(ch);
            self.on_text_edited();
            return WidgetOutcome::TextChanged;
        }

        match key.code {
            KeyCode::Backspace => self.delete_grapheme(),
            KeyCode::Esc => {
                if self.clear() {
                    WidgetOutcome::TextChanged
                } else {
                    WidgetOutcome::Ignored
                }
            }
            KeyCode::Down => self.move_highlight(1),
            KeyCode::Up => self.move_highlight(-1),
            KeyCode::Enter => self.select_highlighted(),
            _ => WidgetOutcome::Ignored,
        }
    }

    fn offers_custom_entry(&self) -> bool {
        !self.text.is_empty()
            && !self.rendered.options.iter().any(|option| option == &self.text)
            && self
                .rendered
                .allow_new
                .allows(&self.rendered.options, &self.text)
    }

    fn on_text_edited(&mut self) {
        self.highlighted = None;
        self.menu_dismissed = false;
    }

    fn delete_grapheme(&mut self) -> WidgetOutcome {
        let Some((idx, _)) = self.text.grapheme_indices(true).next_back() else {
            return WidgetOutcome::Ignored;
        };
        self.text.truncate(idx);
        self.on_text_edited();
        WidgetOutcome::TextChanged
    }

    fn move_highlight(&mut self, delta: isize) -> WidgetOutcome {
        if !self.is_menu_visible() {
            return WidgetOutcome::Ignored;
        }
        let rows = self.menu_rows().len();
        if rows == 0 {
            return WidgetOutcome::Ignored;
        }
        self.highlighted = match (self.highlighted, delta.is_negative()) {
            (None, false) => Some(0),
            (None, true) => None,
            (Some(0), true) => None,
            (Some(i), true) => Some(i - 1),
            (Some(i), false) => Some((i + 1).min(rows - 1)),
        };
        WidgetOutcome::Handled
    }

    fn select_highlighted(&mut self) -> WidgetOutcome {
        if !self.is_menu_visible() {
            return WidgetOutcome::Ignored;
        }
        let rows = self.menu_rows();
        let selection = match self.highlighted.and_then(|i| rows.get(i).copied()) {
            Some(MenuRow::Option(label)) => Selection::Existing(label.to_string()),
            Some(MenuRow::Custom(label)) => Selection::Custom(label.to_string()),
            None if self.offers_custom_entry() => Selection::Custom(self.text.clone()),
            None => return WidgetOutcome::Ignored,
        };

        self.text = selection.label().to_string();
        self.highlighted = None;
        self.menu_dismissed = true;
        WidgetOutcome::Selected(selection)
    }
}

impl TypeaheadWidget<String> for ListTypeahead {
    fn render_props(&mut self, props: TypeaheadProps<'_, String>) {
        self.rendered = RenderedProps {
            is_loading: props.is_loading,
            min_length: props.min_length,
            empty_label: props.empty_label.to_string(),
            allow_new: props.allow_new,
            options: props.options.to_vec(),
        };

        let rows = self.menu_rows().len();
        self.highlighted = self.highlighted.filter(|&i| i < rows);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/widget.rs"]
mod tests;
