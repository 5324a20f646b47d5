use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph};
use ratatui::Frame;

use super::{LabFocus, LatencyLab};
use crate::app::slider::Slider;
use crate::app::widget::MenuRow;

const TITLE: &str = "Typeahead latency tester";
const PLACEHOLDER: &str = "Loading...";
const MENU_MAX_ROWS: u16 = 8;

const FOCUS_FG: Color = Color::Cyan;
const MUTED_FG: Color = Color::DarkGray;
const HIGHLIGHT_BG: Color = Color::Blue;

impl LatencyLab {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let menu_height = if self.typeahead.widget().is_menu_visible() {
            let rows = self.typeahead.widget().menu_rows().len().max(1) as u16;
            rows.min(MENU_MAX_ROWS) + 2
        } else {
            0
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(menu_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
            rows[0],
        );
        self.render_slider(frame, rows[1], &self.latency, LabFocus::Latency);
        self.render_slider(frame, rows[2], &self.deviation, LabFocus::Deviation);
        self.render_slider(frame, rows[3], &self.throttle, LabFocus::Throttle);
        self.render_cache_toggle(frame, rows[4]);
        self.render_input(frame, rows[5]);
        if menu_height > 0 {
            self.render_menu(frame, rows[6]);
        }
        self.render_logs(frame, rows[7]);
        self.render_status(frame, rows[8]);
    }

    fn focus_style(&self, target: LabFocus) -> Style {
        if self.focus == target {
            Style::default().fg(FOCUS_FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    fn render_slider(&self, frame: &mut Frame, area: Rect, slider: &Slider, target: LabFocus) {
        let gauge = LineGauge::default()
            .label(Span::styled(slider.caption(), self.focus_style(target)))
            .ratio(slider.ratio())
            .line_set(symbols::line::THICK)
            .filled_style(Style::default().fg(FOCUS_FG))
            .unfilled_style(Style::default().fg(MUTED_FG));
        frame.render_widget(gauge, area);
    }

    fn render_cache_toggle(&self, frame: &mut Frame, area: Rect) {
        let mark = if self.use_cache { "[x]" } else { "[ ]" };
        let line = Line::from(Span::styled(
            format!("{mark} Use Cache"),
            self.focus_style(LabFocus::Cache),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let widget = self.typeahead.widget();
        let border = if self.focus == LabFocus::Search {
            Style::default().fg(FOCUS_FG)
        } else {
            Style::default().fg(MUTED_FG)
        };
        let title = if widget.is_loading() { " Search (loading) " } else { " Search " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        let inner = block.inner(area);

        let content = if widget.text().is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(MUTED_FG))
        } else {
            Span::raw(widget.text())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if self.focus == LabFocus::Search && inner.width > 0 && inner.height > 0 {
            let offset = (widget.text_width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
        }
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let widget = self.typeahead.widget();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED_FG));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let menu_rows = widget.menu_rows();
        if menu_rows.is_empty() {
            let label = Span::styled(widget.empty_label(), Style::default().fg(MUTED_FG));
            frame.render_widget(Paragraph::new(label), inner);
            return;
        }

        let visible = inner.height as usize;
        let start = widget
            .highlighted()
            .map(|i| (i + 1).saturating_sub(visible))
            .unwrap_or(0);

        let lines: Vec<Line> = menu_rows
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, row)| {
                let style = if widget.highlighted() == Some(i) {
                    Style::default().bg(HIGHLIGHT_BG).fg(Color::White)
                } else {
                    Style::default()
                };
                let text = match row {
                    MenuRow::Option(label) => label.to_string(),
                    MenuRow::Custom(label) => format!("New selection: {label}"),
                };
                Line::from(Span::styled(text, style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED_FG))
            .title(" Log ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.logs.is_empty() {
            let msg = Span::styled("No logs yet", Style::default().fg(MUTED_FG));
            frame.render_widget(Paragraph::new(msg), inner);
            return;
        }

        let height = inner.height as usize;
        let lines: Vec<Line> = self
            .logs
            .iter()
            .skip(self.logs.len().saturating_sub(height))
            .map(|line| Line::raw(line.as_str()))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let selected = self
            .selection
            .as_ref()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let text = format!(
            "Tab/Shift+Tab focus | Left/Right adjust | Space toggle | Esc clear | q/Ctrl+C quit | selected: {selected}"
        );
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(MUTED_FG))),
            area,
        );
    }
}
