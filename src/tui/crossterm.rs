use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Converts a crossterm event. Mouse input has no meaning in the lab and maps to `None`.
pub fn into_input_event(event: crossterm::event::Event) -> Option<InputEvent> {
    match event {
        crossterm::event::Event::Key(key) => Some(InputEvent::Key(into_key_event(key))),
        crossterm::event::Event::Mouse(_) => None,
        crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        crossterm::event::Event::FocusGained => Some(InputEvent::FocusGained),
        crossterm::event::Event::FocusLost => Some(InputEvent::FocusLost),
        crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
    }
}

pub fn into_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    let mut modifiers = into_key_modifiers(event.modifiers);
    let code = into_key_code(event.code, &mut modifiers);
    KeyEvent {
        code,
        modifiers,
        kind: into_key_event_kind(event.kind),
    }
}

fn into_key_event_kind(kind: crossterm::event::KeyEventKind) -> KeyEventKind {
    match kind {
        crossterm::event::KeyEventKind::Press => KeyEventKind::Press,
        crossterm::event::KeyEventKind::Release => KeyEventKind::Release,
        crossterm::event::KeyEventKind::Repeat => KeyEventKind::Repeat,
    }
}

fn into_key_modifiers(mods: crossterm::event::KeyModifiers) -> KeyModifiers {
    use crossterm::event::KeyModifiers as Ct;

    [
        (Ct::SHIFT, KeyModifiers::SHIFT),
        (Ct::CONTROL, KeyModifiers::CONTROL),
        (Ct::ALT, KeyModifiers::ALT),
        (Ct::SUPER, KeyModifiers::SUPER),
    ]
    .into_iter()
    .filter(|(ct, _)| mods.contains(*ct))
    .fold(KeyModifiers::NONE, |acc, (_, ours)| acc | ours)
}

fn into_key_code(code: crossterm::event::KeyCode, modifiers: &mut KeyModifiers) -> KeyCode {
    use crossterm::event::KeyCode as Ct;

    match code {
        Ct::Char(ch) => KeyCode::Char(ch),
        Ct::Enter => KeyCode::Enter,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Esc => KeyCode::Esc,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Delete => KeyCode::Delete,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::F(n) => KeyCode::F(n),
        // Some terminals report Ctrl+Space as NUL.
        Ct::Null => {
            *modifiers |= KeyModifiers::CONTROL;
            KeyCode::Char(' ')
        }
        _ => KeyCode::Unknown,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
