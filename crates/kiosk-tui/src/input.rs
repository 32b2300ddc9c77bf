use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;

/// Map a crossterm terminal event to a TUI action.
pub fn map_event(event: &Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits, no confirmation
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::ForceQuit;
            }
            map_key(key)
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('x') => Action::Close,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('d') => Action::ToggleDevice,
        KeyCode::Char('c') => Action::OpenCalendar,
        KeyCode::Char('<') | KeyCode::PageUp => Action::PrevMonth,
        KeyCode::Char('>') | KeyCode::PageDown => Action::NextMonth,
        KeyCode::Char('v') => Action::ToggleVersus,
        KeyCode::Char('o') => Action::ToggleControls,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchSide,
        KeyCode::Char('[') => Action::PrevSite,
        KeyCode::Char(']') => Action::NextSite,
        KeyCode::Char('s') => Action::ToggleSourcesBar,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char(c @ '1'..='9') => Action::ToggleSource(c as usize - '1' as usize),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_c_force_quits() {
        let evt = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_event(&evt), Action::ForceQuit);
    }

    #[test]
    fn plain_c_opens_calendar() {
        let evt = press(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(map_event(&evt), Action::OpenCalendar);
    }

    #[test]
    fn digits_toggle_sources_zero_based() {
        assert_eq!(
            map_event(&press(KeyCode::Char('1'), KeyModifiers::NONE)),
            Action::ToggleSource(0)
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('9'), KeyModifiers::NONE)),
            Action::ToggleSource(8)
        );
    }

    #[test]
    fn left_click_carries_position() {
        let evt = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&evt), Action::ClickAt(12, 4));
    }
}
