use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glam::Vec2;

use crate::grid::Direction;

/// Velocity change applied per key press.
pub const STEER_DELTA: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Steer(Direction),
    Regenerate,
    Quit,
}

/// Maps a terminal key event to a game action. Releases are ignored.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        KeyEventKind::Release => return None,
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Action::Steer(Direction::Up)),
        KeyCode::Char('d') | KeyCode::Right => Some(Action::Steer(Direction::Right)),
        KeyCode::Char('s') | KeyCode::Down => Some(Action::Steer(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Left => Some(Action::Steer(Direction::Left)),
        KeyCode::Char('r') => Some(Action::Regenerate),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Velocity change for one press in `direction`. World y grows downwards.
pub fn velocity_delta(direction: Direction) -> Vec2 {
    let (dr, dc) = direction.delta();
    Vec2::new(dc as f32, dr as f32) * STEER_DELTA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_steer() {
        assert_eq!(
            action_for(press(KeyCode::Char('w'))),
            Some(Action::Steer(Direction::Up))
        );
        assert_eq!(
            action_for(press(KeyCode::Char('a'))),
            Some(Action::Steer(Direction::Left))
        );
        assert_eq!(
            action_for(press(KeyCode::Down)),
            Some(Action::Steer(Direction::Down))
        );
        assert_eq!(
            action_for(press(KeyCode::Right)),
            Some(Action::Steer(Direction::Right))
        );
    }

    #[test]
    fn control_keys() {
        assert_eq!(action_for(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action_for(press(KeyCode::Char('r'))), Some(Action::Regenerate));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(action_for(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for(release), None);
    }

    #[test]
    fn deltas_are_five_units_per_axis() {
        assert_eq!(velocity_delta(Direction::Up), Vec2::new(0.0, -5.0));
        assert_eq!(velocity_delta(Direction::Down), Vec2::new(0.0, 5.0));
        assert_eq!(velocity_delta(Direction::Left), Vec2::new(-5.0, 0.0));
        assert_eq!(velocity_delta(Direction::Right), Vec2::new(5.0, 0.0));
    }
}
