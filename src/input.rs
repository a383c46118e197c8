use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::components::Dir;

/// How long a key press keeps steering after the last press/repeat event.
/// Turns only happen at nodes, so this is longer than a key-repeat gap.
pub const INPUT_HOLD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Start,
    Pause,
    Quit,
}

pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('p') => Some(Command::Pause),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(Dir::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(Dir::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(Dir::Right)),
        _ => None,
    }
}

/// Terminals only report presses and repeats, so a direction counts as held
/// while its last event is younger than `hold`.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    last_pressed: Option<Dir>,
    hold: Duration,
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(INPUT_HOLD)
    }
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            last_pressed: None,
            hold,
        }
    }

    pub fn press(&mut self, dir: Dir, now: Instant) {
        self.last_seen[dir.index()] = Some(now);
        self.last_pressed = Some(dir);
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
        self.last_pressed = None;
    }

    /// The most recently pressed direction that is still held.
    pub fn active(&self, now: Instant) -> Option<Dir> {
        let fresh = |t: Instant| now.saturating_duration_since(t) <= self.hold;
        if let Some(dir) = self.last_pressed {
            if self.last_seen[dir.index()].is_some_and(fresh) {
                return Some(dir);
            }
        }
        let mut best: Option<(Dir, Instant)> = None;
        for dir in Dir::ALL {
            if let Some(t) = self.last_seen[dir.index()].filter(|t| fresh(*t)) {
                match best {
                    Some((_, bt)) if t <= bt => {}
                    _ => best = Some((dir, t)),
                }
            }
        }
        best.map(|(dir, _)| dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arrows_and_vi_keys() {
        assert_eq!(command_for(KeyCode::Left), Some(Command::Move(Dir::Left)));
        assert_eq!(command_for(KeyCode::Char('k')), Some(Command::Move(Dir::Up)));
        assert_eq!(command_for(KeyCode::Char(' ')), Some(Command::Start));
        assert_eq!(command_for(KeyCode::Char('p')), Some(Command::Pause));
        assert_eq!(command_for(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn latest_press_wins_while_held() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(Duration::from_millis(100));
        keys.press(Dir::Up, t0);
        keys.press(Dir::Left, t0 + Duration::from_millis(20));
        assert_eq!(keys.active(t0 + Duration::from_millis(50)), Some(Dir::Left));
    }

    #[test]
    fn falls_back_to_other_held_key() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(Duration::from_millis(100));
        keys.press(Dir::Left, t0);
        keys.press(Dir::Up, t0 + Duration::from_millis(80));
        keys.press(Dir::Down, t0);
        // Down was pressed last but its event is stale; Up is the freshest held key.
        assert_eq!(keys.active(t0 + Duration::from_millis(150)), Some(Dir::Up));
    }

    #[test]
    fn releases_after_hold() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(Duration::from_millis(100));
        keys.press(Dir::Right, t0);
        assert_eq!(keys.active(t0 + Duration::from_millis(101)), None);
        keys.press(Dir::Right, t0);
        keys.clear();
        assert_eq!(keys.active(t0), None);
    }
}
