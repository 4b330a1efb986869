use crate::geometry::Direction;

/// Keys the game reacts to on key down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Pause,
    Escape,
}

/// Abstract event vocabulary. Concrete devices are translated into this by an [`InputSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Direction),
}

pub trait InputSource {
    /// Drains every event that is already pending without blocking.
    fn poll_events(&mut self) -> anyhow::Result<Vec<InputEvent>>;

    /// Blocks until the next event arrives.
    fn wait_event(&mut self) -> anyhow::Result<InputEvent>;
}

/// Held movement keys in press order, plus the key released last.
///
/// The effective direction is the most recently pressed key that is still
/// held. Once nothing is held the snake keeps going the way of the last
/// released key.
#[derive(Clone, Debug)]
pub struct InputBuffer {
    held: Vec<Direction>,
    last_released: Direction,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer { held: vec![], last_released: Direction::Up }
    }

    pub fn on_press(&mut self, dir: Direction) {
        // Repeats are not new presses
        if !self.held.contains(&dir) {
            self.held.push(dir);
        }
    }

    pub fn on_release(&mut self, dir: Direction) {
        let pos = match self.held.iter().position(|d| *d == dir) {
            Some(pos) => pos,
            None => return,
        };

        self.held.remove(pos);
        if self.held.is_empty() {
            self.last_released = dir;
        }
    }

    pub fn effective_direction(&self) -> Direction {
        self.held.last().copied().unwrap_or(self.last_released)
    }

    pub fn held(&self) -> &[Direction] {
        &self.held
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn defaults_to_up() {
        assert_eq!(InputBuffer::new().effective_direction(), Up);
    }

    #[test]
    fn latest_held_key_wins() {
        let mut input = InputBuffer::new();
        input.on_press(Left);
        input.on_press(Down);
        assert_eq!(input.effective_direction(), Down);
    }

    #[test]
    fn releasing_newest_key_falls_back_to_remaining_held_key() {
        let mut input = InputBuffer::new();
        input.on_press(Up);
        input.on_press(Right);
        input.on_release(Right);
        assert_eq!(input.effective_direction(), Up);
        assert_eq!(input.held(), &[Up]);
    }

    #[test]
    fn releasing_older_key_keeps_newest() {
        let mut input = InputBuffer::new();
        input.on_press(Left);
        input.on_press(Down);
        input.on_release(Left);
        assert_eq!(input.effective_direction(), Down);
    }

    #[test]
    fn last_released_key_is_sticky() {
        let mut input = InputBuffer::new();
        input.on_press(Right);
        input.on_release(Right);
        for _ in 0..3 {
            assert_eq!(input.effective_direction(), Right);
        }

        input.on_press(Up);
        input.on_release(Up);
        assert_eq!(input.effective_direction(), Up);
    }

    #[test]
    fn last_released_only_updates_when_buffer_empties() {
        let mut input = InputBuffer::new();
        input.on_press(Left);
        input.on_press(Down);
        input.on_release(Down);
        input.on_release(Left);
        assert_eq!(input.effective_direction(), Left);
    }

    #[test]
    fn unexpected_release_is_ignored() {
        let mut input = InputBuffer::new();
        input.on_press(Left);
        input.on_release(Left);
        input.on_release(Down);
        assert_eq!(input.effective_direction(), Left);
        assert!(input.held().is_empty());
    }

    #[test]
    fn repeated_press_is_not_duplicated() {
        let mut input = InputBuffer::new();
        input.on_press(Down);
        input.on_press(Down);
        input.on_release(Down);
        assert!(input.held().is_empty());
        assert_eq!(input.effective_direction(), Down);
    }

    #[test]
    fn reversal_is_not_filtered() {
        let mut input = InputBuffer::new();
        input.on_press(Down);
        assert_eq!(input.effective_direction(), Down);
    }
}
