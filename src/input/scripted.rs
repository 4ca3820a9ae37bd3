//! Scripted input backend: replays a fixed sequence of snapshots.
//!
//! Useful for tests and demos; once the script runs out it keeps returning
//! the final snapshot (or a neutral one for an empty script).

use std::collections::VecDeque;

use crate::input::InputBackend;
use crate::types::InputSnapshot;

#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
    last: InputSnapshot,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            last: InputSnapshot::default(),
        }
    }
}

impl InputBackend for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        if let Some(snap) = self.frames.pop_front() {
            self.last = snap;
        }
        self.last
    }

    fn shutdown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_then_holds_last_snapshot() {
        let pressed = InputSnapshot {
            right: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::new([InputSnapshot::default(), pressed]);

        assert!(!input.sample().right);
        assert!(input.sample().right);
        assert!(input.sample().right, "script exhausted: holds last");
    }
}
