//! Held-command auto-repeat pacing
//!
//! The input collaborator fires a command once on key press, then repeats
//! it while the key stays held: nothing for `REPEAT_DELAY_MS`, then one
//! repeat every `REPEAT_INTERVAL_MS`. This module keeps that pacing pure
//! and framework-independent - the caller feeds press/release transitions
//! and elapsed time, and reads back the commands that are due.
//!
//! Only one command repeats at a time; pressing a different one replaces
//! the held command and restarts the delay.

use arrayvec::ArrayVec;

use blockfall_types::{InputCommand, REPEAT_DELAY_MS, REPEAT_INTERVAL_MS};

/// Commands due from one `update` call
pub type DueCommands = ArrayVec<InputCommand, 8>;

/// Auto-repeat state for one held command
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    held: Option<InputCommand>,
    delay_ms: u32,
    interval_ms: u32,
    /// Time since the press, until the delay elapses
    held_for_ms: u32,
    /// Repeat-interval accumulator once the delay has elapsed
    accumulator_ms: u32,
    repeating: bool,
}

impl AutoRepeat {
    /// Auto-repeat with the default pacing (100ms delay, 30ms interval)
    pub fn new() -> Self {
        Self::with_config(REPEAT_DELAY_MS, REPEAT_INTERVAL_MS)
    }

    /// Auto-repeat with custom pacing
    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            held: None,
            delay_ms,
            interval_ms: interval_ms.max(1),
            held_for_ms: 0,
            accumulator_ms: 0,
            repeating: false,
        }
    }

    /// The command currently held, if any
    pub fn held(&self) -> Option<InputCommand> {
        self.held
    }

    /// Record a key press.
    ///
    /// Returns the command to fire immediately, or `None` when the same
    /// command is already held (platform key-repeat events are ignored;
    /// this pacing replaces them).
    pub fn press(&mut self, command: InputCommand) -> Option<InputCommand> {
        if self.held == Some(command) {
            return None;
        }
        self.held = Some(command);
        self.held_for_ms = 0;
        self.accumulator_ms = 0;
        self.repeating = false;
        Some(command)
    }

    /// Record a key release. Clears the held state only if it matches.
    pub fn release(&mut self, command: InputCommand) {
        if self.held == Some(command) {
            self.clear();
        }
    }

    /// Drop any held command
    pub fn clear(&mut self) {
        self.held = None;
        self.held_for_ms = 0;
        self.accumulator_ms = 0;
        self.repeating = false;
    }

    /// Advance by `elapsed_ms` and return the repeats that came due
    pub fn update(&mut self, elapsed_ms: u32) -> DueCommands {
        let mut due = DueCommands::new();
        let Some(command) = self.held else {
            return due;
        };

        let mut budget = elapsed_ms;
        if !self.repeating {
            let until_repeat = self.delay_ms.saturating_sub(self.held_for_ms);
            if budget < until_repeat {
                self.held_for_ms += budget;
                return due;
            }
            self.held_for_ms = self.delay_ms;
            self.repeating = true;
            budget -= until_repeat;
        }

        self.accumulator_ms += budget;
        while self.accumulator_ms >= self.interval_ms && !due.is_full() {
            self.accumulator_ms -= self.interval_ms;
            due.push(command);
        }
        due
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}
