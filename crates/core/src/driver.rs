//! Session driver - gravity, lock delay, and spawn/clear sequencing
//!
//! The driver is the timing collaborator the session state machine expects:
//! it owns the session, the piece generator, and every countdown, and it is
//! advanced exclusively by `tick(elapsed_ms)` plus discrete input commands.
//! All mutations are synchronous value updates, so the caller serializes
//! tick/input handling by construction and pausing freezes every countdown
//! without discarding it - a paused driver simply stops being ticked
//! forward, and no backlog of missed steps exists to replay on resume.
//!
//! Lock protocol: when a gravity step fails the piece is grounded and a
//! lock countdown starts. Successful activity while grounded re-arms it
//! (moves to the full delay, rotations to the shorter one); a successful
//! descent cancels it. On expiry the piece is merged into the board; any
//! completed rows are held in a clearing window for rendering consumers
//! before compaction, scoring, and the next spawn.

use arrayvec::ArrayVec;

use blockfall_types::{
    Direction, GameStatus, InputCommand, PieceKind, LINE_CLEAR_PAUSE_MS, LOCK_DELAY_MS,
    ROTATE_LOCK_DELAY_MS, SOFT_DROP_INTERVAL_MS,
};

use crate::board::ClearedRows;
use crate::collision::is_game_over;
use crate::generator::PieceGenerator;
use crate::movement::{place_piece, try_rotate, KickPolicy};
use crate::scoring::{crossed_level_boundary, drop_interval_ms, line_clear_score};
use crate::session::{initial_position, GameSession};

/// Outcome notifications for presentation collaborators (audio, effects,
/// speech). The core never calls into them; it only reports what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new game started
    Started,
    /// A fresh piece became the current piece
    Spawned { kind: PieceKind },
    /// The current piece was committed to the board
    Locked,
    /// Completed rows were compacted and scored
    LinesCleared { lines: u32, score: u32 },
    /// The cumulative line count crossed a level boundary
    LevelUp { level: u32 },
    /// A spawn was blocked; the session is over
    GameOver,
}

/// Events produced by one driver call
pub type Events = ArrayVec<SessionEvent, 8>;

/// Completed rows held for the clearing-animation window
#[derive(Debug, Clone)]
struct PendingClear {
    rows: ClearedRows,
    remaining_ms: u32,
}

/// Timing and sequencing orchestrator around a [`GameSession`]
#[derive(Debug, Clone)]
pub struct SessionDriver {
    session: GameSession,
    generator: PieceGenerator,
    /// Fixed seed for reproducible runs; `None` reseeds from entropy
    seed: Option<u32>,
    drop_timer_ms: u32,
    lock_timer_ms: Option<u32>,
    clearing: Option<PendingClear>,
    soft_dropping: bool,
}

impl SessionDriver {
    /// Driver whose games are seeded from the system clock
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Driver whose games replay the same piece sequence
    pub fn with_seed(seed: u32) -> Self {
        Self::build(Some(seed))
    }

    fn build(seed: Option<u32>) -> Self {
        let generator = match seed {
            Some(seed) => PieceGenerator::new(seed),
            None => PieceGenerator::from_entropy(),
        };
        Self {
            session: GameSession::new(),
            generator,
            seed,
            drop_timer_ms: 0,
            lock_timer_ms: None,
            clearing: None,
            soft_dropping: false,
        }
    }

    fn fresh_generator(&self) -> PieceGenerator {
        match self.seed {
            Some(seed) => PieceGenerator::new(seed),
            None => PieceGenerator::from_entropy(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Rows currently held in the clearing window, for rendering consumers
    pub fn clearing_rows(&self) -> Option<&[usize]> {
        self.clearing.as_ref().map(|pending| pending.rows.as_slice())
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    /// Whether a lock countdown is armed (the piece is grounded)
    pub fn lock_pending(&self) -> bool {
        self.lock_timer_ms.is_some()
    }

    /// Gate for the input collaborator: playing, and no clearing window
    pub fn input_enabled(&self) -> bool {
        self.session.status() == GameStatus::Playing && self.clearing.is_none()
    }

    /// Start a new game with a freshly constructed generator
    pub fn start(&mut self) -> Events {
        self.generator = self.fresh_generator();
        self.session.start(&mut self.generator);
        self.drop_timer_ms = 0;
        self.lock_timer_ms = None;
        self.clearing = None;
        self.soft_dropping = false;

        let mut events = Events::new();
        events.push(SessionEvent::Started);
        if let Some(current) = self.session.current() {
            events.push(SessionEvent::Spawned { kind: current.kind });
        }
        events
    }

    /// Full reset back to an idle session
    pub fn reset(&mut self) {
        self.generator = self.fresh_generator();
        self.session.reset();
        self.drop_timer_ms = 0;
        self.lock_timer_ms = None;
        self.clearing = None;
        self.soft_dropping = false;
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    /// Pause/resume toggle for lifecycle collaborators (control panels)
    pub fn toggle_pause(&mut self) {
        match self.session.status() {
            GameStatus::Playing => self.session.pause(),
            GameStatus::Paused => self.session.resume(),
            _ => {}
        }
    }

    /// Apply one input command. Returns whether it changed anything.
    ///
    /// Commands are dropped while the gate is closed (not playing, or a
    /// clearing window is pending).
    pub fn handle(&mut self, command: InputCommand) -> bool {
        if !self.input_enabled() {
            return false;
        }

        match command {
            InputCommand::MoveLeft => self.shift(Direction::Left),
            InputCommand::MoveRight => self.shift(Direction::Right),
            InputCommand::SoftDropStart => {
                self.soft_dropping = true;
                self.drop_timer_ms = 0;
                true
            }
            InputCommand::SoftDropStop => {
                self.soft_dropping = false;
                self.drop_timer_ms = 0;
                true
            }
            InputCommand::Rotate => self.rotate_with_kick(),
            InputCommand::Pause => {
                self.session.pause();
                true
            }
        }
    }

    fn shift(&mut self, direction: Direction) -> bool {
        if !self.session.move_piece(direction) {
            return false;
        }
        // Activity while grounded re-arms the countdown.
        if self.lock_timer_ms.is_some() {
            self.lock_timer_ms = Some(LOCK_DELAY_MS);
        }
        true
    }

    fn rotate_with_kick(&mut self) -> bool {
        let Some(current) = self.session.current().copied() else {
            return false;
        };

        let outcome = try_rotate(
            self.session.board(),
            &current,
            self.session.position(),
            KickPolicy::SearchKicks,
        );
        if !outcome.success {
            return false;
        }

        self.session.set_current(outcome.piece, outcome.position);
        // A grounded rotation gets the shorter re-arm.
        if self.lock_timer_ms.is_some() {
            self.lock_timer_ms = Some(ROTATE_LOCK_DELAY_MS);
        }
        true
    }

    /// Advance all countdowns by `elapsed_ms`.
    ///
    /// Does nothing unless the session is playing; gravity and the lock
    /// countdown are suspended while a clearing window is open.
    pub fn tick(&mut self, elapsed_ms: u32) -> Events {
        let mut events = Events::new();
        if self.session.status() != GameStatus::Playing {
            return events;
        }

        if let Some(pending) = self.clearing.as_mut() {
            if pending.remaining_ms > elapsed_ms {
                pending.remaining_ms -= elapsed_ms;
                return events;
            }
        }
        if let Some(pending) = self.clearing.take() {
            self.finish_clear(pending.rows, &mut events);
            return events;
        }

        if let Some(remaining) = self.lock_timer_ms {
            if remaining <= elapsed_ms {
                self.lock_timer_ms = None;
                self.lock_current(&mut events);
                return events;
            }
            self.lock_timer_ms = Some(remaining - elapsed_ms);
        }

        let interval = if self.soft_dropping {
            SOFT_DROP_INTERVAL_MS
        } else {
            drop_interval_ms(self.session.level())
        };
        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms >= interval {
            self.drop_timer_ms = 0;
            if self.session.move_piece(Direction::Down) {
                // Descending means the piece is no longer grounded.
                self.lock_timer_ms = None;
            } else if self.lock_timer_ms.is_none() {
                self.lock_timer_ms = Some(LOCK_DELAY_MS);
            }
        }

        events
    }

    /// Commit the current piece to the board and continue the protocol
    fn lock_current(&mut self, events: &mut Events) {
        let Some(current) = self.session.current().copied() else {
            return;
        };

        let board = place_piece(self.session.board(), &current, self.session.position());
        let completed = board.completed_rows();
        self.session.set_board(board);
        events.push(SessionEvent::Locked);

        if completed.is_empty() {
            self.spawn_next(events);
        } else {
            self.clearing = Some(PendingClear {
                rows: completed,
                remaining_ms: LINE_CLEAR_PAUSE_MS,
            });
        }
    }

    /// Close the clearing window: compact, score, level, spawn
    fn finish_clear(&mut self, rows: ClearedRows, events: &mut Events) {
        let cleared_board = self.session.board().cleared(&rows);
        // Score uses the level in effect at the time of the clear.
        let score = line_clear_score(rows.len(), self.session.level());
        let previous_lines = self.session.lines();

        self.session.set_board(cleared_board);
        self.session.add_score(score, rows.len() as u32);
        events.push(SessionEvent::LinesCleared {
            lines: rows.len() as u32,
            score,
        });
        if crossed_level_boundary(previous_lines, self.session.lines()) {
            events.push(SessionEvent::LevelUp {
                level: self.session.level(),
            });
        }

        self.spawn_next(events);
    }

    /// Promote the next piece to current and draw a new preview.
    ///
    /// A piece that fails the fixed spawn check ends the session instead of
    /// spawning.
    fn spawn_next(&mut self, events: &mut Events) {
        let current = match self.session.next_piece().copied() {
            Some(piece) => piece,
            None => self.generator.next(),
        };

        if is_game_over(self.session.board(), &current) {
            self.session.end();
            events.push(SessionEvent::GameOver);
            return;
        }

        let next = self.generator.next();
        let position = initial_position(&current);
        self.session.set_current(current, position);
        self.session.set_next(next);
        self.lock_timer_ms = None;
        self.drop_timer_ms = 0;
        events.push(SessionEvent::Spawned { kind: current.kind });
    }
}

impl Default for SessionDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::{PieceKind, Position, BOARD_WIDTH};
    use crate::board::Board;
    use crate::catalog::Tetrimino;

    fn playing_driver(seed: u32) -> SessionDriver {
        let mut driver = SessionDriver::with_seed(seed);
        let events = driver.start();
        assert!(events.contains(&SessionEvent::Started));
        driver
    }

    /// Drive the current piece to the floor and through its lock countdown.
    fn drop_and_lock(driver: &mut SessionDriver) -> Vec<SessionEvent> {
        while driver.session.move_piece(Direction::Down) {}
        // Ground contact is discovered by the next gravity step.
        let mut all = Vec::new();
        for _ in 0..400 {
            let events = driver.tick(16);
            all.extend(events.iter().copied());
            if events.iter().any(|e| matches!(e, SessionEvent::Locked | SessionEvent::GameOver)) {
                break;
            }
        }
        all
    }

    #[test]
    fn test_start_emits_started_and_spawned() {
        let mut driver = SessionDriver::with_seed(11);
        let events = driver.start();
        assert_eq!(events[0], SessionEvent::Started);
        assert!(matches!(events[1], SessionEvent::Spawned { .. }));
        assert_eq!(driver.session().status(), GameStatus::Playing);
    }

    #[test]
    fn test_tick_ignored_unless_playing() {
        let mut driver = SessionDriver::with_seed(11);
        assert!(driver.tick(1000).is_empty());

        driver.start();
        driver.pause();
        let y_before = driver.session().position().y;
        for _ in 0..100 {
            assert!(driver.tick(100).is_empty());
        }
        assert_eq!(driver.session().position().y, y_before);
    }

    #[test]
    fn test_gravity_steps_at_level_interval() {
        let mut driver = playing_driver(11);
        let y = driver.session().position().y;

        driver.tick(999);
        assert_eq!(driver.session().position().y, y);
        driver.tick(1);
        assert_eq!(driver.session().position().y, y + 1);
    }

    #[test]
    fn test_soft_drop_accelerates_gravity() {
        let mut driver = playing_driver(11);
        assert!(driver.handle(InputCommand::SoftDropStart));
        let y = driver.session().position().y;

        driver.tick(50);
        assert_eq!(driver.session().position().y, y + 1);

        assert!(driver.handle(InputCommand::SoftDropStop));
        driver.tick(50);
        // Back to the slow interval: 50ms is not enough for another step.
        assert_eq!(driver.session().position().y, y + 1);
    }

    #[test]
    fn test_handle_moves_piece() {
        let mut driver = playing_driver(11);
        let x = driver.session().position().x;

        assert!(driver.handle(InputCommand::MoveLeft));
        assert_eq!(driver.session().position().x, x - 1);
        assert!(driver.handle(InputCommand::MoveRight));
        assert_eq!(driver.session().position().x, x);
    }

    #[test]
    fn test_handle_gated_when_paused() {
        let mut driver = playing_driver(11);
        driver.pause();
        assert!(!driver.handle(InputCommand::MoveLeft));
        assert!(!driver.input_enabled());
    }

    #[test]
    fn test_pause_command_pauses() {
        let mut driver = playing_driver(11);
        assert!(driver.handle(InputCommand::Pause));
        assert_eq!(driver.session().status(), GameStatus::Paused);
        // Gated now; resume goes through the lifecycle surface.
        assert!(!driver.handle(InputCommand::Pause));
        driver.resume();
        assert_eq!(driver.session().status(), GameStatus::Playing);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut driver = playing_driver(11);
        driver.toggle_pause();
        assert_eq!(driver.session().status(), GameStatus::Paused);
        driver.toggle_pause();
        assert_eq!(driver.session().status(), GameStatus::Playing);
    }

    #[test]
    fn test_lock_countdown_starts_when_grounded() {
        let mut driver = playing_driver(11);
        while driver.session.move_piece(Direction::Down) {}
        assert!(!driver.lock_pending());

        // Next gravity step fails and arms the countdown.
        driver.tick(1000);
        assert!(driver.lock_pending());
    }

    #[test]
    fn test_lock_commits_after_delay() {
        let mut driver = playing_driver(11);
        let events = drop_and_lock(&mut driver);
        assert!(events.contains(&SessionEvent::Locked));
        assert!(events.iter().any(|e| matches!(e, SessionEvent::Spawned { .. })));
        // The locked piece left filled cells behind.
        let filled = driver
            .session()
            .board()
            .rows()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_activity_rearms_lock_countdown() {
        let mut driver = playing_driver(11);
        while driver.session.move_piece(Direction::Down) {}
        driver.tick(1000);
        assert!(driver.lock_pending());

        // Run the countdown almost out, then move sideways.
        driver.tick(LOCK_DELAY_MS - 16);
        let moved = driver.handle(InputCommand::MoveLeft) || driver.handle(InputCommand::MoveRight);
        assert!(moved);

        // The nearly-expired countdown was re-armed: the next small tick
        // must not lock.
        let events = driver.tick(16);
        assert!(!events.contains(&SessionEvent::Locked));
        assert!(driver.lock_pending());
    }

    #[test]
    fn test_spawn_after_lock_uses_preview_piece() {
        let mut driver = playing_driver(11);
        let preview = driver.session().next_piece().map(|p| p.kind);

        let events = drop_and_lock(&mut driver);
        let spawned = events.iter().find_map(|e| match e {
            SessionEvent::Spawned { kind } => Some(*kind),
            _ => None,
        });
        assert_eq!(spawned, preview);
        assert!(driver.session().next_piece().is_some());
    }

    #[test]
    fn test_line_clear_window_then_score() {
        let mut driver = playing_driver(11);

        // Force a flat-bottomed I bar and leave exactly its four landing
        // columns open in the bottom row.
        driver
            .session
            .set_current(Tetrimino::spawn(PieceKind::I), Position::new(3, 0));
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                board = board.with_cell(x, 19, Some("#0000F0"));
            }
        }
        driver.session.set_board(board);
        // One line short of a level boundary: the clear must also level up.
        driver.session.add_score(0, 9);

        let events = drop_and_lock(&mut driver);
        assert!(events.contains(&SessionEvent::Locked));

        let rows = driver.clearing_rows().expect("clearing window open").to_vec();
        assert_eq!(rows, vec![19]);
        // Input is gated during the window.
        assert!(!driver.input_enabled());
        assert!(!driver.handle(InputCommand::MoveLeft));

        // Window still open short of its duration.
        let events = driver.tick(LINE_CLEAR_PAUSE_MS - 1);
        assert!(events.is_empty());

        let events = driver.tick(16);
        assert!(events.contains(&SessionEvent::LinesCleared { lines: 1, score: 100 }));
        assert!(events.contains(&SessionEvent::LevelUp { level: 2 }));
        assert_eq!(driver.session().score(), 100);
        assert_eq!(driver.session().lines(), 10);
        assert_eq!(driver.session().level(), 2);
        assert!(driver.clearing_rows().is_none());
        // The cleared row is gone and nothing else was on the board.
        assert!(driver.session().board().completed_rows().is_empty());
        assert!(!driver.session().board().is_filled(0, 19));
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut driver = playing_driver(11);

        // Block the spawn rows but leave a gap so no row is complete.
        let mut board = Board::new();
        for y in 0..2 {
            for x in 0..(BOARD_WIDTH as i8 - 1) {
                board = board.with_cell(x, y, Some("#F00000"));
            }
        }
        driver.session.set_board(board);

        let mut events = Events::new();
        driver.lock_current(&mut events);
        assert!(events.contains(&SessionEvent::GameOver));
        assert_eq!(driver.session().status(), GameStatus::GameOver);

        // Terminal: ticking does nothing further.
        assert!(driver.tick(10_000).is_empty());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = playing_driver(77);
        let mut b = playing_driver(77);
        for _ in 0..500 {
            let ea = a.tick(16);
            let eb = b.tick(16);
            assert_eq!(ea.as_slice(), eb.as_slice());
        }
        assert_eq!(a.session().score(), b.session().score());
        assert_eq!(a.session().position(), b.session().position());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut driver = playing_driver(11);
        driver.tick(1000);
        driver.reset();
        assert_eq!(driver.session().status(), GameStatus::Idle);
        assert!(driver.session().current().is_none());
        assert!(!driver.lock_pending());
        assert_eq!(driver.session().position(), Position::new(3, 0));
    }
}
