//! Game session - the state machine owning all mutable session state
//!
//! A session holds the board, the current and next piece, the current
//! position, and the score/level/lines counters, and is the single point of
//! mutation for all of them. Status transitions:
//! `Idle → Playing ⇄ Paused`, `Playing → GameOver` (terminal until a full
//! reset). Timing and spawn sequencing live in the driver; the session only
//! validates and commits.

use blockfall_types::{Direction, GameStatus, Position, BOARD_WIDTH, SPAWN_POSITION};

use crate::board::Board;
use crate::catalog::Tetrimino;
use crate::collision::is_valid_position;
use crate::generator::PieceGenerator;
use crate::movement::{try_rotate, KickPolicy};
use crate::scoring::level_for_lines;

/// Initial position for a newly spawned piece: the occupied-column extent
/// of its shape centered over the board width, top edge at row 0.
pub fn initial_position(piece: &Tetrimino) -> Position {
    let occupied_width = piece.shape.occupied_width() as i8;
    Position::new((BOARD_WIDTH as i8 - occupied_width) / 2, 0)
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Option<Tetrimino>,
    next: Option<Tetrimino>,
    position: Position,
    score: u32,
    level: u32,
    lines: u32,
    status: GameStatus,
}

impl GameSession {
    /// A fresh idle session: empty board, no pieces, construction defaults
    pub fn new() -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            board: Board::new(),
            current: None,
            next: None,
            position: Position::new(x, y),
            score: 0,
            level: 1,
            lines: 0,
            status: GameStatus::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Tetrimino> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Tetrimino> {
        self.next.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Start a new game: full reset to defaults, then a freshly drawn
    /// current/next pair at the centered initial position. Valid from any
    /// status.
    ///
    /// The caller supplies a freshly constructed generator so consecutive
    /// playthroughs stay decorrelated.
    pub fn start(&mut self, generator: &mut PieceGenerator) {
        let current = generator.next();
        let next = generator.next();
        let position = initial_position(&current);
        *self = Self {
            board: Board::new(),
            current: Some(current),
            next: Some(next),
            position,
            score: 0,
            level: 1,
            lines: 0,
            status: GameStatus::Playing,
        };
    }

    /// `Playing → Paused`; no other field changes
    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    /// `Paused → Playing`; no other field changes
    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    /// Any status → `GameOver` (terminal until reset)
    pub fn end(&mut self) {
        self.status = GameStatus::GameOver;
    }

    /// Any status → `Idle`, all fields back to construction defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move the current piece one step in `direction`.
    ///
    /// No-op unless the session is playing and a piece exists; the
    /// candidate position is committed only if it is valid on the current
    /// board. Returns whether the move happened.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let candidate = self.position.stepped(direction);
        if is_valid_position(&self.board, current, candidate) {
            self.position = candidate;
            true
        } else {
            false
        }
    }

    /// Rotate the current piece in place, without kick search.
    ///
    /// Position stays unchanged; only the piece's matrix and rotation
    /// counter advance. Interactive input goes through the driver's
    /// kick-aware rotation instead; this path stays available to direct
    /// session callers.
    pub fn rotate_piece(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let outcome = try_rotate(&self.board, current, self.position, KickPolicy::NoKick);
        if outcome.success {
            self.current = Some(outcome.piece);
            true
        } else {
            false
        }
    }

    /// Add to score and cumulative lines, recomputing the level from the
    /// new line total.
    pub fn add_score(&mut self, score_delta: u32, lines_delta: u32) {
        self.score += score_delta;
        self.lines += lines_delta;
        self.level = level_for_lines(self.lines);
    }

    /// Replace the current piece and its position.
    ///
    /// Orchestration-layer operation for spawn/lock sequencing; the caller
    /// is responsible for supplying legal values.
    pub fn set_current(&mut self, piece: Tetrimino, position: Position) {
        self.current = Some(piece);
        self.position = position;
    }

    /// Replace the next-piece preview slot
    pub fn set_next(&mut self, piece: Tetrimino) {
        self.next = Some(piece);
    }

    /// Replace the board value
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
