//! Scoring module - line-clear points, leveling curve, and gravity speed
//!
//! Scores scale linearly with the level at the time of the clear. The
//! level itself is a pure function of cumulative lines, recomputed from the
//! total on every update rather than incremented, and capped at 10.

use blockfall_types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, MAX_LEVEL, MIN_DROP_MS};

/// Points for a single clear event: base score by simultaneous line count
/// (1 -> 100, 2 -> 300, 3 -> 500, 4 -> 800, anything else -> 0),
/// multiplied by the level.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let base: u32 = match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    };
    base * level
}

/// Level for a cumulative line total: `min(10, total / 10 + 1)`.
pub fn level_for_lines(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Whether the cumulative line count crossed a level boundary between two
/// observations. Used to trigger one-shot level-up effects exactly once.
pub fn crossed_level_boundary(previous_lines: u32, current_lines: u32) -> bool {
    current_lines / LINES_PER_LEVEL > previous_lines / LINES_PER_LEVEL
}

/// Auto-drop gravity interval for a level, in milliseconds:
/// `max(100, 1000 - (level - 1) * 100)`.
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1) * DROP_STEP_MS)
        .max(MIN_DROP_MS)
}
