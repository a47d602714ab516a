//! Piece catalog - canonical tetrimino shapes, colors, and rotation
//!
//! Each of the seven pieces is defined once, in its spawn orientation, as a
//! square 0/1 matrix (side 2 for O, 3 for T/S/Z/J/L, 4 for I). Rotation is a
//! pure matrix transform: `shape'[j][N-1-i] = shape[i][j]`, so four
//! successive rotations reproduce the original matrix exactly.

use blockfall_types::PieceKind;

/// Largest shape matrix side length (the I piece)
pub const SHAPE_MAX: usize = 4;

/// Square 0/1 shape matrix, size-tagged inside a fixed 4x4 backing array.
///
/// Only the top-left `size x size` region is meaningful; the padding stays
/// zero so equality and rotation can ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[u8; SHAPE_MAX]; SHAPE_MAX],
}

impl Shape {
    pub const fn new(size: u8, rows: [[u8; SHAPE_MAX]; SHAPE_MAX]) -> Self {
        Self { size, rows }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at (row, col) is set
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.rows[row][col] != 0
    }

    /// Iterate over the (row, col) coordinates of all set cells
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| self.is_set(row, col).then_some((row, col)))
        })
    }

    /// The matrix rotated 90 degrees clockwise
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut rows = [[0u8; SHAPE_MAX]; SHAPE_MAX];
        for (i, source_row) in self.rows.iter().enumerate().take(n) {
            for (j, &cell) in source_row.iter().enumerate().take(n) {
                rows[j][n - 1 - i] = cell;
            }
        }
        Self {
            size: self.size,
            rows,
        }
    }

    /// Minimum and maximum column indices holding a set cell, if any
    pub fn occupied_columns(&self) -> Option<(usize, usize)> {
        let mut min_col = self.size();
        let mut max_col = 0usize;
        let mut any = false;
        for (_, col) in self.cells() {
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            any = true;
        }
        any.then_some((min_col, max_col))
    }

    /// Width of the occupied-column extent (0 for an empty matrix)
    pub fn occupied_width(&self) -> usize {
        match self.occupied_columns() {
            Some((min_col, max_col)) => max_col - min_col + 1,
            None => 0,
        }
    }
}

/// An active or queued piece: catalog kind, current shape matrix, color,
/// and rotation state in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetrimino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: &'static str,
    pub rotation: u8,
}

impl Tetrimino {
    /// A fresh catalog copy of `kind` in spawn orientation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            color: color_of(kind),
            rotation: 0,
        }
    }

    /// A new piece rotated 90 degrees clockwise, rotation advanced mod 4.
    ///
    /// The O piece's matrix is rotation-symmetric, so only its rotation
    /// counter changes; callers that skip kick search for O rely on that.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }
}

/// Catalog color for a piece kind
pub fn color_of(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "#00F0F0", // cyan
        PieceKind::O => "#F0F000", // yellow
        PieceKind::T => "#A000F0", // purple
        PieceKind::S => "#00F000", // green
        PieceKind::Z => "#F00000", // red
        PieceKind::J => "#0000F0", // blue
        PieceKind::L => "#F0A000", // orange
    }
}

/// Spawn-orientation shape matrix for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::new(
            4,
            [
                [0, 0, 0, 0],
                [1, 1, 1, 1],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::O => Shape::new(
            2,
            [
                [1, 1, 0, 0],
                [1, 1, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::T => Shape::new(
            3,
            [
                [0, 1, 0, 0],
                [1, 1, 1, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::S => Shape::new(
            3,
            [
                [0, 1, 1, 0],
                [1, 1, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::Z => Shape::new(
            3,
            [
                [1, 1, 0, 0],
                [0, 1, 1, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::J => Shape::new(
            3,
            [
                [1, 0, 0, 0],
                [1, 1, 1, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::L => Shape::new(
            3,
            [
                [0, 0, 1, 0],
                [1, 1, 1, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
    }
}
