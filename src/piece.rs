use crate::shape::{self, Matrix, Shape};

/// The falling tetromino: a private copy of a shape's matrix plus its
/// top-left offset on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub cells: Matrix,
    pub x: i32, // column of the matrix's left edge
    pub y: i32, // row of the matrix's top edge
    pub shape: Shape,
    pub color: u8, // cosmetic, 0..Shape::COUNT
}

impl Piece {
    pub fn new(shape: Shape, color: u8, x: i32, y: i32) -> Self {
        assert!(
            (color as usize) < Shape::COUNT,
            "color index {color} out of range"
        );
        Piece {
            cells: *shape.template(),
            x,
            y,
            shape,
            color,
        }
    }

    /// Quarter turn clockwise within the 4x4 matrix. Does not consult the board.
    pub fn rotate(&mut self) {
        self.cells = shape::rotated(&self.cells);
    }

    /// Quarter turn counter-clockwise; undoes [`Piece::rotate`].
    pub fn rotate_back(&mut self) {
        self.cells = shape::rotated_back(&self.cells);
    }

    /// Board coordinates `(x, y)` of every filled cell.
    pub fn footprint(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.footprint_at(0, 0)
    }

    /// Footprint shifted by `(dx, dy)`.
    pub fn footprint_at(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0)
                .map(move |(j, _)| (self.x + j as i32 + dx, self.y + i as i32 + dy))
        })
    }

    pub fn filled_count(&self) -> usize {
        shape::filled_count(&self.cells)
    }
}
