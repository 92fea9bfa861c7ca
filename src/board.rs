use crate::piece::Piece;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// The well. A cell is 0 when empty, otherwise the 1-based colour of the
/// piece occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Board {
        Board {
            board: [[0; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Board {
    pub const fn rows(&self) -> usize {
        BOARD_HEIGHT
    }

    pub const fn cols(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.board[y][x] = v
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.board[y][x]
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != 0
    }

    pub fn row(&self, y: usize) -> &[u8; BOARD_WIDTH] {
        &self.board[y]
    }

    /// Occupies every cell of `row` with colour `v`.
    pub fn fill_row(&mut self, row: usize, v: u8) {
        self.board[row].fill(v);
    }

    // None when (x, y) lies outside the well
    fn cell(&self, x: i32, y: i32) -> Option<u8> {
        let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
        Some(self.get(x, y))
    }

    fn fits(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece
            .footprint_at(dx, dy)
            .all(|(x, y)| self.cell(x, y) == Some(0))
    }

    pub fn can_move_down(&self, piece: &Piece) -> bool {
        self.fits(piece, 0, 1)
    }

    pub fn can_move_left(&self, piece: &Piece) -> bool {
        self.fits(piece, -1, 0)
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        self.fits(piece, 1, 0)
    }

    /// True if the piece, where it stands, lies inside the well and overlaps
    /// nothing. Cells above row 0 count as outside.
    pub fn can_place(&self, piece: &Piece) -> bool {
        self.fits(piece, 0, 0)
    }

    fn draw(&mut self, piece: &Piece, v: u8) {
        for (x, y) in piece.footprint() {
            if self.cell(x, y).is_some() {
                self.set(x as usize, y as usize, v);
            }
        }
    }

    /// Marks the piece's cells occupied. No collision check.
    pub fn place(&mut self, piece: &Piece) {
        self.draw(piece, piece.color + 1);
    }

    /// Empties the piece's cells. No collision check.
    pub fn clear(&mut self, piece: &Piece) {
        self.draw(piece, 0);
    }

    pub fn is_filled(&self, row: usize) -> bool {
        self.board[row].iter().all(|&v| v != 0)
    }

    // drop everything above `row` by one, overwriting it
    fn wipe(&mut self, row: usize) {
        for i in (0..row).rev() {
            self.board[i + 1] = self.board[i];
        }
        self.board[0].fill(0);
    }

    /// Removes every full row, bottom to top, compacting the rows above.
    /// Returns how many rows went.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT;
        while row > 0 {
            if self.is_filled(row - 1) {
                // re-test the same index, new content just slid into it
                self.wipe(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_is_none_outside_the_well() {
        let b = Board::default();
        assert_eq!(b.cell(-1, 0), None);
        assert_eq!(b.cell(0, -1), None);
        assert_eq!(b.cell(BOARD_WIDTH as i32, 0), None);
        assert_eq!(b.cell(0, BOARD_HEIGHT as i32), None);
        assert_eq!(b.cell(0, 0), Some(0));
    }

    #[test]
    fn wipe_shifts_rows_down() {
        let mut b = Board::default();
        b.set(0, 0, 3);
        b.set(1, 1, 4);
        b.wipe(2);
        assert_eq!(b.get(0, 1), 3);
        assert_eq!(b.get(1, 2), 4);
        assert!(b.row(0).iter().all(|&v| v == 0));
    }
}
