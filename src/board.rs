use crate::coord::Coord;
use crate::pieces::{Color, Piece};
use crate::square::{Shade, Square};

pub const BOARD_SIDE: i16 = 8;

/// Index into the board's square arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SquareId(pub u8);

/// The 8x8 grid of squares.
///
/// Squares persist for the whole game; only occupancy and flags mutate.
/// Coordinate lookup is total: off-board coordinates yield `None`.
#[derive(Clone, Debug)]
pub struct Board {
    squares: Vec<Square>,
}

impl Board {
    pub fn new() -> Self {
        let mut squares = Vec::with_capacity((BOARD_SIDE * BOARD_SIDE) as usize);
        for rank in 1..=BOARD_SIDE {
            for file in 1..=BOARD_SIDE {
                squares.push(Square::new(Coord::new(file, rank)));
            }
        }
        Self { squares }
    }

    /// Returns the square index for this coordinate if it is on the board.
    #[inline]
    pub fn square_at(&self, coord: Coord) -> Option<SquareId> {
        if coord.file < 1 || coord.file > BOARD_SIDE || coord.rank < 1 || coord.rank > BOARD_SIDE {
            return None;
        }
        Some(SquareId(((coord.rank - 1) * BOARD_SIDE + (coord.file - 1)) as u8))
    }

    #[inline]
    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.0 as usize]
    }

    #[inline]
    pub fn square_mut(&mut self, id: SquareId) -> &mut Square {
        &mut self.squares[id.0 as usize]
    }

    #[inline]
    pub fn coord_of(&self, id: SquareId) -> Coord {
        self.squares[id.0 as usize].coord
    }

    /// Clear every square's threatened-by flag for `color`.
    ///
    /// Called once per half-move before that color regenerates its moves;
    /// the opposing color's flags are left intact so the mover's king can
    /// still consult them.
    pub fn reset_threats(&mut self, color: Color) {
        for sq in &mut self.squares {
            sq.reset_threat(color);
        }
    }

    /// Advance every square's en-passant countdown.
    pub fn tick_en_passant(&mut self) {
        for sq in &mut self.squares {
            sq.tick_en_passant();
        }
    }

    /// Fixed-width text grid, ranks 8 down to 1, rank labels on the right
    /// and file letters underneath. Occupied cells show the two-character
    /// color+kind code, empty dark cells a filler glyph.
    pub fn render(&self, pieces: &[Piece]) -> String {
        let mut out = String::new();
        for rank in (1..=BOARD_SIDE).rev() {
            for file in 1..=BOARD_SIDE {
                let id = self
                    .square_at(Coord::new(file, rank))
                    .expect("iterating on-board coordinates");
                let sq = self.square(id);
                match sq.occupant {
                    Some(pid) => {
                        let code = pieces[pid.0 as usize].display_code();
                        out.push(code[0]);
                        out.push(code[1]);
                        out.push(' ');
                    }
                    None => match sq.shade {
                        Shade::Dark => out.push_str("## "),
                        Shade::Light => out.push_str("   "),
                    },
                }
            }
            out.push_str(&format!("{rank}\n"));
        }
        for file in 1..=BOARD_SIDE {
            let ch = (b'a' + (file - 1) as u8) as char;
            out.push(' ');
            out.push(ch);
            out.push(' ');
        }
        out.push('\n');
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total() {
        let board = Board::new();
        assert!(board.square_at(Coord::new(1, 1)).is_some());
        assert!(board.square_at(Coord::new(8, 8)).is_some());
        assert!(board.square_at(Coord::new(0, 4)).is_none());
        assert!(board.square_at(Coord::new(9, 4)).is_none());
        assert!(board.square_at(Coord::new(4, 0)).is_none());
        assert!(board.square_at(Coord::new(4, 9)).is_none());
        assert!(board.square_at(Coord::new(-3, -3)).is_none());
    }

    #[test]
    fn lookup_round_trips() {
        let board = Board::new();
        for file in 1..=8 {
            for rank in 1..=8 {
                let c = Coord::new(file, rank);
                let id = board.square_at(c).unwrap();
                assert_eq!(board.coord_of(id), c);
            }
        }
    }

    #[test]
    fn empty_board_render_shape() {
        let board = Board::new();
        let text = board.render(&[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        // Rank labels top to bottom are 8..1.
        assert!(lines[0].ends_with('8'));
        assert!(lines[7].ends_with('1'));
        assert_eq!(lines[8], " a  b  c  d  e  f  g  h ");
    }
}
