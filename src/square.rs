use crate::coord::Coord;
use crate::pieces::{Color, PieceId};

/// Render shade of a square, fixed from file/rank parity at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Shade {
    Light,
    Dark,
}

/// One cell of the grid.
///
/// Holds at most one occupant. The threat flags are write-only markers set
/// during move generation; `Board::reset_threats` clears them per color once
/// per half-move so they never go stale.
#[derive(Clone, Debug)]
pub struct Square {
    pub coord: Coord,
    pub shade: Shade,
    pub occupant: Option<PieceId>,
    en_passant: bool,
    ep_count: u8,
    threat_by_white: bool,
    threat_by_black: bool,
}

impl Square {
    pub fn new(coord: Coord) -> Self {
        // a1 is dark: same parity of file and rank means dark.
        let shade = if (coord.file + coord.rank) % 2 == 0 {
            Shade::Dark
        } else {
            Shade::Light
        };
        Self {
            coord,
            shade,
            occupant: None,
            en_passant: false,
            ep_count: 0,
            threat_by_white: false,
            threat_by_black: false,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Arm en-passant eligibility with a 2-ply countdown.
    pub fn set_en_passant(&mut self) {
        self.en_passant = true;
        self.ep_count = 2;
    }

    pub fn clear_en_passant(&mut self) {
        self.en_passant = false;
        self.ep_count = 0;
    }

    /// Advance the countdown; eligibility drops when it reaches zero, so a
    /// double step armed on ply N is capturable only on ply N+1.
    pub fn tick_en_passant(&mut self) {
        if self.ep_count > 0 {
            self.ep_count -= 1;
            if self.ep_count == 0 {
                self.en_passant = false;
            }
        }
    }

    #[inline]
    pub fn en_passant_eligible(&self) -> bool {
        self.en_passant
    }

    #[inline]
    pub fn mark_threat(&mut self, by: Color) {
        match by {
            Color::White => self.threat_by_white = true,
            Color::Black => self.threat_by_black = true,
        }
    }

    #[inline]
    pub fn threatened_by(&self, color: Color) -> bool {
        match color {
            Color::White => self.threat_by_white,
            Color::Black => self.threat_by_black,
        }
    }

    #[inline]
    pub fn reset_threat(&mut self, by: Color) {
        match by {
            Color::White => self.threat_by_white = false,
            Color::Black => self.threat_by_black = false,
        }
    }
}
