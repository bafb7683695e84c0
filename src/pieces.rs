use crate::board::SquareId;
use crate::coord::Coord;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in.
    #[inline]
    pub fn forward(self) -> i16 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Starting rank for this color's pawns.
    #[inline]
    pub fn pawn_rank(self) -> i16 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Back rank, also the opponent pawns' promotion rank.
    #[inline]
    pub fn home_rank(self) -> i16 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Unit directions for sliding pieces.
    #[inline]
    pub fn slide_dirs(self) -> &'static [Coord] {
        use PieceKind::*;
        match self {
            Queen => &QUEEN_DIRS,
            Rook => &ROOK_DIRS,
            Bishop => &BISHOP_DIRS,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    /// Kinds a pawn may promote to.
    #[inline]
    pub fn promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen
        )
    }

    /// One-letter display code; pawns are lowercase by convention.
    #[inline]
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

pub const ROOK_DIRS: [Coord; 4] = [
    Coord { file: 1, rank: 0 },
    Coord { file: -1, rank: 0 },
    Coord { file: 0, rank: 1 },
    Coord { file: 0, rank: -1 },
];

pub const BISHOP_DIRS: [Coord; 4] = [
    Coord { file: 1, rank: 1 },
    Coord { file: 1, rank: -1 },
    Coord { file: -1, rank: 1 },
    Coord { file: -1, rank: -1 },
];

pub const QUEEN_DIRS: [Coord; 8] = [
    Coord { file: 1, rank: 0 },
    Coord { file: -1, rank: 0 },
    Coord { file: 0, rank: 1 },
    Coord { file: 0, rank: -1 },
    Coord { file: 1, rank: 1 },
    Coord { file: 1, rank: -1 },
    Coord { file: -1, rank: 1 },
    Coord { file: -1, rank: -1 },
];

pub const KNIGHT_DELTAS: [Coord; 8] = [
    Coord { file: -2, rank: -1 },
    Coord { file: -2, rank: 1 },
    Coord { file: -1, rank: -2 },
    Coord { file: -1, rank: 2 },
    Coord { file: 1, rank: -2 },
    Coord { file: 1, rank: 2 },
    Coord { file: 2, rank: -1 },
    Coord { file: 2, rank: 1 },
];

pub const KING_STEPS: [Coord; 8] = [
    Coord { file: -1, rank: -1 },
    Coord { file: -1, rank: 0 },
    Coord { file: -1, rank: 1 },
    Coord { file: 0, rank: -1 },
    Coord { file: 0, rank: 1 },
    Coord { file: 1, rank: -1 },
    Coord { file: 1, rank: 0 },
    Coord { file: 1, rank: 1 },
];

/// Index into the session's piece arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PieceId(pub u16);

/// One piece, arena-owned.
///
/// `square` is the back-reference to the square arena; it is `None` before
/// placement and after capture. A piece with `in_play == false` never takes
/// part in move generation again.
#[derive(Clone, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Option<SquareId>,
    pub in_play: bool,
    pub attacking_king: bool,
    /// Current legal destinations, recomputed wholesale each half-move.
    pub moves: Vec<SquareId>,
    /// Pawns lose the double push, rooks and kings their castling right.
    pub moved: bool,
    /// Castle eligibility; on rooks it is set externally by the king during
    /// castling-rights evaluation, on kings it persists until the first move.
    pub can_castle: bool,
    /// Kings only.
    pub in_check: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            square: None,
            in_play: true,
            attacking_king: false,
            moves: Vec::new(),
            moved: false,
            can_castle: kind == PieceKind::King,
            in_check: false,
        }
    }

    /// Two-character board code, e.g. `wp` or `bK`.
    pub fn display_code(&self) -> [char; 2] {
        let c = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        [c, self.kind.code()]
    }

    #[inline]
    pub fn clear_generated(&mut self) {
        self.moves.clear();
        self.attacking_king = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_other_flips() {
        assert_eq!(Color::White.other(), Color::Black);
        assert_eq!(Color::Black.other(), Color::White);
    }

    #[test]
    fn promotable_kinds() {
        assert!(PieceKind::Queen.promotable());
        assert!(PieceKind::Rook.promotable());
        assert!(PieceKind::Knight.promotable());
        assert!(PieceKind::Bishop.promotable());
        assert!(!PieceKind::King.promotable());
        assert!(!PieceKind::Pawn.promotable());
    }

    #[test]
    fn display_codes() {
        let p = Piece::new(PieceKind::Pawn, Color::White);
        assert_eq!(p.display_code(), ['w', 'p']);
        let k = Piece::new(PieceKind::King, Color::Black);
        assert_eq!(k.display_code(), ['b', 'K']);
    }
}
