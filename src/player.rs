use crate::pieces::{Color, Piece, PieceId};

/// One side's roster.
///
/// The roster is created in a fixed order (8 pawns, 2 rooks, 2 knights,
/// 2 bishops, queen, king) but the king is reached through the named
/// `king` field, never by roster position. Exactly one king per player
/// for the session's lifetime; promotion swaps the pawn's roster slot
/// for the new piece so regeneration keeps covering it.
#[derive(Clone, Debug)]
pub struct Player {
    pub color: Color,
    pub pieces: Vec<PieceId>,
    pub king: PieceId,
    pub draw_offer: bool,
}

impl Player {
    pub fn new(color: Color, pieces: Vec<PieceId>, king: PieceId) -> Self {
        Self {
            color,
            pieces,
            king,
            draw_offer: false,
        }
    }

    /// Does any piece of this roster have at least one legal move?
    pub fn has_any_move(&self, arena: &[Piece]) -> bool {
        self.pieces.iter().any(|id| {
            let p = &arena[id.0 as usize];
            p.in_play && !p.moves.is_empty()
        })
    }

    /// Replace `old` with `new` in the roster after a promotion.
    pub fn replace_piece(&mut self, old: PieceId, new: PieceId) {
        if let Some(slot) = self.pieces.iter_mut().find(|id| **id == old) {
            *slot = new;
        }
    }
}
