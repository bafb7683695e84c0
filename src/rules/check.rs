//! Check resolution.
//!
//! When a player is in check, only moves that neutralize every current
//! attacker survive: capturing the attacker, interposing on a sliding
//! attacker's line, or a king move to a safe square.

use crate::board::{Board, SquareId};
use crate::coord::{signum_i16, Coord};
use crate::pieces::{Piece, PieceKind};
use crate::player::Player;

/// Squares that neutralize every attacker currently flagged as attacking
/// `defender`'s king: each attacker's own square plus, for sliding
/// attackers, the squares strictly between attacker and king. Multiple
/// attackers intersect; knight and pawn checks admit capture only.
pub fn resolution_squares(
    board: &Board,
    pieces: &[Piece],
    defender: &Player,
    opponent: &Player,
) -> Vec<SquareId> {
    let Some(king_sq) = pieces[defender.king.0 as usize].square else {
        return Vec::new();
    };
    let king_c = board.coord_of(king_sq);

    let mut sets: Vec<Vec<SquareId>> = Vec::new();
    for &aid in &opponent.pieces {
        let a = &pieces[aid.0 as usize];
        if !a.in_play || !a.attacking_king {
            continue;
        }
        let Some(a_sq) = a.square else {
            continue;
        };
        let mut set = vec![a_sq];
        if a.kind.is_slider() {
            set.extend(between(board, king_c, board.coord_of(a_sq), a.kind));
        }
        sets.push(set);
    }

    let mut iter = sets.into_iter();
    let Some(mut acc) = iter.next() else {
        return Vec::new();
    };
    for set in iter {
        acc.retain(|s| set.contains(s));
    }
    acc
}

/// Narrow each non-king piece of `mover` to moves that resolve the check.
///
/// The king keeps its own list untouched: it was generated against the
/// opponent's threat flags, so flight squares and safe captures of the
/// checker already survive and unsafe squares are already gone.
pub fn apply_check_filter(
    board: &Board,
    pieces: &mut [Piece],
    mover: &Player,
    opponent: &Player,
) {
    let allowed = resolution_squares(board, &*pieces, mover, opponent);
    for &id in &mover.pieces {
        let p = &mut pieces[id.0 as usize];
        if !p.in_play || p.kind == PieceKind::King {
            continue;
        }
        p.moves.retain(|m| allowed.contains(m));
    }
}

/// Walk from the king toward the attacker along the shared rank, file, or
/// diagonal, collecting the strictly-between squares.
fn between(board: &Board, king: Coord, attacker: Coord, kind: PieceKind) -> Vec<SquareId> {
    let d = attacker - king;
    let straight = d.file == 0 || d.rank == 0;
    let diagonal = d.file.abs() == d.rank.abs();
    let aligned = match kind {
        PieceKind::Rook => straight,
        PieceKind::Bishop => diagonal,
        PieceKind::Queen => straight || diagonal,
        _ => false,
    };
    if !aligned {
        return Vec::new();
    }

    let step = Coord::new(signum_i16(d.file), signum_i16(d.rank));
    let mut out = Vec::new();
    let mut cur = king + step;
    while cur != attacker {
        match board.square_at(cur) {
            Some(id) => out.push(id),
            None => break,
        }
        cur += step;
    }
    out
}
