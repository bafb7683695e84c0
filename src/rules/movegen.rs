//! Per-piece move generation.
//!
//! Generation is a full rewrite of each piece's move list and doubles as the
//! threat and check detector: every listed destination is marked threatened
//! by the mover's color, and a listed destination occupied by the enemy king
//! flags that king in check and the piece as attacking it. Lists are never
//! patched incrementally; any occupancy change invalidates them wholesale.

use crate::board::{Board, SquareId};
use crate::coord::Coord;
use crate::pieces::{Color, Piece, PieceId, PieceKind, KING_STEPS, KNIGHT_DELTAS};
use crate::player::Player;

/// Castle eligibility granted by the king's evaluation: the rook to flag
/// and the rook's virtual castling destination.
struct CastleGrant {
    rook: PieceId,
    rook_dest: SquareId,
}

/// Recompute one piece's legal-move list from the current board.
pub fn regenerate(board: &mut Board, pieces: &mut [Piece], id: PieceId) {
    let idx = id.0 as usize;
    pieces[idx].clear_generated();
    if !pieces[idx].in_play {
        return;
    }
    let Some(from_id) = pieces[idx].square else {
        return;
    };
    let from = board.coord_of(from_id);
    let color = pieces[idx].color;
    let kind = pieces[idx].kind;

    let mut moves: Vec<SquareId> = Vec::new();
    // Castling entries carry no threat mark: they are relocations, not attacks.
    let mut unmarked: Vec<SquareId> = Vec::new();
    let mut grants: Vec<CastleGrant> = Vec::new();

    match kind {
        PieceKind::Pawn => {
            pawn_moves(board, pieces, color, from, pieces[idx].moved, &mut moves)
        }
        PieceKind::Knight => leaper_moves(board, pieces, color, from, &KNIGHT_DELTAS, &mut moves),
        PieceKind::Bishop | PieceKind::Queen => {
            slider_moves(board, pieces, color, from, kind.slide_dirs(), &mut moves)
        }
        PieceKind::Rook => {
            slider_moves(board, pieces, color, from, kind.slide_dirs(), &mut moves);
            if pieces[idx].can_castle {
                if let Some(dest) = rook_castle_dest(board, from) {
                    unmarked.push(dest);
                }
            }
        }
        PieceKind::King => king_moves(
            board,
            pieces,
            color,
            from,
            pieces[idx].can_castle,
            pieces[idx].in_check,
            &mut moves,
            &mut unmarked,
            &mut grants,
        ),
    }

    for &m in &moves {
        board.square_mut(m).mark_threat(color);
    }

    let mut attacking = false;
    for &m in moves.iter().chain(unmarked.iter()) {
        if let Some(occ) = board.square(m).occupant {
            let p = occ.0 as usize;
            if pieces[p].kind == PieceKind::King && pieces[p].color != color {
                pieces[p].in_check = true;
                attacking = true;
            }
        }
    }

    moves.extend(unmarked);
    pieces[idx].attacking_king = attacking;
    pieces[idx].moves = moves;

    for g in grants {
        let r = g.rook.0 as usize;
        pieces[r].can_castle = true;
        if !pieces[r].moves.contains(&g.rook_dest) {
            pieces[r].moves.push(g.rook_dest);
        }
    }
}

/// Recompute every piece of one roster, king last.
///
/// Rook castle eligibility is dropped first; the king's evaluation re-grants
/// it each pass, so it never outlives the conditions that produced it.
pub fn regenerate_roster(board: &mut Board, pieces: &mut [Piece], player: &Player) {
    for &id in &player.pieces {
        let p = &mut pieces[id.0 as usize];
        if p.kind == PieceKind::Rook {
            p.can_castle = false;
        }
    }
    for &id in &player.pieces {
        regenerate(board, pieces, id);
    }
}

/// The enemy pawn an en-passant capture onto `dest` would remove, if any.
pub fn ep_victim(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    dest: Coord,
) -> Option<PieceId> {
    let behind = Coord::new(dest.file, dest.rank - color.forward());
    let id = board.square_at(behind)?;
    let occ = board.square(id).occupant?;
    let p = &pieces[occ.0 as usize];
    (p.kind == PieceKind::Pawn && p.color != color).then_some(occ)
}

fn pawn_moves(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    from: Coord,
    moved: bool,
    out: &mut Vec<SquareId>,
) {
    let fwd = color.forward();
    let one = Coord::new(from.file, from.rank + fwd);
    if !moved {
        let two = Coord::new(from.file, from.rank + 2 * fwd);
        if let (Some(one_id), Some(two_id)) = (board.square_at(one), board.square_at(two)) {
            if !board.square(one_id).is_occupied() && !board.square(two_id).is_occupied() {
                out.push(two_id);
            }
        }
    }
    if let Some(one_id) = board.square_at(one) {
        if !board.square(one_id).is_occupied() {
            out.push(one_id);
        }
    }
    for df in [-1i16, 1] {
        let diag = Coord::new(from.file + df, from.rank + fwd);
        let Some(diag_id) = board.square_at(diag) else {
            continue;
        };
        let sq = board.square(diag_id);
        match sq.occupant {
            Some(occ) => {
                if pieces[occ.0 as usize].color != color {
                    out.push(diag_id);
                }
            }
            None => {
                if sq.en_passant_eligible() && ep_victim(board, pieces, color, diag).is_some() {
                    out.push(diag_id);
                }
            }
        }
    }
}

fn leaper_moves(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    from: Coord,
    deltas: &[Coord],
    out: &mut Vec<SquareId>,
) {
    for d in deltas {
        let Some(id) = board.square_at(from + *d) else {
            continue;
        };
        match board.square(id).occupant {
            None => out.push(id),
            Some(occ) => {
                if pieces[occ.0 as usize].color != color {
                    out.push(id);
                }
            }
        }
    }
}

fn slider_moves(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    from: Coord,
    dirs: &[Coord],
    out: &mut Vec<SquareId>,
) {
    for dir in dirs {
        let mut cur = from + *dir;
        while let Some(id) = board.square_at(cur) {
            if let Some(occ) = board.square(id).occupant {
                if pieces[occ.0 as usize].color != color {
                    out.push(id);
                }
                break;
            }
            out.push(id);
            cur += *dir;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn king_moves(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    from: Coord,
    can_castle: bool,
    in_check: bool,
    out: &mut Vec<SquareId>,
    unmarked: &mut Vec<SquareId>,
    grants: &mut Vec<CastleGrant>,
) {
    let opp = color.other();
    for step in KING_STEPS {
        let Some(id) = board.square_at(from + step) else {
            continue;
        };
        let sq = board.square(id);
        if let Some(occ) = sq.occupant {
            if pieces[occ.0 as usize].color == color {
                continue;
            }
        }
        // Threat flags come from the opponent's prior generation pass.
        if sq.threatened_by(opp) {
            continue;
        }
        out.push(id);
    }

    if can_castle && !in_check {
        // Queenside: b/c/d empty and unthreatened, unmoved rook on the a-file.
        castle_side(board, pieces, color, from, -1, 3, 4, 2, 4, unmarked, grants);
        // Kingside: f/g empty and unthreatened, unmoved rook on the h-file.
        castle_side(board, pieces, color, from, 1, 2, 3, 2, 6, unmarked, grants);
    }
}

#[allow(clippy::too_many_arguments)]
fn castle_side(
    board: &Board,
    pieces: &[Piece],
    color: Color,
    from: Coord,
    dir: i16,
    walk: i16,
    corner_off: i16,
    king_off: i16,
    rook_dest_file: i16,
    unmarked: &mut Vec<SquareId>,
    grants: &mut Vec<CastleGrant>,
) {
    let opp = color.other();
    for i in 1..=walk {
        let Some(id) = board.square_at(Coord::new(from.file + dir * i, from.rank)) else {
            return;
        };
        let sq = board.square(id);
        if sq.is_occupied() || sq.threatened_by(opp) {
            return;
        }
    }
    let Some(corner_id) = board.square_at(Coord::new(from.file + dir * corner_off, from.rank))
    else {
        return;
    };
    let Some(occ) = board.square(corner_id).occupant else {
        return;
    };
    let rook = &pieces[occ.0 as usize];
    if rook.kind != PieceKind::Rook || rook.color != color || rook.moved {
        return;
    }
    let Some(dest) = board.square_at(Coord::new(from.file + dir * king_off, from.rank)) else {
        return;
    };
    let Some(rd) = board.square_at(Coord::new(rook_dest_file, from.rank)) else {
        return;
    };
    unmarked.push(dest);
    grants.push(CastleGrant {
        rook: occ,
        rook_dest: rd,
    });
}

fn rook_castle_dest(board: &Board, from: Coord) -> Option<SquareId> {
    match from.file {
        1 => board.square_at(Coord::new(4, from.rank)),
        8 => board.square_at(Coord::new(6, from.rank)),
        _ => None,
    }
}
