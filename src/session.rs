//! The game session: setup, the per-half-move orchestration cycle, and the
//! move-application API the outer I/O layer drives.

use thiserror::Error;

use crate::board::{Board, SquareId};
use crate::coord::Coord;
use crate::pieces::{Color, Piece, PieceId, PieceKind};
use crate::player::Player;
use crate::rules::check;
use crate::rules::movegen;

/// Session state after the most recent half-move.
///
/// `Checkmate`, `Stalemate`, `Resigned`, and `DrawAgreed` are terminal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Ongoing,
    /// The named color is to move and in check.
    Check(Color),
    /// Winner.
    Checkmate(Color),
    Stalemate,
    /// Winner.
    Resigned(Color),
    DrawAgreed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Ongoing | Status::Check(_))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    Applied,
    /// The move was applied but the requested promotion failed closed:
    /// the kind was not one of rook/knight/bishop/queen, or the piece was
    /// not a pawn on its promotion rank.
    PromotionInvalid,
}

/// Recoverable rejections of an externally supplied move. The caller is
/// expected to reprompt; none of these disturb the session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("no such square: {0}")]
    OffBoard(Coord),
    #[error("no {to_move:?} piece on {at}")]
    WrongMover { at: Coord, to_move: Color },
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Coord, to: Coord },
    #[error("the game is already over")]
    GameOver,
}

/// One game of standard chess.
///
/// Squares and pieces live in arenas owned here; they cross-reference by
/// index (`SquareId`, `PieceId`), never by aliasing pointers, so bulk
/// move-list rewrites stay safe.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    pieces: Vec<Piece>,
    white: Player,
    black: Player,
    to_move: Color,
    status: Status,
}

impl GameSession {
    /// A fresh game in the canonical starting position, white to move.
    pub fn new() -> Self {
        let mut board = Board::new();
        let mut pieces: Vec<Piece> = Vec::new();
        let white = Self::muster(&mut board, &mut pieces, Color::White);
        let black = Self::muster(&mut board, &mut pieces, Color::Black);
        let mut session = Self {
            board,
            pieces,
            white,
            black,
            to_move: Color::White,
            status: Status::Ongoing,
        };
        movegen::regenerate_roster(&mut session.board, &mut session.pieces, &session.black);
        session.begin_turn(Color::White, false);
        session
    }

    /// An arbitrary position, for scenarios and tests.
    ///
    /// Unmoved flags are inferred from the canonical start squares. Panics
    /// on malformed fixtures: off-board or duplicate placements, or a side
    /// without exactly one king.
    pub fn from_setup(to_move: Color, placements: &[(Color, PieceKind, Coord)]) -> Self {
        let mut board = Board::new();
        let mut pieces: Vec<Piece> = Vec::new();
        let mut rosters: [Vec<PieceId>; 2] = [Vec::new(), Vec::new()];
        let mut kings: [Option<PieceId>; 2] = [None, None];

        for &(color, kind, coord) in placements {
            let sq = board
                .square_at(coord)
                .unwrap_or_else(|| panic!("placement {coord} is off the board"));
            assert!(
                board.square(sq).occupant.is_none(),
                "two pieces placed on {coord}"
            );
            let id = PieceId(pieces.len() as u16);
            let mut p = Piece::new(kind, color);
            p.square = Some(sq);
            p.moved = inferred_moved(kind, color, coord);
            if kind == PieceKind::King {
                p.can_castle = !p.moved;
            }
            board.square_mut(sq).occupant = Some(id);
            pieces.push(p);

            let side = color_index(color);
            if kind == PieceKind::King {
                assert!(kings[side].is_none(), "duplicate {color:?} king");
                kings[side] = Some(id);
            } else {
                rosters[side].push(id);
            }
        }

        let wk = kings[0].unwrap_or_else(|| panic!("setup needs a white king"));
        let bk = kings[1].unwrap_or_else(|| panic!("setup needs a black king"));
        let [mut white_ids, mut black_ids] = rosters;
        // King last: roster order is regeneration order.
        white_ids.push(wk);
        black_ids.push(bk);

        let mut session = Self {
            board,
            pieces,
            white: Player::new(Color::White, white_ids, wk),
            black: Player::new(Color::Black, black_ids, bk),
            to_move,
            status: Status::Ongoing,
        };
        let opponent = match to_move.other() {
            Color::White => &session.white,
            Color::Black => &session.black,
        };
        movegen::regenerate_roster(&mut session.board, &mut session.pieces, opponent);
        session.begin_turn(to_move, false);
        session
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Occupant of a square, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<(Color, PieceKind)> {
        let id = self.board.square_at(coord)?;
        let pid = self.board.square(id).occupant?;
        let p = &self.pieces[pid.0 as usize];
        Some((p.color, p.kind))
    }

    /// Whether this color's king currently stands in check.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self.roster(color).king;
        self.pieces[king.0 as usize].in_check
    }

    /// Current legal destinations of the piece on `coord`, for UI
    /// highlighting. Empty for vacant or off-board squares.
    pub fn legal_moves(&self, coord: Coord) -> Vec<Coord> {
        let Some(id) = self.board.square_at(coord) else {
            return Vec::new();
        };
        let Some(pid) = self.board.square(id).occupant else {
            return Vec::new();
        };
        self.pieces[pid.0 as usize]
            .moves
            .iter()
            .map(|&m| self.board.coord_of(m))
            .collect()
    }

    /// The board as a fixed-width text grid.
    pub fn render_text(&self) -> String {
        self.board.render(&self.pieces)
    }

    /// Apply one externally supplied move for the side to move.
    ///
    /// `promotion` defaults to queen when a pawn reaches its last rank.
    /// Validation happens before any mutation, so a rejected move leaves
    /// the session exactly as it was.
    pub fn apply_move(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let mover = self.to_move;
        let from_id = self.board.square_at(from).ok_or(MoveError::OffBoard(from))?;
        let to_id = self.board.square_at(to).ok_or(MoveError::OffBoard(to))?;
        let pid = self
            .board
            .square(from_id)
            .occupant
            .ok_or(MoveError::WrongMover { at: from, to_move: mover })?;
        if self.pieces[pid.0 as usize].color != mover {
            return Err(MoveError::WrongMover { at: from, to_move: mover });
        }
        if !self.pieces[pid.0 as usize].moves.contains(&to_id) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let kind = self.pieces[pid.0 as usize].kind;
        let from_c = self.board.coord_of(from_id);
        let to_c = self.board.coord_of(to_id);

        // Capture on the destination.
        if let Some(victim) = self.board.square(to_id).occupant {
            self.remove_from_play(victim);
        }

        // Relocate.
        self.board.square_mut(from_id).occupant = None;
        self.board.square_mut(to_id).occupant = Some(pid);
        self.pieces[pid.0 as usize].square = Some(to_id);

        match kind {
            PieceKind::Pawn => {
                if self.board.square(to_id).en_passant_eligible() {
                    if let Some(victim) =
                        movegen::ep_victim(&self.board, &self.pieces, mover, to_c)
                    {
                        self.remove_from_play(victim);
                    }
                    self.board.square_mut(to_id).clear_en_passant();
                }
                if (to_c.rank - from_c.rank).abs() == 2 {
                    let skipped = Coord::new(from_c.file, (from_c.rank + to_c.rank) / 2);
                    if let Some(skip_id) = self.board.square_at(skipped) {
                        self.board.square_mut(skip_id).set_en_passant();
                    }
                }
                self.pieces[pid.0 as usize].moved = true;
            }
            PieceKind::Rook => {
                self.pieces[pid.0 as usize].moved = true;
                self.pieces[pid.0 as usize].can_castle = false;
            }
            PieceKind::King => {
                // A file displacement beyond one square is a completed
                // castling move; bring the matching rook alongside.
                if (to_c.file - from_c.file).abs() > 1 {
                    self.relocate_castling_rook(from_c, to_c);
                }
                self.pieces[pid.0 as usize].moved = true;
                self.pieces[pid.0 as usize].can_castle = false;
            }
            _ => {}
        }

        let outcome = self.maybe_promote(mover, pid, to_id, to_c, promotion);

        // Post-move bookkeeping: the mover's check is resolved by its own
        // accepted move, and its lists must reflect the new board.
        let mover_p = self.roster(mover);
        let king = mover_p.king;
        self.pieces[king.0 as usize].in_check = false;
        self.board.reset_threats(mover);
        let mover_p = match mover {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        movegen::regenerate_roster(&mut self.board, &mut self.pieces, mover_p);

        self.begin_turn(mover.other(), true);
        Ok(outcome)
    }

    /// Record a draw offer; a standing offer from the opponent makes this
    /// an acceptance. Offers expire when their owner next moves.
    pub fn offer_draw(&mut self, color: Color) {
        if self.status.is_terminal() {
            return;
        }
        if self.roster(color.other()).draw_offer {
            self.status = Status::DrawAgreed;
        } else {
            self.roster_mut(color).draw_offer = true;
        }
    }

    /// Resign on behalf of `color`; the opponent wins.
    pub fn resign(&mut self, color: Color) {
        if self.status.is_terminal() {
            return;
        }
        self.status = Status::Resigned(color.other());
    }

    // ------------------------------------------------------------------
    // Orchestration
    // ------------------------------------------------------------------

    /// The fixed pre-input phase of a half-move: expire the mover's stale
    /// draw offer, tick en-passant timers, reset the mover's threat flags,
    /// regenerate the mover's lists (through the check filter when in
    /// check), and settle the status, including the terminal states.
    fn begin_turn(&mut self, mover: Color, tick: bool) {
        if tick {
            self.board.tick_en_passant();
        }
        self.to_move = mover;
        self.roster_mut(mover).draw_offer = false;
        self.board.reset_threats(mover);

        let mover_p = match mover {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        movegen::regenerate_roster(&mut self.board, &mut self.pieces, mover_p);

        let in_check = self.pieces[mover_p.king.0 as usize].in_check;
        if in_check {
            let (mp, op) = match mover {
                Color::White => (&self.white, &self.black),
                Color::Black => (&self.black, &self.white),
            };
            check::apply_check_filter(&self.board, &mut self.pieces, mp, op);
        }

        let mover_p = match mover {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        self.status = if mover_p.has_any_move(&self.pieces) {
            if in_check {
                Status::Check(mover)
            } else {
                Status::Ongoing
            }
        } else if in_check {
            Status::Checkmate(mover.other())
        } else {
            Status::Stalemate
        };
    }

    /// Promotion applies only to a pawn landing on its farthest rank and
    /// only for rook/knight/bishop/queen; anything else fails closed while
    /// the move stands. The new piece takes the pawn's square and its
    /// roster slot; the pawn leaves play.
    fn maybe_promote(
        &mut self,
        mover: Color,
        pid: PieceId,
        to_id: SquareId,
        to_c: Coord,
        promotion: Option<PieceKind>,
    ) -> MoveOutcome {
        let kind = self.pieces[pid.0 as usize].kind;
        let eligible = kind == PieceKind::Pawn && to_c.rank == mover.other().home_rank();
        if !eligible {
            return if promotion.is_some() {
                MoveOutcome::PromotionInvalid
            } else {
                MoveOutcome::Applied
            };
        }
        let requested = promotion.unwrap_or(PieceKind::Queen);
        if !requested.promotable() {
            return MoveOutcome::PromotionInvalid;
        }

        let new_id = PieceId(self.pieces.len() as u16);
        let mut promoted = Piece::new(requested, mover);
        promoted.square = Some(to_id);
        promoted.moved = true;
        self.pieces.push(promoted);

        let pawn = &mut self.pieces[pid.0 as usize];
        pawn.in_play = false;
        pawn.square = None;
        pawn.moves.clear();

        self.board.square_mut(to_id).occupant = Some(new_id);
        self.roster_mut(mover).replace_piece(pid, new_id);
        MoveOutcome::Applied
    }

    fn relocate_castling_rook(&mut self, king_from: Coord, king_to: Coord) {
        let rank = king_to.rank;
        let (corner, dest) = if king_to.file < king_from.file {
            (Coord::new(1, rank), Coord::new(4, rank))
        } else {
            (Coord::new(8, rank), Coord::new(6, rank))
        };
        let (Some(corner_id), Some(dest_id)) =
            (self.board.square_at(corner), self.board.square_at(dest))
        else {
            return;
        };
        let Some(rook) = self.board.square(corner_id).occupant else {
            return;
        };
        self.board.square_mut(corner_id).occupant = None;
        self.board.square_mut(dest_id).occupant = Some(rook);
        let r = &mut self.pieces[rook.0 as usize];
        r.square = Some(dest_id);
        r.moved = true;
        r.can_castle = false;
    }

    fn remove_from_play(&mut self, pid: PieceId) {
        let p = &mut self.pieces[pid.0 as usize];
        if let Some(sq) = p.square.take() {
            self.board.square_mut(sq).occupant = None;
        }
        p.in_play = false;
        p.moves.clear();
    }

    fn roster(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn roster_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Create one side's 16 pieces in the fixed order and place them on
    /// the canonical squares.
    fn muster(board: &mut Board, pieces: &mut Vec<Piece>, color: Color) -> Player {
        let back = color.home_rank();
        let pawn_rank = color.pawn_rank();
        let mut ids: Vec<PieceId> = Vec::with_capacity(16);

        let mut spawn = |kind: PieceKind, coord: Coord| -> PieceId {
            let id = PieceId(pieces.len() as u16);
            let mut p = Piece::new(kind, color);
            let sq = board
                .square_at(coord)
                .unwrap_or_else(|| panic!("canonical square {coord} is off the board"));
            p.square = Some(sq);
            board.square_mut(sq).occupant = Some(id);
            pieces.push(p);
            ids.push(id);
            id
        };

        for file in 1..=8 {
            spawn(PieceKind::Pawn, Coord::new(file, pawn_rank));
        }
        spawn(PieceKind::Rook, Coord::new(1, back));
        spawn(PieceKind::Rook, Coord::new(8, back));
        spawn(PieceKind::Knight, Coord::new(2, back));
        spawn(PieceKind::Knight, Coord::new(7, back));
        spawn(PieceKind::Bishop, Coord::new(3, back));
        spawn(PieceKind::Bishop, Coord::new(6, back));
        spawn(PieceKind::Queen, Coord::new(4, back));
        let king = spawn(PieceKind::King, Coord::new(5, back));

        Player::new(color, ids, king)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn inferred_moved(kind: PieceKind, color: Color, coord: Coord) -> bool {
    match kind {
        PieceKind::Pawn => coord.rank != color.pawn_rank(),
        PieceKind::Rook => {
            !(coord.rank == color.home_rank() && (coord.file == 1 || coord.file == 8))
        }
        PieceKind::King => !(coord.rank == color.home_rank() && coord.file == 5),
        _ => false,
    }
}
