use standard_chess::coord::Coord;
use standard_chess::pieces::{Color, PieceKind};
use standard_chess::session::{GameSession, Status};

fn c(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

fn bare_castling_setup() -> GameSession {
    GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("a1")),
            (Color::White, PieceKind::Rook, c("h1")),
            (Color::Black, PieceKind::King, c("e8")),
        ],
    )
}

#[test]
fn both_castles_offered_from_clean_home_rank() {
    let s = bare_castling_setup();
    let king = s.legal_moves(c("e1"));
    assert!(king.contains(&c("g1")));
    assert!(king.contains(&c("c1")));
}

#[test]
fn kingside_castle_relocates_both_pieces() {
    let mut s = bare_castling_setup();
    s.apply_move(c("e1"), c("g1"), None).unwrap();
    assert_eq!(s.piece_at(c("g1")), Some((Color::White, PieceKind::King)));
    assert_eq!(s.piece_at(c("f1")), Some((Color::White, PieceKind::Rook)));
    assert_eq!(s.piece_at(c("e1")), None);
    assert_eq!(s.piece_at(c("h1")), None);
}

#[test]
fn queenside_castle_relocates_both_pieces() {
    let mut s = bare_castling_setup();
    s.apply_move(c("e1"), c("c1"), None).unwrap();
    assert_eq!(s.piece_at(c("c1")), Some((Color::White, PieceKind::King)));
    assert_eq!(s.piece_at(c("d1")), Some((Color::White, PieceKind::Rook)));
    assert_eq!(s.piece_at(c("a1")), None);
    assert_eq!(s.piece_at(c("e1")), None);
}

#[test]
fn occupied_walk_blocks_the_castle() {
    let s = GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("h1")),
            (Color::White, PieceKind::Bishop, c("f1")),
            (Color::Black, PieceKind::King, c("e8")),
        ],
    );
    assert!(!s.legal_moves(c("e1")).contains(&c("g1")));
}

#[test]
fn occupied_queenside_walk_blocks_the_castle() {
    // The queenside walk is three squares wide; b1 alone blocks it.
    let s = GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("a1")),
            (Color::White, PieceKind::Knight, c("b1")),
            (Color::Black, PieceKind::King, c("e8")),
        ],
    );
    assert!(!s.legal_moves(c("e1")).contains(&c("c1")));
}

#[test]
fn attacked_walk_blocks_the_castle() {
    let s = GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("h1")),
            (Color::Black, PieceKind::Rook, c("f8")),
            (Color::Black, PieceKind::King, c("a8")),
        ],
    );
    // The king would pass through f1, which the f8 rook covers.
    let king = s.legal_moves(c("e1"));
    assert!(!king.contains(&c("g1")));
    assert!(!king.contains(&c("f1")));
}

#[test]
fn no_castling_out_of_check() {
    let s = GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("h1")),
            (Color::Black, PieceKind::Rook, c("e8")),
            (Color::Black, PieceKind::King, c("a7")),
        ],
    );
    assert_eq!(s.status(), Status::Check(Color::White));
    assert!(!s.legal_moves(c("e1")).contains(&c("g1")));
}

#[test]
fn rook_excursion_forfeits_the_right_permanently() {
    let mut s = GameSession::from_setup(
        Color::White,
        &[
            (Color::White, PieceKind::King, c("e1")),
            (Color::White, PieceKind::Rook, c("h1")),
            (Color::Black, PieceKind::King, c("e8")),
        ],
    );
    assert!(s.legal_moves(c("e1")).contains(&c("g1")));
    s.apply_move(c("h1"), c("h2"), None).unwrap();
    s.apply_move(c("e8"), c("d8"), None).unwrap();
    s.apply_move(c("h2"), c("h1"), None).unwrap();
    s.apply_move(c("d8"), c("e8"), None).unwrap();
    // The rook is back home but has moved; the right is gone.
    assert!(!s.legal_moves(c("e1")).contains(&c("g1")));
}

#[test]
fn king_excursion_forfeits_both_rights() {
    let mut s = bare_castling_setup();
    s.apply_move(c("e1"), c("f1"), None).unwrap();
    s.apply_move(c("e8"), c("d8"), None).unwrap();
    s.apply_move(c("f1"), c("e1"), None).unwrap();
    s.apply_move(c("d8"), c("e8"), None).unwrap();
    let king = s.legal_moves(c("e1"));
    assert!(!king.contains(&c("g1")));
    assert!(!king.contains(&c("c1")));
}
