use standard_chess::coord::Coord;
use standard_chess::pieces::Color;
use standard_chess::session::{GameSession, Status};

fn c(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

fn move_count(session: &GameSession, color: Color) -> usize {
    let mut total = 0;
    for file in 1..=8 {
        for rank in 1..=8 {
            let sq = Coord::new(file, rank);
            if session.piece_at(sq).map(|(col, _)| col) == Some(color) {
                total += session.legal_moves(sq).len();
            }
        }
    }
    total
}

#[test]
fn both_sides_open_with_twenty_moves() {
    let s = GameSession::new();
    assert_eq!(s.status(), Status::Ongoing);
    assert_eq!(s.to_move(), Color::White);
    // 16 pawn moves plus 4 knight moves each.
    assert_eq!(move_count(&s, Color::White), 20);
    assert_eq!(move_count(&s, Color::Black), 20);
}

#[test]
fn black_still_has_twenty_replies_after_e4() {
    let mut s = GameSession::new();
    s.apply_move(c("e2"), c("e4"), None).unwrap();
    assert_eq!(s.to_move(), Color::Black);
    assert_eq!(move_count(&s, Color::Black), 20);
}

#[test]
fn destinations_stay_on_board_and_off_friendly_pieces() {
    let s = GameSession::new();
    for file in 1..=8 {
        for rank in 1..=8 {
            let sq = Coord::new(file, rank);
            let Some((color, _)) = s.piece_at(sq) else {
                continue;
            };
            for dest in s.legal_moves(sq) {
                assert!(
                    (1..=8).contains(&dest.file) && (1..=8).contains(&dest.rank),
                    "{sq} -> {dest} leaves the board"
                );
                assert_ne!(
                    s.piece_at(dest).map(|(col, _)| col),
                    Some(color),
                    "{sq} -> {dest} lands on a friendly piece"
                );
            }
        }
    }
}

#[test]
fn starting_position_renders_canonically() {
    let s = GameSession::new();
    let text = s.render_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "bR bN bB bQ bK bB bN bR 8");
    assert_eq!(lines[1], "bp bp bp bp bp bp bp bp 7");
    // Empty middle ranks alternate the dark filler with blank light cells.
    assert_eq!(lines[3], "##    ##    ##    ##    5");
    assert_eq!(lines[4], "   ##    ##    ##    ## 4");
    assert_eq!(lines[6], "wp wp wp wp wp wp wp wp 2");
    assert_eq!(lines[7], "wR wN wB wQ wK wB wN wR 1");
    assert_eq!(lines[8], " a  b  c  d  e  f  g  h ");
}

#[test]
fn kings_start_out_of_check() {
    let s = GameSession::new();
    assert!(!s.in_check(Color::White));
    assert!(!s.in_check(Color::Black));
}
