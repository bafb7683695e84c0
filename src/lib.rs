//! A rules engine for standard chess: board state, per-piece legal move
//! generation, check/checkmate/stalemate semantics, and the special moves
//! (castling, en passant, promotion).
//!
//! The outer turn loop and all I/O belong to the caller; the engine is
//! driven through [`session::GameSession`].

pub mod board;
pub mod coord;
pub mod pieces;
pub mod player;
pub mod rules;
pub mod session;
pub mod square;
