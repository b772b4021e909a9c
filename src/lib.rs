#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

//! Rules for a reduced game of chess: no castling, en passant or promotion,
//! and no draw rules. Positions are exchanged as a restricted FEN and moves
//! as coordinate notation (`e2e4`).

pub mod board;
pub mod bot;
pub mod color;
pub mod coord;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod lan;
pub mod piece;
pub mod repl;

pub use crate::{
    board::Board,
    bot::choose_move,
    color::Color,
    coord::{BOARD_SIZE, Coord, is_valid_position},
    fen::{Fen, ParseFenError},
    game::{Captured, GameState, InvalidMove, MoveRecord},
    lan::{Lan, ParseLanError},
    piece::{Piece, PieceKind},
};

pub fn initial_state() -> GameState {
    GameState::new()
}
pub fn legal_moves(state: &GameState, position: Coord) -> Vec<Coord> {
    state.legal_moves(position)
}
pub fn make_move(state: &GameState, from: Coord, to: Coord) -> Option<GameState> {
    state.make_move(from, to)
}
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    state.is_in_check(color)
}
pub fn is_checkmate(state: &GameState, color: Color) -> bool {
    state.is_checkmate(color)
}
/// Placement and side to move, followed by the fixed `KQkq - 0 1`.
pub fn encode_fen(state: &GameState) -> String {
    state.fen().to_string()
}
/// Only the placement and side-to-move fields are read. The decoded state
/// has no history and no captured pieces.
pub fn decode_fen(fen: &str) -> Result<GameState, ParseFenError> {
    fen.parse()
}
pub fn encode_move(from: Coord, to: Coord) -> String {
    Lan::new(from, to).to_string()
}
pub fn decode_move(notation: &str) -> Option<Lan> {
    notation.parse().ok()
}
