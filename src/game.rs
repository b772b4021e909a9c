use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use log::{debug, trace};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    fen::{Fen, ParseFenError},
    lan::Lan,
    piece::Piece,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidMove {
    NoPiece(Coord),
    NotYourTurn(Piece),
    IllegalDestination {
        piece: Piece,
        origin: Coord,
        destination: Coord,
    },
}
impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::NoPiece(position) => write!(f, "no piece found on {position}")?,
            InvalidMove::NotYourTurn(piece) => write!(f, "it is not {}'s turn", piece.color)?,
            InvalidMove::IllegalDestination {
                piece,
                origin,
                destination,
            } => write!(f, "{piece} on {origin} cannot move to {destination}")?,
        }
        Ok(())
    }
}
impl Error for InvalidMove {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub origin: Coord,
    pub destination: Coord,
    /// The moving piece as it was before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
}
impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(captured) = self.captured {
            write!(f, " ({} takes {})", self.piece.kind, captured.kind)?;
        }
        Ok(())
    }
}

/// Captured pieces, each listed under its own color: `white` holds the
/// white pieces black has taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Captured {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}
impl Captured {
    pub fn of(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
    fn push(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.white.push(piece),
            Color::Black => self.black.push(piece),
        }
    }
}

/// A position together with how it was reached. Never mutated once built;
/// moving produces a new `GameState`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Color,
    captured: Captured,
    history: Vec<MoveRecord>,
}
impl GameState {
    pub fn new() -> Self {
        GameState::from_board(Board::starting_position(), Color::White)
    }
    pub fn from_board(board: Board, current_player: Color) -> Self {
        GameState {
            board,
            current_player,
            captured: Captured::default(),
            history: Vec::new(),
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    pub fn captured(&self) -> &Captured {
        &self.captured
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            current_player: self.current_player,
        }
    }
    /// Legal destinations of the piece on `origin`. Pieces of the side not
    /// to move have none.
    pub fn legal_moves(&self, origin: Coord) -> Vec<Coord> {
        match self.board[origin] {
            Some(piece) if piece.color == self.current_player => self.board.legal_moves(origin),
            _ => Vec::new(),
        }
    }
    pub fn all_legal_moves(&self) -> Vec<Lan> {
        self.board
            .pieces_of(self.current_player)
            .flat_map(|(origin, _)| {
                self.board
                    .legal_moves(origin)
                    .into_iter()
                    .map(move |destination| Lan::new(origin, destination))
            })
            .collect()
    }
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.board.has_legal_moves(color)
    }
    pub fn try_move(&self, origin: Coord, destination: Coord) -> Result<Self, InvalidMove> {
        let piece = self.board[origin].ok_or(InvalidMove::NoPiece(origin))?;
        if piece.color != self.current_player {
            return Err(InvalidMove::NotYourTurn(piece));
        }
        if !self.board.legal_moves(origin).contains(&destination) {
            return Err(InvalidMove::IllegalDestination {
                piece,
                origin,
                destination,
            });
        }
        let captured = self.board[destination];
        let mut next = self.clone();
        next.board = self.board.into_moved(origin, destination);
        next.history.push(MoveRecord {
            origin,
            destination,
            piece,
            captured,
        });
        if let Some(captured) = captured {
            next.captured.push(captured);
        }
        next.current_player = !self.current_player;
        trace!("{} plays {origin}{destination}", self.current_player);
        Ok(next)
    }
    pub fn make_move(&self, origin: Coord, destination: Coord) -> Option<Self> {
        self.try_move(origin, destination)
            .inspect_err(|err| debug!("rejected {origin}{destination}: {err}"))
            .ok()
    }
    pub fn play(&self, movement: Lan) -> Option<Self> {
        self.make_move(movement.origin, movement.destination)
    }
}
impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
impl From<Fen> for GameState {
    fn from(value: Fen) -> Self {
        GameState::from_board(value.board, value.current_player)
    }
}
impl std::str::FromStr for GameState {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Fen>()?.into())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord::Coord,
        game::{GameState, InvalidMove},
        piece::{Piece, PieceKind},
    };

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }
    fn state(fen: &str) -> GameState {
        fen.parse().unwrap()
    }

    #[test]
    fn twenty_opening_moves() {
        let state = GameState::new();
        let moves = state.all_legal_moves();
        assert_eq!(moves.len(), 20);
        let pawn_moves = moves
            .iter()
            .filter(|movement| {
                state.board()[movement.origin].is_some_and(|piece| piece.kind == PieceKind::Pawn)
            })
            .count();
        assert_eq!(pawn_moves, 16);
    }
    #[test]
    fn opponent_pieces_have_no_legal_moves() {
        let state = GameState::new();
        assert!(state.legal_moves(sq("e7")).is_empty());
        assert!(!state.board().legal_moves(sq("e7")).is_empty());
        assert!(state.legal_moves(sq("e4")).is_empty());
    }
    #[test]
    fn three_square_pawn_jump_is_rejected() {
        let state = GameState::new();
        assert_eq!(state.make_move(Coord::new(6, 4), Coord::new(3, 4)), None);
        assert_eq!(
            state.try_move(sq("e2"), sq("e5")),
            Err(InvalidMove::IllegalDestination {
                piece: Piece::new(Color::White, PieceKind::Pawn),
                origin: sq("e2"),
                destination: sq("e5"),
            })
        );
        assert_eq!(
            state.try_move(sq("e3"), sq("e4")),
            Err(InvalidMove::NoPiece(sq("e3")))
        );
        assert_eq!(
            state.try_move(sq("e7"), sq("e5")),
            Err(InvalidMove::NotYourTurn(Piece::new(
                Color::Black,
                PieceKind::Pawn
            )))
        );
    }
    #[test]
    fn moving_leaves_the_previous_state_untouched() {
        let state = GameState::new();
        let before = state.clone();
        let next = state.make_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(state, before);
        assert_eq!(next.current_player(), Color::Black);
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.board()[sq("e2")], None);
        assert_eq!(
            next.board()[sq("e4")],
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }
    #[test]
    fn captures_are_listed_under_their_own_color() {
        let state = GameState::new();
        let state = ["e2e4", "d7d5", "e4d5", "d8d5"]
            .into_iter()
            .fold(state, |state, lan| state.play(lan.parse().unwrap()).unwrap());
        assert_eq!(
            state.captured().black,
            [Piece::new(Color::Black, PieceKind::Pawn)]
        );
        assert_eq!(
            state.captured().white,
            [Piece::new(Color::White, PieceKind::Pawn)]
        );
        let last = state.history().last().unwrap();
        assert_eq!(last.piece, Piece::new(Color::Black, PieceKind::Queen));
        assert_eq!(last.captured, Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(state.history().len(), 4);
    }
    #[test]
    fn hanging_queen_puzzle() {
        let state = state("r6r/1bp2ppp/p1n5/1p2p3/4P1q1/2N2N2/PPP2PPP/R1BQK2R w KQ - 0 10");
        let next = state.make_move(sq("f3"), sq("h4")).unwrap();
        assert_eq!(next.current_player(), Color::Black);
        assert!(!next.is_checkmate(Color::Black));
        assert!(next.captured().black.is_empty());

        let reply = next.make_move(sq("g4"), sq("h4")).unwrap();
        assert_eq!(
            reply.captured().white,
            [Piece::new(Color::White, PieceKind::Knight)]
        );
        assert_eq!(reply.current_player(), Color::White);
    }
    #[test]
    fn back_rank_mate() {
        let state = state("R6k/6pp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(state.is_in_check(Color::Black));
        assert!(state.is_checkmate(Color::Black));
        assert!(state.all_legal_moves().is_empty());

        let without_rook = GameState::from_board(state.board().without(sq("a8")), Color::Black);
        assert!(!without_rook.is_checkmate(Color::Black));
    }
    #[test]
    fn checkmate_does_not_depend_on_turn() {
        let state = state("R6k/6pp/8/8/8/8/8/6K1 w - - 0 1");
        assert!(state.is_checkmate(Color::Black));
        assert!(!state.is_checkmate(Color::White));
    }
    #[test]
    fn check_with_an_escape_is_not_mate() {
        let state = state("R6k/6p1/8/8/8/8/8/6K1 b - - 0 1");
        assert!(state.is_in_check(Color::Black));
        assert!(!state.is_checkmate(Color::Black));
        assert_eq!(state.legal_moves(sq("h8")), [sq("h7")]);
    }
    #[test]
    fn fools_mate() {
        let state = ["f2f3", "e7e5", "g2g4", "d8h4"]
            .into_iter()
            .fold(GameState::new(), |state, lan| {
                state.play(lan.parse().unwrap()).unwrap()
            });
        assert!(state.is_checkmate(Color::White));
        assert!(!state.is_checkmate(Color::Black));
    }
    #[test]
    fn pinned_knight_cannot_move() {
        let state = state("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!state.board().possible_moves(sq("e2")).is_empty());
        assert!(state.legal_moves(sq("e2")).is_empty());
        assert_eq!(state.make_move(sq("e2"), sq("c3")), None);
    }
    #[test]
    fn missing_king_is_tolerated() {
        let state = GameState::from_board(Board::empty(), Color::White);
        assert!(!state.is_in_check(Color::White));
        assert!(!state.is_checkmate(Color::White));
        assert!(state.all_legal_moves().is_empty());
    }
}
