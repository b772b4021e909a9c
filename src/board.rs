use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    coord::{Coord, Vector},
    piece::{Piece, PieceKind},
};

/// Piece placement, stored `[row][col]` with row 0 being rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([[Option<Piece>; 8]; 8]);

impl Board {
    pub fn empty() -> Self {
        Board::default()
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = color.home_row() as usize;
            let pawns = color.pawn_home_row() as usize;
            board.0[home] = PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(color, kind)));
            board.0[pawns] = [Some(Piece::new(color, PieceKind::Pawn)); 8];
        }
        board
    }
    pub fn from_rows(rows: [[Option<Piece>; 8]; 8]) -> Self {
        Board(rows)
    }
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.0
    }
    pub fn with(mut self, position: Coord, piece: Piece) -> Self {
        self[position] = Some(piece);
        self
    }
    pub fn without(mut self, position: Coord) -> Self {
        self[position] = None;
        self
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn king_of(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    fn is_friendly(&self, position: Coord, color: Color) -> bool {
        self[position].is_some_and(|piece| piece.color == color)
    }
    fn step_moves(&self, origin: Coord, color: Color, moves: &[Vector]) -> Vec<Coord> {
        moves
            .iter()
            .filter_map(|movement| origin.move_by(*movement))
            .filter(|destination| !self.is_friendly(*destination, color))
            .collect()
    }
    fn directional_moves(&self, origin: Coord, color: Color, directions: &[Vector]) -> Vec<Coord> {
        let mut moves = Vec::new();
        for direction in directions {
            for destination in origin.line_exclusive(*direction) {
                match self[destination] {
                    None => moves.push(destination),
                    Some(piece) => {
                        if piece.color != color {
                            moves.push(destination);
                        }
                        break;
                    }
                }
            }
        }
        moves
    }
    fn pawn_moves(&self, origin: Coord, color: Color) -> Vec<Coord> {
        let direction = color.pawn_direction();
        let mut moves = Vec::new();
        if let Some(single) = origin
            .move_by(Vector::forward(direction))
            .filter(|position| self[*position].is_none())
        {
            moves.push(single);
            if origin.row() == color.pawn_home_row() {
                if let Some(double) = origin
                    .move_by(Vector::forward(direction * 2))
                    .filter(|position| self[*position].is_none())
                {
                    moves.push(double);
                }
            }
        }
        moves.extend(
            Vector::pawn_captures(direction)
                .into_iter()
                .filter_map(|movement| origin.move_by(movement))
                .filter(|destination| self[*destination].is_some_and(|piece| piece.color != color)),
        );
        moves
    }
    /// Destinations the piece on `origin` could reach by its movement rules
    /// alone, whether or not its own king would be left in check.
    pub fn possible_moves(&self, origin: Coord) -> Vec<Coord> {
        let Some(piece) = self[origin] else {
            return Vec::new();
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(origin, piece.color),
            PieceKind::Knight => self.step_moves(origin, piece.color, &Vector::KNIGHT_MOVES),
            PieceKind::Bishop => {
                self.directional_moves(origin, piece.color, &Vector::BISHOP_DIRECTIONS)
            }
            PieceKind::Rook => self.directional_moves(origin, piece.color, &Vector::ROOK_DIRECTIONS),
            PieceKind::Queen => {
                let mut moves =
                    self.directional_moves(origin, piece.color, &Vector::ROOK_DIRECTIONS);
                moves.extend(self.directional_moves(
                    origin,
                    piece.color,
                    &Vector::BISHOP_DIRECTIONS,
                ));
                moves
            }
            PieceKind::King => self.step_moves(origin, piece.color, &Vector::KING_MOVES),
        }
    }
    /// Whether `position` is a pseudo-legal destination of any piece of
    /// `color`.
    pub fn is_attacked_by(&self, position: Coord, color: Color) -> bool {
        self.pieces_of(color)
            .any(|(origin, _)| self.possible_moves(origin).contains(&position))
    }
    /// A board without a king of `color` is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_of(color)
            .is_some_and(|king| self.is_attacked_by(king, !color))
    }
    /// Placement after moving whatever stands on `origin` to `destination`.
    /// Nothing is validated.
    pub fn into_moved(mut self, origin: Coord, destination: Coord) -> Self {
        self[destination] = self[origin].take();
        self
    }
    /// Pseudo-legal moves of the piece on `origin` that do not leave its
    /// own king in check. Ignores whose turn it is.
    pub fn legal_moves(&self, origin: Coord) -> Vec<Coord> {
        let Some(piece) = self[origin] else {
            return Vec::new();
        };
        self.possible_moves(origin)
            .into_iter()
            .filter(|destination| {
                !self
                    .into_moved(origin, *destination)
                    .is_in_check(piece.color)
            })
            .collect()
    }
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color)
            .any(|(origin, _)| !self.legal_moves(origin).is_empty())
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[index.row() as usize][index.col() as usize]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.0[index.row() as usize][index.col() as usize]
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord::Coord,
        fen::Fen,
        piece::{Piece, PieceKind},
    };

    fn board(fen: &str) -> Board {
        fen.parse::<Fen>().unwrap().board
    }
    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }
    fn sorted(mut moves: Vec<Coord>) -> Vec<Coord> {
        moves.sort();
        moves
    }
    fn squares(list: &[&str]) -> Vec<Coord> {
        sorted(list.iter().map(|s| sq(s)).collect())
    }

    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let board = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(board.possible_moves(sq("e2")).is_empty());

        let board = board.without(sq("e3")).with(sq("e4"), Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(board.possible_moves(sq("e2")), squares(&["e3"]));
    }
    #[test]
    fn pawn_captures_only_diagonally_forward() {
        let board = board("4k3/8/8/8/3p1P2/4P3/8/4K3 b - - 0 1");
        assert_eq!(sorted(board.possible_moves(sq("d4"))), squares(&["d3", "e3"]));
        assert!(board.possible_moves(sq("f4")).contains(&sq("f5")));
        assert_eq!(sorted(board.possible_moves(sq("e3"))), squares(&["d4", "e4"]));
    }
    #[test]
    fn black_pawn_double_step_from_row_one() {
        let board = Board::starting_position();
        assert_eq!(sorted(board.possible_moves(sq("d7"))), squares(&["d5", "d6"]));
    }
    #[test]
    fn rook_stops_at_pieces() {
        let board = board("4k3/8/8/8/R2p4/8/8/P3K3 w - - 0 1");
        assert_eq!(
            sorted(board.possible_moves(sq("a4"))),
            squares(&["a2", "a3", "a5", "a6", "a7", "a8", "b4", "c4", "d4"])
        );
    }
    #[test]
    fn queen_combines_rook_and_bishop() {
        let board = board("8/8/8/8/8/8/1k6/Q6K w - - 0 1");
        let moves = board.possible_moves(sq("a1"));
        assert_eq!(moves.len(), 7 + 6 + 1);
        assert!(moves.contains(&sq("b2")));
        assert!(!moves.contains(&sq("c3")));
    }
    #[test]
    fn knight_jumps_and_avoids_friends() {
        let board = Board::starting_position();
        assert_eq!(sorted(board.possible_moves(sq("b1"))), squares(&["a3", "c3"]));
        let board = board.without(sq("b1")).with(sq("a8"), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(sorted(board.possible_moves(sq("a8"))), squares(&["b6", "c7"]));
    }
    #[test]
    fn king_steps_one_square() {
        let board = board("8/8/8/8/8/8/8/K6k w - - 0 1");
        assert_eq!(sorted(board.possible_moves(sq("a1"))), squares(&["a2", "b1", "b2"]));
    }
    #[test]
    fn empty_square_has_no_moves() {
        assert!(Board::starting_position().possible_moves(sq("e4")).is_empty());
        assert!(Board::starting_position().legal_moves(sq("e4")).is_empty());
    }
    #[test]
    fn missing_king_is_never_in_check() {
        let board = board("8/8/8/8/8/8/8/r6K w - - 0 1");
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
    }
    #[test]
    fn pinned_piece_cannot_move() {
        let board = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!board.possible_moves(sq("e2")).is_empty());
        assert!(board.legal_moves(sq("e2")).is_empty());
    }
    #[test]
    fn king_cannot_step_into_attack() {
        let board = board("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        assert_eq!(sorted(board.legal_moves(sq("e1"))), squares(&["d1", "f1"]));
    }
    #[test]
    fn simulated_move_leaves_board_untouched() {
        let board = Board::starting_position();
        let moved = board.into_moved(sq("e2"), sq("e4"));
        assert_eq!(board, Board::starting_position());
        assert_eq!(moved[sq("e4")], Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(moved[sq("e2")], None);
    }
}
