use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Neg},
    str::FromStr,
};

/// Width and height of the board. Every coordinate check goes through
/// [`is_valid_position`] with this value.
pub const BOARD_SIZE: i8 = 8;

pub fn is_valid_position(row: i8, col: i8, board_size: i8) -> bool {
    (0..board_size).contains(&row) && (0..board_size).contains(&col)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

/// A square, addressed the way the board is stored: row 0 is rank 8 and
/// column 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}
impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(
            (row as i8) < BOARD_SIZE && (col as i8) < BOARD_SIZE,
            "({row}, {col}) is off the board"
        );
        Coord { row, col }
    }
    pub fn new_checked(row: i8, col: i8) -> Option<Self> {
        is_valid_position(row, col, BOARD_SIZE).then(|| Coord::new(row as u8, col as u8))
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord::new(row, col))
    }
    pub fn row(self) -> u8 {
        self.row
    }
    pub fn col(self) -> u8 {
        self.col
    }
    pub fn all() -> impl Iterator<Item = Self> {
        let size = BOARD_SIZE as u8;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Coord::new_checked(
            self.row as i8 + movement.row,
            self.col as i8 + movement.col,
        )
    }
    /// Squares along `direction`, excluding the starting square, until the
    /// edge of the board.
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.col + b'a') as char;
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(file, rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub col: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, col: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, col: -1 },
        Vector { row: -2, col: 1 },
        Vector { row: -1, col: -2 },
        Vector { row: -1, col: 2 },
        Vector { row: 1, col: -2 },
        Vector { row: 1, col: 2 },
        Vector { row: 2, col: -1 },
        Vector { row: 2, col: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 0 },
        Vector { row: -1, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 0 },
        Vector { row: 1, col: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: 0, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 1, col: 0 },
        Vector { row: -1, col: 0 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: 1, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: -1, col: 1 },
        Vector { row: -1, col: -1 },
    ];

    pub fn forward(row: i8) -> Self {
        Vector { row, col: 0 }
    }
    pub fn pawn_captures(row: i8) -> [Self; 2] {
        [-1, 1].map(|col| Vector { row, col })
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            row: -self.row,
            col: -self.col,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::coord::{BOARD_SIZE, Coord, ParseCoordError, Vector, is_valid_position};

    #[test]
    fn validity_is_bounded_by_board_size() {
        assert!(is_valid_position(0, 0, BOARD_SIZE));
        assert!(is_valid_position(7, 7, BOARD_SIZE));
        assert!(!is_valid_position(8, 0, BOARD_SIZE));
        assert!(!is_valid_position(0, -1, BOARD_SIZE));
        assert!(!is_valid_position(6, 6, 6));
        assert!(is_valid_position(5, 5, 6));
    }
    #[test]
    fn rank_counts_from_white_side() {
        let e2: Coord = "e2".parse().unwrap();
        assert_eq!((e2.row(), e2.col()), (6, 4));
        assert_eq!(Coord::new(0, 0).to_string(), "a8");
        assert_eq!(Coord::new(7, 7).to_string(), "h1");
    }
    #[test]
    fn parse_rejects_off_board() {
        assert_eq!(
            "i1".parse::<Coord>(),
            Err(ParseCoordError::InvalidFile('i'))
        );
        assert_eq!(
            "a9".parse::<Coord>(),
            Err(ParseCoordError::InvalidRank('9'))
        );
        assert_eq!(
            "a".parse::<Coord>(),
            Err(ParseCoordError::NotEnoughCharacter(1))
        );
    }
    #[test]
    fn line_stops_at_edge() {
        let line: Vec<_> = Coord::new(5, 6)
            .line_exclusive(Vector { row: -1, col: 1 })
            .collect();
        assert_eq!(line, [Coord::new(4, 7)]);
        assert_eq!(Coord::all().count(), 64);
    }
    #[test]
    fn move_by_leaves_board() {
        assert_eq!(Coord::new(0, 0).move_by(-Vector::forward(1)), None);
        assert_eq!(
            Coord::new(0, 0).move_by(Vector::forward(1)),
            Some(Coord::new(1, 0))
        );
    }
}
