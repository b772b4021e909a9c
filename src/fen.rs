use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::Peekable,
    str::FromStr,
};

use crate::{
    board::Board,
    color::{Color, ParseColorError},
    piece::{InvalidFenPiece, Piece},
};

/// Castling, en passant and move counters are not tracked, so every
/// encoded position carries these fixed values.
pub const PLACEHOLDER_FIELDS: &str = "KQkq - 0 1";

/// Board placement and side to move. Decoding reads the first two fields
/// and ignores the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub current_player: Color,
}

/// The placement field alone.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a>(pub &'a Board);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    WrongNumberOfRows,
    UnexpectedChar(InvalidFenPiece),
    MissingSideToMove,
    InvalidSideToMove(ParseColorError),
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::UnexpectedChar(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::InvalidSideToMove(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "a row has less than 8 squares")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "a row has more than 8 squares")?,
            ParseFenError::WrongNumberOfRows => write!(f, "expected exactly 8 rows")?,
            ParseFenError::UnexpectedChar(err) => write!(f, "{err}")?,
            ParseFenError::MissingSideToMove => write!(f, "side to move is missing")?,
            ParseFenError::InvalidSideToMove(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::UnexpectedChar(err) => Some(err),
            ParseFenError::InvalidSideToMove(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_placement(src: &str) -> Result<Board, ParseFenError> {
    let mut rows = [[None; 8]; 8];
    let mut count = 0;
    for (row, text) in rows.iter_mut().zip(src.split('/')) {
        count += 1;
        let mut col: u8 = 0;
        for c in text.chars() {
            if let Some(space) = c.to_digit(10).filter(|space| (1..=8).contains(space)) {
                col += space as u8;
            } else {
                let piece = Piece::from_fen(c)?;
                *row.get_mut(col as usize)
                    .ok_or(ParseFenError::ExceedingSquaresOnRow)? = Some(piece);
                col += 1;
            }
            if col > 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        }
        if col < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if count != 8 || src.split('/').count() != 8 {
        return Err(ParseFenError::WrongNumberOfRows);
    }
    Ok(Board::from_rows(rows))
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let board = parse_placement(fields.next().unwrap_or_default())?;
        let current_player = fields
            .next()
            .ok_or(ParseFenError::MissingSideToMove)?
            .parse()?;
        Ok(Fen {
            board,
            current_player,
        })
    }
}
impl Display for Placement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (y, row) in self.0.rows().iter().enumerate() {
            if y != 0 {
                write!(f, "/")?;
            }
            for cell in CellIter(row.iter().copied().peekable()) {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {PLACEHOLDER_FIELDS}",
            Placement(&self.board),
            self.current_player.lowercase()
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(Piece),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.next_if(Option::is_none).is_some() {
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}
