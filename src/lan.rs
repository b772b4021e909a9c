use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::coord::{Coord, ParseCoordError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    TooShort(usize),
    ParseCoordError(ParseCoordError),
}
impl From<ParseCoordError> for ParseLanError {
    fn from(value: ParseCoordError) -> Self {
        ParseLanError::ParseCoordError(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::TooShort(len) => write!(
                f,
                "provided string have length of {len} characters, at least 4 were expected"
            )?,
            ParseLanError::ParseCoordError(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseCoordError(err) => Some(err),
            ParseLanError::TooShort(_) => None,
        }
    }
}

/// A move in coordinate notation, e.g. `e2e4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub origin: Coord,
    pub destination: Coord,
}
impl Lan {
    pub fn new(origin: Coord, destination: Coord) -> Self {
        Lan {
            origin,
            destination,
        }
    }
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    /// Only the first four characters are read; anything after them, such
    /// as a promotion letter, is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().take(4).collect();
        let &[origin_file, origin_rank, destination_file, destination_rank] = chars.as_slice() else {
            return Err(ParseLanError::TooShort(chars.len()));
        };
        Ok(Lan {
            origin: Coord::from_chars(origin_file, origin_rank)?,
            destination: Coord::from_chars(destination_file, destination_rank)?,
        })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        coord::{Coord, ParseCoordError},
        lan::{Lan, ParseLanError},
    };

    #[test]
    fn e2e4() {
        let lan = Lan::new(Coord::new(6, 4), Coord::new(4, 4));
        assert_eq!(lan.to_string(), "e2e4");
        assert_eq!("e2e4".parse(), Ok(lan));
    }
    #[test]
    fn short_input_is_rejected() {
        assert_eq!("e2e".parse::<Lan>(), Err(ParseLanError::TooShort(3)));
        assert_eq!("".parse::<Lan>(), Err(ParseLanError::TooShort(0)));
    }
    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            "e2e9".parse::<Lan>(),
            Err(ParseLanError::ParseCoordError(ParseCoordError::InvalidRank(
                '9'
            )))
        );
        assert_eq!(
            "z2e4".parse::<Lan>(),
            Err(ParseLanError::ParseCoordError(ParseCoordError::InvalidFile(
                'z'
            )))
        );
        assert!("E2E4".parse::<Lan>().is_err());
    }
    #[test]
    fn trailing_characters_are_ignored() {
        assert_eq!("e7e8q".parse::<Lan>(), "e7e8".parse::<Lan>());
    }
    #[test]
    fn every_square_pair_survives_notation() {
        for origin in Coord::all() {
            for destination in Coord::all() {
                let lan = Lan::new(origin, destination);
                assert_eq!(lan.to_string().parse(), Ok(lan));
            }
        }
    }
}
