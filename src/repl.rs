use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write},
    str::FromStr,
};

use rand::Rng;

use crate::{
    bot::choose_move,
    color::Color,
    coord::Coord,
    fen::{Fen, ParseFenError},
    game::GameState,
    lan::{Lan, ParseLanError},
};

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub start: GameState,
    /// Side played by the move selector, if any.
    pub bot: Option<Color>,
}
impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            start: GameState::new(),
            bot: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Help,
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    History,
    Captured,
    Bot,
    Coord(Coord),
    Move(Lan),
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "restart" => Ok(Input::Restart),
            "quit" | "exit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "history" => Ok(Input::History),
            "captured" => Ok(Input::Captured),
            "bot" => Ok(Input::Bot),
            s => {
                if let Some(fen) = s.strip_prefix("import ") {
                    Ok(Input::Import(fen.trim().parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseLanError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseLanError> for ParseInputError {
    fn from(value: ParseLanError) -> Self {
        ParseInputError::Move(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
        }
    }
}

fn write_status(output: &mut impl Write, state: &GameState) -> io::Result<()> {
    let player = state.current_player();
    if state.is_checkmate(player) {
        writeln!(output, "checkmate, {} wins", !player)?;
    } else if state.is_in_check(player) {
        writeln!(output, "{player} plays, check")?;
    } else {
        writeln!(output, "{player} plays")?;
    }
    Ok(())
}
fn write_help(output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "restart        - reset to the starting position")?;
    writeln!(output, "quit           - quit the game")?;
    writeln!(output, "import <fen>   - import a position")?;
    writeln!(output, "fen            - export the position as fen")?;
    writeln!(output, "history        - list the moves played")?;
    writeln!(output, "captured       - list the captured pieces")?;
    writeln!(output, "bot            - let the bot play the next move")?;
    writeln!(output, "e2             - view legal moves")?;
    writeln!(output, "e2e4           - play the move")?;
    Ok(())
}
/// Lets the bot answer while it is its turn. Returns whether it moved.
fn bot_reply<R>(
    output: &mut impl Write,
    state: &mut GameState,
    bot: Option<Color>,
    rng: &mut R,
) -> io::Result<bool>
where
    R: Rng + ?Sized,
{
    if bot != Some(state.current_player()) {
        return Ok(false);
    }
    let Some(movement) = choose_move(state, rng) else {
        return Ok(false);
    };
    if let Some(next) = state.play(movement) {
        writeln!(output, "bot plays {movement}")?;
        *state = next;
        Ok(true)
    } else {
        Ok(false)
    }
}
pub fn repl<R>(
    input: impl BufRead,
    mut output: impl Write,
    config: &ReplConfig,
    rng: &mut R,
) -> io::Result<()>
where
    R: Rng + ?Sized,
{
    let mut state = config.start.clone();
    writeln!(output, "type `help` for instructions")?;
    bot_reply(&mut output, &mut state, config.bot, rng)?;
    write_status(&mut output, &state)?;
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let input = match text.parse::<Input>() {
            Ok(input) => input,
            Err(err) => {
                writeln!(output, "Error: {err}")?;
                writeln!(output, "for available command, enter `help`")?;
                continue;
            }
        };
        let mut update = false;
        match input {
            Input::Help => write_help(&mut output)?,
            Input::Restart => {
                state = config.start.clone();
                update = true;
            }
            Input::Quit => return Ok(()),
            Input::Import(fen) => {
                state = fen.into();
                update = true;
            }
            Input::ExportFen => writeln!(output, "{}", state.fen())?,
            Input::History => {
                for (i, record) in state.history().iter().enumerate() {
                    writeln!(output, "{}. {record}", i + 1)?;
                }
            }
            Input::Captured => {
                for color in Color::ALL {
                    let pieces: Vec<_> = state
                        .captured()
                        .of(color)
                        .iter()
                        .map(|piece| piece.kind.to_string())
                        .collect();
                    writeln!(output, "{color}: {}", pieces.join(", "))?;
                }
            }
            Input::Bot => {
                let player = state.current_player();
                update = bot_reply(&mut output, &mut state, Some(player), rng)?;
                if !update {
                    writeln!(output, "Error: {player} has no legal moves")?;
                }
            }
            Input::Coord(position) => {
                if state.board()[position].is_none() {
                    writeln!(output, "Error: No piece found on {position}")?;
                    continue;
                }
                let moves: Vec<_> = state
                    .legal_moves(position)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(output, "{position}: {}", moves.join(" "))?;
            }
            Input::Move(lan) => match state.try_move(lan.origin, lan.destination) {
                Ok(next) => {
                    state = next;
                    update = true;
                }
                Err(err) => writeln!(output, "Error: {err}")?,
            },
        }
        if update {
            bot_reply(&mut output, &mut state, config.bot, rng)?;
            write_status(&mut output, &state)?;
        }
    }
    Ok(())
}
