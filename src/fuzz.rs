//! Random self-play checked move by move against the `chess` crate.
//!
//! The reference board is rebuilt from the placement and side to move with
//! castling and en passant disabled, and promotions are folded into plain
//! moves, since none of those exist here.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use log::info;
use rand::{Rng, seq::IndexedRandom};
use rustc_hash::FxHashSet;

use crate::{
    coord::Coord,
    fen::{Fen, Placement},
    game::GameState,
    lan::Lan,
};

impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            7 - u8::try_from(value.get_rank().to_index()).unwrap(),
            u8::try_from(value.get_file().to_index()).unwrap(),
        )
    }
}
impl From<chess::ChessMove> for Lan {
    fn from(value: chess::ChessMove) -> Self {
        Lan::new(value.get_source().into(), value.get_dest().into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disagreement {
    Extra(Lan),
    Missing(Lan),
    Check { ours: bool },
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub fen: Fen,
    pub disagreement: Disagreement,
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.disagreement {
            Disagreement::Extra(movement) => {
                write!(f, "found {movement} but it's not a legal move")?;
            }
            Disagreement::Missing(movement) => write!(f, "{movement} not found")?,
            Disagreement::Check { ours } => {
                write!(f, "check detected as {ours}, expected {}", !ours)?;
            }
        }
        write!(f, "\n{}", self.fen)?;
        Ok(())
    }
}
impl Error for Mismatch {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FuzzSummary {
    pub games: usize,
    pub plies: usize,
}
impl Display for FuzzSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} games, {} plies checked", self.games, self.plies)?;
        Ok(())
    }
}

fn reference(state: &GameState) -> Option<chess::Board> {
    format!(
        "{} {} - - 0 1",
        Placement(state.board()),
        state.current_player().lowercase()
    )
    .parse()
    .ok()
}
fn check_position(state: &GameState, reference: &chess::Board) -> Result<Vec<Lan>, Mismatch> {
    let mismatch = |disagreement| Mismatch {
        fen: state.fen(),
        disagreement,
    };
    let moves = state.all_legal_moves();
    let ours: FxHashSet<Lan> = moves.iter().copied().collect();
    let theirs: FxHashSet<Lan> = chess::MoveGen::new_legal(reference).map(Into::into).collect();
    if let Some(movement) = ours.difference(&theirs).next() {
        return Err(mismatch(Disagreement::Extra(*movement)));
    }
    if let Some(movement) = theirs.difference(&ours).next() {
        return Err(mismatch(Disagreement::Missing(*movement)));
    }
    let check = state.is_in_check(state.current_player());
    if check != (reference.checkers().popcnt() != 0) {
        return Err(mismatch(Disagreement::Check { ours: check }));
    }
    Ok(moves)
}
/// Plays `games` random games of at most `max_plies` plies each.
pub fn cross_check<R>(games: usize, max_plies: usize, rng: &mut R) -> Result<FuzzSummary, Mismatch>
where
    R: Rng + ?Sized,
{
    let mut summary = FuzzSummary::default();
    for game in 0..games {
        let mut state = GameState::new();
        for _ in 0..max_plies {
            // a pawn that reached its last rank is not a position the
            // reference accepts
            let Some(reference) = reference(&state) else {
                break;
            };
            let moves = check_position(&state, &reference)?;
            summary.plies += 1;
            let Some(movement) = moves.choose(rng) else {
                break;
            };
            let Some(next) = state.play(*movement) else {
                break;
            };
            state = next;
        }
        summary.games += 1;
        info!("game {game} ended after {} moves", state.history().len());
    }
    Ok(summary)
}
#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::fuzz::cross_check;

    #[test]
    fn agrees_with_reference_move_generator() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let summary = cross_check(24, 120, &mut rng).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(summary.games, 24);
        assert!(summary.plies >= 24);
    }
}
