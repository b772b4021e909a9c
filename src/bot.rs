use log::debug;
use rand::{Rng, seq::IndexedRandom};

use crate::{game::GameState, lan::Lan};

/// Picks a move for the side to move: a random checking move if there is
/// one, otherwise a random capture, otherwise any random legal move.
pub fn choose_move<R>(state: &GameState, rng: &mut R) -> Option<Lan>
where
    R: Rng + ?Sized,
{
    let moves = state.all_legal_moves();
    let checks: Vec<Lan> = moves
        .iter()
        .copied()
        .filter(|movement| {
            state
                .play(*movement)
                .is_some_and(|next| next.is_in_check(next.current_player()))
        })
        .collect();
    let captures: Vec<Lan> = moves
        .iter()
        .copied()
        .filter(|movement| state.board()[movement.destination].is_some())
        .collect();
    let candidates = if !checks.is_empty() {
        &checks
    } else if !captures.is_empty() {
        &captures
    } else {
        &moves
    };
    let choice = candidates.choose(rng).copied();
    if let Some(movement) = choice {
        debug!(
            "{} chooses {movement} out of {} moves ({} checks, {} captures)",
            state.current_player(),
            moves.len(),
            checks.len(),
            captures.len()
        );
    }
    choice
}
