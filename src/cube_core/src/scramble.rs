use log::debug;

use crate::{
    cube::CubeState,
    notation::{Face, Move, format_moves},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    pub moves: Vec<Move>,
    pub state: CubeState,
}

/// Draws `n` moves from the 18 basic moves with a seeded generator and
/// replays them from the solved state. A draw is rejected when it turns the
/// same axis as the previous move, which also rules out repeating a face.
/// The same `(n, seed)` always gives the same moves on every platform.
#[must_use]
pub fn random_scramble(n: usize, seed: u64) -> Scramble {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut moves = Vec::with_capacity(n);
    let mut last_face: Option<Face> = None;

    while moves.len() < n {
        let mv = Move::ALL[usize::from(rng.u8(..18))];

        if let Some(last) = last_face {
            if last == mv.face || last.axis() == mv.axis() {
                continue;
            }
        }

        moves.push(mv);
        last_face = Some(mv.face);
    }

    debug!("Scramble (seed={seed}): {}", format_moves(&moves));

    let state = CubeState::solved().apply_moves(&moves);
    Scramble { moves, state }
}
