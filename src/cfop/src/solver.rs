use std::collections::HashMap;

use cube_core::{CubeState, Move, format_moves, parse_moves};
use log::warn;
use thiserror::Error;

use crate::facelets::to_facelets;

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Failed to talk to the solver: {0}")]
    Io(#[from] std::io::Error),
    #[error("The solver exited before answering")]
    SolverExited,
    #[error("The solver rejected the cube: {0}")]
    Rejected(String),
    #[error("No solution is known for `{0}`")]
    NoSolution(String),
}

/// Anything that maps a URFDLB facelet string to a move string in standard
/// notation. Extra tokens such as rotations or slice moves are tolerated; the
/// planner drops them.
pub trait Solver {
    /// # Errors
    ///
    /// Returns an error when no solution could be produced for `facelets`.
    fn solve(&self, facelets: &str) -> Result<String, SolveError>;
}

impl<F> Solver for F
where
    F: Fn(&str) -> Result<String, SolveError>,
{
    fn solve(&self, facelets: &str) -> Result<String, SolveError> {
        self(facelets)
    }
}

/// A solver that only knows the answers it was given.
#[derive(Debug, Clone, Default)]
pub struct CannedSolver {
    answers: HashMap<String, String>,
}

impl CannedSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, facelets: impl Into<String>, solution: impl Into<String>) {
        self.answers.insert(facelets.into(), solution.into());
    }

    /// Registers `solution` as the answer for `state`.
    pub fn learn(&mut self, state: &CubeState, solution: &[Move]) {
        self.insert(to_facelets(state), format_moves(solution));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Solver for CannedSolver {
    fn solve(&self, facelets: &str) -> Result<String, SolveError> {
        self.answers
            .get(facelets)
            .cloned()
            .ok_or_else(|| SolveError::NoSolution(facelets.to_owned()))
    }
}

/// Turns a solver's answer into basic moves. Tokens that aren't one of the 18
/// basic face turns are dropped with a warning.
#[must_use]
pub fn normalize_solution(raw: &str) -> Vec<Move> {
    parse_moves(raw)
        .filter_map(|token| match token.parse::<Move>() {
            Ok(mv) => Some(mv),
            Err(e) => {
                warn!("Skipping solver token: {e}");
                None
            }
        })
        .collect()
}
