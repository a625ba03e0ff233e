use cube_core::{
    CubeState, format_moves, invert_moves, random_scramble,
    self_check::{SelfCheckReport, check_move_laws},
};
use log::error;

use crate::{
    facelets::{SOLVED_FACELETS, to_facelets},
    plan::Planner,
    solver::CannedSolver,
};

/// Plans a fixed ten move scramble with a solver that knows its inverse and
/// checks that the planned moves solve the cube.
#[must_use]
pub fn check_planner_end_to_end() -> SelfCheckReport {
    let mut report = SelfCheckReport::default();

    report.record(
        "Solved cube serializes to face letters",
        to_facelets(&CubeState::solved()) == SOLVED_FACELETS,
    );

    let scramble = random_scramble(10, 42);
    let mut solver = CannedSolver::new();
    solver.learn(&scramble.state, &invert_moves(&scramble.moves));

    let name = format!("Planned solution of `{}` solves the cube", format_moves(&scramble.moves));
    let solved = match Planner::new(solver).plan(&scramble.state) {
        Ok(plan) => scramble.state.apply_moves(&plan.moves).is_solved(),
        Err(e) => {
            error!("Planner failed: {e}");
            false
        }
    };
    report.record(name, solved);

    report
}

/// Every self check: the move algebra laws and the planner round trip.
#[must_use]
pub fn run_self_checks() -> SelfCheckReport {
    let mut report = check_move_laws();
    report.extend(check_planner_end_to_end());
    report
}
