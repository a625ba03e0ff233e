//! Executable invariants of the move algebra, meant to be run on demand
//! (from a test or a diagnostic command) rather than on startup.

use log::{error, info};

use crate::{
    cube::CubeState,
    notation::{Amount, Face, Move},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub passed: bool,
}

/// Outcome of a batch of self checks. Failures are logged, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfCheckReport {
    pub checks: Vec<Check>,
}

impl SelfCheckReport {
    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        let name = name.into();
        if passed {
            info!("✅ {name}");
        } else {
            error!("❌ {name}");
        }
        self.checks.push(Check { name, passed });
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|check| !check.passed)
    }

    pub fn extend(&mut self, other: SelfCheckReport) {
        self.checks.extend(other.checks);
    }
}

/// For every face: a turn followed by its inverse restores the state, and two
/// turns equal the double turn.
#[must_use]
pub fn check_move_laws() -> SelfCheckReport {
    let mut report = SelfCheckReport::default();
    let solved = CubeState::solved();

    for face in Face::ALL {
        let mv = Move::new(face, Amount::Single);
        let turned = solved.apply_move(mv);

        report.record(
            format!("{mv} then {} restores the state", mv.inverse()),
            turned.apply_move(mv.inverse()) == solved,
        );
        report.record(
            format!("{mv} {mv} equals {face}2"),
            turned.apply_move(mv) == solved.apply_move(Move::new(face, Amount::Double)),
        );
    }

    report
}
