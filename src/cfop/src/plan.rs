use cube_core::{CubeState, CubieId, Move, format_moves, simplify_moves};
use log::{debug, info, warn};

use crate::{
    chunk::{ChunkInfo, chunk_stage},
    facelets::to_facelets,
    highlight::{StepNote, describe_step},
    solver::{SolveError, Solver, normalize_solution},
    stage::Stage,
};

/// One physical move of the solution and what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStep {
    pub mv: Move,
    pub label: String,
    pub highlight: Vec<CubieId>,
    pub chunk: ChunkInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    pub stage: Stage,
    pub steps: Vec<StageStep>,
}

impl StagePlan {
    #[must_use]
    pub fn moves(&self) -> Vec<Move> {
        self.steps.iter().map(|step| step.mv).collect()
    }
}

/// A solution split into CFOP stages. `moves` is each stage's moves
/// simplified on their own and concatenated; it replays to the same state as
/// the steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfopPlan {
    pub stages: Vec<StagePlan>,
    pub moves: Vec<Move>,
}

impl CfopPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.steps.len()).sum()
    }

    /// Every step in playback order together with its stage.
    pub fn steps(&self) -> impl Iterator<Item = (Stage, &StageStep)> + '_ {
        self.stages
            .iter()
            .flat_map(|plan| plan.steps.iter().map(move |step| (plan.stage, step)))
    }

    #[must_use]
    pub fn stage(&self, stage: Stage) -> Option<&StagePlan> {
        self.stages.iter().find(|plan| plan.stage == stage)
    }
}

/// Solves a cube through an injected [`Solver`] and explains the answer.
#[derive(Debug, Clone)]
pub struct Planner<S> {
    solver: S,
}

impl<S: Solver> Planner<S> {
    pub fn new(solver: S) -> Self {
        Planner { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// A solved cube gets an empty plan without asking the solver.
    ///
    /// # Errors
    ///
    /// Returns the solver's error when it cannot solve `initial`.
    pub fn plan(&self, initial: &CubeState) -> Result<CfopPlan, SolveError> {
        if initial.is_solved() {
            debug!("Cube is already solved");
            return Ok(CfopPlan::default());
        }

        let facelets = to_facelets(initial);
        debug!("Solver input: {facelets}");

        let raw = self.solver.solve(&facelets)?;
        debug!("Solver output: {raw}");

        let moves = normalize_solution(&raw);
        let plan = plan_from_solution(initial, &moves);

        if initial.apply_moves(&plan.moves).is_solved() {
            info!(
                "Planned {} moves over {} stages",
                plan.moves.len(),
                plan.stages.len()
            );
        } else {
            warn!(
                "The solver's answer does not solve the cube: {}",
                format_moves(&moves)
            );
        }

        Ok(plan)
    }
}

/// The first stage from `stage` onwards whose work isn't already done.
/// The last stage is returned even when it is.
fn first_open_stage(mut stage: Stage, state: &CubeState) -> Stage {
    while stage.is_complete(state) {
        match stage.next() {
            Some(next) => stage = next,
            None => break,
        }
    }
    stage
}

struct Segment {
    stage: Stage,
    states: Vec<CubeState>,
    moves: Vec<Move>,
    notes: Vec<StepNote>,
}

impl Segment {
    fn new(stage: Stage, start: CubeState) -> Self {
        Segment {
            stage,
            states: vec![start],
            moves: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn current(&self) -> &CubeState {
        &self.states[self.states.len() - 1]
    }

    fn finish(self) -> StagePlan {
        let chunks = chunk_stage(self.stage, &self.states, &self.moves);
        let steps = self
            .moves
            .into_iter()
            .zip(self.notes)
            .zip(chunks)
            .map(|((mv, note), chunk)| StageStep {
                mv,
                label: note.label,
                highlight: note.highlight,
                chunk,
            })
            .collect();

        StagePlan {
            stage: self.stage,
            steps,
        }
    }
}

/// Replays `moves` from `initial` and splits them into stages. A stage closes
/// on the move that first completes it; stages already complete when reached
/// are skipped, and whatever follows the last close belongs to PLL.
#[must_use]
pub fn plan_from_solution(initial: &CubeState, moves: &[Move]) -> CfopPlan {
    let mut stages = Vec::new();
    let mut segment = Segment::new(first_open_stage(Stage::Cross, initial), initial.clone());

    for &mv in moves {
        let after = segment.current().apply_move(mv);
        let note = describe_step(segment.stage, segment.current(), &after);

        segment.moves.push(mv);
        segment.notes.push(note);
        segment.states.push(after);

        let closed = segment
            .stage
            .next()
            .filter(|_| segment.stage.is_complete(segment.current()));

        if let Some(next) = closed {
            let start = segment.current().clone();
            debug!(
                "{} done after {} moves",
                segment.stage,
                segment.moves.len()
            );
            stages.push(segment.finish());
            segment = Segment::new(first_open_stage(next, &start), start);
        }
    }

    if !segment.moves.is_empty() {
        stages.push(segment.finish());
    }

    let moves = stages
        .iter()
        .flat_map(|stage| simplify_moves(&stage.moves()))
        .collect();

    CfopPlan { stages, moves }
}
