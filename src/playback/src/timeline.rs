use std::collections::BTreeMap;

use cfop::{CfopPlan, ChunkInfo, Stage};
use cube_core::{CubeState, CubieId, Move};

/// One move of a timeline with whatever the planner said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    pub mv: Move,
    pub stage: Option<Stage>,
    pub label: Option<String>,
    pub highlight: Vec<CubieId>,
    pub chunk: Option<ChunkInfo>,
}

/// A flattened sequence of moves from a known start, with cube snapshots at
/// every chunk start so any position can be rebuilt by replaying at most one
/// chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    start: CubeState,
    steps: Vec<TimelineStep>,
    stage_offsets: Vec<(Stage, usize)>,
    chunk_starts: Vec<usize>,
    /// State before the step at the key.
    snapshots: BTreeMap<usize, CubeState>,
}

impl Timeline {
    /// Plain moves, e.g. a scramble. Every move is its own chunk.
    #[must_use]
    pub fn from_moves(start: CubeState, moves: &[Move]) -> Self {
        let steps = moves
            .iter()
            .map(|&mv| TimelineStep {
                mv,
                stage: None,
                label: None,
                highlight: Vec::new(),
                chunk: None,
            })
            .collect();
        Self::build(start, steps)
    }

    /// Every step of `plan`, played from `start`.
    #[must_use]
    pub fn from_plan(start: CubeState, plan: &CfopPlan) -> Self {
        let steps = plan
            .steps()
            .map(|(stage, step)| TimelineStep {
                mv: step.mv,
                stage: Some(stage),
                label: Some(step.label.clone()),
                highlight: step.highlight.clone(),
                chunk: Some(step.chunk.clone()),
            })
            .collect();
        Self::build(start, steps)
    }

    fn build(start: CubeState, steps: Vec<TimelineStep>) -> Self {
        let mut stage_offsets: Vec<(Stage, usize)> = Vec::new();
        let mut chunk_starts = Vec::new();
        let mut snapshots = BTreeMap::new();
        let mut state = start.clone();

        for (i, step) in steps.iter().enumerate() {
            if let Some(stage) = step.stage {
                if stage_offsets.last().is_none_or(|&(last, _)| last != stage) {
                    stage_offsets.push((stage, i));
                }
            }

            let starts_chunk = step.chunk.as_ref().is_none_or(|chunk| chunk.index == 0);
            if starts_chunk || i == 0 {
                chunk_starts.push(i);
                snapshots.insert(i, state.clone());
            }

            state = state.apply_move(step.mv);
        }

        Timeline {
            start,
            steps,
            stage_offsets,
            chunk_starts,
            snapshots,
        }
    }

    #[must_use]
    pub fn start(&self) -> &CubeState {
        &self.start
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&TimelineStep> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    /// Where each stage begins, in order.
    #[must_use]
    pub fn stage_offsets(&self) -> &[(Stage, usize)] {
        &self.stage_offsets
    }

    #[must_use]
    pub fn chunk_starts(&self) -> &[usize] {
        &self.chunk_starts
    }

    /// Clamps `index` to `[0, last step]`.
    #[must_use]
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.len().saturating_sub(1))
    }

    /// The stage of the step at `index`; `None` past the end, which reads as
    /// solved, and for steps without a stage.
    #[must_use]
    pub fn stage_for_index(&self, index: usize) -> Option<Stage> {
        self.steps.get(index).and_then(|step| step.stage)
    }

    /// `[start, end)` of the chunk holding the step at `index`.
    #[must_use]
    pub fn chunk_bounds(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len() {
            return None;
        }
        let pos = self.chunk_starts.partition_point(|&s| s <= index);
        let start = self.chunk_starts[pos - 1];
        let end = self.chunk_starts.get(pos).copied().unwrap_or(self.len());
        Some((start, end))
    }

    /// The first chunk start after `index`, or the end of the timeline.
    #[must_use]
    pub fn next_chunk_start(&self, index: usize) -> usize {
        self.chunk_starts
            .iter()
            .copied()
            .find(|&s| s > index)
            .unwrap_or(self.len())
    }

    /// The start of the chunk before the one holding `index`.
    #[must_use]
    pub fn previous_chunk_start(&self, index: usize) -> usize {
        let current = self
            .chunk_starts
            .iter()
            .copied()
            .rfind(|&s| s <= index)
            .unwrap_or(0);
        self.chunk_starts
            .iter()
            .copied()
            .rfind(|&s| s < current)
            .unwrap_or(0)
    }

    /// The cube before the step at `index` (after every step when `index` is
    /// past the end), replayed from the nearest snapshot.
    #[must_use]
    pub fn state_at(&self, index: usize) -> CubeState {
        let index = index.min(self.len());
        let (from, snapshot) = self
            .snapshots
            .range(..=index)
            .next_back()
            .map_or((0, &self.start), |(&i, state)| (i, state));

        let moves: Vec<Move> = self.steps[from..index].iter().map(|step| step.mv).collect();
        snapshot.apply_moves(&moves)
    }
}
