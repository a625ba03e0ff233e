use std::time::Duration;

use cfop::Stage;
use cube_core::{CubeState, Move};
use log::{debug, info};

use crate::{
    clock::Clock,
    config::{MAX_MS_PER_QUARTER_TURN, MIN_MS_PER_QUARTER_TURN, PlaybackConfig},
    frame::{PlaybackEvents, RotationFrame},
    machine::{Effect, Input, PendingMove, Phase, advance},
    timeline::Timeline,
};

/// Drives a [`Timeline`] one frame at a time. The player owns the logical cube
/// and commits each move only once its animation has finished.
pub struct Player<C, F, E> {
    clock: C,
    frame: F,
    events: E,
    config: PlaybackConfig,
    timeline: Timeline,
    cube: CubeState,
    /// Index of the next step to commit.
    cursor: usize,
    phase: Phase,
    paused: bool,
    last_seek: Option<Duration>,
    pending_seek: Option<usize>,
}

impl<C: Clock, F: RotationFrame, E: PlaybackEvents> Player<C, F, E> {
    #[must_use]
    pub fn new(start: CubeState, clock: C, frame: F, events: E, config: PlaybackConfig) -> Self {
        Player {
            clock,
            frame,
            events,
            config,
            timeline: Timeline::from_moves(start.clone(), &[]),
            cube: start,
            cursor: 0,
            phase: Phase::Idle,
            paused: false,
            last_seek: None,
            pending_seek: None,
        }
    }

    /// Replaces whatever was playing with `timeline`, starting from its
    /// first step.
    pub fn load(&mut self, timeline: Timeline) {
        self.cancel_tween();
        self.cube = timeline.start().clone();
        self.timeline = timeline;
        self.cursor = 0;
        self.paused = false;
        self.pending_seek = None;
    }

    /// Finishes anything in flight, then queues `moves` from the resulting
    /// cube.
    pub fn play_moves(&mut self, moves: &[Move]) {
        self.flush();
        let timeline = Timeline::from_moves(self.cube.clone(), moves);
        self.load(timeline);
    }

    /// Advances by one frame.
    pub fn tick(&mut self) {
        let now = self.clock.now();

        if let Some(index) = self.pending_seek {
            if self.seek_is_due(now) {
                self.pending_seek = None;
                self.apply_seek(index, now);
            }
        }

        if self.paused {
            return;
        }

        let input = if matches!(self.phase, Phase::Idle) {
            match self.pending_move() {
                Some(pending) => Input::Start(pending),
                None => return,
            }
        } else {
            Input::Tick
        };
        self.step(input, now);
    }

    fn pending_move(&self) -> Option<PendingMove> {
        let step = self.timeline.step(self.cursor)?;
        let mv = step.mv;

        Some(PendingMove {
            mv,
            stage: step.stage,
            pieces: self.cube.face_layer(mv.face).map(|c| c.id).collect(),
            duration: self.config.move_duration(mv),
        })
    }

    fn step(&mut self, input: Input, now: Duration) {
        let phase = std::mem::take(&mut self.phase);
        let (phase, effects) = advance(phase, input, now);
        self.phase = phase;

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Stage(stage) => self.events.stage_reported(stage),
            Effect::MoveStarted(_) => {
                if let Some(step) = self.timeline.step(self.cursor) {
                    self.events.move_started(self.cursor, step);
                }
            }
            Effect::Attach { face, pieces } => self.frame.attach(face, &pieces),
            Effect::Rotate { axis, radians } => self.frame.rotate(axis, radians),
            Effect::Detach => self.frame.detach(),
            Effect::Commit(mv) => {
                self.cube = self.cube.apply_move(mv);
                self.events.move_committed(self.cursor, &self.cube);
                self.cursor += 1;

                if self.cursor == self.timeline.len() {
                    debug!("Played all {} moves", self.timeline.len());
                    self.events.finished();
                }
            }
        }
    }

    fn cancel_tween(&mut self) {
        let now = self.clock.now();
        self.step(Input::Cancel, now);
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            let now = self.clock.now();
            self.step(Input::Pause, now);
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            let now = self.clock.now();
            self.step(Input::Resume, now);
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Changes the speed, including for the move in flight, which keeps its
    /// elapsed fraction.
    pub fn set_ms_per_quarter_turn(&mut self, ms: u64) {
        self.config.ms_per_quarter_turn = ms.clamp(MIN_MS_PER_QUARTER_TURN, MAX_MS_PER_QUARTER_TURN);

        let animating = match &self.phase {
            Phase::Animating(tween) => Some(tween.mv),
            Phase::Idle | Phase::Committing(_) => None,
        };
        if let Some(mv) = animating {
            let duration = self.config.move_duration(mv);
            let now = self.clock.now();
            self.step(Input::Retime(duration), now);
        }
    }

    fn seek_is_due(&self, now: Duration) -> bool {
        self.last_seek
            .is_none_or(|last| now.saturating_sub(last) >= self.config.seek_debounce())
    }

    /// Jumps to the cube before step `index`, clamped to the timeline, and
    /// pauses. A seek arriving within the debounce interval of the previous
    /// one is held back and applied by a later [`tick`](Self::tick); only the
    /// latest held seek survives. Returns whether the seek happened now.
    pub fn seek(&mut self, index: usize) -> bool {
        let now = self.clock.now();
        if self.seek_is_due(now) {
            self.pending_seek = None;
            self.apply_seek(index, now);
            true
        } else {
            self.pending_seek = Some(index);
            false
        }
    }

    fn apply_seek(&mut self, index: usize, now: Duration) {
        self.last_seek = Some(now);
        self.paused = true;
        self.cancel_tween();

        let index = self.timeline.clamp(index);
        self.cube = self.timeline.state_at(index);
        self.cursor = index;
        debug!("Seeked to step {index}");

        if let Some(stage) = self.timeline.stage_for_index(index) {
            self.events.stage_reported(stage);
        }
    }

    pub fn next_step(&mut self) -> bool {
        self.seek(self.cursor + 1)
    }

    pub fn previous_step(&mut self) -> bool {
        self.seek(self.cursor.saturating_sub(1))
    }

    pub fn next_chunk(&mut self) -> bool {
        self.seek(self.timeline.next_chunk_start(self.cursor))
    }

    pub fn previous_chunk(&mut self) -> bool {
        self.seek(self.timeline.previous_chunk_start(self.cursor))
    }

    /// Drops the animation in flight and commits every remaining move at
    /// once.
    pub fn flush(&mut self) {
        self.cancel_tween();
        self.pending_seek = None;

        if self.cursor < self.timeline.len() {
            info!(
                "Committing {} queued moves without animation",
                self.timeline.len() - self.cursor
            );
            self.cube = self.timeline.state_at(self.timeline.len());
            self.cursor = self.timeline.len();
            self.events.finished();
        }
    }

    #[must_use]
    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.timeline.len() && matches!(self.phase, Phase::Idle)
    }

    /// The stage of the step being played, `None` once everything is played.
    #[must_use]
    pub fn current_stage(&self) -> Option<Stage> {
        self.timeline.stage_for_index(self.cursor)
    }

    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn frame(&self) -> &F {
        &self.frame
    }

    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }
}
