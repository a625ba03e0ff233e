use cfop::Stage;
use cube_core::{Axis, CubeState, CubieId, Face};

use crate::timeline::TimelineStep;

/// The renderer's side of a turning layer: a transient group the pieces of a
/// layer are moved into while it rotates, and moved out of afterwards.
pub trait RotationFrame {
    fn attach(&mut self, face: Face, pieces: &[CubieId]);
    /// Sets the frame's absolute rotation about `axis`.
    fn rotate(&mut self, axis: Axis, radians: f64);
    /// Moves every attached piece back to the cube, keeping its current
    /// transform.
    fn detach(&mut self);
}

/// Callbacks into the state owned by the caller, such as status text or a
/// progress bar.
pub trait PlaybackEvents {
    /// The stage of the step about to animate, once per step that carries
    /// one, and once after a seek.
    fn stage_reported(&mut self, _stage: Stage) {}
    /// The step about to animate, with its label and highlighted pieces.
    fn move_started(&mut self, _index: usize, _step: &TimelineStep) {}
    fn move_committed(&mut self, _index: usize, _state: &CubeState) {}
    /// Every queued move has been committed.
    fn finished(&mut self) {}
}

impl PlaybackEvents for () {}
