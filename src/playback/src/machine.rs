//! The animation of a single move as a finite state machine. [`advance`] is
//! pure: it takes the current phase, one input and the time, and returns the
//! next phase together with the effects the caller has to carry out.

use std::{f64::consts::FRAC_PI_2, time::Duration};

use cfop::Stage;
use cube_core::{Axis, CubieId, Face, Move};
use log::trace;

use crate::easing::ease_in_out_quad;

/// Rotation of the layer turned by `mv` once the move is complete, using the
/// right-hand rule about the move's axis.
#[must_use]
pub fn target_angle(mv: Move) -> f64 {
    -FRAC_PI_2 * f64::from(mv.signed_quarter_turns())
}

/// Everything needed to start animating a move.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub mv: Move,
    /// Reported before the move starts when present.
    pub stage: Option<Stage>,
    /// The pieces in the turning layer.
    pub pieces: Vec<CubieId>,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub mv: Move,
    pub duration: Duration,
    /// Fraction already covered at `since`.
    base: f64,
    since: Duration,
    paused: bool,
}

impl Tween {
    fn new(mv: Move, duration: Duration, now: Duration) -> Self {
        Tween {
            mv,
            duration,
            base: 0.0,
            since: now,
            paused: false,
        }
    }

    /// Elapsed fraction of the tween in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, now: Duration) -> f64 {
        if self.paused {
            return self.base;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let running = now.saturating_sub(self.since).as_secs_f64() / self.duration.as_secs_f64();
        (self.base + running).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Folds the time run so far into `base`.
    fn rebase(&mut self, now: Duration) {
        self.base = self.fraction(now);
        self.since = now;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Animating(Tween),
    /// The layer reached its final angle; the move is committed on the next
    /// tick.
    Committing(Move),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A frame.
    Tick,
    Start(PendingMove),
    Pause,
    Resume,
    /// Changes the length of the running tween, keeping its elapsed fraction.
    Retime(Duration),
    /// Abandons the running move without committing it.
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Stage(Stage),
    MoveStarted(Move),
    /// Moves `pieces` into the rotation frame of `face`.
    Attach { face: Face, pieces: Vec<CubieId> },
    Rotate { axis: Axis, radians: f64 },
    /// Returns every piece in the rotation frame to the cube.
    Detach,
    /// The logical cube should now apply the move.
    Commit(Move),
}

/// Performs exactly one transition.
#[must_use]
pub fn advance(phase: Phase, input: Input, now: Duration) -> (Phase, Vec<Effect>) {
    trace!("{phase:?} <- {input:?}");

    match (phase, input) {
        (Phase::Idle, Input::Start(pending)) => {
            let mut effects = Vec::with_capacity(5);
            if let Some(stage) = pending.stage {
                effects.push(Effect::Stage(stage));
            }
            effects.push(Effect::MoveStarted(pending.mv));
            effects.push(Effect::Attach {
                face: pending.mv.face,
                pieces: pending.pieces,
            });
            effects.push(Effect::Rotate {
                axis: pending.mv.axis(),
                radians: 0.0,
            });

            let tween = Tween::new(pending.mv, pending.duration, now);
            (Phase::Animating(tween), effects)
        }

        (Phase::Animating(tween), Input::Tick) => {
            if tween.paused {
                return (Phase::Animating(tween), Vec::new());
            }

            let fraction = tween.fraction(now);
            let axis = tween.mv.axis();
            let target = target_angle(tween.mv);

            if fraction >= 1.0 {
                let effects = vec![Effect::Rotate {
                    axis,
                    radians: target,
                }];
                (Phase::Committing(tween.mv), effects)
            } else {
                let effects = vec![Effect::Rotate {
                    axis,
                    radians: target * ease_in_out_quad(fraction),
                }];
                (Phase::Animating(tween), effects)
            }
        }

        (Phase::Committing(mv), Input::Tick) => {
            (Phase::Idle, vec![Effect::Detach, Effect::Commit(mv)])
        }

        (Phase::Animating(mut tween), Input::Pause) => {
            tween.rebase(now);
            tween.paused = true;
            (Phase::Animating(tween), Vec::new())
        }

        (Phase::Animating(mut tween), Input::Resume) => {
            tween.rebase(now);
            tween.paused = false;
            (Phase::Animating(tween), Vec::new())
        }

        (Phase::Animating(mut tween), Input::Retime(duration)) => {
            tween.rebase(now);
            tween.duration = duration;
            (Phase::Animating(tween), Vec::new())
        }

        (Phase::Animating(Tween { mv, .. }) | Phase::Committing(mv), Input::Cancel) => {
            let effects = vec![
                Effect::Rotate {
                    axis: mv.axis(),
                    radians: 0.0,
                },
                Effect::Detach,
            ];
            (Phase::Idle, effects)
        }

        (phase, _) => (phase, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use cube_core::{Amount, CubeState};

    use super::*;

    fn pending(mv: Move, stage: Option<Stage>) -> PendingMove {
        PendingMove {
            mv,
            stage,
            pieces: CubeState::solved().face_layer(mv.face).map(|c| c.id).collect(),
            duration: Duration::from_millis(300),
        }
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn radians(effects: &[Effect]) -> f64 {
        match effects {
            [Effect::Rotate { radians, .. }] => *radians,
            other => panic!("expected a single rotation, got {other:?}"),
        }
    }

    #[test]
    fn full_cycle() {
        let mv = Move::new(Face::R, Amount::Single);
        let (phase, effects) = advance(Phase::Idle, Input::Start(pending(mv, Some(Stage::F2l))), ms(0));
        assert!(matches!(phase, Phase::Animating(_)));
        assert_eq!(effects[0], Effect::Stage(Stage::F2l));
        assert_eq!(effects[1], Effect::MoveStarted(mv));
        assert!(matches!(&effects[2], Effect::Attach { face: Face::R, pieces } if pieces.len() == 9));

        let (phase, effects) = advance(phase, Input::Tick, ms(150));
        assert!((radians(&effects) - target_angle(mv) / 2.0).abs() < 1e-9);

        let (phase, effects) = advance(phase, Input::Tick, ms(400));
        assert_eq!(phase, Phase::Committing(mv));
        assert!((radians(&effects) - target_angle(mv)).abs() < 1e-12);

        let (phase, effects) = advance(phase, Input::Tick, ms(401));
        assert_eq!(phase, Phase::Idle);
        assert_eq!(effects, vec![Effect::Detach, Effect::Commit(mv)]);
    }

    #[test]
    fn pause_freezes_the_fraction() {
        let mv = Move::new(Face::U, Amount::Prime);
        let (phase, _) = advance(Phase::Idle, Input::Start(pending(mv, None)), ms(1000));
        let (phase, _) = advance(phase, Input::Pause, ms(1100));

        let (phase, effects) = advance(phase, Input::Tick, ms(5000));
        assert!(effects.is_empty());

        let (phase, _) = advance(phase, Input::Resume, ms(9000));
        let Phase::Animating(tween) = &phase else {
            panic!("still animating");
        };
        assert!((tween.fraction(ms(9000)) - 1.0 / 3.0).abs() < 1e-9);

        let (phase, _) = advance(phase, Input::Tick, ms(9300));
        assert_eq!(phase, Phase::Committing(mv));
    }

    #[test]
    fn retime_keeps_the_fraction() {
        let mv = Move::new(Face::F, Amount::Double);
        let (phase, _) = advance(Phase::Idle, Input::Start(pending(mv, None)), ms(0));
        let (phase, _) = advance(phase, Input::Retime(ms(600)), ms(150));
        let Phase::Animating(tween) = &phase else {
            panic!("still animating");
        };
        assert!((tween.fraction(ms(150)) - 0.5).abs() < 1e-9);
        assert!((tween.fraction(ms(450)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cancel_resets_and_detaches_without_commit() {
        let mv = Move::new(Face::L, Amount::Single);
        let (phase, _) = advance(Phase::Idle, Input::Start(pending(mv, None)), ms(0));
        let (phase, effects) = advance(phase, Input::Cancel, ms(100));
        assert_eq!(phase, Phase::Idle);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Commit(_))));
        assert_eq!(effects.last(), Some(&Effect::Detach));
    }

    #[test]
    fn start_is_ignored_while_busy() {
        let mv = Move::new(Face::D, Amount::Single);
        let (phase, _) = advance(Phase::Idle, Input::Start(pending(mv, None)), ms(0));
        let before = phase.clone();
        let (phase, effects) = advance(phase, Input::Start(pending(mv, None)), ms(10));
        assert_eq!(phase, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn quarter_turn_angles() {
        assert!((target_angle(Move::new(Face::R, Amount::Single)) + FRAC_PI_2).abs() < 1e-12);
        assert!((target_angle(Move::new(Face::L, Amount::Single)) - FRAC_PI_2).abs() < 1e-12);
        assert!((target_angle(Move::new(Face::U, Amount::Double)) + 2.0 * FRAC_PI_2).abs() < 1e-12);
    }
}
