use std::f64::consts::FRAC_PI_4;

use cfop::{Stage, plan_from_solution};
use cube_core::{Axis, CubeState, CubieId, Face, Move, parse_moves, random_scramble};
use playback::{
    ManualClock, Phase, PlaybackConfig, PlaybackEvents, Player, RotationFrame, Timeline,
    TimelineStep,
};

fn moves(text: &str) -> Vec<Move> {
    parse_moves(text).map(|t| t.parse().unwrap()).collect()
}

#[derive(Debug, Default)]
struct RecordingFrame {
    attached: Vec<(Face, usize)>,
    rotations: Vec<(Axis, f64)>,
    detaches: usize,
    holding: bool,
}

impl RotationFrame for RecordingFrame {
    fn attach(&mut self, face: Face, pieces: &[CubieId]) {
        assert!(!self.holding, "attached twice");
        self.holding = true;
        self.attached.push((face, pieces.len()));
    }

    fn rotate(&mut self, axis: Axis, radians: f64) {
        assert!(self.holding, "rotated an empty frame");
        self.rotations.push((axis, radians));
    }

    fn detach(&mut self) {
        self.holding = false;
        self.detaches += 1;
    }
}

#[derive(Debug, Default)]
struct Recorder {
    stages: Vec<Stage>,
    started: Vec<(usize, Move)>,
    labels: Vec<Option<String>>,
    highlights: Vec<Vec<CubieId>>,
    committed: Vec<usize>,
    finished: usize,
}

impl PlaybackEvents for Recorder {
    fn stage_reported(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn move_started(&mut self, index: usize, step: &TimelineStep) {
        self.started.push((index, step.mv));
        self.labels.push(step.label.clone());
        self.highlights.push(step.highlight.clone());
    }

    fn move_committed(&mut self, index: usize, _state: &CubeState) {
        self.committed.push(index);
    }

    fn finished(&mut self) {
        self.finished += 1;
    }
}

type TestPlayer<'a> = Player<&'a ManualClock, RecordingFrame, Recorder>;

/// The first two layers case `R U R' U'` solved by `U R U' R'`.
fn pair_timeline() -> Timeline {
    let start = CubeState::solved().apply_moves(&moves("R U R' U'"));
    let plan = plan_from_solution(&start, &moves("U R U' R'"));
    Timeline::from_plan(start, &plan)
}

fn player(clock: &ManualClock, timeline: Timeline) -> TestPlayer<'_> {
    let mut player = Player::new(
        timeline.start().clone(),
        clock,
        RecordingFrame::default(),
        Recorder::default(),
        PlaybackConfig::default(),
    );
    player.load(timeline);
    player
}

fn run_to_end(clock: &ManualClock, player: &mut TestPlayer<'_>) {
    for _ in 0..10_000 {
        if player.is_finished() {
            return;
        }
        player.tick();
        clock.advance_ms(16);
    }
    panic!("playback never finished");
}

#[test_log::test]
fn plays_every_step_in_order() {
    let clock = ManualClock::new();
    let mut player = player(&clock, pair_timeline());

    player.tick();
    assert!(matches!(player.phase(), Phase::Animating(_)));
    assert_eq!(player.cursor(), 0);
    assert_eq!(player.cube(), player.timeline().start());

    run_to_end(&clock, &mut player);

    assert!(player.cube().is_solved());
    let events = player.events();
    assert_eq!(events.stages, vec![Stage::F2l; 4]);
    assert_eq!(
        events.started,
        moves("U R U' R'").into_iter().enumerate().collect::<Vec<_>>()
    );
    assert_eq!(events.committed, vec![0, 1, 2, 3]);
    assert_eq!(events.finished, 1);

    let steps = player.timeline().steps();
    assert_eq!(
        events.labels,
        steps.iter().map(|s| s.label.clone()).collect::<Vec<_>>()
    );
    assert!(events.labels.iter().all(|l| l.as_deref().is_some_and(|l| l.starts_with("F2L"))));
    assert_eq!(
        events.highlights,
        steps.iter().map(|s| s.highlight.clone()).collect::<Vec<_>>()
    );

    let frame = player.frame();
    assert_eq!(frame.attached.len(), 4);
    assert!(frame.attached.iter().all(|&(_, pieces)| pieces == 9));
    assert_eq!(frame.detaches, 4);
    assert!(!frame.holding);
    assert_eq!(player.current_stage(), None);
}

#[test_log::test]
fn pause_keeps_the_tween_where_it_was() {
    let clock = ManualClock::new();
    let mut player = player(&clock, pair_timeline());

    player.tick();
    clock.advance_ms(160);
    player.tick();
    let (axis, halfway) = *player.frame().rotations.last().unwrap();
    assert_eq!(axis, Axis::Y);
    assert!((halfway + FRAC_PI_4).abs() < 1e-9);

    player.pause();
    clock.advance_ms(1000);
    player.tick();
    let rotations = player.frame().rotations.len();

    player.resume();
    player.tick();
    assert_eq!(player.frame().rotations.len(), rotations + 1);
    assert!((player.frame().rotations[rotations].1 - halfway).abs() < 1e-9);

    clock.advance_ms(200);
    player.tick();
    assert!(matches!(player.phase(), Phase::Committing(_)));
    player.tick();
    assert_eq!(player.cursor(), 1);
}

#[test_log::test]
fn speed_change_keeps_the_fraction() {
    let clock = ManualClock::new();
    let mut player = player(&clock, pair_timeline());

    player.tick();
    clock.advance_ms(160);
    player.tick();
    player.set_ms_per_quarter_turn(600);

    clock.advance_ms(290);
    player.tick();
    assert!(matches!(player.phase(), Phase::Animating(_)));

    clock.advance_ms(20);
    player.tick();
    assert!(matches!(player.phase(), Phase::Committing(_)));

    player.set_ms_per_quarter_turn(5);
    assert_eq!(player.config().ms_per_quarter_turn, 150);
}

#[test_log::test]
fn seek_rebuilds_the_cube_and_pauses() {
    let clock = ManualClock::new();
    let timeline = pair_timeline();
    let mut player = player(&clock, timeline.clone());

    player.tick();
    clock.advance_ms(100);
    player.tick();

    assert!(player.seek(2));
    assert!(player.is_paused());
    assert_eq!(player.phase(), &Phase::Idle);
    assert_eq!(player.cursor(), 2);
    assert_eq!(player.cube(), &timeline.state_at(2));

    // The cancelled tween was rotated back before its pieces left the frame
    let frame = player.frame();
    assert_eq!(frame.rotations.last().map(|r| r.1), Some(0.0));
    assert_eq!(frame.detaches, 1);
    assert!(player.events().committed.is_empty());

    player.resume();
    run_to_end(&clock, &mut player);
    assert!(player.cube().is_solved());
    assert_eq!(player.events().committed, vec![2, 3]);
}

#[test_log::test]
fn rapid_seeks_are_debounced() {
    let clock = ManualClock::new();
    let timeline = pair_timeline();
    let mut player = player(&clock, timeline.clone());

    assert!(player.seek(1));
    clock.advance_ms(5);
    assert!(!player.seek(2));
    assert!(!player.seek(3));
    assert_eq!(player.cursor(), 1);

    clock.advance_ms(30);
    player.tick();
    assert_eq!(player.cursor(), 3);
    assert_eq!(player.cube(), &timeline.state_at(3));

    clock.advance_ms(30);
    assert!(player.seek(100));
    assert_eq!(player.cursor(), 3);

    clock.advance_ms(30);
    assert!(player.previous_step());
    assert_eq!(player.cursor(), 2);
}

#[test_log::test]
fn chunk_navigation_over_the_last_layer() {
    let solution = moves("R U R' U R U2 R' R U' R U R U R U' R' U' R2");
    let start = CubeState::solved().apply_moves(&cube_core::invert_moves(&solution));
    let plan = plan_from_solution(&start, &solution);

    let clock = ManualClock::new();
    let mut player = player(&clock, Timeline::from_plan(start, &plan));

    assert!(player.next_chunk());
    assert_eq!(player.cursor(), 7);
    assert_eq!(player.current_stage(), Some(Stage::Pll));
    assert_eq!(player.events().stages, vec![Stage::Pll]);

    clock.advance_ms(30);
    player.next_chunk();
    assert_eq!(player.cursor(), 17);

    clock.advance_ms(30);
    player.previous_chunk();
    assert_eq!(player.cursor(), 0);
    assert_eq!(player.cube(), player.timeline().start());
}

#[test_log::test]
fn flush_commits_the_rest_at_once() {
    let clock = ManualClock::new();
    let mut player = player(&clock, pair_timeline());

    player.tick();
    clock.advance_ms(50);
    player.tick();
    player.flush();

    assert!(player.is_finished());
    assert!(player.cube().is_solved());
    assert_eq!(player.events().finished, 1);
    assert!(!player.frame().holding);
}

#[test_log::test]
fn scrambles_play_without_stages() {
    let scramble = random_scramble(8, 99);
    let clock = ManualClock::new();
    let mut player = player(&clock, Timeline::from_moves(CubeState::solved(), &[]));

    player.play_moves(&scramble.moves);
    run_to_end(&clock, &mut player);

    assert_eq!(player.cube(), &scramble.state);
    assert!(player.events().stages.is_empty());
    assert_eq!(player.events().committed.len(), 8);
}
