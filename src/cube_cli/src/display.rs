//! Terminal output: the plan listing and the playback observers used by
//! `cfop play`.

use cfop::{CfopPlan, Stage};
use cube_core::{Axis, CubeState, CubieId, Face, format_moves};
use itertools::Itertools;
use log::{debug, trace};
use owo_colors::OwoColorize;
use playback::{PlaybackEvents, RotationFrame, TimelineStep};

pub fn print_plan(plan: &CfopPlan) {
    if plan.is_empty() {
        println!("{}", "Already solved".green());
        return;
    }

    let mut index = 0;
    for stage in &plan.stages {
        println!(
            "{} {}",
            stage.stage.bold(),
            format!("({} moves)", stage.steps.len()).dimmed()
        );

        for step in &stage.steps {
            index += 1;
            let chunk = format!(
                "[{} {}/{}]",
                step.chunk.label,
                step.chunk.index + 1,
                step.chunk.size
            );
            println!(
                "  {index:>3}  {:<3} {:<32} {} {}",
                step.mv.to_string().cyan(),
                step.label,
                chunk.dimmed(),
                step.highlight.iter().join(" ").yellow()
            );
        }
    }

    println!("{} {}", "Solution:".bold(), format_moves(&plan.moves));
}

/// Logs what a renderer would do with the turning layer.
#[derive(Debug, Default)]
pub struct LoggingFrame {
    attached: Vec<CubieId>,
}

impl RotationFrame for LoggingFrame {
    fn attach(&mut self, face: Face, pieces: &[CubieId]) {
        debug!("Attaching {} pieces of {face}", pieces.len());
        self.attached = pieces.to_vec();
    }

    fn rotate(&mut self, axis: Axis, radians: f64) {
        trace!("Rotating {axis:?} to {radians:.3}");
    }

    fn detach(&mut self) {
        debug!("Detaching {} pieces", self.attached.len());
        self.attached.clear();
    }
}

/// Prints progress as the player reports it.
#[derive(Debug)]
pub struct ConsoleEvents {
    title: &'static str,
    total: usize,
    stage: Option<Stage>,
}

impl ConsoleEvents {
    #[must_use]
    pub fn new(title: &'static str, total: usize) -> Self {
        ConsoleEvents {
            title,
            total,
            stage: None,
        }
    }
}

impl PlaybackEvents for ConsoleEvents {
    fn stage_reported(&mut self, stage: Stage) {
        if self.stage.replace(stage) != Some(stage) {
            println!("{} {}", "Stage".bold(), stage.magenta());
        }
    }

    fn move_started(&mut self, index: usize, step: &TimelineStep) {
        println!(
            "  {} {:>3}/{}  {:<3} {} {}",
            self.title.dimmed(),
            index + 1,
            self.total,
            step.mv.to_string().cyan(),
            step.label.as_deref().unwrap_or_default(),
            step.highlight.iter().join(" ").yellow()
        );
    }

    fn move_committed(&mut self, index: usize, state: &CubeState) {
        trace!("Committed move {index}; solved: {}", state.is_solved());
    }

    fn finished(&mut self) {
        println!("{}", format!("{} done", self.title).green());
    }
}
