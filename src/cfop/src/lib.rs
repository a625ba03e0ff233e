#![warn(clippy::pedantic)]

//! Splits a two-phase solver's answer into CFOP stages with per-move labels,
//! highlighted pieces and named chunks.

pub mod chunk;
pub mod facelets;
pub mod highlight;
pub mod plan;
pub mod self_check;
pub mod solver;
pub mod stage;
pub mod twophase;

pub use chunk::ChunkInfo;
pub use facelets::{SOLVED_FACELETS, to_facelets};
pub use plan::{CfopPlan, Planner, StagePlan, StageStep, plan_from_solution};
pub use solver::{CannedSolver, SolveError, Solver, normalize_solution};
pub use stage::{Slot, Stage};
pub use twophase::{TwophaseConfig, TwophaseProcess};
