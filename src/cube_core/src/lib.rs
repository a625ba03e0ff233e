#![warn(clippy::pedantic)]

//! A 3x3x3 cube modelled as 27 cubies with stable identities, plus the face
//! turn algebra, notation handling and a deterministic scrambler.

pub mod cube;
pub mod notation;
pub mod scramble;
pub mod self_check;

pub use cube::{Color, CubeState, Cubie, CubieId, FaceColors, Vec3, solved_color};
pub use notation::{
    Amount, Axis, Face, Move, MoveParseError, format_moves, invert_moves, parse_moves,
    simplify_moves,
};
pub use scramble::{Scramble, random_scramble};
