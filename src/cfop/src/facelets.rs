use cube_core::{Color, CubeState, Face, Vec3};
use log::warn;

/// Face order of the facelet string understood by two-phase solvers.
pub const FACELET_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// The grid cell holding sticker `index` (row-major, 0..9) of `face`, with
/// every face read as if looking straight at it: U with B at the top, D with
/// F at the top and the four sides with U at the top.
#[must_use]
pub fn facelet_cell(face: Face, index: usize) -> Vec3 {
    debug_assert!(index < 9);
    // Both are in 0..3 so the casts are lossless
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (row, col) = ((index / 3) as i8 - 1, (index % 3) as i8 - 1);

    match face {
        Face::U => Vec3::new(col, 1, row),
        Face::R => Vec3::new(1, -row, -col),
        Face::F => Vec3::new(col, -row, 1),
        Face::D => Vec3::new(col, -1, -row),
        Face::L => Vec3::new(-1, -row, col),
        Face::B => Vec3::new(-col, -row, -1),
    }
}

/// The solver's letter for a sticker color: the face that color belongs to
/// when solved.
#[must_use]
pub fn facelet_letter(color: Color) -> char {
    color.home_face().letter()
}

/// Serializes `state` into the 54 character URFDLB facelet string.
///
/// A cell without a cubie or without a sticker on that face is written as the
/// face's own letter. That never happens for a state reached by face turns.
#[must_use]
pub fn to_facelets(state: &CubeState) -> String {
    let mut out = String::with_capacity(54);

    for face in FACELET_ORDER {
        for index in 0..9 {
            let pos = facelet_cell(face, index);
            let color = state.cubie_at(pos).and_then(|cubie| cubie.colors.get(face));

            match color {
                Some(color) => out.push(facelet_letter(color)),
                None => {
                    warn!("No {face} sticker at {pos:?}; writing `{face}` in its place");
                    out.push(face.letter());
                }
            }
        }
    }

    out
}
