use std::fmt;

use cube_core::{Color, CubeState, Cubie, CubieId, Face, Vec3, solved_color};

/// The face the cross is built on.
pub const CROSS_FACE: Face = Face::D;

/// The color of the cross, and of the bottom sticker of every F2L corner.
#[must_use]
pub fn cross_color() -> Color {
    solved_color(CROSS_FACE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Cross,
    F2l,
    Oll,
    Pll,
}

impl Stage {
    pub const ALL: [Self; 4] = [Stage::Cross, Stage::F2l, Stage::Oll, Stage::Pll];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::Cross => "Cross",
            Stage::F2l => "F2L",
            Stage::Oll => "OLL",
            Stage::Pll => "PLL",
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Cross => Some(Stage::F2l),
            Stage::F2l => Some(Stage::Oll),
            Stage::Oll => Some(Stage::Pll),
            Stage::Pll => None,
        }
    }

    /// Whether the work of this stage is done in `state`.
    #[must_use]
    pub fn is_complete(self, state: &CubeState) -> bool {
        match self {
            Stage::Cross => state.is_cross_solved(CROSS_FACE),
            Stage::F2l => state.is_first_two_layers_solved(),
            Stage::Oll => state.is_oll_solved(),
            Stage::Pll => state.is_solved(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four first-two-layers slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    FR,
    FL,
    BR,
    BL,
}

impl Slot {
    /// The order slots are worked through.
    pub const ALL: [Self; 4] = [Slot::FR, Slot::FL, Slot::BR, Slot::BL];

    fn faces(self) -> (Face, Face) {
        match self {
            Slot::FR => (Face::F, Face::R),
            Slot::FL => (Face::F, Face::L),
            Slot::BR => (Face::B, Face::R),
            Slot::BL => (Face::B, Face::L),
        }
    }

    #[must_use]
    pub fn colors(self) -> (Color, Color) {
        let (a, b) = self.faces();
        (solved_color(a), solved_color(b))
    }

    fn column(self) -> (i8, i8) {
        match self {
            Slot::FR => (1, 1),
            Slot::FL => (-1, 1),
            Slot::BR => (1, -1),
            Slot::BL => (-1, -1),
        }
    }

    /// The corner of this slot: cross color plus both slot colors.
    #[must_use]
    pub fn corner(self) -> CubieId {
        let (x, z) = self.column();
        CubieId(Vec3::new(x, CROSS_FACE.layer(), z))
    }

    /// The middle layer edge carrying both slot colors.
    #[must_use]
    pub fn edge(self) -> CubieId {
        let (x, z) = self.column();
        CubieId(Vec3::new(x, 0, z))
    }

    #[must_use]
    pub fn is_solved(self, state: &CubeState) -> bool {
        state.cubie(self.corner()).is_solved() && state.cubie(self.edge()).is_solved()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.faces();
        write!(f, "{a}{b}")
    }
}

/// Edges carrying the cross color, in id order.
pub fn cross_edges(state: &CubeState) -> impl Iterator<Item = &Cubie> + '_ {
    state
        .cubies()
        .iter()
        .filter(|c| c.is_edge() && c.has_color(cross_color()))
}

/// The cross color sits on the cross face and the other sticker on its own
/// side.
#[must_use]
pub fn is_cross_edge_seated(edge: &Cubie) -> bool {
    edge.colors.get(CROSS_FACE) == Some(cross_color()) && edge.is_solved()
}

#[must_use]
pub fn seated_cross_edges(state: &CubeState) -> usize {
    cross_edges(state).filter(|e| is_cross_edge_seated(e)).count()
}

/// The non-cross sticker of a cross edge.
#[must_use]
pub fn side_color(edge: &Cubie) -> Option<Color> {
    edge.colors.colors().find(|&c| c != cross_color())
}

pub fn top_layer(state: &CubeState) -> impl Iterator<Item = &Cubie> + '_ {
    state.face_layer(Face::U)
}

/// Every edge in the top layer shows the top color upwards.
#[must_use]
pub fn are_top_edges_oriented(state: &CubeState) -> bool {
    let up = solved_color(Face::U);
    top_layer(state)
        .filter(|c| c.is_edge())
        .all(|e| e.colors.get(Face::U) == Some(up))
}

/// Every top layer corner has side stickers matching the faces they point at.
#[must_use]
pub fn are_top_corners_permuted(state: &CubeState) -> bool {
    top_layer(state).filter(|c| c.is_corner()).all(|corner| {
        corner
            .colors
            .iter()
            .filter(|&(face, _)| face != Face::U)
            .all(|(face, color)| solved_color(face) == color)
    })
}
