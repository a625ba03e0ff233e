use std::fmt;

use crate::notation::{Axis, Face, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    W,
    Y,
    O,
    R,
    G,
    B,
}

impl Color {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::W => "white",
            Color::Y => "yellow",
            Color::O => "orange",
            Color::R => "red",
            Color::G => "green",
            Color::B => "blue",
        }
    }

    /// The face whose center carries this color.
    #[must_use]
    pub fn home_face(self) -> Face {
        match self {
            Color::W => Face::U,
            Color::Y => Face::D,
            Color::O => Face::L,
            Color::R => Face::R,
            Color::G => Face::F,
            Color::B => Face::B,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Color::W => 'W',
            Color::Y => 'Y',
            Color::O => 'O',
            Color::R => 'R',
            Color::G => 'G',
            Color::B => 'B',
        };
        write!(f, "{letter}")
    }
}

/// The coloring of the solved cube. Every predicate and the facelet
/// serializer agree with this table.
#[must_use]
pub fn solved_color(face: Face) -> Color {
    match face {
        Face::U => Color::W,
        Face::D => Color::Y,
        Face::L => Color::O,
        Face::R => Color::R,
        Face::F => Color::G,
        Face::B => Color::B,
    }
}

/// A cell of the 3x3x3 grid. Each coordinate is one of -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec3 {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Vec3 { x, y, z }
    }

    #[must_use]
    pub fn coord(self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// A quarter turn about `axis`; `dir == 1` is clockwise viewed from the
    /// positive end of the axis.
    #[must_use]
    pub fn rotated(self, axis: Axis, dir: i8) -> Self {
        let Vec3 { x, y, z } = self;
        match (axis, dir > 0) {
            (Axis::X, true) => Vec3::new(x, z, -y),
            (Axis::X, false) => Vec3::new(x, -z, y),
            (Axis::Y, true) => Vec3::new(-z, y, x),
            (Axis::Y, false) => Vec3::new(z, y, -x),
            (Axis::Z, true) => Vec3::new(y, -x, z),
            (Axis::Z, false) => Vec3::new(-y, x, z),
        }
    }

    #[must_use]
    pub fn manhattan(self, other: Vec3) -> u8 {
        (self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs()
    }

    /// Number of faces of the cube this cell touches: 0 for the core, 1 for
    /// face centers, 2 for edges and 3 for corners.
    #[must_use]
    pub fn exposed_face_count(self) -> usize {
        [self.x, self.y, self.z].iter().filter(|c| **c != 0).count()
    }

    /// The faces of the cube this cell sits on.
    pub fn exposed_faces(self) -> impl Iterator<Item = Face> {
        Face::ALL
            .into_iter()
            .filter(move |face| self.coord(face.axis()) == face.layer())
    }
}

/// Stable identity of a cubie: the grid cell it occupies when solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CubieId(pub Vec3);

impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Vec3 { x, y, z } = self.0;
        write!(f, "{x},{y},{z}")
    }
}

/// The stickers of a cubie, keyed by the face of the cube they currently
/// point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceColors([Option<Color>; 6]);

impl FaceColors {
    #[must_use]
    pub fn get(&self, face: Face) -> Option<Color> {
        self.0[face as usize]
    }

    pub fn insert(&mut self, face: Face, color: Color) {
        self.0[face as usize] = Some(color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        Face::ALL
            .into_iter()
            .filter_map(move |face| self.get(face).map(|color| (face, color)))
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().flatten().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.colors().any(|c| c == color)
    }

    #[must_use]
    pub fn rotated(&self, axis: Axis, dir: i8) -> Self {
        let mut out = FaceColors::default();
        for (face, color) in self.iter() {
            out.insert(face.turned(axis, dir), color);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cubie {
    pub id: CubieId,
    pub pos: Vec3,
    pub colors: FaceColors,
}

impl Cubie {
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.colors.len() == 2
    }

    #[must_use]
    pub fn is_corner(&self) -> bool {
        self.colors.len() == 3
    }

    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(color)
    }

    /// Every sticker matches the center of the face it points at.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.colors
            .iter()
            .all(|(face, color)| solved_color(face) == color)
    }
}

/// The whole cube. Immutable in use: every turn produces a new state.
///
/// The cubies are kept sorted by id, so derived equality is the same as
/// comparing id→position and id→stickers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    cubies: Vec<Cubie>,
}

impl CubeState {
    #[must_use]
    pub fn solved() -> Self {
        let mut cubies = Vec::with_capacity(27);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    let pos = Vec3::new(x, y, z);
                    let mut colors = FaceColors::default();
                    for face in pos.exposed_faces() {
                        colors.insert(face, solved_color(face));
                    }
                    cubies.push(Cubie {
                        id: CubieId(pos),
                        pos,
                        colors,
                    });
                }
            }
        }
        CubeState { cubies }
    }

    #[must_use]
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// # Panics
    ///
    /// Panics if `id` is not one of the 27 grid cells.
    #[must_use]
    pub fn cubie(&self, id: CubieId) -> &Cubie {
        let idx = self
            .cubies
            .binary_search_by_key(&id, |c| c.id)
            .unwrap_or_else(|_| panic!("no cubie with id {id}"));
        &self.cubies[idx]
    }

    #[must_use]
    pub fn cubie_at(&self, pos: Vec3) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.pos == pos)
    }

    /// Cubies currently in the layer `coord(axis) == value`.
    pub fn layer(&self, axis: Axis, value: i8) -> impl Iterator<Item = &Cubie> + '_ {
        self.cubies
            .iter()
            .filter(move |c| c.pos.coord(axis) == value)
    }

    /// Cubies currently in the layer turned by `face`.
    pub fn face_layer(&self, face: Face) -> impl Iterator<Item = &Cubie> + '_ {
        self.layer(face.axis(), face.layer())
    }

    #[must_use]
    pub fn apply_move(&self, mv: Move) -> CubeState {
        let mut next = self.clone();
        let axis = mv.axis();
        let layer = mv.face.layer();
        let dir = mv.direction();

        for _ in 0..mv.quarter_turn_count() {
            for cubie in next
                .cubies
                .iter_mut()
                .filter(|c| c.pos.coord(axis) == layer)
            {
                cubie.pos = cubie.pos.rotated(axis, dir);
                cubie.colors = cubie.colors.rotated(axis, dir);
            }
        }

        next
    }

    #[must_use]
    pub fn apply_moves(&self, moves: &[Move]) -> CubeState {
        moves
            .iter()
            .fold(self.clone(), |state, &mv| state.apply_move(mv))
    }

    /// Ids of cubies whose position differs between `self` and `other`.
    #[must_use]
    pub fn moved_cubies(&self, other: &CubeState) -> Vec<CubieId> {
        self.cubies
            .iter()
            .zip(&other.cubies)
            .filter(|(a, b)| a.pos != b.pos)
            .map(|(a, _)| a.id)
            .collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(Cubie::is_solved)
    }

    /// Every edge in `face`'s layer is fully seated: its sticker on `face`
    /// matches that face's center and its other sticker matches its side.
    #[must_use]
    pub fn is_cross_solved(&self, face: Face) -> bool {
        self.face_layer(face)
            .filter(|c| c.pos.exposed_face_count() == 2)
            .all(Cubie::is_solved)
    }

    /// Every cubie outside the U layer is solved.
    #[must_use]
    pub fn is_first_two_layers_solved(&self) -> bool {
        self.cubies
            .iter()
            .filter(|c| c.pos.y != 1)
            .all(Cubie::is_solved)
    }

    /// Every cubie in the U layer shows the U color on top.
    #[must_use]
    pub fn is_oll_solved(&self) -> bool {
        let up = solved_color(Face::U);
        self.face_layer(Face::U)
            .all(|c| c.colors.get(Face::U) == Some(up))
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}
