//! Per-move labels and highlighted pieces, derived by comparing the cube
//! before and after each move of a stage.

use cube_core::{CubeState, CubieId, Face, solved_color};

use crate::stage::{
    Slot, Stage, cross_edges, is_cross_edge_seated, side_color, top_layer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNote {
    pub label: String,
    pub highlight: Vec<CubieId>,
}

#[must_use]
pub fn describe_step(stage: Stage, before: &CubeState, after: &CubeState) -> StepNote {
    let moved = before.moved_cubies(after);

    match stage {
        Stage::Cross => describe_cross(before, after, &moved),
        Stage::F2l => describe_f2l(before, after, &moved),
        Stage::Oll => describe_oll(before, after, &moved),
        Stage::Pll => describe_pll(before, after),
    }
}

fn moved_top_pieces(after: &CubeState, moved: &[CubieId]) -> Vec<CubieId> {
    top_layer(after)
        .filter(|c| moved.contains(&c.id))
        .map(|c| c.id)
        .collect()
}

fn describe_cross(before: &CubeState, after: &CubeState, moved: &[CubieId]) -> StepNote {
    let placed = cross_edges(after)
        .find(|e| is_cross_edge_seated(e) && !is_cross_edge_seated(before.cubie(e.id)));

    if let Some(edge) = placed {
        let label = match side_color(edge) {
            Some(color) => format!("Cross: place {} edge", color.name()),
            None => "Cross: place edge".to_owned(),
        };
        return StepNote {
            label,
            highlight: vec![edge.id],
        };
    }

    // The unseated edge that got closest to home, ties broken by id
    let closer = cross_edges(before)
        .filter(|e| !is_cross_edge_seated(e) && moved.contains(&e.id))
        .filter_map(|e| {
            let home = e.id.0;
            let now = after.cubie(e.id).pos.manhattan(home);
            (now < e.pos.manhattan(home)).then_some((now, e.id))
        })
        .min();

    StepNote {
        label: "Cross: setup".to_owned(),
        highlight: closer.map(|(_, id)| id).into_iter().collect(),
    }
}

fn describe_f2l(before: &CubeState, after: &CubeState, moved: &[CubieId]) -> StepNote {
    let inserted = Slot::ALL
        .into_iter()
        .find(|slot| !slot.is_solved(before) && slot.is_solved(after));

    if let Some(slot) = inserted {
        return StepNote {
            label: format!("F2L: {slot} pair (insert)"),
            highlight: vec![slot.corner(), slot.edge()],
        };
    }

    let active = Slot::ALL
        .into_iter()
        .find(|slot| !slot.is_solved(after))
        .unwrap_or(Slot::FR);

    StepNote {
        label: format!("F2L: {active} pair (setup)"),
        highlight: moved_top_pieces(after, moved),
    }
}

/// `Some(true)` when the piece sits in the top layer showing the top color
/// upwards, `Some(false)` when it sits there twisted, `None` elsewhere.
fn up_orientation(state: &CubeState, id: CubieId) -> Option<bool> {
    let cubie = state.cubie(id);
    if cubie.pos.y != 1 {
        return None;
    }
    cubie
        .colors
        .get(Face::U)
        .map(|color| color == solved_color(Face::U))
}

fn describe_oll(before: &CubeState, after: &CubeState, moved: &[CubieId]) -> StepNote {
    let mut highlight: Vec<CubieId> = top_layer(before)
        .map(|c| c.id)
        .filter(|&id| up_orientation(before, id) != up_orientation(after, id))
        .collect();

    if highlight.is_empty() {
        highlight = moved_top_pieces(after, moved);
    }

    StepNote {
        label: "OLL step".to_owned(),
        highlight,
    }
}

fn describe_pll(before: &CubeState, after: &CubeState) -> StepNote {
    let highlight = top_layer(before)
        .filter(|c| {
            let now = after.cubie(c.id).pos;
            now.y == 1 && (now.x, now.z) != (c.pos.x, c.pos.z)
        })
        .map(|c| c.id)
        .collect();

    StepNote {
        label: "PLL step".to_owned(),
        highlight,
    }
}
