//! Groups the moves of a finished stage into chunks: runs of consecutive
//! moves that make up one recognizable sub-step.

use cube_core::{CubeState, Face, Move, format_moves};

use crate::stage::{
    Slot, Stage, are_top_corners_permuted, are_top_edges_oriented, cross_edges,
    is_cross_edge_seated, seated_cross_edges, side_color,
};

/// Where a step sits inside its chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkInfo {
    /// `"<Stage>-<n>"`, counting chunks from zero within the stage.
    pub id: String,
    pub label: String,
    /// Position of the step inside the chunk.
    pub index: usize,
    /// Number of steps in the chunk.
    pub size: usize,
}

type AlgDictionary = &'static [(&'static str, &'static str)];

const OLL_EDGE_ALGS: AlgDictionary = &[("line", "F R U R' U' F'"), ("lshape", "F U R U' R' F'")];

const OLL_CORNER_ALGS: AlgDictionary = &[
    ("sune", "R U R' U R U2 R'"),
    ("antisune", "R' U' R U' R' U2 R"),
];

const PLL_CORNER_ALGS: AlgDictionary = &[];

const PLL_EDGE_ALGS: AlgDictionary = &[
    ("ua", "R U' R U R U R U' R' U' R2"),
    ("ub", "R2 U R U R' U' R' U' R' U R'"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    label: String,
}

/// Looks `moves` up in `dictionary` after dropping any `U` turns at either
/// end. Only exact matches count.
fn match_alg(dictionary: AlgDictionary, moves: &[Move]) -> Option<&'static str> {
    let start = moves.iter().position(|m| m.face != Face::U)?;
    let end = moves.iter().rposition(|m| m.face != Face::U)? + 1;
    let core = format_moves(&moves[start..end]);

    dictionary
        .iter()
        .find(|(_, alg)| *alg == core)
        .map(|(name, _)| *name)
}

/// Chunk metadata for every move of a stage. `states` holds the cube before
/// each move plus the final state, so `states.len() == moves.len() + 1`.
#[must_use]
pub fn chunk_stage(stage: Stage, states: &[CubeState], moves: &[Move]) -> Vec<ChunkInfo> {
    debug_assert_eq!(states.len(), moves.len() + 1);

    let spans = match stage {
        Stage::Cross => cross_spans(states),
        Stage::F2l => f2l_spans(states),
        Stage::Oll => split_spans(
            stage,
            states,
            moves,
            are_top_edges_oriented,
            ("OLL: orient edges", OLL_EDGE_ALGS),
            ("OLL: orient corners", OLL_CORNER_ALGS),
        ),
        Stage::Pll => split_spans(
            stage,
            states,
            moves,
            are_top_corners_permuted,
            ("PLL: corners", PLL_CORNER_ALGS),
            ("PLL: edges", PLL_EDGE_ALGS),
        ),
    };

    assign(stage, spans, moves.len())
}

/// A chunk closes every time another cross edge gets seated.
fn cross_spans(states: &[CubeState]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut seated = seated_cross_edges(&states[0]);

    for (i, pair) in states.windows(2).enumerate() {
        let [before, after] = pair else { continue };
        let now = seated_cross_edges(after);

        if now > seated {
            let placed = cross_edges(after)
                .find(|e| is_cross_edge_seated(e) && !is_cross_edge_seated(before.cubie(e.id)))
                .and_then(side_color);
            let label = match placed {
                Some(color) => format!("Cross: place {} edge", color.name()),
                None => "Cross: place edge".to_owned(),
            };
            spans.push(Span {
                start,
                end: i + 1,
                label,
            });
            start = i + 1;
        }
        seated = now;
    }

    spans
}

/// Slots in fixed order: a chunk runs from the first move touching the
/// slot's corner or edge to the move that solves the slot.
fn f2l_spans(states: &[CubeState]) -> Vec<Span> {
    let len = states.len() - 1;
    let mut spans = Vec::new();
    let mut cursor = 0;

    for slot in Slot::ALL {
        if cursor >= len {
            break;
        }
        if slot.is_solved(&states[cursor]) {
            continue;
        }

        let pieces = [slot.corner(), slot.edge()];
        let Some(start) = (cursor..len).find(|&i| {
            pieces
                .iter()
                .any(|&id| states[i].cubie(id).pos != states[i + 1].cubie(id).pos)
        }) else {
            continue;
        };

        let end = (start..len)
            .find(|&i| slot.is_solved(&states[i + 1]))
            .map_or(len, |i| i + 1);

        spans.push(Span {
            start,
            end,
            label: format!("F2L: {slot} pair"),
        });
        cursor = end;
    }

    spans
}

/// The generic label of half a split stage and the algorithms it may match.
type SplitHalf = (&'static str, AlgDictionary);

fn half_label(stage: Stage, (generic, dictionary): SplitHalf, moves: &[Move]) -> String {
    match match_alg(dictionary, moves) {
        Some(name) => format!("{stage}: {name}"),
        None => generic.to_owned(),
    }
}

/// Two chunks: the first ends on the move where `done` turns true, the
/// second is the remainder. When `done` already holds at the start the first
/// chunk is empty; when it never turns true the first chunk is everything.
fn split_spans(
    stage: Stage,
    states: &[CubeState],
    moves: &[Move],
    done: fn(&CubeState) -> bool,
    first: SplitHalf,
    second: SplitHalf,
) -> Vec<Span> {
    let len = moves.len();
    let split = if done(&states[0]) {
        0
    } else {
        states
            .windows(2)
            .position(|pair| done(&pair[1]))
            .map_or(len, |i| i + 1)
    };

    [(0, split, first), (split, len, second)]
        .into_iter()
        .filter(|&(start, end, _)| start < end)
        .map(|(start, end, half)| Span {
            start,
            end,
            label: half_label(stage, half, &moves[start..end]),
        })
        .collect()
}

/// Fills the gaps between spans with chunks carrying the stage's name and
/// numbers every chunk.
fn assign(stage: Stage, spans: Vec<Span>, len: usize) -> Vec<ChunkInfo> {
    let mut filled = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start > cursor {
            filled.push(Span {
                start: cursor,
                end: span.start,
                label: stage.name().to_owned(),
            });
        }
        cursor = span.end;
        filled.push(span);
    }
    if cursor < len {
        filled.push(Span {
            start: cursor,
            end: len,
            label: stage.name().to_owned(),
        });
    }

    filled
        .into_iter()
        .enumerate()
        .flat_map(|(n, span)| {
            let id = format!("{stage}-{n}");
            let size = span.end - span.start;
            (0..size).map(move |index| ChunkInfo {
                id: id.clone(),
                label: span.label.clone(),
                index,
                size,
            })
        })
        .collect()
}
