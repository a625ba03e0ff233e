use std::{fmt, iter::Peekable, str::CharIndices, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

/// One of the three rotation axes of the cube. `X` points towards R, `Y`
/// towards U and `Z` towards F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The four faces perpendicular to this axis, in the order a `+1` quarter
    /// turn carries a sticker from one to the next.
    const fn side_cycle(self) -> [Face; 4] {
        use Face::*;
        match self {
            Axis::X => [U, B, D, F],
            Axis::Y => [F, L, B, R],
            Axis::Z => [U, R, D, L],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, L, R, F, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Face::L | Face::R => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// The coordinate of this face's layer along its axis.
    #[must_use]
    pub fn layer(self) -> i8 {
        match self {
            Face::U | Face::R | Face::F => 1,
            Face::D | Face::L | Face::B => -1,
        }
    }

    /// Direction of a clockwise turn of this face, where `+1` is clockwise as
    /// seen from the positive end of the axis. Opposite faces turn against
    /// each other, so this is the same as [`Face::layer`].
    #[must_use]
    pub fn base_direction(self) -> i8 {
        self.layer()
    }

    /// Where a sticker key on this face ends up after a quarter turn about
    /// `axis` in direction `dir`. Faces parallel to the axis keep their key.
    #[must_use]
    pub fn turned(self, axis: Axis, dir: i8) -> Self {
        let cycle = axis.side_cycle();
        match cycle.iter().position(|&face| face == self) {
            Some(i) => cycle[(i + if dir > 0 { 1 } else { 3 }) % 4],
            None => self,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    Single,
    Prime,
    Double,
}

impl Amount {
    pub const ALL: [Self; 3] = [Amount::Single, Amount::Prime, Amount::Double];

    #[must_use]
    pub fn quarter_turns(self) -> i8 {
        match self {
            Amount::Single => 1,
            Amount::Prime => -1,
            Amount::Double => 2,
        }
    }

    /// `None` when the turns cancel out entirely.
    #[must_use]
    pub fn from_quarter_turns(turns: i8) -> Option<Self> {
        match turns.rem_euclid(4) {
            1 => Some(Amount::Single),
            2 => Some(Amount::Double),
            3 => Some(Amount::Prime),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Amount::Single => "",
            Amount::Prime => "'",
            Amount::Double => "2",
        }
    }
}

/// One of the 18 basic face turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub amount: Amount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("`{0}` is not a basic face turn (expected one of U D L R F B, optionally followed by ' or 2)")]
    NotABasicMove(String),
}

impl Move {
    /// Every basic move, grouped by face in `U D L R F B` order.
    pub const ALL: [Self; 18] = {
        let mut out = [Move {
            face: Face::U,
            amount: Amount::Single,
        }; 18];

        let mut i = 0;
        while i < out.len() {
            out[i] = Move {
                face: Face::ALL[i / 3],
                amount: Amount::ALL[i % 3],
            };
            i += 1;
        }

        out
    };

    #[must_use]
    pub fn new(face: Face, amount: Amount) -> Self {
        Move { face, amount }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        let amount = match self.amount {
            Amount::Single => Amount::Prime,
            Amount::Prime => Amount::Single,
            Amount::Double => Amount::Double,
        };
        Move::new(self.face, amount)
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        self.face.axis()
    }

    /// Direction of each quarter turn. A double move repeats the base
    /// direction twice.
    #[must_use]
    pub fn direction(self) -> i8 {
        match self.amount {
            Amount::Prime => -self.face.base_direction(),
            Amount::Single | Amount::Double => self.face.base_direction(),
        }
    }

    #[must_use]
    pub fn quarter_turn_count(self) -> u8 {
        match self.amount {
            Amount::Single | Amount::Prime => 1,
            Amount::Double => 2,
        }
    }

    /// Signed number of quarter turns about the axis, positive meaning
    /// clockwise viewed from the positive end of the axis.
    #[must_use]
    pub fn signed_quarter_turns(self) -> i8 {
        self.face.base_direction() * self.amount.quarter_turns()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.amount.suffix())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter);
        let amount = match (chars.next(), chars.next()) {
            (None, _) => Some(Amount::Single),
            (Some(c), None) if is_prime_mark(c) => Some(Amount::Prime),
            (Some('2'), None) => Some(Amount::Double),
            _ => None,
        };

        match (face, amount) {
            (Some(face), Some(amount)) => Ok(Move::new(face, amount)),
            _ => Err(MoveParseError::NotABasicMove(s.to_owned())),
        }
    }
}

fn is_prime_mark(c: char) -> bool {
    matches!(c, '\'' | '′' | '’')
}

/// Letters the tokenizer treats as the start of a move. This is wider than
/// the basic faces so that slice, wide and rotation tokens surface as tokens
/// and can be rejected by whoever validates them.
fn is_move_letter(c: char) -> bool {
    Face::from_letter(c).is_some()
        || matches!(
            c,
            'M' | 'E' | 'S' | 'x' | 'y' | 'z' | 'u' | 'd' | 'l' | 'r' | 'f' | 'b'
        )
}

/// Lazily splits a move string into raw tokens. See [`parse_moves`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let (start, c) = self.chars.next()?;
            if !is_move_letter(c) {
                continue;
            }

            let mut end = start + c.len_utf8();
            if let Some(&(i, modifier)) = self.chars.peek() {
                if modifier == '2' || is_prime_mark(modifier) {
                    self.chars.next();
                    end = i + modifier.len_utf8();
                }
            }

            return Some(&self.text[start..end]);
        }
    }
}

/// Scans `text` for move tokens: a move letter optionally followed by one
/// modifier (`'` or `2`). Everything else is skipped. Tokens are not
/// validated; parse them into [`Move`] to do that.
#[must_use]
pub fn parse_moves(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        chars: text.char_indices().peekable(),
    }
}

/// Merges adjacent moves on the same face by summing their quarter turns,
/// dropping pairs that cancel. Moves on different faces are never reordered,
/// so `R L R'` stays as it is even though `R` and `L` commute.
#[must_use]
pub fn simplify_moves(moves: &[Move]) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::with_capacity(moves.len());

    for &mv in moves {
        match out.last() {
            Some(last) if last.face == mv.face => {
                let sum = last.amount.quarter_turns() + mv.amount.quarter_turns();
                out.pop();
                if let Some(amount) = Amount::from_quarter_turns(sum) {
                    out.push(Move::new(mv.face, amount));
                }
            }
            _ => out.push(mv),
        }
    }

    out
}

/// The sequence that undoes `moves`.
#[must_use]
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(s: &str) -> Vec<Move> {
        s.split_whitespace().map(|m| m.parse().unwrap()).collect()
    }

    #[test]
    fn tokenizer_skips_noise() {
        let tokens = parse_moves("R U'  F2\n(B) D′ 17").collect::<Vec<_>>();
        assert_eq!(tokens, ["R", "U'", "F2", "B", "D′"]);
    }

    #[test]
    fn tokenizer_surfaces_non_basic_letters() {
        let tokens = parse_moves("x M2 r' Rw").collect::<Vec<_>>();
        assert_eq!(tokens, ["x", "M2", "r'", "R"]);
        assert!("M2".parse::<Move>().is_err());
        assert!("x".parse::<Move>().is_err());
    }

    #[test]
    fn parse_and_display() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
        assert_eq!("R′".parse::<Move>(), Ok(Move::new(Face::R, Amount::Prime)));
        assert!("R3".parse::<Move>().is_err());
        assert!("RR".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn all_moves_are_distinct() {
        let unique = Move::ALL.iter().unique().count();
        assert_eq!(unique, 18);
        assert_eq!(Move::ALL[0].to_string(), "U");
        assert_eq!(Move::ALL[17].to_string(), "B2");
    }

    #[test]
    fn simplify_cancels_inverse_pair() {
        assert!(simplify_moves(&moves("R R'")).is_empty());
    }

    #[test]
    fn simplify_three_quarters_to_prime() {
        assert_eq!(simplify_moves(&moves("U U U")), moves("U'"));
        assert_eq!(simplify_moves(&moves("U2 U")), moves("U'"));
        assert_eq!(simplify_moves(&moves("F' F'")), moves("F2"));
    }

    #[test]
    fn simplify_collapses_through_cancellation() {
        assert!(simplify_moves(&moves("R U U' R'")).is_empty());
        assert_eq!(simplify_moves(&moves("R U U' R")), moves("R2"));
    }

    #[test]
    fn simplify_keeps_commuting_faces_apart() {
        assert_eq!(simplify_moves(&moves("R L R'")), moves("R L R'"));
    }

    #[test]
    fn simplify_is_idempotent() {
        for seq in ["R R R R U", "U U' U2 D D D F B' B", "L2 L2 R", "F R U R' U' F'"] {
            let once = simplify_moves(&moves(seq));
            assert_eq!(simplify_moves(&once), once, "{seq}");
        }
    }

    #[test]
    fn inverse_sequence() {
        assert_eq!(invert_moves(&moves("R U R' U'")), moves("U R U' R'"));
        assert_eq!(format_moves(&invert_moves(&moves("F2 B"))), "B' F2");
    }

    #[test]
    fn sticker_cycles() {
        assert_eq!(Face::U.turned(Axis::X, 1), Face::B);
        assert_eq!(Face::F.turned(Axis::X, 1), Face::U);
        assert_eq!(Face::U.turned(Axis::X, -1), Face::F);
        assert_eq!(Face::R.turned(Axis::X, 1), Face::R);
        assert_eq!(Face::F.turned(Axis::Y, 1), Face::L);
        assert_eq!(Face::U.turned(Axis::Z, 1), Face::R);
    }
}
