//! Move notation codec and scripted-playback tokens.
//!
//! Two grammars live here:
//! - **Moves**: a face letter optionally followed by `'` (`R`, `R'`). Only the
//!   first two characters are significant.
//! - **Play tokens**: the primitive stream consumed by scripted playback.
//!   `1` selects forward, `2` selects reverse, a bare letter turns that face
//!   once in the currently selected direction. Double turns are a repeated
//!   letter.

use std::str::FromStr;

use crate::error::{NotationError, Result};
use crate::face::Face;

/// Marker for the reverse direction.
pub const REVERSE_MARK: char = '\'';

/// A single quarter turn of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub reverse: bool,
}

impl Move {
    /// Create a new move.
    pub const fn new(face: Face, reverse: bool) -> Self {
        Self { face, reverse }
    }

    /// Forward quarter turn.
    pub const fn forward(face: Face) -> Self {
        Self::new(face, false)
    }

    /// Reverse quarter turn.
    pub const fn reversed(face: Face) -> Self {
        Self::new(face, true)
    }

    /// The algebraic inverse: same face, opposite direction.
    pub const fn inverse(self) -> Self {
        Self::new(self.face, !self.reverse)
    }

    /// Signed target angle in radians.
    pub fn angle(self) -> f32 {
        self.face.quarter_turn(self.reverse)
    }

    /// Encode as notation.
    pub fn notation(self) -> String {
        self.to_string()
    }

    /// Decode a notation token.
    pub fn parse(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        let first = chars.next().ok_or(NotationError::Empty)?;
        let face = Face::from_letter(first).ok_or(NotationError::UnknownFace(first))?;
        let reverse = chars.next() == Some(REVERSE_MARK);
        Ok(Self::new(face, reverse))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.reverse {
            write!(f, "{}{}", self.face, REVERSE_MARK)
        } else {
            write!(f, "{}", self.face)
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Move::parse(&token).map_err(serde::de::Error::custom)
    }
}

/// One primitive token of a scripted move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayToken {
    /// Select the forward direction (`1`).
    Forward,
    /// Select the reverse direction (`2`).
    Reverse,
    /// Turn a face once in the selected direction.
    Turn(Face),
}

impl PlayToken {
    /// Decode a primitive token.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "" => Err(NotationError::Empty),
            "1" => Ok(PlayToken::Forward),
            "2" => Ok(PlayToken::Reverse),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => Face::from_letter(letter)
                        .map(PlayToken::Turn)
                        .ok_or(NotationError::UnknownFace(letter)),
                    _ => Err(NotationError::InvalidToken(token.to_string())),
                }
            }
        }
    }

    /// Whether this token changes direction rather than turning a face.
    pub const fn is_direction(self) -> bool {
        matches!(self, PlayToken::Forward | PlayToken::Reverse)
    }
}

impl std::fmt::Display for PlayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayToken::Forward => f.write_str("1"),
            PlayToken::Reverse => f.write_str("2"),
            PlayToken::Turn(face) => write!(f, "{face}"),
        }
    }
}

impl FromStr for PlayToken {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PlayToken {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PlayToken {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        PlayToken::parse(&token).map_err(serde::de::Error::custom)
    }
}

/// Parse an already-primitive token list.
pub fn parse_play_tokens<I, S>(tokens: I) -> Result<Vec<PlayToken>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| PlayToken::parse(t.as_ref())).collect()
}

/// Expand standard solver output into primitive play tokens.
///
/// - `X` becomes `X`
/// - `X'` becomes `2 X 1` (reverse, turn, back to forward)
/// - `X2` becomes `X X`
///
/// ```
/// use cubeturn_geometry::{expand_solution, Face, PlayToken};
///
/// let tokens = expand_solution("R' D2").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         PlayToken::Reverse,
///         PlayToken::Turn(Face::R),
///         PlayToken::Forward,
///         PlayToken::Turn(Face::D),
///         PlayToken::Turn(Face::D),
///     ]
/// );
/// ```
pub fn expand_solution(solution: &str) -> Result<Vec<PlayToken>> {
    let mut tokens = Vec::new();
    for step in solution.split_whitespace() {
        let mut chars = step.chars();
        let first = chars.next().ok_or(NotationError::Empty)?;
        let face = Face::from_letter(first).ok_or(NotationError::UnknownFace(first))?;
        let turn = PlayToken::Turn(face);

        match chars.as_str() {
            "" => tokens.push(turn),
            "'" => tokens.extend([PlayToken::Reverse, turn, PlayToken::Forward]),
            // A half turn is the same in either direction
            "2" | "2'" | "'2" => tokens.extend([turn, turn]),
            _ => return Err(NotationError::InvalidToken(step.to_string())),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_move() -> impl Strategy<Value = Move> {
        (0..Face::ALL.len(), any::<bool>())
            .prop_map(|(i, reverse)| Move::new(Face::ALL[i], reverse))
    }

    #[test]
    fn encode_forward_and_reverse() {
        assert_eq!(Move::forward(Face::R).notation(), "R");
        assert_eq!(Move::reversed(Face::M).notation(), "M'");
    }

    #[test]
    fn decode_ignores_trailing_characters() {
        assert_eq!(Move::parse("U'x").unwrap(), Move::reversed(Face::U));
        assert_eq!(Move::parse("Ux'").unwrap(), Move::forward(Face::U));
    }

    #[test]
    fn decode_rejects_unknown_faces() {
        assert_eq!(Move::parse("X"), Err(NotationError::UnknownFace('X')));
        assert_eq!(Move::parse("'"), Err(NotationError::UnknownFace('\'')));
        assert_eq!(Move::parse(""), Err(NotationError::Empty));
    }

    #[test]
    fn inverse_is_involution() {
        let m = Move::forward(Face::F);
        assert_eq!(m.inverse(), Move::reversed(Face::F));
        assert_eq!(m.inverse().inverse(), m);
        assert_eq!(m.inverse().angle(), -m.angle());
    }

    #[test]
    fn play_tokens_parse() {
        assert_eq!(PlayToken::parse("1").unwrap(), PlayToken::Forward);
        assert_eq!(PlayToken::parse("2").unwrap(), PlayToken::Reverse);
        assert_eq!(PlayToken::parse("B").unwrap(), PlayToken::Turn(Face::B));
        assert_eq!(PlayToken::parse("3"), Err(NotationError::UnknownFace('3')));
        assert!(matches!(PlayToken::parse("R'"), Err(NotationError::InvalidToken(_))));
        assert!(PlayToken::Reverse.is_direction());
        assert!(!PlayToken::Turn(Face::L).is_direction());
    }

    #[test]
    fn expansion_matches_solver_glue() {
        let solution = "D2 R' D' F2 B";
        let expected: Vec<String> = ["D", "D", "2", "R", "1", "2", "D", "1", "F", "F", "B"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tokens = expand_solution(solution).unwrap();
        let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, expected);
        assert_eq!(parse_play_tokens(&expected).unwrap(), tokens);
    }

    #[test]
    fn expansion_rejects_garbage() {
        assert_eq!(expand_solution("R Q"), Err(NotationError::UnknownFace('Q')));
        assert!(matches!(expand_solution("R3"), Err(NotationError::InvalidToken(_))));
        assert_eq!(expand_solution("   ").unwrap(), Vec::new());
    }

    proptest! {
        #[test]
        fn codec_round_trips(m in any_move()) {
            prop_assert_eq!(Move::parse(&m.notation()).unwrap(), m);
        }
    }
}
