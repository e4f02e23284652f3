use std::fmt::{self, Display};

use crate::consts::VALID_BASES;
use crate::errors::{AlleleError, AlleleResult, EncodingViolation};

///
/// A single called nucleotide. `N` is not a callable base on its own; it
/// only appears inside insertion sequences.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Case-insensitive conversion from a character.
    pub fn from_char(c: char) -> Option<Base> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Base::A => "A",
            Base::C => "C",
            Base::G => "G",
            Base::T => "T",
        }
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Check that a string only holds A, C, G, T or N, ignoring case.
/// The empty string passes.
///
pub fn is_valid_bases(bases: &str) -> bool {
    bases
        .chars()
        .all(|c| VALID_BASES.contains(&c.to_ascii_uppercase()))
}

///
/// The bases of an insertion: non-empty, uppercased, drawn from A, C, G, T, N.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertedBases(String);

impl InsertedBases {
    pub fn new(bases: &str) -> AlleleResult<Self> {
        Self::checked(bases)
            .ok_or_else(|| AlleleError::invalid(bases, EncodingViolation::InsertionAlphabet))
    }

    pub(crate) fn checked(bases: &str) -> Option<Self> {
        if bases.is_empty() || !is_valid_bases(bases) {
            return None;
        }
        Some(InsertedBases(bases.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for InsertedBases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
