use std::fmt::{self, Display};
use std::num::ParseIntError;

use thiserror::Error;

/// The encoding rule an allele token broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingViolation {
    /// The token was the empty string.
    Empty,
    /// A single-character token that is neither a base nor the no-call marker.
    SingleBaseAlphabet,
    /// A multi-character token without a `D`/`I` marker, and multi-base
    /// references were not allowed.
    UnrecognizedMarker,
    /// An insertion whose bases fall outside of A, C, G, T, N.
    InsertionAlphabet,
}

impl Display for EncodingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodingViolation::Empty => "allele encoding is empty",
            EncodingViolation::SingleBaseAlphabet => {
                "alleles of length 1 must be one of A, C, G, T or the no-call marker (.)"
            }
            EncodingViolation::UnrecognizedMarker => {
                "not a valid deletion, insertion, base, or no call (.)"
            }
            EncodingViolation::InsertionAlphabet => "insertion base string contained invalid bases",
        };
        write!(f, "{}", msg)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlleleError {
    #[error("Invalid allele encoding `{raw}`: {violation}")]
    InvalidEncoding {
        raw: String,
        violation: EncodingViolation,
    },

    #[error("Invalid deletion length in allele encoding `{raw}`: {source}")]
    NumberFormat {
        raw: String,
        #[source]
        source: ParseIntError,
    },
}

impl AlleleError {
    pub(crate) fn invalid(raw: &str, violation: EncodingViolation) -> Self {
        AlleleError::InvalidEncoding {
            raw: raw.to_string(),
            violation,
        }
    }

    /// The raw token that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            AlleleError::InvalidEncoding { raw, .. } => raw,
            AlleleError::NumberFormat { raw, .. } => raw,
        }
    }
}

pub type AlleleResult<T> = std::result::Result<T, AlleleError>;
