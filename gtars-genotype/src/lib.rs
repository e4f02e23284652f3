//! # gtars-genotype
//!
//! Parsing, validation and canonical rendering of the allele tokens found in
//! VCF-style genotype fields.
//!
//! ## Token grammar
//!
//! - `.` : no call
//! - `A`, `C`, `G`, `T` (any case): a single called base
//! - `D<n>` : a deletion of `n` bases, e.g. `D12`
//! - `I<bases>` : an insertion of A/C/G/T/N bases, e.g. `IACGT`
//! - anything else: rejected, unless the caller allows multi-base references,
//!   in which case it is kept verbatim as a mixed allele
//!
//! ## Example
//!
//! ```rust
//! use gtars_genotype::{AlleleKind, AlleleToken};
//!
//! let token = AlleleToken::new("iacgt").unwrap();
//! assert_eq!(token.kind(), AlleleKind::Insertion);
//! assert_eq!(token.length(), 4);
//! assert_eq!(token.to_string(), "IACGT");
//! ```
//!
pub mod errors;
pub mod field;
pub mod models;

// re-export things
pub use errors::*;
pub use field::*;
pub use models::*;

pub mod consts {
    /// The reserved no-call allele.
    pub const NO_CALL: &str = ".";
    pub const DELETION_MARKER: char = 'D';
    pub const INSERTION_MARKER: char = 'I';
    /// Bases allowed in insertions. Single base calls exclude `N`.
    pub const VALID_BASES: [char; 5] = ['A', 'C', 'G', 'T', 'N'];
    /// Allele separators of unphased and phased genotype fields.
    pub const GENOTYPE_SEPARATORS: [char; 2] = ['/', '|'];
}
