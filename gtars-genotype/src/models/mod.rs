pub mod allele;
pub mod base;

// re-export for cleaner imports
pub use self::allele::{AlleleKind, AlleleToken, MultiBaseReference, ParseOptions};
pub use self::base::{Base, InsertedBases, is_valid_bases};
