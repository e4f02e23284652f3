//! Helpers for the alleles of one genotype field, e.g. `A/IAC` or `.|D2`.

use log::warn;

use crate::consts::GENOTYPE_SEPARATORS;
use crate::errors::AlleleResult;
use crate::models::{AlleleKind, AlleleToken, ParseOptions};

///
/// Parse every allele of a genotype field, stopping at the first bad one.
///
pub fn parse_alleles(field: &str, options: ParseOptions) -> AlleleResult<Vec<AlleleToken>> {
    field
        .split(GENOTYPE_SEPARATORS)
        .map(|raw| AlleleToken::parse(raw, options))
        .collect()
}

///
/// Parse the alleles of a genotype field, logging and skipping bad ones.
///
pub fn parse_alleles_lenient(field: &str, options: ParseOptions) -> Vec<AlleleToken> {
    field
        .split(GENOTYPE_SEPARATORS)
        .filter_map(|raw| match AlleleToken::parse(raw, options) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Skipping allele in genotype field `{}`: {}", field, e);
                None
            }
        })
        .collect()
}

/// The aggregate kind of a set of alleles, see [`AlleleKind::aggregate`].
pub fn aggregate_kind(alleles: &[AlleleToken]) -> Option<AlleleKind> {
    AlleleKind::aggregate(alleles.iter().map(AlleleToken::kind))
}
