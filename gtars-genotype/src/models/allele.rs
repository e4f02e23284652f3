use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use log::debug;
use md5::{Digest, Md5};

use crate::consts::{DELETION_MARKER, INSERTION_MARKER, NO_CALL};
use crate::errors::{AlleleError, AlleleResult, EncodingViolation};
use crate::models::base::{Base, InsertedBases};

///
/// The shape of an allele token.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlleleKind {
    SingleBase,
    Insertion,
    Deletion,
    Uncalled,
    /// Only meaningful for a set of alleles, never as the encoding of one call.
    Mixed,
}

impl AlleleKind {
    pub fn name(&self) -> &'static str {
        match self {
            AlleleKind::SingleBase => "SINGLE_BASE",
            AlleleKind::Insertion => "INSERTION",
            AlleleKind::Deletion => "DELETION",
            AlleleKind::Uncalled => "UNCALLED",
            AlleleKind::Mixed => "MIXED",
        }
    }

    ///
    /// Collapse the kinds of several alleles into one: the shared kind if they
    /// all agree, `Mixed` otherwise, `None` when there is nothing to collapse.
    ///
    pub fn aggregate<I>(kinds: I) -> Option<AlleleKind>
    where
        I: IntoIterator<Item = AlleleKind>,
    {
        let mut kinds = kinds.into_iter();
        let first = kinds.next()?;
        if kinds.all(|k| k == first) {
            Some(first)
        } else {
            Some(AlleleKind::Mixed)
        }
    }
}

impl Display for AlleleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// A multi-character allele kept verbatim because the caller allowed
/// multi-base references. Only [`AlleleToken::parse`] builds one, so it is
/// never empty.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiBaseReference(String);

impl MultiBaseReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-call parsing switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept any multi-character string without a `D`/`I` marker as a
    /// `Mixed` token, bypassing the base alphabet check.
    pub allow_multi_base_reference: bool,
}

impl ParseOptions {
    pub fn multi_base_reference() -> Self {
        ParseOptions {
            allow_multi_base_reference: true,
        }
    }
}

///
/// One allele call from a genotype field, e.g. `A`, `.`, `D5` or `IACGT`.
///
/// Tokens are immutable: the kind is fixed by the lexical shape of the
/// input when parsed.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlleleToken {
    SingleBase(Base),
    Insertion(InsertedBases),
    /// Number of deleted bases.
    Deletion(usize),
    Uncalled,
    Mixed(MultiBaseReference),
}

impl AlleleToken {
    ///
    /// Parse a token without allowing multi-base references.
    ///
    pub fn new(raw: &str) -> AlleleResult<Self> {
        Self::parse(raw, ParseOptions::default())
    }

    ///
    /// Parse and classify a raw allele token.
    ///
    /// # Arguments
    /// * `raw` - the token text
    /// * `options` - per-call switches, see [`ParseOptions`]
    ///
    /// # Returns
    /// * the token, or the rule it broke. A deletion whose length is not a
    ///   non-negative integer fails with [`AlleleError::NumberFormat`].
    ///
    pub fn parse(raw: &str, options: ParseOptions) -> AlleleResult<Self> {
        let mut chars = raw.chars();
        let first = chars
            .next()
            .ok_or_else(|| AlleleError::invalid(raw, EncodingViolation::Empty))?;
        let rest = chars.as_str();

        if rest.is_empty() {
            return Self::parse_single(raw, first);
        }

        // the D/I markers win even when multi-base references are allowed
        match first.to_ascii_uppercase() {
            DELETION_MARKER => {
                let length = rest
                    .parse::<usize>()
                    .map_err(|source| AlleleError::NumberFormat {
                        raw: raw.to_string(),
                        source,
                    })?;
                Ok(AlleleToken::Deletion(length))
            }
            INSERTION_MARKER => {
                let bases = InsertedBases::checked(rest).ok_or_else(|| {
                    AlleleError::invalid(raw, EncodingViolation::InsertionAlphabet)
                })?;
                Ok(AlleleToken::Insertion(bases))
            }
            _ if options.allow_multi_base_reference => {
                debug!("Accepting unvalidated multi-base reference `{}` as a mixed allele", raw);
                Ok(AlleleToken::Mixed(MultiBaseReference(raw.to_string())))
            }
            _ => Err(AlleleError::invalid(
                raw,
                EncodingViolation::UnrecognizedMarker,
            )),
        }
    }

    fn parse_single(raw: &str, c: char) -> AlleleResult<Self> {
        if raw == NO_CALL {
            return Ok(AlleleToken::Uncalled);
        }
        Base::from_char(c)
            .map(AlleleToken::SingleBase)
            .ok_or_else(|| AlleleError::invalid(raw, EncodingViolation::SingleBaseAlphabet))
    }

    pub fn kind(&self) -> AlleleKind {
        match self {
            AlleleToken::SingleBase(_) => AlleleKind::SingleBase,
            AlleleToken::Insertion(_) => AlleleKind::Insertion,
            AlleleToken::Deletion(_) => AlleleKind::Deletion,
            AlleleToken::Uncalled => AlleleKind::Uncalled,
            AlleleToken::Mixed(_) => AlleleKind::Mixed,
        }
    }

    ///
    /// The base payload: the called base, the inserted bases, the raw mixed
    /// string, the no-call marker for uncalled tokens, empty for deletions.
    ///
    pub fn bases(&self) -> &str {
        match self {
            AlleleToken::SingleBase(base) => base.as_str(),
            AlleleToken::Insertion(bases) => bases.as_str(),
            AlleleToken::Mixed(reference) => reference.as_str(),
            AlleleToken::Deletion(_) => "",
            AlleleToken::Uncalled => NO_CALL,
        }
    }

    ///
    /// Zero for single bases and no-calls, the base count for insertions and
    /// mixed tokens, the deleted length for deletions.
    ///
    pub fn length(&self) -> usize {
        match self {
            AlleleToken::SingleBase(_) | AlleleToken::Uncalled => 0,
            AlleleToken::Insertion(bases) => bases.len(),
            AlleleToken::Mixed(reference) => reference.as_str().chars().count(),
            AlleleToken::Deletion(length) => *length,
        }
    }

    pub fn is_called(&self) -> bool {
        !matches!(self, AlleleToken::Uncalled)
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, AlleleToken::Insertion(_) | AlleleToken::Deletion(_))
    }

    ///
    /// Compare against a value of another type by its string form.
    ///
    /// Only an uncalled token matches, and only values rendering as the
    /// no-call marker. The reverse comparison is not provided, and such
    /// values need not hash like the token they equal.
    ///
    pub fn eq_marker<T: Display + ?Sized>(&self, other: &T) -> bool {
        matches!(self, AlleleToken::Uncalled) && other.to_string() == NO_CALL
    }

    fn hash_key(&self) -> String {
        format!("{}{}{}", self.bases(), self.length(), self.kind().name())
    }

    ///
    /// Stable 64-bit hash of bases, length and kind name. Equal tokens
    /// always share a hash code.
    ///
    pub fn hash_code(&self) -> u64 {
        fxhash::hash64(&self.hash_key())
    }

    ///
    /// Calculate an md5 digest of the token from the same key as
    /// [`AlleleToken::hash_code`].
    ///
    pub fn digest(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.hash_key());
        format!("{:x}", hasher.finalize())
    }
}

impl Hash for AlleleToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl PartialEq<str> for AlleleToken {
    fn eq(&self, other: &str) -> bool {
        self.eq_marker(other)
    }
}

impl PartialEq<&str> for AlleleToken {
    fn eq(&self, other: &&str) -> bool {
        self.eq_marker(*other)
    }
}

impl PartialEq<String> for AlleleToken {
    fn eq(&self, other: &String) -> bool {
        self.eq_marker(other.as_str())
    }
}

impl Display for AlleleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlleleToken::SingleBase(_) | AlleleToken::Uncalled | AlleleToken::Mixed(_) => {
                write!(f, "{}", self.bases())
            }
            AlleleToken::Insertion(bases) => write!(f, "{}{}", INSERTION_MARKER, bases),
            AlleleToken::Deletion(length) => write!(f, "{}{}", DELETION_MARKER, length),
        }
    }
}

impl FromStr for AlleleToken {
    type Err = AlleleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlleleToken::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AlleleToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AlleleToken {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        AlleleToken::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::collections::HashSet;
    use std::num::IntErrorKind;

    #[rstest]
    #[case("A", Base::A)]
    #[case("c", Base::C)]
    #[case("G", Base::G)]
    #[case("t", Base::T)]
    fn test_single_base(#[case] raw: &str, #[case] base: Base) {
        let token = AlleleToken::new(raw).unwrap();

        assert_eq!(token, AlleleToken::SingleBase(base));
        assert_eq!(token.kind(), AlleleKind::SingleBase);
        assert_eq!(token.bases(), raw.to_ascii_uppercase());
        assert_eq!(token.length(), 0);
        assert_eq!(token.to_string(), raw.to_ascii_uppercase());
    }

    #[rstest]
    fn test_uncalled() {
        let token = AlleleToken::new(".").unwrap();

        assert_eq!(token.kind(), AlleleKind::Uncalled);
        assert_eq!(token.bases(), ".");
        assert_eq!(token.length(), 0);
        assert_eq!(token.to_string(), ".");
        assert_eq!(token.is_called(), false);
    }

    #[rstest]
    fn test_deletion() {
        let token = AlleleToken::new("D5").unwrap();

        assert_eq!(token.kind(), AlleleKind::Deletion);
        assert_eq!(token.bases(), "");
        assert_eq!(token.length(), 5);
        assert_eq!(token.to_string(), "D5");
        assert_eq!(token.is_structural(), true);
    }

    #[rstest]
    fn test_insertion() {
        let token = AlleleToken::new("iacgn").unwrap();

        assert_eq!(token.kind(), AlleleKind::Insertion);
        assert_eq!(token.bases(), "ACGN");
        assert_eq!(token.length(), 4);
        assert_eq!(token.to_string(), "IACGN");
    }

    #[rstest]
    #[case("", EncodingViolation::Empty)]
    #[case("X", EncodingViolation::SingleBaseAlphabet)]
    #[case("N", EncodingViolation::SingleBaseAlphabet)]
    #[case("D", EncodingViolation::SingleBaseAlphabet)]
    #[case("IAXGT", EncodingViolation::InsertionAlphabet)]
    #[case("XYZ", EncodingViolation::UnrecognizedMarker)]
    #[case("AC", EncodingViolation::UnrecognizedMarker)]
    #[case("é", EncodingViolation::SingleBaseAlphabet)]
    #[case("Ié", EncodingViolation::InsertionAlphabet)]
    #[case("éé", EncodingViolation::UnrecognizedMarker)]
    fn test_invalid_encoding(#[case] raw: &str, #[case] expected: EncodingViolation) {
        match AlleleToken::new(raw) {
            Err(AlleleError::InvalidEncoding { raw: r, violation }) => {
                assert_eq!(r, raw);
                assert_eq!(violation, expected);
            }
            other => panic!("expected invalid encoding for {raw:?}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("Dabc")]
    #[case("D-1")]
    #[case("D5X")]
    #[case("Dé")]
    #[case("D99999999999999999999999")]
    fn test_deletion_number_format(#[case] raw: &str) {
        let err = AlleleToken::new(raw).unwrap_err();
        assert_eq!(matches!(err, AlleleError::NumberFormat { .. }), true);
        assert_eq!(err.raw(), raw);
    }

    #[rstest]
    fn test_deletion_length_overflow() {
        match AlleleToken::new("D99999999999999999999999") {
            Err(AlleleError::NumberFormat { source, .. }) => {
                assert_eq!(source.kind(), &IntErrorKind::PosOverflow);
            }
            other => panic!("expected number format error, got {other:?}"),
        }
    }

    #[rstest]
    fn test_insertion_built_directly_is_validated() {
        let token = AlleleToken::Insertion(InsertedBases::new("acn").unwrap());

        assert_eq!(token.to_string(), "IACN");
        assert_eq!(AlleleToken::new(&token.to_string()).unwrap(), token);
        assert_eq!(InsertedBases::new("").is_err(), true);
        assert_eq!(InsertedBases::new("acx").is_err(), true);
    }

    #[rstest]
    fn test_multi_base_reference_is_mixed() {
        // unvalidated input silently becomes a valid mixed token here
        let token = AlleleToken::parse("xYz", ParseOptions::multi_base_reference()).unwrap();

        assert_eq!(token.kind(), AlleleKind::Mixed);
        assert_eq!(token.bases(), "xYz");
        assert_eq!(token.length(), 3);
        assert_eq!(token.to_string(), "xYz");
    }

    #[rstest]
    fn test_multi_base_reference_keeps_markers() {
        let opts = ParseOptions::multi_base_reference();

        assert_eq!(
            AlleleToken::parse("D3", opts).unwrap(),
            AlleleToken::Deletion(3)
        );
        assert_eq!(
            AlleleToken::parse("Ia", opts).unwrap(),
            AlleleToken::new("IA").unwrap()
        );
        assert_eq!(
            matches!(
                AlleleToken::parse("Dxyz", opts),
                Err(AlleleError::NumberFormat { .. })
            ),
            true
        );
        assert_eq!(AlleleToken::parse("X", opts).is_err(), true);
    }

    #[rstest]
    fn test_case_insensitive_equality_and_hash() {
        let lower = AlleleToken::new("d5").unwrap();
        let upper = AlleleToken::new("D5").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.hash_code(), upper.hash_code());
        assert_eq!(lower.digest(), upper.digest());

        let set: HashSet<AlleleToken> = [lower, upper].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_distinct_tokens_differ() {
        let a = AlleleToken::new("A").unwrap();
        let ins = AlleleToken::new("IA").unwrap();
        let del = AlleleToken::new("D1").unwrap();

        assert_ne!(a, ins);
        assert_ne!(ins, del);
        assert_ne!(a.hash_code(), ins.hash_code());
    }

    #[rstest]
    fn test_uncalled_equals_marker() {
        let token = AlleleToken::new(".").unwrap();

        assert_eq!(token == ".", true);
        assert_eq!(token == String::from("."), true);
        assert_eq!(token.eq_marker(&'.'), true);
        assert_eq!(token == "A", false);
    }

    #[rstest]
    fn test_called_never_equals_string() {
        let token = AlleleToken::new("A").unwrap();

        assert_eq!(token == "A", false);
        assert_eq!(token == ".", false);
        assert_eq!(Some(&token) == None, false);
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![AlleleKind::SingleBase], Some(AlleleKind::SingleBase))]
    #[case(vec![AlleleKind::Deletion, AlleleKind::Deletion], Some(AlleleKind::Deletion))]
    #[case(vec![AlleleKind::SingleBase, AlleleKind::Insertion], Some(AlleleKind::Mixed))]
    fn test_aggregate(#[case] kinds: Vec<AlleleKind>, #[case] expected: Option<AlleleKind>) {
        assert_eq!(AlleleKind::aggregate(kinds), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_serde_uses_canonical_string() {
        let token = AlleleToken::new("iac").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"IAC\"");

        let back: AlleleToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);

        assert_eq!(serde_json::from_str::<AlleleToken>("\"XYZ\"").is_err(), true);
    }
}
