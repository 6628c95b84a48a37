//! Strings over a symbol domain as a group.
//!
//! Two strings are summed symbol by symbol after padding the shorter one with
//! the identity symbol. Padding and cleaning always happen on the same side,
//! so a string and its padded form are the same group element and [`clean`]
//! picks the canonical representative.
//!
//! [`clean`]: StringGroup::clean

use crate::error::AlgebraError;
use crate::symbol::{Domain, TAG_DOMAIN, TEXT_DOMAIN, VALUE_DOMAIN, add_symbols, invert_symbol};

/// The side that carries padding and is stripped by cleaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Pad and strip at the front (right-aligned strings).
    Leading,
    /// Pad and strip at the end (left-aligned strings).
    Trailing,
}

#[derive(Debug)]
pub struct StringGroup {
    pub domain: &'static Domain,
    pub align: Align,
    /// Re-insert one identity symbol before a leading `-` or digit.
    pub guard_leading: bool,
    /// Strip trailing whitespace along with trailing identity symbols.
    pub strip_whitespace: bool,
}

pub static TAG_STRINGS: StringGroup = StringGroup {
    domain: &TAG_DOMAIN,
    align: Align::Leading,
    guard_leading: true,
    strip_whitespace: false,
};

pub static VALUE_STRINGS: StringGroup = StringGroup {
    domain: &VALUE_DOMAIN,
    align: Align::Leading,
    guard_leading: false,
    strip_whitespace: false,
};

pub static TEXT_STRINGS: StringGroup = StringGroup {
    domain: &TEXT_DOMAIN,
    align: Align::Trailing,
    guard_leading: false,
    strip_whitespace: true,
};

impl StringGroup {
    pub fn identity(&self) -> String {
        self.domain.identity().to_string()
    }

    fn is_strippable(&self, c: char) -> bool {
        self.domain.is_identity_like(c) || (self.strip_whitespace && c.is_whitespace())
    }

    /// Canonical form: strip the redundant identity run on the aligned side,
    /// never below one symbol.
    pub fn clean(&self, s: &str) -> String {
        let identity = self.domain.identity();
        let kept = match self.align {
            Align::Leading => s.trim_start_matches(|c| c == identity),
            Align::Trailing => s.trim_end_matches(|c| self.is_strippable(c)),
        };
        let Some(first) = kept.chars().next() else {
            return self.identity();
        };
        if self.guard_leading && (first == '-' || first.is_ascii_digit()) {
            let mut guarded = String::with_capacity(kept.len() + 1);
            guarded.push(identity);
            guarded.push_str(kept);
            return guarded;
        }
        kept.to_string()
    }

    /// True for blank strings: empty, or nothing but identity symbols.
    pub fn is_identity(&self, s: &str) -> bool {
        match self.align {
            Align::Leading => s.chars().all(|c| c == self.domain.identity()),
            Align::Trailing => s.chars().all(|c| self.is_strippable(c)),
        }
    }

    /// Layout characters replaced by the identity symbol, then cleaned. Two
    /// strings are the same group element exactly when their canonical forms
    /// match.
    pub fn canonical(&self, s: &str) -> String {
        let identity = self.domain.identity();
        let mapped: String = s
            .chars()
            .map(|c| if self.domain.is_layout(c) { identity } else { c })
            .collect();
        self.clean(&mapped)
    }

    /// Equality of canonical forms.
    pub fn eq(&self, a: &str, b: &str) -> bool {
        a == b || self.canonical(a) == self.canonical(b)
    }

    /// Fails with `UnknownSymbol` on the first character outside the domain.
    pub fn check(&self, s: &str) -> Result<(), AlgebraError> {
        s.chars().try_for_each(|c| self.domain.lookup(c).map(drop))
    }

    pub fn add(&self, a: &str, b: &str) -> Result<String, AlgebraError> {
        if a.is_empty() || b.is_empty() {
            return Err(AlgebraError::EmptyOperand);
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let len = a.len().max(b.len());
        let identity = self.domain.identity();
        let at = |s: &[char], i: usize| -> char {
            match self.align {
                Align::Leading => (i + s.len())
                    .checked_sub(len)
                    .map_or(identity, |j| s[j]),
                Align::Trailing => s.get(i).copied().unwrap_or(identity),
            }
        };
        let mut sum = String::with_capacity(len);
        for i in 0..len {
            sum.push(add_symbols(at(&a, i), at(&b, i), self.domain)?);
        }
        Ok(self.clean(&sum))
    }

    /// Symbol-wise inverse; the empty string maps to the identity string.
    pub fn invert(&self, s: &str) -> Result<String, AlgebraError> {
        let inverted = s
            .chars()
            .map(|c| invert_symbol(c, self.domain))
            .collect::<Result<String, _>>()?;
        Ok(self.clean(&inverted))
    }

    pub fn sub(&self, a: &str, b: &str) -> Result<String, AlgebraError> {
        self.add(a, &self.invert(b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_sums_are_symbol_wise() {
        assert_eq!(TAG_STRINGS.add("abcde", "abcde").unwrap(), "bdfhj");
        assert_eq!(TAG_STRINGS.add("abcdeZ", "abcdea").unwrap(), "bdfhj_");
    }

    #[test]
    fn tag_operands_are_right_aligned() {
        assert_eq!(TAG_STRINGS.add("ab", "cde").unwrap(), "ceg");
        assert_eq!(TAG_STRINGS.add("_ab", "ab").unwrap(), "bd");
    }

    #[test]
    fn tag_clean_strips_leading_identity_only() {
        assert_eq!(TAG_STRINGS.clean("__ab_"), "ab_");
        assert_eq!(TAG_STRINGS.clean("___"), "_");
        assert_eq!(TAG_STRINGS.clean(""), "_");
    }

    #[test]
    fn tag_clean_guards_leading_hyphen_and_digit() {
        assert_eq!(TAG_STRINGS.clean("__-a"), "_-a");
        assert_eq!(TAG_STRINGS.clean("7b"), "_7b");
        assert_eq!(TAG_STRINGS.add("z", "a").unwrap(), "_-");
    }

    #[test]
    fn identity_is_neutral() {
        for s in ["a", "abc", "Zz-9", "_-"] {
            let sum = TAG_STRINGS.add(s, "_").unwrap();
            assert_eq!(sum, TAG_STRINGS.clean(s), "{s}");
        }
        assert_eq!(TEXT_STRINGS.add("Hello, world", " ").unwrap(), "Hello, world");
    }

    #[test]
    fn inverse_cancels() {
        for (group, s) in [
            (&TAG_STRINGS, "hello-World9"),
            (&VALUE_STRINGS, "id-42"),
            (&TEXT_STRINGS, "It’s a “test” — ok…"),
        ] {
            let inv = group.invert(s).unwrap();
            let sum = group.add(s, &inv).unwrap();
            assert!(group.is_identity(&sum), "{s:?} + {inv:?} = {sum:?}");
            assert_eq!(sum, group.identity());
        }
    }

    #[test]
    fn empty_operand_is_not_the_identity() {
        assert_eq!(TAG_STRINGS.add("", "a"), Err(AlgebraError::EmptyOperand));
        assert_eq!(TAG_STRINGS.add("a", ""), Err(AlgebraError::EmptyOperand));
        assert_eq!(TAG_STRINGS.invert("").unwrap(), "_");
    }

    #[test]
    fn text_strips_trailing_whitespace_only() {
        assert_eq!(TEXT_STRINGS.clean("  a b \n\t "), "  a b");
        assert_eq!(TEXT_STRINGS.clean(" \n "), " ");
        assert!(TEXT_STRINGS.is_identity("\n  \t"));
        assert!(!TEXT_STRINGS.is_identity("  x"));
    }

    #[test]
    fn text_operands_are_left_aligned() {
        // '!' is one step above the identity, so it adds like "+1".
        assert_eq!(TEXT_STRINGS.add("ab", "!").unwrap(), "bb");
        assert_eq!(TEXT_STRINGS.add("!", "ab").unwrap(), "bb");
    }

    #[test]
    fn unknown_symbols_propagate() {
        assert!(matches!(
            TAG_STRINGS.add("a b", "abc"),
            Err(AlgebraError::UnknownSymbol { symbol: ' ', .. })
        ));
        assert!(TAG_STRINGS.invert("é").is_err());
    }

    #[test]
    fn canonical_form_treats_layout_as_identity() {
        assert_eq!(TEXT_STRINGS.canonical("a\nb\t"), "a b");
        assert!(TEXT_STRINGS.eq("a\nb", "a b"));
        assert!(TEXT_STRINGS.eq("\nq", " q"));
        assert!(!TEXT_STRINGS.eq("ab", "a b"));
        assert_eq!(TAG_STRINGS.canonical("__ab"), "ab");
    }

    #[test]
    fn check_rejects_foreign_symbols_only() {
        assert_eq!(TEXT_STRINGS.check("tab\there “ok”"), Ok(()));
        assert_eq!(VALUE_STRINGS.check("id-42_"), Ok(()));
        assert_eq!(
            VALUE_STRINGS.check("é b"),
            Err(AlgebraError::UnknownSymbol {
                symbol: 'é',
                domain: "attribute value"
            })
        );
        assert!(TAG_STRINGS.check("a\nb").is_err());
    }

    #[test]
    fn sub_undoes_add() {
        let sum = VALUE_STRINGS.add("id7", "x2").unwrap();
        assert_eq!(VALUE_STRINGS.sub(&sum, "x2").unwrap(), "id7");
    }
}
