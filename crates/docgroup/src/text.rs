//! Character-data algebra for element text and tails.
//!
//! Text is left-aligned: padding and cleanup happen at the end, and trailing
//! whitespace carries no meaning. `None` (no character data at all) is kept
//! apart from the identity string: `None + None` stays `None`, otherwise a
//! `None` or empty side contributes nothing to the sum.

use crate::error::AlgebraError;
use crate::group::{AbelianGroup, Group};
use crate::string::TEXT_STRINGS;

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.is_empty())
}

pub fn add_text(a: Option<&str>, b: Option<&str>) -> Result<Option<String>, AlgebraError> {
    if a.is_none() && b.is_none() {
        return Ok(None);
    }
    let sum = match (non_empty(a), non_empty(b)) {
        (Some(a), Some(b)) => TEXT_STRINGS.add(a, b)?,
        (Some(s), None) | (None, Some(s)) => {
            // Run the symbols through the domain so foreign characters fail
            // the same way whichever side they come from.
            TEXT_STRINGS.add(s, &TEXT_STRINGS.identity())?
        }
        (None, None) => TEXT_STRINGS.identity(),
    };
    Ok(Some(sum))
}

pub fn invert_text(text: Option<&str>) -> Result<Option<String>, AlgebraError> {
    text.map(|s| TEXT_STRINGS.invert(s)).transpose()
}

/// Fails with `UnknownSymbol` if the text holds a character outside the
/// text domain.
pub fn check_text(text: Option<&str>) -> Result<(), AlgebraError> {
    text.map_or(Ok(()), |s| TEXT_STRINGS.check(s))
}

/// No character data, or only whitespace.
pub fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|s| TEXT_STRINGS.is_identity(s))
}

/// Equality in canonical form: layout counts as a space, trailing
/// whitespace is ignored and `None` equals `""`.
pub fn text_equal(a: Option<&str>, b: Option<&str>) -> bool {
    TEXT_STRINGS.eq(a.unwrap_or(""), b.unwrap_or(""))
}

/// Element text or tail as a group element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text(pub Option<String>);

impl Group for Text {
    fn identity() -> Self {
        Text(None)
    }

    fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        add_text(self.0.as_deref(), other.0.as_deref()).map(Text)
    }

    fn try_invert(&self) -> Result<Self, AlgebraError> {
        invert_text(self.0.as_deref()).map(Text)
    }

    fn is_identity(&self) -> bool {
        is_blank(self.0.as_deref())
    }
}

impl AbelianGroup for Text {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_plus_absent_stays_absent() {
        assert_eq!(add_text(None, None).unwrap(), None);
    }

    #[test]
    fn absent_side_contributes_nothing() {
        assert_eq!(add_text(None, Some("hi  ")).unwrap().as_deref(), Some("hi"));
        assert_eq!(add_text(Some("hi"), None).unwrap().as_deref(), Some("hi"));
        assert_eq!(add_text(Some(""), None).unwrap().as_deref(), Some(" "));
    }

    #[test]
    fn absent_side_still_checks_symbols() {
        assert!(add_text(None, Some("naïve")).is_err());
    }

    #[test]
    fn text_inverse_is_blank() {
        let text = Some("Hello, “world”!\n");
        let inv = invert_text(text).unwrap();
        let sum = add_text(text, inv.as_deref()).unwrap();
        assert!(is_blank(sum.as_deref()), "{sum:?}");
        assert_eq!(invert_text(None).unwrap(), None);
    }

    #[test]
    fn equality_ignores_trailing_whitespace_only() {
        assert!(text_equal(Some("a \n"), Some("a")));
        assert!(text_equal(None, Some("")));
        assert!(text_equal(None, Some("  \n")));
        assert!(!text_equal(Some(" a"), Some("a")));
    }

    #[test]
    fn layout_compares_as_a_space() {
        assert!(text_equal(Some("a\nb"), Some("a b")));
        assert!(text_equal(Some("\tx"), Some(" x")));
        assert!(!text_equal(Some("a\nb"), Some("ab")));
    }

    #[test]
    fn text_sums_associate_with_layout_operands() {
        let (a, b, c) = (Some("\nq"), Some("a"), Some("E"));
        let ab = add_text(a, b).unwrap();
        let left = add_text(ab.as_deref(), c).unwrap();
        let bc = add_text(b, c).unwrap();
        let right = add_text(a, bc.as_deref()).unwrap();
        assert!(
            text_equal(left.as_deref(), right.as_deref()),
            "{left:?} vs {right:?}"
        );
    }

    #[test]
    fn layout_survives_identity_sums() {
        assert_eq!(add_text(Some("\n"), Some(" ")).unwrap().as_deref(), Some(" "));
        assert!(is_blank(Some("\n\t ")));
    }
}
