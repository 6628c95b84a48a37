//! Tag-name algebra.
//!
//! Tag names are right-aligned: the shorter name is padded at the front and
//! leading identity symbols are stripped, except that one is kept in front of
//! a leading `-` or digit so the result stays a legal name.

use crate::error::AlgebraError;
use crate::group::{AbelianGroup, Group};
use crate::string::TAG_STRINGS;

pub fn add_tags(a: &str, b: &str) -> Result<String, AlgebraError> {
    TAG_STRINGS.add(a, b)
}

pub fn invert_tag(tag: &str) -> Result<String, AlgebraError> {
    TAG_STRINGS.invert(tag)
}

pub fn clean_tag(tag: &str) -> String {
    TAG_STRINGS.clean(tag)
}

pub fn tags_equal(a: &str, b: &str) -> bool {
    TAG_STRINGS.eq(a, b)
}

pub fn is_identity_tag(tag: &str) -> bool {
    TAG_STRINGS.is_identity(tag)
}

/// A tag name as a group element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag(pub String);

impl Group for Tag {
    fn identity() -> Self {
        Tag(TAG_STRINGS.identity())
    }

    fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        add_tags(&self.0, &other.0).map(Tag)
    }

    fn try_invert(&self) -> Result<Self, AlgebraError> {
        invert_tag(&self.0).map(Tag)
    }

    fn is_identity(&self) -> bool {
        is_identity_tag(&self.0)
    }
}

impl AbelianGroup for Tag {}
