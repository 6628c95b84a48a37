//! Element algebra: tag, attribute set, text and tail as one group element.

use crate::attributes::{
    add_attribute_sets, attribute_sets_equal, invert_attribute_set, is_blank_value,
};
use crate::error::AlgebraError;
use crate::group::{AbelianGroup, Group};
use crate::string::{TAG_STRINGS, VALUE_STRINGS};
use crate::tag::{add_tags, invert_tag, is_identity_tag, tags_equal};
use crate::text::{add_text, check_text, invert_text, is_blank, text_equal};
use markup::{Attributes, Element};

pub use crate::position::position;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EqualityOptions {
    /// Compare only tags, text and tails.
    pub ignore_attributes: bool,
}

pub fn add_elements(a: &Element, b: &Element) -> Result<Element, AlgebraError> {
    Ok(Element {
        name: add_tags(&a.name, &b.name)?,
        attributes: add_attribute_sets(&a.attributes, &b.attributes)?,
        text: add_text(a.text.as_deref(), b.text.as_deref())?,
        tail: add_text(a.tail.as_deref(), b.tail.as_deref())?,
    })
}

/// Fails with `UnknownSymbol` if any component holds a character outside
/// its domain. Nodes that only one operand has are copied, not added, so
/// they are checked this way instead.
pub fn check_element(element: &Element) -> Result<(), AlgebraError> {
    check_start(&element.name, &element.attributes, element.text.as_deref())?;
    check_text(element.tail.as_deref())
}

/// The part of [`check_element`] known once the start tag has been read.
pub(crate) fn check_start(
    name: &str,
    attributes: &Attributes,
    text: Option<&str>,
) -> Result<(), AlgebraError> {
    TAG_STRINGS.check(name)?;
    for value in attributes.values() {
        VALUE_STRINGS.check(value)?;
    }
    check_text(text)
}

pub fn invert_element(element: &Element) -> Result<Element, AlgebraError> {
    Ok(Element {
        name: invert_tag(&element.name)?,
        attributes: invert_attribute_set(&element.attributes)?,
        text: invert_text(element.text.as_deref())?,
        tail: invert_text(element.tail.as_deref())?,
    })
}

pub fn equal_elements(a: &Element, b: &Element, options: EqualityOptions) -> bool {
    tags_equal(&a.name, &b.name)
        && (options.ignore_attributes || attribute_sets_equal(&a.attributes, &b.attributes))
        && text_equal(a.text.as_deref(), b.text.as_deref())
        && text_equal(a.tail.as_deref(), b.tail.as_deref())
}

/// Identity tag, no attributes after cleaning, blank text and tail. Says
/// nothing about children.
pub fn is_unit_element(element: &Element) -> bool {
    is_unit_content(element) && is_blank(element.tail.as_deref())
}

/// The part of [`is_unit_element`] known once the start tag has been read.
pub(crate) fn is_unit_content(element: &Element) -> bool {
    is_unit_start(&element.name, &element.attributes, element.text.as_deref())
}

pub(crate) fn is_unit_start(name: &str, attributes: &Attributes, text: Option<&str>) -> bool {
    is_identity_tag(name)
        && attributes.values().all(|value| is_blank_value(value))
        && is_blank(text)
}

pub fn unit_element() -> Element {
    Element::new(TAG_STRINGS.identity())
}

impl Group for Element {
    fn identity() -> Self {
        unit_element()
    }

    fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        add_elements(self, other)
    }

    fn try_invert(&self) -> Result<Self, AlgebraError> {
        invert_element(self)
    }

    fn is_identity(&self) -> bool {
        is_unit_element(self)
    }
}

impl AbelianGroup for Element {}
