//! Attribute-set algebra.
//!
//! An attribute set is a sparse map: a key whose value is empty or consists
//! only of identity symbols is the same as an absent key, and results never
//! contain such keys. Values use the attribute-value domain with tag-style
//! (right-aligned) padding and cleaning.

use crate::error::AlgebraError;
use crate::group::{AbelianGroup, Group};
use crate::string::VALUE_STRINGS;
use markup::Attributes;

pub fn is_blank_value(value: &str) -> bool {
    VALUE_STRINGS.is_identity(value)
}

/// Drop keys whose value is blank, keeping the order of the rest.
pub fn clean_attribute_set(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .filter(|(_, value)| !is_blank_value(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Union of the keys; shared keys have their values summed. Keys of `a` come
/// first, in order, followed by keys only `b` has. Values from one side are
/// copied but must still lie in the value domain.
pub fn add_attribute_sets(a: &Attributes, b: &Attributes) -> Result<Attributes, AlgebraError> {
    let mut sum = Attributes::with_capacity(a.len() + b.len());
    for (key, value) in a {
        if is_blank_value(value) {
            continue;
        }
        let value = match b.get(key) {
            Some(other) if !is_blank_value(other) => VALUE_STRINGS.add(value, other)?,
            _ => {
                VALUE_STRINGS.check(value)?;
                value.clone()
            }
        };
        sum.insert(key.clone(), value);
    }
    for (key, value) in b {
        if !is_blank_value(value) && !sum.contains_key(key) {
            VALUE_STRINGS.check(value)?;
            sum.insert(key.clone(), value.clone());
        }
    }
    sum.retain(|_, value| !is_blank_value(value));
    Ok(sum)
}

pub fn invert_attribute_set(attributes: &Attributes) -> Result<Attributes, AlgebraError> {
    attributes
        .iter()
        .filter(|(_, value)| !is_blank_value(value))
        .map(|(key, value)| Ok((key.clone(), VALUE_STRINGS.invert(value)?)))
        .collect()
}

/// Equality after cleaning, with values compared in canonical form.
pub fn attribute_sets_equal(a: &Attributes, b: &Attributes) -> bool {
    let a = clean_attribute_set(a);
    let b = clean_attribute_set(b);
    a.len() == b.len()
        && a.iter().all(|(key, value)| {
            b.get(key)
                .is_some_and(|other| VALUE_STRINGS.eq(value, other))
        })
}

/// An attribute set as a group element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet(pub Attributes);

impl Group for AttributeSet {
    fn identity() -> Self {
        AttributeSet(Attributes::new())
    }

    fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        add_attribute_sets(&self.0, &other.0).map(AttributeSet)
    }

    fn try_invert(&self) -> Result<Self, AlgebraError> {
        invert_attribute_set(&self.0).map(AttributeSet)
    }

    fn is_identity(&self) -> bool {
        self.0.values().all(|value| is_blank_value(value))
    }
}

impl AbelianGroup for AttributeSet {}
