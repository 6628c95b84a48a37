//! Group traits shared by every level of the document algebra.
//!
//! Operations are fallible because operands may carry characters outside
//! their symbol domain; the laws below hold whenever every call succeeds.

use crate::error::AlgebraError;

/// A **group**: an associative operation with identity and inverses.
///
/// Laws (not enforced by the type system), with equality meaning the
/// level's canonical equality:
///
/// - **Associative**: `a + (b + c) == (a + b) + c`
/// - **Identity**: `a + identity() == a`
/// - **Inverse**: `a + a.try_invert() == identity()`
pub trait Group: Sized {
    fn identity() -> Self;

    fn try_add(&self, other: &Self) -> Result<Self, AlgebraError>;

    fn try_invert(&self) -> Result<Self, AlgebraError>;

    fn try_sub(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.try_add(&other.try_invert()?)
    }

    fn is_identity(&self) -> bool;
}

/// A group whose operation is also **commutative**: `a + b == b + a`.
pub trait AbelianGroup: Group {}
