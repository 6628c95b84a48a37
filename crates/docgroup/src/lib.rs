//! A group structure on XML-like documents.
//!
//! Every level of a document is a commutative group: characters of a symbol
//! domain, strings over that domain, attribute sets, elements and whole
//! trees. Adding two documents merges them position by position, every
//! document has an inverse that cancels it back to the unit tree, and the
//! number of non-unit nodes in `t1 - t2` is a metric between documents.
//!
//! ```
//! use docgroup::tree;
//!
//! let a = markup::parse(r#"<a><b id="1"/></a>"#).unwrap();
//! let b = markup::parse(r#"<d><e id="a"/></d>"#).unwrap();
//! let sum = tree::add(a, &b).unwrap();
//! assert_eq!(sum.to_xml(), r#"<e><g id="2"/></e>"#);
//! ```

pub mod attributes;
pub mod element;
pub mod error;
pub mod group;
pub mod position;
pub mod stream;
pub mod string;
pub mod symbol;
pub mod tag;
pub mod text;
pub mod tree;

pub use crate::attributes::AttributeSet;
pub use crate::element::{EqualityOptions, equal_elements, is_unit_element};
pub use crate::error::AlgebraError;
pub use crate::group::{AbelianGroup, Group};
pub use crate::position::{Position, get_node, ordering, position};
pub use crate::tag::Tag;
pub use crate::text::Text;
pub use crate::tree::{add, count_non_unit_nodes, difference, equal, invert, metric};
