//! Flat-to-tree conversion
//!
//! Rebuilds a forest from a flat list of records linked by identifier and
//! parent identifier, in a single pass and without requiring parents to come
//! before their children.
//!
//! # Core Concepts
//!
//! - **Record**: an input item that knows its id and its parent's id
//! - **Node**: a record plus the ordered children attached to it
//! - **Forest**: the root nodes, in input order
//! - **TreeBuilder**: the streaming builder; children that arrive before
//!   their parent wait in a pending queue until it shows up
//!
//! Records whose parent never appears are left out of the forest. Use
//! [`TreeBuilder::finish_with_report`] to get them back.
//!
//! # Example
//!
//! ```
//! use flat_tree::prelude::*;
//!
//! struct Row {
//!     id: u32,
//!     parent: Option<u32>,
//!     name: &'static str,
//! }
//!
//! impl Record for Row {
//!     type Key = u32;
//!
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//!
//!     fn parent_id(&self) -> Option<u32> {
//!         self.parent
//!     }
//! }
//!
//! let forest = build(vec![
//!     Row { id: 2, parent: Some(1), name: "B" },
//!     Row { id: 1, parent: None, name: "A" },
//! ]);
//!
//! for (node, depth) in walk(&forest, TraversalOrder::PreOrder) {
//!     println!("{:indent$}{}", "", node.record.name, indent = depth * 2);
//! }
//! ```

mod builder;
mod key;
mod node;
mod traversal;

#[cfg(feature = "json")]
pub mod json;

pub use builder::{build, build_with_report, BuildReport, Orphan, Record, TreeBuilder};
pub use key::{
    resolve_keys, KeyConfig, NodeKey, PartialKeyConfig, DEFAULT_CHILDREN_KEY, DEFAULT_ID_KEY,
    DEFAULT_PARENT_ID_KEY,
};
pub use node::{count, Children, Node};
pub use traversal::{find, walk, ForestWalker, TraversalOrder};

#[cfg(feature = "json")]
pub use json::{format, format_value, format_with_report, JsonRecord};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        build, build_with_report, count, walk, BuildReport, KeyConfig, Node, PartialKeyConfig,
        Record, TraversalOrder, TreeBuilder,
    };
}
