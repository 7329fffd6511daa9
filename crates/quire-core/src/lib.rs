//! Quire Core Types
//!
//! This crate provides the foundational types shared by every stage of the
//! Quire markup compiler:
//!
//! - **Nodes**: Immutable, structurally shared syntax tree nodes ([`Node`])
//! - **Kinds**: The closed node-kind taxonomy and traversal behavior ([`kind`] module)
//! - **Paths**: Persistent cursors for rewriting trees ([`TreePath`])
//! - **Identifiers**: Hierarchical fragment identifiers ([`identifier`] module)
//! - **Tags**: Interned tag names and tag sets ([`tag`] module)
//! - **Traversal**: Rewriting ([`fold`]) and backend walking ([`walk`])

pub mod fold;
pub mod identifier;
pub mod kind;
pub mod location;
pub mod node;
pub mod path;
pub mod tag;
pub mod walk;

pub use kind::{NodeKind, Traversal};
pub use location::Location;
pub use node::Node;
pub use path::{PathError, TreePath};
