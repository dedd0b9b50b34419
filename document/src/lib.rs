//! Rich-text document trees for Gantry long-text fields.
//!
//! Long-text issue fields (description, environment, comment bodies) are not
//! plain strings on the wire: they are a constrained rich-text tree rooted at
//! `{"type": "doc", "version": 1, "content": [...]}`. This crate provides the
//! node model, fluent builders for the common shapes, and plain-text
//! extraction for display and indexing.

mod document;
mod node;

pub use document::Document;
pub use node::CodeBlockAttrs;
pub use node::HeadingAttrs;
pub use node::Mark;
pub use node::Node;
