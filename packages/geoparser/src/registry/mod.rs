//! Tag-dispatch parsing core.
//!
//! Handlers are registered per qualified name (tag plus namespace) in a
//! [`HandlerRegistry`]. A [`GeoParser`] walks a token stream, looks up the
//! handler of every start element and maintains the [`ParseStack`] through
//! which handlers reach the nodes of their ancestors.

mod context;
mod core;
mod engine;
mod handler;
mod leaf;
mod qname;
mod shared;
mod stack;

pub use context::ParseContext;
pub use core::HandlerRegistry;
pub use engine::GeoParser;
pub use handler::{from_fn, FnHandler, TagHandler};
pub use leaf::{apply_to_parent, read_leaf, skip_element, LeafValue};
pub use qname::QualifiedName;
pub use shared::{Registrar, SharedRegistry};
pub use stack::{ParseStack, StackFrame};
