//! Streaming token sources the dispatch loop reads from.
//!
//! The parser only depends on the [`TokenSource`] capability; the
//! quick-xml backed [`XmlTokenSource`] is the implementation used for real
//! documents.

mod position;
mod reader;
mod token;

pub use reader::XmlTokenSource;
pub use token::{Attribute, TokenSource, TokenType};
