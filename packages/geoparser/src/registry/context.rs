//! Context handed to a tag handler.

use super::qname::QualifiedName;
use super::stack::{ParseStack, StackFrame};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::model::{GeoDocument, GeoNode, NodeId, NodeVariant};
use crate::xml::{TokenSource, TokenType};

/// Everything a handler may touch while handling one start element.
///
/// The stack is read-only: handlers see their ancestors but the dispatch
/// loop alone pushes and pops frames.
pub struct ParseContext<'a> {
    source: &'a mut dyn TokenSource,
    stack: &'a ParseStack,
    document: &'a mut GeoDocument,
    options: &'a ParseOptions,
    name: &'a QualifiedName,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(
        source: &'a mut dyn TokenSource,
        stack: &'a ParseStack,
        document: &'a mut GeoDocument,
        options: &'a ParseOptions,
        name: &'a QualifiedName,
    ) -> Self {
        debug_assert_eq!(source.token_type(), TokenType::StartElement);
        Self {
            source,
            stack,
            document,
            options,
            name,
        }
    }

    /// Name of the element being handled.
    #[must_use]
    pub fn qualified_name(&self) -> &QualifiedName {
        self.name
    }

    /// True if the element being handled is named `tag`.
    #[must_use]
    pub fn is_valid_element(&self, tag: &str) -> bool {
        self.name.local_name == tag
    }

    /// Attribute value of the current element, empty if absent.
    #[must_use]
    pub fn attribute(&self, name: &str) -> String {
        self.source.attribute(name).unwrap_or_default().to_string()
    }

    /// Attribute value of the current element, `None` if absent or blank.
    #[must_use]
    pub fn attribute_opt(&self, name: &str) -> Option<String> {
        self.source
            .attribute(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Consume the element's text content, trimmed.
    ///
    /// Afterwards the element counts as fully handled and no frame is
    /// pushed for it.
    pub fn read_text(&mut self) -> Result<String> {
        Ok(self.source.read_element_text()?.trim().to_string())
    }

    /// Frame of the immediate parent element.
    #[must_use]
    pub fn parent(&self) -> StackFrame {
        self.stack.parent(0)
    }

    /// Frame `depth` levels above the parent; the sentinel frame if there
    /// is no such ancestor.
    #[must_use]
    pub fn parent_at(&self, depth: usize) -> StackFrame {
        self.stack.parent(depth)
    }

    /// Number of open ancestors.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn document(&self) -> &GeoDocument {
        self.document
    }

    pub fn document_mut(&mut self) -> &mut GeoDocument {
        self.document
    }

    /// Add a node to the document without attaching it anywhere.
    pub fn add_node(&mut self, node: GeoNode) -> NodeId {
        self.document.add(node)
    }

    /// True if `frame` carries a node of type `T`.
    #[must_use]
    pub fn node_is<T: NodeVariant>(&self, frame: &StackFrame) -> bool {
        frame.node.is_some_and(|id| self.document.is::<T>(id))
    }

    #[must_use]
    pub fn node<T: NodeVariant>(&self, frame: &StackFrame) -> Option<&T> {
        frame.node.and_then(|id| self.document.get::<T>(id))
    }

    /// Mutable node of `frame`, if it is a `T`.
    pub fn node_mut<T: NodeVariant>(&mut self, frame: &StackFrame) -> Option<&mut T> {
        frame.node.and_then(|id| self.document.get_mut::<T>(id))
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    /// Line of the current token, for diagnostics.
    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.source.line_number()
    }
}
