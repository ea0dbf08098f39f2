//! Building blocks for leaf handlers.
//!
//! Most tags carry a single value that ends up in a field of the parent's
//! node. [`apply_to_parent`] checks the parent, consumes the element text
//! and hands it over as a [`LeafValue`], whose typed accessors log and
//! return `None` for malformed input.

use chrono::{DateTime, Utc};

use super::context::ParseContext;
use super::stack::StackFrame;
use crate::error::Result;
use crate::model::{GeoNode, NodeId};
use crate::values;

/// Trimmed text of a leaf element plus where it came from.
#[derive(Debug, Clone)]
pub struct LeafValue {
    text: String,
    tag: String,
    line: u64,
}

impl LeafValue {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// The text, or `None` if the element was empty.
    #[must_use]
    pub fn non_empty(self) -> Option<String> {
        (!self.text.is_empty()).then_some(self.text)
    }

    #[must_use]
    pub fn f64(&self) -> Option<f64> {
        let value = values::parse_f64(&self.text);
        if value.is_none() {
            self.warn_invalid("a number");
        }
        value
    }

    #[must_use]
    pub fn i32(&self) -> Option<i32> {
        let value = values::parse_i32(&self.text);
        if value.is_none() {
            self.warn_invalid("an integer");
        }
        value
    }

    #[must_use]
    pub fn bool(&self) -> Option<bool> {
        let value = values::parse_bool(&self.text);
        if value.is_none() {
            self.warn_invalid("a boolean");
        }
        value
    }

    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let value = values::parse_datetime(&self.text);
        if value.is_none() {
            self.warn_invalid("a timestamp");
        }
        value
    }

    /// Log that the value is unusable and will be ignored or defaulted.
    pub fn warn_invalid(&self, expected: &str) {
        tracing::warn!(
            tag = %self.tag,
            value = %self.text,
            line = self.line,
            "Expected {expected}, ignoring value"
        );
    }
}

/// Consume the current element's text.
pub fn read_leaf(ctx: &mut ParseContext<'_>) -> Result<LeafValue> {
    let tag = ctx.qualified_name().local_name.clone();
    let line = ctx.line_number();
    let text = ctx.read_text()?;
    Ok(LeafValue { text, tag, line })
}

/// Apply a leaf element's text to the parent node, if `access` accepts it.
///
/// In any other context the element is skipped without touching the
/// document.
pub fn apply_to_parent<N>(
    ctx: &mut ParseContext<'_>,
    access: fn(&mut GeoNode) -> Option<&mut N>,
    apply: impl FnOnce(&mut N, LeafValue),
) -> Result<Option<NodeId>> {
    let parent = ctx.parent();
    let target = parent
        .node
        .filter(|&id| ctx.document_mut().node_mut(id).and_then(access).is_some());
    let Some(id) = target else {
        return Ok(skip_element(ctx, &parent));
    };

    let value = read_leaf(ctx)?;
    if let Some(node) = ctx.document_mut().node_mut(id).and_then(access) {
        apply(node, value);
    }
    Ok(None)
}

/// Log and skip an element found in an unsupported context.
pub fn skip_element(ctx: &ParseContext<'_>, parent: &StackFrame) -> Option<NodeId> {
    tracing::debug!(
        tag = %ctx.qualified_name(),
        parent = %parent.qualified_name,
        line = ctx.line_number(),
        "Ignoring element in unsupported context"
    );
    None
}
