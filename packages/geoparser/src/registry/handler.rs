//! Tag handler trait definition.

use super::context::ParseContext;
use crate::error::Result;
use crate::model::NodeId;

/// Trait for tag handlers.
///
/// A handler is invoked with the source positioned at the start element it
/// was registered for. It may read attributes and text, look at ancestor
/// frames and create or mutate nodes in the document. The returned node is
/// pushed on the parse stack so nested elements can attach to it; `None`
/// means the element produced nothing addressable.
///
/// Handlers hold no per-parse state, so one registry can serve many
/// parsers.
pub trait TagHandler: Send + Sync {
    /// Handle the current start element.
    ///
    /// # Errors
    /// Only token source failures are returned; contextually invalid
    /// elements are skipped by returning `Ok(None)`.
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>>;
}

/// Handler backed by a closure, see [`from_fn`].
pub struct FnHandler<F>(F);

impl<F> TagHandler for FnHandler<F>
where
    F: Fn(&mut ParseContext<'_>) -> Result<Option<NodeId>> + Send + Sync,
{
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        (self.0)(ctx)
    }
}

/// Adapt a closure into a [`TagHandler`].
///
/// # Examples
/// ```
/// use marble_geoparser::registry::{from_fn, HandlerRegistry};
///
/// let mut registry = HandlerRegistry::new();
/// registry.register("extrude", "", from_fn(|_ctx| Ok(None)));
/// assert!(registry.contains(&marble_geoparser::registry::QualifiedName::new("extrude", "")));
/// ```
pub fn from_fn<F>(handler: F) -> FnHandler<F>
where
    F: Fn(&mut ParseContext<'_>) -> Result<Option<NodeId>> + Send + Sync,
{
    FnHandler(handler)
}
