//! Parse stack of currently open elements.

use super::qname::QualifiedName;
use crate::model::NodeId;

/// One open element: its name and the node its handler returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrame {
    pub qualified_name: QualifiedName,
    pub node: Option<NodeId>,
}

impl StackFrame {
    #[must_use]
    pub fn new(qualified_name: QualifiedName, node: Option<NodeId>) -> Self {
        Self {
            qualified_name,
            node,
        }
    }

    /// The sentinel frame returned for ancestors beyond the stack bottom.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if the frame carries a node and its element is named `tag`.
    ///
    /// Only the local name is compared, so the check holds for every
    /// namespace spelling of the tag.
    #[must_use]
    pub fn represents(&self, tag: &str) -> bool {
        self.node.is_some() && self.qualified_name.local_name == tag
    }
}

/// Explicit ancestor chain maintained by the dispatch loop.
#[derive(Debug, Clone, Default)]
pub struct ParseStack {
    frames: Vec<StackFrame>,
}

impl ParseStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost open frame.
    #[must_use]
    pub fn top(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    /// Frame `depth` levels below the top (0 is the top).
    ///
    /// Returns the sentinel frame when `depth` reaches past the bottom.
    #[must_use]
    pub fn parent(&self, depth: usize) -> StackFrame {
        self.frames
            .len()
            .checked_sub(depth)
            .and_then(|above| above.checked_sub(1))
            .and_then(|index| self.frames.get(index))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoDocument, GeoNode, Placemark};

    fn placemark_node() -> NodeId {
        GeoDocument::new_data_document().add(GeoNode::Placemark(Placemark::default()))
    }

    #[test]
    fn test_parent_counts_from_top() {
        let mut stack = ParseStack::new();
        stack.push(StackFrame::new(QualifiedName::new("kml", "ns"), None));
        stack.push(StackFrame::new(QualifiedName::new("Placemark", "ns"), None));

        assert_eq!(stack.parent(0).qualified_name.local_name, "Placemark");
        assert_eq!(stack.parent(1).qualified_name.local_name, "kml");
    }

    #[test]
    fn test_parent_out_of_range_is_sentinel() {
        let mut stack = ParseStack::new();
        assert_eq!(stack.parent(0), StackFrame::empty());

        stack.push(StackFrame::new(QualifiedName::new("kml", "ns"), None));
        for depth in [1, 2, 10, usize::MAX] {
            assert_eq!(stack.parent(depth), StackFrame::empty());
        }
    }

    #[test]
    fn test_represents_needs_a_node() {
        let name = QualifiedName::new("Placemark", "http://www.opengis.net/kml/2.2");
        let without = StackFrame::new(name.clone(), None);
        let with = StackFrame::new(name, Some(placemark_node()));

        assert!(!without.represents("Placemark"));
        assert!(with.represents("Placemark"));
        assert!(!with.represents("Folder"));
        assert!(!StackFrame::empty().represents(""));
    }
}
