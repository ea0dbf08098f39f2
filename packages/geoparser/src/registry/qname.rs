//! Qualified element names.

use std::fmt;

/// A (local name, namespace URI) pair identifying an element.
///
/// The same local name under two namespaces is two different names; this is
/// what lets one tag such as `coordinates` be registered once per KML
/// namespace revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub local_name: String,
    pub namespace_uri: String,
}

impl QualifiedName {
    /// Create a new qualified name.
    #[must_use]
    pub fn new(local_name: impl Into<String>, namespace_uri: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace_uri: namespace_uri.into(),
        }
    }

    /// True for the empty name of a sentinel stack frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.local_name.is_empty() && self.namespace_uri.is_empty()
    }
}

/// Clark notation: `{namespace}local`, or just `local` without namespace.
impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            f.write_str(&self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_name)
        }
    }
}
