//! Handler registry for mapping qualified names to tag handlers.

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::TagHandler;
use super::qname::QualifiedName;

/// Registry mapping qualified element names to handlers.
///
/// A registry is built once per format (see `create_kml_registry` and
/// friends) and treated as immutable while parsers use it. Cloning is
/// cheap: handlers are shared.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<QualifiedName, Arc<dyn TagHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one (tag, namespace) pair.
    ///
    /// # Panics
    /// Panics if a handler is already registered under that name.
    pub fn register(
        &mut self,
        local_name: &str,
        namespace_uri: &str,
        handler: impl TagHandler + 'static,
    ) {
        self.register_shared(QualifiedName::new(local_name, namespace_uri), Arc::new(handler));
    }

    /// Register one handler under every namespace spelling of a tag.
    ///
    /// # Panics
    /// Panics if any of the resulting names is already registered.
    pub fn register_all(
        &mut self,
        local_name: &str,
        namespaces: &[&str],
        handler: impl TagHandler + 'static,
    ) {
        let handler: Arc<dyn TagHandler> = Arc::new(handler);
        for namespace in namespaces {
            self.register_shared(
                QualifiedName::new(local_name, *namespace),
                Arc::clone(&handler),
            );
        }
    }

    /// Register an already shared handler.
    ///
    /// # Panics
    /// Panics if a handler is already registered under `name`.
    pub fn register_shared(&mut self, name: QualifiedName, handler: Arc<dyn TagHandler>) {
        assert!(
            !self.handlers.contains_key(&name),
            "duplicate tag handler registration for {name}"
        );
        self.handlers.insert(name, handler);
    }

    /// Remove the handler registered under `name`.
    ///
    /// # Panics
    /// Panics if nothing is registered under `name`.
    pub fn unregister(&mut self, name: &QualifiedName) {
        assert!(
            self.handlers.remove(name).is_some(),
            "no tag handler registered for {name}"
        );
    }

    /// Handler for a qualified name, if any.
    #[must_use]
    pub fn lookup(&self, name: &QualifiedName) -> Option<&dyn TagHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    /// Check if a handler is registered for a qualified name.
    #[must_use]
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered names, sorted by namespace then tag.
    #[must_use]
    pub fn registered_names(&self) -> Vec<&QualifiedName> {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort_by(|a, b| {
            (&a.namespace_uri, &a.local_name).cmp(&(&b.namespace_uri, &b.local_name))
        });
        names
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::from_fn;

    const NS_A: &str = "http://earth.google.com/kml/2.1";
    const NS_B: &str = "http://www.opengis.net/kml/2.2";

    #[test]
    fn test_registry_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        registry.register("Placemark", NS_A, from_fn(|_ctx| Ok(None)));

        assert!(registry.lookup(&QualifiedName::new("Placemark", NS_A)).is_some());
        assert!(registry.lookup(&QualifiedName::new("Placemark", NS_B)).is_none());
        assert!(registry.lookup(&QualifiedName::new("Folder", NS_A)).is_none());
    }

    #[test]
    fn test_registry_same_tag_in_two_namespaces() {
        let mut registry = HandlerRegistry::new();
        registry.register("coordinates", NS_A, from_fn(|_ctx| Ok(None)));
        registry.register("coordinates", NS_B, from_fn(|_ctx| Ok(None)));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&QualifiedName::new("coordinates", NS_A)));
        assert!(registry.contains(&QualifiedName::new("coordinates", NS_B)));
    }

    #[test]
    #[should_panic(expected = "duplicate tag handler registration")]
    fn test_registry_duplicate_registration_panics() {
        let mut registry = HandlerRegistry::new();
        registry.register("name", NS_A, from_fn(|_ctx| Ok(None)));
        registry.register("name", NS_A, from_fn(|_ctx| Ok(None)));
    }

    #[test]
    fn test_registry_register_all() {
        let mut registry = HandlerRegistry::new();
        registry.register_all("name", &[NS_A, NS_B], from_fn(|_ctx| Ok(None)));

        let names: Vec<String> = registry
            .registered_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![format!("{{{NS_A}}}name"), format!("{{{NS_B}}}name")]
        );
    }

    #[test]
    fn test_registry_unregister() {
        let mut registry = HandlerRegistry::new();
        registry.register("name", NS_A, from_fn(|_ctx| Ok(None)));
        registry.unregister(&QualifiedName::new("name", NS_A));

        assert!(registry.is_empty());
    }

    #[test]
    #[should_panic(expected = "no tag handler registered")]
    fn test_registry_unregister_missing_panics() {
        HandlerRegistry::new().unregister(&QualifiedName::new("name", NS_A));
    }
}
