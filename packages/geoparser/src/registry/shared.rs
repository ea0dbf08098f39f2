//! Runtime-extensible registry with guard-owned registrations.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use super::core::HandlerRegistry;
use super::handler::TagHandler;
use super::qname::QualifiedName;

/// A registry that can gain and lose handlers while parsers are running.
///
/// Parsers never see a registry change under them: they work on a
/// [`snapshot`](Self::snapshot), and every registration swaps in a new
/// snapshot (copy on write) for parsers created afterwards.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Arc<HandlerRegistry>>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a populated registry.
    #[must_use]
    pub fn from_registry(registry: HandlerRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// The current set of handlers.
    #[must_use]
    pub fn snapshot(&self) -> Arc<HandlerRegistry> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Register a handler for as long as the returned guard lives.
    ///
    /// # Panics
    /// Panics if a handler is already registered under that name.
    #[must_use = "dropping the registrar unregisters the handler"]
    pub fn register(
        &self,
        local_name: &str,
        namespace_uri: &str,
        handler: impl TagHandler + 'static,
    ) -> Registrar {
        let name = QualifiedName::new(local_name, namespace_uri);
        {
            let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            Arc::make_mut(&mut *guard).register_shared(name.clone(), Arc::new(handler));
        }
        tracing::debug!(name = %name, "Registered tag handler");
        Registrar {
            registry: Arc::downgrade(&self.inner),
            name,
        }
    }
}

/// Owns exactly one registration of a [`SharedRegistry`] and removes it on drop.
#[derive(Debug)]
pub struct Registrar {
    registry: Weak<RwLock<Arc<HandlerRegistry>>>,
    name: QualifiedName,
}

impl Registrar {
    #[must_use]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }
}

impl Drop for Registrar {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut guard = inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.contains(&self.name) {
            Arc::make_mut(&mut *guard).unregister(&self.name);
            tracing::debug!(name = %self.name, "Unregistered tag handler");
        }
    }
}
