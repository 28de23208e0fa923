// kv-namespace/src/bindings.rs

use shared::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ports::RemoteNamespace;

/// Host registry of named namespace bindings
#[derive(Clone, Default)]
pub struct BindingRegistry {
    bindings: HashMap<String, Arc<dyn RemoteNamespace>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `namespace` under `name`, returning the binding it replaced
    pub fn register(
        &mut self,
        name: impl Into<String>,
        namespace: Arc<dyn RemoteNamespace>,
    ) -> Option<Arc<dyn RemoteNamespace>> {
        self.bindings.insert(name.into(), namespace)
    }

    pub fn with_binding(mut self, name: impl Into<String>, namespace: Arc<dyn RemoteNamespace>) -> Self {
        self.register(name, namespace);
        self
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn RemoteNamespace>> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| Error::BindingNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("bindings", &self.names())
            .finish()
    }
}
