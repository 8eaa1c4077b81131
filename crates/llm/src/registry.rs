//! Named provider registry the host resolves model-access handles from.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::provider::LlmProvider;

/// Registry of model-access handles keyed by configured name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registers a provider under the given name. Re-registration replaces
    /// the previous handle.
    pub fn register(&mut self, name: &str, provider: Arc<dyn LlmProvider>) {
        debug!("Registering LLM provider: {name}");
        self.providers.insert(name.to_string(), provider);
    }

    /// Resolves a handle by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(name).cloned()
    }

    /// Returns the names of all registered providers, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}
