//! Parser registry.
//!
//! Maps a module's `implementation_id` to a statically known [`Parser`]
//! implementation. There is no runtime string-to-code loading: the
//! embedding application constructs the registry at startup, registers
//! every parser it ships, and then shares the registry behind an `Arc` —
//! a single writer at startup, many readers for the rest of the process.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::parser::Parser;

/// Startup-populated mapping from implementation id to parser.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn Parser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser under an implementation id.
    ///
    /// Re-registering under an existing id overwrites the previous binding:
    /// last write wins. There is no removal operation.
    pub fn register(&mut self, implementation_id: impl Into<String>, parser: Arc<dyn Parser>) {
        let implementation_id = implementation_id.into();
        if self
            .parsers
            .insert(implementation_id.clone(), parser)
            .is_some()
        {
            tracing::debug!(
                implementation_id = %implementation_id,
                "replaced existing parser binding"
            );
        }
    }

    /// Look up a parser by implementation id.
    pub fn get(&self, implementation_id: &str) -> Option<Arc<dyn Parser>> {
        self.parsers.get(implementation_id).cloned()
    }

    /// Look up a parser, treating a miss as an error.
    pub fn resolve(
        &self,
        implementation_id: &str,
    ) -> std::result::Result<Arc<dyn Parser>, RegistryError> {
        self.get(implementation_id)
            .ok_or_else(|| RegistryError::UnknownImplementation(implementation_id.to_string()))
    }

    /// All registered implementation ids.
    pub fn implementation_ids(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(|k| k.as_str())
    }

    /// Number of registered parsers.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether no parser has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
