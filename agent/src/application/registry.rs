//! Gatherer registry: built once, read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use crate::application::ports::Gatherer;
use crate::domain::error::RegistryError;

/// Name → gatherer lookup table.
///
/// There is no mutation after [`GathererRegistryBuilder::build`]; callers
/// share it by reference or behind an `Arc`.
pub struct GathererRegistry {
    gatherers: BTreeMap<String, Box<dyn Gatherer>>,
}

impl GathererRegistry {
    #[must_use]
    pub fn builder() -> GathererRegistryBuilder {
        GathererRegistryBuilder::default()
    }

    /// Look up a gatherer by its exact name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn Gatherer> {
        self.gatherers
            .get(name)
            .map(|g| -> &dyn Gatherer { g.as_ref() })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gatherers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gatherers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gatherers.is_empty()
    }
}

impl fmt::Debug for GathererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Collects gatherers before the registry is frozen.
#[derive(Default)]
pub struct GathererRegistryBuilder {
    gatherers: BTreeMap<String, Box<dyn Gatherer>>,
}

impl GathererRegistryBuilder {
    /// Add a gatherer under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the name is already taken.
    pub fn register(mut self, gatherer: Box<dyn Gatherer>) -> Result<Self, RegistryError> {
        let name = gatherer.name().to_string();
        if self.gatherers.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.gatherers.insert(name, gatherer);
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> GathererRegistry {
        GathererRegistry {
            gatherers: self.gatherers,
        }
    }
}
