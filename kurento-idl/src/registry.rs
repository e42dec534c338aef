//! Complex type registry.
//!
//! Every complex type of every module is registered before any type
//! descriptor is resolved. Names missing from the registry resolve as remote
//! classes. Only a frozen [`Registry`] can back a
//! [`Resolver`](crate::resolve::Resolver).

use crate::types::{Module, TypeFormat};
use std::collections::HashMap;

/// Mutable registry used during the build phase.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    formats: HashMap<String, TypeFormat>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a complex type name.
    ///
    /// A name registered twice keeps its first format.
    pub fn register(&mut self, name: impl Into<String>, format: TypeFormat) {
        let name = name.into();
        match self.formats.get(&name) {
            Some(existing) if *existing != format => {
                tracing::warn!(
                    "Complex type {} registered as {:?} and {:?}, keeping {:?}",
                    name,
                    existing,
                    format,
                    existing
                );
            }
            Some(_) => {}
            None => {
                self.formats.insert(name, format);
            }
        }
    }

    /// Registers every complex type declared in a module.
    pub fn register_module(&mut self, module: &Module) {
        for complex_type in &module.complex_types {
            self.register(complex_type.name.clone(), complex_type.type_format);
        }
    }

    /// Ends the build phase.
    #[must_use]
    pub fn freeze(self) -> Registry {
        Registry {
            formats: self.formats,
        }
    }
}

/// Read-only set of complex type names with their formats.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    formats: HashMap<String, TypeFormat>,
}

impl Registry {
    /// Builds the registry from every module in one pass.
    #[must_use]
    pub fn build<'a>(modules: impl IntoIterator<Item = &'a Module>) -> Self {
        let mut builder = RegistryBuilder::new();
        for module in modules {
            builder.register_module(module);
        }
        builder.freeze()
    }

    /// Returns true if `name` is a registered complex type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the format of a registered complex type.
    #[must_use]
    pub fn format(&self, name: &str) -> Option<TypeFormat> {
        self.formats.get(name).copied()
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Returns true if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Returns the registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
