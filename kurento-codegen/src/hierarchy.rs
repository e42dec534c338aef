//! Remote class hierarchy.
//!
//! Classes of every module are indexed together so a class can extend, and
//! delegate to, a class declared in another module.

use crate::error::CodegenError;
use kurento_idl::{Module, RemoteClass};
use std::collections::{HashMap, HashSet};

/// Index of every remote class across every loaded module.
#[derive(Debug, Clone)]
pub struct ClassHierarchy<'a> {
    classes: HashMap<&'a str, &'a RemoteClass>,
    root: String,
}

impl<'a> ClassHierarchy<'a> {
    /// Indexes the classes of `modules`. `root` names the base object class.
    #[must_use]
    pub fn build(modules: impl IntoIterator<Item = &'a Module>, root: &str) -> Self {
        let mut classes = HashMap::new();
        for module in modules {
            for class in &module.remote_classes {
                if classes.contains_key(class.name.as_str()) {
                    tracing::warn!(
                        "Class {} declared again in {}, keeping the first declaration",
                        class.name,
                        module.source
                    );
                    continue;
                }
                classes.insert(class.name.as_str(), class);
            }
        }

        Self {
            classes,
            root: root.to_string(),
        }
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a RemoteClass> {
        self.classes.get(name).copied()
    }

    /// Returns true if a class with the given name was declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Returns the name of the base object class.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns true if `name` is the base object class.
    #[must_use]
    pub fn is_root(&self, name: &str) -> bool {
        self.root == name
    }

    /// Returns the ancestors of `class`, nearest first.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownParent` if a parent is not declared, or
    /// `CodegenError::InheritanceCycle` if the chain loops.
    pub fn ancestors(&self, class: &RemoteClass) -> Result<Vec<&'a RemoteClass>, CodegenError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([class.name.as_str()]);
        let mut current_name = class.name.clone();
        let mut parent = class.parent().map(str::to_string);

        while let Some(parent_name) = parent {
            let parent_class =
                self.get(&parent_name)
                    .ok_or_else(|| CodegenError::UnknownParent {
                        class: current_name.clone(),
                        parent: parent_name.clone(),
                    })?;
            if !seen.insert(parent_class.name.as_str()) {
                return Err(CodegenError::InheritanceCycle {
                    class: class.name.clone(),
                });
            }
            chain.push(parent_class);
            current_name = parent_class.name.clone();
            parent = parent_class.parent().map(str::to_string);
        }

        Ok(chain)
    }
}
