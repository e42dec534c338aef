//! Output units.
//!
//! Every unit is `include!`d into the same Rust module, so each one carries
//! its own import of the runtime prelude. The namespace unit declares that
//! module and includes the others.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// Name of the unit holding every complex type.
pub const COMPLEX_TYPES_UNIT: &str = "complex_types";

/// Name of the unit declaring the namespace module.
pub const NAMESPACE_UNIT: &str = "mod";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Unit name; the file is `<name>.rs`.
    pub name: String,
    /// Generated source code.
    pub content: String,
}

impl OutputUnit {
    /// Returns the file name of the unit.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name)
    }
}

/// Wraps synthesized code into output units.
#[derive(Debug, Clone)]
pub struct Emitter {
    namespace: String,
    runtime: String,
}

impl Emitter {
    /// Creates an emitter for the given namespace and runtime crate path.
    #[must_use]
    pub fn new(namespace: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            runtime: runtime.into(),
        }
    }

    /// Builds a unit from the code synthesized for `sources`.
    #[must_use]
    pub fn emit(&self, name: impl Into<String>, sources: &[&str], body: &str) -> OutputUnit {
        let mut content = String::new();
        content.push_str(&format!(
            "// Code generated by kurento-codegen from {}. DO NOT EDIT.\n",
            sources.join(", ")
        ));
        content.push_str(&format!("// Namespace: {}\n\n", self.namespace));
        content.push_str("#[allow(unused_imports)]\n");
        content.push_str(&format!("use {}::prelude::*;\n\n", self.runtime));
        content.push_str(body);

        OutputUnit {
            name: name.into(),
            content,
        }
    }

    /// Builds the namespace unit: a module named after the namespace that
    /// includes every unit of `units`, in order.
    ///
    /// Include paths are relative, so the namespace unit must be written next
    /// to the units it lists.
    #[must_use]
    pub fn emit_namespace(&self, units: &[OutputUnit]) -> OutputUnit {
        let mut content = String::new();
        content.push_str("// Code generated by kurento-codegen. DO NOT EDIT.\n\n");
        content.push_str(&format!(
            "/// Client bindings of the `{}` namespace.\n",
            self.namespace
        ));
        content.push_str(&format!("pub mod {} {{\n", self.namespace));
        for unit in units {
            content.push_str(&format!("    include!({:?});\n", unit.file_name()));
        }
        content.push_str("}\n");

        OutputUnit {
            name: NAMESPACE_UNIT.to_string(),
            content,
        }
    }
}

/// Writes every unit into `dir`, creating it if needed.
///
/// # Errors
/// Returns `CodegenError::Io` if the directory or a file cannot be written.
pub fn write_units(dir: &Path, units: &[OutputUnit]) -> Result<Vec<PathBuf>, CodegenError> {
    std::fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(units.len());
    for unit in units {
        let path = dir.join(unit.file_name());
        std::fs::write(&path, &unit.content)?;
        tracing::info!("Wrote {}", path.display());
        paths.push(path);
    }

    Ok(paths)
}
