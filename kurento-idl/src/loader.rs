//! Kurento IDL loader.
//!
//! This module reads `kmd.json` files into [`Module`]s and discovers the
//! elements descriptions that accompany the core one.

use crate::error::ParseError;
use crate::resolve::to_snake_case;
use crate::types::Module;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name prefix of elements descriptions.
pub const ELEMENTS_PREFIX: &str = "elements.";

/// File name suffix of every IDL description.
pub const KMD_SUFFIX: &str = ".kmd.json";

/// Top-level containers every IDL source must carry, with accepted spellings.
const CONTAINERS: [(&str, &str); 2] = [
    ("remoteClasses", "RemoteClasses"),
    ("complexTypes", "ComplexTypes"),
];

/// Parses an IDL source from a string.
///
/// # Arguments
/// * `source` - Name of the source, used in diagnostics
/// * `json` - IDL content
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a top-level container is
/// missing.
pub fn load_str(source: &str, json: &str) -> Result<Module, ParseError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ParseError::json(source, e))?;

    for (key, alias) in CONTAINERS {
        let present = value
            .get(key)
            .or_else(|| value.get(alias))
            .is_some_and(Value::is_array);
        if !present {
            return Err(ParseError::missing_container(source, key));
        }
    }

    let mut module: Module =
        serde_json::from_value(value).map_err(|e| ParseError::json(source, e))?;
    module.source = source.to_string();
    module.name = output_name(source, ELEMENTS_PREFIX, KMD_SUFFIX);
    Ok(module)
}

/// Loads an IDL file, deriving its output name with the default tokens.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn load(path: &Path) -> Result<Module, ParseError> {
    let name = output_name(&file_name(path), ELEMENTS_PREFIX, KMD_SUFFIX);
    load_named(path, name)
}

/// Loads an IDL file under an explicit output name.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn load_named(path: &Path, name: impl Into<String>) -> Result<Module, ParseError> {
    let json = std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
    let mut module = load_str(&file_name(path), &json)?;
    module.name = name.into();
    tracing::debug!(
        "Loaded {} ({} classes, {} complex types)",
        module.source,
        module.remote_classes.len(),
        module.complex_types.len()
    );
    Ok(module)
}

/// Lists the files in `dir` whose names start with `prefix` and end with
/// `suffix`, sorted by file name.
///
/// # Errors
/// Returns `ParseError` if the directory cannot be read.
pub fn discover(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>, ParseError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ParseError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ParseError::io(dir, e))?;
        let path = entry.path();
        let name = file_name(&path);
        if path.is_file()
            && name.len() > prefix.len() + suffix.len()
            && name.starts_with(prefix)
            && name.ends_with(suffix)
        {
            paths.push(path);
        }
    }

    paths.sort_by_key(|p| file_name(p));
    Ok(paths)
}

/// Derives an output name by stripping `prefix` and `suffix` from a file name
/// and converting the rest to snake_case.
#[must_use]
pub fn output_name(file_name: &str, prefix: &str, suffix: &str) -> String {
    let stem = file_name.strip_prefix(prefix).unwrap_or(file_name);
    let stem = stem.strip_suffix(suffix).unwrap_or(stem);
    to_snake_case(stem)
}

/// Returns the final component of `path`, or an empty string if it has none.
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
