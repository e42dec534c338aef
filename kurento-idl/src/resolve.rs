//! Type descriptor resolution.
//!
//! This module maps the loosely-typed descriptors found in IDL files
//! (`"String"`, `"float"`, `"MediaType"`, `"MediaElement[]"`, ...) onto the
//! closed set of [`ResolvedType`]s the code generators work with.

use crate::error::ResolveError;
use crate::registry::Registry;
use crate::types::{Property, TypeFormat};
use serde_json::Value;

/// Canonical primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
    /// Floating point; integer-flavoured schema types map here too.
    Float,
}

impl PrimitiveKind {
    /// Parses a primitive kind from any of its schema synonyms.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "String" | "string" => Some(Self::String),
            "boolean" | "bool" => Some(Self::Boolean),
            "float" | "float64" | "double" | "int" | "int64" => Some(Self::Float),
            _ => None,
        }
    }

    /// Returns the owned Rust type for this kind.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "bool",
            Self::Float => "f64",
        }
    }

    /// Returns the Rust type used when this kind is passed as an argument.
    #[must_use]
    pub const fn param_type(&self) -> &'static str {
        match self {
            Self::String => "&str",
            Self::Boolean => "bool",
            Self::Float => "f64",
        }
    }

    /// Returns the canonical default literal, as JSON text.
    #[must_use]
    pub const fn default_literal(&self) -> &'static str {
        match self {
            Self::String => "\"\"",
            Self::Boolean => "false",
            Self::Float => "0",
        }
    }

    /// Returns the canonical default value.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Boolean => Value::Bool(false),
            Self::Float => Value::from(0),
        }
    }
}

/// A resolved type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    /// Primitive value.
    Primitive(PrimitiveKind),
    /// Array of the element type.
    Array(Box<ResolvedType>),
    /// Registered enum complex type, passed by value.
    Enum(String),
    /// Registered struct complex type, passed by reference.
    Struct(String),
    /// Server-side object, held through its handle.
    RemoteClass(String),
}

impl ResolvedType {
    /// Returns true if this is a primitive.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns the primitive kind, if any.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the innermost element type of nested arrays.
    #[must_use]
    pub fn element(&self) -> &ResolvedType {
        match self {
            Self::Array(inner) => inner.element(),
            other => other,
        }
    }
}

/// A property or parameter with its type resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Name as sent on the wire.
    pub name: String,
    /// Rust identifier.
    pub ident: String,
    /// Resolved type.
    pub ty: ResolvedType,
    /// Default literal: the schema's own default, or the canonical one for
    /// primitives that declare none.
    pub default: Option<Value>,
    /// Documentation.
    pub doc: String,
}

/// Resolves type descriptors against a frozen registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a Registry,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Returns the backing registry.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Resolves a type descriptor.
    ///
    /// # Errors
    /// Returns `ResolveError` for an empty descriptor, a dangling array
    /// marker, or a name that is not a valid identifier.
    pub fn resolve(&self, descriptor: &str) -> Result<ResolvedType, ResolveError> {
        let trimmed = descriptor.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::Empty);
        }

        if let Some(element) = trimmed.strip_suffix("[]") {
            if element.trim().is_empty() {
                return Err(ResolveError::dangling_array(descriptor));
            }
            return Ok(ResolvedType::Array(Box::new(self.resolve(element)?)));
        }

        if let Some(kind) = PrimitiveKind::from_schema_name(trimmed) {
            return Ok(ResolvedType::Primitive(kind));
        }

        if !is_identifier(trimmed) {
            return Err(ResolveError::invalid_name(descriptor));
        }

        Ok(match self.registry.format(trimmed) {
            Some(TypeFormat::Enum) => ResolvedType::Enum(trimmed.to_string()),
            Some(TypeFormat::Struct) => ResolvedType::Struct(trimmed.to_string()),
            None => ResolvedType::RemoteClass(trimmed.to_string()),
        })
    }

    /// Resolves a descriptor together with its default literal.
    ///
    /// An explicit schema default always wins; otherwise primitives receive
    /// their canonical default and every other kind receives none.
    ///
    /// # Errors
    /// Returns `ResolveError` if the descriptor cannot be resolved.
    pub fn resolve_with_default(
        &self,
        descriptor: &str,
        explicit: Option<&Value>,
    ) -> Result<(ResolvedType, Option<Value>), ResolveError> {
        let ty = self.resolve(descriptor)?;
        let default = match (explicit, ty.primitive()) {
            (Some(value), _) => Some(value.clone()),
            (None, Some(kind)) => Some(kind.default_value()),
            (None, None) => None,
        };
        Ok((ty, default))
    }

    /// Resolves a property or parameter.
    ///
    /// # Errors
    /// Returns `ResolveError` if its type descriptor cannot be resolved.
    pub fn resolve_field(&self, property: &Property) -> Result<ResolvedField, ResolveError> {
        let (ty, default) =
            self.resolve_with_default(&property.type_name, property.explicit_default())?;
        Ok(ResolvedField {
            name: property.name.clone(),
            ident: rust_ident(&property.name),
            ty,
            default,
            doc: property.doc.clone(),
        })
    }
}

/// Returns true if `s` is a plain ASCII identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Converts a string to snake_case.
///
/// Acronyms stay together: `getSDPOffer` becomes `get_sdp_offer`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | '.' | ' ') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a schema name into a snake_case Rust identifier, escaping
/// keywords.
#[must_use]
pub fn rust_ident(name: &str) -> String {
    let ident = to_snake_case(name);
    match ident.as_str() {
        "self" | "super" | "crate" | "Self" => format!("{ident}_"),
        _ if is_keyword(&ident) => format!("r#{ident}"),
        _ => ident,
    }
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "gen"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}
