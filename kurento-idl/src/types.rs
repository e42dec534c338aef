//! IDL model definitions.
//!
//! This module contains the data structures deserialized from Kurento
//! `kmd.json` interface descriptions: remote classes with their properties,
//! constructors and methods, and the complex (value) types shared by them.

use serde::Deserialize;
use serde_json::Value;

/// One IDL source: the core description or one elements description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Output name derived from the source file name.
    #[serde(skip)]
    pub name: String,
    /// Source file name, kept for diagnostics and generated headers.
    #[serde(skip)]
    pub source: String,
    /// Remote classes in declaration order.
    #[serde(alias = "RemoteClasses")]
    pub remote_classes: Vec<RemoteClass>,
    /// Complex types in declaration order.
    #[serde(alias = "ComplexTypes")]
    pub complex_types: Vec<ComplexType>,
}

impl Module {
    /// Looks up a remote class declared in this module.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&RemoteClass> {
        self.remote_classes.iter().find(|c| c.name == name)
    }

    /// Looks up a complex type declared in this module.
    #[must_use]
    pub fn get_complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|c| c.name == name)
    }
}

/// A class whose instances live on the media server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteClass {
    /// Class name.
    pub name: String,
    /// Parent class name.
    #[serde(default)]
    pub extends: Option<String>,
    /// Documentation.
    #[serde(default)]
    pub doc: String,
    /// Whether the class can only be instantiated through a subclass.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Names of the events the class emits.
    #[serde(default)]
    pub events: Vec<String>,
    /// Constructor description.
    #[serde(default)]
    pub constructor: Constructor,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl RemoteClass {
    /// Returns the parent class name, treating an empty name as absent.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.extends.as_deref().filter(|p| !p.is_empty())
    }
}

/// A property, constructor parameter or method parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name as sent on the wire.
    pub name: String,
    /// Raw type descriptor, optionally suffixed with `[]`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Documentation.
    #[serde(default)]
    pub doc: String,
    /// Default value declared by the schema.
    #[serde(default)]
    pub default_value: Option<Value>,
}

/// Parameters share the property layout.
pub type Param = Property;

impl Property {
    /// Returns the schema default, treating `null` and `""` as absent.
    #[must_use]
    pub fn explicit_default(&self) -> Option<&Value> {
        match &self.default_value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        }
    }
}

/// Constructor description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    /// Documentation.
    #[serde(default)]
    pub doc: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<Param>,
}

/// Remote method description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Operation name as sent on the wire.
    pub name: String,
    /// Documentation.
    #[serde(default)]
    pub doc: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<Param>,
    /// Return description, if the method returns a value.
    #[serde(default, rename = "return")]
    pub returns: Option<Return>,
}

impl Method {
    /// Returns the return description when it names a type.
    #[must_use]
    pub fn return_type(&self) -> Option<&Return> {
        self.returns.as_ref().filter(|r| !r.type_name.is_empty())
    }
}

/// Method return description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Return {
    /// Raw type descriptor.
    #[serde(default, rename = "type")]
    pub type_name: String,
    /// Documentation.
    #[serde(default)]
    pub doc: String,
}

/// Format of a complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum TypeFormat {
    /// Closed set of string literals.
    Enum,
    /// Aggregate of named properties.
    #[default]
    Struct,
}

impl From<String> for TypeFormat {
    fn from(value: String) -> Self {
        if value == "ENUM" {
            Self::Enum
        } else {
            Self::Struct
        }
    }
}

/// A value type fully representable on the client side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexType {
    /// Type name.
    pub name: String,
    /// Enum or struct.
    #[serde(default)]
    pub type_format: TypeFormat,
    /// Documentation.
    #[serde(default)]
    pub doc: String,
    /// Allowed literals (enums only).
    #[serde(default)]
    pub values: Vec<String>,
    /// Properties in declaration order (structs only).
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl ComplexType {
    /// Returns true if this is an enum type.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.type_format == TypeFormat::Enum
    }
}
