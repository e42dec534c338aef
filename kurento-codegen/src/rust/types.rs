//! Rust type mapping.
//!
//! Maps resolved IDL types onto the Rust types used for struct fields,
//! method arguments and method results, and renders default values as
//! `json!` tokens.

use crate::error::CodegenError;
use crate::hierarchy::ClassHierarchy;
use kurento_idl::ResolvedType;
use serde_json::Value;

/// Runtime trait implemented by every generated class.
pub const OBJECT_TRAIT: &str = "IMediaObject";

/// Maps resolved types to Rust types.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    hierarchy: &'a ClassHierarchy<'a>,
}

impl<'a> TypeMapper<'a> {
    /// Creates a new type mapper over the class hierarchy.
    #[must_use]
    pub fn new(hierarchy: &'a ClassHierarchy<'a>) -> Self {
        Self { hierarchy }
    }

    /// Returns the capability trait of a remote class. The root class is
    /// represented by the runtime trait.
    #[must_use]
    pub fn trait_name(&self, class: &str) -> String {
        if self.hierarchy.is_root(class) {
            OBJECT_TRAIT.to_string()
        } else {
            format!("I{class}")
        }
    }

    /// Checks that every remote class referenced by `ty` is declared.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` for an undeclared class.
    pub fn check(&self, ty: &ResolvedType, item: &str) -> Result<(), CodegenError> {
        match ty.element() {
            ResolvedType::RemoteClass(name) if !self.hierarchy.contains(name) => {
                Err(CodegenError::unknown_type(name, item))
            }
            _ => Ok(()),
        }
    }

    /// Returns the type of a struct field.
    #[must_use]
    pub fn field_type(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Struct(name) => format!("Option<{name}>"),
            ResolvedType::RemoteClass(name) => {
                format!("Option<Arc<dyn {}>>", self.trait_name(name))
            }
            other => self.element_type(other),
        }
    }

    /// Returns the type of an argument.
    #[must_use]
    pub fn param_type(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Primitive(kind) => kind.param_type().to_string(),
            ResolvedType::Enum(name) => name.clone(),
            ResolvedType::Struct(name) => format!("Option<&{name}>"),
            ResolvedType::RemoteClass(name) => {
                format!("Option<&dyn {}>", self.trait_name(name))
            }
            ResolvedType::Array(inner) => format!("&[{}]", self.element_type(inner)),
        }
    }

    /// Returns the type of a method result.
    #[must_use]
    pub fn return_type(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Primitive(kind) => kind.rust_type().to_string(),
            ResolvedType::Enum(name)
            | ResolvedType::Struct(name)
            | ResolvedType::RemoteClass(name) => name.clone(),
            ResolvedType::Array(inner) => format!("Vec<{}>", self.return_type(inner)),
        }
    }

    /// Returns the type of an array element: like a field, without the
    /// optional wrapper.
    fn element_type(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Primitive(kind) => kind.rust_type().to_string(),
            ResolvedType::Enum(name) | ResolvedType::Struct(name) => name.clone(),
            ResolvedType::RemoteClass(name) => format!("Arc<dyn {}>", self.trait_name(name)),
            ResolvedType::Array(inner) => format!("Vec<{}>", self.element_type(inner)),
        }
    }
}

/// Renders a JSON value as tokens accepted by `serde_json::json!`.
#[must_use]
pub fn json_tokens(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(json_tokens).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key:?}: {}", json_tokens(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurento_idl::{PrimitiveKind, load_str};
    use serde_json::json;

    fn modules() -> Vec<kurento_idl::Module> {
        vec![
            load_str(
                "core.kmd.json",
                r#"{
                    "remoteClasses": [
                        {"name": "MediaObject"},
                        {"name": "MediaElement", "extends": "MediaObject"}
                    ],
                    "complexTypes": []
                }"#,
            )
            .expect("Failed to parse"),
        ]
    }

    #[test]
    fn test_trait_name() {
        let modules = modules();
        let hierarchy = ClassHierarchy::build(&modules, "MediaObject");
        let mapper = TypeMapper::new(&hierarchy);

        assert_eq!(mapper.trait_name("MediaObject"), "IMediaObject");
        assert_eq!(mapper.trait_name("MediaElement"), "IMediaElement");
    }

    #[test]
    fn test_type_table() {
        let modules = modules();
        let hierarchy = ClassHierarchy::build(&modules, "MediaObject");
        let mapper = TypeMapper::new(&hierarchy);

        let string = ResolvedType::Primitive(PrimitiveKind::String);
        let float = ResolvedType::Primitive(PrimitiveKind::Float);
        let media_type = ResolvedType::Enum("MediaType".into());
        let candidate = ResolvedType::Struct("IceCandidate".into());
        let element = ResolvedType::RemoteClass("MediaElement".into());
        let object = ResolvedType::RemoteClass("MediaObject".into());

        assert_eq!(mapper.field_type(&string), "String");
        assert_eq!(mapper.param_type(&string), "&str");
        assert_eq!(mapper.return_type(&float), "f64");

        assert_eq!(mapper.field_type(&media_type), "MediaType");
        assert_eq!(mapper.param_type(&media_type), "MediaType");

        assert_eq!(mapper.field_type(&candidate), "Option<IceCandidate>");
        assert_eq!(mapper.param_type(&candidate), "Option<&IceCandidate>");
        assert_eq!(mapper.return_type(&candidate), "IceCandidate");

        assert_eq!(mapper.field_type(&element), "Option<Arc<dyn IMediaElement>>");
        assert_eq!(mapper.param_type(&element), "Option<&dyn IMediaElement>");
        assert_eq!(mapper.return_type(&element), "MediaElement");
        assert_eq!(mapper.param_type(&object), "Option<&dyn IMediaObject>");
    }

    #[test]
    fn test_array_types() {
        let modules = modules();
        let hierarchy = ClassHierarchy::build(&modules, "MediaObject");
        let mapper = TypeMapper::new(&hierarchy);

        let candidates = ResolvedType::Array(Box::new(ResolvedType::Struct("IceCandidate".into())));
        assert_eq!(mapper.field_type(&candidates), "Vec<IceCandidate>");
        assert_eq!(mapper.param_type(&candidates), "&[IceCandidate]");
        assert_eq!(mapper.return_type(&candidates), "Vec<IceCandidate>");

        let elements =
            ResolvedType::Array(Box::new(ResolvedType::RemoteClass("MediaElement".into())));
        assert_eq!(mapper.field_type(&elements), "Vec<Arc<dyn IMediaElement>>");
        assert_eq!(mapper.param_type(&elements), "&[Arc<dyn IMediaElement>]");
        assert_eq!(mapper.return_type(&elements), "Vec<MediaElement>");

        let nested = ResolvedType::Array(Box::new(ResolvedType::Array(Box::new(
            ResolvedType::Primitive(PrimitiveKind::String),
        ))));
        assert_eq!(mapper.field_type(&nested), "Vec<Vec<String>>");
        assert_eq!(mapper.param_type(&nested), "&[Vec<String>]");
    }

    #[test]
    fn test_check_unknown_class() {
        let modules = modules();
        let hierarchy = ClassHierarchy::build(&modules, "MediaObject");
        let mapper = TypeMapper::new(&hierarchy);

        assert!(
            mapper
                .check(&ResolvedType::RemoteClass("MediaElement".into()), "x")
                .is_ok()
        );
        let missing = ResolvedType::Array(Box::new(ResolvedType::RemoteClass("Hub".into())));
        match mapper.check(&missing, "Mixer.hubs") {
            Err(CodegenError::UnknownType { type_name, item }) => {
                assert_eq!(type_name, "Hub");
                assert_eq!(item, "Mixer.hubs");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_json_tokens() {
        assert_eq!(json_tokens(&json!(null)), "null");
        assert_eq!(json_tokens(&json!(false)), "false");
        assert_eq!(json_tokens(&json!(0)), "0");
        assert_eq!(json_tokens(&json!(4.5)), "4.5");
        assert_eq!(json_tokens(&json!("")), "\"\"");
        assert_eq!(json_tokens(&json!("a\"b")), "\"a\\\"b\"");
        assert_eq!(json_tokens(&json!(["x", 1])), "[\"x\", 1]");
        assert_eq!(json_tokens(&json!({"k": true})), "{\"k\": true}");
    }
}
