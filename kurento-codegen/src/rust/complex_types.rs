//! Complex type code generation.

use crate::docs::push_doc;
use crate::error::CodegenError;
use crate::hierarchy::ClassHierarchy;
use crate::rust::types::TypeMapper;
use kurento_idl::{ComplexType, Module, ResolvedField, Resolver};

/// Generator for enum and struct value types.
pub struct ComplexTypeGenerator<'a> {
    resolver: Resolver<'a>,
    types: TypeMapper<'a>,
}

impl<'a> ComplexTypeGenerator<'a> {
    /// Creates a new complex type generator.
    #[must_use]
    pub fn new(resolver: Resolver<'a>, hierarchy: &'a ClassHierarchy<'a>) -> Self {
        Self {
            resolver,
            types: TypeMapper::new(hierarchy),
        }
    }

    /// Generates every complex type of a module, in declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if a struct field cannot be resolved.
    pub fn generate(&self, module: &Module) -> Result<String, CodegenError> {
        let mut output = String::new();
        for complex_type in &module.complex_types {
            output.push_str(&self.generate_type(complex_type)?);
        }
        Ok(output)
    }

    /// Generates one complex type.
    ///
    /// # Errors
    /// Returns `CodegenError` if a struct field cannot be resolved.
    pub fn generate_type(&self, complex_type: &ComplexType) -> Result<String, CodegenError> {
        tracing::debug!("Generating complex type {}", complex_type.name);
        if complex_type.is_enum() {
            Ok(self.generate_enum(complex_type))
        } else {
            self.generate_struct(complex_type)
        }
    }

    fn generate_enum(&self, complex_type: &ComplexType) -> String {
        let mut output = String::new();
        let name = &complex_type.name;

        push_doc(&mut output, "", &complex_type.doc);
        output.push_str("#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]\n");
        output.push_str(&format!(
            "pub struct {name}(pub ::std::borrow::Cow<'static, str>);\n\n"
        ));

        for value in &complex_type.values {
            let constant = constant_name(name, value);
            if constant.chars().any(char::is_lowercase) {
                output.push_str("#[allow(non_upper_case_globals)]\n");
            }
            output.push_str(&format!(
                "pub const {constant}: {name} = {name}(::std::borrow::Cow::Borrowed({value:?}));\n"
            ));
        }
        if !complex_type.values.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("impl {name} {{\n"));
        output.push_str("    /// Returns the literal sent on the wire.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn as_str(&self) -> &str {\n");
        output.push_str("        &self.0\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl ::std::fmt::Display for {name} {{\n"));
        output.push_str(
            "    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {\n",
        );
        output.push_str("        f.write_str(self.as_str())\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl ParamValue for {name} {{\n"));
        output.push_str("    fn to_value(&self) -> Value {\n");
        output.push_str("        Value::from(self.as_str())\n");
        output.push_str("    }\n\n");
        output.push_str("    fn is_empty_param(&self) -> bool {\n");
        output.push_str("        self.0.is_empty()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    fn generate_struct(&self, complex_type: &ComplexType) -> Result<String, CodegenError> {
        let mut output = String::new();
        let name = &complex_type.name;
        let fields = self.resolve_fields(complex_type)?;

        push_doc(&mut output, "", &complex_type.doc);
        output.push_str("#[derive(Debug, Clone, Default)]\n");
        output.push_str(&format!("pub struct {name} {{\n"));
        for field in &fields {
            push_doc(&mut output, "    ", &field.doc);
            output.push_str(&format!(
                "    pub {}: {},\n",
                field.ident,
                self.types.field_type(&field.ty)
            ));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl ParamValue for {name} {{\n"));
        output.push_str("    fn to_value(&self) -> Value {\n");
        if fields.is_empty() {
            output.push_str("        Value::Object(Params::new())\n");
        } else {
            output.push_str("        let mut fields = Params::new();\n");
            for field in &fields {
                output.push_str(&format!(
                    "        set_if_not_empty(&mut fields, {:?}, &self.{});\n",
                    field.name, field.ident
                ));
            }
            output.push_str("        Value::Object(fields)\n");
        }
        output.push_str("    }\n");
        output.push_str("}\n\n");

        Ok(output)
    }

    fn resolve_fields(
        &self,
        complex_type: &ComplexType,
    ) -> Result<Vec<ResolvedField>, CodegenError> {
        complex_type
            .properties
            .iter()
            .map(|property| {
                let item = format!("{}.{}", complex_type.name, property.name);
                let field = self
                    .resolver
                    .resolve_field(property)
                    .map_err(|e| CodegenError::item(&item, e))?;
                self.types.check(&field.ty, &item)?;
                Ok(field)
            })
            .collect()
    }
}

/// Returns the constant name of an enum literal: the upper-cased type name,
/// an underscore and the literal, with characters that cannot appear in an
/// identifier replaced by underscores.
#[must_use]
pub fn constant_name(type_name: &str, value: &str) -> String {
    let literal: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{literal}", type_name.to_uppercase())
}
