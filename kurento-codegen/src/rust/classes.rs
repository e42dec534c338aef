//! Remote class code generation.

use crate::docs::push_doc;
use crate::error::CodegenError;
use crate::hierarchy::ClassHierarchy;
use crate::rust::types::{TypeMapper, json_tokens};
use kurento_idl::{
    Method, Module, Property, RemoteClass, ResolvedField, ResolvedType, Resolver, rust_ident,
};

/// Embedded base of classes that extend nothing.
const OBJECT_BASE: &str = "ObjectBase";

/// A method with its signature resolved.
#[derive(Debug, Clone)]
struct ResolvedMethod {
    name: String,
    ident: String,
    doc: String,
    params: Vec<ResolvedField>,
    returns: Option<ResolvedType>,
    return_doc: String,
}

/// Generator for remote class interfaces, structs and call stubs.
pub struct ClassGenerator<'a> {
    resolver: Resolver<'a>,
    hierarchy: &'a ClassHierarchy<'a>,
    types: TypeMapper<'a>,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(resolver: Resolver<'a>, hierarchy: &'a ClassHierarchy<'a>) -> Self {
        Self {
            resolver,
            hierarchy,
            types: TypeMapper::new(hierarchy),
        }
    }

    /// Generates every remote class of a module, in declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if a type cannot be resolved or the class
    /// hierarchy is invalid.
    pub fn generate(&self, module: &Module) -> Result<String, CodegenError> {
        let mut output = String::new();
        for class in &module.remote_classes {
            output.push_str(&self.generate_class(class)?);
        }
        Ok(output)
    }

    /// Generates one remote class.
    ///
    /// # Errors
    /// Returns `CodegenError` if a type cannot be resolved or the class
    /// hierarchy is invalid.
    pub fn generate_class(&self, class: &RemoteClass) -> Result<String, CodegenError> {
        tracing::debug!("Generating class {}", class.name);

        let is_root = self.hierarchy.is_root(&class.name);
        let ancestors = self.hierarchy.ancestors(class)?;
        let properties = self.resolve_fields(&class.name, &class.properties)?;
        let constructor_params = self.resolve_fields(
            &format!("{}.constructor", class.name),
            &class.constructor.params,
        )?;
        let methods = self.resolve_methods(class)?;

        let mut output = String::new();
        if !is_root {
            output.push_str(&self.generate_trait(class, &methods));
        }
        output.push_str(&self.generate_struct(class, &properties));
        output.push_str(&self.generate_object_impl(class, &constructor_params));

        if is_root {
            output.push_str(&self.generate_inherent_impl(class, &methods));
        } else {
            output.push_str(&self.generate_trait_impl(class, &methods));
            output.push_str(&self.generate_inherent_impl(class, &[]));
        }

        for ancestor in &ancestors {
            if self.hierarchy.is_root(&ancestor.name) {
                continue;
            }
            let ancestor_methods = self.resolve_methods(ancestor)?;
            output.push_str(&self.generate_delegation(class, ancestor, &ancestor_methods));
        }

        output.push_str(&self.generate_deref(class));
        if !is_root {
            output.push_str(&self.generate_param_value(class));
        }

        Ok(output)
    }

    fn resolve_fields(
        &self,
        owner: &str,
        fields: &[Property],
    ) -> Result<Vec<ResolvedField>, CodegenError> {
        fields
            .iter()
            .map(|field| {
                let item = format!("{owner}.{}", field.name);
                let resolved = self
                    .resolver
                    .resolve_field(field)
                    .map_err(|e| CodegenError::item(&item, e))?;
                self.types.check(&resolved.ty, &item)?;
                Ok(resolved)
            })
            .collect()
    }

    fn resolve_methods(&self, class: &RemoteClass) -> Result<Vec<ResolvedMethod>, CodegenError> {
        class
            .methods
            .iter()
            .map(|method| self.resolve_method(class, method))
            .collect()
    }

    fn resolve_method(
        &self,
        class: &RemoteClass,
        method: &Method,
    ) -> Result<ResolvedMethod, CodegenError> {
        let item = format!("{}.{}", class.name, method.name);
        let params = self.resolve_fields(&item, &method.params)?;

        let (returns, return_doc) = match method.return_type() {
            Some(ret) => {
                let ty = self
                    .resolver
                    .resolve(&ret.type_name)
                    .map_err(|e| CodegenError::item(&item, e))?;
                self.types.check(&ty, &item)?;
                (Some(ty), ret.doc.clone())
            }
            None => (None, String::new()),
        };

        Ok(ResolvedMethod {
            name: method.name.clone(),
            ident: rust_ident(&method.name),
            doc: method.doc.clone(),
            params,
            returns,
            return_doc,
        })
    }

    /// Returns the embedded parent type of a class.
    fn parent_type<'c>(&self, class: &'c RemoteClass) -> &'c str {
        class.parent().unwrap_or(OBJECT_BASE)
    }

    fn signature(&self, method: &ResolvedMethod) -> String {
        let mut args = String::from("&self");
        for param in &method.params {
            args.push_str(&format!(
                ", {}: {}",
                param.ident,
                self.types.param_type(&param.ty)
            ));
        }
        let ret = method
            .returns
            .as_ref()
            .map_or_else(|| "()".to_string(), |ty| self.types.return_type(ty));
        format!("async fn {}({args}) -> Result<{ret}, ClientError>", method.ident)
    }

    fn push_method_doc(&self, output: &mut String, indent: &str, method: &ResolvedMethod) {
        push_doc(output, indent, &method.doc);
        if !method.return_doc.is_empty() {
            if !method.doc.is_empty() {
                output.push_str(&format!("{indent}///\n"));
            }
            push_doc(output, indent, &format!("Returns {}", method.return_doc));
        }
    }

    fn generate_trait(&self, class: &RemoteClass, methods: &[ResolvedMethod]) -> String {
        let mut output = String::new();
        let trait_name = self.types.trait_name(&class.name);

        output.push_str(&format!("/// Remote operations of [`{}`].\n", class.name));
        output.push_str("#[async_trait]\n");
        output.push_str(&format!("pub trait {trait_name}: IMediaObject {{\n"));
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            self.push_method_doc(&mut output, "    ", method);
            output.push_str(&format!("    {};\n", self.signature(method)));
        }
        output.push_str("}\n\n");

        output
    }

    fn generate_struct(&self, class: &RemoteClass, properties: &[ResolvedField]) -> String {
        let mut output = String::new();

        push_doc(&mut output, "", &class.doc);
        output.push_str("#[derive(Debug, Clone, Default)]\n");
        output.push_str(&format!("pub struct {} {{\n", class.name));
        output.push_str("    /// Embedded parent.\n");
        output.push_str(&format!("    pub base: {},\n", self.parent_type(class)));
        for property in properties {
            push_doc(&mut output, "    ", &property.doc);
            output.push_str(&format!(
                "    pub {}: {},\n",
                property.ident,
                self.types.field_type(&property.ty)
            ));
        }
        output.push_str("}\n\n");

        output
    }

    fn generate_object_impl(&self, class: &RemoteClass, params: &[ResolvedField]) -> String {
        let mut output = String::new();
        let embeds_object = class.parent().is_none();

        output.push_str(&format!("impl IMediaObject for {} {{\n", class.name));

        output.push_str("    fn object(&self) -> &ObjectBase {\n");
        if embeds_object {
            output.push_str("        &self.base\n");
        } else {
            output.push_str("        self.base.object()\n");
        }
        output.push_str("    }\n\n");

        output.push_str("    fn object_mut(&mut self) -> &mut ObjectBase {\n");
        if embeds_object {
            output.push_str("        &mut self.base\n");
        } else {
            output.push_str("        self.base.object_mut()\n");
        }
        output.push_str("    }\n\n");

        output.push_str("    fn wire_type(&self) -> &'static str {\n");
        output.push_str(&format!("        {:?}\n", class.name));
        output.push_str("    }\n\n");

        output.push_str(&self.generate_constructor_params(params));
        output.push_str("}\n\n");

        output
    }

    /// Generates the constructor argument builder: computed defaults for
    /// the declared params, overlaid with the caller's options.
    fn generate_constructor_params(&self, params: &[ResolvedField]) -> String {
        let mut output = String::new();
        let from = if params.iter().any(|p| !p.ty.is_primitive()) {
            "from"
        } else {
            "_from"
        };

        output.push_str(&format!(
            "    fn constructor_params(&self, {from}: &dyn IMediaObject, options: Params) -> Params {{\n"
        ));
        if params.is_empty() {
            output.push_str("        options\n");
            output.push_str("    }\n");
            return output;
        }

        output.push_str("        let mut params = Params::new();\n");
        for param in params {
            let value = match (&param.ty, &param.default) {
                (ResolvedType::Primitive(_), Some(default)) => json_tokens(default),
                (ResolvedType::Primitive(kind), None) => json_tokens(&kind.default_value()),
                _ => "from.handle()".to_string(),
            };
            output.push_str(&format!(
                "        params.insert({:?}.to_string(), json!({value}));\n",
                param.name
            ));
        }
        output.push_str("        merge_options(&mut params, options);\n");
        output.push_str("        params\n");
        output.push_str("    }\n");

        output
    }

    fn generate_method_body(&self, output: &mut String, method: &ResolvedMethod) {
        let operation_params = if method.params.is_empty() {
            "None"
        } else {
            output.push_str("        let mut operation_params = Params::new();\n");
            for param in &method.params {
                output.push_str(&format!(
                    "        set_if_not_empty(&mut operation_params, {:?}, &{});\n",
                    param.name, param.ident
                ));
            }
            "Some(operation_params)"
        };

        output.push_str(&format!(
            "        let response = self.object().invoke({:?}, {operation_params}).await?;\n",
            method.name
        ));

        let conversion = match &method.returns {
            None => "into_unit",
            Some(ty) if ty.is_primitive() => "into_value",
            Some(_) => "into_default",
        };
        output.push_str(&format!("        response.{conversion}()\n"));
    }

    fn generate_trait_impl(&self, class: &RemoteClass, methods: &[ResolvedMethod]) -> String {
        let mut output = String::new();

        output.push_str("#[async_trait]\n");
        output.push_str(&format!(
            "impl {} for {} {{\n",
            self.types.trait_name(&class.name),
            class.name
        ));
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!("    {} {{\n", self.signature(method)));
            self.generate_method_body(&mut output, method);
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the inherent impl: class constants, plus the call stubs of
    /// the root class, which has no capability trait.
    fn generate_inherent_impl(&self, class: &RemoteClass, methods: &[ResolvedMethod]) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl {} {{\n", class.name));
        output.push_str("    /// Events emitted by this class.\n");
        let events: Vec<String> = class.events.iter().map(|e| format!("{e:?}")).collect();
        output.push_str(&format!(
            "    pub const EVENTS: &'static [&'static str] = &[{}];\n\n",
            events.join(", ")
        ));
        output.push_str("    /// Whether the class can only be created through a subclass.\n");
        output.push_str(&format!(
            "    pub const IS_ABSTRACT: bool = {};\n",
            class.is_abstract
        ));

        for method in methods {
            output.push('\n');
            self.push_method_doc(&mut output, "    ", method);
            output.push_str(&format!("    pub {} {{\n", self.signature(method)));
            self.generate_method_body(&mut output, method);
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        output
    }

    /// Implements an ancestor's capability trait by delegating to the
    /// embedded parent.
    fn generate_delegation(
        &self,
        class: &RemoteClass,
        ancestor: &RemoteClass,
        methods: &[ResolvedMethod],
    ) -> String {
        let mut output = String::new();
        let trait_name = self.types.trait_name(&ancestor.name);

        output.push_str("#[async_trait]\n");
        output.push_str(&format!("impl {trait_name} for {} {{\n", class.name));
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            let args: Vec<&str> = method.params.iter().map(|p| p.ident.as_str()).collect();
            let mut call_args = String::from("&self.base");
            for arg in args {
                call_args.push_str(", ");
                call_args.push_str(arg);
            }
            output.push_str(&format!("    {} {{\n", self.signature(method)));
            output.push_str(&format!(
                "        {trait_name}::{}({call_args}).await\n",
                method.ident
            ));
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        output
    }

    fn generate_deref(&self, class: &RemoteClass) -> String {
        let mut output = String::new();
        let parent = self.parent_type(class);

        output.push_str(&format!("impl ::std::ops::Deref for {} {{\n", class.name));
        output.push_str(&format!("    type Target = {parent};\n\n"));
        output.push_str("    fn deref(&self) -> &Self::Target {\n");
        output.push_str("        &self.base\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl ::std::ops::DerefMut for {} {{\n", class.name));
        output.push_str("    fn deref_mut(&mut self) -> &mut Self::Target {\n");
        output.push_str("        &mut self.base\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Lets references to the class be sent as parameters, encoded as the
    /// object handle.
    fn generate_param_value(&self, class: &RemoteClass) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "impl ParamValue for dyn {} + '_ {{\n",
            self.types.trait_name(&class.name)
        ));
        output.push_str("    fn to_value(&self) -> Value {\n");
        output.push_str("        Value::from(self.handle())\n");
        output.push_str("    }\n\n");
        output.push_str("    fn is_empty_param(&self) -> bool {\n");
        output.push_str("        self.handle().is_empty()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
