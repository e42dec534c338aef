//! Generation pipeline.
//!
//! Load every module, build the complex type registry and class hierarchy
//! over all of them, synthesize each module, and only then write the units.

use crate::emitter::{COMPLEX_TYPES_UNIT, Emitter, NAMESPACE_UNIT, OutputUnit, write_units};
use crate::error::CodegenError;
use crate::hierarchy::ClassHierarchy;
use crate::rust::{ClassGenerator, ComplexTypeGenerator};
use kurento_idl::{ELEMENTS_PREFIX, KMD_SUFFIX, Module, Registry, Resolver, file_name};
use std::path::PathBuf;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the core description.
    pub core_path: PathBuf,
    /// Directory searched for elements descriptions.
    pub elements_dir: PathBuf,
    /// File name prefix of elements descriptions.
    pub elements_prefix: String,
    /// File name suffix of elements descriptions.
    pub elements_suffix: String,
    /// File name suffix stripped from the core description.
    pub core_suffix: String,
    /// Directory the units are written to.
    pub output_dir: PathBuf,
    /// Namespace named in unit headers.
    pub namespace: String,
    /// Name of the base object class.
    pub root_class: String,
    /// Path of the runtime crate imported by generated code.
    pub runtime: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            core_path: PathBuf::from("kms-core/src/server/interface/core.kmd.json"),
            elements_dir: PathBuf::from("kms-elements/src/server/interface"),
            elements_prefix: ELEMENTS_PREFIX.to_string(),
            elements_suffix: KMD_SUFFIX.to_string(),
            core_suffix: KMD_SUFFIX.to_string(),
            output_dir: PathBuf::from("kurento"),
            namespace: "kurento".to_string(),
            root_class: "MediaObject".to_string(),
            runtime: "::kurento_client".to_string(),
        }
    }
}

/// Builder for configuring a generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a builder with the default locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the core description path.
    #[must_use]
    pub fn core_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.core_path = path.into();
        self
    }

    /// Sets the elements directory.
    #[must_use]
    pub fn elements_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.elements_dir = dir.into();
        self
    }

    /// Sets the file name pattern of elements descriptions.
    #[must_use]
    pub fn elements_pattern(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.config.elements_prefix = prefix.into();
        self.config.elements_suffix = suffix.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Sets the base object class name.
    #[must_use]
    pub fn root_class(mut self, name: impl Into<String>) -> Self {
        self.config.root_class = name.into();
        self
    }

    /// Sets the runtime crate path.
    #[must_use]
    pub fn runtime(mut self, path: impl Into<String>) -> Self {
        self.config.runtime = path.into();
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator {
        Generator::new(self.config)
    }
}

/// Kurento client binding generator.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads, generates and writes every unit.
    ///
    /// # Errors
    /// Returns `CodegenError` on the first failure; nothing is written if
    /// generation fails.
    pub fn run(&self) -> Result<Vec<PathBuf>, CodegenError> {
        let modules = self.load_modules()?;
        let units = self.generate_modules(&modules)?;
        self.write(&units)
    }

    /// Loads the core description and every discovered elements description.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if a file cannot be read or parsed.
    pub fn load_modules(&self) -> Result<Vec<Module>, CodegenError> {
        let config = &self.config;

        let core_file = file_name(&config.core_path);
        let core_name = kurento_idl::output_name(&core_file, "", &config.core_suffix);
        let mut modules = vec![kurento_idl::load_named(&config.core_path, core_name)?];

        let paths = kurento_idl::discover(
            &config.elements_dir,
            &config.elements_prefix,
            &config.elements_suffix,
        )?;
        for path in paths {
            let name = kurento_idl::output_name(
                &file_name(&path),
                &config.elements_prefix,
                &config.elements_suffix,
            );
            modules.push(kurento_idl::load_named(&path, name)?);
        }

        tracing::info!("Loaded {} modules", modules.len());
        Ok(modules)
    }

    /// Generates one unit per module, the complex types unit, and last the
    /// namespace unit including all of them.
    ///
    /// The registry and hierarchy are complete before any module is
    /// synthesized, whatever the module order.
    ///
    /// # Errors
    /// Returns `CodegenError::Module` naming the failing source.
    pub fn generate_modules(&self, modules: &[Module]) -> Result<Vec<OutputUnit>, CodegenError> {
        let registry = Registry::build(modules);
        let hierarchy = ClassHierarchy::build(modules, &self.config.root_class);
        let resolver = Resolver::new(&registry);
        let classes = ClassGenerator::new(resolver, &hierarchy);
        let complex_types = ComplexTypeGenerator::new(resolver, &hierarchy);
        let emitter = Emitter::new(&self.config.namespace, &self.config.runtime);

        let mut units = Vec::with_capacity(modules.len() + 2);
        for module in modules {
            tracing::info!("Generating {} from {}", module.name, module.source);
            let body = classes
                .generate(module)
                .map_err(|e| e.in_module(&module.source))?;
            units.push(emitter.emit(&module.name, &[module.source.as_str()], &body));
        }

        let mut body = String::new();
        for module in modules {
            let code = complex_types
                .generate(module)
                .map_err(|e| e.in_module(&module.source))?;
            body.push_str(&code);
        }
        let sources: Vec<&str> = modules.iter().map(|m| m.source.as_str()).collect();
        units.push(emitter.emit(COMPLEX_TYPES_UNIT, &sources, &body));
        let namespace = emitter.emit_namespace(&units);
        units.push(namespace);

        let mut names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err(CodegenError::generation(format!(
                "duplicate unit names in {names:?}"
            )));
        }

        Ok(units)
    }

    /// Writes units to the output directory.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a file cannot be written.
    pub fn write(&self, units: &[OutputUnit]) -> Result<Vec<PathBuf>, CodegenError> {
        write_units(&self.config.output_dir, units)
    }
}
