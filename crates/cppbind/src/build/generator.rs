//! BindingsGenerator: the file-writing pipeline
//!
//! A run validates the database, groups it by namespace, writes one header
//! and one source per namespace, then walks the written headers to build
//! the bindings index. The index is always written last.

use crate::build::config::BindingsConfig;
use crate::codegen::{BindingsIndex, Flavour, NamespaceUnit, Sol3Flavour, UnitGenerator};
use crate::error::{BindError, BindResult};
use crate::ir::CppDatabase;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    /// Namespaces that produced a unit
    pub namespaces: usize,
    /// Generated objects across all namespaces
    pub objects: usize,
    /// Every file written, index last
    pub files: Vec<PathBuf>,
}

/// Generator for a full bindings tree
///
/// # Example
/// ```ignore
/// use cppbind::build::{BindingsConfig, BindingsGenerator};
///
/// let db = CppDatabase::from_json_file("doc_db.json")?;
/// let report = BindingsGenerator::new(BindingsConfig::new("generated")).generate(&db)?;
/// println!("{} objects", report.objects);
/// ```
pub struct BindingsGenerator {
    config: BindingsConfig,
    flavour: Box<dyn Flavour>,
}

impl BindingsGenerator {
    /// Create a generator using the sol3 flavour
    pub fn new(config: BindingsConfig) -> Self {
        Self {
            config,
            flavour: Box::new(Sol3Flavour::new()),
        }
    }

    /// Use another runtime adapter
    pub fn with_flavour(mut self, flavour: impl Flavour + 'static) -> Self {
        self.flavour = Box::new(flavour);
        self
    }

    /// Configuration of this generator
    pub fn config(&self) -> &BindingsConfig {
        &self.config
    }

    /// Render every namespace unit without touching the file system
    pub fn plan(&self, db: &CppDatabase) -> BindResult<Vec<NamespaceUnit>> {
        db.validate()?;

        let units = UnitGenerator::new(self.flavour.as_ref());
        let mut planned = Vec::new();
        for group in db.group_by_namespace().values() {
            if let Some(unit) = units.generate(group)? {
                planned.push(unit);
            }
        }
        Ok(planned)
    }

    /// Generate and write the whole bindings tree
    pub fn generate(&self, db: &CppDatabase) -> BindResult<GenerationReport> {
        tracing::info!("Generating bindings for {} entities", db.len());
        let units = self.plan(db)?;

        let mut report = GenerationReport::default();
        for unit in &units {
            report.files.extend(self.write_unit(unit)?);
            report.namespaces += 1;
            report.objects += unit.objects.len();
        }

        report.files.push(self.write_index(&units)?);
        tracing::info!(
            "Generated {} objects in {} namespaces",
            report.objects,
            report.namespaces
        );
        Ok(report)
    }

    /// Write the header and source of one namespace
    pub fn write_unit(&self, unit: &NamespaceUnit) -> BindResult<Vec<PathBuf>> {
        let header_path = self.config.include_root()?.join(unit.header_path());
        let source_path = self.config.source_root()?.join(unit.source_path());

        write_file(&header_path, &unit.header)?;
        write_file(&source_path, &unit.source)?;
        tracing::debug!("Wrote {} and {}", header_path.display(), source_path.display());

        Ok(vec![header_path, source_path])
    }

    /// Include paths of every header found in the generated header tree
    pub fn discover_headers(&self) -> BindResult<Vec<String>> {
        let include_root = self.config.include_root()?;
        let header_dir = self.config.header_dir()?;
        if !header_dir.exists() {
            return Ok(Vec::new());
        }

        let mut headers = Vec::new();
        for entry in WalkDir::new(&header_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| BindError::io(&header_dir, e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "hpp") {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&include_root) {
                headers.push(include_string(relative));
            }
        }
        Ok(headers)
    }

    /// Build and write the bindings index
    pub fn write_index(&self, units: &[NamespaceUnit]) -> BindResult<PathBuf> {
        tracing::info!("Generating bindings index");

        let mut index = BindingsIndex::new(self.discover_headers()?);
        for unit in units {
            index.add_namespace(unit.segments.clone(), unit.objects.clone());
        }

        let index_path = self.config.index_path()?;
        let source = index.render(
            self.flavour.as_ref(),
            &self.config.index_namespace,
            &self.config.tree_name,
        );
        write_file(&index_path, &source)?;
        Ok(index_path)
    }
}

fn include_string(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_file(path: &Path, contents: &str) -> BindResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BindError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| BindError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_headers_on_empty_tree() {
        let temp = TempDir::new().unwrap();
        let generator = BindingsGenerator::new(BindingsConfig::new(temp.path()));
        assert!(generator.discover_headers().unwrap().is_empty());
    }

    #[test]
    fn test_discover_headers_is_sorted_and_relative() {
        let temp = TempDir::new().unwrap();
        let generator = BindingsGenerator::new(BindingsConfig::new(temp.path()));
        let header_dir = generator.config().header_dir().unwrap();
        write_file(&header_dir.join("b/b.hpp"), "").unwrap();
        write_file(&header_dir.join("a/x/x.hpp"), "").unwrap();
        write_file(&header_dir.join("a/notes.txt"), "").unwrap();

        assert_eq!(
            generator.discover_headers().unwrap(),
            vec!["Bindings/a/x/x.hpp", "Bindings/b/b.hpp"]
        );
    }

    /// Minimal adapter for a made-up `script` runtime
    struct ScriptFlavour;

    impl Flavour for ScriptFlavour {
        fn state_view(&self) -> &str {
            "script::Vm"
        }
        fn include_file(&self) -> &str {
            "script/vm.hpp"
        }
        fn fetch_table(&self, segments: &[String]) -> String {
            format!("auto {} = state.table(\"{}\");", self.table_variable(segments), segments.join("."))
        }
        fn overload(&self, candidates: &[String]) -> String {
            format!("script::overloads({})", candidates.join(", "))
        }
        fn bind_function(&self, table: &str, name: &str, callable: &str) -> String {
            format!("{}.def(\"{}\", {});", table, name, callable)
        }
        fn bind_global(&self, table: &str, name: &str, qualified_name: &str, _: bool) -> String {
            format!("{}.var(\"{}\", &{});", table, name, qualified_name)
        }
        fn bind_enum(&self, table: &str, name: &str, _: &str, _: &[String]) -> String {
            format!("{}.enumeration(\"{}\");", table, name)
        }
        fn new_usertype(&self, table: &str, usertype: &str, name: &str, _: &str, _: &[String], _: &[String]) -> String {
            format!("auto {} = {}.type(\"{}\");", usertype, table, name)
        }
        fn bind_member(&self, usertype: &str, name: &str, value: &str) -> String {
            format!("{}.def(\"{}\", {});", usertype, name, value)
        }
        fn meta_function(&self, _: &str) -> Option<String> {
            None
        }
        fn bind_meta_function(&self, usertype: &str, meta_function: &str, value: &str) -> String {
            format!("{}.meta({}, {});", usertype, meta_function, value)
        }
        fn index_tree(&self, tree_name: &str) -> String {
            format!("script::Tree tree(\"{}\");", tree_name)
        }
        fn index_new_table(&self, segments: &[String]) -> String {
            format!("tree.table(\"{}\");", segments.join("."))
        }
        fn index_register_head(&self, segments: &[String]) -> String {
            format!("tree.at(\"{}\")", segments.join("."))
        }
        fn index_register_link(&self, object: &str, loader: &str) -> String {
            format!(".loader(\"{}\", &{})", object, loader)
        }
        fn index_install(&self) -> String {
            "tree.install(state);".to_string()
        }
    }

    #[test]
    fn test_custom_flavour_drives_every_output() {
        use crate::ir::{FunctionEntity, FunctionSignature, Parameter};

        let temp = TempDir::new().unwrap();
        let db = CppDatabase::new().function(
            "obe::Math::Clamp",
            FunctionEntity::Function(
                FunctionSignature::new("Clamp", "int")
                    .param(Parameter::new("v", "int"))
                    .at("include/Core/Math/Clamp.hpp"),
            ),
        );
        let generator =
            BindingsGenerator::new(BindingsConfig::new(temp.path())).with_flavour(ScriptFlavour);
        generator.generate(&db).unwrap();

        let read = |relative: &str| fs::read_to_string(temp.path().join(relative)).unwrap();
        let header = read("include/Core/Bindings/obe/Math/Math.hpp");
        assert!(header.contains("namespace script { class Vm; };"));
        assert!(header.contains("void LoadFunctionClamp(script::Vm state);"));

        let source = read("src/Core/Bindings/obe/Math/Math.cpp");
        assert!(source.contains("#include <script/vm.hpp>"));
        assert!(source.contains("auto MathNamespace = state.table(\"obe.Math\");"));
        assert!(source.contains("MathNamespace.def(\"Clamp\", &obe::Math::Clamp);"));
        assert!(!source.contains("sol::"));

        let index = read("src/Core/Bindings/index.cpp");
        assert!(index.contains("script::Tree tree(\"ObEngine\");"));
        assert!(index.contains("tree.table(\"obe.Math\");"));
        assert!(index.contains(
            "tree.at(\"obe.Math\")\n.loader(\"FunctionClamp\", &obe::Math::Bindings::LoadFunctionClamp);"
        ));
        assert!(index.contains("tree.install(state);"));
        assert!(!index.contains("sol::"));
    }

    #[test]
    fn test_missing_output_root() {
        let generator = BindingsGenerator::new(BindingsConfig::default());
        let err = generator.generate(&CppDatabase::new()).unwrap_err();
        assert!(matches!(err, BindError::EnvVarMissing(_)));
    }
}
