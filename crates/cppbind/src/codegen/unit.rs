//! Per-namespace translation units
//!
//! Runs every emitter over one namespace group and renders the header
//! (loader declarations) and the source (loader bodies) of that namespace.

use crate::codegen::binding::{loader_signature, BindingSet};
use crate::codegen::{ClassGenerator, EnumGenerator, Flavour, FunctionGenerator, GlobalGenerator};
use crate::error::{BindError, BindResult};
use crate::ir::names::{is_local_source, namespace_segments};
use crate::ir::NamespaceGroup;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

/// Directory, relative to the module include root, holding generated headers
pub const BINDINGS_DIR: &str = "Bindings";

/// Rendered bindings of one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceUnit {
    /// Namespace path (`obe::Graphics`)
    pub namespace: String,
    /// Namespace segments (`["obe", "Graphics"]`)
    pub segments: Vec<String>,
    /// Generated object identifiers, in emission order
    pub objects: Vec<String>,
    /// Header text
    pub header: String,
    /// Source text
    pub source: String,
}

impl NamespaceUnit {
    /// Header path relative to the module include root
    /// (`Bindings/obe/Graphics/Graphics.hpp`)
    pub fn header_path(&self) -> PathBuf {
        unit_path(&self.segments, "hpp")
    }

    /// Source path relative to the module source root
    pub fn source_path(&self) -> PathBuf {
        unit_path(&self.segments, "cpp")
    }

    /// Path used to include the header from generated code
    pub fn header_include(&self) -> String {
        header_include(&self.segments)
    }
}

fn unit_path(segments: &[String], extension: &str) -> PathBuf {
    let mut path = PathBuf::from(BINDINGS_DIR);
    for segment in segments {
        path.push(segment);
    }
    let stem = segments.last().map(String::as_str).unwrap_or_default();
    path.push(format!("{}.{}", stem, extension));
    path
}

fn header_include(segments: &[String]) -> String {
    let stem = segments.last().map(String::as_str).unwrap_or_default();
    let mut parts: Vec<&str> = vec![BINDINGS_DIR];
    parts.extend(segments.iter().map(String::as_str));
    format!("{}/{}.hpp", parts.join("/"), stem)
}

/// Generator for per-namespace units
pub struct UnitGenerator<'a> {
    flavour: &'a dyn Flavour,
}

impl<'a> UnitGenerator<'a> {
    /// Create a new unit generator
    pub fn new(flavour: &'a dyn Flavour) -> Self {
        Self { flavour }
    }

    /// Bind every entity of a namespace.
    ///
    /// Returns `None` when the namespace produces no object.
    pub fn generate(&self, group: &NamespaceGroup) -> BindResult<Option<NamespaceUnit>> {
        if group.name.is_empty() {
            return match group.first_bindable_name() {
                Some(entity) => Err(BindError::unsupported(
                    entity,
                    "entity in the global namespace has no table to be bound in",
                )),
                None => Ok(None),
            };
        }

        tracing::info!("Generating bindings for namespace {}", group.name);

        let mut set = BindingSet::new();
        set.extend(ClassGenerator::new(self.flavour).generate(&group.classes)?);
        set.extend(EnumGenerator::new(self.flavour).generate(&group.enums)?);
        set.extend(FunctionGenerator::new(self.flavour).generate(&group.functions)?);
        set.extend(GlobalGenerator::new(self.flavour).generate(&group.globals)?);
        if !group.typedefs.is_empty() {
            tracing::debug!(
                "Namespace {} has {} typedef(s), none are bound",
                group.name,
                group.typedefs.len()
            );
        }

        if set.is_empty() {
            tracing::debug!("Namespace {} produced no bindings", group.name);
            return Ok(None);
        }
        check_unique(&group.name, &set.objects)?;

        let segments = namespace_segments(&group.name);
        let header = self.render_header(&group.name, &set.objects);

        let mut includes: BTreeSet<&str> = set
            .includes
            .iter()
            .map(String::as_str)
            .filter(|include| !is_local_source(include))
            .collect();
        includes.extend(group.info.additional_includes.iter().map(String::as_str));
        let source = self.render_source(&group.name, &header_include(&segments), &includes, &set.bodies);

        Ok(Some(NamespaceUnit {
            namespace: group.name.clone(),
            segments,
            objects: set.objects,
            header,
            source,
        }))
    }

    /// Header declaring one loader per object
    pub fn render_header(&self, namespace: &str, objects: &[String]) -> String {
        let declarations: Vec<String> = objects
            .iter()
            .map(|object| format!("{};", loader_signature(self.flavour, object)))
            .collect();
        format!(
            "#pragma once\n\n{}\nnamespace {}::Bindings\n{{\n{}\n}};\n",
            self.flavour.state_forward_declaration(),
            namespace,
            declarations.join("\n")
        )
    }

    /// Source holding every loader body
    pub fn render_source(
        &self,
        namespace: &str,
        header: &str,
        includes: &BTreeSet<&str>,
        bodies: &[String],
    ) -> String {
        let includes: Vec<String> = includes
            .iter()
            .map(|include| format!("#include <{}>", include))
            .collect();
        format!(
            "#include <{}>\n\n{}\n\n#include <{}>\n\nnamespace {}::Bindings\n{{\n{}\n}};\n",
            header,
            includes.join("\n"),
            self.flavour.include_file(),
            namespace,
            bodies.join("\n")
        )
    }
}

fn check_unique(namespace: &str, objects: &[String]) -> BindResult<()> {
    let mut seen = HashSet::new();
    for object in objects {
        if !seen.insert(object) {
            return Err(BindError::IdentifierCollision {
                namespace: namespace.to_string(),
                identifier: object.clone(),
            });
        }
    }
    Ok(())
}
