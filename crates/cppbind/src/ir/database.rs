//! Documentation database and namespace grouping
//!
//! The database is the read-only input of a generation run. Grouping splits
//! it into one [`NamespaceGroup`] per innermost namespace.

use crate::error::{BindError, BindResult};
use crate::ir::names::parent_namespace;
use crate::ir::{ClassEntity, EnumEntity, FunctionEntity, GlobalEntity, TypedefEntity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Metadata attached to a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NamespaceInfo {
    /// Extra headers every binding unit of this namespace must include
    pub additional_includes: Vec<String>,
    /// Namespace documentation
    pub description: String,
}

/// Every entity of the documented library, keyed by qualified name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CppDatabase {
    pub namespaces: IndexMap<String, NamespaceInfo>,
    pub classes: IndexMap<String, ClassEntity>,
    pub enums: IndexMap<String, EnumEntity>,
    pub functions: IndexMap<String, FunctionEntity>,
    pub globals: IndexMap<String, GlobalEntity>,
    pub typedefs: IndexMap<String, TypedefEntity>,
}

impl CppDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a database from JSON text
    pub fn from_json(json: &str) -> BindResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a database file
    pub fn from_json_file(path: impl AsRef<Path>) -> BindResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| BindError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Add a function
    pub fn function(mut self, qualified_name: impl Into<String>, f: FunctionEntity) -> Self {
        self.functions.insert(qualified_name.into(), f);
        self
    }

    /// Add a global
    pub fn global(mut self, qualified_name: impl Into<String>, g: GlobalEntity) -> Self {
        self.globals.insert(qualified_name.into(), g);
        self
    }

    /// Add an enum
    pub fn enum_def(mut self, qualified_name: impl Into<String>, e: EnumEntity) -> Self {
        self.enums.insert(qualified_name.into(), e);
        self
    }

    /// Add a class
    pub fn class(mut self, qualified_name: impl Into<String>, c: ClassEntity) -> Self {
        self.classes.insert(qualified_name.into(), c);
        self
    }

    /// Add a typedef
    pub fn typedef(mut self, qualified_name: impl Into<String>, t: TypedefEntity) -> Self {
        self.typedefs.insert(qualified_name.into(), t);
        self
    }

    /// Attach namespace metadata
    pub fn namespace(mut self, name: impl Into<String>, info: NamespaceInfo) -> Self {
        self.namespaces.insert(name.into(), info);
        self
    }

    /// Total number of entities
    pub fn len(&self) -> usize {
        self.classes.len()
            + self.enums.len()
            + self.functions.len()
            + self.globals.len()
            + self.typedefs.len()
    }

    /// Whether the database holds no entity
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check every bindable entity for the fields the emitters need.
    ///
    /// Entities flagged `nobind` are not inspected.
    pub fn validate(&self) -> BindResult<()> {
        for (name, function) in &self.functions {
            if function.flags().nobind {
                continue;
            }
            function.validate(name)?;
            for signature in function.bound_signatures() {
                if signature.location.is_empty() {
                    return Err(BindError::malformed(name, "declaration has no location"));
                }
            }
        }

        for (name, global) in &self.globals {
            if global.flags.nobind {
                continue;
            }
            if global.name.is_empty() {
                return Err(BindError::malformed(name, "global has no name"));
            }
            if global.ty.trim().is_empty() {
                return Err(BindError::malformed(name, "global has no type"));
            }
            if global.location.is_empty() {
                return Err(BindError::malformed(name, "global has no location"));
            }
        }

        for (name, enum_def) in &self.enums {
            if enum_def.flags.nobind {
                continue;
            }
            if enum_def.name.is_empty() {
                return Err(BindError::malformed(name, "enum has no name"));
            }
            if enum_def.location.is_empty() {
                return Err(BindError::malformed(name, "enum has no location"));
            }
        }

        for (name, class) in &self.classes {
            if class.flags.nobind {
                continue;
            }
            if class.name.is_empty() {
                return Err(BindError::malformed(name, "class has no name"));
            }
            if class.location.is_empty() {
                return Err(BindError::malformed(name, "class has no location"));
            }
            for constructor in &class.constructors {
                constructor.validate(name, false)?;
            }
            for (method_name, method) in &class.methods {
                if !method.flags().nobind {
                    method.validate(&format!("{}::{}", name, method_name))?;
                }
            }
            for (attribute_name, attribute) in &class.attributes {
                if !attribute.flags.nobind && attribute.ty.trim().is_empty() {
                    return Err(BindError::malformed(
                        format!("{}::{}", name, attribute_name),
                        "attribute has no type",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Partition the database by innermost namespace.
    ///
    /// Groups come back sorted by namespace path so that repeated runs emit
    /// files in the same order.
    pub fn group_by_namespace(&self) -> BTreeMap<String, NamespaceGroup> {
        let mut groups: BTreeMap<String, NamespaceGroup> = BTreeMap::new();

        fn slot<'a>(
            groups: &'a mut BTreeMap<String, NamespaceGroup>,
            qualified_name: &str,
        ) -> &'a mut NamespaceGroup {
            let namespace = parent_namespace(qualified_name);
            groups
                .entry(namespace.to_string())
                .or_insert_with(|| NamespaceGroup::new(namespace))
        }

        for (name, value) in &self.classes {
            slot(&mut groups, name).classes.insert(name.clone(), value.clone());
        }
        for (name, value) in &self.enums {
            slot(&mut groups, name).enums.insert(name.clone(), value.clone());
        }
        for (name, value) in &self.functions {
            slot(&mut groups, name).functions.insert(name.clone(), value.clone());
        }
        for (name, value) in &self.globals {
            slot(&mut groups, name).globals.insert(name.clone(), value.clone());
        }
        for (name, value) in &self.typedefs {
            slot(&mut groups, name).typedefs.insert(name.clone(), value.clone());
        }

        for (name, group) in groups.iter_mut() {
            if let Some(info) = self.namespaces.get(name) {
                group.info = info.clone();
            }
        }

        groups
    }
}

/// The entities whose qualified name's parent is one namespace
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceGroup {
    /// Namespace path (`obe::Graphics`), empty for the global namespace
    pub name: String,
    /// Namespace metadata
    pub info: NamespaceInfo,
    pub classes: IndexMap<String, ClassEntity>,
    pub enums: IndexMap<String, EnumEntity>,
    pub functions: IndexMap<String, FunctionEntity>,
    pub globals: IndexMap<String, GlobalEntity>,
    pub typedefs: IndexMap<String, TypedefEntity>,
}

impl NamespaceGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the group holds an entity that would produce a binding
    pub fn has_bindable_entities(&self) -> bool {
        self.classes.values().any(|c| !c.flags.nobind)
            || self.enums.values().any(|e| !e.flags.nobind)
            || self.functions.values().any(FunctionEntity::is_bindable)
            || self.globals.values().any(|g| !g.flags.nobind)
    }

    /// Qualified name of any bindable entity, for error reporting
    pub fn first_bindable_name(&self) -> Option<&str> {
        self.classes
            .iter()
            .find(|(_, c)| !c.flags.nobind)
            .map(|(n, _)| n)
            .or_else(|| self.enums.iter().find(|(_, e)| !e.flags.nobind).map(|(n, _)| n))
            .or_else(|| {
                self.functions
                    .iter()
                    .find(|(_, f)| f.is_bindable())
                    .map(|(n, _)| n)
            })
            .or_else(|| self.globals.iter().find(|(_, g)| !g.flags.nobind).map(|(n, _)| n))
            .map(String::as_str)
    }
}
