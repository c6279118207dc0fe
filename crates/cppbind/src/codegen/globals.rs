//! Global variable binding emitter

use crate::codegen::binding::{loader_function, BindingSet};
use crate::codegen::Flavour;
use crate::error::BindResult;
use crate::ir::names::{clean_capitalize, namespace_segments, parent_namespace};
use crate::ir::GlobalEntity;
use indexmap::IndexMap;

/// Generator for global variable bindings
pub struct GlobalGenerator<'a> {
    flavour: &'a dyn Flavour,
}

impl<'a> GlobalGenerator<'a> {
    /// Create a new global generator
    pub fn new(flavour: &'a dyn Flavour) -> Self {
        Self { flavour }
    }

    /// Generate bindings for every global of a namespace.
    ///
    /// Const globals are bound read-only, everything else by reference.
    pub fn generate(&self, globals: &IndexMap<String, GlobalEntity>) -> BindResult<BindingSet> {
        let mut set = BindingSet::new();

        for (qualified_name, global) in globals {
            if global.flags.nobind {
                tracing::debug!("Skipping global {} (nobind)", qualified_name);
                continue;
            }
            tracing::debug!("Generating bindings for global {}", qualified_name);

            let object = format!("Global{}", clean_capitalize(&global.name));
            set.include_location(&global.location);

            let segments = namespace_segments(parent_namespace(qualified_name));
            let table = self.flavour.table_variable(&segments);
            let statements = vec![
                self.flavour.fetch_table(&segments),
                self.flavour
                    .bind_global(&table, &global.name, qualified_name, global.is_const()),
            ];

            let body = loader_function(self.flavour, &object, &statements);
            set.push(object, body);
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Sol3Flavour;

    #[test]
    fn test_generate_globals() {
        let mut globals = IndexMap::new();
        globals.insert(
            "obe::Config::Version".to_string(),
            GlobalEntity::new("Version", "const std::string").at("include/Core/Config.hpp"),
        );
        globals.insert(
            "obe::Config::verbosity".to_string(),
            GlobalEntity::new("verbosity", "int").at("include/Core/Config.hpp"),
        );

        let set = GlobalGenerator::new(&Sol3Flavour).generate(&globals).unwrap();
        assert_eq!(set.objects, vec!["GlobalVersion", "GlobalVerbosity"]);
        assert!(set.bodies[0].contains("ConfigNamespace[\"Version\"] = obe::Config::Version;"));
        assert!(set.bodies[1]
            .contains("ConfigNamespace[\"verbosity\"] = std::ref(obe::Config::verbosity);"));
        assert!(set.bodies[1].starts_with("void LoadGlobalVerbosity(sol::state_view state)"));
    }

    #[test]
    fn test_nobind_global_is_skipped() {
        let mut hidden = GlobalEntity::new("Hidden", "int").at("include/x.hpp");
        hidden.flags.nobind = true;
        let mut globals = IndexMap::new();
        globals.insert("ns::Hidden".to_string(), hidden);

        let set = GlobalGenerator::new(&Sol3Flavour).generate(&globals).unwrap();
        assert!(set.is_empty());
        assert!(set.includes.is_empty());
    }
}
