//! Enum binding emitter

use crate::codegen::binding::{loader_function, BindingSet};
use crate::codegen::Flavour;
use crate::error::BindResult;
use crate::ir::names::{clean_capitalize, namespace_segments, parent_namespace};
use crate::ir::EnumEntity;
use indexmap::IndexMap;

/// Generator for enum bindings
pub struct EnumGenerator<'a> {
    flavour: &'a dyn Flavour,
}

impl<'a> EnumGenerator<'a> {
    /// Create a new enum generator
    pub fn new(flavour: &'a dyn Flavour) -> Self {
        Self { flavour }
    }

    /// Generate bindings for every enum of a namespace
    pub fn generate(&self, enums: &IndexMap<String, EnumEntity>) -> BindResult<BindingSet> {
        let mut set = BindingSet::new();

        for (qualified_name, enum_def) in enums {
            if enum_def.flags.nobind {
                tracing::debug!("Skipping enum {} (nobind)", qualified_name);
                continue;
            }
            tracing::debug!("Generating bindings for enum {}", qualified_name);

            let object = format!("Enum{}", clean_capitalize(&enum_def.name));
            set.include_location(&enum_def.location);

            let segments = namespace_segments(parent_namespace(qualified_name));
            let table = self.flavour.table_variable(&segments);
            let values: Vec<String> = enum_def.values.iter().map(|v| v.name.clone()).collect();
            let statements = vec![
                self.flavour.fetch_table(&segments),
                self.flavour
                    .bind_enum(&table, &enum_def.name, qualified_name, &values),
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
    use crate::ir::{EntityFlags, EnumValue};

    #[test]
    fn test_generate_enum() {
        let mut enums = IndexMap::new();
        enums.insert(
            "obe::Graphics::Color".to_string(),
            EnumEntity {
                name: "Color".into(),
                values: vec![
                    EnumValue {
                        name: "Red".into(),
                        description: None,
                    },
                    EnumValue {
                        name: "Green".into(),
                        description: Some("Grass".into()),
                    },
                ],
                location: "include/Core/Graphics/Color.hpp".into(),
                flags: EntityFlags::default(),
            },
        );

        let set = EnumGenerator::new(&Sol3Flavour).generate(&enums).unwrap();
        assert_eq!(set.objects, vec!["EnumColor"]);
        assert_eq!(set.includes, vec!["Core/Graphics/Color.hpp"]);
        assert!(set.bodies[0].contains(
            "GraphicsNamespace.new_enum<obe::Graphics::Color>(\"Color\", { \
             { \"Red\", obe::Graphics::Color::Red }, \
             { \"Green\", obe::Graphics::Color::Green } });"
        ));
    }
}
