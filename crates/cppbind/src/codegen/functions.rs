//! Free function binding emitter
//!
//! Produces one loader per function or overload set. The loader fetches the
//! namespace table and binds the resolved callable under the function's
//! short name.

use crate::codegen::binding::{loader_function, BindingSet};
use crate::codegen::operators::classify;
use crate::codegen::overloads::{overload_candidates, CallTarget};
use crate::codegen::Flavour;
use crate::error::BindResult;
use crate::ir::names::{clean_capitalize, namespace_segments, parent_namespace};
use crate::ir::FunctionEntity;
use indexmap::IndexMap;

/// Generator for free function bindings
pub struct FunctionGenerator<'a> {
    flavour: &'a dyn Flavour,
}

impl<'a> FunctionGenerator<'a> {
    /// Create a new function generator
    pub fn new(flavour: &'a dyn Flavour) -> Self {
        Self { flavour }
    }

    /// Generate bindings for every function of a namespace
    pub fn generate(&self, functions: &IndexMap<String, FunctionEntity>) -> BindResult<BindingSet> {
        let mut set = BindingSet::new();

        for (qualified_name, function) in functions {
            if !function.is_bindable() {
                tracing::debug!("Skipping function {} (nobind)", qualified_name);
                continue;
            }
            tracing::debug!("Generating bindings for function {}", qualified_name);

            let object = self.object_name(function).map_err(|e| e.in_entity(qualified_name))?;
            for signature in function.bound_signatures() {
                set.include_location(&signature.location);
            }

            let segments = namespace_segments(parent_namespace(qualified_name));
            let table = self.flavour.table_variable(&segments);
            let statements = vec![
                self.flavour.fetch_table(&segments),
                self.flavour
                    .bind_function(&table, function.name(), &self.callable(qualified_name, function)),
            ];

            let body = loader_function(self.flavour, &object, &statements);
            set.push(object, body);
        }

        Ok(set)
    }

    /// Generated object identifier (`FunctionAdd`, `OperatorVector2AddVector2`)
    pub fn object_name(&self, function: &FunctionEntity) -> BindResult<String> {
        let parameters = function
            .first_signature()
            .map(|s| s.parameters.as_slice())
            .unwrap_or(&[]);
        let (kind, display_name) = classify(function.name(), parameters)?;
        Ok(format!("{}{}", kind.prefix(), clean_capitalize(&display_name)))
    }

    /// Expression bound under the function's name.
    ///
    /// A single declaration without defaults is bound by address; anything
    /// else goes through the overload expander, collapsing to the lone
    /// candidate when only one is produced.
    pub fn callable(&self, qualified_name: &str, function: &FunctionEntity) -> String {
        if let FunctionEntity::Function(signature) = function {
            if !signature.has_defaults() {
                return format!("&{}", qualified_name);
            }
        }

        let candidates = overload_candidates(function, |_| CallTarget::Free { qualified_name });
        match candidates.as_slice() {
            [single] => single.code.clone(),
            _ => {
                let codes: Vec<String> = candidates.into_iter().map(|c| c.code).collect();
                self.flavour.overload(&codes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Sol3Flavour;
    use crate::error::BindError;
    use crate::ir::{EntityFlags, FunctionSignature, OverloadSet, Parameter};
    use pretty_assertions::assert_eq;

    fn add() -> FunctionEntity {
        FunctionEntity::Function(
            FunctionSignature::new("Add", "int")
                .param(Parameter::new("a", "int"))
                .param(Parameter::new("b", "int").with_default("0"))
                .at("include/Core/ns/Math.hpp"),
        )
    }

    #[test]
    fn test_function_with_default_argument() {
        let mut functions = IndexMap::new();
        functions.insert("ns::Add".to_string(), add());

        let set = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap();
        assert_eq!(set.objects, vec!["FunctionAdd"]);
        assert_eq!(set.includes, vec!["Core/ns/Math.hpp"]);
        assert_eq!(
            set.bodies[0],
            "void LoadFunctionAdd(sol::state_view state)\n{\n\
             sol::table nsNamespace = state[\"ns\"].get<sol::table>();\n\
             nsNamespace.set_function(\"Add\", sol::overload(\
             [](int a) -> int { return ns::Add(a); }, \
             [](int a, int b) -> int { return ns::Add(a, b); }));\n}"
        );
    }

    #[test]
    fn test_plain_function_bound_by_address() {
        let function = FunctionEntity::Function(
            FunctionSignature::new("getVersion", "std::string").at("include/Core/Config.hpp"),
        );
        let gen = FunctionGenerator::new(&Sol3Flavour);
        assert_eq!(gen.callable("obe::getVersion", &function), "&obe::getVersion");
        assert_eq!(gen.object_name(&function).unwrap(), "FunctionGetVersion");
    }

    #[test]
    fn test_single_overload_collapses_to_cast() {
        let function = FunctionEntity::FunctionOverload(OverloadSet {
            name: "len".into(),
            overloads: vec![FunctionSignature::new("len", "float").param(Parameter::new("v", "Vec"))],
            flags: EntityFlags::default(),
        });
        let gen = FunctionGenerator::new(&Sol3Flavour);
        assert_eq!(
            gen.callable("m::len", &function),
            "static_cast<float (*)(Vec)>(&m::len)"
        );
    }

    #[test]
    fn test_operator_object_name() {
        let function = FunctionEntity::Function(
            FunctionSignature::new("operator+", "Vector2")
                .param(Parameter::new("a", "const Vector2&"))
                .param(Parameter::new("b", "const Vector2&"))
                .at("include/Core/Vector2.hpp"),
        );
        let gen = FunctionGenerator::new(&Sol3Flavour);
        assert_eq!(gen.object_name(&function).unwrap(), "OperatorVector2AddVector2");
    }

    #[test]
    fn test_overload_includes_each_location() {
        let function = FunctionEntity::FunctionOverload(OverloadSet {
            name: "load".into(),
            overloads: vec![
                FunctionSignature::new("load", "void").at("include/Core/A.hpp"),
                FunctionSignature::new("load", "void")
                    .param(Parameter::new("p", "int"))
                    .at("include/Core/B.hpp"),
            ],
            flags: EntityFlags::default(),
        });
        let mut functions = IndexMap::new();
        functions.insert("ns::load".to_string(), function);
        let set = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap();
        assert_eq!(set.includes, vec!["Core/A.hpp", "Core/B.hpp"]);
    }

    #[test]
    fn test_nobind_overload_is_left_out() {
        let mut secret = FunctionSignature::new("load", "void")
            .param(Parameter::new("s", "Secret"))
            .at("include/Core/B.hpp");
        secret.flags.nobind = true;
        let function = FunctionEntity::FunctionOverload(OverloadSet {
            name: "load".into(),
            overloads: vec![
                FunctionSignature::new("load", "void")
                    .param(Parameter::new("v", "int"))
                    .at("include/Core/A.hpp"),
                secret.clone(),
            ],
            flags: EntityFlags::default(),
        });
        let mut functions = IndexMap::new();
        functions.insert("ns::load".to_string(), function);
        let set = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap();
        assert_eq!(set.includes, vec!["Core/A.hpp"]);
        assert!(!set.bodies[0].contains("Secret"));
        assert!(set.bodies[0]
            .contains("nsNamespace.set_function(\"load\", static_cast<void (*)(int)>(&ns::load));"));

        let mut functions = IndexMap::new();
        functions.insert(
            "ns::load".to_string(),
            FunctionEntity::FunctionOverload(OverloadSet {
                name: "load".into(),
                overloads: vec![secret],
                flags: EntityFlags::default(),
            }),
        );
        let set = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_nobind_function_is_skipped() {
        let mut signature = FunctionSignature::new("hidden", "void").at("include/x.hpp");
        signature.flags.nobind = true;
        let mut functions = IndexMap::new();
        functions.insert("ns::hidden".to_string(), FunctionEntity::Function(signature));
        let set = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_operator_names_entity() {
        let function = FunctionEntity::Function(
            FunctionSignature::new("operator@", "void")
                .param(Parameter::new("a", "A"))
                .at("include/x.hpp"),
        );
        let mut functions = IndexMap::new();
        functions.insert("ns::operator@".to_string(), function);
        let err = FunctionGenerator::new(&Sol3Flavour).generate(&functions).unwrap_err();
        match err {
            BindError::UnsupportedConstruct { entity, .. } => assert_eq!(entity, "ns::operator@"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
