//! Class binding emitter
//!
//! Registers a user type with its constructors, bases, methods, attributes
//! and operator meta-functions. Constructors with default arguments are
//! expanded into one constructor signature per call shape; methods go
//! through the same overload expander as free functions.

use crate::codegen::binding::{loader_function, BindingSet};
use crate::codegen::operators::{member_operator_identifier, operator_token};
use crate::codegen::overloads::{call_shapes, signature_candidates, CallTarget};
use crate::codegen::Flavour;
use crate::error::{BindError, BindResult};
use crate::ir::names::{clean_capitalize, namespace_segments, parent_namespace};
use crate::ir::{ClassEntity, FunctionEntity, FunctionSignature};
use indexmap::IndexMap;

/// Generator for class bindings
pub struct ClassGenerator<'a> {
    flavour: &'a dyn Flavour,
}

impl<'a> ClassGenerator<'a> {
    /// Create a new class generator
    pub fn new(flavour: &'a dyn Flavour) -> Self {
        Self { flavour }
    }

    /// Generate bindings for every class of a namespace
    pub fn generate(&self, classes: &IndexMap<String, ClassEntity>) -> BindResult<BindingSet> {
        let mut set = BindingSet::new();

        for (qualified_name, class) in classes {
            if class.flags.nobind {
                tracing::debug!("Skipping class {} (nobind)", qualified_name);
                continue;
            }
            tracing::debug!("Generating bindings for class {}", qualified_name);

            let object = format!("Class{}", clean_capitalize(&class.name));
            set.include_location(&class.location);

            let statements = self.statements(qualified_name, class)?;
            let body = loader_function(self.flavour, &object, &statements);
            set.push(object, body);
        }

        Ok(set)
    }

    fn statements(&self, qualified_name: &str, class: &ClassEntity) -> BindResult<Vec<String>> {
        let segments = namespace_segments(parent_namespace(qualified_name));
        let table = self.flavour.table_variable(&segments);
        let usertype = self.flavour.usertype_variable(&clean_capitalize(&class.name));

        let mut statements = vec![
            self.flavour.fetch_table(&segments),
            self.flavour.new_usertype(
                &table,
                &usertype,
                &class.name,
                qualified_name,
                &self.constructors(qualified_name, class),
                &class.bases,
            ),
        ];

        for (key, method) in &class.methods {
            if !method.is_bindable() {
                tracing::debug!("Skipping method {}::{} (nobind)", qualified_name, key);
                continue;
            }
            let method_path = format!("{}::{}", qualified_name, method.name());

            match operator_token(method.name()) {
                Some(token) => statements.extend(self.operator_statements(
                    qualified_name,
                    &usertype,
                    &method_path,
                    token,
                    method,
                )?),
                None => {
                    let callable = self.method_callable(qualified_name, &method_path, method);
                    statements.push(self.flavour.bind_member(&usertype, method.name(), &callable))
                }
            }
        }

        for (key, attribute) in &class.attributes {
            if attribute.flags.nobind {
                tracing::debug!("Skipping attribute {}::{} (nobind)", qualified_name, key);
                continue;
            }
            statements.push(self.flavour.bind_member(
                &usertype,
                &attribute.name,
                &format!("&{}::{}", qualified_name, attribute.name),
            ));
        }

        Ok(statements)
    }

    /// Constructor signatures, one per call shape of each constructor
    fn constructors(&self, qualified_name: &str, class: &ClassEntity) -> Vec<String> {
        if class.is_abstract {
            return Vec::new();
        }
        let mut signatures: Vec<String> = Vec::new();
        for constructor in &class.constructors {
            if constructor.flags.nobind {
                continue;
            }
            for shape in call_shapes(constructor) {
                let signature = format!("{}({})", qualified_name, shape.types());
                if !signatures.contains(&signature) {
                    signatures.push(signature);
                }
            }
        }
        signatures
    }

    fn method_callable(&self, class: &str, method_path: &str, method: &FunctionEntity) -> String {
        let signatures: Vec<&FunctionSignature> = method.bound_signatures().collect();
        self.callable_for(class, method_path, method, &signatures)
    }

    /// Meta-function bindings of an operator method.
    ///
    /// Overloads are split by the meta-function they land on, so the unary
    /// and binary forms of `-` end up under different keys.
    fn operator_statements(
        &self,
        class: &str,
        usertype: &str,
        method_path: &str,
        token: &str,
        method: &FunctionEntity,
    ) -> BindResult<Vec<String>> {
        let mut by_meta: IndexMap<String, Vec<&FunctionSignature>> = IndexMap::new();
        for signature in method.bound_signatures() {
            let unary = !signature.is_static && signature.parameters.is_empty();
            let identifier = member_operator_identifier(token, unary)
                .map_err(|e| e.in_entity(method_path))?;
            match self.flavour.meta_function(identifier) {
                Some(meta) => by_meta.entry(meta).or_default().push(signature),
                None if self.flavour.derives_operator(identifier) => {
                    tracing::debug!(
                        "Skipping {} ({} is provided by the runtime)",
                        method_path,
                        identifier
                    );
                }
                None => {
                    return Err(BindError::unsupported(
                        method_path,
                        format!("operator {} has no runtime meta-function", identifier),
                    ))
                }
            }
        }

        Ok(by_meta
            .iter()
            .map(|(meta, signatures)| {
                let callable = self.callable_for(class, method_path, method, signatures);
                self.flavour.bind_meta_function(usertype, meta, &callable)
            })
            .collect())
    }

    /// Bound expression for some signatures of a method.
    ///
    /// Only a lone, non-overloaded declaration without defaults can be bound
    /// by plain address; anything else needs casts or shape wrappers.
    fn callable_for(
        &self,
        class: &str,
        method_path: &str,
        method: &FunctionEntity,
        signatures: &[&FunctionSignature],
    ) -> String {
        if let (FunctionEntity::Function(_), [signature]) = (method, signatures) {
            if !signature.has_defaults() {
                return format!("&{}", method_path);
            }
        }

        let name = method.name();
        let candidates = signature_candidates(signatures.iter().copied(), |signature| {
            CallTarget::for_method(class, name, method_path, signature)
        });
        match candidates.as_slice() {
            [single] => single.code.clone(),
            _ => {
                let codes: Vec<String> = candidates.into_iter().map(|c| c.code).collect();
                self.flavour.overload(&codes)
            }
        }
    }
}
