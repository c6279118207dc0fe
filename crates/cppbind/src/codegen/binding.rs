//! Output of the per-entity emitters

use crate::codegen::Flavour;
use crate::ir::names::include_path;

/// Generated objects of one emitter run
///
/// The three lists are produced together but kept apart because they end up
/// in different places: includes and bodies in the source unit, object
/// identifiers in the header and the bindings index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingSet {
    /// Include paths required by the bodies, in emission order
    pub includes: Vec<String>,
    /// Generated object identifiers (`FunctionAdd`, `GlobalPi`)
    pub objects: Vec<String>,
    /// Loader function definitions
    pub bodies: Vec<String>,
}

impl BindingSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one generated object
    pub fn push(&mut self, object: String, body: String) {
        self.objects.push(object);
        self.bodies.push(body);
    }

    /// Record the include for a declaration location
    pub fn include_location(&mut self, location: &str) {
        self.includes.push(include_path(location));
    }

    /// Append another set
    pub fn extend(&mut self, other: BindingSet) {
        self.includes.extend(other.includes);
        self.objects.extend(other.objects);
        self.bodies.extend(other.bodies);
    }

    /// Whether nothing was generated
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Name of the loader function of a generated object
pub fn loader_name(object: &str) -> String {
    format!("Load{}", object)
}

/// Signature of the loader function of a generated object
pub fn loader_signature(flavour: &dyn Flavour, object: &str) -> String {
    format!("void {}({} state)", loader_name(object), flavour.state_view())
}

/// Full loader function definition
pub fn loader_function(flavour: &dyn Flavour, object: &str, statements: &[String]) -> String {
    format!(
        "{}\n{{\n{}\n}}",
        loader_signature(flavour, object),
        statements.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Sol3Flavour;

    #[test]
    fn test_loader_function() {
        let body = loader_function(
            &Sol3Flavour,
            "FunctionAdd",
            &["a;".to_string(), "b;".to_string()],
        );
        assert_eq!(body, "void LoadFunctionAdd(sol::state_view state)\n{\na;\nb;\n}");
    }

    #[test]
    fn test_binding_set_extend() {
        let mut first = BindingSet::new();
        first.push("FunctionA".into(), "body".into());
        first.include_location("include/Core/A.hpp");

        let mut second = BindingSet::new();
        second.push("GlobalB".into(), "body".into());

        first.extend(second);
        assert_eq!(first.objects, vec!["FunctionA", "GlobalB"]);
        assert_eq!(first.includes, vec!["Core/A.hpp"]);
        assert!(!first.is_empty());
    }
}
