//! Overload and default-argument expansion
//!
//! Scripting runtimes have no notion of C++ default arguments. A declaration
//! with `n` trailing defaulted parameters is exposed through `n + 1`
//! fixed-arity call shapes, each forwarding to the original declaration.
//! Overloads without defaults are disambiguated by an explicit cast instead.

use crate::ir::{FunctionEntity, FunctionSignature, Parameter};

/// What a candidate ends up calling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'a> {
    /// Namespace-scope function or static member (`ns::f`, `ns::C::f`)
    Free { qualified_name: &'a str },
    /// Non-static member function of `class`
    Member { class: &'a str, method: &'a str },
}

impl CallTarget<'_> {
    /// Address-of expression for the target
    pub fn address(&self) -> String {
        match self {
            CallTarget::Free { qualified_name } => format!("&{}", qualified_name),
            CallTarget::Member { class, method } => format!("&{}::{}", class, method),
        }
    }

    /// Target for one signature of a class member.
    ///
    /// Static members are called like free functions through `qualified`.
    pub fn for_method<'a>(
        class: &'a str,
        method: &'a str,
        qualified: &'a str,
        signature: &FunctionSignature,
    ) -> CallTarget<'a> {
        if signature.is_static {
            CallTarget::Free {
                qualified_name: qualified,
            }
        } else {
            CallTarget::Member { class, method }
        }
    }
}

/// One fixed-arity parameter list derived from a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape<'a> {
    /// Leading parameters of the signature included in this shape
    pub parameters: &'a [Parameter],
}

impl CallShape<'_> {
    /// Number of parameters in the shape
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// `T a, U b`
    pub fn declarations(&self) -> String {
        self.parameters
            .iter()
            .map(Parameter::declaration)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `T, U`
    pub fn types(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `a, b`
    pub fn names(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Every call shape of a signature.
///
/// The first shape is the mandatory prefix; each following shape adds one
/// more defaulted parameter, ending with the full list.
pub fn call_shapes(signature: &FunctionSignature) -> Vec<CallShape<'_>> {
    let mandatory = signature.mandatory_count();
    (mandatory..=signature.parameters.len())
        .map(|len| CallShape {
            parameters: &signature.parameters[..len],
        })
        .collect()
}

/// How a candidate reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateForm {
    /// Explicitly typed function pointer
    Cast,
    /// Forwarding lambda for one call shape
    Wrapper,
}

/// One callable in the overload list bound to a scripting-visible name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallCandidate {
    pub form: CandidateForm,
    /// Parameters accepted, excluding the receiver of member wrappers
    pub arity: usize,
    /// C++ expression
    pub code: String,
}

/// `static_cast<R (*)(T, U) q>(&f)` selecting one overload
pub fn render_cast(target: CallTarget<'_>, signature: &FunctionSignature) -> String {
    let pointer = match target {
        CallTarget::Free { .. } => "(*)".to_string(),
        CallTarget::Member { class, .. } => format!("({}::*)", class),
    };
    let qualifiers = if signature.qualifiers.is_empty() {
        String::new()
    } else {
        format!(" {}", signature.qualifiers.join(" "))
    };
    format!(
        "static_cast<{} {}({}){}>({})",
        signature.return_type,
        pointer,
        signature.parameter_types(),
        qualifiers,
        target.address()
    )
}

/// Forwarding lambda calling the target with exactly the shape's parameters
pub fn render_wrapper(
    target: CallTarget<'_>,
    signature: &FunctionSignature,
    shape: &CallShape<'_>,
) -> String {
    match target {
        CallTarget::Free { qualified_name } => format!(
            "[]({}) -> {} {{ return {}({}); }}",
            shape.declarations(),
            signature.return_type,
            qualified_name,
            shape.names()
        ),
        CallTarget::Member { class, method } => {
            let receiver = if signature.qualifiers.iter().any(|q| q == "const") {
                format!("const {}& self", class)
            } else {
                format!("{}& self", class)
            };
            let params = if shape.parameters.is_empty() {
                receiver
            } else {
                format!("{}, {}", receiver, shape.declarations())
            };
            format!(
                "[]({}) -> {} {{ return self.{}({}); }}",
                params,
                signature.return_type,
                method,
                shape.names()
            )
        }
    }
}

/// Candidates covering every call shape of one signature.
///
/// A signature without defaults yields a single cast; otherwise one wrapper
/// per call shape.
pub fn expand_signature(
    target: CallTarget<'_>,
    signature: &FunctionSignature,
) -> Vec<CallCandidate> {
    if !signature.has_defaults() {
        return vec![CallCandidate {
            form: CandidateForm::Cast,
            arity: signature.parameters.len(),
            code: render_cast(target, signature),
        }];
    }

    call_shapes(signature)
        .iter()
        .map(|shape| CallCandidate {
            form: CandidateForm::Wrapper,
            arity: shape.arity(),
            code: render_wrapper(target, signature, shape),
        })
        .collect()
}

/// Concatenated candidates of every bound overload of a callable.
///
/// Overloads flagged `nobind` contribute nothing.
pub fn overload_candidates<'a, 't, F>(entity: &'a FunctionEntity, target_for: F) -> Vec<CallCandidate>
where
    F: Fn(&'a FunctionSignature) -> CallTarget<'t>,
{
    signature_candidates(entity.bound_signatures(), target_for)
}

/// Concatenated candidates of the given signatures, in order
pub fn signature_candidates<'a, 't, I, F>(signatures: I, target_for: F) -> Vec<CallCandidate>
where
    I: IntoIterator<Item = &'a FunctionSignature>,
    F: Fn(&'a FunctionSignature) -> CallTarget<'t>,
{
    signatures
        .into_iter()
        .flat_map(|signature| expand_signature(target_for(signature), signature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::OverloadSet;

    fn free(name: &str) -> CallTarget<'_> {
        CallTarget::Free {
            qualified_name: name,
        }
    }

    fn two_plus_three() -> FunctionSignature {
        FunctionSignature::new("draw", "void")
            .param(Parameter::new("x", "int"))
            .param(Parameter::new("y", "int"))
            .param(Parameter::new("w", "int").with_default("1"))
            .param(Parameter::new("h", "int").with_default("1"))
            .param(Parameter::new("color", "const Color&").with_default("Color::White"))
    }

    #[test]
    fn test_call_shapes_cover_every_default() {
        let signature = two_plus_three();
        let shapes = call_shapes(&signature);
        let arities: Vec<usize> = shapes.iter().map(CallShape::arity).collect();
        assert_eq!(arities, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_expand_with_defaults_yields_wrappers() {
        let signature = two_plus_three();
        let candidates = expand_signature(free("gfx::draw"), &signature);
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.form == CandidateForm::Wrapper));
        assert_eq!(
            candidates[0].code,
            "[](int x, int y) -> void { return gfx::draw(x, y); }"
        );
        assert_eq!(
            candidates[3].code,
            "[](int x, int y, int w, int h, const Color& color) -> void { return gfx::draw(x, y, w, h, color); }"
        );
    }

    #[test]
    fn test_expand_without_defaults_yields_single_cast() {
        let signature = FunctionSignature::new("len", "float").param(Parameter::new("v", "Vector2"));
        let candidates = expand_signature(free("math::len"), &signature);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].form, CandidateForm::Cast);
        assert_eq!(candidates[0].code, "static_cast<float (*)(Vector2)>(&math::len)");
    }

    #[test]
    fn test_member_cast_and_wrapper() {
        let getter = FunctionSignature::new("get", "int")
            .param(Parameter::new("index", "int").with_default("0"))
            .qualifier("const");
        let target = CallTarget::Member {
            class: "ns::List",
            method: "get",
        };
        let candidates = expand_signature(target, &getter);
        assert_eq!(
            candidates[0].code,
            "[](const ns::List& self) -> int { return self.get(); }"
        );
        assert_eq!(
            candidates[1].code,
            "[](const ns::List& self, int index) -> int { return self.get(index); }"
        );

        let plain = FunctionSignature::new("size", "int").qualifier("const");
        assert_eq!(
            render_cast(target, &plain),
            "static_cast<int (ns::List::*)() const>(&ns::List::get)"
        );
    }

    #[test]
    fn test_nobind_overload_yields_no_candidate() {
        let mut hidden = FunctionSignature::new("load", "void").param(Parameter::new("s", "Secret"));
        hidden.flags.nobind = true;
        let entity = FunctionEntity::FunctionOverload(OverloadSet {
            name: "load".into(),
            overloads: vec![
                FunctionSignature::new("load", "void").param(Parameter::new("v", "int")),
                hidden,
            ],
            flags: Default::default(),
        });
        let candidates = overload_candidates(&entity, |_| free("ns::load"));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].code, "static_cast<void (*)(int)>(&ns::load)");
    }

    #[test]
    fn test_overload_set_concatenates_candidates() {
        let entity = FunctionEntity::FunctionOverload(OverloadSet {
            name: "clamp".into(),
            overloads: vec![
                FunctionSignature::new("clamp", "int")
                    .param(Parameter::new("v", "int"))
                    .param(Parameter::new("lo", "int"))
                    .param(Parameter::new("hi", "int")),
                FunctionSignature::new("clamp", "float")
                    .param(Parameter::new("v", "float"))
                    .param(Parameter::new("lo", "float").with_default("0.f")),
            ],
            flags: Default::default(),
        });
        let candidates = overload_candidates(&entity, |_| free("math::clamp"));
        let forms: Vec<(CandidateForm, usize)> =
            candidates.iter().map(|c| (c.form, c.arity)).collect();
        assert_eq!(
            forms,
            vec![
                (CandidateForm::Cast, 3),
                (CandidateForm::Wrapper, 1),
                (CandidateForm::Wrapper, 2),
            ]
        );
    }
}
