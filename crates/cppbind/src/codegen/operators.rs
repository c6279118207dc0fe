//! Operator classification
//!
//! Maps `operator<token>` names onto identifier-safe names built from the
//! operand types, e.g. `operator+(Vector2, Vector2)` -> `Vector2AddVector2`.

use crate::error::{BindError, BindResult};
use crate::ir::names::{capitalize_words, clean_capitalize, normalize_cpp_type};
use crate::ir::Parameter;
use std::fmt;

/// Closed table of supported operator tokens
const OPERATOR_TABLE: &[(&str, &str)] = &[
    ("++", "increment"),
    ("--", "decrement"),
    ("+", "add"),
    ("-", "subtract"),
    ("*", "multiply"),
    ("/", "divide"),
    ("!", "negate"),
    ("~", "complement"),
    ("%", "modulus"),
    ("==", "equal"),
    ("!=", "not_equal"),
    (">", "greater"),
    ("<", "less"),
    (">=", "greater_equal"),
    ("<=", "less_equal"),
    ("<=>", "three_way_comparison"),
    ("&&", "logical_and"),
    ("||", "logical_or"),
    ("&", "bitwise_and"),
    ("|", "bitwise_or"),
    ("^", "bitwise_xor"),
    ("<<", "left_shift"),
    (">>", "right_shift"),
    ("+=", "add_assign"),
    ("-=", "subtract_assign"),
    ("*=", "multiply_assign"),
    ("/=", "divide_assign"),
    ("%=", "modulus_assign"),
    (">>=", "right_shift_assign"),
    ("<<=", "left_shift_assign"),
    ("&=", "bitwise_and_assign"),
    ("|=", "bitwise_or_assign"),
    ("^=", "bitwise_xor_assign"),
    ("=", "assign"),
    ("[]", "subscript"),
    ("()", "call"),
    ("->", "member_access"),
    (",", "comma"),
    ("->*", "indirection_structure_dereference"),
    ("new", "allocate"),
    ("delete", "deallocate"),
    ("new[]", "allocate_array"),
    ("delete[]", "deallocate_array"),
];

/// What a callable name designates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Plain named function
    Function,
    /// Overloaded operator
    Operator,
}

impl OperatorKind {
    /// Prefix used for generated object identifiers
    pub fn prefix(&self) -> &'static str {
        match self {
            OperatorKind::Function => "Function",
            OperatorKind::Operator => "Operator",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Extract the operator token from a callable name (`operator+=` -> `+=`).
///
/// Identifiers that merely start with `operator` (`operator_count`) are not
/// operators; the allocation keywords are.
pub fn operator_token(name: &str) -> Option<&str> {
    let token = name.strip_prefix("operator")?.trim();
    if token.is_empty() {
        return None;
    }
    let keyword = token.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');
    if keyword && !matches!(token, "new" | "delete" | "new[]" | "delete[]") {
        return None;
    }
    Some(token)
}

/// Canonical lowercase identifier of an operator token
pub fn operator_identifier(token: &str) -> BindResult<&'static str> {
    OPERATOR_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == token)
        .map(|(_, identifier)| *identifier)
        .ok_or_else(|| {
            BindError::unsupported(
                format!("operator{}", token),
                "operator token has no binding name",
            )
        })
}

/// Identifier of a member operator, accounting for its operand count.
///
/// A non-static member taking no parameter only operates on its receiver,
/// so `-` and `+` are the sign operators rather than the binary ones.
pub fn member_operator_identifier(token: &str, unary: bool) -> BindResult<&'static str> {
    match (token, unary) {
        ("-", true) => Ok("unary_minus"),
        ("+", true) => Ok("unary_plus"),
        _ => operator_identifier(token),
    }
}

/// Classify a callable name and derive its display identifier.
///
/// Non-operator names come back unchanged. For operators the identifier is
/// composed from the first parameter type, the operator words and the second
/// parameter type when present. `parameters` is the parameter list of the
/// callable, or of its first overload for overload sets.
pub fn classify(name: &str, parameters: &[Parameter]) -> BindResult<(OperatorKind, String)> {
    let Some(token) = operator_token(name) else {
        return Ok((OperatorKind::Function, name.to_string()));
    };

    let identifier = operator_identifier(token)?;
    let Some(first) = parameters.first() else {
        return Err(BindError::unsupported(
            name,
            "free operator without operands",
        ));
    };

    let mut composed = clean_capitalize(&normalize_cpp_type(&first.ty)?);
    composed.push_str(&capitalize_words(identifier));
    if let Some(second) = parameters.get(1) {
        composed.push_str(&clean_capitalize(&normalize_cpp_type(&second.ty)?));
    }

    Ok((OperatorKind::Operator, composed))
}
