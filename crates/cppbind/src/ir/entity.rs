//! Entity records read from the documentation database
//!
//! These structures mirror what the upstream documentation extractor emits.
//! They are immutable inputs: the generator reads them and never writes back.

use crate::error::{BindError, BindResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Export flags attached to any entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EntityFlags {
    /// Entity must not be bound
    pub nobind: bool,
}

/// A single parameter of a callable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    #[serde(default)]
    pub name: String,
    /// Declared type, verbatim
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Default value expression, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parameter {
    /// Create a mandatory parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    /// Give the parameter a default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Whether the parameter can be omitted at the call site
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// `type name` declaration
    pub fn declaration(&self) -> String {
        format!("{} {}", self.ty, self.name)
    }
}

/// One concrete callable signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Short name (`Add`, `operator+`)
    #[serde(default)]
    pub name: String,
    /// Declared return type
    #[serde(default)]
    pub return_type: String,
    /// Ordered parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Trailing qualifiers (`const`, `noexcept`, `&`)
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Source location of the declaration
    #[serde(default)]
    pub location: String,
    /// Static member function
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

impl FunctionSignature {
    /// Create a signature returning `return_type`
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            qualifiers: Vec::new(),
            location: String::new(),
            is_static: false,
            flags: EntityFlags::default(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Add a qualifier
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    /// Set the source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Mark as static member
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Number of leading parameters without a default value
    pub fn mandatory_count(&self) -> usize {
        self.parameters
            .iter()
            .take_while(|p| !p.has_default())
            .count()
    }

    /// Whether any parameter has a default value
    pub fn has_defaults(&self) -> bool {
        self.parameters.iter().any(Parameter::has_default)
    }

    /// Comma separated parameter types
    pub fn parameter_types(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the fields emitters depend on
    pub fn validate(&self, entity: &str, needs_return: bool) -> BindResult<()> {
        if self.name.is_empty() {
            return Err(BindError::malformed(entity, "signature has no name"));
        }
        if needs_return && self.return_type.trim().is_empty() {
            return Err(BindError::malformed(entity, "signature has no return type"));
        }
        for (index, param) in self.parameters.iter().enumerate() {
            if param.ty.trim().is_empty() {
                return Err(BindError::malformed(
                    entity,
                    format!("parameter #{} has no type", index),
                ));
            }
            if param.name.trim().is_empty() {
                return Err(BindError::malformed(
                    entity,
                    format!("parameter #{} has no name", index),
                ));
            }
        }
        let mandatory = self.mandatory_count();
        if let Some(param) = self.parameters[mandatory..]
            .iter()
            .find(|p| !p.has_default())
        {
            return Err(BindError::malformed(
                entity,
                format!(
                    "parameter {} has no default value but follows a defaulted parameter",
                    param.name
                ),
            ));
        }
        Ok(())
    }
}

/// A named set of overloads sharing one visible name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverloadSet {
    /// Short name shared by every overload
    #[serde(default)]
    pub name: String,
    /// Overloads, in declaration order
    #[serde(default)]
    pub overloads: Vec<FunctionSignature>,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

/// A free function or method as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FunctionEntity {
    /// Single declaration
    Function(FunctionSignature),
    /// Several declarations with the same name
    FunctionOverload(OverloadSet),
}

impl FunctionEntity {
    /// Short name of the callable
    pub fn name(&self) -> &str {
        match self {
            FunctionEntity::Function(signature) => &signature.name,
            FunctionEntity::FunctionOverload(set) => &set.name,
        }
    }

    /// Export flags
    pub fn flags(&self) -> &EntityFlags {
        match self {
            FunctionEntity::Function(signature) => &signature.flags,
            FunctionEntity::FunctionOverload(set) => &set.flags,
        }
    }

    /// Every physical signature
    pub fn signatures(&self) -> &[FunctionSignature] {
        match self {
            FunctionEntity::Function(signature) => std::slice::from_ref(signature),
            FunctionEntity::FunctionOverload(set) => &set.overloads,
        }
    }

    /// Signatures not flagged `nobind`
    pub fn bound_signatures(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures().iter().filter(|signature| !signature.flags.nobind)
    }

    /// Whether the callable produces a binding at all
    pub fn is_bindable(&self) -> bool {
        !self.flags().nobind && self.bound_signatures().next().is_some()
    }

    /// Bound signature used where one representative is needed
    pub fn first_signature(&self) -> Option<&FunctionSignature> {
        self.bound_signatures().next()
    }

    /// Whether this is an overload set
    pub fn is_overload_set(&self) -> bool {
        matches!(self, FunctionEntity::FunctionOverload(_))
    }

    /// Check the entity and each of its signatures
    pub fn validate(&self, entity: &str) -> BindResult<()> {
        if self.name().is_empty() {
            return Err(BindError::malformed(entity, "function has no name"));
        }
        if let FunctionEntity::FunctionOverload(set) = self {
            if set.overloads.is_empty() {
                return Err(BindError::malformed(entity, "overload set is empty"));
            }
        }
        for signature in self.bound_signatures() {
            signature.validate(entity, true)?;
        }
        Ok(())
    }
}

/// A namespace-scope variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEntity {
    /// Short name
    #[serde(default)]
    pub name: String,
    /// Declared type
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Initializer expression, if documented
    #[serde(default)]
    pub initializer: String,
    /// Source location
    #[serde(default)]
    pub location: String,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

impl GlobalEntity {
    /// Create a global
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            initializer: String::new(),
            location: String::new(),
            flags: EntityFlags::default(),
        }
    }

    /// Set the source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Whether the declared type carries a `const` token
    pub fn is_const(&self) -> bool {
        self.ty.split_whitespace().any(|token| token == "const" || token == "constexpr")
    }
}

/// One enumerator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Enumerator name
    pub name: String,
    /// Documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntity {
    /// Short name
    #[serde(default)]
    pub name: String,
    /// Enumerators, in declaration order
    #[serde(default)]
    pub values: Vec<EnumValue>,
    /// Source location
    #[serde(default)]
    pub location: String,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

/// Data member of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntity {
    /// Member name
    #[serde(default)]
    pub name: String,
    /// Declared type
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Static data member
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

/// A class or struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Short name
    #[serde(default)]
    pub name: String,
    /// Qualified base classes
    #[serde(default)]
    pub bases: Vec<String>,
    /// Class cannot be instantiated
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Constructors, in declaration order
    #[serde(default)]
    pub constructors: Vec<FunctionSignature>,
    /// Methods keyed by short name
    #[serde(default)]
    pub methods: IndexMap<String, FunctionEntity>,
    /// Data members keyed by name
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeEntity>,
    /// Source location
    #[serde(default)]
    pub location: String,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}

impl ClassEntity {
    /// Create an empty class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            is_abstract: false,
            constructors: Vec::new(),
            methods: IndexMap::new(),
            attributes: IndexMap::new(),
            location: String::new(),
            flags: EntityFlags::default(),
        }
    }
}

/// A type alias. Typedefs are grouped with their namespace but not bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefEntity {
    /// Short name
    #[serde(default)]
    pub name: String,
    /// Aliased type
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Source location
    #[serde(default)]
    pub location: String,
    /// Export flags
    #[serde(default)]
    pub flags: EntityFlags,
}
