//! Code generation for scripting bindings
//!
//! This module provides:
//! - The runtime adapter trait (`Flavour`) and its sol3 implementation
//! - Operator classification and overload/default-argument expansion
//! - Per-entity emitters (classes, enums, functions, globals)
//! - Per-namespace unit rendering and the bindings index

pub mod binding;
pub mod classes;
pub mod enums;
pub mod flavour;
pub mod functions;
pub mod globals;
pub mod index;
pub mod operators;
pub mod overloads;
pub mod unit;

pub use binding::BindingSet;
pub use classes::ClassGenerator;
pub use enums::EnumGenerator;
pub use flavour::{Flavour, Sol3Flavour};
pub use functions::FunctionGenerator;
pub use globals::GlobalGenerator;
pub use index::{repair_tables, BindingsIndex, PathTrie};
pub use operators::{classify, OperatorKind};
pub use overloads::{
    call_shapes, expand_signature, signature_candidates, CallCandidate, CallShape, CallTarget,
};
pub use unit::{NamespaceUnit, UnitGenerator};
