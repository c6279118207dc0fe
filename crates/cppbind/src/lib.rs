//! cppbind: scripting binding generator for documented C++ APIs
//!
//! This crate turns a documentation database describing a C++ library
//! (classes, functions, globals, enums, typedefs) into C++ translation units
//! that register that API inside an embedded scripting runtime.
//!
//! # Architecture
//!
//! - `ir`: Entity model, documentation database and name helpers
//! - `codegen`: Binding emitters, overload expansion and the bindings index
//! - `build`: Configuration and the file-writing pipeline
//!
//! # Usage
//!
//! ```rust,ignore
//! use cppbind::build::{BindingsConfig, BindingsGenerator};
//! use cppbind::ir::CppDatabase;
//!
//! let db = CppDatabase::from_json_file("doc_db.json")?;
//! let config = BindingsConfig::from_env()?;
//! BindingsGenerator::new(config).generate(&db)?;
//! ```

pub mod build;
pub mod codegen;
pub mod error;
pub mod ir;

// Re-export commonly used types
pub use build::{BindingsConfig, BindingsGenerator, GenerationReport};
pub use codegen::{
    BindingSet, BindingsIndex, CallCandidate, CallShape, Flavour, OperatorKind, PathTrie,
    Sol3Flavour,
};
pub use error::{BindError, BindResult};
pub use ir::{
    ClassEntity, CppDatabase, EntityFlags, EnumEntity, FunctionEntity, FunctionSignature,
    GlobalEntity, NamespaceGroup, Parameter, TypedefEntity,
};
