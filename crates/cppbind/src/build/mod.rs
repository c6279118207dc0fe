//! Build pipeline for binding generation
//!
//! This module provides:
//! - `BindingsConfig`, the explicit configuration of a run
//! - `BindingsGenerator`, which writes units and the bindings index

pub mod config;
pub mod generator;

pub use config::{BindingsConfig, INDEX_FILE, OUTPUT_ENV};
pub use generator::{BindingsGenerator, GenerationReport};
