//! Generator configuration
//!
//! Everything a run needs to know about its environment lives here and is
//! passed explicitly to [`crate::build::BindingsGenerator`].

use crate::codegen::unit::BINDINGS_DIR;
use crate::error::{BindError, BindResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the output root
pub const OUTPUT_ENV: &str = "CPPBIND_OUTPUT";

/// Name of the generated index source
pub const INDEX_FILE: &str = "index.cpp";

/// Configuration of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    /// Root of the generated tree (`<root>/include`, `<root>/src`)
    pub output_root: Option<PathBuf>,
    /// Module directory under `include/` and `src/`
    pub module: String,
    /// C++ namespace holding `IndexAllBindings`
    pub index_namespace: String,
    /// Name of the root table of the bindings tree
    pub tree_name: String,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            module: "Core".to_string(),
            index_namespace: "obe::Bindings".to_string(),
            tree_name: "ObEngine".to_string(),
        }
    }
}

impl BindingsConfig {
    /// Create a configuration writing under `output_root`
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: Some(output_root.into()),
            ..Self::default()
        }
    }

    /// Default configuration with the output root taken from `CPPBIND_OUTPUT`
    pub fn from_env() -> BindResult<Self> {
        let config = Self::default().overlay_env();
        config.output_root()?;
        Ok(config)
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(source: &str) -> BindResult<Self> {
        toml::from_str(source).map_err(|e| BindError::config(e.to_string()))
    }

    /// Read a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> BindResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| BindError::io(path, e))?;
        toml::from_str(&source)
            .map_err(|e| BindError::config(format!("{}: {}", path.display(), e)))
    }

    /// Let `CPPBIND_OUTPUT` override the output root, when set
    pub fn overlay_env(self) -> Self {
        self.with_env_output(env::var(OUTPUT_ENV).ok())
    }

    fn with_env_output(mut self, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.output_root = Some(PathBuf::from(value));
        }
        self
    }

    /// Set the output root
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output_root.into());
        self
    }

    /// Set the module directory
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Set the namespace of the index routine
    pub fn with_index_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.index_namespace = namespace.into();
        self
    }

    /// Set the root table name
    pub fn with_tree_name(mut self, name: impl Into<String>) -> Self {
        self.tree_name = name.into();
        self
    }

    /// Output root, or an error naming the variable that should provide it
    pub fn output_root(&self) -> BindResult<&Path> {
        self.output_root
            .as_deref()
            .ok_or_else(|| BindError::EnvVarMissing(OUTPUT_ENV.to_string()))
    }

    /// Root that generated headers are included from (`<root>/include/<module>`)
    pub fn include_root(&self) -> BindResult<PathBuf> {
        Ok(self.output_root()?.join("include").join(&self.module))
    }

    /// Root of generated sources (`<root>/src/<module>`)
    pub fn source_root(&self) -> BindResult<PathBuf> {
        Ok(self.output_root()?.join("src").join(&self.module))
    }

    /// Directory walked to discover generated headers
    pub fn header_dir(&self) -> BindResult<PathBuf> {
        Ok(self.include_root()?.join(BINDINGS_DIR))
    }

    /// Path of the generated index source
    pub fn index_path(&self) -> BindResult<PathBuf> {
        Ok(self.source_root()?.join(BINDINGS_DIR).join(INDEX_FILE))
    }
}
