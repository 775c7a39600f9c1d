//! Reading and writing C++ headers that embed shaders as raw string literals.

use shaderport_core::ShaderEntry;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod formats;
pub mod loader;

pub use formats::{HeaderFormat, RawStringHeader};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("I/O error reading header {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid include guard name: '{0}'")]
    InvalidGuard(String),
}

/// A declaration that looked like an embedded shader but did not match the
/// expected surface syntax, and was therefore left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    /// The declared name, when one could be read.
    pub identifier: Option<String>,
    /// 1-based line of the declaration.
    pub line: usize,
}

impl fmt::Display for SkippedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(name) => write!(f, "'{}' at line {}", name, self.line),
            None => write!(f, "unnamed declaration at line {}", self.line),
        }
    }
}

/// Result of scanning a header: entries in declaration order plus the
/// declarations that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub entries: Vec<ShaderEntry>,
    pub skipped: Vec<SkippedDeclaration>,
}

impl Extraction {
    /// Identifiers of the extracted entries, in order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(ShaderEntry::identifier).collect()
    }
}

/// Guard of the OpenGL shader header the generated file replaces.
pub const DEFAULT_INCLUDE_GUARD: &str = "__WASTELADNS_SHADERS_GL_H__";

/// Name of the preprocessor macro guarding the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGuard(String);

impl IncludeGuard {
    /// Validates `name` as a preprocessor identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, HeaderError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(Self(name))
        } else {
            Err(HeaderError::InvalidGuard(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IncludeGuard {
    fn default() -> Self {
        Self(DEFAULT_INCLUDE_GUARD.to_string())
    }
}

impl fmt::Display for IncludeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
