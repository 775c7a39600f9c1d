//! Cross-compilation backend.
//!
//! The actual HLSL to GLSL translation is done by an external command-line
//! tool. This crate owns the scratch files handed to it and the subprocess
//! contract, and exposes both behind the [`Translator`] trait.

use async_trait::async_trait;
use shaderport_core::ShaderEntry;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

pub mod command;
pub mod scratch;

pub use command::{CommandTranslator, TargetSpec};
pub use scratch::ScratchDir;

/// Errors raised while translating a single shader.
///
/// Every variant that concerns a shader carries its identifier so that a
/// failed batch can name the offending entry.
#[derive(Error, Debug)]
pub enum XcError {
    #[error("Scratch workspace error at {path:?}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to launch translator {program:?} for '{shader}': {source}")]
    Spawn {
        shader: String,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Translator failed for '{shader}' ({status})")]
    ExitStatus {
        shader: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Translator produced no output file for '{shader}' (expected {path:?})")]
    MissingOutput { shader: String, path: PathBuf },
    #[error("Translator produced empty output for '{shader}' in {path:?}")]
    EmptyOutput { shader: String, path: PathBuf },
    #[error("Translator timed out after {timeout:?} for '{shader}'")]
    Timeout { shader: String, timeout: Duration },
}

impl XcError {
    /// Identifier of the shader that failed, when the error concerns one.
    pub fn shader(&self) -> Option<&str> {
        match self {
            Self::Scratch { .. } => None,
            Self::Spawn { shader, .. }
            | Self::ExitStatus { shader, .. }
            | Self::MissingOutput { shader, .. }
            | Self::EmptyOutput { shader, .. }
            | Self::Timeout { shader, .. } => Some(shader.as_str()),
        }
    }
}

/// Trait for backends that turn annotated HLSL into GLSL.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `source`, the annotated HLSL of `entry`.
    ///
    /// The returned text is the raw translator output; interface variables
    /// still carry the translator's own names.
    async fn translate(&self, entry: &ShaderEntry, source: &str) -> Result<String, XcError>;

    /// Called once after every shader of a batch translated and the output
    /// header was written.
    async fn finish(&self) -> Result<(), XcError> {
        Ok(())
    }
}
