use shaderport_core::CoreError;
use shaderport_header::HeaderError;
use shaderport_xc::XcError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Header Error: {0}")]
    Header(#[from] HeaderError),

    #[error("Translation Error: {0}")]
    Translation(#[from] XcError),

    #[error("Shader Error: {0}")]
    Shader(#[from] CoreError),

    #[error("Failed to write output header {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Identifier of the shader the run failed on, if any.
    pub fn shader(&self) -> Option<&str> {
        match self {
            Self::Translation(e) => e.shader(),
            Self::Shader(
                CoreError::UnembeddableSource(shader) | CoreError::InvalidIdentifier(shader),
            ) => Some(shader.as_str()),
            _ => None,
        }
    }
}
