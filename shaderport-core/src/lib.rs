//! Core library for the shader porting pipeline.
//! Defines the shader data model and the text transformations applied to
//! every shader before and after it passes through the cross-compiler.

use thiserror::Error;

/// Column-major annotation of HLSL matrix declarations.
pub mod annotate;
/// Shader entries as extracted from, and written back to, a header.
pub mod entry;
/// Pixel/vertex classification of shader entries.
pub mod kind;
/// Normalisation of translator-generated interface variable names.
pub mod rename;

// Re-export core public items

/// Prefixes matrix declarations with `column_major`.
pub use crate::annotate::annotate_column_major;
/// An extracted shader declaration.
pub use crate::entry::ShaderEntry;
/// A shader after translation and renaming.
pub use crate::entry::TranslatedShader;
/// The stage a shader belongs to.
pub use crate::kind::ShaderKind;
/// Rewrites interface variables to the shared varying prefix.
pub use crate::rename::rename_varyings;

/// Errors raised while building core shader values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The identifier is empty or contains characters outside `[A-Za-z0-9._]`.
    #[error("Invalid shader identifier: '{0}'")]
    InvalidIdentifier(String),
    /// The translated text contains a double quote and cannot be embedded
    /// back into a header as a raw string.
    #[error("Translated source of '{0}' contains a double quote and cannot be embedded as a raw string")]
    UnembeddableSource(String),
}
