use std::fmt;

/// The pipeline stage a shader is compiled for.
///
/// The kind is never declared in the source header; it is inferred from the
/// shader's identifier by [`ShaderKind::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderKind {
    /// Pixel (fragment) stage. Any identifier without a vertex marker lands here.
    #[default]
    Pixel,
    /// Vertex stage.
    Vertex,
}

impl ShaderKind {
    /// Classifies an identifier by naming convention.
    ///
    /// An identifier containing `vertex` or `Vertex` is a vertex shader,
    /// everything else is a pixel shader. Only the first letter of the marker
    /// is case-insensitive, so `VERTEXskin` stays a pixel shader.
    pub fn classify(identifier: &str) -> Self {
        if identifier.contains("vertex") || identifier.contains("Vertex") {
            Self::Vertex
        } else {
            Self::Pixel
        }
    }

    /// Extension of the scratch file holding the translator input.
    pub const fn source_extension(self) -> &'static str {
        match self {
            Self::Pixel => "ps",
            Self::Vertex => "vs",
        }
    }

    /// Name of the HLSL entry point the translator compiles.
    pub const fn entry_point(self) -> &'static str {
        match self {
            Self::Pixel => "PS",
            Self::Vertex => "VS",
        }
    }

    /// Source stage argument understood by the translator.
    pub const fn stage(self) -> &'static str {
        match self {
            Self::Pixel => "ps",
            Self::Vertex => "vs",
        }
    }

    /// Prefix the translator gives to this stage's interface variables
    /// that must be renamed so the stages link by name.
    pub const fn interface_prefix(self) -> &'static str {
        match self {
            Self::Pixel => "in_var_",
            Self::Vertex => "out_var_",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel => write!(f, "pixel"),
            Self::Vertex => write!(f, "vertex"),
        }
    }
}
