use crate::{CoreError, ShaderKind};

/// The header extractor reads a raw string body up to its first double quote.
const QUOTE: char = '"';

/// A shader declaration extracted from a source header.
///
/// Entries are immutable once extracted; each pipeline stage derives a new
/// value from them instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderEntry {
    identifier: String,
    source: String,
}

impl ShaderEntry {
    /// Creates an entry, validating the identifier.
    pub fn new(identifier: impl Into<String>, source: impl Into<String>) -> Result<Self, CoreError> {
        let identifier = identifier.into();
        if !is_valid_identifier(&identifier) {
            return Err(CoreError::InvalidIdentifier(identifier));
        }
        Ok(Self {
            identifier,
            source: source.into(),
        })
    }

    /// The variable name the shader is declared under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The HLSL source between the raw string delimiters.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The stage inferred from the identifier.
    pub fn kind(&self) -> ShaderKind {
        ShaderKind::classify(&self.identifier)
    }
}

/// A shader after cross-compilation and varying renaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedShader {
    identifier: String,
    kind: ShaderKind,
    source: String,
}

impl TranslatedShader {
    /// Wraps translated text for `entry`.
    ///
    /// Fails when the text contains a double quote, which the header
    /// extractor does not accept inside a raw string body.
    pub fn new(entry: &ShaderEntry, source: impl Into<String>) -> Result<Self, CoreError> {
        let source = source.into();
        if source.contains(QUOTE) {
            return Err(CoreError::UnembeddableSource(entry.identifier.clone()));
        }
        Ok(Self {
            identifier: entry.identifier.clone(),
            kind: entry.kind(),
            source,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    /// The GLSL text to embed.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Returns true when `identifier` is a non-empty run of `[A-Za-z0-9._]`.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
