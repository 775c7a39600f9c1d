use crate::{Extraction, IncludeGuard};
use shaderport_core::TranslatedShader;

/// Trait defining how shaders are embedded in a header file.
///
/// Implementors read shader declarations out of header text and write
/// translated shaders back in the same shape, so that a generated header can
/// be scanned again by the same format.
pub trait HeaderFormat {
    /// Scans header text for shader declarations.
    ///
    /// # Arguments
    ///
    /// * `content` - The complete text of the header
    ///
    /// # Returns
    ///
    /// The entries in declaration order, along with any declarations that
    /// resembled a shader but could not be read.
    fn extract(&self, content: &str) -> Extraction;

    /// Renders a complete header embedding `shaders` in order, wrapped in
    /// `guard`.
    fn render(&self, shaders: &[TranslatedShader], guard: &IncludeGuard) -> String;

    /// Returns a descriptive name for this format.
    ///
    /// This can be used for debugging, logging, or user-facing error messages.
    fn format_name(&self) -> &'static str;
}
