use crate::formats::HeaderFormat;
use crate::{Extraction, IncludeGuard, SkippedDeclaration};
use once_cell::sync::Lazy;
use regex::Regex;
use shaderport_core::{ShaderEntry, TranslatedShader};
use std::collections::HashSet;
use std::fmt::Write;

// `const char* name = R"(body)";` where the body holds no double quote.
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"const\s+char\s*\*\s+([a-zA-Z0-9._]+)\s*=\s*R"\(([^"]*)\)";"#)
        .expect("declaration pattern is a valid regex")
});

// Anything that starts out like a raw string shader declaration.
static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"const\s+char\s*\*\s*([a-zA-Z0-9._]*)\s*=\s*R""#)
        .expect("candidate pattern is a valid regex")
});

/// Headers declaring each shader as `const char* name = R"(...)";`.
///
/// Matching is purely textual. A body may not contain a double quote and the
/// raw string must use the empty delimiter; declarations breaking either rule
/// are reported as skipped rather than extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawStringHeader;

impl RawStringHeader {
    /// Creates a new raw string header format
    pub const fn new() -> Self {
        Self
    }
}

impl HeaderFormat for RawStringHeader {
    fn extract(&self, content: &str) -> Extraction {
        let mut extraction = Extraction::default();
        let mut matched_at = HashSet::new();

        for caps in DECLARATION.captures_iter(content) {
            let (Some(whole), Some(name), Some(body)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            match ShaderEntry::new(name.as_str(), body.as_str()) {
                Ok(entry) => {
                    log::trace!(
                        "Extracted '{}' ({} bytes) at line {}",
                        entry.identifier(),
                        body.len(),
                        line_of(content, whole.start())
                    );
                    matched_at.insert(whole.start());
                    extraction.entries.push(entry);
                }
                Err(e) => log::debug!("Rejected declaration: {}", e),
            }
        }

        for caps in CANDIDATE.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            if matched_at.contains(&whole.start()) {
                continue;
            }
            let identifier = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            extraction.skipped.push(SkippedDeclaration {
                identifier,
                line: line_of(content, whole.start()),
            });
        }

        extraction
    }

    fn render(&self, shaders: &[TranslatedShader], guard: &IncludeGuard) -> String {
        let mut header = String::new();
        // Writing into a String cannot fail
        let _ = write!(header, "#ifndef {guard}\n#define {guard}\n\n");
        for shader in shaders {
            let _ = write!(
                header,
                "const char* {} = R\"(\n{})\";\n\n",
                shader.identifier(),
                shader.source()
            );
        }
        let _ = write!(header, "\n\n#endif // {guard}\n");
        header
    }

    fn format_name(&self) -> &'static str {
        "C++ raw string literals"
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
