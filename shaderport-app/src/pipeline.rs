//! Drives a header through extraction, translation and assembly.

use crate::config::Settings;
use crate::error::AppError;
use crate::output;
use log::{info, warn};
use shaderport_core::{annotate_column_major, rename_varyings, ShaderEntry, ShaderKind, TranslatedShader};
use shaderport_header::loader::load_from_file;
use shaderport_header::{Extraction, HeaderFormat, IncludeGuard, RawStringHeader};
use shaderport_xc::{CommandTranslator, ScratchDir, TargetSpec, Translator};
use std::path::Path;
use std::time::Instant;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifiers written to the output header, in order.
    pub translated: Vec<String>,
    /// Number of declarations skipped because they did not match.
    pub skipped: usize,
}

/// Translates every entry in order, one at a time.
///
/// Each entry is annotated, handed to `translator`, and its interface
/// variables renamed. The first failure aborts the batch. The translator is
/// not finished here; see [`port`].
pub async fn translate_all(
    entries: &[ShaderEntry],
    translator: &dyn Translator,
) -> Result<Vec<TranslatedShader>, AppError> {
    let total = entries.len();
    let mut translated = Vec::with_capacity(total);

    for (index, entry) in entries.iter().enumerate() {
        let kind = entry.kind();
        info!(
            "[{}/{}] Translating {} shader '{}'",
            index + 1,
            total,
            kind,
            entry.identifier()
        );
        let annotated = annotate_column_major(entry.source());
        let glsl = translator.translate(entry, &annotated).await?;
        let renamed = rename_varyings(kind, &glsl);
        translated.push(TranslatedShader::new(entry, renamed)?);
    }
    Ok(translated)
}

/// Translates `entries`, replaces `destination` with the assembled header,
/// and only then lets the translator release its scratch files.
pub async fn port(
    entries: &[ShaderEntry],
    translator: &dyn Translator,
    guard: &IncludeGuard,
    destination: &Path,
) -> Result<Vec<TranslatedShader>, AppError> {
    let shaders = translate_all(entries, translator).await?;
    let header = RawStringHeader::new().render(&shaders, guard);
    output::write_atomically(destination, &header)?;
    translator.finish().await?;
    Ok(shaders)
}

/// Reads the input header named by `settings` and reports skipped declarations.
pub fn extract(settings: &Settings) -> Result<Extraction, AppError> {
    info!("Loading shaders from: {:?}", settings.input);
    let extraction = load_from_file(&settings.input)?;
    for skipped in &extraction.skipped {
        warn!(
            "Skipping shader declaration {} in {:?}: expected `const char* name = R\"(...)\";` without quotes in the body",
            skipped, settings.input
        );
    }
    info!(
        "Found {} shaders ({} skipped)",
        extraction.entries.len(),
        extraction.skipped.len()
    );
    Ok(extraction)
}

/// Lists the shaders of the input header with their inferred stage.
pub fn list(settings: &Settings) -> Result<Vec<(String, ShaderKind)>, AppError> {
    let extraction = extract(settings)?;
    Ok(extraction
        .entries
        .iter()
        .map(|entry| (entry.identifier().to_string(), entry.kind()))
        .collect())
}

/// Runs the complete port: extract, translate each shader with the
/// configured cross-compiler, and replace the output header.
///
/// The output header is only written once every shader translated, so a
/// failed run leaves it untouched.
pub async fn run(settings: &Settings) -> Result<RunSummary, AppError> {
    let start = Instant::now();
    let guard = IncludeGuard::new(settings.include_guard.as_str())?;
    let extraction = extract(settings)?;

    let scratch = ScratchDir::create(&settings.scratch_dir).await?;
    let translator = CommandTranslator::new(&settings.translator, scratch)
        .with_target(TargetSpec {
            language: settings.target_language.clone(),
            version: settings.target_version.clone(),
        })
        .with_timeout(settings.translator_timeout())
        .with_clean_scratch(settings.clean_scratch);
    info!("Using translator {:?}", translator.program());

    let shaders = port(&extraction.entries, &translator, &guard, &settings.output).await?;

    info!(
        "Ported {} shaders in {:.2?}",
        shaders.len(),
        start.elapsed()
    );
    Ok(RunSummary {
        translated: shaders
            .iter()
            .map(|shader| shader.identifier().to_string())
            .collect(),
        skipped: extraction.skipped.len(),
    })
}
