//! Translation through an external cross-compiler binary.
//!
//! The binary follows the ShaderConductor command line:
//! `-E <entry> -I <input> -O <output> -S <stage> -T <language> -V <version>`.

use crate::{ScratchDir, Translator, XcError};
use async_trait::async_trait;
use shaderport_core::ShaderEntry;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::process::Command;

/// Language and version the translator targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub language: String,
    pub version: String,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            language: "glsl".to_string(),
            version: "330 core".to_string(),
        }
    }
}

/// Runs the cross-compiler once per shader, strictly one at a time.
#[derive(Debug)]
pub struct CommandTranslator {
    program: PathBuf,
    scratch: ScratchDir,
    target: TargetSpec,
    timeout: Option<Duration>,
    clean_scratch: bool,
    // Entries whose scratch files are removed by `finish`
    translated: Mutex<Vec<ShaderEntry>>,
}

impl CommandTranslator {
    pub fn new(program: impl Into<PathBuf>, scratch: ScratchDir) -> Self {
        Self {
            program: program.into(),
            scratch,
            target: TargetSpec::default(),
            timeout: None,
            clean_scratch: false,
            translated: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = target;
        self
    }

    /// Bounds every invocation; a translator still running after `timeout`
    /// is killed and the shader fails.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Removes the scratch files of all shaders once the batch succeeded.
    #[must_use]
    pub fn with_clean_scratch(mut self, clean_scratch: bool) -> Self {
        self.clean_scratch = clean_scratch;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line arguments for translating `entry` from `input` to `output`.
    pub fn arguments(&self, entry: &ShaderEntry, input: &Path, output: &Path) -> Vec<OsString> {
        let kind = entry.kind();
        vec![
            "-E".into(),
            kind.entry_point().into(),
            "-I".into(),
            input.into(),
            "-O".into(),
            output.into(),
            "-S".into(),
            kind.stage().into(),
            "-T".into(),
            self.target.language.clone().into(),
            "-V".into(),
            self.target.version.clone().into(),
        ]
    }

    // Only ever pushed to, so a poisoned list is still usable
    fn translated_entries(&self) -> MutexGuard<'_, Vec<ShaderEntry>> {
        self.translated.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, entry: &ShaderEntry, args: Vec<OsString>) -> Result<(), XcError> {
        let shader = entry.identifier();
        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        log::debug!("Running {:?} {:?}", self.program, args);

        let pending = command.output();
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, pending)
                .await
                .map_err(|_| XcError::Timeout {
                    shader: shader.to_string(),
                    timeout,
                })?,
            None => pending.await,
        };
        let output = result.map_err(|source| XcError::Spawn {
            shader: shader.to_string(),
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("Translator output for '{}':\n{}", shader, stdout.trim_end());
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            if !stderr.is_empty() {
                log::error!("Translator stderr for '{}':\n{}", shader, stderr);
            }
            return Err(XcError::ExitStatus {
                shader: shader.to_string(),
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for CommandTranslator {
    async fn translate(&self, entry: &ShaderEntry, source: &str) -> Result<String, XcError> {
        let (input, output) = self.scratch.prepare(entry, source).await?;
        let args = self.arguments(entry, &input, &output);
        self.run(entry, args).await?;

        let translated = match tokio::fs::read_to_string(&output).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(XcError::MissingOutput {
                    shader: entry.identifier().to_string(),
                    path: output,
                });
            }
            Err(source) => return Err(XcError::Scratch { path: output, source }),
        };
        if translated.trim().is_empty() {
            return Err(XcError::EmptyOutput {
                shader: entry.identifier().to_string(),
                path: output,
            });
        }

        if self.clean_scratch {
            self.translated_entries().push(entry.clone());
        }
        Ok(translated)
    }

    async fn finish(&self) -> Result<(), XcError> {
        let entries = std::mem::take(&mut *self.translated_entries());
        for entry in &entries {
            self.scratch.remove(entry).await?;
        }
        if !entries.is_empty() {
            log::info!(
                "Removed scratch files of {} shaders from {:?}",
                entries.len(),
                self.scratch.root()
            );
        }
        Ok(())
    }
}
