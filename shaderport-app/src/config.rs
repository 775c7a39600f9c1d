use crate::error::AppError;
use clap::{Parser, ValueEnum};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use shaderport_header::DEFAULT_INCLUDE_GUARD;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "shaderport.toml";

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "SHADERPORT_";

/// Log verbosity of the application.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Command line of the shader porting tool.
///
/// Every setting flag is optional; unset flags fall back to the environment,
/// the config file, and finally the built-in defaults.
#[derive(Parser, Serialize, Debug, Default)]
#[command(author, version, about = "Ports HLSL shaders embedded in a C++ header to GLSL", long_about = None)]
pub struct Cli {
    /// TOML config file.
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Header declaring the HLSL shaders.
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Header to (re)generate with the GLSL shaders.
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Cross-compiler executable.
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<PathBuf>,

    /// Directory for the files exchanged with the cross-compiler.
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    /// Include guard macro of the generated header.
    #[arg(long, value_name = "NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_guard: Option<String>,

    /// Target language passed to the cross-compiler.
    #[arg(long, value_name = "LANG")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,

    /// Target version passed to the cross-compiler.
    #[arg(long, value_name = "VERSION")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,

    /// Abort a translation running longer than this (e.g., "30s", "500ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    #[serde(skip)]
    pub translator_timeout: Option<Duration>,

    /// Remove the scratch files after a successful run.
    #[arg(long, default_value_t = false)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clean_scratch: bool,

    /// Only list the shaders found in the input header and their stage.
    #[arg(long, default_value_t = false)]
    #[serde(skip)]
    pub list: bool,

    /// Log verbosity; RUST_LOG takes precedence when set.
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

/// Effective settings after merging defaults, config file, environment and
/// command line, in increasing precedence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub translator: PathBuf,
    pub scratch_dir: PathBuf,
    pub include_guard: String,
    pub target_language: String,
    pub target_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_timeout_ms: Option<u64>,
    pub clean_scratch: bool,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        let helpers = Path::new("..").join("helpers");
        Self {
            input: helpers.join("dx11").join("shaders.h"),
            output: helpers.join("gl").join("shaders.h"),
            translator: Path::new(".").join(format!(
                "ShaderConductorCmd{}",
                std::env::consts::EXE_SUFFIX
            )),
            scratch_dir: PathBuf::from("tmp"),
            include_guard: DEFAULT_INCLUDE_GUARD.to_string(),
            target_language: "glsl".to_string(),
            target_version: "330 core".to_string(),
            translator_timeout_ms: None,
            clean_scratch: false,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Builds the settings for `cli`.
    ///
    /// An explicitly requested config file must exist; the default one is
    /// optional.
    pub fn load(cli: &Cli) -> Result<Self, AppError> {
        let config_file = match &cli.config {
            Some(path) if !path.is_file() => {
                return Err(AppError::Config(format!(
                    "Config file {path:?} does not exist"
                )));
            }
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(cli));
        if let Some(timeout) = cli.translator_timeout {
            let millis = u64::try_from(timeout.as_millis()).map_err(|_| {
                AppError::Config(format!("Translator timeout {timeout:?} is too large"))
            })?;
            figment = figment.merge(Serialized::default("translator_timeout_ms", millis));
        }

        let settings: Self = figment
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;
        if settings.translator_timeout_ms == Some(0) {
            return Err(AppError::Config(
                "Translator timeout must be greater than zero".to_string(),
            ));
        }
        Ok(settings)
    }

    pub fn translator_timeout(&self) -> Option<Duration> {
        self.translator_timeout_ms.map(Duration::from_millis)
    }
}
