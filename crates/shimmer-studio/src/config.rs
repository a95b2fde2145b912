use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, Widget};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// On-disk defaults. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub widget: Option<Widget>,
    pub shader: Option<PathBuf>,
    pub speed: Option<f32>,
    pub font: Option<PathBuf>,
    pub text: Option<String>,
    pub hint: Option<bool>,
    pub poll_resize: Option<bool>,
    pub log: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Effective settings after layering the command line over the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub widget: Widget,
    pub shader: Option<PathBuf>,
    pub speed: f32,
    pub font: Option<PathBuf>,
    pub text: Option<String>,
    pub hint: bool,
    pub poll_resize: bool,
    pub log: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let speed = cli.speed.or(file.speed).unwrap_or(1.0);
        if !speed.is_finite() {
            return Err(ConfigError::Invalid(format!("speed must be finite, got {speed}")));
        }

        // Relative paths in the file are taken from the file's directory.
        let base = cli.config.as_deref().and_then(Path::parent);
        let rebase = |p: PathBuf| match base {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p,
        };

        Ok(Self {
            widget: cli.widget.or(file.widget).unwrap_or_default(),
            shader: cli.shader.clone().or(file.shader.map(rebase)),
            speed,
            font: cli.font.clone().or(file.font.map(rebase)),
            text: cli.text.clone().or(file.text),
            hint: cli.hint || file.hint.unwrap_or(false),
            poll_resize: cli.poll_resize || file.poll_resize.unwrap_or(false),
            log: cli.log.clone().or(file.log),
        })
    }
}

/// File contents the engines need, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub fragment_source: Option<String>,
    pub font: Option<Vec<u8>>,
}

impl Assets {
    /// A missing shader file is an error; a missing font only degrades to the
    /// built-in block font.
    pub fn load(settings: &Settings) -> Result<Self, ConfigError> {
        let fragment_source = match &settings.shader {
            Some(path) => Some(fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?),
            None => None,
        };

        let font = settings.font.as_ref().and_then(|path| match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::warn!("font {} unreadable, using block font: {err}", path.display());
                None
            }
        });

        Ok(Self { fragment_source, font })
    }
}
