use crate::errors::{RespecError, Result};
use crate::scan::{Language, SourceType};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".respec.toml";

/// TOML-deserializable config file. All fields are Option so CLI flags can
/// override file values and file values can override built-in defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsFileConfig,
    #[serde(default)]
    pub rewrite: RewriteFileConfig,
    #[serde(default)]
    pub targeting: TargetingFileConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultsFileConfig {
    pub lang: Option<String>,
    pub source_type: Option<String>,
    pub format: Option<String>,
    pub quiet: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RewriteFileConfig {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TargetingFileConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Fully resolved configuration — no Option fields except where absence is
/// meaningful (`lang` falls back to auto-detection).
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub lang: Option<Language>,
    pub source_type: SourceType,
    pub format: Option<String>,
    pub quiet: bool,
    pub from: String,
    pub to: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            lang: None,
            source_type: SourceType::Module,
            format: None,
            quiet: false,
            from: ".ts".to_string(),
            to: ".js".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

/// Load `.respec.toml` from `root`, if present, over built-in defaults.
/// CLI flags are merged on top by the caller.
pub fn load(root: &Path) -> Result<ResolvedConfig> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(ResolvedConfig::default());
    }

    let raw = std::fs::read_to_string(&path)?;
    let file: FileConfig = toml::from_str(&raw)
        .map_err(|e| RespecError::Config(format!("{}: {e}", path.display())))?;

    resolve(file)
}

fn resolve(file: FileConfig) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();

    if let Some(lang) = file.defaults.lang {
        config.lang = Some(lang.parse().map_err(RespecError::Config)?);
    }
    if let Some(source_type) = file.defaults.source_type {
        config.source_type = source_type.parse().map_err(RespecError::Config)?;
    }
    config.format = file.defaults.format;
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
    }
    if let Some(from) = file.rewrite.from {
        config.from = from;
    }
    if let Some(to) = file.rewrite.to {
        config.to = to;
    }
    config.include = file.targeting.include;
    config.exclude = file.targeting.exclude;

    Ok(config)
}
