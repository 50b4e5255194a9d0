//! `tooldef.toml` parsing and run settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tooldef_core::{ExportLayout, PropertyKey};

/// File name searched for next to the input file and in its ancestors.
pub const CONFIG_FILE_NAME: &str = "tooldef.toml";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolDefConfig {
    /// Export layout overrides.
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[export]` section. Every field falls back to the built-in layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Architecture enumeration order.
    #[serde(default)]
    pub architectures: Option<Vec<String>>,
    /// Named command order; the `*` bucket is always appended.
    #[serde(default)]
    pub commands: Option<Vec<String>>,
    /// Attribute exported properties must carry (default `FLAGS`).
    #[serde(default)]
    pub attribute: Option<String>,
    /// Output base name when no toolchain is selected.
    #[serde(default)]
    pub fallback_name: Option<String>,
    /// Split long values into one token per line.
    #[serde(default)]
    pub pretty: Option<bool>,
    /// Length above which values are split.
    #[serde(default)]
    pub pretty_threshold: Option<usize>,
    /// Emit `*_*_*_*_…` catch-all records.
    #[serde(default)]
    pub include_catch_all: Option<bool>,
}

impl ToolDefConfig {
    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Search upward from `start_dir` for a `tooldef.toml` file.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// The export layout with file overrides applied over the defaults.
    pub fn layout(&self) -> Result<ExportLayout> {
        let mut layout = ExportLayout::default();
        let export = &self.export;
        if let Some(architectures) = &export.architectures {
            layout.architectures = architectures.clone();
        }
        if let Some(commands) = &export.commands {
            layout.commands = commands.clone();
        }
        if let Some(attribute) = &export.attribute {
            layout.attribute = attribute.clone();
        }
        if let Some(name) = &export.fallback_name {
            layout.fallback_name = name.clone();
        }
        if let Some(pretty) = export.pretty {
            layout.pretty = pretty;
        }
        if let Some(threshold) = export.pretty_threshold {
            layout.pretty_threshold = threshold;
        }
        if let Some(include) = export.include_catch_all {
            layout.include_catch_all = include;
        }
        layout.validate()?;
        Ok(layout)
    }
}

/// Immutable settings for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Absolute input path.
    pub input: PathBuf,
    /// Key selectors; unspecified components are `*`.
    pub selection: PropertyKey,
    pub layout: ExportLayout,
    /// Absolute directory the flag file is written to.
    pub output_dir: PathBuf,
    /// Configuration file the layout came from, if any.
    pub config_path: Option<PathBuf>,
}
