//! This module defines the configuration structures and loading logic for md2docx.
//! All typography, page geometry and file locations live here; the defaults
//! reproduce the house style (SimSun 12pt body, A4 pages with 2.54cm margins).

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names searched in the current directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".md2docx.toml", "md2docx.toml"];

/// Default Markdown input, relative to the config base directory
pub const DEFAULT_INPUT: &str = "ProjectReport.md";

/// Default DOCX output, relative to the config base directory
pub const DEFAULT_OUTPUT: &str = "ProjectReport.docx";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Page size and margins
    pub page: PageConfig,

    /// Body text typography (also used for list items and table cells)
    pub body: BodyConfig,

    /// Heading sizes
    pub headings: HeadingConfig,

    /// Code block typography
    pub code: CodeConfig,

    /// Document properties written to docProps/core.xml
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Page geometry in centimeters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PageConfig {
    pub height_cm: f64,
    pub width_cm: f64,
    pub margin_top_cm: f64,
    pub margin_bottom_cm: f64,
    pub margin_left_cm: f64,
    pub margin_right_cm: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            height_cm: 29.7,
            width_cm: 21.0,
            margin_top_cm: 2.54,
            margin_bottom_cm: 2.54,
            margin_left_cm: 2.54,
            margin_right_cm: 2.54,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BodyConfig {
    /// Font family, applied to Latin and East Asian text alike
    pub font: String,
    pub size_pt: f64,
    /// Line spacing multiple (1.0 = single)
    pub line_spacing: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            font: "SimSun".to_string(),
            size_pt: 12.0,
            line_spacing: 1.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeadingConfig {
    /// Point sizes for heading levels 1, 2, 3, ...
    pub sizes: Vec<f64>,
    /// Size for levels beyond `sizes`
    pub fallback_size: f64,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            sizes: vec![20.0, 16.0, 14.0, 12.0],
            fallback_size: 12.0,
        }
    }
}

impl HeadingConfig {
    /// Point size for a heading level (1-based)
    pub fn size_for(&self, level: u8) -> f64 {
        usize::from(level)
            .checked_sub(1)
            .and_then(|idx| self.sizes.get(idx))
            .copied()
            .unwrap_or(self.fallback_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CodeConfig {
    pub font: String,
    pub size_pt: f64,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            font: "Courier New".to_string(),
            size_pt: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MetadataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub author: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the TOML content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Values parse but cannot produce a usable document
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse and validate a TOML configuration string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize the effective configuration
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Reject values that would produce a broken document
    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page;
        let lengths = [
            ("page.height-cm", page.height_cm),
            ("page.width-cm", page.width_cm),
            ("page.margin-top-cm", page.margin_top_cm),
            ("page.margin-bottom-cm", page.margin_bottom_cm),
            ("page.margin-left-cm", page.margin_left_cm),
            ("page.margin-right-cm", page.margin_right_cm),
        ];
        for (key, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{key} must be a non-negative number, got {value}")));
            }
        }
        if page.width_cm - page.margin_left_cm - page.margin_right_cm <= 0.0 {
            return Err(ConfigError::Invalid(
                "left and right margins leave no room for text".to_string(),
            ));
        }
        if page.height_cm - page.margin_top_cm - page.margin_bottom_cm <= 0.0 {
            return Err(ConfigError::Invalid(
                "top and bottom margins leave no room for text".to_string(),
            ));
        }

        let sizes = [
            ("body.size-pt", self.body.size_pt),
            ("body.line-spacing", self.body.line_spacing),
            ("code.size-pt", self.code.size_pt),
            ("headings.fallback-size", self.headings.fallback_size),
        ];
        for (key, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{key} must be positive, got {value}")));
            }
        }
        for (idx, size) in self.headings.sizes.iter().enumerate() {
            if !size.is_finite() || *size <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "headings.sizes[{idx}] must be positive, got {size}"
                )));
            }
        }

        if self.body.font.trim().is_empty() {
            return Err(ConfigError::Invalid("body.font must not be empty".to_string()));
        }
        if self.code.font.trim().is_empty() {
            return Err(ConfigError::Invalid("code.font must not be empty".to_string()));
        }
        if self.paths.input.as_os_str().is_empty() || self.paths.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("paths.input and paths.output must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct SourcedConfig {
    pub config: Config,
    /// The file the configuration was loaded from, if any
    pub loaded_file: Option<PathBuf>,
    /// Directory that relative paths in the configuration resolve against
    pub base_dir: PathBuf,
}

impl SourcedConfig {
    /// Load configuration from an explicit path, or discover it in the
    /// current directory, or fall back to defaults.
    pub fn load_with_discovery(config_path: Option<&Path>, skip_auto_discovery: bool) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::IoError {
            source: e,
            path: ".".to_string(),
        })?;
        Self::load_with_discovery_in(config_path, skip_auto_discovery, &cwd)
    }

    /// Same as [`SourcedConfig::load_with_discovery`] with an explicit search directory
    pub fn load_with_discovery_in(
        config_path: Option<&Path>,
        skip_auto_discovery: bool,
        search_dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            log::debug!("[md2docx-config] Explicit config_path provided: {}", path.display());
            return Self::from_file(path);
        }

        if skip_auto_discovery {
            log::debug!("[md2docx-config] Skipping auto-discovery due to --no-config flag");
        } else {
            log::debug!("[md2docx-config] Searching for config in: {}", search_dir.display());
            for name in CONFIG_FILE_NAMES {
                let candidate = search_dir.join(name);
                if candidate.is_file() {
                    log::debug!("[md2docx-config] Found config file: {}", candidate.display());
                    return Self::from_file(&candidate);
                }
            }
            log::debug!("[md2docx-config] No configuration file found, using defaults");
        }

        Ok(Self {
            config: Config::default(),
            loaded_file: None,
            base_dir: search_dir.to_path_buf(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::load(path)?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            config,
            loaded_file: Some(path.to_path_buf()),
            base_dir,
        })
    }

    /// Resolve a configured path against the base directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.config.paths.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.config.paths.output)
    }
}

impl From<SourcedConfig> for Config {
    fn from(sourced: SourcedConfig) -> Self {
        sourced.config
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    let default_config = r#"# md2docx configuration file

# Input Markdown and output DOCX, relative to this file
[paths]
input = "ProjectReport.md"
output = "ProjectReport.docx"

# A4 portrait
[page]
height-cm = 29.7
width-cm = 21.0
margin-top-cm = 2.54
margin-bottom-cm = 2.54
margin-left-cm = 2.54
margin-right-cm = 2.54

# Body text, list items and table cells
[body]
font = "SimSun"
size-pt = 12.0
line-spacing = 1.25

# Heading sizes for levels 1, 2, 3, 4; deeper levels use fallback-size
[headings]
sizes = [20.0, 16.0, 14.0, 12.0]
fallback-size = 12.0

[code]
font = "Courier New"
size-pt = 10.0

# [metadata]
# title = "Project Report"
# author = "md2docx"
"#;

    fs::write(path, default_config).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.display().to_string(),
    })
}
