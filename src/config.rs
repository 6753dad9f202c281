//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flakegen/flakegen.toml`
//! 3. Local config: `<dir>/.flakegen.toml` (working directory unless given)
//! 4. Environment variables: `FLAKEGEN_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{Scaling, DEFAULT_CANVAS_SIZE};
use crate::util::path::expand_path;

/// How segments are stroked on the SVG surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Stroke width in surface units
    pub line_width: f64,
    /// Stroke colour
    pub stroke: String,
    /// Background fill; `None` leaves the surface transparent.
    /// In config files `background = "none"` selects this.
    pub background: Option<String>,
}

/// Config value for [`RenderConfig::background`] that disables the fill.
pub const NO_BACKGROUND: &str = "none";

/// `None` for the `"none"` sentinel, the colour otherwise.
fn background_fill(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case(NO_BACKGROUND) {
        None
    } else {
        Some(value.to_string())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            stroke: "#ffffff".into(),
            background: Some("#1b2a41".into()),
        }
    }
}

/// Raw render config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub line_width: Option<f64>,
    pub stroke: Option<String>,
    pub background: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub count: Option<u32>,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub scaling: Option<Scaling>,
    pub render: RawRenderConfig,
}

impl RenderConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawRenderConfig) -> Self {
        Self {
            line_width: overlay.line_width.unwrap_or(self.line_width),
            stroke: overlay.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            background: match &overlay.background {
                Some(value) => background_fill(value),
                None => self.background.clone(),
            },
        }
    }
}

/// Unified configuration for flakegen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Canvas width (default: 150)
    pub width: f64,
    /// Canvas height (default: 150)
    pub height: f64,
    /// Snowflakes per `generate` run (default: 1)
    pub count: u32,
    /// Fixed seed for reproducible output (default: none, OS entropy)
    pub seed: Option<u64>,
    /// Where `generate` writes SVG files (default: current directory)
    pub output_dir: PathBuf,
    /// Length normalisation (default: fit-to-canvas)
    pub scaling: Scaling,
    /// SVG stroke settings
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            count: 1,
            seed: None,
            output_dir: PathBuf::from("."),
            scaling: Scaling::FitToCanvas,
            render: RenderConfig::default(),
        }
    }
}

/// Get the XDG config directory for flakegen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flakegen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flakegen.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".flakegen.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            width: overlay.width.unwrap_or(self.width),
            height: overlay.height.unwrap_or(self.height),
            count: overlay.count.unwrap_or(self.count),
            seed: overlay.seed.or(self.seed),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            scaling: overlay.scaling.unwrap_or(self.scaling),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.flakegen.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/flakegen/flakegen.toml`
    /// 3. Local config: `<local_dir>/.flakegen.toml`
    /// 4. Environment variables: `FLAKEGEN_*` prefix, `__` between nested keys
    ///    (`FLAKEGEN_RENDER__STROKE`)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.output_dir = expand_path(&current.output_dir);

        current.validate()?;
        Ok(current)
    }

    /// Load settings from a single TOML file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let mut settings = Self::default().merge_with(&load_raw_settings(path)?);
        settings.output_dir = expand_path(&settings.output_dir);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply FLAKEGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FLAKEGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<f64>(&config, "width")? {
            settings.width = val;
        }
        if let Some(val) = env_value::<f64>(&config, "height")? {
            settings.height = val;
        }
        if let Some(val) = env_value::<u32>(&config, "count")? {
            settings.count = val;
        }
        if let Some(val) = env_value::<u64>(&config, "seed")? {
            settings.seed = Some(val);
        }
        if let Some(val) = env_value::<String>(&config, "output_dir")? {
            settings.output_dir = PathBuf::from(val);
        }
        if let Some(val) = env_value::<String>(&config, "scaling")? {
            settings.scaling =
                Scaling::from_str(&val).map_err(|message| ApplicationError::Config { message })?;
        }
        if let Some(val) = env_value::<f64>(&config, "render.line_width")? {
            settings.render.line_width = val;
        }
        if let Some(val) = env_value::<String>(&config, "render.stroke")? {
            settings.render.stroke = val;
        }
        if let Some(val) = env_value::<String>(&config, "render.background")? {
            settings.render.background = background_fill(&val);
        }

        Ok(settings)
    }

    /// Reject settings no snowflake can be drawn with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |message: String| Err(ApplicationError::Config { message });
        if !(self.width.is_finite() && self.width > 0.0) {
            return invalid(format!("width must be positive, got {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return invalid(format!("height must be positive, got {}", self.height));
        }
        if self.count == 0 {
            return invalid("count must be at least 1".to_string());
        }
        if !(self.render.line_width.is_finite() && self.render.line_width > 0.0) {
            return invalid(format!(
                "render.line_width must be positive, got {}",
                self.render.line_width
            ));
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# flakegen configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/flakegen/flakegen.toml
#   Local:  ./.flakegen.toml
#   Env:    FLAKEGEN_* environment variables (FLAKEGEN_RENDER__STROKE for [render] stroke)
# Command line flags override all of the above.

# Canvas size of each snowflake
# width = 150
# height = 150

# Snowflakes written per `flakegen generate`
# count = 1

# Fixed seed for reproducible output
# seed = 42

# Where SVG files are written
# output_dir = "."

# "fit-to-canvas": longest arm reaches the canvas edge
# "proportional":  proportion = (longest arm / shorter side) / 2
# scaling = "fit-to-canvas"

[render]
# line_width = 3.0
# stroke = "#ffffff"
# background = "#1b2a41"    # "none" for a transparent surface
"##
        .to_string()
    }
}

/// Read an optional key; absent keys are `None`, unparsable values are errors.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn test_merge_with_overlay_wins() {
        let raw: RawSettings = toml::from_str(
            r##"
width = 400
scaling = "proportional"

[render]
stroke = "#000000"
"##,
        )
        .unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.width, 400.0);
        assert_eq!(merged.height, DEFAULT_CANVAS_SIZE);
        assert_eq!(merged.scaling, Scaling::Proportional);
        assert_eq!(merged.render.stroke, "#000000");
        assert_eq!(merged.render.line_width, 3.0);
    }

    #[test]
    fn test_scaling_fit_alias_in_file() {
        let raw: RawSettings = toml::from_str("scaling = \"fit\"\n").unwrap();
        assert_eq!(raw.scaling, Some(Scaling::FitToCanvas));
    }

    #[test]
    fn test_background_none_clears_fill() {
        let raw: RawSettings = toml::from_str("[render]\nbackground = \"none\"\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.render.background, None);
    }

    #[test]
    fn test_background_absent_inherits_fill() {
        let raw: RawSettings = toml::from_str("[render]\nstroke = \"#000000\"\n").unwrap();
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.render.background, Some("#1b2a41".to_string()));
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let settings = Settings {
            count: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let text = Settings::default().to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, Settings::default());
    }
}
