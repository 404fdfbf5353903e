use std::path::{Path, PathBuf};

use epd_raster::{DisplayMode, DistanceMetric, Palette, Pipeline, Srgb};
use image::Rgb;
use serde::Deserialize;

use crate::error::{AppError, ConfigError};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "INKFRAME_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// Every section and field is optional; missing values fall back to the
/// defaults of a 800x480 six-color panel.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub dither: DitherConfig,

    #[serde(default)]
    pub enhance: EnhanceConfig,

    /// Palette entries as hex strings, in index order
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

/// Target canvas geometry
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// `fill` or `fit`
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Counter-clockwise, in degrees
    #[serde(default)]
    pub rotation: f32,

    /// Padding color for fit mode and rotated corners
    #[serde(default = "default_background")]
    pub background: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DitherConfig {
    #[serde(default = "default_factor")]
    pub strength: f32,

    /// `euclidean`, `weighted-luma` or `weighted-luma-linear`
    #[serde(default = "default_metric")]
    pub metric: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EnhanceConfig {
    #[serde(default = "default_factor")]
    pub saturation: f32,

    #[serde(default = "default_factor")]
    pub contrast: f32,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    480
}

fn default_mode() -> String {
    DisplayMode::default().to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_factor() -> f32 {
    1.0
}

fn default_metric() -> String {
    DistanceMetric::default().to_string()
}

fn default_palette() -> Vec<String> {
    Palette::spectra6().to_hex()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            mode: default_mode(),
            rotation: 0.0,
            background: default_background(),
        }
    }
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            strength: default_factor(),
            metric: default_metric(),
        }
    }
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            saturation: default_factor(),
            contrast: default_factor(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            dither: DitherConfig::default(),
            enhance: EnhanceConfig::default(),
            palette: default_palette(),
        }
    }
}

/// Values given on the command line, applied on top of the loaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: Option<String>,
    pub rotation: Option<f32>,
    pub background: Option<String>,
    pub strength: Option<f32>,
    pub metric: Option<String>,
    pub palette: Option<Vec<String>>,
    pub saturation: Option<f32>,
    pub contrast: Option<f32>,
}

impl AppConfig {
    /// Resolve the config source and load it.
    ///
    /// An explicit path must exist. A path from [`CONFIG_ENV`] that does not
    /// exist only logs a warning, and no path at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            Some(value) => {
                let path = PathBuf::from(value);
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    tracing::warn!(
                        path = %path.display(),
                        "{CONFIG_ENV} points to a missing file, using defaults"
                    );
                    Ok(Self::default())
                }
            }
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            width = config.display.width,
            height = config.display.height,
            colors = config.palette.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            width,
            height,
            mode,
            rotation,
            background,
            strength,
            metric,
            palette,
            saturation,
            contrast,
        } = overrides;

        if let Some(v) = width {
            self.display.width = v;
        }
        if let Some(v) = height {
            self.display.height = v;
        }
        if let Some(v) = mode {
            self.display.mode = v;
        }
        if let Some(v) = rotation {
            self.display.rotation = v;
        }
        if let Some(v) = background {
            self.display.background = v;
        }
        if let Some(v) = strength {
            self.dither.strength = v;
        }
        if let Some(v) = metric {
            self.dither.metric = v;
        }
        if let Some(v) = palette {
            self.palette = v;
        }
        if let Some(v) = saturation {
            self.enhance.saturation = v;
        }
        if let Some(v) = contrast {
            self.enhance.contrast = v;
        }
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::from_hex(&self.palette)?)
    }

    /// Build a validated pipeline from this configuration.
    pub fn pipeline(&self) -> Result<Pipeline, AppError> {
        let mode: DisplayMode = self.display.mode.parse().map_err(|message| {
            ConfigError::Invalid {
                field: "display.mode",
                message,
            }
        })?;
        let metric: DistanceMetric = self.dither.metric.parse().map_err(|message| {
            ConfigError::Invalid {
                field: "dither.metric",
                message,
            }
        })?;
        let background: Srgb =
            self.display
                .background
                .parse()
                .map_err(|e: epd_raster::ParseColorError| ConfigError::Invalid {
                    field: "display.background",
                    message: e.to_string(),
                })?;

        let pipeline = Pipeline::new(self.display.width, self.display.height)
            .palette(self.palette()?)
            .mode(mode)
            .rotation(self.display.rotation)
            .background(Rgb(background.to_bytes()))
            .strength(self.dither.strength)
            .metric(metric)
            .saturation(self.enhance.saturation)
            .contrast(self.enhance.contrast);

        pipeline.validate()?;
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 480);
        assert_eq!(config.display.mode, "fill");
        assert_eq!(config.dither.metric, "euclidean");
        assert_eq!(
            config.palette,
            vec!["#000000", "#FFFFFF", "#FFFF00", "#FF0000", "#0000FF", "#00FF00"]
        );
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let yaml = r##"
display:
  mode: fit
  rotation: 90
dither:
  strength: 0.5
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display.mode, "fit");
        assert_eq!(config.display.rotation, 90.0);
        assert_eq!(config.display.width, 800);
        assert_eq!(config.dither.strength, 0.5);
        assert_eq!(config.dither.metric, "euclidean");
        assert_eq!(config.enhance, EnhanceConfig::default());
    }

    #[test]
    fn test_pipeline_from_config() {
        let yaml = r##"
display:
  width: 400
  height: 300
  mode: fit
  background: "#000"
dither:
  metric: weighted-luma
palette: ["#000000", "#FFFFFF"]
"##;
        let pipeline = AppConfig::from_yaml(yaml).unwrap().pipeline().unwrap();
        assert_eq!(pipeline.target(), (400, 300));
        assert_eq!(pipeline.active_palette().len(), 2);
        assert_eq!(pipeline.preprocess_options().mode, DisplayMode::Fit);
        assert_eq!(pipeline.preprocess_options().background, Rgb([0, 0, 0]));
        assert_eq!(
            pipeline.dither_options().metric,
            DistanceMetric::WeightedLuma
        );
    }

    #[test]
    fn test_invalid_mode_names_field() {
        let mut config = AppConfig::default();
        config.display.mode = "zoom".to_string();
        let err = config.pipeline().unwrap_err();
        assert!(err.to_string().contains("display.mode"), "{err}");
    }

    #[test]
    fn test_invalid_strength_is_rejected() {
        let mut config = AppConfig::default();
        config.dither.strength = 1.5;
        assert!(matches!(config.pipeline(), Err(AppError::Raster(_))));
    }

    #[test]
    fn test_duplicate_palette_is_rejected() {
        let mut config = AppConfig::default();
        config.palette = vec!["#000".into(), "#000000".into()];
        let err = config.pipeline().unwrap_err();
        assert!(err.to_string().contains("duplicate color"), "{err}");
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut config = AppConfig::default();
        config.apply(Overrides {
            width: Some(1600),
            metric: Some("weighted-luma-linear".into()),
            palette: Some(vec!["#000".into(), "#FFF".into()]),
            ..Overrides::default()
        });
        assert_eq!(config.display.width, 1600);
        assert_eq!(config.display.height, 480);
        assert_eq!(config.dither.metric, "weighted-luma-linear");
        assert_eq!(config.palette, vec!["#000", "#FFF"]);
        assert_eq!(config.enhance, EnhanceConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/inkframe.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
