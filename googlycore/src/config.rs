//! Widget configuration and its on-disk form.

use crate::geometry::height_for;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("size must be a positive number, got {0}")]
    InvalidSize(f32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Default widget width in points.
pub const DEFAULT_SIZE: f32 = 120.0;

/// Outline and pupil share one color out of the box.
pub const DEFAULT_INK: [u8; 3] = [0, 0, 0];

/// How a pair of eyes looks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EyesConfig {
    /// Width in points. Height follows the fixed aspect ratio.
    pub size: f32,
    /// Opaque styling tag passed through by the host. Only used to keep
    /// differently styled instances apart.
    #[serde(default)]
    pub extra_style: String,
    #[serde(default = "default_ink")]
    pub sclera_color: [u8; 3],
    #[serde(default = "default_ink")]
    pub pupil_color: [u8; 3],
}

fn default_ink() -> [u8; 3] {
    DEFAULT_INK
}

impl Default for EyesConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            extra_style: String::new(),
            sclera_color: DEFAULT_INK,
            pupil_color: DEFAULT_INK,
        }
    }
}

impl EyesConfig {
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_extra_style(mut self, style: impl Into<String>) -> Self {
        self.extra_style = style.into();
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        let rgb = [color.r(), color.g(), color.b()];
        self.sclera_color = rgb;
        self.pupil_color = rgb;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.is_finite() && self.size > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidSize(self.size))
        }
    }

    pub fn width(&self) -> f32 {
        self.size
    }

    pub fn height(&self) -> f32 {
        height_for(self.size)
    }

    pub fn desired_size(&self) -> egui::Vec2 {
        egui::vec2(self.width(), self.height())
    }

    pub fn sclera(&self) -> Color32 {
        let [r, g, b] = self.sclera_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn pupil(&self) -> Color32 {
        let [r, g, b] = self.pupil_color;
        Color32::from_rgb(r, g, b)
    }

    /// Default location of the saved config.
    pub fn config_path() -> PathBuf {
        config_dir("googlyeyes").join("eyes.json")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load the saved config, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring saved eyes config");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save eyes config");
        }
    }
}

/// Get the config directory for an app
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
