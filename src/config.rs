//! Page-supplied configuration, read as JSON from the container's data
//! attributes.

use serde::Deserialize;

use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::progress::DEFAULT_SCROLL_DOMAIN;
use crate::uniforms::UniformSet;

pub const DEFAULT_TRACKED_ELEMENT: &str = "portfolio";
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

/// What drives the `progress` uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriveMode {
    #[default]
    Scroll,
    Manual,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub displacement_map: Option<String>,
    /// Overrides the built-in displacement transition shader.
    #[serde(default)]
    pub fragment_shader_source: Option<String>,
    #[serde(default = "default_tracked_element")]
    pub tracked_element_id: String,
    #[serde(default)]
    pub mode: DriveMode,
    #[serde(default = "default_scroll_domain")]
    pub scroll_domain: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub uniforms: UniformSet,
}

fn default_tracked_element() -> String {
    DEFAULT_TRACKED_ELEMENT.to_string()
}

fn default_scroll_domain() -> f64 {
    DEFAULT_SCROLL_DOMAIN
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            displacement_map: None,
            fragment_shader_source: None,
            tracked_element_id: default_tracked_element(),
            mode: DriveMode::default(),
            scroll_domain: DEFAULT_SCROLL_DOMAIN,
            duration: DEFAULT_DURATION_SECS,
            easing: Easing::default(),
            debug: false,
            uniforms: UniformSet::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from the `data-config` and `data-images`
    /// attribute values. A `data-images` list replaces any images named in
    /// `data-config`.
    pub fn from_attributes(config: Option<&str>, images: Option<&str>) -> Result<Self> {
        let mut parsed = match config {
            Some(json) => serde_json::from_str(json)?,
            None => Config::default(),
        };
        if let Some(images) = images {
            parsed.images = serde_json::from_str(images)?;
        }
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.images.len() < 2 {
            return Err(Error::TooFewImages {
                found: self.images.len(),
            });
        }
        if let Some(index) = self.images.iter().position(|url| url.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!("image {index} has an empty url")));
        }
        if matches!(self.displacement_map.as_deref(), Some(url) if url.trim().is_empty()) {
            self.displacement_map = None;
        }
        if !(self.scroll_domain.is_finite() && self.scroll_domain > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "scrollDomain must be a positive percentage, got {}",
                self.scroll_domain
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if self.mode == DriveMode::Scroll && self.tracked_element_id.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "trackedElementId is required in scroll mode".into(),
            ));
        }
        self.uniforms.normalize().map_err(Error::InvalidConfig)
    }
}
