use crate::error::ConfigError;
use crate::slider::{MAX_SEGMENTS, ValueScale};
use derive_more::{AsRef, Display};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::Path;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const ENV_PREFIX: &str = "ROUNDSLIDER";

/// A CSS color accepted by the slider: a hex code (`#ccc`, `#a020f0`) or a CSS color name.
///
/// The text is kept as written so it can go straight into the markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, Display, AsRef)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn srgba(&self) -> Srgba<f64> {
        Self::parse_srgb(&self.0)
            .unwrap_or_else(|| Srgb::new(0, 0, 0))
            .into_format::<f64>()
            .with_alpha(1.0)
    }

    /// Hex codes need their `#`; the bare digits are no valid SVG paint.
    fn parse_srgb(s: &str) -> Option<Srgb<u8>> {
        palette::named::from_str(&s.to_ascii_lowercase())
            .or_else(|| s.strip_prefix('#')?.parse::<Srgb<u8>>().ok())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::parse_srgb(s)
            .map(|_| Self(s.to_string()))
            .ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
    }
}

/// How a pointer drives the slider.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Press anywhere on the ring, then drag. A press without movement becomes a click.
    #[default]
    #[strum(to_string = "surface", serialize = "ring", serialize = "1")]
    Surface,
    /// Only a press on the rotated handle starts a drag; the ring still takes clicks.
    #[strum(to_string = "handle", serialize = "knob", serialize = "2")]
    Handle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    pub color: Color,
    #[serde(alias = "bg_color")]
    pub background_color: Color,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub stroke_width: f64,
    #[serde(alias = "value")]
    pub initial_value: f64,
    pub radius: f64,
    pub mode: InteractionMode,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            color: Color("purple".to_string()),
            background_color: Color("#ccc".to_string()),
            min: 100.0,
            max: 200.0,
            step: 10.0,
            stroke_width: 15.0,
            initial_value: 150.0,
            radius: 125.0,
            mode: InteractionMode::Surface,
        }
    }
}

impl SliderOptions {
    /// Resolves options from an optional TOML file and `ROUNDSLIDER_*` environment variables,
    /// layered over the defaults, and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layered(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn load_layered(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let options: Self = builder.add_source(env).build()?.try_deserialize()?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("stroke_width", self.stroke_width),
            ("initial_value", self.initial_value),
            ("radius", self.radius),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if self.min >= self.max {
            return Err(ConfigError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        let segments = ValueScale::from_options(self).step_intervals();
        if segments > MAX_SEGMENTS as f64 {
            return Err(ConfigError::TooManySegments {
                step: self.step,
                segments,
                limit: MAX_SEGMENTS,
            });
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.stroke_width <= 0.0 || self.stroke_width > self.radius {
            return Err(ConfigError::InvalidStrokeWidth {
                stroke_width: self.stroke_width,
                radius: self.radius,
            });
        }
        Ok(())
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path_radius(&self) -> f64 {
        self.radius - self.stroke_width / 2.0
    }
}
