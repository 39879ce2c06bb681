use crate::target::Selector;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("min ({min}) must be strictly less than max ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("option '{0}' must be a finite number")]
    NonFinite(&'static str),
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("stroke width must be in (0, radius], got {stroke_width} for radius {radius}")]
    InvalidStrokeWidth { stroke_width: f64, radius: f64 },
    #[error("step {step} cuts the range into {segments} ticks, at most {limit} are allowed")]
    TooManySegments { step: f64, segments: f64, limit: usize },
    #[error("unrecognized color '{0}'")]
    InvalidColor(String),
    #[error("Config error: {0}")]
    Source(#[from] config::ConfigError),
}

#[derive(Error, Debug)]
pub enum SliderError {
    #[error("Element could not be found: {selector}")]
    TargetNotFound { selector: Selector },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
