//! A circular ("round") slider widget core.
//!
//! The crate maps pointer positions around a ring to a stepped numeric value and renders the
//! ring as an SVG document. Hosts plug in through [`target::RenderTarget`] and
//! [`target::Document`]; everything else is plain, headless Rust.

pub mod error;
pub mod events;
pub mod macros;
pub mod options;
pub mod slider;
pub mod target;

pub use error::{ConfigError, SliderError};
pub use events::{Origin, Pointer, SliderEvent, TouchId, TouchPoint};
pub use options::{Color, InteractionMode, SliderOptions};
pub use slider::{Phase, Slider, SliderBuilder};
pub use target::{BoundingBox, Document, Listener, Point, RenderTarget, Selector};
