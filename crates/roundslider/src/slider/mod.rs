pub mod geometry;
pub mod model;
pub mod view;

pub use geometry::{Snapped, ValueScale, pointer_to_angle, polar_to_cartesian};
pub use model::{Phase, Slider, SliderBuilder};
pub use view::{RenderParams, arc_path, render_markup};

/// Sweep of the full ring. Stops short of 360 so the maximum never lands on the minimum.
pub const FULL_SWEEP: f64 = 359.9999;
/// Rotates the frame so that angle 0 sits at the top of the ring.
pub const TOP_OFFSET: f64 = 90.0;
pub const ARC_OPACITY: f64 = 0.7;
pub const TICK_WIDTH: f64 = 2.0;
/// Most tick intervals a ring may be divided into.
pub const MAX_SEGMENTS: usize = 3600;
pub const CLASS_NAME_PREFIX: &str = "RoundSlider";
