use derive_more::{AsRef, Deref, Display, From, Into};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Screen-space box of the element hosting the slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Selector(String);

crate::impl_string_newtype!(Selector);

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Event subscriptions a slider holds on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Listener {
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl Listener {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::MouseMove | Self::TouchMove)
    }

    /// Listeners held for the whole lifetime of a slider.
    pub fn base() -> impl Iterator<Item = Self> {
        Self::iter().filter(|l| !l.is_move())
    }
}

/// The host element a slider draws into and receives pointer events from.
pub trait RenderTarget {
    fn set_markup(&mut self, markup: &str);
    fn set_handle_rotation(&mut self, degrees: f64);
    fn bounding_box(&self) -> BoundingBox;
    fn add_listener(&mut self, listener: Listener);
    fn remove_listener(&mut self, listener: Listener);
}

/// Resolves selectors to render targets.
pub trait Document {
    type Target: RenderTarget;

    fn query_selector(&self, selector: &Selector) -> Option<Self::Target>;
}
