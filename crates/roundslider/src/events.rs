use crate::target::Point;
use derive_more::{Display, From};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct TouchId(u64);

impl TouchId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    /// Page coordinates.
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: TouchId, position: Point) -> Self {
        Self { id, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pointer {
    /// Viewport coordinates of the mouse.
    Mouse(Point),
    /// Every touch currently on the surface.
    Touch(Vec<TouchPoint>),
}

/// Which element a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Surface,
    Handle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    Down { pointer: Pointer, origin: Origin },
    Move(Pointer),
    Up,
    Cancel,
    Click(Point),
}
