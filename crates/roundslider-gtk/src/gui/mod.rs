pub mod app;
pub mod target;
pub mod theme;
