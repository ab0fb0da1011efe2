pub mod geometry;
pub mod platform;
