pub mod animator;
pub mod color;
pub mod paint;
