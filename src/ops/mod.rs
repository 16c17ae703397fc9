//! Whole-framebuffer operations: blit, clear and the pixel-buffer copy path.

pub use self::blit::blit;
pub use self::clear::clear;

mod blit;
mod clear;
pub mod read;
