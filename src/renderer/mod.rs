//! Terminal rendering module
//!
//! Draws `Snapshot`s into a half-block pixel buffer. Holds no game state.

pub mod pixels;
pub mod scene;

pub use pixels::{PixelBuf, Rgb};
pub use scene::{View, draw};
