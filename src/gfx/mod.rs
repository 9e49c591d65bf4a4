//! Software raster layer
//!
//! The small set of 2D primitives the game entities are built on:
//! - RGBA surfaces with optional colour keys and blending
//! - Integer rectangles
//! - Rotation of surfaces
//! - Per-pixel collision masks
//! - Debug drawing (circles, lines, rectangle outlines)

pub mod color;
pub mod draw;
pub mod mask;
pub mod rect;
pub mod surface;
pub mod transform;

pub use color::Color;
pub use draw::{circle, line, make_circle_image, rect_outline};
pub use mask::Mask;
pub use rect::Rect;
pub use surface::{BlendMode, Surface};
pub use transform::rotate;
