use vector2d::Vector2D;

pub mod driver;
pub mod grid;
pub mod image;
pub mod indexed_vec;
pub mod knot;
mod tiling;
mod utils;

pub use driver::{AnimState, Driver, Event};
pub use grid::{Coverage, Grid, Layout, Viewport};
pub use image::RenderingOpts;
pub use tiling::{GenError, GenOpts, Knot, Palette, Shade, Tiling};
pub use utils::{CircularArc, V2Ext};

/// Type alias for 2D floating point vectors (in the geometric sense, unlike [`Vec`])
pub type V2 = Vector2D<f32>;
