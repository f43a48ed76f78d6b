//! Image description and rendering utilities.  In essence, this is an intermediate
//! representation (IR) for vector images: a [`Tiling`](crate::Tiling) describes what it wants
//! drawn in terms of abstract styles, which are then 'lowered' to concrete colours and written
//! out in any output format (currently SVG).

mod ir;
mod lowering;
pub mod svg;

pub use ir::{ConcreteStrokeStyle, FillStyle, LinearGradient, StrokeStyle};
pub use lowering::{hsl_color, RenderingOpts};

/// Re-export of [`ir::Image`] with the type params needed by the rest of the code
pub type Image = ir::Image<FillStyle, StrokeStyle>;
/// Version of [`ir::Image`] where all the styles are fully specified
pub type LoweredImage = ir::Image<LinearGradient, ConcreteStrokeStyle>;

/// Re-export of [`ir::Elem`] with the type params needed by the rest of the code
pub type Elem = ir::Elem<FillStyle, StrokeStyle>;
/// Version of [`ir::Elem`] where all the styles are fully specified
pub type LoweredElem = ir::Elem<LinearGradient, ConcreteStrokeStyle>;

/// Re-export of [`ir::Style`] with the type params needed by the rest of the code
pub type Style = ir::Style<FillStyle, StrokeStyle>;
/// Version of [`ir::Style`] where all the styles are fully specified
pub type LoweredStyle = ir::Style<LinearGradient, ConcreteStrokeStyle>;
