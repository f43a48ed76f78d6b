//! Everything needed to weave knots through a [`Grid`](crate::Grid): the shapes strands are made
//! of, how each cell routes its strands, tracing strands into closed loops and turning those loops
//! into shaded paths.

mod gradient;
mod path;
mod routing;
mod template;
mod tracer;

pub use gradient::GradientFitter;
pub use path::{Path, PathCmd};
pub use routing::{CellRouting, Orientation};
pub use template::{Arc, CompoundArc, Cubic, Prim, Templates};
pub use tracer::{trace, Anchor, Loop, Segment, Tracing, FULL_TURN};
