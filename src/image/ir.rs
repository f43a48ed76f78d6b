//! An intermediate representation for vector images

use rgb::RGB8;

use crate::{knot::Path, V2};

use super::{lowering, svg, LoweredImage, RenderingOpts};

/// A full [`Image`], composed of many [`Elem`]ents drawn in order.  [`Image`]s use pixel
/// coordinates, with the origin in the top-left corner of a `width` by `height` canvas.
#[derive(Debug, Clone)]
pub struct Image<F, S> {
    pub(super) width: f32,
    pub(super) height: f32,
    pub(super) elements: Vec<Elem<F, S>>,
}

impl<F, S> Image<F, S> {
    /// Creates an empty `Image` (i.e. one which contains no [`Elem`]s)
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: vec![],
        }
    }

    /// Adds a new [`Elem`] to this `Image`, on top of everything added so far
    pub fn add(&mut self, elem: Elem<F, S>) {
        self.elements.push(elem)
    }

    pub fn elements(&self) -> &[Elem<F, S>] {
        self.elements.as_slice()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Helper methods for easy conversions to various formats
impl Image<FillStyle, StrokeStyle> {
    pub fn svg_string(&self, opts: &RenderingOpts) -> String {
        svg::gen_svg(self, opts).to_string()
    }

    pub fn lower(&self, opts: &RenderingOpts) -> LoweredImage {
        lowering::lower(self, opts)
    }
}

/// The shape of an [`Elem`]
#[derive(Debug, Clone)]
pub enum Elem<F, S> {
    /// Axis-aligned rectangle between two corners
    Rect { min: V2, max: V2, style: Style<F, S> },
    Path(Path, Style<F, S>),
}

impl<F, S> Elem<F, S> {
    pub fn style(&self) -> &Style<F, S> {
        match self {
            Elem::Rect { style, .. } => style,
            Elem::Path(_, style) => style,
        }
    }

    pub fn fill_style(&self) -> Option<&F> {
        self.style().fill_style()
    }

    pub fn stroke_style(&self) -> Option<&S> {
        self.style().stroke_style()
    }
}

/////////////
// STYLING //
/////////////

/// The full styling of an [`Elem`], which is either filled or stroked or both (but invisible
/// elements are not possible).
#[derive(Debug, Clone)]
pub enum Style<F, S> {
    JustFill(F),
    JustStroke(S),
    FillAndStroke(F, S),
}

impl<F, S> Style<F, S> {
    pub fn fill_style(&self) -> Option<&F> {
        match self {
            Self::JustFill(f) => Some(f),
            Self::JustStroke(_) => None,
            Self::FillAndStroke(f, _) => Some(f),
        }
    }

    pub fn stroke_style(&self) -> Option<&S> {
        match self {
            Self::JustFill(_) => None,
            Self::JustStroke(s) => Some(s),
            Self::FillAndStroke(_, s) => Some(s),
        }
    }
}

/// The visual style of the body of an [`Elem`].  Hues are in degrees; saturations are
/// percentages.
#[derive(Debug, Clone)]
pub enum FillStyle {
    /// The dark wash behind the whole tiling, running from `from` to `to`
    Background {
        hue: f32,
        saturation: f32,
        from: V2,
        to: V2,
    },
    /// The shading of one knot, running from its darkest point (`from`) to its lightest (`to`)
    Knot {
        hue: f32,
        saturation: f32,
        from: V2,
        to: V2,
    },
}

/// A linear colour gradient in the same coordinates as the [`Image`].  Beyond either end, the
/// colour of the nearest end is used.  Every [`FillStyle`] lowers to one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: V2,
    pub to: V2,
    /// `(offset, colour)` pairs, with offsets increasing from `0` (at `from`) to `1` (at `to`)
    pub stops: Vec<(f32, RGB8)>,
}

/// The visual style of the outline of an [`Elem`]
#[derive(Debug, Clone)]
pub enum StrokeStyle {
    /// The thin outline drawn round every loop
    Outline,
}

/// A fully specified [`StrokeStyle`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteStrokeStyle {
    pub line_width: f32,
    pub stroke_color: RGB8,
}
