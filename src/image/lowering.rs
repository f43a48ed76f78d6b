use itertools::Itertools;
use palette::{FromColor, Hsl, Srgb};
use rgb::RGB8;

use super::{
    ConcreteStrokeStyle, Elem, FillStyle, Image, LinearGradient, LoweredElem, LoweredImage,
    LoweredStyle, StrokeStyle, Style,
};

/// 'Lower' an [`Image`] to a [`LoweredImage`] - i.e. use values from [`RenderingOpts`] to make
/// concrete versions for every style.  The [`LoweredImage`] can then be unambiguously converted to
/// an image file, and the [`RenderingOpts`] is no longer needed.
pub(super) fn lower(image: &Image, opts: &RenderingOpts) -> LoweredImage {
    LoweredImage {
        width: image.width,
        height: image.height,
        elements: image
            .elements
            .iter()
            .map(|e| lower_elem(e, opts))
            .collect_vec(),
    }
}

/// 'Lower' a single [`Elem`] to a [`LoweredElem`], by converting all `XStyle`s to
/// `ConcreteXStyle`s.  The geometry is unchanged.
fn lower_elem(elem: &Elem, opts: &RenderingOpts) -> LoweredElem {
    match elem {
        Elem::Rect { min, max, style } => LoweredElem::Rect {
            min: *min,
            max: *max,
            style: lower_style(style, opts),
        },
        Elem::Path(path, style) => LoweredElem::Path(path.clone(), lower_style(style, opts)),
    }
}

fn lower_style(style: &Style, opts: &RenderingOpts) -> LoweredStyle {
    match style {
        Style::JustFill(f) => LoweredStyle::JustFill(lower_fill_style(f, opts)),
        Style::JustStroke(s) => LoweredStyle::JustStroke(lower_stroke_style(s, opts)),
        Style::FillAndStroke(f, s) => {
            LoweredStyle::FillAndStroke(lower_fill_style(f, opts), lower_stroke_style(s, opts))
        }
    }
}

/// Lowers a [`FillStyle`] by turning hue/saturation pairs into colour gradients, whose stops and
/// lightnesses come from `opts`.
fn lower_fill_style(style: &FillStyle, opts: &RenderingOpts) -> LinearGradient {
    let (hue, saturation, from, to, stops) = match style {
        FillStyle::Background {
            hue,
            saturation,
            from,
            to,
        } => (*hue, *saturation, *from, *to, &opts.background_stops),
        FillStyle::Knot {
            hue,
            saturation,
            from,
            to,
        } => (*hue, *saturation, *from, *to, &opts.knot_stops),
    };
    LinearGradient {
        from,
        to,
        stops: stops
            .iter()
            .map(|&(offset, lightness)| (offset, hsl_color(hue, saturation, lightness)))
            .collect_vec(),
    }
}

fn lower_stroke_style(style: &StrokeStyle, opts: &RenderingOpts) -> ConcreteStrokeStyle {
    let (line_width, stroke_color) = match style {
        StrokeStyle::Outline => (opts.outline_width, opts.outline_color),
    };
    ConcreteStrokeStyle {
        line_width,
        stroke_color,
    }
}

/// Converts a CSS-style HSL colour (hue in degrees, saturation and lightness as percentages) to
/// 8-bit RGB
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> RGB8 {
    let hsl: Hsl = Hsl::new(hue, saturation / 100.0, lightness / 100.0);
    let srgb = Srgb::from_color(hsl);
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGB8::new(to_byte(srgb.red), to_byte(srgb.green), to_byte(srgb.blue))
}

/// Configuration for how a tiling should be rendered
#[derive(Debug, Clone)]
pub struct RenderingOpts {
    /// `(offset, lightness %)` stops of the background gradient
    background_stops: Vec<(f32, f32)>,
    /// `(offset, lightness %)` stops of every knot's gradient, from its shadowed side to its lit
    /// side
    knot_stops: Vec<(f32, f32)>,

    /// Width of the outlines round every loop, in pixels
    outline_width: f32,
    /// The colour of the loop outlines.  Defaults to black
    outline_color: RGB8,
}

impl RenderingOpts {
    pub fn with_outline_width(self, outline_width: f32) -> Self {
        Self {
            outline_width,
            ..self
        }
    }
}

impl Default for RenderingOpts {
    fn default() -> Self {
        Self {
            background_stops: vec![(0.0, 20.0), (1.0, 40.0)],
            knot_stops: vec![(0.0, 20.0), (0.4, 40.0), (0.6, 60.0), (1.0, 80.0)],

            outline_width: 0.5, // pixels
            outline_color: RGB8::new(0, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{knot::Path, V2Ext, V2};

    #[test]
    fn hsl_conversion() {
        assert_eq!(hsl_color(0.0, 100.0, 50.0), RGB8::new(255, 0, 0));
        assert_eq!(hsl_color(120.0, 100.0, 50.0), RGB8::new(0, 255, 0));
        assert_eq!(hsl_color(240.0, 0.0, 100.0), RGB8::new(255, 255, 255));
        assert_eq!(hsl_color(300.0, 50.0, 0.0), RGB8::new(0, 0, 0));
        // Hues wrap round
        assert_eq!(hsl_color(360.0, 100.0, 50.0), hsl_color(0.0, 100.0, 50.0));
    }

    #[test]
    fn knot_fills_become_four_stop_gradients() {
        let mut image = Image::empty(10.0, 10.0);
        let (from, to) = (V2::ZERO, V2::new(3.0, 4.0));
        image.add(Elem::Path(
            Path::new(),
            Style::FillAndStroke(
                FillStyle::Knot {
                    hue: 200.0,
                    saturation: 60.0,
                    from,
                    to,
                },
                StrokeStyle::Outline,
            ),
        ));
        let lowered = lower(&image, &RenderingOpts::default());
        let elem = &lowered.elements()[0];
        let gradient = elem.fill_style().unwrap();
        assert_eq!((gradient.from, gradient.to), (from, to));
        let offsets = gradient.stops.iter().map(|(o, _)| *o).collect_vec();
        assert_eq!(offsets, vec![0.0, 0.4, 0.6, 1.0]);
        assert_eq!(gradient.stops[1].1, hsl_color(200.0, 60.0, 40.0));
        assert_eq!(
            elem.stroke_style(),
            Some(&ConcreteStrokeStyle {
                line_width: 0.5,
                stroke_color: RGB8::new(0, 0, 0)
            })
        );
    }

    #[test]
    fn backgrounds_and_outlines_follow_opts() {
        let mut image = Image::empty(10.0, 10.0);
        image.add(Elem::Rect {
            min: V2::ZERO,
            max: V2::new(10.0, 10.0),
            style: Style::JustFill(FillStyle::Background {
                hue: 30.0,
                saturation: 40.0,
                from: V2::new(0.0, 10.0),
                to: V2::new(10.0, 0.0),
            }),
        });
        image.add(Elem::Path(Path::new(), Style::JustStroke(StrokeStyle::Outline)));
        let opts = RenderingOpts::default().with_outline_width(2.5);
        let lowered = lower(&image, &opts);

        let background = lowered.elements()[0].fill_style().unwrap();
        assert_eq!(
            background.stops,
            vec![
                (0.0, hsl_color(30.0, 40.0, 20.0)),
                (1.0, hsl_color(30.0, 40.0, 40.0))
            ]
        );
        assert!(lowered.elements()[0].stroke_style().is_none());
        let outline = lowered.elements()[1].stroke_style().unwrap();
        assert_eq!(outline.line_width, 2.5);
        assert!(lowered.elements()[1].fill_style().is_none());
    }
}
