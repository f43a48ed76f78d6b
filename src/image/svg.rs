//! Code to convert an [`Image`] to an SVG string

use std::f32::consts::PI;

use itertools::Itertools;
use simple_xml_builder::XMLElement;

use crate::{
    knot::{Path, PathCmd},
    utils::CircularArc,
    V2,
};

use super::{
    lowering::lower, ConcreteStrokeStyle, Image, LinearGradient, LoweredElem, LoweredImage,
    RenderingOpts,
};

/// Generate an SVG root element for an unlowered [`Image`]
pub fn gen_svg(image: &Image, opts: &RenderingOpts) -> XMLElement {
    gen_svg_from_lowered(&lower(image, opts))
}

/// Generate an SVG root element for a lowered [`Image`] (i.e. one where all styles are stated
/// concretely).  Every gradient fill gets its own `<linearGradient>` definition.
pub fn gen_svg_from_lowered(lowered_image: &LoweredImage) -> XMLElement {
    let (width, height) = (lowered_image.width(), lowered_image.height());

    let mut root = XMLElement::new("svg");
    root.add_attribute("width", &width.to_string());
    root.add_attribute("height", &height.to_string());
    root.add_attribute("viewBox", &format!("0 0 {} {}", width, height));
    root.add_attribute("xmlns", "http://www.w3.org/2000/svg");

    let mut defs = XMLElement::new("defs");
    let mut num_gradients = 0;
    let mut xml_elems = Vec::new();
    for e in lowered_image.elements() {
        let fill = match e.fill_style() {
            Some(gradient) => {
                let id = format!("gradient-{}", num_gradients);
                num_gradients += 1;
                defs.add_child(gen_gradient(gradient, &id));
                format!("url(#{})", id)
            }
            None => "none".to_owned(), // We need `fill="none"` to disable the fill
        };
        let mut xml_elem = gen_svg_elem(e);
        xml_elem.add_attribute("fill", &fill);
        add_stroke_style_attrs(e.stroke_style(), &mut xml_elem);
        xml_elems.push(xml_elem);
    }

    root.add_child(defs);
    for xml_elem in xml_elems {
        root.add_child(xml_elem);
    }
    root
}

/// Creates an unstyled [`XMLElement`] for a given [`LoweredElem`]
fn gen_svg_elem(elem: &LoweredElem) -> XMLElement {
    match elem {
        // For `Rect`, we use the SVG `<rect>` element
        LoweredElem::Rect { min, max, .. } => {
            let size = *max - *min;
            let mut elem = XMLElement::new("rect");
            elem.add_attribute("x", &min.x.to_string());
            elem.add_attribute("y", &min.y.to_string());
            elem.add_attribute("width", &size.x.to_string());
            elem.add_attribute("height", &size.y.to_string());
            elem
        }
        LoweredElem::Path(path, _) => {
            let mut elem = XMLElement::new("path");
            elem.add_attribute("d", &path_data(path));
            elem
        }
    }
}

/// Creates a `<linearGradient>` definition, whose coordinates are the same as the image's
fn gen_gradient(gradient: &LinearGradient, id: &str) -> XMLElement {
    let mut elem = XMLElement::new("linearGradient");
    elem.add_attribute("id", id);
    elem.add_attribute("gradientUnits", "userSpaceOnUse");
    elem.add_attribute("x1", &gradient.from.x.to_string());
    elem.add_attribute("y1", &gradient.from.y.to_string());
    elem.add_attribute("x2", &gradient.to.x.to_string());
    elem.add_attribute("y2", &gradient.to.y.to_string());
    for (offset, color) in &gradient.stops {
        let mut stop = XMLElement::new("stop");
        stop.add_attribute("offset", &offset.to_string());
        stop.add_attribute("stop-color", &color.to_string());
        elem.add_child(stop);
    }
    elem
}

/// Add SVG attributes to give an [`XMLElement`] a given `StrokeStyle`
fn add_stroke_style_attrs(style: Option<&ConcreteStrokeStyle>, xml_elem: &mut XMLElement) {
    match style {
        Some(s) => {
            xml_elem.add_attribute("stroke", &s.stroke_color.to_string());
            xml_elem.add_attribute("stroke-width", &s.line_width.to_string());
            xml_elem.add_attribute("stroke-linecap", "round"); // Always round off the line ends
            xml_elem.add_attribute("stroke-linejoin", "round"); // Always round off internal corners
        }
        None => xml_elem.add_attribute("stroke", "none"), // Put `stroke="none"` if no stroke
    }
}

//////////////////////////
// PATH DATA GENERATION //
//////////////////////////

/// Generates the `d` attribute of an SVG `<path>`
pub fn path_data(path: &Path) -> String {
    let mut parts = Vec::new();
    let mut has_current_point = false;
    for cmd in path.cmds() {
        match cmd {
            PathCmd::MoveTo(p) => parts.push(format!("M {}", fmt_point(*p))),
            PathCmd::LineTo(p) => parts.push(format!("L {}", fmt_point(*p))),
            PathCmd::CubicTo(p1, p2, p3) => parts.push(format!(
                "C {} {} {}",
                fmt_point(*p1),
                fmt_point(*p2),
                fmt_point(*p3)
            )),
            PathCmd::Arc(arc) => {
                // Like canvas arcs, we join on to the start of the arc with a straight line
                let join = if has_current_point { "L" } else { "M" };
                parts.push(format!("{} {}", join, fmt_point(arc.start_point())));
                parts.extend(arc_pieces(arc));
            }
            PathCmd::Close => parts.push("Z".to_owned()),
        }
        has_current_point = true;
    }
    parts.join(" ")
}

/// SVG arc commands tracing `arc` from its start point.  SVG arcs are ambiguous when they cover
/// more than half a circle, so such arcs are split in two.
fn arc_pieces(arc: &CircularArc) -> Vec<String> {
    let (_, span) = arc.increasing_span();
    if span == 0.0 {
        return vec![];
    }
    // Angles increase clockwise on screen, which is SVG's positive sweep direction
    let (sweep, direction) = if arc.anticlockwise { (0, -1.0) } else { (1, 1.0) };
    let num_pieces = if span > PI { 2 } else { 1 };
    (1..=num_pieces)
        .map(|i| {
            let angle = arc.start + direction * span * i as f32 / num_pieces as f32;
            format!(
                "A {r} {r} 0 0 {} {}",
                sweep,
                fmt_point(arc.point_at(angle)),
                r = arc.radius
            )
        })
        .collect_vec()
}

fn fmt_point(p: V2) -> String {
    format!("{} {}", p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        image::{Elem, FillStyle, StrokeStyle, Style},
        V2Ext,
    };

    fn knot_fill() -> FillStyle {
        FillStyle::Knot {
            hue: 10.0,
            saturation: 70.0,
            from: V2::ZERO,
            to: V2::ONE,
        }
    }

    #[test]
    fn one_gradient_per_filled_elem() {
        let mut image = Image::empty(100.0, 50.0);
        image.add(Elem::Rect {
            min: V2::ZERO,
            max: V2::new(100.0, 50.0),
            style: Style::JustFill(FillStyle::Background {
                hue: 10.0,
                saturation: 40.0,
                from: V2::new(0.0, 50.0),
                to: V2::new(100.0, 0.0),
            }),
        });
        image.add(Elem::Path(Path::new(), Style::JustFill(knot_fill())));
        image.add(Elem::Path(Path::new(), Style::JustFill(knot_fill())));
        image.add(Elem::Path(Path::new(), Style::JustStroke(StrokeStyle::Outline)));

        let svg = image.svg_string(&RenderingOpts::default());
        assert_eq!(svg.matches("<linearGradient").count(), 3);
        assert_eq!(svg.matches("<stop").count(), 2 + 4 + 4);
        assert!(svg.contains("url(#gradient-2)"));
        assert!(!svg.contains("gradient-3"));
        assert_eq!(svg.matches("stroke=\"none\"").count(), 3);
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn path_commands() {
        let mut path = Path::new();
        path.push(PathCmd::MoveTo(V2::new(1.0, 2.0)));
        path.push(PathCmd::CubicTo(
            V2::new(3.0, 4.0),
            V2::new(5.0, 6.0),
            V2::new(7.0, 8.0),
        ));
        path.push(PathCmd::LineTo(V2::new(0.0, 0.0)));
        path.push(PathCmd::Close);
        assert_eq!(path_data(&path), "M 1 2 C 3 4 5 6 7 8 L 0 0 Z");
    }

    #[test]
    fn arcs_join_on_and_split_when_large() {
        let small = CircularArc {
            centre: V2::ZERO,
            radius: 2.0,
            start: 0.0,
            end: PI / 2.0,
            anticlockwise: false,
        };
        let mut path = Path::new();
        path.push(PathCmd::Arc(small));
        path.push(PathCmd::Arc(CircularArc {
            anticlockwise: true,
            ..small
        }));
        path.push(PathCmd::Close);
        let d = path_data(&path);
        // First arc starts the path, the second is joined on
        assert!(d.starts_with("M 2 0 A 2 2 0 0 1 "), "{}", d);
        assert_eq!(d.matches("L 2 0 A 2 2 0 0 0 ").count(), 1, "{}", d);
        // The anticlockwise one goes three quarters of the way round, so is split
        assert_eq!(d.matches('A').count(), 3);
    }
}
