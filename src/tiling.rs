//! A complete, randomly generated tiling: the grid, every cell's routing, the traced loops and
//! the colours they are painted in.

use std::f32::consts::PI;

use angle::Rad;
use itertools::Itertools;
use rand::Rng;

use crate::{
    grid::{Coverage, Grid, Layout, Viewport},
    image::{Elem, FillStyle, Image, StrokeStyle, Style},
    indexed_vec::{CellVec, LoopIdx, LoopVec},
    knot::{self, CellRouting, GradientFitter, Loop, Orientation, Path, Templates, Tracing},
    V2,
};

/// The ways in which generating a [`Tiling`] can fail
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GenError {
    #[error("viewport of {width}x{height} pixels has no area to tile")]
    EmptyViewport { width: f32, height: f32 },
    #[error("cell radius must be a positive number of pixels, not {0}")]
    InvalidRadius(f32),
}

/// Options which control how a [`Tiling`] is generated
#[derive(Debug, Clone, Default)]
pub struct GenOpts {
    pub coverage: Coverage,
    /// Fixes the radius of every cell (in pixels).  If `None`, a random radius is chosen for
    /// each generation.
    pub radius: Option<f32>,
}

/// The colour scheme shared by a whole tiling.  Hues are in degrees, saturations in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub hue: f32,
    pub background_saturation: f32,
    /// If set, every knot is painted in [`Self::hue`]; otherwise each knot gets its own hue
    pub colorful: bool,
    /// If set, every loop is outlined
    pub with_stroke: bool,
}

impl Palette {
    /// Picks a new random palette.  The first tiling shown is always colourful and outlined.
    pub fn random(rng: &mut impl Rng, first_run: bool) -> Self {
        let colorful = rng.gen::<bool>() || first_run;
        let hue = rng.gen_range(0..360) as f32;
        let background_saturation = rng.gen_range(30..50) as f32;
        let with_stroke = rng.gen::<bool>() || first_run;
        Self {
            hue,
            background_saturation,
            colorful,
            with_stroke,
        }
    }
}

/// The colouring of a single knot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub hue: f32,
    pub saturation: f32,
    /// If set, the knot is lit from the opposite side to all the others
    pub inverted: bool,
}

impl Shade {
    fn random(rng: &mut impl Rng, palette: &Palette) -> Self {
        let hue = if palette.colorful {
            palette.hue
        } else {
            rng.gen_range(0..360) as f32
        };
        let saturation = rng.gen_range(50..100) as f32;
        let inverted = rng.gen();
        Self {
            hue,
            saturation,
            inverted,
        }
    }
}

/// A traced [`Loop`] along with everything needed to paint it
#[derive(Debug, Clone)]
pub struct Knot {
    loop_idx: LoopIdx,
    path: Path,
    fitter: GradientFitter,
    shade: Shade,
}

impl Knot {
    pub fn loop_idx(&self) -> LoopIdx {
        self.loop_idx
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fitter(&self) -> &GradientFitter {
        &self.fitter
    }

    pub fn shade(&self) -> Shade {
        self.shade
    }

    /// The direction in which this knot gets lighter.  Knots normally face away from the light.
    pub fn gradient_angle(&self, light: Rad<f32>) -> Rad<f32> {
        if self.shade.inverted {
            light
        } else {
            Rad(light.0 + PI)
        }
    }

    /// The ends of this knot's colour gradient, from darkest to lightest
    pub fn gradient(&self, light: Rad<f32>) -> (V2, V2) {
        self.fitter.endpoints(self.gradient_angle(light))
    }
}

/// A fully generated knot tiling
#[derive(Debug, Clone)]
pub struct Tiling {
    viewport: Viewport,
    grid: Grid,
    routings: CellVec<CellRouting>,
    tracing: Tracing,
    palette: Palette,
    /// One `Knot` per loop, in the same order as [`Tracing::loops`]
    knots: LoopVec<Knot>,
}

impl Tiling {
    /// Generates a new random tiling to fill `viewport`
    pub fn generate(
        viewport: Viewport,
        opts: &GenOpts,
        first_run: bool,
        rng: &mut impl Rng,
    ) -> Result<Self, GenError> {
        if viewport.is_degenerate() {
            return Err(GenError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let radius = match opts.radius {
            Some(r) => r,
            None => {
                let divisor = if first_run {
                    rng.gen_range(5..8)
                } else {
                    rng.gen_range(5..20)
                };
                (viewport.width * viewport.height).sqrt() / divisor as f32
            }
        };
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GenError::InvalidRadius(radius));
        }

        let palette = Palette::random(rng, first_run);
        let grid = Grid::grow(
            Layout::new(radius, viewport.middle()),
            &viewport,
            opts.coverage,
        );
        let mut orientations = CellVec::repeat(Orientation::default(), grid.len());
        for cell in grid.row_major() {
            orientations[cell] = Orientation::random(rng);
        }
        Ok(Self::from_parts(viewport, grid, &orientations, palette, rng))
    }

    /// Builds a tiling from an existing grid, where every cell's [`Orientation`] is already
    /// known.  Only the colours of the knots are left to `rng`.
    pub fn from_parts(
        viewport: Viewport,
        grid: Grid,
        orientations: &CellVec<Orientation>,
        palette: Palette,
        rng: &mut impl Rng,
    ) -> Self {
        let templates = Templates::new();
        let routings = orientations.map(|o| CellRouting::new(*o, &templates));
        let tracing = knot::trace(&grid, &routings);

        let mut knots = LoopVec::new();
        for (loop_idx, lp) in tracing.loops().indexed_iter() {
            let path = Path::from_loop(lp, &grid, &routings);
            let fitter = GradientFitter::from_path(&path);
            knots.push(Knot {
                loop_idx,
                path,
                fitter,
                shade: Shade::random(rng, &palette),
            });
        }
        log::info!(
            "Generated tiling of {} cells (radius {:.1}px) with {} loops",
            grid.len(),
            grid.layout().radius,
            knots.len()
        );

        Self {
            viewport,
            grid,
            routings,
            tracing,
            palette,
            knots,
        }
    }

    /* Getters */

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn routings(&self) -> &CellVec<CellRouting> {
        &self.routings
    }

    pub fn tracing(&self) -> &Tracing {
        &self.tracing
    }

    pub fn loops(&self) -> &LoopVec<Loop> {
        self.tracing.loops()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn knots(&self) -> &LoopVec<Knot> {
        &self.knots
    }

    /// The knots painted by each fill pass: every regular loop which isn't a small circle, then
    /// the small circles on top
    pub fn fill_order(&self) -> Vec<&Knot> {
        let regular_knots = || {
            self.knots
                .iter()
                .filter(move |k| self.tracing.loops()[k.loop_idx].is_regular())
        };
        let is_circle = |k: &&Knot| self.tracing.loops()[k.loop_idx].is_small_circle();
        regular_knots()
            .filter(|k| !is_circle(k))
            .chain(regular_knots().filter(is_circle))
            .collect_vec()
    }

    /* Rendering */

    /// The background wash, which only depends on the palette
    pub fn background(&self) -> Elem {
        let (width, height) = (self.viewport.width, self.viewport.height);
        Elem::Rect {
            min: V2::new(0.0, 0.0),
            max: V2::new(width, height),
            style: Style::JustFill(FillStyle::Background {
                hue: self.palette.hue,
                saturation: self.palette.background_saturation,
                from: V2::new(0.0, height),
                to: V2::new(width, 0.0),
            }),
        }
    }

    /// The shaded fill of every regular loop, lit from the direction `light`
    pub fn fills(&self, light: Rad<f32>) -> Vec<Elem> {
        self.fill_order()
            .into_iter()
            .map(|knot| {
                let (from, to) = knot.gradient(light);
                let shade = knot.shade();
                let fill = FillStyle::Knot {
                    hue: shade.hue,
                    saturation: shade.saturation,
                    from,
                    to,
                };
                Elem::Path(knot.path().clone(), Style::JustFill(fill))
            })
            .collect_vec()
    }

    /// The outline of every loop, or nothing if this tiling isn't outlined
    pub fn outlines(&self) -> Vec<Elem> {
        if !self.palette.with_stroke {
            return vec![];
        }
        self.knots
            .iter()
            .map(|knot| Elem::Path(knot.path().clone(), Style::JustStroke(StrokeStyle::Outline)))
            .collect_vec()
    }

    /// The whole tiling as one [`Image`], lit from the direction `light`
    pub fn image(&self, light: Rad<f32>) -> Image {
        let mut image = Image::empty(self.viewport.width, self.viewport.height);
        image.add(self.background());
        for elem in self.fills(light).into_iter().chain(self.outlines()) {
            image.add(elem);
        }
        image
    }
}
