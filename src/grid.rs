use crate::geom::{V2, v2};
use crate::mat3::Mat3;
use crate::style::{PrimClass, StyleSheet};
use crate::surface::{Primitive, Surface};
use serde::Deserialize;
use tracing::debug;

/// Corners of the reference square, counter-clockwise in world space.
pub const UNIT_SQUARE: [V2; 4] = [v2(0.0, 0.0), v2(1.0, 0.0), v2(1.0, 1.0), v2(0.0, 1.0)];

/// Grid extent and spacing. Fixed for the lifetime of a visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Lines per direction. Even counts round down to the next odd count
    /// because lines are placed symmetrically around the axis.
    pub line_count: u32,
    /// World-unit distance between adjacent lines.
    pub spacing: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            line_count: 5,
            spacing: 1.0,
        }
    }
}

impl GridSpec {
    pub fn half(&self) -> i32 {
        (self.line_count / 2) as i32
    }

    /// Lines actually drawn in each direction, `2 * half + 1`.
    pub fn lines_per_direction(&self) -> usize {
        2 * self.half() as usize + 1
    }

    /// Distance from the center to the outermost line.
    pub fn extent(&self) -> f64 {
        self.half() as f64 * self.spacing
    }
}

/// Builds every primitive of one pane, already in draw order:
/// grid lines, then axes, then the unit square.
pub fn grid_primitives(spec: &GridSpec, mat: &Mat3) -> Vec<Primitive> {
    let half = spec.half();
    let s = spec.spacing;
    let ext = spec.extent();

    let mut lines = Vec::with_capacity(2 * spec.lines_per_direction());
    let mut axes = Vec::with_capacity(2);

    for i in -half..=half {
        let at = i as f64 * s;
        let class = if i == 0 { PrimClass::Axis } else { PrimClass::GridLine };
        let out = if i == 0 { &mut axes } else { &mut lines };

        // Vertical then horizontal.
        for (p0, p1) in [(v2(at, -ext), v2(at, ext)), (v2(-ext, at), v2(ext, at))] {
            out.push(Primitive::Line {
                class,
                p0: mat.transform(p0),
                p1: mat.transform(p1),
            });
        }
    }

    let mut prims = lines;
    prims.append(&mut axes);
    prims.push(Primitive::Quad {
        class: PrimClass::UnitSquare,
        pts: UNIT_SQUARE.map(|c| mat.transform(c)),
    });
    prims
}

/// Clears `surface` and draws the full pane for `mat`.
pub fn render_grid<S: Surface + ?Sized>(surface: &mut S, spec: &GridSpec, style: &StyleSheet, mat: &Mat3) {
    let prims = grid_primitives(spec, mat);

    surface.clear();
    surface.set_style(style);
    for prim in &prims {
        surface.add_primitive(prim);
    }

    debug!(
        prims = prims.len(),
        lines_per_direction = spec.lines_per_direction(),
        "grid rendered"
    );
}

/// Draws the untransformed grid. Called once per visualizer.
pub fn render_reference_grid<S: Surface + ?Sized>(surface: &mut S, spec: &GridSpec, style: &StyleSheet) {
    render_grid(surface, spec, style, &Mat3::identity());
}

/// Wipes whatever `surface` held and redraws the grid through `mat`.
pub fn render_transformed_grid<S: Surface + ?Sized>(
    surface: &mut S,
    spec: &GridSpec,
    style: &StyleSheet,
    mat: &Mat3,
) {
    render_grid(surface, spec, style, mat);
}
