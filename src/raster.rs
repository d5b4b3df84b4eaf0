use crate::geom::V2;
use crate::im::RGBAIm;
use crate::style::{ClassStyle, PrimClass, Rgba, StyleSheet};
use crate::surface::{Primitive, Surface};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

fn skia_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.alpha_u8())
}

fn solid_paint(c: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(c));
    paint.anti_alias = true;
    paint
}

/// Draws primitives into a `tiny_skia::Pixmap`. World coordinates are mapped onto
/// the pixmap through a view box, the same way an SVG `viewBox` would, so stroke
/// widths stay in world units.
pub struct RasterSurface {
    pixmap: Pixmap,
    world_to_px: Transform,
    style: StyleSheet,
}

impl RasterSurface {
    /// Returns `None` when `w` or `h` is zero or the pixmap would be too large.
    pub fn new(w: u32, h: u32, view_box: [f64; 4]) -> Option<Self> {
        let [min_x, min_y, vw, vh] = view_box;
        let sx = (w as f64 / vw) as f32;
        let sy = (h as f64 / vh) as f32;
        let world_to_px = Transform::from_row(sx, 0.0, 0.0, sy, -min_x as f32 * sx, -min_y as f32 * sy);

        let mut pixmap = Pixmap::new(w, h)?;
        pixmap.fill(Color::WHITE);
        Some(Self {
            pixmap,
            world_to_px,
            style: StyleSheet::default(),
        })
    }

    pub fn world_to_px(&self) -> Transform {
        self.world_to_px
    }

    /// Straight-alpha RGBA copy of the pixmap.
    pub fn to_rgba_im(&self) -> Option<RGBAIm> {
        let arr: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let w = self.pixmap.width() as usize;
        let h = self.pixmap.height() as usize;
        RGBAIm::from_raw(w, h, arr)
    }

    fn class_style(&self, class: PrimClass) -> ClassStyle {
        *self.style.get(class)
    }

    fn stroke_ring(&mut self, pts: &[V2], close: bool, st: &ClassStyle) {
        let mut pb = PathBuilder::new();
        for (i, p) in pts.iter().enumerate() {
            if i == 0 {
                pb.move_to(p.x as f32, p.y as f32);
            } else {
                pb.line_to(p.x as f32, p.y as f32);
            }
        }
        if close {
            pb.close();
        }
        // Degenerate (zero-length) paths have nothing to draw.
        let Some(path) = pb.finish() else {
            return;
        };

        if close {
            if let Some(fill) = st.fill {
                self.pixmap
                    .fill_path(&path, &solid_paint(fill), FillRule::EvenOdd, self.world_to_px, None);
            }
        }
        let stroke = Stroke {
            width: st.width as f32,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &solid_paint(st.stroke), &stroke, self.world_to_px, None);
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    fn set_style(&mut self, style: &StyleSheet) {
        self.style = *style;
    }

    fn add_primitive(&mut self, prim: &Primitive) {
        match *prim {
            Primitive::Line { class, p0, p1 } => {
                let st = self.class_style(class);
                self.stroke_ring(&[p0, p1], false, &st);
            }
            Primitive::Quad { class, pts } => {
                let st = self.class_style(class);
                self.stroke_ring(&pts, true, &st);
            }
        }
    }
}
