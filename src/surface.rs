use crate::geom::V2;
use crate::style::{PrimClass, StyleSheet};

/// One drawable item produced by a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Line { class: PrimClass, p0: V2, p1: V2 },
    /// Closed quadrilateral; the last corner connects back to the first.
    Quad { class: PrimClass, pts: [V2; 4] },
}

impl Primitive {
    pub fn class(&self) -> PrimClass {
        match self {
            Primitive::Line { class, .. } | Primitive::Quad { class, .. } => *class,
        }
    }
}

/// Something a pane can be drawn into.
///
/// A render pass calls `clear()`, then `set_style()` once, then `add_primitive()`
/// in back-to-front order.
pub trait Surface {
    fn clear(&mut self);
    fn set_style(&mut self, style: &StyleSheet);
    fn add_primitive(&mut self, prim: &Primitive);
}

/// Keeps everything it was given, in order. Used headless and as the viewer's per-pane cache.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub style: Option<StyleSheet>,
    pub prims: Vec<Primitive>,
    /// Number of completed `clear()` calls.
    pub clear_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_class(&self, class: PrimClass) -> usize {
        self.prims.iter().filter(|p| p.class() == class).count()
    }

    /// Replays the recorded pass into another surface.
    pub fn replay<S: Surface + ?Sized>(&self, dst: &mut S) {
        dst.clear();
        if let Some(style) = &self.style {
            dst.set_style(style);
        }
        for prim in &self.prims {
            dst.add_primitive(prim);
        }
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.style = None;
        self.prims.clear();
        self.clear_count += 1;
    }

    fn set_style(&mut self, style: &StyleSheet) {
        self.style = Some(*style);
    }

    fn add_primitive(&mut self, prim: &Primitive) {
        self.prims.push(*prim);
    }
}
