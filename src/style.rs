use serde::Deserialize;
use std::fmt;

/// Which visual class a primitive belongs to. Each class has one fixed style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimClass {
    GridLine,
    Axis,
    UnitSquare,
}

impl PrimClass {
    pub const fn css_class(self) -> &'static str {
        match self {
            PrimClass::GridLine => "grid-line",
            PrimClass::Axis => "axis",
            PrimClass::UnitSquare => "unit-square",
        }
    }
}

/// sRGB color with straight (non-premultiplied) alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Rgba {
    Rgba { r, g, b, a }
}

impl Rgba {
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClassStyle {
    pub stroke: Rgba,
    /// Stroke width in world units.
    pub width: f64,
    #[serde(default)]
    pub fill: Option<Rgba>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub grid_line: ClassStyle,
    pub axis: ClassStyle,
    pub unit_square: ClassStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            grid_line: ClassStyle {
                stroke: rgba(26, 26, 46, 0.2),
                width: 0.02,
                fill: None,
            },
            axis: ClassStyle {
                stroke: rgba(74, 111, 216, 0.6),
                width: 0.04,
                fill: None,
            },
            unit_square: ClassStyle {
                stroke: rgba(26, 26, 46, 0.6),
                width: 0.05,
                fill: Some(rgba(26, 26, 46, 0.15)),
            },
        }
    }
}

impl StyleSheet {
    pub fn get(&self, class: PrimClass) -> &ClassStyle {
        match class {
            PrimClass::GridLine => &self.grid_line,
            PrimClass::Axis => &self.axis,
            PrimClass::UnitSquare => &self.unit_square,
        }
    }

    /// CSS text for an SVG `<style>` element, one rule per class.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for class in [PrimClass::GridLine, PrimClass::Axis, PrimClass::UnitSquare] {
            let st = self.get(class);
            out.push_str(&format!(".{} {{ ", class.css_class()));
            match st.fill {
                Some(fill) => out.push_str(&format!("fill: {fill}; ")),
                None => out.push_str("fill: none; "),
            }
            out.push_str(&format!("stroke: {}; stroke-width: {}; }}\n", st.stroke, st.width));
        }
        out
    }
}
