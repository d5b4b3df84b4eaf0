use crate::geom::V2;
use crate::style::StyleSheet;
use crate::surface::{Primitive, Surface};
use std::fmt::Write as _;
use std::path::Path;

pub const DEFAULT_VIEW_BOX: [f64; 4] = [-5.0, -5.0, 10.0, 10.0];

/// Shortest round-trip decimal, with `-0` printed as `0`.
pub fn fmt_num(v: f64) -> String {
    format!("{}", v + 0.0)
}

/// Escapes text for use inside a double-quoted XML attribute.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt_pt(p: V2) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

/// Builds a standalone SVG document, one element per primitive.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    pub id: Option<String>,
    pub view_box: [f64; 4],
    css: Option<String>,
    elements: Vec<String>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_BOX)
    }
}

impl SvgSurface {
    pub fn new(view_box: [f64; 4]) -> Self {
        Self {
            id: None,
            view_box,
            css: None,
            elements: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// The drawn elements, without the surrounding `<svg>` or `<style>`.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn to_svg_string(&self) -> String {
        let [x, y, w, h] = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        if let Some(id) = &self.id {
            let _ = write!(out, r#" id="{}""#, escape_attr(id));
        }
        let _ = writeln!(
            out,
            r#" viewBox="{} {} {} {}">"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        );
        if let Some(css) = &self.css {
            let _ = writeln!(out, "<style>\n{css}</style>");
        }
        for el in &self.elements {
            out.push_str(el);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_svg_string())
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.css = None;
        self.elements.clear();
    }

    fn set_style(&mut self, style: &StyleSheet) {
        self.css = Some(style.to_css());
    }

    fn add_primitive(&mut self, prim: &Primitive) {
        let el = match *prim {
            Primitive::Line { class, p0, p1 } => format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="{}"/>"#,
                fmt_num(p0.x),
                fmt_num(p0.y),
                fmt_num(p1.x),
                fmt_num(p1.y),
                class.css_class()
            ),
            Primitive::Quad { class, pts } => {
                let points: Vec<String> = pts.iter().map(|&p| fmt_pt(p)).collect();
                format!(r#"<polygon points="{}" class="{}"/>"#, points.join(" "), class.css_class())
            }
        };
        self.elements.push(el);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;
    use crate::style::PrimClass;

    #[test]
    fn numbers_print_short() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-1.25), "-1.25");
    }

    #[test]
    fn line_and_polygon_markup() {
        let mut svg = SvgSurface::default();
        svg.add_primitive(&Primitive::Line {
            class: PrimClass::Axis,
            p0: v2(0.0, -2.0),
            p1: v2(0.0, 2.0),
        });
        svg.add_primitive(&Primitive::Quad {
            class: PrimClass::UnitSquare,
            pts: [v2(0.0, 0.0), v2(2.0, 0.0), v2(2.0, 2.0), v2(0.0, 2.0)],
        });
        assert_eq!(svg.elements()[0], r#"<line x1="0" y1="-2" x2="0" y2="2" class="axis"/>"#);
        assert_eq!(
            svg.elements()[1],
            r#"<polygon points="0,0 2,0 2,2 0,2" class="unit-square"/>"#
        );
    }

    #[test]
    fn document_wraps_style_and_elements() {
        let mut svg = SvgSurface::new([-1.0, -1.0, 2.0, 2.0]).with_id("transformed-grid");
        svg.set_style(&StyleSheet::default());
        svg.add_primitive(&Primitive::Line {
            class: PrimClass::GridLine,
            p0: v2(1.0, -1.0),
            p1: v2(1.0, 1.0),
        });
        let doc = svg.to_svg_string();
        assert!(doc.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="transformed-grid" viewBox="-1 -1 2 2">"#
        ));
        assert!(doc.contains("<style>\n.grid-line"));
        assert!(doc.contains(r#"class="grid-line"/>"#));
        assert!(doc.ends_with("</svg>\n"));

        svg.clear();
        assert!(svg.elements().is_empty());
        assert!(!svg.to_svg_string().contains("<style>"));
    }

    #[test]
    fn id_is_escaped() {
        let svg = SvgSurface::default().with_id(r#"a"b&c<d>"#);
        let doc = svg.to_svg_string();
        assert!(doc.contains(r#" id="a&quot;b&amp;c&lt;d&gt;" viewBox="#));
        assert_eq!(escape_attr("transformed-grid"), "transformed-grid");
    }
}
