// Desktop viewer.
//
// Six fields on the left edit the matrix; the central area shows the reference
// pane and the transformed pane side by side. Each pane is a RecordingSurface
// filled by the grid renderer and painted with egui every frame.
//
// When the `viz_ui` feature is disabled (or `cli_only` is enabled), `run()`
// reports that the viewer is not compiled in.

#[cfg(all(feature = "viz_ui", not(feature = "cli_only")))]
mod imp {
    use crate::build_info::BUILD_INFO;
    use crate::desc::VizDesc;
    use crate::geom::{V2, v2};
    use crate::mat3::Mat3;
    use crate::model::{IDENTITY_INPUTS, SCALAR_NAMES};
    use crate::style::{Rgba, StyleSheet};
    use crate::surface::{Primitive, RecordingSurface};
    use crate::viz::Visualizer;
    use eframe::egui;

    pub const ENABLED: bool = true;

    const PRESETS: [(&str, [&str; 6]); 5] = [
        ("identity", IDENTITY_INPUTS),
        ("rotate 90", ["0", "1", "-1", "0", "0", "0"]),
        ("scale 2", ["2", "0", "0", "2", "0", "0"]),
        ("shear x", ["1", "0", "1", "1", "0", "0"]),
        ("reflect y", ["1", "0", "0", "-1", "0", "0"]),
    ];

    // Field order inside the 2x3 editor: rows of (a c e) and (b d f).
    const LAYOUT: [[usize; 3]; 2] = [[0, 2, 4], [1, 3, 5]];

    fn color32(c: Rgba) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
    }

    /// Maps a world-space view box onto a screen rect, keeping the aspect square.
    #[derive(Clone, Copy)]
    struct PaneView {
        world_to_screen: Mat3,
        px_per_unit: f64,
    }

    impl PaneView {
        fn new(rect: egui::Rect, view_box: [f64; 4]) -> Self {
            let [min_x, min_y, vw, vh] = view_box;
            let k = (rect.width() as f64 / vw).min(rect.height() as f64 / vh);
            // Center the view box in the rect.
            let ox = rect.center().x as f64 - k * (min_x + 0.5 * vw);
            let oy = rect.center().y as f64 - k * (min_y + 0.5 * vh);
            Self {
                world_to_screen: Mat3::from_affine2(k, 0.0, 0.0, k, 0.0, 0.0).then_translate(ox, oy),
                px_per_unit: k,
            }
        }

        fn pos(&self, p: V2) -> egui::Pos2 {
            let q = self.world_to_screen.transform(p);
            egui::pos2(q.x as f32, q.y as f32)
        }

        fn world_at(&self, pos: egui::Pos2) -> V2 {
            let k = self.px_per_unit;
            let origin = self.world_to_screen.transform(v2(0.0, 0.0));
            v2((pos.x as f64 - origin.x) / k, (pos.y as f64 - origin.y) / k)
        }

        fn stroke(&self, width: f64, color: Rgba) -> egui::Stroke {
            egui::Stroke::new((width * self.px_per_unit).max(1.0) as f32, color32(color))
        }
    }

    fn paint_pane(ui: &mut egui::Ui, title: &str, surface: &RecordingSurface, view_box: [f64; 4]) -> Option<V2> {
        ui.vertical(|ui| {
            ui.label(title);
            let side = ui.available_width().min(ui.available_height()).max(64.0);
            let (response, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

            let view = PaneView::new(rect, view_box);
            let style = surface.style.unwrap_or_default();
            let painter = painter.with_clip_rect(rect);
            for prim in &surface.prims {
                paint_primitive(&painter, &view, &style, prim);
            }

            response.hover_pos().map(|pos| view.world_at(pos))
        })
        .inner
    }

    fn paint_primitive(painter: &egui::Painter, view: &PaneView, style: &StyleSheet, prim: &Primitive) {
        match *prim {
            Primitive::Line { class, p0, p1 } => {
                let st = style.get(class);
                painter.line_segment([view.pos(p0), view.pos(p1)], view.stroke(st.width, st.stroke));
            }
            Primitive::Quad { class, pts } => {
                let st = style.get(class);
                let fill = st.fill.map(color32).unwrap_or(egui::Color32::TRANSPARENT);
                let pts: Vec<egui::Pos2> = pts.iter().map(|&p| view.pos(p)).collect();
                painter.add(egui::Shape::convex_polygon(pts, fill, view.stroke(st.width, st.stroke)));
            }
        }
    }

    struct VizApp {
        viz: Visualizer<RecordingSurface>,
        inputs: [String; 6],
        view_box: [f64; 4],
        hover_text: String,
    }

    impl VizApp {
        fn new(desc: &VizDesc) -> Self {
            Self {
                viz: Visualizer::from_desc(desc, RecordingSurface::new(), RecordingSurface::new()),
                inputs: desc.initial_inputs(),
                view_box: desc.view_box,
                hover_text: String::new(),
            }
        }

        fn apply_preset(&mut self, values: &[&str; 6]) {
            self.inputs = values.map(str::to_owned);
            self.viz.on_input_changed(&self.inputs);
        }

        fn matrix_editor(&mut self, ui: &mut egui::Ui) {
            let mut changed = false;
            egui::Grid::new("matrix").num_columns(3).spacing([6.0, 6.0]).show(ui, |ui| {
                for row in LAYOUT {
                    for i in row {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.inputs[i])
                                .desired_width(56.0)
                                .hint_text(SCALAR_NAMES[i]),
                        );
                        changed |= resp.changed();
                    }
                    ui.end_row();
                }
                for fixed in ["0", "0", "1"] {
                    ui.monospace(fixed);
                }
                ui.end_row();
            });

            if changed {
                self.viz.on_input_changed(&self.inputs);
            }
        }
    }

    impl eframe::App for VizApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.monospace(BUILD_INFO.label());
                    if !self.hover_text.is_empty() {
                        ui.separator();
                        ui.monospace(&self.hover_text);
                    }
                });
            });

            egui::SidePanel::left("left")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| {
                    ui.heading("Matrix");
                    ui.separator();
                    self.matrix_editor(ui);

                    ui.separator();
                    let mat = self.viz.model().current();
                    ui.monospace(format!("det={:.4}", mat.det()));
                    ui.monospace(format!("redraws={}", self.viz.redraw_count()));

                    ui.separator();
                    ui.label("Presets");
                    for (name, values) in PRESETS {
                        if ui.button(name).clicked() {
                            self.apply_preset(&values);
                        }
                    }
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                let view_box = self.view_box;
                let mut hover = None;
                ui.columns(2, |cols| {
                    if let Some(p) = paint_pane(&mut cols[0], "original", self.viz.reference(), view_box) {
                        hover = Some(format!("original x={:.3} y={:.3}", p.x, p.y));
                    }
                    if let Some(p) = paint_pane(&mut cols[1], "transformed", self.viz.transformed(), view_box) {
                        hover = Some(format!("transformed x={:.3} y={:.3}", p.x, p.y));
                    }
                });
                self.hover_text = hover.unwrap_or_default();
            });
        }
    }

    pub fn run(title: &str, desc: &VizDesc) -> Result<(), String> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 700.0)),
            ..Default::default()
        };
        let app = VizApp::new(desc);
        eframe::run_native(title, options, Box::new(move |_cc| Ok(Box::new(app))))
            .map_err(|e| e.to_string())
    }
}

/// Stand-in when the viewer is not compiled in.
#[cfg(not(all(feature = "viz_ui", not(feature = "cli_only"))))]
mod imp {
    use crate::desc::VizDesc;

    pub const ENABLED: bool = false;

    pub fn run(_title: &str, _desc: &VizDesc) -> Result<(), String> {
        Err("viewer not compiled in (build with the `viz_ui` feature)".to_owned())
    }
}

pub use imp::*;
