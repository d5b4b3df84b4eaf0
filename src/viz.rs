use crate::desc::VizDesc;
use crate::grid::{GridSpec, render_reference_grid, render_transformed_grid};
use crate::mat3::Mat3;
use crate::model::MatrixModel;
use crate::style::StyleSheet;
use crate::surface::Surface;
use tracing::{debug, info};

/// One reference pane, one transformed pane, and the matrix driving the latter.
///
/// The reference pane is drawn once in `new()` and never touched again.
/// Every input change rebuilds the matrix and fully redraws the transformed pane.
pub struct Visualizer<S: Surface> {
    model: MatrixModel,
    spec: GridSpec,
    style: StyleSheet,
    reference: S,
    transformed: S,
    redraw_count: usize,
}

impl<S: Surface> Visualizer<S> {
    pub fn new(spec: GridSpec, style: StyleSheet, reference: S, transformed: S) -> Self {
        Self::with_matrix(spec, style, Mat3::identity(), reference, transformed)
    }

    pub fn from_desc(desc: &VizDesc, reference: S, transformed: S) -> Self {
        Self::with_matrix(desc.grid, desc.style, desc.initial_matrix(), reference, transformed)
    }

    fn with_matrix(spec: GridSpec, style: StyleSheet, mat: Mat3, mut reference: S, transformed: S) -> Self {
        render_reference_grid(&mut reference, &spec, &style);

        let mut model = MatrixModel::new();
        let [a, b, c, d, e, f] = mat.affine2();
        model.set_from_scalars(a, b, c, d, e, f);

        let mut out = Self {
            model,
            spec,
            style,
            reference,
            transformed,
            redraw_count: 0,
        };
        out.redraw_transformed();
        info!(line_count = spec.line_count, spacing = spec.spacing, "visualizer ready");
        out
    }

    /// Called whenever any of the six fields changes.
    pub fn on_input_changed<T: AsRef<str>>(&mut self, inputs: &[T; 6]) {
        self.model.set_from_inputs(inputs);
        self.redraw_transformed();
    }

    fn redraw_transformed(&mut self) {
        let mat = self.model.current();
        render_transformed_grid(&mut self.transformed, &self.spec, &self.style, &mat);
        self.redraw_count += 1;
        debug!(redraw = self.redraw_count, det = mat.det(), "transformed pane redrawn");
    }

    pub fn model(&self) -> &MatrixModel {
        &self.model
    }

    pub fn reference(&self) -> &S {
        &self.reference
    }

    pub fn transformed(&self) -> &S {
        &self.transformed
    }

    /// Times the transformed pane has been drawn, including the initial draw.
    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    pub fn into_surfaces(self) -> (S, S) {
        (self.reference, self.transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;
    use crate::grid::grid_primitives;
    use crate::surface::RecordingSurface;

    fn recording_viz() -> Visualizer<RecordingSurface> {
        Visualizer::new(
            GridSpec::default(),
            StyleSheet::default(),
            RecordingSurface::new(),
            RecordingSurface::new(),
        )
    }

    #[test]
    fn startup_draws_both_panes_at_identity() {
        let viz = recording_viz();
        assert_eq!(viz.reference().prims, viz.transformed().prims);
        assert_eq!(viz.reference().clear_count, 1);
        assert_eq!(viz.redraw_count(), 1);
    }

    #[test]
    fn input_change_only_redraws_transformed() {
        let mut viz = recording_viz();
        let reference_before = viz.reference().prims.clone();

        viz.on_input_changed(&["2", "0", "0", "3", "1", "1"]);
        viz.on_input_changed(&["0", "1", "-1", "0", "0", "0"]);

        assert_eq!(viz.reference().prims, reference_before);
        assert_eq!(viz.reference().clear_count, 1);
        assert_eq!(viz.transformed().clear_count, 3);
        assert_eq!(viz.redraw_count(), 3);

        let rot = Mat3::from_affine2(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
        assert_eq!(viz.transformed().prims, grid_primitives(&GridSpec::default(), &rot));
        assert_eq!(viz.model().transform(v2(1.0, 0.0)), v2(0.0, 1.0));
    }

    #[test]
    fn garbage_input_still_redraws() {
        let mut viz = recording_viz();
        viz.on_input_changed(&["", "oops", "0", "1", "", ""]);
        assert_eq!(viz.model().current(), Mat3::from_affine2(0.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(viz.redraw_count(), 2);
        assert_eq!(viz.transformed().prims.len(), 11);
    }

    #[test]
    fn desc_sets_initial_matrix() {
        let desc = crate::desc::parse_viz_json(r#"{ "initial_mat": [1, 0, 0, 1, 3, 4] }"#).unwrap();
        let viz = Visualizer::from_desc(&desc, RecordingSurface::new(), RecordingSurface::new());
        assert_eq!(viz.model().transform(v2(0.0, 0.0)), v2(3.0, 4.0));
        assert_ne!(viz.reference().prims, viz.transformed().prims);
    }
}
