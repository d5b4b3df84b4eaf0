use crate::grid::GridSpec;
use crate::mat3::Mat3;
use crate::style::StyleSheet;
use crate::svg::{DEFAULT_VIEW_BOX, fmt_num};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing viz json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// Largest accepted `raster_px`.
pub const MAX_RASTER_PX: u32 = 16384;

/// Session settings. Every field has a default, so `{}` is a valid description.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizDesc {
    pub grid: GridSpec,
    /// `[a, b, c, d, e, f]`. Anything shorter than 6 falls back to identity.
    pub initial_mat: Vec<f64>,
    pub style: StyleSheet,
    /// `[min_x, min_y, w, h]` in world units.
    pub view_box: [f64; 4],
    /// Edge length of PNG snapshots, `1..=MAX_RASTER_PX`.
    pub raster_px: u32,
}

impl Default for VizDesc {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            initial_mat: default_initial_mat(),
            style: StyleSheet::default(),
            view_box: DEFAULT_VIEW_BOX,
            raster_px: 400,
        }
    }
}

fn default_initial_mat() -> Vec<f64> {
    vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
}

impl VizDesc {
    pub fn initial_matrix(&self) -> Mat3 {
        Mat3::from_slice(&self.initial_mat).unwrap_or_default()
    }

    /// Text for the six form fields matching `initial_matrix()`.
    pub fn initial_inputs(&self) -> [String; 6] {
        self.initial_matrix().affine2().map(fmt_num)
    }

    pub fn validate(&self) -> Result<(), DescError> {
        if self.grid.line_count == 0 {
            return Err(DescError::InvalidGrid("line_count must be at least 1".to_owned()));
        }
        if !(self.grid.spacing.is_finite() && self.grid.spacing > 0.0) {
            return Err(DescError::InvalidGrid(format!(
                "spacing must be finite and > 0, got {}",
                self.grid.spacing
            )));
        }
        let [_, _, w, h] = self.view_box;
        if !(w > 0.0 && h > 0.0) {
            return Err(DescError::InvalidGrid(format!("view_box needs positive size, got {w}x{h}")));
        }
        if !(1..=MAX_RASTER_PX).contains(&self.raster_px) {
            return Err(DescError::InvalidGrid(format!(
                "raster_px must be in 1..={MAX_RASTER_PX}, got {}",
                self.raster_px
            )));
        }
        Ok(())
    }
}

pub fn parse_viz_json(json_text: &str) -> Result<VizDesc, serde_json::Error> {
    serde_json::from_str(json_text)
}

/// Reads, parses and validates a description file.
pub fn load_viz_desc<P: AsRef<Path>>(path: P) -> Result<VizDesc, DescError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DescError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let desc = parse_viz_json(&text)?;
    desc.validate()?;
    Ok(desc)
}
