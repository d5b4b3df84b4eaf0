// Library crate root.
//
// This crate is used both as a binary (src/main.rs) and as a library.
// Keeping modules here prevents "dead_code" warnings for public APIs that are
// intentionally exported for downstream crates.

pub mod build_info;
pub mod cli;
pub mod desc;
pub mod geom;
pub mod grid;
pub mod im;
pub mod logging;
pub mod mat3;
pub mod model;
pub mod raster;
pub mod style;
pub mod surface;
pub mod svg;
pub mod viz;
pub mod viz_ui;
