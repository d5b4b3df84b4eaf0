use crate::build_info::BUILD_INFO;
use crate::desc::{VizDesc, load_viz_desc};
use crate::model::MatrixModel;
use crate::raster::RasterSurface;
use crate::surface::RecordingSurface;
use crate::svg::SvgSurface;
use crate::viz::Visualizer;
use crate::viz_ui;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

pub const USAGE: &str = "\
usage: affviz [--config <path.json>] [--mat a,b,c,d,e,f]
              [--svg <out.svg>] [--ref-svg <out.svg>] [--png <out.png>] [--version]

  x' = a*x + c*y + e
  y' = b*x + d*y + f

With no output flag the viewer window opens (or, without the viewer,
the transformed pane is written to stdout as SVG).";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    /// Raw text of the six fields, as given. Missing trailing fields are empty.
    pub mat: Option<[String; 6]>,
    pub svg: Option<PathBuf>,
    pub ref_svg: Option<PathBuf>,
    pub png: Option<PathBuf>,
    pub version: bool,
}

impl CliArgs {
    pub fn wants_files(&self) -> bool {
        self.svg.is_some() || self.ref_svg.is_some() || self.png.is_some()
    }
}

/// Splits `a,b,c,d,e,f` into six fields. Fewer than six pads with empty fields.
pub fn split_mat(text: &str) -> Result<[String; 6], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() > 6 {
        return Err(format!("--mat takes at most 6 values, got {}", parts.len()));
    }
    Ok(std::array::from_fn(|i| parts.get(i).map(|s| s.to_string()).unwrap_or_default()))
}

/// Parses arguments, not including the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut it = args.into_iter();

    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().ok_or_else(|| format!("{flag} expects a value"));
        match arg.as_str() {
            "--config" => out.config = Some(value("--config")?.into()),
            "--mat" => out.mat = Some(split_mat(&value("--mat")?)?),
            "--svg" => out.svg = Some(value("--svg")?.into()),
            "--ref-svg" => out.ref_svg = Some(value("--ref-svg")?.into()),
            "--png" => out.png = Some(value("--png")?.into()),
            "--version" | "-V" => out.version = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(out)
}

#[cfg(feature = "im-io")]
fn save_png(raster: &RasterSurface, path: &Path) -> Result<(), String> {
    let im = raster.to_rgba_im().ok_or("raster buffer has an unexpected size")?;
    im.save_png(path)
        .map_err(|e| format!("writing {}: {e}", path.display()))
}

#[cfg(not(feature = "im-io"))]
fn save_png(_raster: &RasterSurface, _path: &Path) -> Result<(), String> {
    Err("png output needs the `im-io` feature".to_owned())
}

fn save_svg(svg: &SvgSurface, path: &Path) -> Result<(), String> {
    svg.save(path).map_err(|e| format!("writing {}: {e}", path.display()))
}

/// Renders both panes headlessly and writes whatever `cli` asks for. With no file
/// flag the transformed pane goes to `stdout` as SVG.
pub fn write_outputs(cli: &CliArgs, desc: &VizDesc, stdout: &mut dyn Write) -> Result<(), String> {
    let viz = Visualizer::from_desc(desc, RecordingSurface::new(), RecordingSurface::new());
    let (reference, transformed) = viz.into_surfaces();

    if let Some(path) = &cli.ref_svg {
        let mut svg = SvgSurface::new(desc.view_box).with_id("original-grid");
        reference.replay(&mut svg);
        save_svg(&svg, path)?;
        info!(path = %path.display(), "wrote reference svg");
    }

    if let Some(path) = &cli.svg {
        let mut svg = SvgSurface::new(desc.view_box).with_id("transformed-grid");
        transformed.replay(&mut svg);
        save_svg(&svg, path)?;
        info!(path = %path.display(), "wrote transformed svg");
    }

    if let Some(path) = &cli.png {
        let mut raster = RasterSurface::new(desc.raster_px, desc.raster_px, desc.view_box)
            .ok_or_else(|| format!("cannot allocate a {0}x{0} raster", desc.raster_px))?;
        transformed.replay(&mut raster);
        save_png(&raster, path)?;
        info!(path = %path.display(), "wrote transformed png");
    }

    if !cli.wants_files() {
        let mut svg = SvgSurface::new(desc.view_box).with_id("transformed-grid");
        transformed.replay(&mut svg);
        stdout
            .write_all(svg.to_svg_string().as_bytes())
            .map_err(|e| format!("writing stdout: {e}"))?;
    }

    Ok(())
}

/// Whole command-line flow. Returns the process exit code: `EXIT_USAGE` for bad
/// arguments, `EXIT_FAILURE` for config or output errors.
pub fn run<I: IntoIterator<Item = String>>(args: I, stdout: &mut dyn Write) -> u8 {
    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            return EXIT_USAGE;
        }
    };

    if cli.version {
        return match writeln!(stdout, "affviz {}", BUILD_INFO.label()) {
            Ok(()) => EXIT_OK,
            Err(e) => {
                error!("writing stdout: {e}");
                EXIT_FAILURE
            }
        };
    }

    let mut desc = match &cli.config {
        Some(path) => match load_viz_desc(path) {
            Ok(desc) => desc,
            Err(e) => {
                error!("{e}");
                return EXIT_FAILURE;
            }
        },
        None => VizDesc::default(),
    };

    if let Some(fields) = &cli.mat {
        let mut model = MatrixModel::new();
        model.set_from_inputs(fields);
        desc.initial_mat = model.current().affine2().to_vec();
    }

    let result = if cli.wants_files() || !viz_ui::ENABLED {
        write_outputs(&cli, &desc, stdout)
    } else {
        viz_ui::run(&format!("affviz {}", BUILD_INFO.label()), &desc)
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(msg) => {
            error!("{msg}");
            EXIT_FAILURE
        }
    }
}
