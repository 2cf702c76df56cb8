//! Command-line preview: load a shapes file, measure, draw once, replay taps.

use kurbo::{Point, Size};
use shapebutton_core::{
    ConfigError, DisplayMetrics, MeasureSpec, PointerEvent, ShapeCollection, load_shapes_file,
};
use shapebutton_render::{DrawCommand, RecordingSurface, RenderError};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

pub const USAGE: &str = "usage: shapebutton [--density <d>] <shapes.xml|shapes.json> [x,y ...]";

/// Preview errors.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),
    #[error("Invalid tap '{0}', expected x,y")]
    InvalidTap(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewArgs {
    pub path: PathBuf,
    pub metrics: DisplayMetrics,
    pub taps: Vec<Point>,
}

impl PreviewArgs {
    /// Parse arguments (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self, PreviewError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut metrics = DisplayMetrics::default();
        let mut path = None;
        let mut taps = Vec::new();

        while let Some(arg) = args.next() {
            if arg == "--density" {
                let value = args
                    .next()
                    .ok_or_else(|| PreviewError::Usage("--density needs a value".into()))?;
                let density = value
                    .parse::<f64>()
                    .ok()
                    .filter(|d| *d > 0.0)
                    .ok_or_else(|| PreviewError::Usage(format!("Invalid density '{value}'")))?;
                metrics = DisplayMetrics::new(density);
            } else if path.is_none() {
                path = Some(PathBuf::from(arg));
            } else {
                taps.push(parse_tap(&arg)?);
            }
        }

        let path = path.ok_or_else(|| PreviewError::Usage("missing shapes file".into()))?;
        Ok(Self {
            path,
            metrics,
            taps,
        })
    }
}

fn parse_tap(arg: &str) -> Result<Point, PreviewError> {
    let invalid = || PreviewError::InvalidTap(arg.to_string());
    let (x, y) = arg.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}

/// Outcome of one preview run.
#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
    /// Clicked identifier per tap, `None` when the tap clicked nothing.
    pub clicks: Vec<(Point, Option<String>)>,
}

/// Load, measure, draw and replay taps.
pub fn run(args: &PreviewArgs) -> Result<PreviewReport, PreviewError> {
    let shapes = load_shapes_file(Some(&args.path), &args.metrics)?;
    log::info!("Loaded {} shapes from {}", shapes.len(), args.path.display());

    let mut collection = ShapeCollection::new();
    collection.add_shapes(shapes);
    let last_click = Rc::new(RefCell::new(None));
    let sink = last_click.clone();
    collection.set_on_click(move |id| *sink.borrow_mut() = Some(id.to_string()));

    let size = collection.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);

    let mut surface = RecordingSurface::new();
    collection.draw(&mut surface);
    let commands = surface.finish()?;
    collection.take_redraw_request();

    let mut clicks = Vec::with_capacity(args.taps.len());
    for &position in &args.taps {
        collection.handle_pointer_event(PointerEvent::Down { position });
        collection.handle_pointer_event(PointerEvent::Up { position });
        let clicked = last_click.borrow_mut().take();
        match &clicked {
            Some(id) => log::info!("Tap at ({}, {}) clicked '{}'", position.x, position.y, id),
            None => log::info!("Tap at ({}, {}) clicked nothing", position.x, position.y),
        }
        clicks.push((position, clicked));
    }

    Ok(PreviewReport {
        size,
        commands,
        clicks,
    })
}

/// Human-readable report.
pub fn format_report(report: &PreviewReport) -> String {
    let mut out = format!("size {}x{}\n", report.size.width, report.size.height);
    for command in &report.commands {
        let bounds = command.local_bounds();
        let origin = command.transform() * Point::ZERO;
        let rgba = command.color().to_rgba8();
        out.push_str(&format!(
            "fill {} {}x{} at ({:.1}, {:.1}) #{:02X}{:02X}{:02X}{:02X}\n",
            command.primitive(),
            bounds.width(),
            bounds.height(),
            origin.x,
            origin.y,
            rgba.a,
            rgba.r,
            rgba.g,
            rgba.b,
        ));
    }
    for (position, clicked) in &report.clicks {
        out.push_str(&format!(
            "tap ({}, {}) -> {}\n",
            position.x,
            position.y,
            clicked.as_deref().unwrap_or("-")
        ));
    }
    out
}
