use std::io::Write;

use crate::config::{AlignSpec, HAlign, StatMode, VAlign};
use crate::device::PlotDevice;
use crate::foundation::core::BoundingBox;
use crate::foundation::error::{PlotError, PlotResult};
use crate::render::bindings::{BindingSet, DIAGNOSTIC, LIVE};
use crate::render::plotter::Plotter;
use crate::render::state::Placement;
use crate::stream::{CommandStream, PlotSink};

/// Which binding set a pass runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassMode {
    /// Dry run gathering extents.
    Diagnostic,
    /// Real output.
    Live,
}

impl PassMode {
    /// Binding set for this mode.
    pub fn bindings(self) -> &'static BindingSet {
        match self {
            Self::Diagnostic => &DIAGNOSTIC,
            Self::Live => &LIVE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Extent of one stream measured by the dry run.
pub struct FileExtent {
    /// Stream name.
    pub name: String,
    /// Logged extent, device units; inverted when nothing was drawn.
    pub extent: BoundingBox,
    /// The extent touches a device hard limit.
    pub clipped: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A stream abandoned after a recoverable error.
pub struct StreamFailure {
    /// Stream name.
    pub name: String,
    /// Error text.
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Outcome of [`render_streams`].
pub struct PipelineReport {
    /// Per-stream extents from the dry run, in input order.
    pub files: Vec<FileExtent>,
    /// Aggregate extent after fitting, if a dry run happened.
    pub aggregate: Option<BoundingBox>,
    /// Frames counted by the dry run.
    pub frames: i32,
    /// Any stream touched a hard limit.
    pub any_clipped: bool,
    /// The live pass ran.
    pub live_pass: bool,
    /// Default scale and shift used by the live pass.
    pub placement: Placement,
    /// Streams abandoned after a recoverable error.
    pub failures: Vec<StreamFailure>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Target size and scale ratios derived from an aggregate extent.
pub struct Fit {
    /// Target width, inches.
    pub width: f64,
    /// Target height, inches.
    pub height: f64,
    /// Horizontal scale ratio.
    pub xscale: f64,
    /// Vertical scale ratio.
    pub yscale: f64,
}

impl Fit {
    /// Fatness follows the more compressed axis.
    pub fn fat_scale(&self) -> f64 {
        self.xscale.min(self.yscale)
    }
}

/// Scale ratios that map `aggregate` onto `xsize` by `ysize` inches.
///
/// A zero size is derived from the other one, preserving the aggregate's aspect ratio.
pub fn fit_scale(
    aggregate: &BoundingBox,
    xsize: f64,
    ysize: f64,
    resolution_per_inch: f64,
) -> PlotResult<Fit> {
    let w = f64::from(aggregate.width());
    let h = f64::from(aggregate.height());
    if w <= 0.0 || h <= 0.0 {
        return Err(PlotError::validation(format!(
            "cannot fit a plot with extent {w}x{h} device units"
        )));
    }
    let width = if xsize == 0.0 { ysize * w / h } else { xsize };
    let height = if ysize == 0.0 { width * h / w } else { ysize };
    Ok(Fit {
        width,
        height,
        xscale: width * resolution_per_inch / w,
        yscale: height * resolution_per_inch / h,
    })
}

/// Shift that moves the requested edge (or midpoint) of `extent` onto zero.
pub fn alignment_shift(align: AlignSpec, extent: &BoundingBox) -> (i32, i32) {
    let h = match align.horizontal {
        HAlign::Left => -extent.xmin,
        HAlign::Right => -extent.xmax,
        HAlign::Center => -((extent.xmax + extent.xmin) / 2),
        HAlign::Unconstrained => 0,
        HAlign::Unknown(c) => {
            tracing::warn!("unknown left-right alignment type {c:?}");
            0
        }
    };
    let v = match align.vertical {
        VAlign::Bottom => -extent.ymin,
        VAlign::Top => -extent.ymax,
        VAlign::Center => -((extent.ymax + extent.ymin) / 2),
        VAlign::Unconstrained => 0,
        VAlign::Unknown(c) => {
            tracing::warn!("unknown top-bottom alignment type {c:?}");
            0
        }
    };
    (h, v)
}

/// Render every stream to the plotter's device.
///
/// When statistics, alignment or fitting are configured, a dry run over all streams measures
/// their extents first. Statistics go to `stats_out`; with statistics enabled the dry run is
/// the whole job and no live pass follows.
#[tracing::instrument(skip_all, fields(streams = streams.len()))]
pub fn render_streams<D: PlotDevice>(
    plotter: &mut Plotter<D>,
    streams: &mut [Box<dyn CommandStream>],
    stats_out: &mut dyn Write,
) -> PlotResult<PipelineReport> {
    let mut report = PipelineReport {
        placement: plotter.placement(),
        ..PipelineReport::default()
    };
    if streams.is_empty() {
        return Ok(report);
    }

    let config = plotter.config().clone();
    if config.wants_diagnostic_pass() {
        let limits = plotter.frame_limits();
        report.files = replay_pass(plotter, streams, PassMode::Diagnostic, &mut report.failures)?;
        report.frames = plotter.frames().counter + 1;
        report.any_clipped = report.files.iter().any(|f| f.clipped);

        let mut aggregate = BoundingBox::inverted(limits);
        for file in &report.files {
            aggregate.merge(&file.extent);
        }
        tracing::debug!(?aggregate, frames = report.frames, "dry run finished");

        if config.stat.is_enabled() {
            let rpi = plotter.profile().resolution_per_inch;
            write_statistics(stats_out, &report, &aggregate, config.stat, config.is_big(), rpi)?;
            for stream in streams.iter_mut() {
                stream.close()?;
            }
            report.aggregate = Some(aggregate);
            return Ok(report);
        }

        let mut placement = plotter.placement();
        if config.wants_fit() {
            let fit = fit_scale(
                &aggregate,
                config.xsize,
                config.ysize,
                plotter.profile().resolution_per_inch,
            )?;
            tracing::debug!(?fit, "fitting plot");
            aggregate = aggregate.scaled(fit.xscale, fit.yscale);
            placement.xscale *= fit.xscale;
            placement.yscale *= fit.yscale;
            placement.fatmult *= fit.fat_scale();
        }
        let (hshift, vshift) = alignment_shift(config.align, &aggregate);
        placement.hshift += hshift;
        placement.vshift += vshift;

        plotter.set_placement(placement);
        plotter.request_fresh_start();
        report.aggregate = Some(aggregate);
    }

    replay_pass(plotter, streams, PassMode::Live, &mut report.failures)?;
    report.live_pass = true;
    report.placement = plotter.placement();
    Ok(report)
}

/// Replay every stream once under `mode`.
///
/// The dry run measures and rewinds each stream; the live pass closes it. A stream failing
/// with a recoverable error is recorded in `failures` and skipped.
fn replay_pass<D: PlotDevice>(
    plotter: &mut Plotter<D>,
    streams: &mut [Box<dyn CommandStream>],
    mode: PassMode,
    failures: &mut Vec<StreamFailure>,
) -> PlotResult<Vec<FileExtent>> {
    plotter.use_bindings(mode.bindings());
    let mut files = Vec::new();
    for stream in streams.iter_mut() {
        let name = stream.name().to_string();
        let _span = tracing::debug_span!("stream", name = %name, ?mode).entered();
        if mode == PassMode::Diagnostic {
            plotter.reset_extent();
        }

        if let Err(e) = stream.replay(plotter) {
            if e.is_fatal() {
                return Err(e);
            }
            tracing::error!(error = %e, "stream abandoned");
            failures.push(StreamFailure {
                name: name.clone(),
                error: e.to_string(),
            });
        }

        match mode {
            PassMode::Diagnostic => {
                stream.rewind()?;
                let extent = plotter.extent();
                files.push(FileExtent {
                    clipped: extent.touches_limits(plotter.frame_limits()),
                    name,
                    extent,
                });
            }
            PassMode::Live => {
                plotter.close()?;
                stream.close()?;
            }
        }
    }
    Ok(files)
}

fn extent_line(name: &str, extent: &BoundingBox, mode: StatMode, rpi: f64) -> String {
    let inches = |v: i32| f64::from(v) / rpi;
    let (h, w) = (inches(extent.height()), inches(extent.width()));
    let (xmin, xmax) = (inches(extent.xmin), inches(extent.xmax));
    let (ymin, ymax) = (inches(extent.ymin), inches(extent.ymax));
    match mode {
        StatMode::Compact => format!(
            "{name:>17}: h= {h:6.2} w= {w:6.2} ;  x=( {xmin:6.2} , {xmax:6.2} ) y=( {ymin:6.2} , {ymax:6.2} ) "
        ),
        _ => format!(
            "{name:>17}: h={h:6.2} w={w:6.2}; x=({xmin:6.2},{xmax:6.2}) y=({ymin:6.2},{ymax:6.2})"
        ),
    }
}

fn write_statistics(
    out: &mut dyn Write,
    report: &PipelineReport,
    aggregate: &BoundingBox,
    mode: StatMode,
    big: bool,
    rpi: f64,
) -> PlotResult<()> {
    for file in &report.files {
        if file.extent.is_empty() {
            write!(out, "{:>17}: clipped away. ", file.name)?;
        } else {
            out.write_all(extent_line(&file.name, &file.extent, mode, rpi).as_bytes())?;
        }
        let mark = match (file.clipped, mode) {
            (false, _) => "",
            (true, StatMode::Compact) => "*",
            (true, _) => " *",
        };
        writeln!(out, "{mark}")?;
    }

    if report.files.len() > 1 {
        let name = format!("All {}", report.files.len());
        writeln!(out, "{}", extent_line(&name, aggregate, mode, rpi))?;
    }

    let plural = if report.frames == 1 { "frame" } else { "frames" };
    writeln!(out, "            Total {} plot {plural}.", report.frames)?;

    if report.any_clipped {
        if big {
            writeln!(out, "\nA * indicates a plot that has been clipped.")?;
            writeln!(
                out,
                "Remember rotated style or relative size plots go to the top"
            )?;
            writeln!(
                out,
                "of the \"screen\", which is infinitely far away if big=y."
            )?;
        } else {
            writeln!(out, "\nA * indicates a plot that has been clipped at the")?;
            writeln!(out, "virtual screen boundaries. You may not want this.")?;
            writeln!(out, "This clipping can be disabled by the big=y option.")?;
        }
    }
    Ok(())
}
