use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plotpen", version)]
/// Replay plot command lists onto a plotting device.
struct Cli {
    /// Command-list JSON files, plotted in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Base configuration JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device profile JSON.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Statistics: `y` for full lines, `l` for spaced columns, `n` for none.
    #[arg(long)]
    stat: Option<String>,

    /// Two-character alignment code, horizontal `l|r|c|u` then vertical `b|t|c|u`.
    #[arg(long)]
    align: Option<String>,

    /// Target width in inches.
    #[arg(long)]
    xsize: Option<f64>,

    /// Target height in inches.
    #[arg(long)]
    ysize: Option<f64>,

    /// Grid columns and optional rows, e.g. `3,2`.
    #[arg(long, value_delimiter = ',', num_args = 1..=2)]
    gridnum: Option<Vec<u32>>,

    /// Grid cell width and height in inches.
    #[arg(long, value_delimiter = ',', num_args = 2)]
    gridsize: Option<Vec<f64>>,

    /// Grid frame border fatness; negative disables it.
    #[arg(long, allow_negative_numbers = true)]
    grid: Option<i32>,

    /// Reduced-capability device: color changes only.
    #[arg(long)]
    dumb: bool,

    /// Raster bit depth; 0 sends byte rasters.
    #[arg(long)]
    bit: Option<i32>,

    /// Unbounded screen.
    #[arg(long)]
    big: Option<bool>,

    /// Reapply absolute positioning after erases.
    #[arg(long)]
    style: Option<bool>,

    /// Erase the page when the device is reset.
    #[arg(long)]
    force_erase: bool,

    /// Device call log, one JSON object per line (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let profile = match &cli.profile {
        Some(path) => read_json(path, "device profile")?,
        None => plotpen::DeviceProfile::default(),
    };

    let mut streams: Vec<Box<dyn plotpen::CommandStream>> = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read command list '{}'", path.display()))?;
        let list = plotpen::CommandList::from_json(path.display().to_string(), &json)?;
        streams.push(Box::new(list));
    }

    let mut plotter = plotpen::Plotter::new(
        plotpen::RecordingDevice::new(),
        config,
        profile,
        plotpen::PatternTable::new(),
    )?;

    let report = {
        let stdout = std::io::stdout();
        let mut stats = stdout.lock();
        plotpen::render_streams(&mut plotter, &mut streams, &mut stats)?
    };

    let device = plotter.into_device();
    if report.live_pass {
        write_device_log(&device, cli.out.as_deref())?;
    }

    if !report.failures.is_empty() {
        for f in &report.failures {
            eprintln!("{}: {}", f.name, f.error);
        }
        anyhow::bail!("{} input(s) could not be plotted", report.failures.len());
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse {what} '{}'", path.display()))
}

fn build_config(cli: &Cli) -> anyhow::Result<plotpen::PenConfig> {
    let mut config: plotpen::PenConfig = match &cli.config {
        Some(path) => read_json(path, "configuration")?,
        None => plotpen::PenConfig::default(),
    };

    if let Some(code) = &cli.stat {
        config.stat = plotpen::StatMode::from_code(code);
    }
    if let Some(code) = &cli.align {
        config.align = plotpen::AlignSpec::parse(code)?;
    }
    if let Some(x) = cli.xsize {
        config.xsize = x;
    }
    if let Some(y) = cli.ysize {
        config.ysize = y;
    }
    if let Some(dims) = &cli.gridnum {
        let columns = dims.first().copied().unwrap_or(1);
        let grid = config.grid.get_or_insert(plotpen::GridConfig {
            columns,
            rows: None,
            cell_size: None,
        });
        grid.columns = columns;
        grid.rows = dims.get(1).copied();
    }
    if let Some(size) = &cli.gridsize {
        let &[w, h] = size.as_slice() else {
            anyhow::bail!("--gridsize takes WIDTH,HEIGHT");
        };
        let grid = config
            .grid
            .as_mut()
            .context("--gridsize needs --gridnum")?;
        grid.cell_size = Some([w, h]);
    }
    if let Some(border) = cli.grid {
        config.frame_border = border;
    }
    if cli.dumb {
        config.dumb = true;
    }
    if let Some(bit) = cli.bit {
        config.bit = bit;
    }
    if cli.big.is_some() {
        config.big = cli.big;
    }
    if cli.style.is_some() {
        config.absolute_style = cli.style;
    }
    if cli.force_erase {
        config.force_initial_erase = true;
    }
    config.validate()?;
    Ok(config)
}

fn write_device_log(device: &plotpen::RecordingDevice, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create device log '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            device.write_json_lines(&mut w)?;
            w.flush()
                .with_context(|| format!("write device log '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            device.write_json_lines(&mut w)?;
            w.flush()?;
        }
    }
    Ok(())
}
