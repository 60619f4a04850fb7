use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollpin::{
    CorrectiveScroll, FrameOutput, NormalizedRange, Page, PageLayout, RecordingSink,
    SectionGeometry, SnapDecision,
};

#[derive(Parser, Debug)]
#[command(name = "scrollpin", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print section geometry and the normalized snap ranges.
    Ranges(RangesArgs),
    /// Print the snap decision for one normalized rest position.
    Snap(SnapArgs),
    /// Scroll to each stop, release, and print the settled frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct RangesArgs {
    /// Input page layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SnapArgs {
    /// Input page layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Normalized rest position in [0, 1].
    #[arg(long)]
    at: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Comma-separated normalized rest positions.
    #[arg(long, value_delimiter = ',', required = true)]
    stops: Vec<f64>,

    /// Frame time step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Upper bound on frames simulated per stop.
    #[arg(long, default_value_t = 600)]
    max_frames: usize,
}

#[derive(serde::Serialize)]
struct RangesReport<'a> {
    document_height: f64,
    max_scroll: f64,
    sections: &'a [SectionGeometry],
    ranges: &'a [NormalizedRange],
}

#[derive(serde::Serialize)]
struct SnapReport {
    decision: SnapDecision,
    offset: f64,
    target_offset: f64,
}

#[derive(serde::Serialize)]
struct StopReport {
    stop: f64,
    corrective: Option<CorrectiveScroll>,
    frames: usize,
    frame: FrameOutput,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Ranges(args) => cmd_ranges(args),
        Command::Snap(args) => cmd_snap(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

/// Load the layout, mount every section and open the readiness barrier.
fn mounted_page(path: &Path) -> anyhow::Result<Page> {
    let layout = PageLayout::from_path(path)
        .with_context(|| format!("load page layout '{}'", path.display()))?;
    let mut page = Page::from_layout(&layout).with_context(|| "build page")?;
    page.mount(Duration::ZERO);
    page.mount_sections();
    page.declare_all();
    page.poll(Duration::ZERO);
    Ok(page)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).with_context(|| "serialize report")?;
    println!("{s}");
    Ok(())
}

fn cmd_ranges(args: RangesArgs) -> anyhow::Result<()> {
    let page = mounted_page(&args.in_path)?;
    let g = page.geometry();
    print_json(&RangesReport {
        document_height: g.document_height,
        max_scroll: g.max_scroll,
        sections: &g.sections,
        ranges: page.policy().map(|p| p.ranges()).unwrap_or_default(),
    })
}

fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    if !args.at.is_finite() {
        anyhow::bail!("--at must be a finite number");
    }
    let page = mounted_page(&args.in_path)?;
    let decision = page.policy().map_or(
        SnapDecision {
            value: args.at,
            target: args.at,
            range: None,
        },
        |p| p.decide(args.at),
    );
    let max_scroll = page.geometry().max_scroll;
    print_json(&SnapReport {
        decision,
        offset: args.at * max_scroll,
        target_offset: decision.target * max_scroll,
    })
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.dt.is_finite() && args.dt > 0.0) {
        anyhow::bail!("--dt must be a positive number");
    }
    let mut page = mounted_page(&args.in_path)?;
    let max_scroll = page.geometry().max_scroll;
    let mut sink = RecordingSink::default();
    let mut reports = Vec::with_capacity(args.stops.len());

    for stop in args.stops {
        page.interrupt();
        let corrective = page.on_scroll_end(stop * max_scroll);

        let mut frames = 0;
        let mut frame = page.advance(args.dt, &mut sink);
        while frames < args.max_frames && page.is_animating() {
            frame = page.advance(args.dt, &mut sink);
            frames += 1;
        }
        reports.push(StopReport {
            stop,
            corrective,
            frames,
            frame,
        });
    }
    print_json(&reports)
}
