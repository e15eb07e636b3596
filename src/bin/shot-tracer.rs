use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "shot-tracer", version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the per-frame trajectory from a job file and print it as JSON.
    Trajectory(TrajectoryArgs),
    /// Render a single traced frame as a PNG (requires `ffmpeg`/`ffprobe` on PATH).
    Frame(FrameArgs),
    /// Render the traced MP4 (requires `ffmpeg`/`ffprobe` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Curve fitted through the clicks.
    #[arg(long, value_enum)]
    interp: Option<InterpChoice>,

    /// Line color as rrggbb.
    #[arg(long)]
    color: Option<String>,

    /// Line thickness in pixels.
    #[arg(long)]
    thickness: Option<f64>,

    /// Overlay opacity in [0, 1].
    #[arg(long)]
    alpha: Option<f32>,

    /// Do not stamp the frame counter.
    #[arg(long)]
    no_label: bool,
}

#[derive(Parser, Debug)]
struct TrajectoryArgs {
    /// Job JSON with click events and style.
    #[arg(long)]
    job: PathBuf,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Job JSON with click events and style.
    #[arg(long)]
    job: PathBuf,

    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Job JSON with click events and style.
    #[arg(long)]
    job: PathBuf,

    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Refuse to replace an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InterpChoice {
    Linear,
    Quadratic,
    Cubic,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Trajectory(args) => cmd_trajectory(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_job(path: &Path, overrides: &StyleArgs) -> anyhow::Result<shot_tracer::TraceJob> {
    let mut job = shot_tracer::TraceJob::from_path(path)?;
    if let Some(interp) = overrides.interp {
        job.interp = match interp {
            InterpChoice::Linear => shot_tracer::InterpKind::Linear,
            InterpChoice::Quadratic => shot_tracer::InterpKind::Quadratic,
            InterpChoice::Cubic => shot_tracer::InterpKind::Cubic,
        };
    }
    if let Some(color) = &overrides.color {
        job.style.color = color.parse()?;
    }
    if let Some(thickness) = overrides.thickness {
        job.style.thickness = thickness;
    }
    if let Some(alpha) = overrides.alpha {
        job.style.alpha = alpha;
    }
    if overrides.no_label {
        job.style.label.enabled = false;
    }
    job.style.validate()?;
    Ok(job)
}

fn cmd_trajectory(args: TrajectoryArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job, &args.style)?;
    let trajectory = job.trajectory()?;
    let json = serde_json::to_string_pretty(&trajectory).context("serialize trajectory")?;

    match &args.out {
        Some(out) => {
            shot_tracer::ensure_parent_dir(out)?;
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job, &args.style)?;
    let mut source = shot_tracer::FfmpegFrameSource::open(&args.in_path)?;
    let trajectory = job.trajectory_for(shot_tracer::FrameSource::info(&source))?;

    let frame = shot_tracer::trace_single_frame(
        &mut source,
        &trajectory,
        shot_tracer::FrameIndex(args.frame),
        &job.style,
    )?;

    shot_tracer::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job, &args.style)?;
    let mut source = shot_tracer::FfmpegFrameSource::open(&args.in_path)?;
    let trajectory = job.trajectory_for(shot_tracer::FrameSource::info(&source))?;

    let mut sink = shot_tracer::FfmpegSink::new(&args.out, !args.no_overwrite);
    let stats = shot_tracer::trace_video(&mut source, &mut sink, &trajectory, &job.style)?;

    eprintln!(
        "wrote {} ({} frames, path visible on {})",
        args.out.display(),
        stats.frames,
        stats.frames_with_path
    );
    Ok(())
}
