use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "timereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a montage video (requires `ffmpeg`, see TIMEREEL_FFMPEG).
    Render(RenderArgs),
    /// Render one still of the montage as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input timeline JSON (era -> generated image).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output video path.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output container. Defaults to the `--out` extension, then WebM.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Step the clock by exact frame intervals instead of pacing in real time.
    #[arg(long)]
    offline: bool,

    /// Print diagnostics about caption font resolution (family + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline JSON (era -> generated image).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline instant in milliseconds.
    #[arg(long)]
    at_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print diagnostics about caption font resolution (family + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Webm,
    Mp4,
}

impl From<FormatChoice> for timereel::Container {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Webm => Self::Webm,
            FormatChoice::Mp4 => Self::Mp4,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<timereel::RenderConfig> {
    match path {
        Some(p) => timereel::RenderConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(timereel::RenderConfig::default()),
    }
}

fn load_input(path: &Path) -> anyhow::Result<timereel::TimelineInput> {
    timereel::TimelineInput::from_json_file(path)
        .with_context(|| format!("load timeline '{}'", path.display()))
}

fn container_for(out: &Path, format: Option<FormatChoice>) -> timereel::Container {
    if let Some(f) = format {
        return f.into();
    }
    match out.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mp4") => timereel::Container::Mp4,
        _ => timereel::Container::Webm,
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let input = load_input(&args.in_path)?;

    if args.dump_fonts {
        dump_font_diagnostics(&cfg)?;
    }

    let fps = cfg.fps()?;
    let mut session = timereel::MontageSession::new(cfg)?;
    let mut sink = timereel::FfmpegSink::new(timereel::FfmpegSinkOpts::new(container_for(
        &args.out,
        args.format,
    )));
    let mut scheduler: Box<dyn timereel::FrameScheduler> = if args.offline {
        Box::new(timereel::FixedStepScheduler::per_frame(fps))
    } else {
        Box::new(timereel::RealtimeScheduler::new(fps))
    };
    let cancel = timereel::CancelToken::new();
    let mut progress = |m: &str| eprintln!("{m}");

    let output = session.render(
        &input,
        &mut sink,
        scheduler.as_mut(),
        &cancel,
        &mut progress,
    )?;

    timereel::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &output.bytes)
        .with_context(|| format!("write video '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}, {} frames, {:.2}s)",
        args.out.display(),
        output.mime_type,
        output.frames_captured,
        output.duration.as_secs_f64()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let input = load_input(&args.in_path)?;

    if args.dump_fonts {
        dump_font_diagnostics(&cfg)?;
    }

    let session = timereel::MontageSession::new(cfg)?;
    let frame = session.render_still(&input, Duration::from_millis(args.at_ms))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn dump_font_diagnostics(cfg: &timereel::RenderConfig) -> anyhow::Result<()> {
    eprintln!("caption font diagnostics:");
    let renderer = timereel::FrameRenderer::new(cfg)?;
    match renderer.caption_typeface() {
        Some(t) => {
            eprintln!("  family: {}", t.label());
            eprintln!("  index:  {}", t.index());
            eprintln!("  sha256: {}", sha256_hex(t.bytes()));
        }
        None => eprintln!("  captions disabled (no font)"),
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
