use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spriteview", version)]
struct Cli {
    /// Log decoding details to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print document metadata, layers, tags and decode anomalies as JSON.
    Info(InfoArgs),
    /// Composite a single frame into a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input sprite file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input sprite file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Hide a layer by index (repeatable).
    #[arg(long = "hide")]
    hide: Vec<usize>,

    /// Show a layer by index even if its flags hide it (repeatable).
    #[arg(long = "show")]
    show: Vec<usize>,

    /// Background fill as RRGGBBAA hex; transparent by default.
    #[arg(long, value_parser = parse_rgba_hex)]
    background: Option<[u8; 4]>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_rgba_hex(s: &str) -> Result<[u8; 4], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 8 {
        return Err(format!("expected RRGGBBAA, got '{s}'"));
    }
    let mut out = [0u8; 4];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|e| format!("invalid hex in '{s}': {e}"))?;
    }
    Ok(out)
}

fn load(path: &Path) -> anyhow::Result<spriteview::Document> {
    spriteview::read_file(path).with_context(|| format!("load sprite '{}'", path.display()))
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let doc = load(&args.in_path)?;

    let info = serde_json::json!({
        "width": doc.width,
        "height": doc.height,
        "color_depth": doc.color_depth,
        "frame_count": doc.frame_count(),
        "frame_durations_ms": doc.frames.iter().map(|f| f.duration_ms).collect::<Vec<_>>(),
        "total_duration_ms": doc.total_duration_ms(),
        "pixel_ratio": doc.pixel_ratio,
        "palette_colors": doc.palette.as_ref().map(|p| p.len()),
        "color_profile": doc.color_profile,
        "layers": spriteview::list_layers(&doc),
        "tags": doc.tags,
        "anomalies": doc.anomalies,
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = load(&args.in_path)?;

    let mut overrides = spriteview::VisibilityOverrides::new();
    for &index in &args.show {
        overrides.set_layer_visible(index, true);
    }
    for &index in &args.hide {
        overrides.set_layer_visible(index, false);
    }

    let settings = spriteview::CompositeSettings {
        clear_rgba: args.background,
    };
    let frame = spriteview::composite_frame_with(&doc, args.frame, &overrides, &settings)?;
    for anomaly in doc.anomalies.iter().chain(&frame.anomalies) {
        tracing::warn!(?anomaly, "decode anomaly");
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
