use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use profile_card::{
    AdvanceMetrics, BackgroundState, Card, CardRenderer, FontSet, RecordingSurface, Theme,
    ThemePreset,
};

#[derive(Parser, Debug)]
#[command(name = "profile-card", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card to PNG.
    Render(RenderArgs),
    /// Write the default card document as JSON.
    Template(TemplateArgs),
    /// Print the display list of a card as JSON, without fonts or pixels.
    Plan(PlanArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Translucent,
    Opaque,
}

impl From<ThemeArg> for ThemePreset {
    fn from(v: ThemeArg) -> Self {
        match v {
            ThemeArg::Translucent => ThemePreset::Translucent,
            ThemeArg::Opaque => ThemePreset::Opaque,
        }
    }
}

#[derive(clap::Args, Debug)]
struct BackgroundArgs {
    /// Background image, replacing the card's. Zoom and pan reset to their defaults.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Background zoom in percent (50..=250).
    #[arg(long)]
    zoom: Option<f64>,

    /// Horizontal background pan in pixels.
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<f64>,

    /// Vertical background pan in pixels.
    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<f64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Card JSON; the template card is used when omitted.
    #[arg(long)]
    card: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    bg: BackgroundArgs,

    /// Regular font file, replacing the card's.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font file.
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// Theme preset, replacing the card's.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Card JSON; the template card is used when omitted.
    #[arg(long)]
    card: Option<PathBuf>,

    #[command(flatten)]
    bg: BackgroundArgs,

    /// Fixed per-character advance in pixels; 1 em per character when omitted.
    #[arg(long)]
    advance: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Template(args) => cmd_template(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_card(path: Option<&Path>) -> anyhow::Result<Card> {
    let card = match path {
        Some(p) => Card::from_path(p).with_context(|| format!("load card '{}'", p.display()))?,
        None => Card::template(),
    };
    card.validate()?;
    Ok(card)
}

/// Background of `card` with command-line overrides applied.
///
/// `--background` replaces the image and resets zoom/pan; `--zoom` and `--offset-*` then apply on
/// top. With `placeholder_on_error`, an unreadable image falls back to the placeholder gradient.
fn resolve_background(
    card: &Card,
    args: &BackgroundArgs,
    placeholder_on_error: bool,
) -> anyhow::Result<BackgroundState> {
    let loaded = match &args.background {
        Some(path) => profile_card::load_image(path).map(BackgroundState::with_image),
        None => card.load_background(),
    };
    let mut background = match loaded {
        Ok(bg) => bg,
        Err(e) if placeholder_on_error => {
            tracing::warn!(error = %e, "background image unavailable, using placeholder");
            BackgroundState::empty()
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(zoom) = args.zoom {
        background.transform = background.transform.with_zoom(zoom);
    }
    if args.offset_x.is_some() || args.offset_y.is_some() {
        let t = background.transform;
        background.transform =
            t.with_offset(args.offset_x.unwrap_or(t.offset_x), args.offset_y.unwrap_or(t.offset_y));
    }
    Ok(background)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let card = read_card(args.card.as_deref())?;
    let background = resolve_background(&card, &args.bg, false)?;

    let fonts = match &args.font {
        Some(regular) => FontSet::load(regular, args.bold_font.as_deref())?,
        None => card.load_fonts()?.context(
            "no font available: pass --font or set `fonts.regular` in the card document",
        )?,
    };

    let theme = args
        .theme
        .map(|t| Theme::from_preset(t.into()))
        .unwrap_or_else(|| card.theme());
    let (frame, report) = profile_card::render_frame(
        &CardRenderer::new(theme),
        &fonts,
        &background,
        &card.layout_registry()?,
        &card.item_map(),
    )?;
    for failure in &report.failed {
        eprintln!("slot '{}' failed: {}", failure.id, failure.error);
    }
    if let Some(err) = &report.background_error {
        eprintln!("background failed: {err}");
    }

    profile_card::write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_template(args: TemplateArgs) -> anyhow::Result<()> {
    let json = Card::template().to_json_pretty()?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write template '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let card = read_card(args.card.as_deref())?;
    let metrics = match args.advance {
        Some(px) if px.is_finite() && px > 0.0 => AdvanceMetrics::Fixed(px),
        Some(px) => anyhow::bail!("--advance must be finite and > 0, got {px}"),
        None => AdvanceMetrics::Em(1.0),
    };

    let background = resolve_background(&card, &args.bg, true)?;
    let layout = card.layout_registry()?;
    let mut surface = RecordingSurface::new(layout.canvas(), metrics);
    let report = CardRenderer::new(card.theme()).render(
        &mut surface,
        &background,
        &layout,
        &card.item_map(),
    );

    let out = serde_json::json!({
        "report": report,
        "commands": surface.commands(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
