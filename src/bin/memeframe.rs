use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "memeframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the final frame of a meme as a JPEG.
    Frame(CommonArgs),
    /// Render a meme in the request's output format (JPEG or GIF).
    Render(CommonArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input meme request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,

    /// Base image; a solid placeholder is used when absent or unreadable.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Placeholder width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Placeholder height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Print diagnostics about font resolution (source, kind + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn prepare(args: &CommonArgs) -> anyhow::Result<(memeframe::MemeRequest, memeframe::Canvas)> {
    let request = memeframe::MemeRequest::from_path(&args.in_path)
        .with_context(|| format!("load meme request '{}'", args.in_path.display()))?;
    request.validate()?;

    if args.dump_fonts {
        dump_font_diagnostics(&request.config.fonts)?;
    }

    let placeholder = memeframe::SolidSource::placeholder(args.width, args.height);
    let base = match &args.image {
        Some(path) => {
            memeframe::fetch_with_fallback(&memeframe::FileSource::new(path), &placeholder)?
        }
        None => memeframe::ImageSource::fetch(&placeholder)?,
    };
    Ok((request, base))
}

fn cmd_frame(args: CommonArgs) -> anyhow::Result<()> {
    let (request, base) = prepare(&args)?;
    let rendered = memeframe::render_request(&base, &request)?;
    let encoded = memeframe::encode(
        &rendered,
        memeframe::OutputFormat::Static,
        &request.encode_settings(),
    )?;
    write_output(&args.out, &encoded)
}

fn cmd_render(args: CommonArgs) -> anyhow::Result<()> {
    let (request, base) = prepare(&args)?;
    let encoded = memeframe::render_and_encode(&base, &request)?;
    write_output(&args.out, &encoded)
}

fn write_output(out: &Path, encoded: &memeframe::Encoded) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, &encoded.bytes)
        .with_context(|| format!("write {} '{}'", encoded.mime, out.display()))?;

    eprintln!("wrote {} ({})", out.display(), encoded.mime);
    Ok(())
}

fn dump_font_diagnostics(cfg: &memeframe::FontConfig) -> anyhow::Result<()> {
    let face = memeframe::cached_font(cfg).context("resolve font")?;
    eprintln!("font diagnostics:");
    eprintln!("  source: {}", face.source());
    eprintln!("  kind:   {}", face.kind());
    eprintln!("  sha256: {}", sha256_hex(&face.identity_bytes()));
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
