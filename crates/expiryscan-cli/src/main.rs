use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod output;

use expiryscan_core::{DEFAULT_RENDER_DPI, ExtractorConfig};
use expiryscan_ingest::ExpiryExtractor;
use output::ColorMode;

/// Expiry date scanner - extract the most likely expiry date from documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan one or more PDF, image, or Word files for an expiry date
    Scan {
        /// Paths of the files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit one JSON object per file instead of plain text
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Resolution for PDF page rasterization before OCR
        #[arg(long, default_value_t = DEFAULT_RENDER_DPI)]
        dpi: u32,

        /// Tesseract language code
        #[arg(long, default_value = "eng")]
        ocr_lang: String,

        /// Directory containing Tesseract traineddata files
        #[arg(long)]
        tessdata: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            files,
            json,
            no_color,
            dpi,
            ocr_lang,
            tessdata,
        } => scan(files, json, no_color, dpi, ocr_lang, tessdata),
    }
}

fn scan(
    files: Vec<PathBuf>,
    json: bool,
    no_color: bool,
    dpi: u32,
    ocr_lang: String,
    tessdata: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > defaults
    let tessdata =
        tessdata.or_else(|| std::env::var("TESSDATA_PREFIX").ok().map(PathBuf::from));

    let mut config = ExtractorConfig::new()
        .with_render_dpi(dpi)
        .with_ocr_lang(ocr_lang);
    if let Some(dir) = tessdata {
        config = config.with_tessdata_dir(dir);
    }

    let extractor = ExpiryExtractor::new(config);
    let color = ColorMode(!no_color && !json);
    let mut stdout = std::io::stdout().lock();

    for path in &files {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = extractor.extract(&bytes, &filename);

        if json {
            output::print_outcome_json(&mut stdout, &filename, &outcome)?;
        } else {
            output::print_outcome(&mut stdout, &filename, &outcome, color)?;
        }
    }

    Ok(())
}
