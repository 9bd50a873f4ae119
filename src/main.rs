use clap::Parser;
use ocr_extract::output::{self, OutputFormat};
use ocr_extract::preprocessing::PreprocessOptions;
use ocr_extract::{engines, input, CancelFlag, Config, DocumentPipeline, PageFailurePolicy};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Conventional exit status for SIGINT
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "ocr-extract")]
#[command(about = "Extract text from an image or scanned PDF")]
#[command(version)]
pub struct Args {
    /// Image (.png, .jpg, .jpeg, .bmp, .tif, .tiff, .gif) or PDF to read
    pub input: PathBuf,

    /// Recognition language tag (e.g., "en-US", "ru-RU", "zh-CN")
    #[arg(short, long, env = "OCR_LANGUAGE")]
    pub language: Option<String>,

    /// Language used when --language is not given
    #[arg(long, env = "OCR_DEFAULT_LOCALE", default_value = ocr_extract::config::DEFAULT_LOCALE)]
    pub default_locale: String,

    /// OCR engine (defaults to the first one compiled in)
    #[arg(long, env = "OCR_ENGINE")]
    pub engine: Option<String>,

    /// Upscale factor applied after padding when the result stays within engine limits
    #[arg(long, env = "OCR_SCALE_FACTOR", default_value_t = 2.0)]
    pub scale_factor: f64,

    /// Minimum content width/height before the border is added
    #[arg(long, default_value_t = 64)]
    pub min_size: u32,

    /// What to do when one page fails: abort or placeholder
    #[arg(long, default_value = "abort")]
    pub on_page_error: PageFailurePolicy,

    /// Output file format: text or json
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Characters of the result shown on the console
    #[arg(long, default_value_t = ocr_extract::config::DEFAULT_PREVIEW_CHARS)]
    pub preview_chars: usize,

    /// Path to tessdata directory (leptess engine; downloads to cache if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            engine: args.engine.clone(),
            language: args.language.clone(),
            default_locale: args.default_locale.clone(),
            preprocess: PreprocessOptions {
                min_width: args.min_size,
                min_height: args.min_size,
                scale_factor: args.scale_factor,
            },
            page_failure: args.on_page_error,
            output_format: args.format,
            preview_chars: args.preview_chars,
            tessdata_path: args.tessdata_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(&args);
    config.validate()?;

    tracing::info!("Starting ocr-extract v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Input file: {}", args.input.display());

    // Reject missing or unsupported files before any engine is initialized
    input::validate(&args.input)?;

    let cancel = CancelFlag::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        // First Ctrl-C stops after the current page, a second one exits now
        while tokio::signal::ctrl_c().await.is_ok() {
            if on_ctrl_c.interrupt() {
                tracing::warn!("Interrupted again, exiting");
                std::process::exit(EXIT_INTERRUPTED);
            }
            tracing::warn!("Interrupted, stopping after the current page");
        }
    });

    let format = config.output_format;
    let preview_chars = config.preview_chars;
    let input_path = args.input.clone();
    let (extraction, engine, language) = tokio::task::spawn_blocking(move || {
        let engine = engines::create(&config)?;
        let pipeline = DocumentPipeline::new(engine, &config)?.with_cancel_flag(cancel);

        let start = Instant::now();
        let extraction = input::extract(&input_path, &pipeline)?;
        tracing::info!(
            "Processing completed in {:.2} sec.",
            start.elapsed().as_secs_f64()
        );

        Ok::<_, ocr_extract::OcrError>((
            extraction,
            pipeline.engine_name(),
            pipeline.language().tag().to_string(),
        ))
    })
    .await??;

    let text = extraction.text();
    println!("--- BEGIN RESULT ---");
    println!("{}", output::preview(&text, preview_chars));
    println!("--- END RESULT ---");

    let path = output::write(&args.input, &extraction, format, engine, &language)?;
    println!("Full text saved to file: {}", path.display());

    Ok(())
}
