use anyhow::Context;
use clap::Parser;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use turtlegcode::{
    forward_segments, init_logging, Config, ConfigPatch, GcodeGenerator, PenPreset,
    ProgramParser, ProgramSummary, RebuildDriver, BUILD_DATE, VERSION,
};

#[derive(Parser, Debug)]
#[command(
    name = "turtlegcode",
    version,
    about = "Compile turtle-graphics segments into pen plotter G-code"
)]
struct Cli {
    /// Segment input: a JSON array or JSON lines (`-` reads stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Output program file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pen command preset (spindle, servo, zaxis)
    #[arg(long)]
    preset: Option<PenPreset>,

    /// Pen-up command
    #[arg(long)]
    pen_up: Option<String>,

    /// Pen-down command
    #[arg(long)]
    pen_down: Option<String>,

    /// Drawing feed rate (units/minute)
    #[arg(long)]
    feed_rate: Option<f64>,

    /// Command emitted after the header
    #[arg(long)]
    start: Option<String>,

    /// Command that ends the program
    #[arg(long)]
    end: Option<String>,

    /// Output scale in percent
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Quiet period before a rebuild while segments are streaming
    #[arg(long, default_value_t = 250)]
    debounce_ms: u64,

    /// Print program statistics to stderr
    #[arg(long)]
    summary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn patch(&self) -> ConfigPatch {
        let preset = self.preset.map(|p| p.commands());
        ConfigPatch {
            pen_up: self
                .pen_up
                .clone()
                .or_else(|| preset.map(|(up, _)| up.to_string())),
            pen_down: self
                .pen_down
                .clone()
                .or_else(|| preset.map(|(_, down)| down.to_string())),
            feed_rate: self.feed_rate,
            start: self.start.clone(),
            end: self.end.clone(),
            scale_percent: self.scale,
        }
    }
}

/// File configuration with command-line overrides applied
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) if path.exists() => {
                tracing::debug!("Using configuration {}", path.display());
                Config::load_from_file(&path).with_context(|| {
                    format!("Failed to load configuration from {}", path.display())
                })?
            }
            _ => Config::default(),
        },
    };

    let patch = cli.patch();
    if !patch.is_empty() {
        config
            .apply(&patch)
            .context("Invalid command-line configuration")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(level)?;
    tracing::info!("turtlegcode {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(&cli)?;
    let generator = GcodeGenerator::with_config(config.clone())?;
    let driver = RebuildDriver::new(generator, Duration::from_millis(cli.debounce_ms));
    let generator = driver.generator();

    let (tx, rx) = mpsc::channel(1024);
    let handle = tokio::spawn(driver.run(rx));

    let forwarded = if cli.input == "-" {
        forward_segments(BufReader::new(tokio::io::stdin()), &tx).await
    } else {
        match tokio::fs::File::open(&cli.input).await {
            Ok(file) => forward_segments(BufReader::new(file), &tx).await,
            Err(e) => Err(e.into()),
        }
    };
    drop(tx);

    let stats = handle.await.context("Rebuild driver failed")?;
    let messages =
        forwarded.with_context(|| format!("Failed to read segments from {}", cli.input))?;
    tracing::info!(
        messages,
        rebuilds = stats.rebuilds,
        "Finished reading segments"
    );

    let generator = generator.lock();
    match &cli.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            generator
                .write_program(BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Wrote {} lines to {}",
                generator.program().line_count(),
                path.display()
            );
        }
        None => generator
            .write_program(std::io::stdout().lock())
            .context("Failed to write program")?,
    }

    if cli.summary {
        let lines = ProgramParser::new(config.pen_up.as_str(), config.pen_down.as_str())
            .parse_program(&generator.program_text())
            .context("Emitted program could not be read back")?;
        eprintln!("{}", ProgramSummary::from_lines(&lines));
    }

    Ok(())
}
