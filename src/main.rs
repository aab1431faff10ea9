//! Photo Census - inventory a photo library by camera and capture date
//!
//! Scans a directory of photos, prints the table of capture dates and camera
//! models, and optionally charts photos per camera and per day.

use anyhow::Result;
use clap::Parser;
use photo_census::output::{render_info, render_json, render_table};
use photo_census::{
    CameraSummary, Cli, Config, DateCameraSummary, OutputFormat, ScanEvent, Scanner,
};
use std::path::Path;
use tracing::{Level, debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Console styling for section titles and diagnostics

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const WARNING: Color = Color::Yellow;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    /// Print a separator line
    pub fn print_separator(width: usize) {
        let _ = stdout().execute(Print(style(format!("{}\n", "─".repeat(width))).with(CliTheme::HINT)));
    }

    /// Print a bold section title
    pub fn print_title(title: &str) {
        let _ = stdout().execute(Print(style(format!("{title}\n")).with(CliTheme::ACCENT).bold()));
    }

    /// Print a diagnostic line
    pub fn print_diagnostic(message: &str) {
        let _ = stdout().execute(Print(style(format!("{message}\n")).with(CliTheme::WARNING)));
    }

    /// Print pre-rendered text unchanged
    pub fn print_block(text: &str) {
        let _ = stdout().execute(Print(text));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let _guard = setup_logging(&cli, config.log_level())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Photo Census starting");
    if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loaded configuration from file");
    }
    debug!(?config, "Configuration loaded");
    validate_config(&config)?;

    if let Err(e) = run(config) {
        error!(error = %e, "Scan failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Scan, print the dataset, then the requested charts
fn run(config: Config) -> Result<()> {
    use cli_output::*;

    let folder = config.folder.clone();
    let width = config.chart_width;
    let height = config.chart_height;
    let format = config.output_format;
    let (camera_chart, date_chart) = (config.camera_chart, config.date_chart);

    info!(timezone = %config.timezone, "Timestamps are reported as recorded, without timezone conversion");

    let scanner = Scanner::new(config);
    let report = scanner.scan_with(&folder, |event| match event {
        ScanEvent::MissingMetadata(path) => {
            print_diagnostic(&format!("no metadata for {}", path.display()));
        }
        ScanEvent::Skipped { path, reason } => {
            print_diagnostic(&format!("skipped {}: {}", path.display(), reason));
        }
    })?;
    let dataset = report.dataset;

    match format {
        OutputFormat::Table => {
            print_block(&render_table(&dataset));
            print_separator(width as usize);
            print_block(&render_info(&dataset));
        }
        OutputFormat::Json => {
            println!("{}", render_json(&dataset)?);
        }
    }

    if camera_chart {
        let chart = CameraSummary::from_dataset(&dataset).bar_chart();
        print_separator(width as usize);
        print_title(&chart.title);
        print_block(&skip_title(&chart.render(width, height)));
    }

    if date_chart {
        let chart = DateCameraSummary::from_dataset(&dataset).line_chart();
        print_separator(width as usize);
        print_title(&chart.title);
        print_block(&skip_title(&chart.render(width, height)));
    }

    info!(records = dataset.len(), "Scan complete");
    Ok(())
}

/// Drop the plain title line of a rendered chart; the styled one replaces it
fn skip_title(rendered: &str) -> String {
    rendered
        .split_once('\n')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default()
}

/// Load configuration from file or CLI arguments
///
/// Runs before logging is set up, since the file may ask for verbose logs.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        if cli.folder_path.is_none() {
            anyhow::bail!("No folder given. Pass the photos directory or --config <file>");
        }
        cli.to_config()
    };

    Ok(config)
}

/// Setup logging: stderr always, plus an optional log file
fn setup_logging(cli: &Cli, level: Level) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    let Some(ref log_path) = cli.log_file else {
        subscriber.init();
        return Ok(None);
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(open_log_file(log_path)?);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(Some(guard))
}

fn open_log_file(log_path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?)
}

/// Validate configuration before scanning
fn validate_config(config: &Config) -> Result<()> {
    if !config.folder.is_dir() {
        anyhow::bail!("{} is not a readable directory", config.folder.display());
    }
    if config.chart_width == 0 || config.chart_height == 0 {
        anyhow::bail!("Chart dimensions must be positive");
    }
    Ok(())
}
