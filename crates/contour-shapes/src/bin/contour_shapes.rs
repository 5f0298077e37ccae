//! contour-shapes CLI: classify contour documents and write reference scenes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use contour_shapes::{
    synthetic, ClassifierParams, ParamsError, ShapeClassifier, ShapeDetectInput,
    ShapeDetectReport, ShapesIoError,
};
use log::{info, LevelFilter};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ShapesIoError,
    },
    #[error("{}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: ShapesIoError,
    },
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Parser)]
#[command(name = "contour-shapes")]
#[command(about = "Classify pixel contours into polygons, ellipses and circular arcs")]
#[command(version)]
struct Cli {
    /// Log verbosity (written to stderr); `CONTOUR_SHAPES_LOG` directives refine it.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Emit JSON log events (requires the `tracing` feature).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the contours of an input document.
    Classify(ClassifyArgs),

    /// Write the synthetic reference scene as an input document.
    Scene {
        /// Output path; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct ClassifyArgs {
    /// Input document with `contours` and optional `lines` / `circles`.
    input: PathBuf,

    /// Classifier parameters (JSON); defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_level.into(), cli.log_json)?;
    match cli.command {
        Commands::Classify(args) => classify(&args),
        Commands::Scene { output } => write_scene(output.as_deref()),
    }
}

#[cfg(feature = "tracing")]
fn init_logging(_level: LevelFilter, json: bool) -> Result<(), CliError> {
    // Verbosity comes from RUST_LOG here.
    let _ = LogTracer::init();
    contour_shapes::init_tracing(json);
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter, json: bool) -> Result<(), CliError> {
    contour_shapes::init_with_level(level)?;
    if json {
        log::warn!("--log-json needs the `tracing` feature; using plain log lines");
    }
    Ok(())
}

fn classify(args: &ClassifyArgs) -> Result<(), CliError> {
    let input = ShapeDetectInput::load_json(&args.input).map_err(|source| CliError::Load {
        path: args.input.clone(),
        source,
    })?;
    let params = match &args.config {
        Some(path) => ClassifierParams::load_json(path).map_err(|source| CliError::Load {
            path: path.clone(),
            source,
        })?,
        None => ClassifierParams::default(),
    };

    let classifier = ShapeClassifier::new(params.clone())?;
    let result = classifier.detect(&input.contours, &input.lines, &input.circles);
    let report = ShapeDetectReport::new(
        &args.input,
        args.config.as_deref(),
        params,
        &input,
        result,
    );

    match &args.output {
        Some(path) => {
            report.write_json(path).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            info!("wrote {} shapes to {}", report.shapes.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn write_scene(output: Option<&Path>) -> Result<(), CliError> {
    let scene = synthetic::reference_scene();
    match output {
        Some(path) => {
            scene.write_json(path).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(
                "wrote reference scene ({} contours) to {}",
                scene.contours.len(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&scene)?),
    }
    Ok(())
}
