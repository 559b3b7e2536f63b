//! huey: render hue-rotated variants of an image.
//!
//! Walks the color wheel from `--from` to `--to` in steps of `--step`
//! degrees and writes one PNG per sampled angle into the output
//! directory, named `<prefix>_<angle>.png`.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin huey -- [OPTIONS] <IMAGE_PATH> <OUTPUT_DIR>
//! ```
//!
//! Ctrl-C stops the walk after the angle currently being rendered.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use huey_export::OutputNaming;
use huey_io::DirectorySink;
use huey_pipeline::{CancellationToken, Clock, SpinConfig};

/// Render hue-rotated variants of an image.
///
/// Each sampled angle produces one PNG in the output directory. When
/// `--from` is greater than `--to` the walk wraps past 360 degrees.
#[derive(Parser)]
#[command(name = "huey", version)]
struct Cli {
    /// Path to the source image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Directory the rotated images are written to (created if missing).
    output_dir: PathBuf,

    /// First rotation in degrees (0-360).
    #[arg(long, default_value_t = SpinConfig::DEFAULT_FROM_DEGREE, allow_negative_numbers = true)]
    from: i32,

    /// Last rotation in degrees (0-360).
    #[arg(long, default_value_t = SpinConfig::DEFAULT_TO_DEGREE, allow_negative_numbers = true)]
    to: i32,

    /// Degrees between samples. The sign is ignored.
    #[arg(long, default_value_t = SpinConfig::DEFAULT_STEP_DEGREE, allow_negative_numbers = true)]
    step: i32,

    /// Rotate image rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Output filename prefix.
    #[arg(long, default_value = OutputNaming::DEFAULT_PREFIX)]
    prefix: String,

    /// Full spin config as a JSON string.
    ///
    /// When provided, --from, --to, --step and --parallel are ignored.
    /// The JSON must be a valid `SpinConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Print diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Log every written file and per-angle timing.
    #[arg(short, long)]
    verbose: bool,
}

/// Build a [`SpinConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual walk flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<SpinConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(SpinConfig {
        from_degree: cli.from,
        to_degree: cli.to,
        step_degree: cli.step,
        parallel: cli.parallel,
    })
}

/// Initialise `env_logger` with a compact `[LEVEL file:line] message`
/// format. `RUST_LOG` overrides the default level.
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .rsplit('/')
                    .next()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    // Reject a bad range before reading anything from disk.
    if let Err(e) = config.range() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    let naming = match OutputNaming::png(cli.prefix.as_str()) {
        Ok(n) => n,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let image_bytes = match huey_io::read_source(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sink = match DirectorySink::create(&cli.output_dir, naming) {
        Ok(sink) => sink,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::warn!("interrupt received, stopping after the current angle");
        handler_token.cancel();
    }) {
        log::warn!("could not install Ctrl-C handler: {e}");
    }

    log::info!(
        "Image: {} ({} bytes) -> {}",
        cli.image_path.display(),
        image_bytes.len(),
        cli.output_dir.display(),
    );
    log::debug!("Config: {config:#?}");

    let diagnostics =
        match huey_pipeline::spin(&image_bytes, &config, &mut sink, &StdClock, &cancel) {
            Ok(d) => d,
            Err(e) => {
                log::error!("{} stage failed: {e}", e.stage());
                log::error!("{} file(s) were written before the failure", sink.written().len());
                return ExitCode::FAILURE;
            }
        };

    if cli.json {
        match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Error serializing diagnostics: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", diagnostics.report());
    }

    log::info!(
        "wrote {} image(s) to {}",
        sink.written().len(),
        sink.dir().display()
    );
    ExitCode::SUCCESS
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}
