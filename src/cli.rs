use clap::Parser;

use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::fs;
use std::io::{IsTerminal, Read, Write};
use std::{path::Path, sync::mpsc::channel, time::Duration};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::{Error, Result};
use crate::{optimize_str, Coordinates, ExportSettings, Point};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about=None)] // Read from Cargo.toml
struct Arguments {
    /// File to process ('-' for stdin)
    ///
    /// Either an SVG document, or a single path / polygon string.
    #[arg(default_value = "-")]
    file: String,

    /// Target output file ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Watch file for changes; update output on change. (FILE must be given)
    #[arg(short, long, requires = "file")]
    watch: bool,

    /// Coordinate mode: initial, absolute, relative or auto
    #[arg(long, default_value = "initial")]
    coordinates: Coordinates,

    /// Remove all characters not needed to read the path back
    #[arg(long)]
    compress: bool,

    /// Don't merge chained moves and collinear lines
    #[arg(long)]
    no_combine: bool,

    /// Number of digits after the decimal point
    #[arg(long, default_value = "3")]
    fraction_digits: u32,

    /// Scale factor, either a single value or 'x,y'
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    scale: Option<Point>,

    /// Offset applied before scaling, either a single value or 'x,y'
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    translate: Option<Point>,

    /// Wrap output lines longer than this at command boundaries
    #[arg(long)]
    max_chars_per_line: Option<usize>,

    /// Start each command on a new line
    #[arg(long)]
    commands_on_new_lines: bool,

    /// Output a polygon point list rather than path data
    #[arg(long)]
    to_polygon: bool,
}

fn parse_vector(value: &str) -> Result<Point> {
    let parts = value
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match parts[..] {
        [v] => Ok(Point::from(v)),
        [x, y] => Ok(Point::new(x, y)),
        _ => Err(Error::InvalidValue("vector".to_string(), value.to_string())),
    }
}

/// Top-level configuration used by the `pathsmith` command-line process.
///
/// 'front-end' program settings (input/output filenames, whether to continually
/// process input on change) are stored directly in this struct; the export
/// options are in the embedded `ExportSettings`.
#[derive(Clone)]
pub struct Config {
    /// Path to input file, or '-' for stdin
    pub input_path: String,
    /// Path to output file, or '-' for stdout
    pub output_path: String,
    /// Stay monitoring `input_path` for changes (Requires input_path is not stdin)
    pub watch: bool,
    pub settings: ExportSettings,
}

impl Config {
    fn from_args(args: Arguments) -> Result<Self> {
        if args.watch && args.file == "-" {
            // Should already be enforced by clap validation
            return Err(Error::Cli(
                "A non-stdin file must be provided with -w/--watch argument".into(),
            ));
        }
        if args.file != "-" && args.output != "-" {
            let in_path = Path::new(&args.file);
            let out_path = Path::new(&args.output);
            if out_path.exists() && out_path.canonicalize()? == in_path.canonicalize()? {
                return Err(Error::Cli(
                    "Output path must not refer to the same file as the input file.".into(),
                ));
            }
        }
        let settings = ExportSettings {
            coordinates: args.coordinates,
            compress: args.compress,
            combine: !args.no_combine,
            fraction_digits: args.fraction_digits,
            scale: args.scale,
            translate: args.translate,
            max_chars_per_line: args.max_chars_per_line,
            commands_on_new_lines: args.commands_on_new_lines,
            to_polygon: args.to_polygon,
            async_export: false,
        };
        settings.validate()?;
        Ok(Self {
            input_path: args.file,
            output_path: args.output,
            watch: args.watch,
            settings,
        })
    }

    /// Create a `Config` object set up given a command line string.
    ///
    /// The string is parsed using `shlex::split()`, so values containing
    /// spaces or quotes should be quoted or escaped appropriately.
    pub fn from_cmdline(args: &str) -> Result<Self> {
        let args = shlex::split(args).unwrap_or_default();
        let args = Arguments::try_parse_from(args.iter()).map_err(Error::from_err)?;
        Self::from_args(args)
    }
}

/// Create a `Config` object from process arguments.
pub fn get_config() -> Result<Config> {
    let args = Arguments::parse();
    Config::from_args(args)
}

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// (default `info`).
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read file from `input` ('-' for stdin), optimize the path data in it,
/// and write to file given by `output` ('-' for stdout).
pub fn transform_file(input: &str, output: &str, settings: &ExportSettings) -> Result<()> {
    let mut data = String::new();
    if input == "-" {
        let mut stdin = std::io::stdin().lock();
        if stdin.is_terminal() {
            info!("reading path data from stdin");
        }
        stdin.read_to_string(&mut data)?;
    } else {
        data = fs::read_to_string(input)?;
    }

    let mut result = optimize_str(&data, settings)?;
    if data.ends_with('\n') && !result.ends_with('\n') {
        result.push('\n');
    }

    if output == "-" {
        std::io::stdout().write_all(result.as_bytes())?;
    } else {
        let mut out_temp = NamedTempFile::new()?;
        out_temp.write_all(result.as_bytes())?;
        // Copy content rather than rename (by .persist()) since this
        // could cross filesystems; some apps (e.g. eog) also fail to
        // react to 'moved-over' files.
        fs::copy(out_temp.path(), output)?;
    }

    Ok(())
}

/// Run the `pathsmith` program with a given `Config`.
pub fn run(config: Config) -> Result<()> {
    if !config.watch {
        transform_file(&config.input_path, &config.output_path, &config.settings)?;
    } else if config.input_path != "-" {
        let watch = config.input_path;
        let (tx, rx) = channel();
        let mut watcher = new_debouncer(Duration::from_millis(250), tx).map_err(Error::from_err)?;
        let watch_path = Path::new(&watch);
        watcher
            .watcher()
            .watch(watch_path, RecursiveMode::NonRecursive)
            .map_err(Error::from_err)?;
        transform_file(&watch, &config.output_path, &config.settings).unwrap_or_else(|e| {
            warn!("transform failed: {e}");
        });
        info!("Watching {watch} for changes");
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.path.canonicalize()? == watch_path.canonicalize()? {
                            info!("{} changed", event.path.to_string_lossy());
                            transform_file(&watch, &config.output_path, &config.settings)
                                .unwrap_or_else(|e| {
                                    warn!("transform failed: {e}");
                                });
                        }
                    }
                }
                Ok(Err(e)) => warn!("Watch error {e:?}"),
                Err(e) => warn!("Channel error: {e:?}"),
            }
        }
    }

    Ok(())
}
