use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ringspan_core::{RangeError, SeqPos};
use std::io::Write;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "ringspan")]
#[command(about = "Ringspan - range algebra for linear and circular sequences")]
#[command(version)]
#[command(long_about = "
Ringspan answers coordinate questions about features on sequences whose ends
may be joined, such as plasmids and organelle genomes. Ranges are inclusive and
written START..END; a range whose start is past its end crosses the origin.

Examples:
  ringspan --length 10 split 8..2
  ringspan --length 10 trim 8..4 2..2
  ringspan --length 3000 delete-features --input features.json --deletion 1600..1650
  ringspan --length 2949 view 2900..99 --features features.json
  ringspan config --example > ringspan.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sequence length (overrides [sequence] length)
    #[arg(short, long, global = true)]
    pub length: Option<SeqPos>,

    /// Treat the sequence as linear
    #[arg(long, global = true)]
    pub linear: bool,

    /// Compact single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map a position into [0, length)
    Normalize {
        #[arg(allow_negative_numbers = true)]
        position: SeqPos,
    },

    /// Split a range into non-wrapping pieces
    Split {
        #[arg(allow_hyphen_values = true)]
        range: String,
    },

    /// Intersect two ranges
    Overlaps {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },

    /// Merge overlap fragments back into at most two ranges
    Collapse {
        /// Non-wrapping fragments
        #[arg(required = true, allow_hyphen_values = true)]
        fragments: Vec<String>,

        /// Range the fragments were cut from
        #[arg(long, allow_hyphen_values = true)]
        source: String,
    },

    /// Remove CUTTER from TARGET
    Trim {
        #[arg(allow_hyphen_values = true)]
        target: String,
        #[arg(allow_hyphen_values = true)]
        cutter: String,
    },

    /// Remap TARGET after DELETION is cut out of the sequence
    Delete {
        #[arg(allow_hyphen_values = true)]
        target: String,
        #[arg(allow_hyphen_values = true)]
        deletion: String,
    },

    /// Remap every feature in a JSON file after a deletion
    DeleteFeatures {
        /// JSON array of features
        #[arg(short, long)]
        input: PathBuf,

        /// Range removed from the sequence
        #[arg(short, long, allow_hyphen_values = true)]
        deletion: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Rebase a range so ORIGIN becomes position 0
    Zero {
        #[arg(allow_hyphen_values = true)]
        range: String,

        #[arg(long, allow_negative_numbers = true)]
        origin: SeqPos,
    },

    /// Show where an annotation, or every feature in a file, falls inside a selection
    View {
        #[arg(allow_hyphen_values = true)]
        selection: String,

        #[arg(allow_hyphen_values = true, required_unless_present = "features")]
        annotation: Option<String>,

        /// JSON array of features
        #[arg(long, conflicts_with = "annotation")]
        features: Option<PathBuf>,
    },

    /// Bases between the end of FROM and the start of TO
    Gap {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },

    /// Check whether B follows A and join them
    Fuse {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },

    /// Check that RANGE lies inside PARENT
    SubRange {
        #[arg(allow_hyphen_values = true)]
        parent: String,
        #[arg(allow_hyphen_values = true)]
        range: String,
    },

    /// Show or generate configuration
    Config {
        /// Print an example configuration file
        #[arg(long)]
        example: bool,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} worker threads", threads);

    let pretty = config.output.pretty && !cli.compact;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Commands::Config { example } = cli.command {
        if example {
            write!(out, "{}", Config::example_toml()?)?;
        } else {
            write!(out, "{}", toml::to_string_pretty(&config).map_err(CliError::from)?)?;
        }
        return Ok(());
    }

    let space = config.sequence_space(cli.length, cli.linear)?;

    match cli.command {
        Commands::Normalize { position } => {
            commands::inspect::normalize_position(&space, position, &mut out, pretty)?;
        }
        Commands::Split { range } => {
            commands::inspect::split(&space, &range, &mut out, pretty)?;
        }
        Commands::Overlaps { a, b } => {
            commands::inspect::overlaps(&space, &a, &b, &mut out, pretty)?;
        }
        Commands::Collapse { fragments, source } => {
            commands::inspect::collapse(&space, &fragments, &source, &mut out, pretty)?;
        }
        Commands::Gap { from, to } => {
            commands::inspect::gap_between(&space, &from, &to, &mut out, pretty)?;
        }
        Commands::Fuse { a, b } => {
            commands::inspect::fuse_ranges(&space, &a, &b, &mut out, pretty)?;
        }
        Commands::SubRange { parent, range } => {
            commands::inspect::sub_range_of(&space, &parent, &range, &mut out, pretty)?;
        }
        Commands::Trim { target, cutter } => {
            commands::edit::trim_range(&space, &target, &cutter, &mut out, pretty)?;
        }
        Commands::Delete { target, deletion } => {
            commands::edit::delete(&space, &target, &deletion, &mut out, pretty)?;
        }
        Commands::DeleteFeatures { input, deletion, out: output } => {
            commands::edit::delete_features(
                &space,
                &input,
                &deletion,
                output.as_deref(),
                &mut out,
                pretty,
            )?;
        }
        Commands::Zero { range, origin } => {
            commands::view::zero_range(&space, &range, origin, &mut out, pretty)?;
        }
        Commands::View { selection, annotation, features } => match (annotation, features) {
            (_, Some(path)) => {
                commands::view::view_features(&space, &selection, &path, &mut out, pretty)?;
            }
            (Some(annotation), None) => {
                commands::view::view_annotation(&space, &selection, &annotation, &mut out, pretty)?;
            }
            (None, None) => {
                return Err(CliError::validation("view needs an annotation range or --features").into());
            }
        },
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(range_err) = err.downcast_ref::<RangeError>() {
            print_error_and_exit(&CliError::Range(range_err.clone()));
        }
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
