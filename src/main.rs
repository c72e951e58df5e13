//! bgtools: streaming bedgraph transforms
//!
//! Usage: bgtools <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use bgtools::bedgraph::Result;
use bgtools::commands::{
    BlurCommand, CompressCommand, DecompressCommand, DeriveCommand, TransformStats,
};
use bgtools::config::{GapNeighbor, DEFAULT_OUT_OF_BOUNDARY_VALUE};

#[derive(Parser)]
#[command(name = "bgtools")]
#[command(version)]
#[command(about = "Streaming transforms for sorted bedgraph files", long_about = None)]
struct Cli {
    /// Print run statistics to stderr
    #[arg(long, global = true)]
    stats: bool,

    /// Validate that input is sorted by chromosome then start while streaming
    #[arg(long, global = true)]
    check_sorted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Smooth a bedgraph with a Gaussian kernel
    Blur {
        /// Input bedgraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Standard deviation of the Gaussian kernel, in positions (<= 0
        /// leaves scores unchanged)
        #[arg(short, long, allow_negative_numbers = true)]
        sigma: f64,

        /// Score of records that lack a full smoothing window
        #[arg(long, default_value_t = DEFAULT_OUT_OF_BOUNDARY_VALUE, allow_negative_numbers = true)]
        out_of_boundary: f64,
    },

    /// Merge adjacent records with equal scores
    Compress {
        /// Input bedgraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Expand records to single positions, filling gaps with 0
    Decompress {
        /// Input bedgraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Centered first difference of an uncompressed bedgraph
    Derive {
        /// Input bedgraph file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Score neighbours missing across gaps as 0 instead of copying the
        /// score of the record next to the gap
        #[arg(long)]
        zero_gap_neighbors: bool,
    },
}

/// Input source selected on the command line.
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_arg(input: Option<PathBuf>) -> Self {
        match input {
            Some(path) if path.to_string_lossy() != "-" => Input::File(path),
            _ => Input::Stdin,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Blur {
            input,
            sigma,
            out_of_boundary,
        } => {
            let cmd = BlurCommand::new(sigma)
                .with_out_of_boundary(out_of_boundary)
                .with_check_sorted(cli.check_sorted);
            run_command("Blur", cli.stats, Input::from_arg(input), |input, out| {
                match input {
                    Input::File(path) => cmd.run(path, out),
                    Input::Stdin => cmd.run_stdin(out),
                }
            })
        }

        Commands::Compress { input } => {
            let cmd = CompressCommand::new().with_check_sorted(cli.check_sorted);
            run_command("Compress", cli.stats, Input::from_arg(input), |input, out| {
                match input {
                    Input::File(path) => cmd.run(path, out),
                    Input::Stdin => cmd.run_stdin(out),
                }
            })
        }

        Commands::Decompress { input } => {
            let cmd = DecompressCommand::new().with_check_sorted(cli.check_sorted);
            run_command("Decompress", cli.stats, Input::from_arg(input), |input, out| {
                match input {
                    Input::File(path) => cmd.run(path, out),
                    Input::Stdin => cmd.run_stdin(out),
                }
            })
        }

        Commands::Derive {
            input,
            zero_gap_neighbors,
        } => {
            let gap_neighbor = if zero_gap_neighbors {
                GapNeighbor::Fill
            } else {
                GapNeighbor::Nearest
            };
            let cmd = DeriveCommand::new()
                .with_gap_neighbor(gap_neighbor)
                .with_check_sorted(cli.check_sorted);
            run_command("Derive", cli.stats, Input::from_arg(input), |input, out| {
                match input {
                    Input::File(path) => cmd.run(path, out),
                    Input::Stdin => cmd.run_stdin(out),
                }
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Run one command against stdout and report its statistics if requested.
fn run_command<F>(name: &str, stats: bool, input: Input, run: F) -> Result<()>
where
    F: FnOnce(Input, &mut io::StdoutLock<'static>) -> Result<TransformStats>,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = run(input, &mut handle)?;

    if stats {
        eprintln!("{} stats: {}", name, result);
    }

    Ok(())
}
