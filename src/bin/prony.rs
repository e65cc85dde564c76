//! Command-line driver: fit a sample file or write the reference signal.
//!
//! Usage:
//!   cargo run --features cli --bin prony -- fit samples.txt --order 10
//!   cargo run --features cli --bin prony -- generate reference.txt

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use prony::io::{read_samples, write_reference};
use prony::{prony as fit_samples, PronySettings, SpacingPolicy};

#[derive(Parser)]
#[command(name = "prony", about = "Fit sums of damped complex exponentials with Prony's method")]
struct Cli {
    /// Log level for diagnostics on stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit `a` and `b` to a four-column sample file.
    Fit {
        /// Sample file: `Re t  Im t  Re F  Im F` per line.
        file: PathBuf,

        /// Number of modes.
        #[arg(long, short, default_value_t = 10)]
        order: usize,

        /// Relative singular-value cutoff for both least-squares solves.
        #[arg(long)]
        rcond: Option<f64>,

        /// Handling of non-uniform time grids.
        #[arg(long, value_enum, default_value_t = Spacing::Warn)]
        spacing: Spacing,

        /// Skip Newton refinement of the characteristic roots.
        #[arg(long)]
        no_polish: bool,
    },
    /// Write the synthetic two-mode reference signal.
    Generate {
        /// Output path (overwritten).
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Spacing {
    Ignore,
    Warn,
    Reject,
}

impl From<Spacing> for SpacingPolicy {
    fn from(s: Spacing) -> Self {
        match s {
            Spacing::Ignore => SpacingPolicy::Ignore,
            Spacing::Warn => SpacingPolicy::Warn,
            Spacing::Reject => SpacingPolicy::Reject,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Fit {
            file,
            order,
            rcond,
            spacing,
            no_polish,
        } => {
            let samples = match read_samples(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            let settings = PronySettings {
                rcond,
                spacing: spacing.into(),
                polish_roots: !no_polish,
                ..PronySettings::default()
            };
            let fit = fit_samples(&samples.t, &samples.f, order, &settings)
                .with_context(|| format!("fitting {} with order {}", file.display(), order))?;

            println!("a (weight):");
            for a in &fit.amplitudes {
                println!("  {:.12}", a);
            }
            println!("b (omega):");
            for b in &fit.exponents {
                println!("  {:.12}", b);
            }
            tracing::info!(
                prediction_rank = fit.prediction_rank,
                amplitude_rank = fit.amplitude_rank,
                residual = fit.residual_norm,
                "fit complete"
            );
        }
        Command::Generate { file } => {
            write_reference(&file).with_context(|| format!("writing {}", file.display()))?;
            println!("wrote reference signal to {}", file.display());
        }
    }

    Ok(())
}
