mod input;
mod output;
mod preview;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use invoice_core::{amount_to_words, validate, InvoiceRenderer};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "invoice", version, about = "Generate single-page PDF invoices")]
struct Cli {
    /// Log layout decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an invoice and write it as a PDF
    Generate {
        /// Invoice data (.json or .toml)
        input: PathBuf,
        /// Directory the PDF is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Business profile overriding the built-in details (.toml)
        #[arg(short, long)]
        profile: Option<PathBuf>,
        /// Leave the page content uncompressed
        #[arg(long)]
        no_compress: bool,
    },
    /// Validate an invoice and print it to the terminal
    Preview {
        input: PathBuf,
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
    /// Spell out an amount the way the total is printed
    Words {
        amount: Decimal,
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
    /// Print a sample invoice as JSON
    Sample,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            out_dir,
            profile,
            no_compress,
        } => {
            let invoice = input::load_invoice(&input)?;
            validate(&invoice)?;
            let profile = input::load_profile(profile.as_deref())?;
            debug!(business = %profile.name, "profile loaded");

            let rendered = InvoiceRenderer::new(profile)
                .with_compression(!no_compress)
                .render(&invoice)
                .with_context(|| format!("failed to generate invoice {}", invoice.invoice_id))?;
            let path = output::save(&rendered, &out_dir)?;
            println!("{}", path.display());
        }
        Commands::Preview { input, profile } => {
            let invoice = input::load_invoice(&input)?;
            validate(&invoice)?;
            let profile = input::load_profile(profile.as_deref())?;
            print!("{}", preview::render_preview(&invoice, &profile)?);
        }
        Commands::Words { amount, profile } => {
            let profile = input::load_profile(profile.as_deref())?;
            println!("{}", amount_to_words(amount, &profile.currency)?);
        }
        Commands::Sample => {
            let sample = input::sample_invoice(Local::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&sample)?);
        }
    }
    Ok(())
}
