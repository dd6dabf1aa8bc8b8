use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tmx2c::{Batch, BatchOptions, MalformedPolicy, SyncedFile};
use tracing_subscriber::EnvFilter;

/// Convert Tiled maps into a C header of `#define`s.
#[derive(Parser, Debug)]
#[command(name = "tmx2c", version, about)]
struct Cli {
    /// Map files (.tmx, or .json/.tmj) to convert, in output order
    inputs: Vec<PathBuf>,

    /// Header to write; created fresh in the working directory by default
    #[arg(short, long, default_value = "out.h")]
    output: PathBuf,

    /// Emit every map attribute instead of just version and orientation
    #[arg(long)]
    all_attributes: bool,

    /// Convert malformed documents as empty maps instead of skipping them
    #[arg(long)]
    lenient: bool,
}

impl Cli {
    fn options(&self) -> BatchOptions {
        let mut options = BatchOptions::default();
        if self.all_attributes {
            options = options.with_all_attributes();
        }
        if self.lenient {
            options = options.with_malformed_policy(MalformedPolicy::Absorb);
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let out = SyncedFile::create(&cli.output)
        .with_context(|| format!("Creating output file {}", cli.output.display()))?;

    let mut batch = Batch::new(out, cli.options());
    batch
        .run(&cli.inputs)
        .with_context(|| format!("Writing {}", cli.output.display()))?;
    let (_, report) = batch
        .finish()
        .with_context(|| format!("Flushing {}", cli.output.display()))?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "some inputs produced no definitions"
        );
    }

    Ok(())
}
