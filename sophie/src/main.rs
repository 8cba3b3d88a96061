#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use miette::IntoDiagnostic;
use sophie::{Run, RunConfig};
use sophie_tree::FormatStyle;

#[derive(Parser, Debug)]
#[command(
    name = "sophie",
    version,
    about = "Synthesize well-typed boolean terms and present them in English"
)]
struct Cli {
    /// TOML run file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Derivation depth. Overrides `synthesis.max_depth`.
    #[arg(long)]
    depth: Option<usize>,

    /// Keep each factory application with this probability
    #[arg(long)]
    probability: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Draw this many distinct terms instead of printing the whole stream
    #[arg(long)]
    sample: Option<usize>,

    /// Type-check every term against the scope
    #[arg(long)]
    verify: bool,

    /// Append the alphabet encoding of each presentation
    #[arg(long)]
    encode: bool,

    /// Print the scope to stderr before the rows
    #[arg(long)]
    show_scope: bool,
}

impl Cli {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(depth) = self.depth {
            config.synthesis.max_depth = depth;
        }
        if self.probability.is_some() {
            config.synthesis.probability = self.probability;
        }
        if let Some(seed) = self.seed {
            config.synthesis.seed = seed;
        }
        if self.sample.is_some() {
            config.synthesis.sample = self.sample;
        }
        config.output.verify |= self.verify;
        config.output.encode |= self.encode;
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    cli.apply(&mut config);

    let run = Run::from_config(&config)?;
    if cli.show_scope {
        eprintln!("{}", run.scope().format(FormatStyle::colored()));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in run.rows()? {
        writeln!(out, "{row}").into_diagnostic()?;
    }
    Ok(())
}
