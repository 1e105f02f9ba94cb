use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use esdsl_core::{
    AggregationQuerySpec, Assemble, RelevanceFilterMode, RelevanceQuerySpec, SimpleQuerySpec,
    Tuning, Validate,
};
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esdsl")]
#[command(about="Compile search specifications into query DSL request bodies", long_about=None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Print compact JSON instead of pretty-printed.
    #[arg(long, global = true)]
    compact: bool,
    /// Skip the validation pass and trust the input.
    #[arg(long, global = true)]
    no_validate: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// bool/must query from filters, matches and their nested variants
    Simple { spec: String },
    /// Scored phrase + fuzzy search
    Relevance {
        spec: String,
        #[arg(long)]
        filter_mode: Option<RelevanceFilterMode>,
    },
    /// Terms buckets with top hits per bucket
    Aggregate { spec: String },
}

// "-" reads stdin
fn read_spec<T: DeserializeOwned>(path: &str) -> Result<T> {
    let mut s = String::new();
    if path == "-" {
        std::io::stdin().read_to_string(&mut s)?;
    } else {
        s = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    }
    serde_json::from_str(&s).with_context(|| format!("parsing specification {path}"))
}

fn build<T: DeserializeOwned + Validate + Assemble>(
    path: &str,
    tuning: &Tuning,
    validate: bool,
) -> Result<serde_json::Value> {
    let spec: T = read_spec(path)?;
    if validate {
        spec.validate()?;
    }
    Ok(spec.assemble_with(tuning).to_value()?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut tuning = Tuning::from_env();
    let validate = !cli.no_validate;
    let doc = match cli.cmd {
        Cmd::Simple { spec } => build::<SimpleQuerySpec>(&spec, &tuning, validate)?,
        Cmd::Relevance { spec, filter_mode } => {
            if let Some(mode) = filter_mode {
                tuning.relevance_filters = mode;
            }
            build::<RelevanceQuerySpec>(&spec, &tuning, validate)?
        }
        Cmd::Aggregate { spec } => build::<AggregationQuerySpec>(&spec, &tuning, validate)?,
    };
    info!(keys = doc.as_object().map(|o| o.len()).unwrap_or(0), "request document ready");

    let out = if cli.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{out}");
    Ok(())
}
