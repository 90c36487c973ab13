use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use triage_cli::{commands, load_catalog};
use triage_engine::{MatchProfile, TriageEngine};

mod guide;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Issue matching and checklist comparison over a troubleshooting catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog export to match against (JSON array, newest first)
    #[arg(short, long, global = true, default_value = "issues.json")]
    catalog: PathBuf,

    /// Matching profile: a built-in name (default, strict) or a JSON file path
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best-matching catalog issue for a problem description
    Match {
        /// Free-text problem description
        query: String,
    },
    /// Check a drafted description for near-duplicates before saving it
    Duplicates {
        /// Drafted issue description
        description: String,
    },
    /// Diff claimed checks against an issue's standard checklist
    Checklist {
        /// Catalog id of the issue whose checklist applies
        #[arg(long)]
        issue_id: String,
        /// Free text describing the checks already performed
        #[arg(long, default_value = "", conflicts_with = "claimed_file")]
        claimed: String,
        /// Read the claimed-checks text from a file instead
        #[arg(long)]
        claimed_file: Option<PathBuf>,
    },
    /// List catalog issues, optionally filtered by a substring query
    List {
        /// Filter text; empty shows the whole catalog
        #[arg(default_value = "")]
        query: String,
    },
    /// Interactive guided flow: match, compare checks, assemble escalation
    Guide,
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let profile = MatchProfile::resolve(&cli.profile)?;
    let engine = TriageEngine::new(profile);
    let catalog = load_catalog(&cli.catalog)?;

    match cli.command {
        Commands::Match { query } => print_json(&commands::run_match(&engine, &query, &catalog)),
        Commands::Duplicates { description } => {
            print_json(&commands::run_duplicates(&engine, &description, &catalog))
        }
        Commands::Checklist {
            issue_id,
            claimed,
            claimed_file,
        } => {
            let claimed_text = match claimed_file {
                Some(path) => std::fs::read_to_string(path)?,
                None => claimed,
            };
            print_json(&commands::run_checklist(
                &engine,
                &issue_id,
                &claimed_text,
                &catalog,
            )?)
        }
        Commands::List { query } => print_json(&commands::run_list(&engine, &query, &catalog)),
        Commands::Guide => guide::run(&engine, &catalog),
    }
}
