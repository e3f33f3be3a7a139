use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use statehash::{load_keywords, TableConfig, TableError, TracingSink, TransitionTable};

/// Map keywords to identifiers through a state transition table
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File with one keyword per line
    keywords: PathBuf,

    /// Initial number of states per lane (0 uses the default)
    #[clap(long, default_value_t = 0)]
    capacity: u32,

    /// States added per lane on each growth (0 uses the default)
    #[clap(long, default_value_t = 0)]
    growth: u32,

    /// More output; -vv also traces table internals
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identifier assigned to every keyword in the file
    Ids,
    /// Print the identifier of each pattern
    Lookup {
        #[clap(required = true)]
        patterns: Vec<String>,
    },
    /// Print table statistics
    Stats,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = TableConfig::new(args.capacity, args.growth);
    let mut table = if args.verbose >= 2 {
        TransitionTable::with_sink(config, TracingSink)
    } else {
        TransitionTable::new(config)
    }
    .context("initializing transition table")?;

    let report = load_keywords(&mut table, &args.keywords)
        .with_context(|| format!("loading keywords from {}", args.keywords.display()))?;
    tracing::info!(
        keywords = report.keywords.len(),
        repeated = report.repeated,
        blank = report.blank,
        "keywords loaded"
    );

    let mut status = ExitCode::SUCCESS;
    match args.command {
        Command::Ids => {
            for (kw, id) in &report.keywords {
                println!("String: {} : length is:{}  ID is: {}", kw, kw.len(), id);
            }
        }
        Command::Lookup { patterns } => {
            for p in &patterns {
                match table.lookup(p.as_bytes()) {
                    Ok(id) => println!("ID of Pattern: {} length {} , is {}", p, p.len(), id),
                    Err(TableError::NotFound { .. }) => {
                        println!("Pattern [ {} ] not found", p);
                        status = ExitCode::FAILURE;
                    }
                    Err(e) => return Err(e).with_context(|| format!("looking up {p:?}")),
                }
            }
        }
        Command::Stats => {
            let stats = table.stats();
            println!("keywords:        {}", stats.identifiers);
            println!("states:          {}", stats.states);
            println!("capacity:        {}", stats.capacity);
            println!("growth events:   {}", stats.growth_events);
            println!("bytes used:      {}", stats.bytes_used);
            println!("bytes reserved:  {}", stats.bytes_reserved);
        }
    }

    table.release();
    Ok(status)
}
