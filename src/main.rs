// textsim - Multi-metric text similarity engine
// Main entry point

use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use textsim::compare::Comparator;
use textsim::config::{load_config, Config};
use textsim::errors::{api_key_missing_message, UserFriendlyError};
use textsim::oracle::create_oracle;
use textsim::server::CompareServer;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "textsim")]
#[command(about = "Compare two texts with lexical, vector and AI semantic metrics", version)]
struct Args {
    /// Run mode
    #[command(subcommand)]
    command: Command,

    /// Path to config.toml (default: ~/.textsim/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Compare two texts once and print the result as JSON
    Compare {
        /// The texts to compare (omit whichever comes from --file-a/--file-b)
        #[arg(num_args = 0..=2)]
        texts: Vec<String>,

        /// Read the first text from a file
        #[arg(long = "file-a")]
        file_a: Option<PathBuf>,

        /// Read the second text from a file
        #[arg(long = "file-b")]
        file_b: Option<PathBuf>,

        /// Skip the semantic oracle
        #[arg(long = "no-oracle")]
        no_oracle: bool,

        /// Oracle timeout in milliseconds (overrides config)
        #[arg(long = "timeout-ms")]
        timeout_ms: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            run_server(config).await
        }
        Command::Compare {
            texts,
            file_a,
            file_b,
            no_oracle,
            timeout_ms,
            pretty,
        } => {
            if no_oracle {
                config.compare.enable_semantic_oracle = false;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.compare.oracle_timeout_ms = timeout_ms;
            }

            let mut positional = texts.into_iter();
            let text_a = read_input(file_a.as_deref(), &mut positional, "first")?;
            let text_b = read_input(file_b.as_deref(), &mut positional, "second")?;
            if positional.next().is_some() {
                bail!("Too many texts: pass two texts, or one text plus --file-a/--file-b");
            }
            run_compare(config, &text_a, &text_b, pretty).await
        }
    }
}

/// Initialize tracing on stderr so stdout stays clean for JSON output
fn init_tracing() {
    // Default: INFO level, can be overridden with RUST_LOG env var
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

fn build_comparator(config: &Config) -> Result<Comparator> {
    let oracle = if config.compare.enable_semantic_oracle {
        let oracle = create_oracle(&config.oracle)?;
        if oracle.is_none() {
            tracing::warn!(
                "{}",
                api_key_missing_message(&config.oracle.provider, config.oracle.api_key_env_var())
            );
        }
        oracle
    } else {
        None
    };

    Ok(Comparator::new(config.compare.clone(), oracle))
}

async fn run_server(config: Config) -> Result<()> {
    let comparator = build_comparator(&config)?;
    CompareServer::new(config.server.clone(), comparator)
        .serve()
        .await
}

async fn run_compare(config: Config, text_a: &str, text_b: &str, pretty: bool) -> Result<()> {
    let comparator = build_comparator(&config)?;
    let result = comparator.compare(text_a, text_b).await;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);
    Ok(())
}

/// Text from a file when one was given, otherwise the next positional argument
fn read_input(
    file: Option<&Path>,
    positional: &mut impl Iterator<Item = String>,
    which: &str,
) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .user_context_with_suggestion(
                &format!("Could not read the {} text from {}", which, path.display()),
                "Check that the file exists and is UTF-8 text",
            );
    }

    match positional.next() {
        Some(text) => Ok(text),
        None => bail!(
            "Missing the {} text (pass it as an argument or with --file-a/--file-b)",
            which
        ),
    }
}
