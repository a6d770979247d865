//! Command-line zone lookup.
//!
//! With an address argument, runs one lookup and prints the result. Without
//! one, reads addresses interactively; typing a new address while a lookup is
//! pending supersedes it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cazone::config::DEFAULT_LOG_FILTER;
use cazone::render::{JsonRenderer, Renderer, TextRenderer};
use cazone::{Config, LookupSession, ZoneLookup, ZonePolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cazone")]
#[command(about = "Find the California zone of an address")]
struct Args {
    /// Address to look up (omit for interactive mode)
    address: Vec<String>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Zone policy: latitude_band or city_list
    #[arg(short, long)]
    policy: Option<ZonePolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with results
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let lookup = ZoneLookup::from_config(&config, args.policy)
        .context("Failed to create geocoding client")?;

    let renderer: Box<dyn Renderer> = match args.format {
        OutputFormat::Text => Box::new(TextRenderer::new(config.render.coordinate_precision)),
        OutputFormat::Json => Box::new(JsonRenderer),
    };

    if !args.address.is_empty() {
        let view = lookup.run(&args.address.join(" ")).await;
        println!("{}", renderer.render(&view));
        if view.status.is_error() {
            std::process::exit(1);
        }
        return Ok(());
    }

    interactive(Arc::new(lookup), renderer.as_ref()).await
}

fn prompt() {
    eprint!("Dirección (:q para salir)> ");
}

async fn interactive(lookup: Arc<ZoneLookup>, renderer: &dyn Renderer) -> Result<()> {
    let (mut session, mut views) = LookupSession::new(lookup);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut alternatives: Vec<String> = Vec::new();

    prompt();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let input = line.trim();
                if input == ":q" {
                    return Ok(());
                }

                // A bare number picks one of the suggestions from the last result
                let query = match input.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= alternatives.len() => alternatives[n - 1].clone(),
                    _ => input.to_string(),
                };
                session.submit(query);
                eprintln!("Buscando ubicación precisa…");
            }
            Some(delivered) = views.recv() => {
                if !session.is_current(delivered.generation) {
                    continue;
                }
                println!("{}", renderer.render(&delivered.view));
                alternatives = delivered.view.alternatives;
                prompt();
            }
        }
    }

    // stdin closed; let the last lookup finish
    while session.is_pending() || !views.is_empty() {
        match views.recv().await {
            Some(delivered) if session.is_current(delivered.generation) => {
                println!("{}", renderer.render(&delivered.view));
                break;
            }
            Some(_) => continue,
            None => break,
        }
    }

    Ok(())
}
