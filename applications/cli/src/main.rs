/// Podcastr - terminal podcast player
use anyhow::Context;
use clap::{Parser, Subcommand};
use podcastr_cli::{config::AppConfig, render, run_player, PlayerOptions};
use podcastr_core::{load_records, Catalog};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr")]
#[command(about = "Podcastr episode player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the episode catalog
    List {
        /// Episode JSON file
        #[arg(short, long)]
        episodes: Option<PathBuf>,
    },
    /// Play the catalog with a simulated audio output
    Play {
        /// Episode JSON file
        #[arg(short, long)]
        episodes: Option<PathBuf>,
        /// Playlist index to start from
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        /// Fixed shuffle seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Logs go to stderr, stdout carries player output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List { episodes } => {
            list(&config, episodes.as_deref())?;
        }
        Commands::Play {
            episodes,
            index,
            seed,
        } => {
            play(config, episodes.as_deref(), index, seed).await?;
        }
    }

    Ok(())
}

fn load_catalog(config: &AppConfig, episodes: Option<&Path>) -> anyhow::Result<Catalog> {
    let path = episodes
        .or(config.catalog.episodes.as_deref())
        .context("no episode file given (use --episodes or catalog.episodes)")?;

    let records = load_records(path)
        .with_context(|| format!("failed to read episodes from {}", path.display()))?;
    let catalog = Catalog::from_records(records, config.catalog.options())?;

    tracing::info!("Loaded {} episodes", catalog.len());
    Ok(catalog)
}

fn list(config: &AppConfig, episodes: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(config, episodes)?;
    print!("{}", render::catalog_listing(&catalog));
    Ok(())
}

async fn play(
    config: AppConfig,
    episodes: Option<&Path>,
    index: usize,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(&config, episodes)?;
    if catalog.is_empty() {
        anyhow::bail!("catalog is empty");
    }

    let mut playback = config.playback.clone();
    if seed.is_some() {
        playback.shuffle_seed = seed;
    }

    let options = PlayerOptions {
        index,
        playback,
        simulation: config.simulation.clone(),
    };

    println!("Type `help` for commands");
    let reader = BufReader::new(tokio::io::stdin());
    let session = run_player(catalog.playlist(), options, reader).await?;

    println!("{}", render::status_line(session.state()));
    Ok(())
}
