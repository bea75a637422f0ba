use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tessera_core::PlayEngine;

mod config;
mod input;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Sliding-tile merge puzzle on a 4x4 board", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with game and gesture settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON snapshot per line instead of the text board
    #[arg(long)]
    json: bool,

    /// Stop at game over instead of starting a new game
    #[arg(long)]
    no_restart: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut config = match &args.config {
        Some(path) => config::TermConfig::load(path)?,
        None => config::TermConfig::default(),
    };
    if args.no_restart {
        config.game.auto_restart = false;
    }
    log::debug!("config: {:?}", config);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut engine = PlayEngine::from_seed(config.game, seed).context("could not start a game")?;
    let renderer = if args.json {
        render::Renderer::Json
    } else {
        render::Renderer::Text
    };
    renderer.note(&mut io::stdout(), "type `help` for the controls")?;

    session::run(&mut engine, io::stdin().lock(), &mut io::stdout().lock(), renderer)
}
