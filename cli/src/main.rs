use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tilemerge_core::{GameSession, RngSource, TileSource};

use crate::args::Args;
use crate::game::Game;
use crate::storage::{GameData, Storage};

mod args;
mod game;
mod storage;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let storage = Storage::new(&args.data_dir);
    let mut data: GameData = storage.load_or_default();

    let source = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let session = GameSession::new(args.session_config(), source, data.highest_score)
        .context("Could not start a game with these options")?;

    let mut game = Game::new(session, io::stdout().lock());
    if data.first_run {
        game.print_help()?;
    }
    play_and_save(&mut game, io::stdin().lock(), &storage, &mut data)
}

/// Runs the game loop, then records the high score whether or not the loop failed.
fn play_and_save<S: TileSource, W: Write>(
    game: &mut Game<S, W>,
    input: impl BufRead,
    storage: &Storage,
    data: &mut GameData,
) -> anyhow::Result<()> {
    let played = game.run(input);

    data.highest_score = data.highest_score.max(game.session().high_score());
    data.first_run = false;
    storage.save(data)?;
    log::debug!("Saved high score {}", data.highest_score);
    played.context("Game loop failed")
}
