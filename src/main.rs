use std::time::Instant;

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};

use torsnake::term::TermManager;
use torsnake::{logging, GameConfig, GameSession, SnakeGame};

fn main() -> anyhow::Result<()> {
    logging::init()?;

    let config = GameConfig::default();
    let mut term = TermManager::new(config.scale)?;

    if let Err(err) = term.setup() {
        let _ = term.restore();
        return Err(err.context("failed to set up the terminal"));
    }

    let session = GameSession::new(&config, term.world(), StdRng::from_entropy(), Instant::now());
    let mut game = SnakeGame::new(term, session);

    // The terminal is restored even when the game loop failed
    let result = game.play();
    if let Err(err) = game.term_mut().restore() {
        error!(?err, "failed to restore terminal");
    }

    let score = result.context("game loop failed")?;
    info!(score, "bye");
    Ok(())
}
