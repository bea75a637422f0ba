use anyhow::Context;
use std::io::{BufRead, Write};
use tessera_core::{GameError, MoveOutcome, PlayEngine, TileSpawner};

use crate::input::{self, Command};
use crate::render::Renderer;

/// Feeds input lines to the engine and renders after each one, until `quit` or end of input.
pub(crate) fn run<S: TileSpawner>(
    engine: &mut PlayEngine<S>,
    input: impl BufRead,
    output: &mut impl Write,
    renderer: Renderer,
) -> anyhow::Result<()> {
    renderer.render(output, &engine.snapshot(), None)?;

    for line in input.lines() {
        let line = line.context("could not read input")?;

        let command = match input::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                log::debug!("rejected input {:?}: {}", line, err);
                renderer.note(output, &err.to_string())?;
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                renderer.note(output, input::HELP)?;
                continue;
            }
            Command::NewGame => {
                engine.reset()?;
                None
            }
            Command::Swipe(direction) => played(engine.swipe(direction), renderer, output)?,
            Command::Fling(fling) => played(engine.fling(&fling), renderer, output)?,
        };

        renderer.render(output, &engine.snapshot(), outcome)?;
    }

    log::info!(
        "leaving with score {} after {} moves",
        engine.score(),
        engine.move_count()
    );
    Ok(())
}

/// Passes a move through, a finished game is reported to the player and leaves the loop running.
fn played(
    result: tessera_core::Result<MoveOutcome>,
    renderer: Renderer,
    output: &mut impl Write,
) -> anyhow::Result<Option<MoveOutcome>> {
    match result {
        Ok(outcome) => Ok(Some(outcome)),
        Err(GameError::AlreadyEnded) => {
            renderer.note(output, "game over, type `new` to start again")?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
