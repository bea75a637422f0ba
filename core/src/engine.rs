use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    GameOver,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Owns the board for one game session and drives it from swipes.
#[derive(Clone, Debug)]
pub struct PlayEngine<S = RandomSpawner> {
    config: GameConfig,
    board: Board,
    /// Reused buffer a move is computed into before it is committed.
    scratch: Board,
    state: EngineState,
    move_count: u32,
    spawner: S,
}

impl PlayEngine<RandomSpawner> {
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomSpawner::new(seed))
    }
}

impl<S: TileSpawner> PlayEngine<S> {
    /// Starts a fresh game with two spawned tiles.
    pub fn new(config: GameConfig, spawner: S) -> Result<Self> {
        let mut engine = Self::with_board(config, spawner, Board::new());
        engine.reset()?;
        Ok(engine)
    }

    /// Continues from an existing position, already finished if it has no moves left.
    ///
    /// A finished position is replaced by a fresh game on the next swipe when `auto_restart` is set.
    pub fn with_board(config: GameConfig, spawner: S, board: Board) -> Self {
        let state = if board.has_any_move() {
            EngineState::Playing
        } else {
            EngineState::GameOver
        };
        Self {
            config,
            board,
            scratch: Board::new(),
            state,
            move_count: 0,
            spawner,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.board.score()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn has_any_move(&self) -> bool {
        self.board.has_any_move()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Clears the board and spawns the two opening tiles.
    pub fn reset(&mut self) -> Result<()> {
        self.board.clear();
        self.state = EngineState::Playing;
        self.move_count = 0;
        self.spawn_random_tile()?;
        self.spawn_random_tile()?;
        log::debug!("new game, score: {}", self.score());
        Ok(())
    }

    /// Drops one new tile on a random empty cell, a full board ends the game instead.
    pub fn spawn_random_tile(&mut self) -> Result<SpawnOutcome> {
        let outcome = spawn_into(&mut self.spawner, &mut self.board)?;
        if matches!(outcome, SpawnOutcome::BoardFull) {
            log::warn!("No empty cell left to spawn into");
            self.end_game();
        }
        Ok(outcome)
    }

    /// Applies a swipe, spawns a tile when anything moved and checks for the end of the game.
    ///
    /// The move is only committed once the spawn succeeded, an error leaves the engine untouched.
    pub fn swipe(&mut self, direction: Direction) -> Result<MoveOutcome> {
        if self.state.is_finished() {
            return self.restart_finished();
        }

        self.scratch.clone_from(&self.board);
        if !self.scratch.apply_move(direction) {
            return Ok(MoveOutcome::NoChange);
        }
        let spawn = spawn_into(&mut self.spawner, &mut self.scratch)?;
        core::mem::swap(&mut self.board, &mut self.scratch);
        self.move_count += 1;

        if matches!(spawn, SpawnOutcome::BoardFull) || !self.board.has_any_move() {
            let final_score = self.score();
            self.end_game();
            log::debug!(
                "game over after {} moves, score: {}",
                self.move_count,
                final_score
            );
            if self.config.auto_restart {
                self.reset()?;
            }
            return Ok(MoveOutcome::GameOver { final_score });
        }

        log::trace!("moved {:?}, score: {}", direction, self.score());
        Ok(MoveOutcome::Moved)
    }

    /// Classifies a fling with the configured thresholds and swipes accordingly.
    pub fn fling(&mut self, fling: &Fling) -> Result<MoveOutcome> {
        match fling.classify(&self.config.gesture) {
            Some(direction) => self.swipe(direction),
            None => {
                log::trace!("ignored fling {:?}", fling);
                Ok(MoveOutcome::Ignored)
            }
        }
    }

    fn end_game(&mut self) {
        self.state = EngineState::GameOver;
    }

    /// Input on a finished game, either starts over or is refused.
    fn restart_finished(&mut self) -> Result<MoveOutcome> {
        if !self.config.auto_restart {
            return Err(GameError::AlreadyEnded);
        }
        let final_score = self.score();
        log::debug!("restarting finished game, score: {}", final_score);
        self.reset()?;
        Ok(MoveOutcome::GameOver { final_score })
    }
}

fn spawn_into(spawner: &mut impl TileSpawner, board: &mut Board) -> Result<SpawnOutcome> {
    let free = board.free_cells();
    if free.is_empty() {
        return Ok(SpawnOutcome::BoardFull);
    }

    let (coords, tile) = spawner.spawn(&free);
    board.place(coords, tile)?;
    log::debug!("spawned {} at {:?}", tile, coords);
    Ok(SpawnOutcome::Spawned { coords, tile })
}
