//! Number-guessing game: a fixed number of rounds, each with a secret number
//! and a limited number of attempts. Scoring rewards early guesses.

mod round;

pub use round::*;

use rand::Rng;
use thiserror::Error;

/// Rules of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub min: u32,
    pub max: u32,
    pub max_attempts: u32,
    pub rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            max_attempts: 10,
            rounds: 3,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min > self.max {
            return Err(GameError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.max_attempts == 0 {
            return Err(GameError::NoAttempts);
        }
        if self.rounds == 0 {
            return Err(GameError::NoRounds);
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    EmptyRange { min: u32, max: u32 },

    #[error("A round needs at least one attempt")]
    NoAttempts,

    #[error("A game needs at least one round")]
    NoRounds,
}

/// A game in progress. Hands out rounds and keeps the running score.
pub struct Game<R: Rng> {
    config: GameConfig,
    rng: R,
    rounds_started: u32,
    total_score: u32,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            rounds_started: 0,
            total_score: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Start the next round with a fresh secret, or `None` once every round was played.
    pub fn next_round(&mut self) -> Option<Round> {
        if self.rounds_started >= self.config.rounds {
            return None;
        }
        self.rounds_started += 1;
        let secret = self.rng.gen_range(self.config.min..=self.config.max);
        Some(Round::new(self.rounds_started, secret, self.config))
    }

    /// Add a finished round's score to the total and return the new total.
    pub fn settle(&mut self, round: &Round) -> u32 {
        self.total_score += round.score();
        self.total_score
    }
}
