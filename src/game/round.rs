use thiserror::Error;

use super::GameConfig;

/// Answer to a valid guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The secret is greater than `guess`.
    Higher { guess: u32, attempts_left: u32 },
    /// The secret is less than `guess`.
    Lower { guess: u32, attempts_left: u32 },
    Correct { attempts: u32, score: u32 },
}

/// Input that did not count as an attempt, or a guess after the round ended
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("Invalid input. Please enter a valid number.")]
    NotANumber,

    #[error("Your guess should be between {min} and {max}.")]
    OutOfRange { min: u32, max: u32 },

    #[error("The round is over.")]
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won { attempts: u32, score: u32 },
    Lost,
}

/// One round of the guessing game.
#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    secret: u32,
    config: GameConfig,
    attempts: u32,
    status: RoundStatus,
}

impl Round {
    pub fn new(number: u32, secret: u32, config: GameConfig) -> Self {
        Self {
            number,
            secret,
            config,
            attempts: 0,
            status: RoundStatus::InProgress,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn secret(&self) -> u32 {
        self.secret
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn attempts_left(&self) -> u32 {
        self.config.max_attempts - self.attempts
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    /// Points earned so far: zero unless the round was won.
    pub fn score(&self) -> u32 {
        match self.status {
            RoundStatus::Won { score, .. } => score,
            _ => 0,
        }
    }

    /// Guess from a line of user input.
    pub fn guess_input(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        // Signed parse so "-5" is reported as out of range, not as garbage.
        let value: i64 = input.trim().parse().map_err(|_| GuessError::NotANumber)?;
        let value = u32::try_from(value).map_err(|_| self.out_of_range())?;
        self.guess(value)
    }

    /// Guess a number. Only in-range guesses use up an attempt.
    pub fn guess(&mut self, value: u32) -> Result<GuessOutcome, GuessError> {
        if self.is_over() {
            return Err(GuessError::RoundOver);
        }
        if value < self.config.min || value > self.config.max {
            return Err(self.out_of_range());
        }

        self.attempts += 1;

        if value == self.secret {
            let score = self.config.max_attempts - self.attempts + 1;
            self.status = RoundStatus::Won {
                attempts: self.attempts,
                score,
            };
            return Ok(GuessOutcome::Correct {
                attempts: self.attempts,
                score,
            });
        }

        let attempts_left = self.attempts_left();
        if attempts_left == 0 {
            self.status = RoundStatus::Lost;
        }

        if value < self.secret {
            Ok(GuessOutcome::Higher {
                guess: value,
                attempts_left,
            })
        } else {
            Ok(GuessOutcome::Lower {
                guess: value,
                attempts_left,
            })
        }
    }

    fn out_of_range(&self) -> GuessError {
        GuessError::OutOfRange {
            min: self.config.min,
            max: self.config.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(secret: u32) -> Round {
        Round::new(1, secret, GameConfig::default())
    }

    #[test]
    fn test_first_guess_scores_max() {
        let mut round = round(42);
        assert_eq!(
            round.guess(42),
            Ok(GuessOutcome::Correct {
                attempts: 1,
                score: 10
            })
        );
        assert_eq!(round.score(), 10);
        assert!(round.is_over());
    }

    #[test]
    fn test_hints_and_remaining_attempts() {
        let mut round = round(42);
        assert_eq!(
            round.guess(10),
            Ok(GuessOutcome::Higher {
                guess: 10,
                attempts_left: 9
            })
        );
        assert_eq!(
            round.guess(90),
            Ok(GuessOutcome::Lower {
                guess: 90,
                attempts_left: 8
            })
        );
        assert_eq!(
            round.guess(42),
            Ok(GuessOutcome::Correct {
                attempts: 3,
                score: 8
            })
        );
    }

    #[test]
    fn test_invalid_input_does_not_count() {
        let mut round = round(42);
        assert_eq!(round.guess_input("forty"), Err(GuessError::NotANumber));
        assert_eq!(round.guess_input(""), Err(GuessError::NotANumber));
        assert_eq!(
            round.guess_input("101"),
            Err(GuessError::OutOfRange { min: 1, max: 100 })
        );
        assert_eq!(
            round.guess_input("-5"),
            Err(GuessError::OutOfRange { min: 1, max: 100 })
        );
        assert_eq!(round.guess_input("0"), Err(GuessError::OutOfRange { min: 1, max: 100 }));
        assert_eq!(round.attempts(), 0);

        assert_eq!(
            round.guess_input(" 42 "),
            Ok(GuessOutcome::Correct {
                attempts: 1,
                score: 10
            })
        );
    }

    #[test]
    fn test_hint_carries_parsed_guess() {
        let mut round = round(42);
        assert_eq!(
            round.guess_input("+07"),
            Ok(GuessOutcome::Higher {
                guess: 7,
                attempts_left: 9
            })
        );
        assert_eq!(
            round.guess_input("050"),
            Ok(GuessOutcome::Lower {
                guess: 50,
                attempts_left: 8
            })
        );
    }

    #[test]
    fn test_round_is_lost_after_last_attempt() {
        let mut round = round(100);
        for expected_left in (0..10).rev() {
            assert_eq!(
                round.guess(1),
                Ok(GuessOutcome::Higher {
                    guess: 1,
                    attempts_left: expected_left
                })
            );
        }
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.score(), 0);
        assert_eq!(round.guess(100), Err(GuessError::RoundOver));
    }

    #[test]
    fn test_correct_on_last_attempt_scores_one() {
        let mut round = round(7);
        for _ in 0..9 {
            round.guess(8).unwrap();
        }
        assert_eq!(
            round.guess(7),
            Ok(GuessOutcome::Correct {
                attempts: 10,
                score: 1
            })
        );
    }
}
