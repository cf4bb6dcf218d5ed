use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};

use crate::game::{Game, GuessOutcome, Round, RoundStatus};

/// Run a whole game on a line-based console. Returns the total score.
/// End of input stops the game early; the score so far still counts.
pub fn play<R: Rng, I: BufRead, W: Write>(
    game: &mut Game<R>,
    mut input: I,
    mut out: W,
) -> Result<u32> {
    let config = *game.config();
    writeln!(out, "Number Guessing Game")?;
    writeln!(out, "Total Number of Rounds: {}", config.rounds)?;
    writeln!(
        out,
        "Attempts To Guess Number In Each Round: {}\n",
        config.max_attempts
    )?;

    while let Some(mut round) = game.next_round() {
        writeln!(
            out,
            "Round {}: Guess the number between {} and {} in {} attempts.",
            round.number(),
            config.min,
            config.max,
            config.max_attempts
        )?;

        let finished = play_round(&mut round, &mut input, &mut out)?;
        game.settle(&round);

        if !finished {
            writeln!(out, "\nInput ended.")?;
            break;
        }

        match round.status() {
            RoundStatus::Lost => writeln!(
                out,
                "Round {}: You did not guess the number. The correct number was {}.\n",
                round.number(),
                round.secret()
            )?,
            _ => writeln!(out, "End of Round {}\n", round.number())?,
        }
    }

    writeln!(out, "Game Over. Total Score = {}", game.total_score())?;
    out.flush()?;
    Ok(game.total_score())
}

/// Prompt until the round is over. Returns `false` if input ran out first.
fn play_round<I: BufRead, W: Write>(round: &mut Round, input: &mut I, out: &mut W) -> Result<bool> {
    let mut line = String::new();

    while !round.is_over() {
        write!(out, "Enter your guess: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match round.guess_input(&line) {
            Ok(GuessOutcome::Correct { attempts, score }) => writeln!(
                out,
                "You Guessed Right. Attempts = {}. Round Score = {}",
                attempts, score
            )?,
            Ok(GuessOutcome::Higher {
                guess,
                attempts_left,
            }) => writeln!(
                out,
                "The number is greater than {}. Attempts Left = {}.",
                guess, attempts_left
            )?,
            Ok(GuessOutcome::Lower {
                guess,
                attempts_left,
            }) => writeln!(
                out,
                "The number is less than {}. Attempts Left = {}.",
                guess, attempts_left
            )?,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    Ok(true)
}
