use crate::restrictions::WORD_LENGTH;
use std::collections::HashMap;
use std::iter::zip;
use thiserror::Error;

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterResult {
    Correct,
    PresentNotHere,
    NotPresent,
}

/// Indicates that an error occurred while trying to guess the objective word.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// No remaining candidate satisfies what is known about the objective word. Holds the last
    /// word submitted, accepted or not.
    #[error("no candidate word fits the known constraints (round {round}, last guess: {last_guess:?})")]
    CandidateExhausted {
        round: u32,
        last_guess: Option<Box<str>>,
    },
    /// The judge could not evaluate a submission, for a reason other than rejecting the word.
    #[error("the judge failed in round {round} while evaluating \"{word}\": {reason}")]
    ExternalInterfaceFailure {
        round: u32,
        word: Box<str>,
        reason: String,
    },
    /// Feedback contradicts what is already known. This means the feedback was misread.
    #[error("feedback for '{letter}' at position {position} contradicts earlier feedback")]
    ConstraintConflict { letter: char, position: usize },
    /// The feedback does not line up with the guess it was given for.
    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),
    /// The guess and objective words have different lengths. Holds the objective's length.
    #[error("guesses must be {0} letters long")]
    WordLength(usize),
    /// The corpus could not be loaded or saved.
    #[error("corpus storage failed: {0}")]
    Persistence(String),
}

/// The result of a single word guess.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessResult<'a> {
    pub guess: &'a str,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl<'a> GuessResult<'a> {
    /// Parses feedback written as one character per letter:
    ///
    ///   * `g`: the letter is correct.
    ///   * `y`: the letter is in the word, but not here.
    ///   * `.`: the letter is not in the word.
    ///
    /// ```
    /// use rs_wordle_autoplay::{GuessResult, LetterResult};
    ///
    /// let result = GuessResult::parse("crane", "g.y..").unwrap();
    ///
    /// assert_eq!(result.results[0], LetterResult::Correct);
    /// assert_eq!(result.results[2], LetterResult::PresentNotHere);
    /// ```
    pub fn parse(guess: &'a str, feedback: &str) -> Result<GuessResult<'a>, WordleError> {
        let feedback = feedback.trim();
        if guess.chars().count() != feedback.chars().count() {
            return Err(WordleError::InvalidFeedback(format!(
                "\"{feedback}\" does not match the length of \"{guess}\""
            )));
        }
        Ok(GuessResult {
            guess,
            results: feedback
                .chars()
                .map(|marker| match marker {
                    'g' | 'G' => Ok(LetterResult::Correct),
                    'y' | 'Y' => Ok(LetterResult::PresentNotHere),
                    '.' => Ok(LetterResult::NotPresent),
                    other => Err(WordleError::InvalidFeedback(format!(
                        "unknown marker '{other}', expected 'g', 'y', or '.'"
                    ))),
                })
                .collect::<Result<Vec<LetterResult>, WordleError>>()?,
        })
    }

    /// Returns `true` iff every letter was correct.
    pub fn is_correct(&self) -> bool {
        self.results.len() == WORD_LENGTH
            && self
                .results
                .iter()
                .all(|result| *result == LetterResult::Correct)
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Box<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Box<str>>),
}

impl GameResult {
    /// The accepted guesses, in the order they were made.
    pub fn guesses(&self) -> &[Box<str>] {
        match self {
            GameResult::Success(guesses) | GameResult::Failure(guesses) => guesses,
        }
    }
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Letters in the right place are marked first. Remaining copies of a letter are then marked as
/// present from left to right, until the objective runs out of unmatched copies of that letter.
pub fn get_result_for_guess<'a>(
    objective: &str,
    guess: &'a str,
) -> Result<GuessResult<'a>, WordleError> {
    let objective_length = objective.chars().count();
    if objective_length != guess.chars().count() {
        return Err(WordleError::WordLength(objective_length));
    }
    let mut results = vec![LetterResult::NotPresent; objective_length];
    let mut unmatched: HashMap<char, usize> = HashMap::new();
    for ((index, guess_letter), objective_letter) in zip(guess.chars().enumerate(), objective.chars())
    {
        if guess_letter == objective_letter {
            results[index] = LetterResult::Correct;
        } else {
            *unmatched.entry(objective_letter).or_insert(0) += 1;
        }
    }
    for (index, letter) in guess.chars().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some(count) = unmatched.get_mut(&letter) {
            if *count > 0 {
                *count -= 1;
                results[index] = LetterResult::PresentNotHere;
            }
        }
    }
    Ok(GuessResult { guess, results })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unknown_marker() {
        assert_eq!(
            GuessResult::parse("crane", "g.x.."),
            Err(WordleError::InvalidFeedback(
                "unknown marker 'x', expected 'g', 'y', or '.'".to_string()
            ))
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(matches!(
            GuessResult::parse("crane", "g.y"),
            Err(WordleError::InvalidFeedback(_))
        ));
    }

    #[test]
    fn is_correct_needs_every_letter() -> Result<(), WordleError> {
        assert!(GuessResult::parse("crane", "ggggg")?.is_correct());
        assert!(!GuessResult::parse("crane", "gggg.")?.is_correct());
        Ok(())
    }

    #[test]
    fn game_result_guesses() {
        let result = GameResult::Failure(vec![Box::from("crane"), Box::from("slate")]);

        assert_eq!(result.guesses().len(), 2);
        assert_eq!(&*result.guesses()[1], "slate");
    }
}
