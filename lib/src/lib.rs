//! Plays five-letter word-guessing puzzles.
//!
//! The corpus is ranked once by [`scorers::LetterFrequencyScorer`]. Each round, the [`Solver`]
//! submits its best remaining candidate to a [`Judge`], records the feedback in a
//! [`ConstraintTracker`], and drops every candidate the feedback rules out.
//!
//! ```
//! use rs_wordle_autoplay::{play_game, Corpus, GameResult};
//!
//! let corpus = Corpus::from_iterator(["train", "crane", "slate", "spade"]);
//!
//! assert!(matches!(play_game("spade", 6, corpus), Ok(GameResult::Success(_))));
//! ```

mod data;
mod engine;
mod restrictions;
mod results;
pub mod scorers;

pub use data::*;
pub use engine::*;
pub use restrictions::ConstraintTracker;
pub use restrictions::ALPHABET;
pub use restrictions::WORD_LENGTH;
pub use results::*;

/// Building blocks of the [`ConstraintTracker`].
pub mod details {
    pub use crate::restrictions::letter_index;
    pub use crate::restrictions::LetterCount;
    pub use crate::restrictions::LetterSet;
    pub use crate::restrictions::Pattern;
    pub use crate::restrictions::PositionState;
}
