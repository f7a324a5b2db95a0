use crate::data::*;
use crate::restrictions::ConstraintTracker;
use crate::results::*;
use crate::scorers::rank;
use crate::scorers::LetterFrequencyScorer;
use crate::scorers::WordScorer;
use log::debug;
use log::error;
use log::info;
use log::warn;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

/// Describes why a [`Judge`] could not evaluate a word.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct JudgeError(pub String);

/// What the judge made of a submitted word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<'a> {
    /// The word is not one the judge accepts as a guess. No round was used.
    Rejected,
    /// The word was accepted and evaluated.
    Accepted(GuessResult<'a>),
}

/// Evaluates guesses on behalf of the game being played.
pub trait Judge {
    /// Submits a word as the next guess.
    ///
    /// Any error is treated as fatal for the session; rejections must be reported as
    /// [`Submission::Rejected`] instead.
    fn submit<'a>(&mut self, word: &'a str) -> Result<Submission<'a>, JudgeError>;

    /// Whether the given evaluation means the game was won.
    fn is_won(&self, result: &GuessResult) -> bool {
        result.is_correct()
    }

    /// Whether another guess may still be made.
    fn has_remaining_rounds(&self) -> bool;
}

/// Plays a game by repeatedly guessing the best-ranked word that is consistent with all feedback
/// received so far.
///
/// Words are ranked once up front; later rounds only filter that ranking.
///
/// ```
/// use rs_wordle_autoplay::{Corpus, GameResult, SimulatedJudge, Solver};
///
/// let corpus = Corpus::from_iterator(["train", "crane", "slate", "spade"]);
/// let mut solver = Solver::new(corpus);
/// let mut judge = SimulatedJudge::new("slate");
///
/// assert!(matches!(solver.play(&mut judge), Ok(GameResult::Success(_))));
/// ```
pub struct Solver {
    corpus: Corpus,
    candidates: VecDeque<Arc<str>>,
    tracker: ConstraintTracker,
    rejected: Vec<Arc<str>>,
    guesses: Vec<Box<str>>,
    last_attempt: Option<Box<str>>,
    attempts: u32,
}

impl Solver {
    /// Constructs a solver that ranks the corpus by letter frequency.
    pub fn new(corpus: Corpus) -> Solver {
        let scorer = LetterFrequencyScorer::new(&corpus);
        Solver::with_scorer(corpus, &scorer)
    }

    /// Constructs a solver that ranks the corpus with the given scorer.
    pub fn with_scorer<S>(corpus: Corpus, scorer: &S) -> Solver
    where
        S: WordScorer + Sync,
    {
        let candidates = rank(scorer, &corpus)
            .into_iter()
            .map(|candidate| candidate.word)
            .collect();
        Solver {
            corpus,
            candidates,
            tracker: ConstraintTracker::new(),
            rejected: Vec::new(),
            guesses: Vec::new(),
            last_attempt: None,
            attempts: 0,
        }
    }

    /// Returns the word that would be guessed next, if any remain.
    pub fn select_next_guess(&self) -> Option<Arc<str>> {
        self.candidates.front().map(Arc::clone)
    }

    /// The remaining candidates, best first.
    pub fn remaining(&self) -> impl Iterator<Item = &Arc<str>> + '_ {
        self.candidates.iter()
    }

    pub fn num_remaining(&self) -> usize {
        self.candidates.len()
    }

    pub fn tracker(&self) -> &ConstraintTracker {
        &self.tracker
    }

    /// The corpus, minus any words the judge rejected.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Words the judge rejected this session.
    pub fn rejected(&self) -> &[Arc<str>] {
        &self.rejected
    }

    /// Accepted guesses, in order.
    pub fn guesses(&self) -> &[Box<str>] {
        &self.guesses
    }

    /// Every submission made, including rejected ones.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The word submitted most recently, whether or not the judge accepted it.
    pub fn last_attempt(&self) -> Option<&str> {
        self.last_attempt.as_deref()
    }

    /// Applies the feedback for a guess and drops every candidate that no longer fits.
    pub fn update(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        self.tracker.update(result)?;
        self.filter_candidates();
        Ok(())
    }

    /// Permanently removes a word the judge would not accept. What is known about the objective
    /// word is unchanged.
    pub fn reject(&mut self, word: &str) {
        self.candidates.retain(|candidate| candidate.as_ref() != word);
        if self.corpus.remove(word) {
            self.rejected.push(Arc::from(word));
        }
    }

    /// Plays rounds against the judge until the game is won or lost.
    pub fn play<J>(&mut self, judge: &mut J) -> Result<GameResult, WordleError>
    where
        J: Judge + ?Sized,
    {
        loop {
            let round = self.guesses.len() as u32 + 1;
            let word = match self.candidates.pop_front() {
                Some(word) => word,
                None => {
                    let err = WordleError::CandidateExhausted {
                        round,
                        last_guess: self.last_attempt.clone(),
                    };
                    error!("{err}");
                    return Err(err);
                }
            };
            self.attempts += 1;
            self.last_attempt = Some(Box::from(word.as_ref()));
            debug!(
                "Round {round}: submitting \"{word}\" ({} other candidates)",
                self.candidates.len()
            );

            let result = match judge.submit(&word) {
                Ok(Submission::Accepted(result)) => result,
                Ok(Submission::Rejected) => {
                    warn!("\"{word}\" was not accepted, removing it from the corpus");
                    self.reject(&word);
                    continue;
                }
                Err(err) => {
                    let err = WordleError::ExternalInterfaceFailure {
                        round,
                        word: Box::from(word.as_ref()),
                        reason: err.to_string(),
                    };
                    error!("{err}");
                    return Err(err);
                }
            };
            self.guesses.push(Box::from(word.as_ref()));

            if let Err(err) = self.tracker.update(&result) {
                error!("Round {round}: could not apply feedback for \"{word}\": {err}");
                return Err(err);
            }
            if judge.is_won(&result) {
                info!("Solved: \"{word}\" in {round} guesses");
                return Ok(GameResult::Success(self.guesses.clone()));
            }
            if !judge.has_remaining_rounds() {
                info!("Out of rounds after {round} guesses");
                return Ok(GameResult::Failure(self.guesses.clone()));
            }
            self.filter_candidates();
        }
    }

    /// Saves the corpus if the judge rejected any words. Returns whether anything was saved.
    pub fn persist<C>(&self, store: &mut C) -> Result<bool, WordleError>
    where
        C: CorpusStore + ?Sized,
    {
        if self.rejected.is_empty() {
            debug!("No words were rejected, leaving the stored corpus alone");
            return Ok(false);
        }
        info!(
            "Saving corpus without {} rejected words: {:?}",
            self.rejected.len(),
            self.rejected
        );
        store.save(self.corpus.words())?;
        Ok(true)
    }

    fn filter_candidates(&mut self) {
        let pattern = self.tracker.build_pattern();
        let tracker = &self.tracker;
        let before = self.candidates.len();
        self.candidates
            .retain(|word| pattern.is_match(word) && tracker.satisfies_counts(word));
        debug!(
            "Pattern {pattern} kept {} of {before} candidates",
            self.candidates.len()
        );
    }
}

/// The outcome of a whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub result: GameResult,
    /// Every submission made, including rejected ones.
    pub attempts: u32,
    /// Words removed from the corpus because the judge rejected them.
    pub rejected: Vec<Arc<str>>,
}

/// Plays one game, then saves the pruned corpus if any words were rejected.
///
/// The corpus is saved before returning, whether the game was won, lost, or failed.
pub fn play_session<J, C>(
    corpus: Corpus,
    judge: &mut J,
    store: &mut C,
) -> Result<SessionReport, WordleError>
where
    J: Judge + ?Sized,
    C: CorpusStore + ?Sized,
{
    let mut solver = Solver::new(corpus);
    let outcome = solver.play(judge);
    let persisted = solver.persist(store);
    match (outcome, persisted) {
        (Ok(result), Ok(_)) => Ok(SessionReport {
            result,
            attempts: solver.attempts(),
            rejected: solver.rejected().to_vec(),
        }),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(_)) => Err(err),
        (Err(err), Err(persist_err)) => {
            error!("Also failed to save the corpus: {persist_err}");
            Err(err)
        }
    }
}

/// Attempts to guess the given word within the maximum number of guesses, using words from the
/// corpus. Every word is accepted as a guess.
pub fn play_game(
    word_to_guess: &str,
    max_num_guesses: u32,
    corpus: Corpus,
) -> Result<GameResult, WordleError> {
    let mut judge = SimulatedJudge::new(word_to_guess).with_max_rounds(max_num_guesses);
    Solver::new(corpus).play(&mut judge)
}

/// A judge that knows the objective word and evaluates guesses locally.
#[derive(Debug, Clone)]
pub struct SimulatedJudge {
    objective: Arc<str>,
    dictionary: Option<HashSet<Arc<str>>>,
    max_rounds: u32,
    rounds_played: u32,
}

impl SimulatedJudge {
    pub const DEFAULT_MAX_ROUNDS: u32 = 6;

    /// Creates a judge for the given word that accepts any guess.
    pub fn new(objective: &str) -> SimulatedJudge {
        SimulatedJudge {
            objective: Arc::from(objective),
            dictionary: None,
            max_rounds: SimulatedJudge::DEFAULT_MAX_ROUNDS,
            rounds_played: 0,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> SimulatedJudge {
        self.max_rounds = max_rounds;
        self
    }

    /// Only accept guesses from the given words.
    pub fn with_dictionary<S: AsRef<str>>(mut self, words: &[S]) -> SimulatedJudge {
        self.dictionary = Some(words.iter().map(|word| Arc::from(word.as_ref())).collect());
        self
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }
}

impl Judge for SimulatedJudge {
    fn submit<'a>(&mut self, word: &'a str) -> Result<Submission<'a>, JudgeError> {
        if !self.has_remaining_rounds() {
            return Err(JudgeError(format!(
                "all {} rounds have been played",
                self.max_rounds
            )));
        }
        if let Some(dictionary) = &self.dictionary {
            if !dictionary.contains(word) {
                return Ok(Submission::Rejected);
            }
        }
        let result = get_result_for_guess(&self.objective, word)
            .map_err(|err| JudgeError(err.to_string()))?;
        self.rounds_played += 1;
        Ok(Submission::Accepted(result))
    }

    fn has_remaining_rounds(&self) -> bool {
        self.rounds_played < self.max_rounds
    }
}
