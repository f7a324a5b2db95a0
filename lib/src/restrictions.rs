use crate::results::GuessResult;
use crate::results::LetterResult;
use crate::results::WordleError;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::zip;
use std::result::Result;

/// The number of letters in every word.
pub const WORD_LENGTH: usize = 5;

/// The letters that words may be made of.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

const ALL_POSITIONS: [usize; WORD_LENGTH] = [0, 1, 2, 3, 4];

/// Returns the 0-based index of the letter in [`ALPHABET`], if it is part of it.
pub fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some(letter as usize - 'a' as usize)
    } else {
        None
    }
}

/// A set of letters from [`ALPHABET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterSet(u32);

impl LetterSet {
    const ALL: u32 = (1 << 26) - 1;

    /// A set with every letter of the alphabet.
    pub fn full() -> LetterSet {
        LetterSet(LetterSet::ALL)
    }

    /// A set with no letters.
    pub fn empty() -> LetterSet {
        LetterSet(0)
    }

    /// A set with only the given letter. Letters outside the alphabet give an empty set.
    pub fn single(letter: char) -> LetterSet {
        letter_index(letter).map_or(LetterSet(0), |index| LetterSet(1 << index))
    }

    pub fn contains(&self, letter: char) -> bool {
        letter_index(letter).map_or(false, |index| self.0 & (1 << index) != 0)
    }

    /// Removes the letter, returning whether it was in the set.
    pub fn remove(&mut self, letter: char) -> bool {
        let removed = self.contains(letter);
        self.0 &= !LetterSet::single(letter).0;
        removed
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        self.0 == LetterSet::ALL
    }

    pub fn is_subset(&self, other: &LetterSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterates over the letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        ALPHABET.chars().filter(|letter| self.contains(*letter))
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(letters: I) -> Self {
        LetterSet(
            letters
                .into_iter()
                .fold(0, |bits, letter| bits | LetterSet::single(letter).0),
        )
    }
}

/// What is known about the letter at one location in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionState {
    /// The letter here is known.
    Fixed(char),
    /// The letter here must be one of these.
    Open(LetterSet),
}

impl PositionState {
    /// The letters still possible at this position.
    pub fn allowed(&self) -> LetterSet {
        match self {
            PositionState::Fixed(letter) => LetterSet::single(*letter),
            PositionState::Open(allowed) => *allowed,
        }
    }
}

/// What is known about how often a letter appears in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterCount {
    /// The minimum number of times this letter must appear in the word.
    pub min_count: u8,
    /// Set once the letter is no longer possible at any location.
    pub known_absent_globally: bool,
}

/// The positional part of a [`ConstraintTracker`]: the letters each location may hold.
///
/// This is a cheap pre-filter; it does not check letter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    positions: [LetterSet; WORD_LENGTH],
}

impl Pattern {
    /// The letters allowed at the given location.
    pub fn allowed(&self, index: usize) -> Option<LetterSet> {
        self.positions.get(index).copied()
    }

    /// Returns `true` iff the word has an allowed letter at every location.
    pub fn is_match(&self, word: &str) -> bool {
        let mut letters = word.chars();
        for allowed in &self.positions {
            match letters.next() {
                Some(letter) if allowed.contains(letter) => {}
                _ => return false,
            }
        }
        letters.next().is_none()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for allowed in &self.positions {
            if allowed.is_full() {
                write!(f, ".")?;
            } else if allowed.len() == 1 {
                write!(f, "{}", allowed.iter().collect::<String>())?;
            } else {
                write!(f, "[{}]", allowed.iter().collect::<String>())?;
            }
        }
        Ok(())
    }
}

/// Tracks everything learned about the objective word from the feedback given so far.
///
/// Knowledge only ever narrows: a position's allowed letters never grow back, and a fixed
/// position stays fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintTracker {
    positions: [PositionState; WORD_LENGTH],
    letter_counts: [LetterCount; 26],
}

impl Default for ConstraintTracker {
    fn default() -> Self {
        ConstraintTracker::new()
    }
}

impl ConstraintTracker {
    /// Creates a tracker that knows nothing about the word.
    pub fn new() -> ConstraintTracker {
        ConstraintTracker {
            positions: [PositionState::Open(LetterSet::full()); WORD_LENGTH],
            letter_counts: [LetterCount::default(); 26],
        }
    }

    /// Returns what is known about the given location.
    pub fn position(&self, index: usize) -> Option<PositionState> {
        self.positions.get(index).copied()
    }

    /// Returns what is known about how often the letter appears.
    pub fn letter_count(&self, letter: char) -> Option<LetterCount> {
        letter_index(letter).map(|index| self.letter_counts[index])
    }

    /// Returns `true` iff the letter is known to be in the word.
    pub fn has_letter(&self, letter: char) -> bool {
        self.letter_count(letter)
            .map_or(false, |count| count.min_count > 0)
    }

    /// Records that the letter is at each of the given locations.
    ///
    /// Nothing changes if any location is invalid or already known to hold something else.
    pub fn record_correct(&mut self, letter: char, positions: &[usize]) -> Result<(), WordleError> {
        let index = ConstraintTracker::index_for(letter)?;
        let positions = distinct_positions(positions)?;
        for &position in &positions {
            match self.positions[position] {
                PositionState::Fixed(existing) if existing == letter => {}
                PositionState::Open(allowed) if allowed.contains(letter) => {}
                _ => return Err(WordleError::ConstraintConflict { letter, position }),
            }
        }
        for &position in &positions {
            self.positions[position] = PositionState::Fixed(letter);
        }
        self.bump_min_count(index, positions.len());
        Ok(())
    }

    /// Records that the letter is in the word, but not at any of the given locations.
    ///
    /// Nothing changes if any location is invalid or conflicts with what is already known.
    pub fn record_misplaced(
        &mut self,
        letter: char,
        positions: &[usize],
    ) -> Result<(), WordleError> {
        let index = ConstraintTracker::index_for(letter)?;
        let positions = distinct_positions(positions)?;
        if let Some(&position) = positions.first() {
            if self.letter_counts[index].known_absent_globally {
                return Err(WordleError::ConstraintConflict { letter, position });
            }
        }
        for &position in &positions {
            if self.positions[position] == PositionState::Fixed(letter) {
                return Err(WordleError::ConstraintConflict { letter, position });
            }
        }
        for &position in &positions {
            if let PositionState::Open(allowed) = &mut self.positions[position] {
                allowed.remove(letter);
            }
        }
        self.bump_min_count(index, positions.len());
        Ok(())
    }

    /// Records that the letter is not at any of the given locations.
    ///
    /// Fixed locations are left alone. The letter's minimum count is then lowered by the number
    /// of locations given. This is an approximation for guesses that repeat a letter: it can
    /// forget a known minimum, but never rules out the objective word.
    pub fn record_absent(&mut self, letter: char, positions: &[usize]) -> Result<(), WordleError> {
        let index = ConstraintTracker::index_for(letter)?;
        let positions = distinct_positions(positions)?;
        for &position in &positions {
            if let PositionState::Open(allowed) = &mut self.positions[position] {
                allowed.remove(letter);
            }
        }
        let num_positions = u8::try_from(positions.len()).unwrap_or(u8::MAX);
        let count = &mut self.letter_counts[index];
        count.min_count = count.min_count.saturating_sub(num_positions);
        self.refresh_absence(letter, index);
        Ok(())
    }

    /// Applies the feedback for one guess.
    ///
    /// Letters are grouped by result, then applied as correct, then misplaced, then absent. A
    /// letter that was only ever marked absent in this guess is removed from every location;
    /// otherwise it is only removed from the locations where it was marked absent.
    ///
    /// The feedback is applied in full or not at all.
    pub fn update(&mut self, guess_result: &GuessResult) -> Result<(), WordleError> {
        if guess_result.guess.chars().count() != WORD_LENGTH
            || guess_result.results.len() != WORD_LENGTH
        {
            return Err(WordleError::InvalidFeedback(format!(
                "expected {WORD_LENGTH} results for \"{}\", got {}",
                guess_result.guess,
                guess_result.results.len()
            )));
        }
        let mut correct: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        let mut misplaced: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        let mut absent: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for ((index, letter), result) in zip(
            guess_result.guess.chars().enumerate(),
            guess_result.results.iter(),
        ) {
            let group = match result {
                LetterResult::Correct => &mut correct,
                LetterResult::PresentNotHere => &mut misplaced,
                LetterResult::NotPresent => &mut absent,
            };
            group.entry(letter).or_default().push(index);
        }

        let mut updated = self.clone();
        for (letter, positions) in &correct {
            updated.record_correct(*letter, positions)?;
        }
        for (letter, positions) in &misplaced {
            updated.record_misplaced(*letter, positions)?;
        }
        for (letter, positions) in &absent {
            if correct.contains_key(letter) || misplaced.contains_key(letter) {
                updated.record_absent(*letter, positions)?;
            } else {
                updated.record_absent(*letter, &ALL_POSITIONS)?;
            }
        }
        *self = updated;
        Ok(())
    }

    /// Builds the per-location letters allowed by the current knowledge.
    pub fn build_pattern(&self) -> Pattern {
        Pattern {
            positions: self.positions.map(|state| state.allowed()),
        }
    }

    /// Returns `true` iff the word contains every letter at least as often as is known to be
    /// required.
    pub fn satisfies_counts(&self, word: &str) -> bool {
        zip(ALPHABET.chars(), self.letter_counts.iter())
            .filter(|(_, count)| count.min_count > 0)
            .all(|(letter, count)| {
                word.chars().filter(|other| *other == letter).count() >= count.min_count as usize
            })
    }

    /// Returns `true` iff the given word is consistent with everything learned so far.
    pub fn matches(&self, word: &str) -> bool {
        self.build_pattern().is_match(word) && self.satisfies_counts(word)
    }

    fn index_for(letter: char) -> Result<usize, WordleError> {
        letter_index(letter).ok_or_else(|| {
            WordleError::InvalidFeedback(format!("'{letter}' is not a lowercase ASCII letter"))
        })
    }

    fn bump_min_count(&mut self, index: usize, num_positions: usize) {
        let num_positions = u8::try_from(num_positions).unwrap_or(u8::MAX);
        let count = &mut self.letter_counts[index];
        if num_positions > count.min_count {
            count.min_count = num_positions;
        }
    }

    fn refresh_absence(&mut self, letter: char, index: usize) {
        let possible_somewhere = self
            .positions
            .iter()
            .any(|state| state.allowed().contains(letter));
        self.letter_counts[index].known_absent_globally = !possible_somewhere;
    }
}

/// Checks that every location is inside the word, and drops repeated locations.
fn distinct_positions(positions: &[usize]) -> Result<Vec<usize>, WordleError> {
    let mut distinct = Vec::with_capacity(WORD_LENGTH);
    for &position in positions {
        if position >= WORD_LENGTH {
            return Err(WordleError::InvalidFeedback(format!(
                "position {position} is outside a {WORD_LENGTH}-letter word"
            )));
        }
        if !distinct.contains(&position) {
            distinct.push(position);
        }
    }
    Ok(distinct)
}
