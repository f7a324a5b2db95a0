use crate::restrictions::letter_index;
use crate::restrictions::LetterSet;
use crate::restrictions::ALPHABET;
use rayon::prelude::*;
use std::iter::zip;
use std::sync::Arc;

/// Gives words a score, where the maximum score indicates the best guess.
pub trait WordScorer {
    /// Determines a score for the given word. The higher the score, the better the guess.
    fn score_word(&self, word: &str) -> u64;
}

/// How many times each letter occurs across a list of words, counting repeats within a word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterFrequencies {
    counts: [u32; 26],
}

impl LetterFrequencies {
    /// Returns the number of occurrences of the letter, or 0 for letters outside the alphabet.
    pub fn get(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |index| self.counts[index])
    }

    /// Iterates over every letter that occurred at least once, with its count.
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        zip(ALPHABET.chars(), self.counts.iter().copied()).filter(|(_, count)| *count > 0)
    }
}

/// Counts every letter occurrence across every word.
pub fn letter_frequencies<S>(words: &[S]) -> LetterFrequencies
where
    S: AsRef<str>,
{
    let mut frequencies = LetterFrequencies::default();
    for word in words {
        for letter in word.as_ref().chars() {
            if let Some(index) = letter_index(letter) {
                frequencies.counts[index] += 1;
            }
        }
    }
    frequencies
}

/// Sums the frequency of every letter in the word, then multiplies by the number of distinct
/// letters, so words that repeat letters score lower.
///
/// ```
/// use rs_wordle_autoplay::scorers::{letter_frequencies, score};
///
/// let frequencies = letter_frequencies(&["train", "crane", "slate"]);
///
/// assert_eq!(score("slate", &frequencies), (1 + 1 + 3 + 2 + 2) * 5);
/// ```
pub fn score(word: &str, frequencies: &LetterFrequencies) -> u64 {
    let sum: u64 = word
        .chars()
        .map(|letter| frequencies.get(letter) as u64)
        .sum();
    let num_distinct = word.chars().collect::<LetterSet>().len() as u64;
    sum * num_distinct
}

/// Scores words by how common their letters are in the corpus they were built from.
#[derive(Debug, Clone)]
pub struct LetterFrequencyScorer {
    frequencies: LetterFrequencies,
}

impl LetterFrequencyScorer {
    /// Constructs a `LetterFrequencyScorer` from the letter frequencies of the given words.
    ///
    /// ```
    /// use rs_wordle_autoplay::scorers::{LetterFrequencyScorer, WordScorer};
    ///
    /// let scorer = LetterFrequencyScorer::new(&["train", "crane", "slate"]);
    ///
    /// assert_eq!(scorer.score_word("train"), 50);
    /// ```
    pub fn new<S>(words: &[S]) -> LetterFrequencyScorer
    where
        S: AsRef<str>,
    {
        LetterFrequencyScorer {
            frequencies: letter_frequencies(words),
        }
    }

    pub fn frequencies(&self) -> &LetterFrequencies {
        &self.frequencies
    }
}

impl WordScorer for LetterFrequencyScorer {
    fn score_word(&self, word: &str) -> u64 {
        score(word, &self.frequencies)
    }
}

/// A word along with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCandidate {
    pub word: Arc<str>,
    pub score: u64,
}

/// Orders the words from highest to lowest score.
///
/// Words with equal scores keep their order from `words`, so the ranking is reproducible.
pub fn rank<S>(scorer: &S, words: &[Arc<str>]) -> Vec<ScoredCandidate>
where
    S: WordScorer + Sync,
{
    let mut scored: Vec<ScoredCandidate> = words
        .par_iter()
        .map(|word| ScoredCandidate {
            word: Arc::clone(word),
            score: scorer.score_word(word),
        })
        .collect();
    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    #[test]
    fn letter_frequencies_counts_repeats() {
        let frequencies = letter_frequencies(&["geese", "eerie"]);

        assert_eq!(frequencies.get('e'), 6);
        assert_eq!(frequencies.get('g'), 1);
        assert_eq!(frequencies.get('r'), 1);
        assert_eq!(frequencies.get('z'), 0);
        assert_eq!(frequencies.get('?'), 0);
        assert_eq!(
            frequencies.iter().collect::<Vec<_>>(),
            vec![('e', 6), ('g', 1), ('i', 1), ('r', 1), ('s', 1)]
        );
    }

    #[test]
    fn letter_frequencies_scenario() {
        let frequencies = letter_frequencies(&["train", "crane", "slate"]);

        for (letter, count) in [
            ('t', 2),
            ('r', 2),
            ('a', 3),
            ('i', 1),
            ('n', 2),
            ('c', 1),
            ('e', 2),
            ('s', 1),
            ('l', 1),
        ] {
            assert_eq!(frequencies.get(letter), count, "count for {letter}");
        }
    }

    #[test]
    fn score_penalizes_repeated_letters() {
        let frequencies = letter_frequencies(&["geese", "eerie"]);

        // 1 + 6 + 6 + 1 + 6, with 3 distinct letters.
        assert_eq!(score("geese", &frequencies), 20 * 3);
        assert_eq!(score("", &frequencies), 0);
    }

    #[test]
    fn rank_breaks_ties_by_corpus_order() {
        let words = arc_words(&["train", "crane", "slate"]);
        let scorer = LetterFrequencyScorer::new(&words);

        let ranked = rank(&scorer, &words);

        assert_eq!(
            ranked,
            vec![
                ScoredCandidate {
                    word: Arc::from("train"),
                    score: 50
                },
                ScoredCandidate {
                    word: Arc::from("crane"),
                    score: 50
                },
                ScoredCandidate {
                    word: Arc::from("slate"),
                    score: 45
                },
            ]
        );

        let reversed = arc_words(&["crane", "train", "slate"]);
        let ranked: Vec<Arc<str>> = rank(&scorer, &reversed)
            .into_iter()
            .map(|candidate| candidate.word)
            .collect();
        assert_eq!(ranked, arc_words(&["crane", "train", "slate"]));
    }

    #[test]
    fn rank_empty() {
        let scorer = LetterFrequencyScorer::new::<&str>(&[]);

        assert!(rank(&scorer, &[]).is_empty());
    }
}
