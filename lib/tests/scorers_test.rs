use std::sync::Arc;

use rs_wordle_autoplay::scorers::*;
use rs_wordle_autoplay::*;

fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
    words.iter().map(|word| Arc::from(*word)).collect()
}

#[test]
fn letter_frequency_scorer_scenario() {
    let corpus = Corpus::from_iterator(["train", "crane", "slate"]);
    let scorer = LetterFrequencyScorer::new(&corpus);

    assert_eq!(scorer.frequencies().get('a'), 3);
    assert_eq!(scorer.score_word("train"), (2 + 2 + 3 + 1 + 2) * 5);
    assert_eq!(scorer.score_word("crane"), (1 + 2 + 3 + 2 + 2) * 5);
    assert_eq!(scorer.score_word("slate"), (1 + 1 + 3 + 2 + 2) * 5);

    let ranked: Vec<Arc<str>> = rank(&scorer, &corpus)
        .into_iter()
        .map(|candidate| candidate.word)
        .collect();
    assert_eq!(ranked, arc_words(&["train", "crane", "slate"]));
}

#[test]
fn letter_frequency_scorer_unknown_letters_score_zero() {
    let scorer = LetterFrequencyScorer::new(&["train", "crane", "slate"]);

    assert_eq!(scorer.score_word("moody"), 0);
    // 'a' appears three times in the corpus, and twice in the word with 3 distinct letters.
    assert_eq!(scorer.score_word("gamma"), (3 + 3) * 3);
}

struct ReverseAlphabeticalScorer;

impl WordScorer for ReverseAlphabeticalScorer {
    fn score_word(&self, word: &str) -> u64 {
        word.chars().next().map_or(0, |letter| letter as u64)
    }
}

#[test]
fn rank_with_custom_scorer() {
    let words = arc_words(&["apple", "zebra", "mango", "mimic"]);

    let ranked = rank(&ReverseAlphabeticalScorer, &words);

    assert_eq!(
        ranked
            .iter()
            .map(|candidate| candidate.word.as_ref())
            .collect::<Vec<_>>(),
        vec!["zebra", "mango", "mimic", "apple"]
    );
}

#[test]
fn rank_is_deterministic() {
    let corpus = Corpus::from_iterator([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ]);
    let scorer = LetterFrequencyScorer::new(&corpus);

    let first = rank(&scorer, &corpus);
    for _ in 0..5 {
        assert_eq!(rank(&scorer, &corpus), first);
    }
    assert!(first
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}
