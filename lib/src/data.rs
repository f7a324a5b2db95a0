use crate::restrictions::WORD_LENGTH;
use crate::results::WordleError;
use log::debug;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Result;
use std::io::Write;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Returns `true` iff the word is exactly [`WORD_LENGTH`] lowercase ASCII letters.
pub fn is_candidate_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|letter| letter.is_ascii_lowercase())
}

/// Trims and lowercases the word, returning it only if it is then a candidate word.
///
/// ```
/// use rs_wordle_autoplay::normalize_word;
///
/// assert_eq!(normalize_word(" SPADE\n").as_deref(), Some("spade"));
/// assert_eq!(normalize_word("spades"), None);
/// ```
pub fn normalize_word(word: &str) -> Option<Arc<str>> {
    let word = word.trim().to_lowercase();
    if is_candidate_word(&word) {
        Some(Arc::from(word.as_str()))
    } else {
        None
    }
}

/// The ordered list of words a game may be played with.
///
/// The order matters: it decides between words that score the same. Words can be removed, but
/// never added, once a game is underway.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<Arc<str>>,
}

impl Corpus {
    /// Constructs a new `Corpus` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case; anything that is not then [`WORD_LENGTH`] ASCII letters is skipped.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self> {
        let lines = word_reader.lines().collect::<Result<Vec<String>>>()?;
        let corpus = Corpus::from_iterator(&lines);
        debug!(
            "Read {} words, skipped {} other lines",
            corpus.len(),
            lines.len() - corpus.len()
        );
        Ok(corpus)
    }

    /// Constructs a new `Corpus` using the words from the given iterator, normalized the same
    /// way as [`Corpus::from_reader`].
    ///
    /// ```
    /// use rs_wordle_autoplay::Corpus;
    ///
    /// let corpus = Corpus::from_iterator(["Crane", "toolong", "slate"]);
    ///
    /// assert_eq!(corpus.len(), 2);
    /// ```
    pub fn from_iterator<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Corpus {
            words: words
                .into_iter()
                .filter_map(|word| normalize_word(word.as_ref()))
                .collect(),
        }
    }

    /// Returns the words in the order they were read.
    pub fn words(&self) -> &[Arc<str>] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|other| other.as_ref() == word)
    }

    /// Removes every copy of the word, keeping the order of the rest. Returns whether the word
    /// was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|other| other.as_ref() != word);
        self.words.len() != before
    }

    /// Picks a word uniformly at random.
    pub fn choose_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<str>> {
        self.words.choose(rng).map(Arc::clone)
    }
}

impl Deref for Corpus {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

/// Loads and saves the corpus between sessions.
pub trait CorpusStore {
    fn load(&self) -> std::result::Result<Corpus, WordleError>;

    /// Replaces the stored corpus with the given words.
    fn save(&mut self, words: &[Arc<str>]) -> std::result::Result<(), WordleError>;
}

/// Stores the corpus as a JSON array of strings.
#[derive(Clone, Debug)]
pub struct JsonCorpusStore {
    path: PathBuf,
}

impl JsonCorpusStore {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonCorpusStore {
        JsonCorpusStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, err: impl std::fmt::Display) -> WordleError {
        WordleError::Persistence(format!("{}: {err}", self.path.display()))
    }
}

impl CorpusStore for JsonCorpusStore {
    fn load(&self) -> std::result::Result<Corpus, WordleError> {
        let file = File::open(&self.path).map_err(|err| self.error(err))?;
        let words: Vec<String> =
            serde_json::from_reader(BufReader::new(file)).map_err(|err| self.error(err))?;
        Ok(Corpus::from_iterator(&words))
    }

    fn save(&mut self, words: &[Arc<str>]) -> std::result::Result<(), WordleError> {
        let file = File::create(&self.path).map_err(|err| self.error(err))?;
        let mut writer = BufWriter::new(file);
        let words: Vec<&str> = words.iter().map(|word| word.as_ref()).collect();
        serde_json::to_writer(&mut writer, &words).map_err(|err| self.error(err))?;
        writer.flush().map_err(|err| self.error(err))?;
        info!("Saved {} words to {}", words.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    macro_rules! assert_arc_eq {
        ($arc_slice:expr, $str_vec:expr) => {
            assert_eq!(
                $arc_slice,
                $str_vec
                    .iter()
                    .map(|word| Arc::from(*word))
                    .collect::<Vec<Arc<str>>>()
            );
        };
    }

    #[test]
    fn corpus_from_reader_filters_and_normalizes() -> Result<()> {
        let cursor = Cursor::new(String::from(
            "worda\nWORDB\n  other \n\nsmores\nab-cd\nnaïve\nabc\n",
        ));

        let corpus = Corpus::from_reader(cursor)?;

        assert_arc_eq!(corpus.words(), vec!["worda", "wordb", "other"]);
        Ok(())
    }

    #[test]
    fn corpus_remove_keeps_order() {
        let mut corpus = Corpus::from_iterator(["worda", "wordb", "other", "wordb", "smore"]);

        assert!(corpus.remove("wordb"));
        assert!(!corpus.remove("wordb"));

        assert_arc_eq!(corpus.words(), vec!["worda", "other", "smore"]);
        assert!(!corpus.contains("wordb"));
        assert!(corpus.contains("other"));
    }

    #[test]
    fn corpus_deref() {
        let corpus = Corpus::from_iterator(["worda", "wordb"]);

        assert_eq!(corpus.len(), 2);
        assert_eq!(&*corpus[1], "wordb");
        assert!(!corpus.is_empty());
    }

    #[test]
    fn corpus_choose_random() {
        let corpus = Corpus::from_iterator(["worda", "wordb", "other"]);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..10 {
            let word = corpus.choose_random(&mut rng).unwrap();
            assert!(corpus.contains(&word));
        }
        assert_eq!(Corpus::default().choose_random(&mut rng), None);
    }

    #[test]
    fn normalize_word_matches_corpus_rules() {
        assert_eq!(normalize_word("SPADE").as_deref(), Some("spade"));
        assert_eq!(normalize_word("  Spade\t").as_deref(), Some("spade"));
        assert_eq!(normalize_word("spad"), None);
        assert_eq!(normalize_word("sp4de"), None);
        assert_eq!(
            Corpus::from_iterator(["SPADE"]).words(),
            &[normalize_word("spade").unwrap()]
        );
    }

    #[test]
    fn is_candidate_word_checks_length_and_letters() {
        assert!(is_candidate_word("crane"));
        assert!(!is_candidate_word("Crane"));
        assert!(!is_candidate_word("cran"));
        assert!(!is_candidate_word("cranes"));
        assert!(!is_candidate_word("cr4ne"));
    }
}
