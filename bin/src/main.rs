use clap::{Parser, Subcommand};
use log::{info, warn};
use rs_wordle_autoplay::*;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Plays five-letter word-guessing puzzles, where the computer guesses the word.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the list of possible words. Either one word on each line, or a JSON array of
    /// words if the file name ends in `.json`.
    #[clap(short = 'f', long)]
    words_file: PathBuf,

    /// The number of guesses allowed in each game.
    #[clap(short = 'r', long, default_value_t = SimulatedJudge::DEFAULT_MAX_ROUNDS)]
    max_rounds: u32,

    /// Where to save the corpus, as JSON, if any words are not accepted as guesses. Defaults to
    /// the words file when it is JSON.
    #[clap(short = 's', long)]
    save_to: Option<PathBuf>,

    /// Log every round.
    #[clap(short = 'v', long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single game with the given word.
    Single { word: String },
    /// Run a single game with a word chosen at random from the words file.
    Random,
    /// Run an interactive game, where you enter the feedback for each guess.
    Interactive,
    /// Benchmark the solver against every word in the given words file.
    Benchmark,
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let args = Args::parse();
    init_logging(args.verbose);
    info!("Reading words from {}", args.words_file.display());

    let corpus = load_corpus(&args.words_file)?;
    println!("There are {} possible words.", corpus.len());
    let mut store = corpus_store(&args);

    match &args.command {
        Command::Single { word } => {
            let word = normalize_word(word).ok_or_else(|| {
                format!("\"{}\" is not a {}-letter word", word, WORD_LENGTH)
            })?;
            let mut judge = SimulatedJudge::new(&word).with_max_rounds(args.max_rounds);
            let report = play_session(corpus, &mut judge, &mut store)?;
            print_report(&word, &report);
        }
        Command::Random => {
            let word = corpus
                .choose_random(&mut rand::thread_rng())
                .ok_or("the words file has no usable words")?;
            let mut judge = SimulatedJudge::new(&word).with_max_rounds(args.max_rounds);
            let report = play_session(corpus, &mut judge, &mut store)?;
            print_report(&word, &report);
        }
        Command::Interactive => play_interactive_game(corpus, args.max_rounds, &mut store)?,
        Command::Benchmark => run_benchmark(&corpus)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |extension| extension == "json")
}

fn load_corpus(path: &Path) -> Result<Corpus, Box<dyn Error>> {
    if is_json(path) {
        return Ok(JsonCorpusStore::new(path).load()?);
    }
    let reader = io::BufReader::new(File::open(path)?);
    Ok(Corpus::from_reader(reader)?)
}

/// Saves to `--save-to`, or back to the words file when it is JSON. Otherwise nothing is saved.
enum SessionStore {
    Json(JsonCorpusStore),
    Discard,
}

fn corpus_store(args: &Args) -> SessionStore {
    match &args.save_to {
        Some(path) => SessionStore::Json(JsonCorpusStore::new(path)),
        None if is_json(&args.words_file) => {
            SessionStore::Json(JsonCorpusStore::new(&args.words_file))
        }
        None => SessionStore::Discard,
    }
}

impl CorpusStore for SessionStore {
    fn load(&self) -> Result<Corpus, WordleError> {
        match self {
            SessionStore::Json(store) => store.load(),
            SessionStore::Discard => Err(WordleError::Persistence(
                "no place to load the corpus from".to_string(),
            )),
        }
    }

    fn save(&mut self, words: &[Arc<str>]) -> Result<(), WordleError> {
        match self {
            SessionStore::Json(store) => store.save(words),
            SessionStore::Discard => {
                warn!("Pass --save-to to keep the pruned corpus of {} words", words.len());
                Ok(())
            }
        }
    }
}

fn print_report(word: &str, report: &SessionReport) {
    match &report.result {
        GameResult::Success(guesses) => {
            println!("GOT IT! It was {}. It took {} guesses.", word, guesses.len());
        }
        GameResult::Failure(_) => println!("Rats! Couldn't guess it!"),
    }
    for guess in report.result.guesses() {
        println!("\t{}", guess);
    }
    if !report.rejected.is_empty() {
        println!(
            "{} words were not accepted and were removed: {:?}",
            report.rejected.len(),
            report.rejected
        );
    }
}

fn run_benchmark(corpus: &Corpus) -> Result<(), WordleError> {
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut failures: Vec<&str> = Vec::new();
    for word in corpus.iter() {
        match play_game(word, 128, corpus.clone())? {
            GameResult::Success(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            GameResult::Failure(_) => failures.push(word),
        }
    }
    println!("Solved {} words. Results:", num_guesses_per_game.len());
    if !failures.is_empty() {
        println!("Could not solve: {:?}", failures);
    }
    if num_guesses_per_game.is_empty() {
        return Ok(());
    }

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds = num_games_per_round.keys().copied().collect::<Vec<u32>>();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!("|{}|{}|", num_round, num_games_per_round[num_round]);
    }

    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
    Ok(())
}

/// Asks the person at the keyboard how each guess did.
struct InteractiveJudge<R> {
    input: R,
    max_rounds: u32,
    rounds_played: u32,
}

impl<R: BufRead> Judge for InteractiveJudge<R> {
    fn submit<'a>(&mut self, word: &'a str) -> Result<Submission<'a>, JudgeError> {
        println!("I'm guessing: {}. How did I do?", word);
        loop {
            let mut buffer = String::new();
            let num_read = self
                .input
                .read_line(&mut buffer)
                .map_err(|err| JudgeError(err.to_string()))?;
            if num_read == 0 {
                return Err(JudgeError("no more input".to_string()));
            }
            let input = buffer.trim();
            if input == "-" {
                return Ok(Submission::Rejected);
            }
            match GuessResult::parse(word, input) {
                Ok(result) => {
                    self.rounds_played += 1;
                    return Ok(Submission::Accepted(result));
                }
                Err(err) => println!("{}. Try again.", err),
            }
        }
    }

    fn has_remaining_rounds(&self) -> bool {
        self.rounds_played < self.max_rounds
    }
}

fn play_interactive_game(
    corpus: Corpus,
    max_rounds: u32,
    store: &mut SessionStore,
) -> Result<(), Box<dyn Error>> {
    println!("Choose a word from the word-list. Press enter once you've chosen.");
    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }

    println!(
        "I will now try to guess your word.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\"\n\
         Enter '-' if the guess is not an accepted word."
    );

    let mut judge = InteractiveJudge {
        input: io::stdin().lock(),
        max_rounds,
        rounds_played: 0,
    };
    let report = play_session(corpus, &mut judge, store)?;
    match &report.result {
        GameResult::Success(guesses) => {
            let word = guesses.last().map_or("", |guess| guess.as_ref());
            print_report(word, &report);
        }
        GameResult::Failure(_) => print_report("", &report),
    }
    Ok(())
}
