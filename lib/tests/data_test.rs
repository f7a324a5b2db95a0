use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rs_wordle_autoplay::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rs-wordle-autoplay-{}-{name}.json",
        std::process::id()
    ))
}

#[test]
fn json_store_round_trip() -> Result<(), WordleError> {
    let path = temp_path("round-trip");
    let mut store = JsonCorpusStore::new(&path);
    let corpus = Corpus::from_iterator(["crane", "slate", "those"]);

    store.save(&corpus)?;

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"["crane","slate","those"]"#
    );
    assert_eq!(store.load()?, corpus);
    fs::remove_file(&path).unwrap();
    Ok(())
}

#[test]
fn json_store_overwrites() -> Result<(), WordleError> {
    let path = temp_path("overwrite");
    let mut store = JsonCorpusStore::new(&path);

    store.save(&[Arc::from("crane"), Arc::from("slate")])?;
    store.save(&[Arc::from("those")])?;

    assert_eq!(store.load()?.words(), &[Arc::<str>::from("those")]);
    fs::remove_file(&path).unwrap();
    Ok(())
}

#[test]
fn json_store_load_skips_invalid_words() -> Result<(), WordleError> {
    let path = temp_path("invalid-words");
    fs::write(&path, r#"["crane", "toolong", "SLATE", "a b c"]"#).unwrap();
    let store = JsonCorpusStore::new(&path);

    assert_eq!(store.load()?, Corpus::from_iterator(["crane", "slate"]));
    fs::remove_file(&path).unwrap();
    Ok(())
}

#[test]
fn json_store_missing_file_errors() {
    let store = JsonCorpusStore::new(temp_path("missing"));

    assert!(matches!(store.load(), Err(WordleError::Persistence(_))));
}

#[test]
fn json_store_malformed_file_errors() {
    let path = temp_path("malformed");
    fs::write(&path, "crane\nslate\n").unwrap();
    let store = JsonCorpusStore::new(&path);

    assert!(matches!(store.load(), Err(WordleError::Persistence(_))));
    fs::remove_file(&path).unwrap();
}
