use tracing::{info, warn};

use crate::{codec::Codec, records::WordRecord, words::WordStore};

/// The catalog a fresh install starts with.
pub const DEFAULT_WORDS: [(&str, &str, &str); 10] = [
    ("animals", "lion", "King of the jungle"),
    ("animals", "tiger", "Striped big cat"),
    ("colors", "blue", "Sky color"),
    ("colors", "green", "Grass color"),
    ("fruits", "apple", "Keeps the doctor away"),
    ("fruits", "banana", "Yellow and sweet"),
    ("body", "heart", "Pumps blood"),
    ("body", "brain", "Controls thoughts"),
    ("countries", "japan", "Land of the rising sun"),
    ("countries", "egypt", "Home of the pyramids"),
];

pub fn default_words() -> impl Iterator<Item = WordRecord> {
    DEFAULT_WORDS
        .into_iter()
        .map(|(category, word, hint)| WordRecord::new(category, word, hint))
}

/// Adds every default word the store does not already have. Returns how many
/// were added.
pub fn seed<C: Codec>(store: &WordStore<C>) -> usize {
    let mut added = 0;

    for record in default_words() {
        match store.add_word(record) {
            Ok(()) => added += 1,
            Err(err) => {
                warn!(category = %err.category, word = %err.word, "already present, skipping")
            }
        }
    }

    info!(added, "seeded default words");

    added
}
