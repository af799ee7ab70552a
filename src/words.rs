use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::{seq::IteratorRandom, Rng};
use tracing::{info, instrument, warn};

use crate::{
    codec::{Codec, JsonFile},
    normalize,
    records::{RawWordRecord, WordRecord},
};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("This word already exists in the selected category.")]
pub struct DuplicateWordError {
    pub category: String,
    pub word: String,
}

/// The word catalog.
///
/// Loaded once from its codec, then every successful mutation rewrites the
/// whole snapshot while still holding the lock.
#[derive(Debug)]
pub struct WordStore<C = JsonFile> {
    codec: C,
    words: Mutex<Vec<WordRecord>>,
}

impl<C: Codec> WordStore<C> {
    /// Loads the snapshot, dropping anything invalid or duplicated.
    pub fn open(codec: C) -> Self {
        let raw = codec.load::<Option<RawWordRecord>>();
        let words = normalize::sanitize(raw);

        info!(path = %codec.location().display(), count = words.len(), "word store opened");

        Self {
            codec,
            words: Mutex::new(words),
        }
    }

    fn words(&self) -> MutexGuard<'_, Vec<WordRecord>> {
        self.words.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn all_words(&self) -> Vec<WordRecord> {
        self.words().clone()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<String> {
        let words = self.words();
        let mut categories: Vec<String> = Vec::new();

        for record in words.iter() {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }

        categories
    }

    pub fn random_word_by_category(&self, category: &str) -> Option<WordRecord> {
        self.random_word_by_category_with(category, &mut rand::thread_rng())
    }

    pub fn random_word_by_category_with(
        &self,
        category: &str,
        rng: &mut impl Rng,
    ) -> Option<WordRecord> {
        let category = category.trim();

        self.words()
            .iter()
            .filter(|record| record.category.eq_ignore_ascii_case(category))
            .choose(rng)
            .cloned()
    }

    /// Appends a new entry. `entry` is expected to have passed request
    /// validation already; it is normalized here before the duplicate check.
    #[instrument(skip_all, fields(category = %entry.category, word = %entry.word))]
    pub fn add_word(&self, entry: WordRecord) -> Result<(), DuplicateWordError> {
        let entry = normalize::normalize(entry);
        let mut words = self.words();

        if words.iter().any(|record| record.key() == entry.key()) {
            warn!("rejected duplicate word");
            return Err(DuplicateWordError {
                category: entry.category,
                word: entry.word,
            });
        }

        words.push(entry);
        self.codec.save(words.as_slice());
        info!(count = words.len(), "word added");

        Ok(())
    }

    /// Removes every entry matching `category` and `word`, ignoring case, and
    /// returns how many went. The snapshot is rewritten even when nothing
    /// matched.
    #[instrument(skip(self))]
    pub fn delete_word(&self, category: &str, word: &str) -> usize {
        let mut words = self.words();
        let before = words.len();

        words.retain(|record| !record.matches(category, word));
        let removed = before - words.len();

        self.codec.save(words.as_slice());
        info!(removed, count = words.len(), "word delete processed");

        removed
    }
}

impl WordStore<JsonFile> {
    pub fn open_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::open(JsonFile::new(path))
    }
}
