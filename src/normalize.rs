//! Sanitizing of word records, both for what comes off disk and for what gets
//! inserted.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use tracing::{debug, trace};

use crate::records::{RawWordRecord, WordKey, WordRecord};

static LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("hard-coded regex should be valid"));

/// Whether `s`, once trimmed, is one or more ASCII letters.
pub fn is_letters(s: &str) -> bool {
    LETTERS.is_match(s.trim())
}

/// Stored form of a category or word.
pub fn key_part(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// Stored form of a whole record: category and word trimmed and lower-cased,
/// hint trimmed.
pub fn normalize(record: WordRecord) -> WordRecord {
    WordRecord {
        category: key_part(&record.category),
        word: key_part(&record.word),
        hint: record.hint.trim().to_owned(),
    }
}

/// Checks a record read from disk. `None` if any field is missing or the
/// category or word is not letters-only.
pub fn validate(raw: RawWordRecord) -> Option<WordRecord> {
    let RawWordRecord {
        category: Some(category),
        word: Some(word),
        hint: Some(hint),
    } = raw
    else {
        trace!("record has a missing field");
        return None;
    };

    if !is_letters(&category) || !is_letters(&word) {
        trace!(category, word, "record is not letters-only");
        return None;
    }

    Some(normalize(WordRecord {
        category,
        word,
        hint,
    }))
}

/// Load-time cleanup: drops null and invalid records, normalizes the rest and
/// keeps only the first record for each key, preserving order.
pub fn sanitize(raw: impl IntoIterator<Item = Option<RawWordRecord>>) -> Vec<WordRecord> {
    let mut seen = HashSet::<WordKey>::new();
    let mut words = Vec::new();
    let mut discarded = 0usize;

    for record in raw {
        match record.and_then(validate) {
            Some(record) if seen.insert(record.key()) => words.push(record),
            _ => discarded += 1,
        }
    }

    debug!(kept = words.len(), discarded, "sanitized word records");

    words
}
