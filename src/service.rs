//! The surface a request layer talks to: request validation, then the stores.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    codec::{Codec, JsonFile},
    error::{Error, Result, ValidationError},
    normalize,
    records::{ScoreRecord, WordRecord},
    scores::{ScoreOutcome, ScoreStore},
    words::WordStore,
};

/// Leaderboard length when none is configured.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// A word as submitted by a client, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewWord {
    pub category: Option<String>,
    pub word: Option<String>,
    pub hint: Option<String>,
}

impl NewWord {
    pub fn new(
        category: impl Into<String>,
        word: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            category: Some(category.into()),
            word: Some(word.into()),
            hint: Some(hint.into()),
        }
    }

    pub fn validate(self) -> Result<WordRecord, ValidationError> {
        let (Some(category), Some(word), Some(hint)) = (self.category, self.word, self.hint)
        else {
            return Err(ValidationError::MissingFields);
        };

        if !normalize::is_letters(&category) || !normalize::is_letters(&word) {
            return Err(ValidationError::NotLetters);
        }

        Ok(WordRecord::new(category, word, hint))
    }
}

/// A finished round as submitted by a client.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub nickname: Option<String>,
    pub score: Option<i32>,
    pub time: Option<u32>,
    pub attempts: Option<u32>,
    #[serde(default)]
    pub used_hint: bool,
}

impl NewScore {
    pub fn validate(self) -> Result<ScoreRecord, ValidationError> {
        let (Some(nickname), Some(score), Some(time), Some(attempts)) =
            (self.nickname, self.score, self.time, self.attempts)
        else {
            return Err(ValidationError::MissingFields);
        };

        if nickname.trim().is_empty() {
            return Err(ValidationError::BlankNickname);
        }

        Ok(ScoreRecord::new(nickname, score, time, attempts, self.used_hint))
    }
}

#[derive(Debug)]
pub struct WordService<C = JsonFile> {
    store: Arc<WordStore<C>>,
}

impl<C> Clone for WordService<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<C: Codec> WordService<C> {
    pub fn new(store: Arc<WordStore<C>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &WordStore<C> {
        &self.store
    }

    pub fn all_words(&self) -> Vec<WordRecord> {
        self.store.all_words()
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    pub fn random_word(&self, category: &str) -> Result<WordRecord> {
        self.store
            .random_word_by_category(category)
            .ok_or_else(|| Error::no_words(category))
    }

    #[instrument(skip_all)]
    pub fn add_word(&self, request: NewWord) -> Result<()> {
        let entry = request.validate()?;
        self.store.add_word(entry)?;
        Ok(())
    }

    pub fn delete_word(&self, category: &str, word: &str) -> usize {
        self.store.delete_word(category, word)
    }
}

#[derive(Debug)]
pub struct ScoreService<C = JsonFile> {
    store: Arc<ScoreStore<C>>,
    leaderboard_size: usize,
}

impl<C> Clone for ScoreService<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            leaderboard_size: self.leaderboard_size,
        }
    }
}

impl<C: Codec> ScoreService<C> {
    pub fn new(store: Arc<ScoreStore<C>>) -> Self {
        Self::with_leaderboard_size(store, DEFAULT_LEADERBOARD_SIZE)
    }

    pub fn with_leaderboard_size(store: Arc<ScoreStore<C>>, leaderboard_size: usize) -> Self {
        Self {
            store,
            leaderboard_size,
        }
    }

    #[instrument(skip_all)]
    pub fn add_score(&self, request: NewScore) -> Result<ScoreOutcome> {
        let entry = request.validate()?;
        Ok(self.store.add_score(entry))
    }

    pub fn leaderboard(&self) -> Vec<ScoreRecord> {
        debug!(size = self.leaderboard_size, "fetching leaderboard");
        self.store.top_scores(self.leaderboard_size)
    }

    pub fn top_scores(&self, limit: usize) -> Vec<ScoreRecord> {
        self.store.top_scores(limit)
    }

    pub fn all_scores(&self) -> Vec<ScoreRecord> {
        self.store.all_scores()
    }
}
