use std::sync::Arc;

use tracing::info;

use crate::{
    config::Config,
    scores::ScoreStore,
    service::{ScoreService, WordService},
    words::WordStore,
};

/// Everything a request handler needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AppData {
    words: WordService,
    scores: ScoreService,
}

impl AppData {
    pub fn open(config: &Config) -> Self {
        let words = Arc::new(WordStore::open_file(config.storage.words_path()));
        let scores = Arc::new(ScoreStore::open_file(config.storage.scores_path()));

        info!(data_dir = %config.storage.data_dir().display(), "stores ready");

        Self {
            words: WordService::new(words),
            scores: ScoreService::with_leaderboard_size(scores, config.leaderboard.size()),
        }
    }

    pub const fn words(&self) -> &WordService {
        &self.words
    }

    pub const fn scores(&self) -> &ScoreService {
        &self.scores
    }
}
