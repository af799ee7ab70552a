use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    codec::{Codec, JsonFile},
    records::ScoreRecord,
};

/// What [`ScoreStore::add_score`] did with the submitted entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// First score for this nickname.
    Inserted,
    /// Beat the previous best, which was dropped.
    Replaced { previous: i32 },
    /// Did not beat the previous best and was discarded.
    Kept { best: i32 },
}

/// The leaderboard. Scores are trusted as read from disk.
#[derive(Debug)]
pub struct ScoreStore<C = JsonFile> {
    codec: C,
    scores: Mutex<Vec<ScoreRecord>>,
}

impl<C: Codec> ScoreStore<C> {
    pub fn open(codec: C) -> Self {
        let scores = codec.load::<ScoreRecord>();

        info!(path = %codec.location().display(), count = scores.len(), "score store opened");

        Self {
            codec,
            scores: Mutex::new(scores),
        }
    }

    fn scores(&self) -> MutexGuard<'_, Vec<ScoreRecord>> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keeps one entry per nickname (ignoring case): the new entry goes in
    /// only if there is none yet or it scores strictly higher. A replacement
    /// moves to the end of the list. Always rewrites the snapshot.
    #[instrument(skip_all, fields(nickname = %entry.nickname, score = entry.score))]
    pub fn add_score(&self, entry: ScoreRecord) -> ScoreOutcome {
        let mut scores = self.scores();

        let existing = scores
            .iter()
            .position(|record| record.same_player(&entry.nickname));

        let outcome = match existing {
            Some(index) if entry.score > scores[index].score => {
                let previous = scores.remove(index).score;
                scores.push(entry);
                ScoreOutcome::Replaced { previous }
            }
            Some(index) => ScoreOutcome::Kept {
                best: scores[index].score,
            },
            None => {
                scores.push(entry);
                ScoreOutcome::Inserted
            }
        };

        self.codec.save(scores.as_slice());
        info!(?outcome, "score submitted");

        outcome
    }

    /// Up to `limit` entries, best first. Equal scores stay in insertion
    /// order.
    pub fn top_scores(&self, limit: usize) -> Vec<ScoreRecord> {
        let mut ranked = self.scores().clone();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);

        debug!(limit, returned = ranked.len(), "ranked scores");

        ranked
    }

    pub fn all_scores(&self) -> Vec<ScoreRecord> {
        self.scores().clone()
    }

    #[allow(dead_code)]
    pub(crate) fn clear_scores(&self) {
        let mut scores = self.scores();

        scores.clear();
        self.codec.save(scores.as_slice());
        info!("scores cleared");
    }
}

impl ScoreStore<JsonFile> {
    pub fn open_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::open(JsonFile::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::{ScoreOutcome, ScoreStore};
    use crate::{
        codec::{Codec, JsonFile},
        records::ScoreRecord,
    };
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn score(nickname: &str, score: i32) -> ScoreRecord {
        ScoreRecord::new(nickname, score, 42, 4, false)
    }

    fn seeded(scores: &[ScoreRecord]) -> (tempfile::TempDir, ScoreStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let codec = JsonFile::new(dir.path().join("scores.json"));
        codec.save(scores);
        (dir, ScoreStore::open(codec))
    }

    fn reopen(dir: &tempfile::TempDir) -> ScoreStore {
        ScoreStore::open_file(dir.path().join("scores.json"))
    }

    #[test]
    #[traced_test]
    fn lower_score_is_discarded() {
        let (dir, store) = seeded(&[score("alice", 100)]);

        assert_eq!(
            store.add_score(score("Alice", 90)),
            ScoreOutcome::Kept { best: 100 }
        );
        assert_eq!(store.all_scores(), vec![score("alice", 100)]);
        assert_eq!(reopen(&dir).all_scores(), vec![score("alice", 100)]);
    }

    #[test]
    fn equal_score_keeps_existing() {
        let (_dir, store) = seeded(&[score("alice", 100)]);

        assert_eq!(
            store.add_score(ScoreRecord::new("ALICE", 100, 1, 1, true)),
            ScoreOutcome::Kept { best: 100 }
        );
        assert_eq!(store.all_scores(), vec![score("alice", 100)]);
    }

    #[test]
    fn higher_score_replaces() {
        let (dir, store) = seeded(&[score("alice", 100), score("carol", 70)]);

        assert_eq!(
            store.add_score(score("ALICE", 150)),
            ScoreOutcome::Replaced { previous: 100 }
        );
        assert_eq!(
            store.all_scores(),
            vec![score("carol", 70), score("ALICE", 150)]
        );
        assert_eq!(reopen(&dir).all_scores(), store.all_scores());
    }

    #[test]
    fn new_player_is_appended() {
        let (dir, store) = seeded(&[score("alice", 100)]);

        assert_eq!(store.add_score(score("bob", 50)), ScoreOutcome::Inserted);
        assert_eq!(
            store.all_scores(),
            vec![score("alice", 100), score("bob", 50)]
        );
        assert_eq!(reopen(&dir).all_scores(), store.all_scores());
    }

    #[test]
    fn kept_outcome_still_writes() {
        let (dir, store) = seeded(&[score("alice", 100)]);
        let path = dir.path().join("scores.json");
        std::fs::remove_file(&path).expect("remove snapshot");

        store.add_score(score("alice", 10));

        assert!(path.exists());
        assert_eq!(reopen(&dir).all_scores(), vec![score("alice", 100)]);
    }

    #[test]
    fn top_scores_ranked() {
        let (_dir, store) = seeded(&[score("a", 10), score("b", 30), score("c", 20)]);

        assert_eq!(store.top_scores(2), vec![score("b", 30), score("c", 20)]);
        assert_eq!(
            store.top_scores(10),
            vec![score("b", 30), score("c", 20), score("a", 10)]
        );
        assert!(store.top_scores(0).is_empty());
    }

    #[test]
    fn top_scores_ties_keep_insertion_order() {
        let (_dir, store) = seeded(&[
            score("first", 50),
            score("high", 90),
            score("second", 50),
            score("third", 50),
        ]);

        assert_eq!(
            store.top_scores(4),
            vec![
                score("high", 90),
                score("first", 50),
                score("second", 50),
                score("third", 50),
            ]
        );
    }

    #[test]
    fn top_scores_does_not_reorder_store() {
        let (_dir, store) = seeded(&[score("a", 10), score("b", 30)]);

        store.top_scores(1);

        assert_eq!(store.all_scores(), vec![score("a", 10), score("b", 30)]);
    }

    #[test]
    fn loaded_duplicates_are_trusted() {
        let (_dir, store) = seeded(&[score("alice", 10), score("ALICE", 20)]);

        assert_eq!(store.all_scores().len(), 2);
    }

    #[test]
    fn clear_scores_persists() {
        let (dir, store) = seeded(&[score("alice", 100), score("bob", 50)]);

        store.clear_scores();

        assert!(store.all_scores().is_empty());
        assert!(reopen(&dir).all_scores().is_empty());
    }

    #[test]
    #[traced_test]
    fn failed_save_keeps_memory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write fixture");

        let store = ScoreStore::open_file(blocker.join("scores.json"));

        assert_eq!(store.add_score(score("alice", 100)), ScoreOutcome::Inserted);
        assert_eq!(
            store.add_score(score("Alice", 150)),
            ScoreOutcome::Replaced { previous: 100 }
        );
        assert_eq!(store.all_scores(), vec![score("Alice", 150)]);
        assert!(logs_contain("snapshot could not be saved"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ScoreStore::open_file(dir.path().join("never-written.json"));

        assert!(store.all_scores().is_empty());
        assert!(store.top_scores(10).is_empty());
    }
}
