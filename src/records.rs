use serde::{Deserialize, Serialize};

/// A guessable word, filed under a category.
///
/// Two records are the same entry when their [`WordKey`]s match; the hint
/// does not take part in identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub category: String,
    pub word: String,
    pub hint: String,
}

impl WordRecord {
    pub fn new(
        category: impl Into<String>,
        word: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            word: word.into(),
            hint: hint.into(),
        }
    }

    pub fn key(&self) -> WordKey {
        WordKey::new(&self.category, &self.word)
    }

    /// Case-insensitive match on category and word.
    pub fn matches(&self, category: &str, word: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(category.trim())
            && self.word.trim().eq_ignore_ascii_case(word.trim())
    }
}

impl std::fmt::Display for WordRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.word)
    }
}

/// Normalized identity of a [`WordRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordKey {
    category: String,
    word: String,
}

impl WordKey {
    pub fn new(category: &str, word: &str) -> Self {
        Self {
            category: crate::normalize::key_part(category),
            word: crate::normalize::key_part(word),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

/// A word record as it comes back from disk, before it has been checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWordRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl From<WordRecord> for RawWordRecord {
    fn from(value: WordRecord) -> Self {
        Self {
            category: Some(value.category),
            word: Some(value.word),
            hint: Some(value.hint),
        }
    }
}

/// One player's result on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub nickname: String,
    pub score: i32,
    /// Seconds taken to finish the round.
    pub time: u32,
    pub attempts: u32,
    pub used_hint: bool,
}

impl ScoreRecord {
    const BASE_SCORE: i64 = 1000;
    const ATTEMPT_PENALTY: i64 = 10;
    const HINT_PENALTY: i64 = 100;

    pub fn new(
        nickname: impl Into<String>,
        score: i32,
        time: u32,
        attempts: u32,
        used_hint: bool,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            score,
            time,
            attempts,
            used_hint,
        }
    }

    /// Score a finished round the way the game client does: start from 1000,
    /// lose 10 per attempt, 100 for taking the hint and 1 per second, never
    /// going below zero.
    pub fn compute_score(time: u32, attempts: u32, used_hint: bool) -> i32 {
        let hint = if used_hint { Self::HINT_PENALTY } else { 0 };
        let penalty = i64::from(attempts) * Self::ATTEMPT_PENALTY + hint + i64::from(time);

        // bounded to 0..=1000
        (Self::BASE_SCORE - penalty).max(0) as i32
    }

    pub fn same_player(&self, nickname: &str) -> bool {
        eq_ignore_case(&self.nickname, nickname)
    }
}

/// Unicode-aware case-insensitive comparison.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::{eq_ignore_case, RawWordRecord, ScoreRecord, WordRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn key_ignores_case_and_hint() {
        let a = WordRecord::new("Animals", "LION", "King of the jungle");
        let b = WordRecord::new("animals", "lion", "something else");

        assert_eq!(a.key(), b.key());
        assert!(a.matches("ANIMALS", "Lion"));
        assert!(!a.matches("animals", "tiger"));
    }

    #[test]
    fn score_uses_camel_case_on_the_wire() {
        let record = ScoreRecord::new("alice", 870, 30, 10, true);
        let json = serde_json::to_value(&record).expect("hard-coded");

        assert_eq!(json["usedHint"], serde_json::Value::Bool(true));
        assert_eq!(json["nickname"], "alice");
    }

    #[test]
    fn raw_record_tolerates_missing_fields() {
        let raw: RawWordRecord =
            serde_json::from_str(r#"{"category": "animals", "hint": null}"#).expect("hard-coded");

        assert_eq!(
            raw,
            RawWordRecord {
                category: Some("animals".to_owned()),
                word: None,
                hint: None,
            }
        );
    }

    #[test]
    fn compute_score() {
        assert_eq!(ScoreRecord::compute_score(0, 0, false), 1000);
        assert_eq!(ScoreRecord::compute_score(30, 5, false), 920);
        assert_eq!(ScoreRecord::compute_score(30, 5, true), 820);
        assert_eq!(ScoreRecord::compute_score(5000, 3, true), 0);
    }

    #[test]
    fn case_insensitive_nicknames() {
        assert!(eq_ignore_case("alice", "ALICE"));
        assert!(eq_ignore_case("Émile", "émile"));
        assert!(!eq_ignore_case("alice", "alicia"));
    }
}
