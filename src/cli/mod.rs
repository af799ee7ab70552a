use std::path::PathBuf;

use serde_json::{json, Value};

use crate::{
    data::AppData,
    error::Result,
    records::ScoreRecord,
    seed,
    service::{NewScore, NewWord},
};

#[derive(clap::Parser, Debug)]
#[command(name = "guessword", version, about = "Word and leaderboard storage for the guessing game")]
pub struct Cli {
    /// Config file; defaults to $GUESSWORD_TOML or ./guessword.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// The word catalog
    #[command(subcommand)]
    Words(WordsCommand),

    /// The leaderboard
    #[command(subcommand)]
    Scores(ScoresCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum WordsCommand {
    List,
    Categories,
    Random {
        category: String,
    },
    Add {
        category: String,
        word: String,
        hint: String,
    },
    Delete {
        category: String,
        word: String,
    },
    /// Insert the default catalog, skipping words already present
    Seed,
}

#[derive(clap::Subcommand, Debug)]
pub enum ScoresCommand {
    Add {
        nickname: String,
        /// Computed from time, attempts and hint use when omitted
        #[arg(long)]
        score: Option<i32>,
        #[arg(long)]
        time: u32,
        #[arg(long)]
        attempts: u32,
        #[arg(long)]
        used_hint: bool,
    },
    Top {
        /// Defaults to the configured leaderboard size
        #[arg(long)]
        limit: Option<usize>,
    },
    List,
}

impl Command {
    pub fn run(self, data: &AppData) -> Result<Value> {
        match self {
            Self::Words(command) => command.run(data),
            Self::Scores(command) => command.run(data),
        }
    }
}

impl WordsCommand {
    fn run(self, data: &AppData) -> Result<Value> {
        let words = data.words();

        Ok(match self {
            Self::List => json!(words.all_words()),
            Self::Categories => json!(words.categories()),
            Self::Random { category } => json!(words.random_word(&category)?),
            Self::Add {
                category,
                word,
                hint,
            } => {
                words.add_word(NewWord::new(category, word, hint))?;
                json!({ "added": true })
            }
            Self::Delete { category, word } => {
                json!({ "removed": words.delete_word(&category, &word) })
            }
            Self::Seed => json!({ "added": seed::seed(words.store()) }),
        })
    }
}

impl ScoresCommand {
    fn run(self, data: &AppData) -> Result<Value> {
        let scores = data.scores();

        Ok(match self {
            Self::Add {
                nickname,
                score,
                time,
                attempts,
                used_hint,
            } => {
                let score =
                    score.unwrap_or_else(|| ScoreRecord::compute_score(time, attempts, used_hint));

                let outcome = scores.add_score(NewScore {
                    nickname: Some(nickname),
                    score: Some(score),
                    time: Some(time),
                    attempts: Some(attempts),
                    used_hint,
                })?;
                json!(outcome)
            }
            Self::Top { limit } => match limit {
                Some(limit) => json!(scores.top_scores(limit)),
                None => json!(scores.leaderboard()),
            },
            Self::List => json!(scores.all_scores()),
        })
    }
}
