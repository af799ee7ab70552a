#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

//! File-backed storage for a word-guessing game: the word catalog and the
//! leaderboard, each held in memory and mirrored to one snapshot file.

pub mod cli;
pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod records;
pub mod scores;
pub mod seed;
pub mod service;
pub mod words;

pub use codec::{Codec, CodecError, JsonFile};
pub use config::Config;
pub use data::AppData;
pub use error::{Error, ErrorKind, ValidationError};
pub use records::{ScoreRecord, WordKey, WordRecord};
pub use scores::{ScoreOutcome, ScoreStore};
pub use service::{NewScore, NewWord, ScoreService, WordService};
pub use words::{DuplicateWordError, WordStore};
