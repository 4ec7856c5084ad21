pub mod error;
pub mod models;
pub mod types;
pub mod utils;

pub use error::{EarningsError, Result};
pub use models::{KeyPhrase, KeywordCounts, LexicalScore, NumberMention, SentimentResult};
pub use types::{KeywordCategory, NumberKind, SentimentLabel, TranscriptSection};
