// Utils

pub mod logging;
pub mod prometheus_metrics;
pub mod spelling;
pub mod text;

pub use spelling::{Dictionary, DictionarySource, SpellChecker};
pub use text::{normalize_whitespace, split_into_words, title_case, PUNCTUATION};
