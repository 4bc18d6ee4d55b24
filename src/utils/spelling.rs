//! Frequency-dictionary spelling correction.
//!
//! A token is corrected to the most frequent known word at edit distance one,
//! falling back to distance two for tokens of at most
//! [`MAX_SECOND_EDIT_LEN`] characters. The lookup structure is built per pipeline
//! from a [`DictionarySource`] and never shared between requests.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::{PipelineError, Result};
use crate::utils::text::split_into_words;

const EMBEDDED_WORDS: &str = include_str!("../../resources/en_words.txt");

/// Longest token searched at edit distance two. The candidate set grows with
/// the square of the length, so longer tokens only get single edits.
pub const MAX_SECOND_EDIT_LEN: usize = 12;

/// Where the word list comes from.
#[derive(Debug, Clone, Default)]
pub enum DictionarySource {
    /// The English list compiled into the binary.
    #[default]
    Embedded,
    /// Raw word-list text, e.g. read once from a file at startup.
    Text(Arc<str>),
}

impl DictionarySource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::ConfigError(format!(
                "Failed to read dictionary file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;
        Ok(DictionarySource::Text(text.into()))
    }

    pub fn build(&self) -> Result<Dictionary> {
        match self {
            DictionarySource::Embedded => Dictionary::parse(EMBEDDED_WORDS),
            DictionarySource::Text(text) => Dictionary::parse(text),
        }
    }
}

/// Word frequencies plus the alphabet candidate edits are drawn from.
#[derive(Debug, Clone)]
pub struct Dictionary {
    frequencies: HashMap<String, u64>,
    alphabet: Vec<char>,
}

impl Dictionary {
    /// Parses one entry per line: `word` or `word count`. Lines starting
    /// with `#` are comments. Entries without a count are ranked by position,
    /// earlier lines being more frequent.
    pub fn parse(text: &str) -> Result<Self> {
        let entries: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        let total = entries.len() as u64;

        let mut frequencies = HashMap::with_capacity(entries.len());
        for (rank, line) in entries.iter().enumerate() {
            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w.to_lowercase(),
                None => continue,
            };
            let count = match parts.next() {
                Some(raw) => raw.parse::<u64>().map_err(|e| {
                    PipelineError::ConfigError(format!(
                        "Invalid frequency '{}' for dictionary word '{}': {}",
                        raw, word, e
                    ))
                })?,
                None => total - rank as u64,
            };
            *frequencies.entry(word).or_insert(0) += count;
        }

        if frequencies.is_empty() {
            return Err(PipelineError::ConfigError(
                "Spelling dictionary contains no words".to_string(),
            ));
        }

        let alphabet: BTreeSet<char> = frequencies.keys().flat_map(|w| w.chars()).collect();
        Ok(Dictionary {
            frequencies,
            alphabet: alphabet.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(word).copied().unwrap_or(0)
    }
}

pub struct SpellChecker {
    dictionary: Dictionary,
}

impl SpellChecker {
    pub fn new(dictionary: Dictionary) -> Self {
        SpellChecker { dictionary }
    }

    /// Best correction for one token. Tokens that are known, contain
    /// non-letters, or have no candidate within two edits come back unchanged.
    pub fn correction(&self, token: &str) -> String {
        if !is_word(token) {
            return token.to_string();
        }
        let lower = token.to_lowercase();
        if self.dictionary.contains(&lower) {
            return token.to_string();
        }

        let first = edits1(&lower, &self.dictionary.alphabet);
        let best = match self.best_known(first.iter()) {
            Some(word) => Some(word),
            None if lower.chars().count() <= MAX_SECOND_EDIT_LEN => self.best_known(
                first
                    .iter()
                    .flat_map(|e| edits1(e, &self.dictionary.alphabet)),
            ),
            None => None,
        };

        match best {
            Some(word) => restore_case(token, &word),
            None => token.to_string(),
        }
    }

    /// Corrects every whitespace-separated token and rejoins with single spaces.
    pub fn correct_text(&self, text: &str) -> String {
        split_into_words(text)
            .into_iter()
            .map(|t| self.correction(t))
            .join(" ")
    }

    fn best_known<S: AsRef<str>>(&self, candidates: impl Iterator<Item = S>) -> Option<String> {
        candidates
            .filter(|w| self.dictionary.contains(w.as_ref()))
            .max_by(|a, b| self.rank(a.as_ref()).cmp(&self.rank(b.as_ref())))
            .map(|w| w.as_ref().to_string())
    }

    /// Higher frequency wins, ties go to the alphabetically first word.
    fn rank<'a>(&self, word: &'a str) -> (u64, Reverse<&'a str>) {
        (self.dictionary.frequency(word), Reverse(word))
    }
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token.chars().all(|c| c.is_alphabetic() || c == '\'')
}

fn restore_case(original: &str, corrected: &str) -> String {
    let mut letters = original.chars().filter(|c| c.is_alphabetic());
    let all_upper = original.chars().count() > 1 && letters.all(char::is_uppercase);
    if all_upper {
        return corrected.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = corrected.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    corrected.to_string()
}

/// All strings one delete, transpose, replace or insert away from `word`.
fn edits1(word: &str, alphabet: &[char]) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::with_capacity(n * (2 * alphabet.len() + 2) + alphabet.len());

    for i in 0..n {
        let mut deleted = chars.clone();
        deleted.remove(i);
        out.push(deleted.into_iter().collect());
    }
    for i in 0..n.saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        out.push(swapped.into_iter().collect());
    }
    for i in 0..n {
        for &c in alphabet {
            if c != chars[i] {
                let mut replaced = chars.clone();
                replaced[i] = c;
                out.push(replaced.into_iter().collect());
            }
        }
    }
    for i in 0..=n {
        for &c in alphabet {
            let mut inserted = chars.clone();
            inserted.insert(i, c);
            out.push(inserted.into_iter().collect());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(words: &str) -> SpellChecker {
        SpellChecker::new(Dictionary::parse(words).unwrap())
    }

    #[test]
    fn test_parse_counts_and_ranks() {
        let dict = Dictionary::parse("# comment\nthe 100\nHouse 5\n\nmouse").unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.frequency("the"), 100);
        assert_eq!(dict.frequency("house"), 5);
        // ranked: three entries, "mouse" is third
        assert_eq!(dict.frequency("mouse"), 1);
        assert!(Dictionary::parse("word notanumber").is_err());
        assert!(Dictionary::parse("\n# only comments\n").is_err());
    }

    #[test]
    fn test_known_words_pass_through() {
        let sc = checker("hello 10\nworld 10");
        assert_eq!(sc.correction("hello"), "hello");
        assert_eq!(sc.correction("Hello"), "Hello");
        assert_eq!(sc.correction(&sc.correction("world")), "world");
    }

    #[test]
    fn test_corrects_by_frequency() {
        let sc = checker("spelling 50\nspewing 5\nthe 100");
        assert_eq!(sc.correction("speling"), "spelling");
        assert_eq!(sc.correction("teh"), "the");
        assert_eq!(sc.correction("spellign"), "spelling");
        // two edits away, "spewing" is as close but rarer
        assert_eq!(sc.correction("spelin"), "spelling");
    }

    #[test]
    fn test_case_is_restored() {
        let sc = checker("house 10");
        assert_eq!(sc.correction("Huose"), "House");
        assert_eq!(sc.correction("HOUS"), "HOUSE");
    }

    #[test]
    fn test_unknown_and_non_word_tokens_unchanged() {
        let sc = checker("cat 1");
        assert_eq!(sc.correction("xylophone"), "xylophone");
        assert_eq!(sc.correction("42"), "42");
        assert_eq!(sc.correction("c4t"), "c4t");
    }

    #[test]
    fn test_correct_text_rejoins_with_single_spaces() {
        let sc = checker("the 10\ncat 5\nsat 5");
        assert_eq!(sc.correct_text("  teh   cat  sat "), "the cat sat");
    }

    #[test]
    fn test_embedded_dictionary_loads() {
        let dict = DictionarySource::Embedded.build().unwrap();
        assert!(dict.contains("the"));
        assert!(dict.contains("spelling"));
        assert!(dict.len() > 50_000);
        let sc = SpellChecker::new(dict);
        assert_eq!(sc.correction("speling"), "spelling");
        assert_eq!(sc.correction("teh"), "the");
    }

    #[test]
    fn test_embedded_dictionary_keeps_names_and_inflections() {
        let sc = SpellChecker::new(DictionarySource::Embedded.build().unwrap());
        for word in [
            "Mike", "John", "Michael", "Anna", "Smith", "Clinton", "London", "correctly",
            "walked", "dogs", "happiest", "grandmother", "kitchens", "yesterday",
        ] {
            assert_eq!(sc.correction(word), word);
        }
    }

    #[test]
    fn test_long_tokens_only_get_single_edits() {
        let sc = checker("internationalization 10");
        assert_eq!(sc.correction("internationalizaton"), "internationalization");
        // two edits away and longer than the distance-two limit
        assert_eq!(sc.correction("internationalizatn"), "internationalizatn");
        assert!("internationalizatn".len() > MAX_SECOND_EDIT_LEN);
    }
}
