// Text utils

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// ASCII punctuation, the classic `!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~` set.
const PUNCTUATION_LIT: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A lazily-initialized, global set of all punctuation chars
pub static PUNCTUATION: Lazy<HashSet<char>> = Lazy::new(|| PUNCTUATION_LIT.chars().collect());

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static SPACE_BEFORE_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\.").expect("period regex is valid"));

// Non-greedy so `<b>x</b>` keeps the `x`
pub static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("html regex is valid"));

pub static URL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("url regex is valid"));

/// Long-vowel signs (matras) and the sign they shorten to. An empty
/// replacement drops the sign; some entries map to themselves.
pub const HINDI_LONG_VOWELS: &[(&str, &str)] = &[
    ("\u{093E}", ""),         // ा  'aa'
    ("\u{0940}", "\u{093F}"), // ी → ि  'ii'
    ("\u{0942}", "\u{0941}"), // ू → ु  'uu'
    ("\u{0945}", "\u{0947}"), // ॅ → े  'ei'
    ("\u{0947}", "\u{0947}"), // े  'ee'
    ("\u{0948}", "\u{0947}"), // ै → े  'ai'
    ("\u{094B}", "\u{094B}"), // ो  'oo'
    ("\u{094C}", "\u{094B}"), // ौ → ो  'au'
];

pub fn short_vowel_for(letter: &str) -> Option<&'static str> {
    HINDI_LONG_VOWELS
        .iter()
        .find(|(long, _)| *long == letter)
        .map(|(_, short)| *short)
}

/// Collapses whitespace runs to one space, drops whitespace in front of a
/// full stop and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let attached = SPACE_BEFORE_PERIOD.replace_all(&collapsed, ".");
    attached.trim().to_string()
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

pub fn strip_chars(text: &str, remove: impl Fn(char) -> bool) -> String {
    text.chars().filter(|&c| !remove(c)).collect()
}

pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
