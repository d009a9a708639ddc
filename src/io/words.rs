//! Word-list ingestion: turns raw text into letter options with anagrams merged
//!
//! Each accepted word is normalized to its distinct letters in sorted order,
//! so `words` and `sword` both become `dorsw`. Words with a repeated letter
//! normalize to fewer than five letters and are dropped.

use crate::algorithm::matrix::OptionMap;
use crate::io::configuration::{ALPHABET, ANAGRAM_SEPARATOR, MAX_WORD_LISTS, WORD_LENGTH};
use crate::io::error::{CoverError, Result, file_system_error};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

/// Counters reported after ingestion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Non-empty lines read
    pub total_words: usize,
    /// Words made of exactly five lowercase ASCII letters
    pub five_letter_words: usize,
    /// Distinct normalized words with five different letters
    pub normalized_words: usize,
}

/// Split text into trimmed, lowercased words, one per line
///
/// Accepts both `\n` and `\r\n` line endings and skips blank lines.
pub fn split_words(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Words of `second` that also occur in `first`, in the order of `second`
pub fn intersect_lists(first: &[String], second: &[String]) -> Vec<String> {
    let known: HashSet<&str> = first.iter().map(String::as_str).collect();
    second
        .iter()
        .filter(|word| known.contains(word.as_str()))
        .cloned()
        .collect()
}

/// Read one word list, or two whose intersection is used
///
/// # Errors
///
/// Returns an error if:
/// - No path or more than two paths are given
/// - A file cannot be read
pub fn read_word_lists(paths: &[PathBuf]) -> Result<Vec<String>> {
    if paths.is_empty() || paths.len() > MAX_WORD_LISTS {
        return Err(CoverError::InvalidWordList {
            reason: format!(
                "expected 1 to {MAX_WORD_LISTS} word lists, got {}",
                paths.len()
            ),
        });
    }

    let mut lists = Vec::with_capacity(paths.len());
    for path in paths {
        let text =
            fs::read_to_string(path).map_err(|source| file_system_error(path, "read", source))?;
        lists.push(split_words(&text));
    }

    if let [first, second] = lists.as_slice() {
        return Ok(intersect_lists(first, second));
    }
    Ok(lists.into_iter().flatten().collect())
}

/// Whether a word consists of exactly five lowercase ASCII letters
pub fn is_candidate(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|byte| byte.is_ascii_lowercase())
}

/// Sorted distinct letters of a word, or [`None`] unless the word is a
/// candidate with five different letters
pub fn normalize_word(word: &str) -> Option<String> {
    if !is_candidate(word) {
        return None;
    }
    let letters: BTreeSet<char> = word.chars().collect();
    (letters.len() == WORD_LENGTH).then(|| letters.into_iter().collect())
}

/// Letters forming the item universe
pub fn universe() -> Vec<char> {
    ALPHABET.to_vec()
}

/// Normalized words ready to be solved
#[derive(Clone, Debug, Default)]
pub struct NormalizedWords {
    options: OptionMap<char>,
    /// Normalized word to its anagrams joined by `/`, in input order
    display_names: HashMap<String, String>,
    stats: WordStats,
}

impl NormalizedWords {
    /// Normalize a word list, merging anagrams
    pub fn from_words(words: &[String]) -> Self {
        let mut normalized = Self {
            stats: WordStats {
                total_words: words.len(),
                ..WordStats::default()
            },
            ..Self::default()
        };

        for word in words.iter().filter(|word| is_candidate(word)) {
            normalized.stats.five_letter_words += 1;
            let Some(key) = normalize_word(word) else {
                continue;
            };
            normalized
                .display_names
                .entry(key.clone())
                .and_modify(|anagrams| {
                    anagrams.push_str(ANAGRAM_SEPARATOR);
                    anagrams.push_str(word);
                })
                .or_insert_with(|| word.clone());
            normalized
                .options
                .entry(key)
                .or_insert_with_key(|key| key.chars().collect());
        }

        normalized.stats.normalized_words = normalized.options.len();
        normalized
    }

    /// Option map from normalized word to its letters
    pub const fn options(&self) -> &OptionMap<char> {
        &self.options
    }

    /// Normalized word to its `/`-joined anagrams
    pub const fn display_names(&self) -> &HashMap<String, String> {
        &self.display_names
    }

    /// Ingestion counters
    pub const fn stats(&self) -> WordStats {
        self.stats
    }

    /// Letters of the alphabet that no accepted word contains
    pub fn missing_letters(&self) -> Vec<char> {
        let used: HashSet<char> = self.options.values().flatten().copied().collect();
        ALPHABET
            .iter()
            .copied()
            .filter(|letter| !used.contains(letter))
            .collect()
    }
}
