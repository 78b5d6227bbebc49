//! Ranked frequency dictionaries

use std::collections::HashMap;
use std::io::Read;

use crate::{fold_case, DataError};

const BUILTIN_LISTS: [(&str, &str); 6] = [
    ("passwords", include_str!("../data/passwords.txt")),
    ("english_wikipedia", include_str!("../data/english_wikipedia.txt")),
    ("female_names", include_str!("../data/female_names.txt")),
    ("surnames", include_str!("../data/surnames.txt")),
    ("male_names", include_str!("../data/male_names.txt")),
    ("us_tv_and_film", include_str!("../data/us_tv_and_film.txt")),
];

/// Word -> rank lookup. Rank 1 is the most common word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedDictionary {
    name: String,
    ranks: HashMap<String, usize>,
    max_word_len: usize,
}

impl RankedDictionary {
    /// Name of the per-evaluation dictionary built from caller context
    pub const USER_INPUTS: &'static str = "user_inputs";

    /// Rank an ordered, most-common-first word list.
    ///
    /// Words are lowercased char by char, the same way the matchers fold
    /// password substrings. A word listed twice keeps its later rank.
    pub fn from_ordered<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        let mut max_word_len = 0;
        for (index, word) in words.into_iter().enumerate() {
            let word = fold_case(word.as_ref());
            max_word_len = max_word_len.max(word.chars().count());
            ranks.insert(word, index + 1);
        }
        Self {
            name: name.into(),
            ranks,
            max_word_len,
        }
    }

    /// The `user_inputs` dictionary for already sanitized context values
    pub fn user_inputs<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_ordered(Self::USER_INPUTS, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank of a lowercase word, if present
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    /// Length in chars of the longest ranked word
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// The compiled-in sample lists, in a fixed order
pub fn builtin_dictionaries() -> Vec<RankedDictionary> {
    BUILTIN_LISTS
        .iter()
        .map(|(name, text)| {
            RankedDictionary::from_ordered(*name, text.lines().map(str::trim).filter(|w| !w.is_empty()))
        })
        .collect()
}

/// Load lists from JSON shaped like `{"passwords": ["123456", "password", ...]}`.
///
/// Dictionaries come back in document order.
pub fn load_frequency_lists<R: Read>(reader: R) -> Result<Vec<RankedDictionary>, DataError> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .map(|(name, value)| {
            let words: Vec<String> = serde_json::from_value(value)?;
            Ok(RankedDictionary::from_ordered(name, words))
        })
        .collect()
}
