//! Match types shared by the recognizers, the estimator and the search

use std::collections::BTreeMap;

use passguess_data::GraphFamily;
use serde::Serialize;

/// A candidate substructure covering `password[i..=j]` (char positions)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub i: usize,
    pub j: usize,
    /// The exact covered substring, in the password's original orientation
    pub token: String,
    #[serde(flatten)]
    pub pattern: Pattern,
    /// Guess estimate, filled in once by [`GuessModel::estimate_guesses`]
    ///
    /// [`GuessModel::estimate_guesses`]: crate::GuessModel::estimate_guesses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guesses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guesses_log10: Option<f64>,
}

impl Match {
    pub fn new(i: usize, j: usize, token: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            i,
            j,
            token: token.into(),
            pattern,
            guesses: None,
            guesses_log10: None,
        }
    }

    /// Number of password chars the match covers
    pub fn span(&self) -> usize {
        self.j + 1 - self.i
    }

    pub fn is_bruteforce(&self) -> bool {
        matches!(self.pattern, Pattern::Bruteforce)
    }
}

/// Pattern tag plus the pattern-specific fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum Pattern {
    Dictionary(DictionaryMatch),
    Spatial(SpatialMatch),
    Repeat(RepeatMatch),
    Sequence(SequenceMatch),
    Regex(RegexMatch),
    Date(DateMatch),
    /// Synthetic fallback, only produced by the sequence search
    Bruteforce,
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Dictionary(_) => "dictionary",
            Pattern::Spatial(_) => "spatial",
            Pattern::Repeat(_) => "repeat",
            Pattern::Sequence(_) => "sequence",
            Pattern::Regex(_) => "regex",
            Pattern::Date(_) => "date",
            Pattern::Bruteforce => "bruteforce",
        }
    }
}

/// Dictionary, reversed-dictionary and leet matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryMatch {
    /// The lowercase dictionary entry that was hit
    pub matched_word: String,
    pub rank: usize,
    pub dictionary_name: String,
    pub reversed: bool,
    pub l33t: bool,
    /// Leet glyph -> plain letter, only the glyphs present in the token
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sub: BTreeMap<char, char>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sub_display: String,
}

impl DictionaryMatch {
    pub fn new(matched_word: impl Into<String>, rank: usize, dictionary_name: impl Into<String>) -> Self {
        Self {
            matched_word: matched_word.into(),
            rank,
            dictionary_name: dictionary_name.into(),
            reversed: false,
            l33t: false,
            sub: BTreeMap::new(),
            sub_display: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialMatch {
    pub graph: String,
    pub family: GraphFamily,
    pub turns: usize,
    pub shifted_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatMatch {
    pub base_token: String,
    pub base_guesses: f64,
    /// Optimal sequence found for `base_token` on its own
    pub base_matches: Vec<Match>,
    pub repeat_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceMatch {
    pub sequence_name: &'static str,
    pub sequence_space: u32,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexMatch {
    pub regex_name: String,
    pub captured: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateMatch {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub separator: Option<char>,
}

/// Outcome of the optimal sequence search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSequence {
    pub password: String,
    pub guesses: f64,
    pub guesses_log10: f64,
    /// Non-overlapping matches covering the whole password, in order
    pub sequence: Vec<Match>,
}

/// Sort on `i` first, `j` second, keeping the relative order of ties
pub(crate) fn sort_matches(matches: &mut [Match]) {
    matches.sort_by_key(|m| (m.i, m.j));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat_with_pattern_tag() {
        let m = Match::new(
            0,
            2,
            "abc",
            Pattern::Sequence(SequenceMatch {
                sequence_name: "lower",
                sequence_space: 26,
                ascending: true,
            }),
        );
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["pattern"], "sequence");
        assert_eq!(value["sequence_name"], "lower");
        assert_eq!(value["i"], 0);
        assert!(value.get("guesses").is_none());
    }

    #[test]
    fn test_bruteforce_tag() {
        let m = Match::new(1, 1, "x", Pattern::Bruteforce);
        assert!(m.is_bruteforce());
        assert_eq!(m.span(), 1);
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["pattern"], "bruteforce");
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut matches = vec![
            Match::new(2, 3, "cd", Pattern::Bruteforce),
            Match::new(0, 1, "ab", Pattern::Regex(RegexMatch { regex_name: "x".into(), captured: "ab".into() })),
            Match::new(0, 1, "ab", Pattern::Bruteforce),
        ];
        sort_matches(&mut matches);
        assert_eq!(matches[0].pattern.name(), "regex");
        assert_eq!(matches[1].pattern.name(), "bruteforce");
        assert_eq!(matches[2].i, 2);
    }
}
