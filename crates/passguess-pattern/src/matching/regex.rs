//! Named regular expression recognizer

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{sort_matches, Match, Pattern, RegexMatch};

/// Name of the built-in recent year regex
pub const RECENT_YEAR: &str = "recent_year";

static RECENT_YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"19[0-9]{2}|200[0-9]|201[0-9]").expect("valid recent year regex"));

/// A regex and the name its matches are reported under
#[derive(Debug, Clone)]
pub struct NamedRegex {
    name: String,
    regex: Regex,
}

impl NamedRegex {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Four digit years from 1900 to 2019
    pub fn recent_year() -> Self {
        Self {
            name: RECENT_YEAR.to_owned(),
            regex: (*RECENT_YEAR_REGEX).clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Non-overlapping, non-empty matches of every regex, scanned left to right
pub fn regex_match(password: &str, regexes: &[NamedRegex]) -> Vec<Match> {
    let mut matches = Vec::new();
    for named in regexes {
        for found in named.regex.find_iter(password) {
            if found.as_str().is_empty() {
                continue;
            }
            let i = password[..found.start()].chars().count();
            let j = i + found.as_str().chars().count() - 1;
            matches.push(Match::new(
                i,
                j,
                found.as_str(),
                Pattern::Regex(RegexMatch {
                    regex_name: named.name.clone(),
                    captured: found.as_str().to_owned(),
                }),
            ));
        }
    }
    sort_matches(&mut matches);
    matches
}
