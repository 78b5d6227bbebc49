//! PassGuess Pattern Engine
//!
//! Recognizers for guessable substructures (dictionary words, keyboard walks,
//! repeats, sequences, dates, regexes), per-pattern guess estimates and the
//! search for the cheapest sequence of matches covering a password.

mod guesses;
mod matcher;
pub mod matching;
mod search;
mod types;

pub use guesses::{
    bruteforce_guesses, dictionary_guesses, factorial, l33t_variations, n_choose_k,
    repeat_guesses, sequence_guesses, uppercase_variations, GuessModel, BRUTEFORCE_CARDINALITY,
    MIN_SUBMATCH_GUESSES_MULTI_CHAR, MIN_SUBMATCH_GUESSES_SINGLE_CHAR, MIN_YEAR_SPACE,
};
pub use matcher::{Matcher, MatcherBuilder, Session};
pub use matching::regex::{NamedRegex, RECENT_YEAR};
pub use search::{most_guessable_match_sequence, MIN_GUESSES_BEFORE_GROWING_SEQUENCE};
pub use types::{
    DateMatch, DictionaryMatch, Match, MatchSequence, Pattern, RegexMatch, RepeatMatch,
    SequenceMatch, SpatialMatch,
};

// Re-exports for convenience
pub use passguess_data::{AdjacencyGraph, GraphFamily, GraphStats, RankedDictionary};
