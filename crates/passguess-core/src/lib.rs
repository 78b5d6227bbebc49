//! PassGuess Core
//!
//! Estimates how many guesses an attacker needs to find a password: every
//! recognizer runs over the password and the cheapest covering sequence of
//! matches decides the estimate.

mod config;
mod error;
mod estimator;
mod input;

pub use config::{EstimatorConfig, RegexSpec};
pub use error::EstimatorError;
pub use estimator::{Evaluation, PasswordEstimator};
pub use input::UserInput;

// Re-exports for convenience
pub use passguess_data::{AdjacencyGraph, DataError, GraphFamily, RankedDictionary};
pub use passguess_pattern::{
    most_guessable_match_sequence, DateMatch, DictionaryMatch, GuessModel, Match, MatchSequence,
    Matcher, MatcherBuilder, NamedRegex, Pattern, RegexMatch, RepeatMatch, SequenceMatch, Session,
    SpatialMatch,
};
