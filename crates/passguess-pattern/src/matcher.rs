//! Matcher configuration and per-evaluation sessions

use chrono::Datelike;
use passguess_data::{
    builtin_dictionaries, builtin_graphs, default_leet_table, AdjacencyGraph, DataError,
    LeetTable, RankedDictionary,
};
use tracing::{trace, warn};

use crate::guesses::GuessModel;
use crate::matching::date::date_match;
use crate::matching::dictionary::{dictionary_match, reverse_dictionary_match};
use crate::matching::leet::l33t_match;
use crate::matching::regex::{regex_match, NamedRegex};
use crate::matching::repeat::repeat_match;
use crate::matching::sequence::sequence_match;
use crate::matching::spatial::spatial_match;
use crate::search::most_guessable_match_sequence;
use crate::types::{sort_matches, Match, MatchSequence};

/// Immutable recognizer data, shareable across threads
#[derive(Debug, Clone)]
pub struct Matcher {
    dictionaries: Vec<RankedDictionary>,
    graphs: Vec<AdjacencyGraph>,
    leet_table: LeetTable,
    regexes: Vec<NamedRegex>,
    model: GuessModel,
}

/// Builder for [`Matcher`]
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    dictionaries: Vec<RankedDictionary>,
    graphs: Vec<AdjacencyGraph>,
    leet_table: LeetTable,
    regexes: Vec<NamedRegex>,
    reference_year: Option<i32>,
}

impl Default for MatcherBuilder {
    fn default() -> Self {
        Self {
            dictionaries: Vec::new(),
            graphs: Vec::new(),
            leet_table: default_leet_table(),
            regexes: vec![NamedRegex::recent_year()],
            reference_year: None,
        }
    }
}

impl MatcherBuilder {
    /// Add a ranked dictionary. Dictionaries are searched in insertion order.
    ///
    /// A dictionary named `user_inputs` is dropped; that name is reserved for
    /// the per-session context dictionary.
    pub fn dictionary(mut self, dictionary: RankedDictionary) -> Self {
        if dictionary.name() == RankedDictionary::USER_INPUTS {
            warn!("ignoring dictionary with reserved name {}", RankedDictionary::USER_INPUTS);
            return self;
        }
        self.dictionaries.push(dictionary);
        self
    }

    pub fn dictionaries(self, dictionaries: impl IntoIterator<Item = RankedDictionary>) -> Self {
        dictionaries.into_iter().fold(self, Self::dictionary)
    }

    pub fn graph(mut self, graph: AdjacencyGraph) -> Self {
        self.graphs.push(graph);
        self
    }

    pub fn graphs(mut self, graphs: impl IntoIterator<Item = AdjacencyGraph>) -> Self {
        self.graphs.extend(graphs);
        self
    }

    pub fn leet_table(mut self, table: LeetTable) -> Self {
        self.leet_table = table;
        self
    }

    /// Add a regex next to the built-in `recent_year` one
    pub fn regex(mut self, regex: NamedRegex) -> Self {
        self.regexes.push(regex);
        self
    }

    /// Replace the whole regex list, built-ins included
    pub fn regexes(mut self, regexes: Vec<NamedRegex>) -> Self {
        self.regexes = regexes;
        self
    }

    /// Year that date distances are measured from. Defaults to the current year.
    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn build(self) -> Matcher {
        let reference_year = self
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year());
        let model = GuessModel::new(reference_year, &self.graphs);
        Matcher {
            dictionaries: self.dictionaries,
            graphs: self.graphs,
            leet_table: self.leet_table,
            regexes: self.regexes,
            model,
        }
    }
}

impl Matcher {
    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::default()
    }

    /// Matcher over the compiled-in dictionaries and keyboard graphs
    pub fn with_builtin_data() -> Result<Self, DataError> {
        Ok(Self::builder()
            .dictionaries(builtin_dictionaries())
            .graphs(builtin_graphs()?)
            .build())
    }

    pub fn model(&self) -> &GuessModel {
        &self.model
    }

    pub fn dictionaries(&self) -> &[RankedDictionary] {
        &self.dictionaries
    }

    pub fn graphs(&self) -> &[AdjacencyGraph] {
        &self.graphs
    }

    /// Start an evaluation with caller context words ranked in the given order
    pub fn session<I, S>(&self, user_inputs: I) -> Session<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Session {
            matcher: self,
            user_inputs: RankedDictionary::user_inputs(user_inputs),
        }
    }
}

/// A matcher plus the `user_inputs` dictionary of one evaluation
#[derive(Debug)]
pub struct Session<'a> {
    matcher: &'a Matcher,
    user_inputs: RankedDictionary,
}

impl<'a> Session<'a> {
    pub fn matcher(&self) -> &'a Matcher {
        self.matcher
    }

    pub fn user_inputs(&self) -> &RankedDictionary {
        &self.user_inputs
    }

    /// Every match from every recognizer, sorted on `(i, j)`
    pub fn omnimatch(&self, password: &str) -> Vec<Match> {
        let chars: Vec<char> = password.chars().collect();
        self.omnimatch_chars(password, &chars)
    }

    pub(crate) fn omnimatch_chars(&self, password: &str, chars: &[char]) -> Vec<Match> {
        let matcher = self.matcher;
        let dictionaries: Vec<&RankedDictionary> = matcher
            .dictionaries
            .iter()
            .chain(std::iter::once(&self.user_inputs))
            .collect();

        let mut matches = dictionary_match(chars, &dictionaries);
        matches.extend(reverse_dictionary_match(chars, &dictionaries));
        matches.extend(l33t_match(chars, &dictionaries, &matcher.leet_table));
        matches.extend(spatial_match(chars, &matcher.graphs));
        matches.extend(repeat_match(chars, self));
        matches.extend(sequence_match(chars));
        matches.extend(regex_match(password, &matcher.regexes));
        matches.extend(date_match(chars, matcher.model.reference_year));
        sort_matches(&mut matches);

        trace!(chars = chars.len(), matches = matches.len(), "omnimatch");
        matches
    }

    /// Optimal match sequence for `password` on its own
    pub fn most_guessable(&self, password: &str) -> MatchSequence {
        let chars: Vec<char> = password.chars().collect();
        self.most_guessable_chars(password, &chars)
    }

    pub(crate) fn most_guessable_chars(&self, password: &str, chars: &[char]) -> MatchSequence {
        let matches = self.omnimatch_chars(password, chars);
        most_guessable_match_sequence(password, matches, &self.matcher.model, false)
    }
}
