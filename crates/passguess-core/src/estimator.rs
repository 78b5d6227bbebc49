//! Password strength estimation entry point

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use passguess_data::{
    builtin_dictionaries, builtin_graphs, load_adjacency_graphs, load_frequency_lists, DataError,
};
use passguess_pattern::{Match, Matcher, NamedRegex};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{EstimatorConfig, EstimatorError, UserInput};

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The evaluated password, after truncation
    pub password: String,
    pub guesses: f64,
    pub guesses_log10: f64,
    /// Cheapest covering sequence of matches
    pub sequence: Vec<Match>,
    pub calc_time: Duration,
}

/// Password guess estimator
#[derive(Debug, Clone)]
pub struct PasswordEstimator {
    matcher: Matcher,
    max_password_length: usize,
}

impl Default for PasswordEstimator {
    fn default() -> Self {
        let mut builder = Matcher::builder().dictionaries(builtin_dictionaries());
        match builtin_graphs() {
            Ok(graphs) => builder = builder.graphs(graphs),
            Err(err) => warn!(
                error = %err,
                "built-in keyboard graphs failed to load, spatial matching disabled"
            ),
        }
        Self::from_matcher(builder.build(), EstimatorConfig::default().max_password_length)
    }
}

impl PasswordEstimator {
    /// Create an estimator, loading every data file the config names
    pub fn new(config: EstimatorConfig) -> Result<Self, EstimatorError> {
        let mut builder = Matcher::builder();

        if config.use_builtin_dictionaries {
            builder = builder.dictionaries(builtin_dictionaries());
        }
        for path in &config.frequency_lists {
            builder = builder.dictionaries(load_file(path, load_frequency_lists)?);
        }

        builder = match &config.adjacency_graphs {
            Some(path) => builder.graphs(load_file(path, load_adjacency_graphs)?),
            None => builder.graphs(builtin_graphs()?),
        };

        for spec in &config.regexes {
            let regex = NamedRegex::new(spec.name.clone(), &spec.pattern).map_err(|source| {
                EstimatorError::InvalidRegex {
                    name: spec.name.clone(),
                    source,
                }
            })?;
            builder = builder.regex(regex);
        }

        if let Some(year) = config.reference_year {
            builder = builder.reference_year(year);
        }

        Ok(Self::from_matcher(builder.build(), config.max_password_length))
    }

    /// Wrap an already built matcher
    pub fn from_matcher(matcher: Matcher, max_password_length: usize) -> Self {
        info!(
            dictionaries = matcher.dictionaries().len(),
            graphs = matcher.graphs().len(),
            reference_year = matcher.model().reference_year,
            "password estimator ready"
        );
        Self {
            matcher,
            max_password_length,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn max_password_length(&self) -> usize {
        self.max_password_length
    }

    /// Estimate the guesses needed to crack `password`.
    ///
    /// `user_inputs` are words tied to the account (name, email, ...); they
    /// rank as their own dictionary for this call only.
    pub fn evaluate<I>(&self, password: &str, user_inputs: I) -> Evaluation
    where
        I: IntoIterator,
        I::Item: Into<UserInput>,
    {
        let start = Instant::now();

        let password = match password.char_indices().nth(self.max_password_length) {
            Some((cut, _)) => {
                debug!(
                    max_chars = self.max_password_length,
                    "truncating password before matching"
                );
                &password[..cut]
            }
            None => password,
        };

        let sanitized: Vec<String> = user_inputs
            .into_iter()
            .map(|input| input.into().sanitized())
            .collect();
        let session = self.matcher.session(&sanitized);
        let matches = session.omnimatch(password);
        let match_count = matches.len();
        let result = passguess_pattern::most_guessable_match_sequence(
            password,
            matches,
            self.matcher.model(),
            false,
        );

        let calc_time = start.elapsed();
        debug!(
            matches = match_count,
            user_inputs = sanitized.len(),
            sequence = ?result.sequence.iter().map(|m| m.pattern.name()).collect::<Vec<_>>(),
            guesses_log10 = result.guesses_log10,
            ?calc_time,
            "password evaluated"
        );

        Evaluation {
            password: result.password,
            guesses: result.guesses,
            guesses_log10: result.guesses_log10,
            sequence: result.sequence,
            calc_time,
        }
    }
}

fn load_file<T>(
    path: &Path,
    load: impl FnOnce(BufReader<File>) -> Result<Vec<T>, DataError>,
) -> Result<Vec<T>, EstimatorError> {
    let wrap = |source: DataError| EstimatorError::DataFile {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|err| wrap(DataError::Io(err)))?;
    let loaded = load(BufReader::new(file)).map_err(wrap)?;
    debug!(path = %path.display(), entries = loaded.len(), "loaded data file");
    Ok(loaded)
}
