//! Guess estimation, one formula per pattern

use passguess_data::{fold_case, AdjacencyGraph, GraphFamily, GraphStats};

use crate::matching::regex::RECENT_YEAR;
use crate::types::{
    DateMatch, DictionaryMatch, Match, Pattern, RegexMatch, RepeatMatch, SequenceMatch,
    SpatialMatch,
};

pub const BRUTEFORCE_CARDINALITY: f64 = 10.0;
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;
pub const MIN_YEAR_SPACE: i32 = 20;

/// Precomputed inputs of the per-pattern formulas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessModel {
    /// Year that date and year distances are measured from
    pub reference_year: i32,
    pub keyboard: GraphStats,
    pub keypad: GraphStats,
}

impl GuessModel {
    /// Take spatial stats from the first graph of each family.
    ///
    /// A family with no graph borrows the other family's stats.
    pub fn new(reference_year: i32, graphs: &[AdjacencyGraph]) -> Self {
        let first_of = |family: GraphFamily| {
            graphs
                .iter()
                .find(|graph| graph.family() == family)
                .map(AdjacencyGraph::stats)
        };
        let keyboard = first_of(GraphFamily::Keyboard);
        let keypad = first_of(GraphFamily::Keypad);
        Self {
            reference_year,
            keyboard: keyboard.or(keypad).unwrap_or_default(),
            keypad: keypad.or(keyboard).unwrap_or_default(),
        }
    }

    pub fn stats_for(&self, family: GraphFamily) -> GraphStats {
        match family {
            GraphFamily::Keyboard => self.keyboard,
            GraphFamily::Keypad => self.keypad,
        }
    }

    /// Guesses needed for `m` inside a password of `password_len` chars.
    ///
    /// The first call stores the estimate on the match; later calls return it.
    pub fn estimate_guesses(&self, m: &mut Match, password_len: usize) -> f64 {
        if let Some(guesses) = m.guesses {
            return guesses;
        }
        let span = m.span();
        let min_guesses = if span < password_len {
            if span == 1 {
                MIN_SUBMATCH_GUESSES_SINGLE_CHAR
            } else {
                MIN_SUBMATCH_GUESSES_MULTI_CHAR
            }
        } else {
            1.0
        };
        let guesses = self.pattern_guesses(m).max(min_guesses);
        m.guesses = Some(guesses);
        m.guesses_log10 = Some(guesses.log10());
        guesses
    }

    fn pattern_guesses(&self, m: &Match) -> f64 {
        let token_len = m.span();
        match &m.pattern {
            Pattern::Bruteforce => bruteforce_guesses(token_len),
            Pattern::Dictionary(dm) => dictionary_guesses(&m.token, dm),
            Pattern::Spatial(sm) => self.spatial_guesses(token_len, sm),
            Pattern::Repeat(rm) => repeat_guesses(rm),
            Pattern::Sequence(sm) => sequence_guesses(&m.token, sm),
            Pattern::Regex(rm) => self.regex_guesses(token_len, rm),
            Pattern::Date(dm) => self.date_guesses(dm),
        }
    }

    fn spatial_guesses(&self, token_len: usize, sm: &SpatialMatch) -> f64 {
        let stats = self.stats_for(sm.family);
        let starts = stats.starting_positions as f64;
        let degree = stats.average_degree;

        // patterns of length token_len or less with sm.turns turns or less
        let mut guesses = 0.0;
        for len in 2..=token_len {
            let possible_turns = sm.turns.min(len - 1);
            for turns in 1..=possible_turns {
                guesses += n_choose_k(len - 1, turns - 1) * starts * degree.powi(turns as i32);
            }
        }

        if sm.shifted_count > 0 {
            let shifted = sm.shifted_count;
            let unshifted = token_len.saturating_sub(shifted);
            guesses *= partial_variations(shifted, unshifted);
        }
        guesses
    }

    fn regex_guesses(&self, token_len: usize, rm: &RegexMatch) -> f64 {
        if let Some(base) = char_class_cardinality(&rm.regex_name) {
            return saturate(base.powi(token_len as i32));
        }
        match (rm.regex_name.as_str(), rm.captured.parse::<i32>()) {
            (RECENT_YEAR, Ok(year)) => (year - self.reference_year).abs().max(MIN_YEAR_SPACE) as f64,
            _ => bruteforce_guesses(token_len),
        }
    }

    fn date_guesses(&self, dm: &DateMatch) -> f64 {
        let year_space = (dm.year - self.reference_year).abs().max(MIN_YEAR_SPACE);
        let mut guesses = year_space as f64 * 365.0;
        if dm.separator.is_some() {
            // one of ~4 common separators
            guesses *= 4.0;
        }
        guesses
    }
}

fn char_class_cardinality(regex_name: &str) -> Option<f64> {
    match regex_name {
        "alpha_lower" | "alpha_upper" => Some(26.0),
        "alpha" => Some(52.0),
        "alphanumeric" => Some(62.0),
        "digits" => Some(10.0),
        "symbols" => Some(33.0),
        _ => None,
    }
}

/// Replace inf/NaN with the largest finite value so comparisons stay ordered
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::MAX
    }
}

/// Binomial coefficient; 0 when `k > n`
pub fn n_choose_k(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return 1.0;
    }
    let mut n = n as f64;
    let mut r = 1.0;
    for d in 1..=k {
        r *= n;
        r /= d as f64;
        n -= 1.0;
    }
    r
}

pub fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |f, i| f * i as f64)
}

/// Ways to pick a variant with at most min(a, b) of `a` marked among `a + b`
/// positions. 2 when either side is empty.
fn partial_variations(a: usize, b: usize) -> f64 {
    if a == 0 || b == 0 {
        return 2.0;
    }
    (1..=a.min(b)).map(|i| n_choose_k(a + b, i)).sum()
}

pub fn bruteforce_guesses(token_len: usize) -> f64 {
    let guesses = saturate(BRUTEFORCE_CARDINALITY.powi(token_len.min(i32::MAX as usize) as i32));
    // one above the submatch floor, so real patterns over the same span win ties
    let min_guesses = if token_len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    guesses.max(min_guesses)
}

pub fn dictionary_guesses(token: &str, dm: &DictionaryMatch) -> f64 {
    let reversed_variations = if dm.reversed { 2.0 } else { 1.0 };
    dm.rank as f64 * uppercase_variations(token) * l33t_variations(token, dm) * reversed_variations
}

/// Capitalization variants an attacker would try for `token`
pub fn uppercase_variations(token: &str) -> f64 {
    let chars: Vec<char> = token.chars().collect();
    let upper = chars.iter().filter(|c| c.is_ascii_uppercase()).count();
    let lower = chars.iter().filter(|c| c.is_ascii_lowercase()).count();
    if upper == 0 {
        return 1.0;
    }

    let no_upper = |s: &[char]| !s.is_empty() && s.iter().all(|c| !c.is_ascii_uppercase());
    let start_upper = chars.len() > 1 && chars[0].is_ascii_uppercase() && no_upper(&chars[1..]);
    let end_upper = chars.len() > 1
        && chars[chars.len() - 1].is_ascii_uppercase()
        && no_upper(&chars[..chars.len() - 1]);
    let all_upper = lower == 0;
    if start_upper || end_upper || all_upper {
        return 2.0;
    }

    (1..=upper.min(lower)).map(|i| n_choose_k(upper + lower, i)).sum()
}

/// Substitution variants an attacker would try for a leet token
pub fn l33t_variations(token: &str, dm: &DictionaryMatch) -> f64 {
    if !dm.l33t {
        return 1.0;
    }
    // capitalization is accounted for separately
    let lowered = fold_case(token);
    dm.sub.iter().fold(1.0, |variations, (&subbed, &unsubbed)| {
        let subbed_count = lowered.chars().filter(|&c| c == subbed).count();
        let unsubbed_count = lowered.chars().filter(|&c| c == unsubbed).count();
        variations * partial_variations(subbed_count, unsubbed_count)
    })
}

pub fn repeat_guesses(rm: &RepeatMatch) -> f64 {
    rm.base_guesses * rm.repeat_count as f64
}

pub fn sequence_guesses(token: &str, sm: &SequenceMatch) -> f64 {
    let first = token.chars().next().unwrap_or_default();
    let mut base_guesses = match first {
        // obvious starting points
        'a' | 'A' | 'z' | 'Z' | '0' | '1' | '9' => 4.0,
        c if c.is_ascii_digit() => 10.0,
        _ => 26.0,
    };
    if !sm.ascending {
        base_guesses *= 2.0;
    }
    base_guesses * token.chars().count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use passguess_data::builtin_graphs;
    use std::collections::BTreeMap;

    const YEAR: i32 = 2020;

    fn model() -> GuessModel {
        GuessModel::new(YEAR, &builtin_graphs().unwrap())
    }

    fn dict_match(token: &str, rank: usize) -> Match {
        Match::new(
            0,
            token.chars().count() - 1,
            token,
            Pattern::Dictionary(DictionaryMatch::new(token.to_lowercase(), rank, "words")),
        )
    }

    #[test]
    fn test_n_choose_k() {
        assert_eq!(n_choose_k(0, 0), 1.0);
        assert_eq!(n_choose_k(1, 0), 1.0);
        assert_eq!(n_choose_k(5, 0), 1.0);
        assert_eq!(n_choose_k(0, 1), 0.0);
        assert_eq!(n_choose_k(0, 5), 0.0);
        assert_eq!(n_choose_k(2, 1), 2.0);
        assert_eq!(n_choose_k(4, 2), 6.0);
        assert_eq!(n_choose_k(33, 7), 4272048.0);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
    }

    #[test]
    fn test_guesses_are_cached() {
        let model = model();
        let mut m = dict_match("word", 7);
        assert_eq!(model.estimate_guesses(&mut m, 4), 7.0);
        // a stale estimate is returned untouched
        m.guesses = Some(1.0);
        assert_eq!(model.estimate_guesses(&mut m, 4), 1.0);
    }

    #[test]
    fn test_min_guesses_for_submatches() {
        let model = model();
        let mut single = Match::new(0, 0, "a", Pattern::Dictionary(DictionaryMatch::new("a", 1, "words")));
        assert_eq!(model.estimate_guesses(&mut single, 5), MIN_SUBMATCH_GUESSES_SINGLE_CHAR);

        let mut multi = dict_match("ab", 1);
        assert_eq!(model.estimate_guesses(&mut multi, 5), MIN_SUBMATCH_GUESSES_MULTI_CHAR);

        let mut whole = dict_match("ab", 1);
        assert_eq!(model.estimate_guesses(&mut whole, 2), 1.0);
        assert_eq!(whole.guesses_log10, Some(0.0));
    }

    #[test]
    fn test_bruteforce_guesses() {
        assert_eq!(bruteforce_guesses(1), 11.0);
        assert_eq!(bruteforce_guesses(2), 100.0);
        assert_eq!(bruteforce_guesses(3), 1000.0);
        assert_eq!(bruteforce_guesses(400), f64::MAX);
        assert!(bruteforce_guesses(400).is_finite());
    }

    #[test]
    fn test_uppercase_variations() {
        let cases = [
            ("", 1.0),
            ("a", 1.0),
            ("A", 2.0),
            ("abcdef", 1.0),
            ("Abcdef", 2.0),
            ("abcdeF", 2.0),
            ("ABCDEF", 2.0),
            ("aBcdef", n_choose_k(6, 1)),
            ("aBcDef", n_choose_k(6, 1) + n_choose_k(6, 2)),
            ("ABCDEf", n_choose_k(6, 1)),
            ("aBCDEf", n_choose_k(6, 1) + n_choose_k(6, 2)),
            ("ABCdef", n_choose_k(6, 1) + n_choose_k(6, 2) + n_choose_k(6, 3)),
        ];
        for (word, expected) in cases {
            assert_eq!(uppercase_variations(word), expected, "{word}");
        }
    }

    fn leet(sub: &[(char, char)]) -> DictionaryMatch {
        let mut dm = DictionaryMatch::new("", 1, "words");
        dm.l33t = !sub.is_empty();
        dm.sub = sub.iter().copied().collect::<BTreeMap<_, _>>();
        dm
    }

    #[test]
    fn test_l33t_variations() {
        let cases: [(&str, &[(char, char)], f64); 9] = [
            ("", &[], 1.0),
            ("a", &[], 1.0),
            ("4", &[('4', 'a')], 2.0),
            ("4pple", &[('4', 'a')], 2.0),
            ("abcet", &[], 1.0),
            ("4bcet", &[('4', 'a')], 2.0),
            ("a8cet", &[('8', 'b')], 2.0),
            ("abce+", &[('+', 't')], 2.0),
            ("48cet", &[('4', 'a'), ('8', 'b')], 4.0),
        ];
        for (token, sub, expected) in cases {
            assert_eq!(l33t_variations(token, &leet(sub)), expected, "{token}");
        }

        let mixed: [(&str, &[(char, char)], f64); 4] = [
            ("a4a4aa", &[('4', 'a')], n_choose_k(6, 2) + n_choose_k(6, 1)),
            ("4a4a44", &[('4', 'a')], n_choose_k(6, 2) + n_choose_k(6, 1)),
            (
                "a44att+",
                &[('4', 'a'), ('+', 't')],
                (n_choose_k(4, 2) + n_choose_k(4, 1)) * n_choose_k(3, 1),
            ),
            // capitalization does not change the substitution count
            ("Aa44aA", &[('4', 'a')], n_choose_k(6, 2) + n_choose_k(6, 1)),
        ];
        for (token, sub, expected) in mixed {
            assert_eq!(l33t_variations(token, &leet(sub)), expected, "{token}");
        }
    }

    #[test]
    fn test_dictionary_guesses() {
        let mut dm = DictionaryMatch::new("aaaaa", 32, "words");
        assert_eq!(dictionary_guesses("aaaaa", &dm), 32.0);
        assert_eq!(dictionary_guesses("AAAaaa", &dm), 32.0 * uppercase_variations("AAAaaa"));

        dm.reversed = true;
        assert_eq!(dictionary_guesses("aaa", &dm), 64.0);

        let mut leet = DictionaryMatch::new("aaaaa", 32, "words");
        leet.l33t = true;
        leet.sub.insert('@', 'a');
        assert_eq!(
            dictionary_guesses("aaa@@@", &leet),
            32.0 * l33t_variations("aaa@@@", &leet)
        );
    }

    #[test]
    fn test_spatial_guesses() {
        let model = model();
        let mut m = Match::new(
            0,
            5,
            "zxcvbn",
            Pattern::Spatial(SpatialMatch {
                graph: "qwerty".into(),
                family: GraphFamily::Keyboard,
                turns: 1,
                shifted_count: 0,
            }),
        );
        let starts = model.keyboard.starting_positions as f64;
        let degree = model.keyboard.average_degree;
        // with one turn, one pattern per starting key and direction per length
        let base = starts * degree * (6 - 1) as f64;
        assert!((model.estimate_guesses(&mut m, 6) - base).abs() < 1e-6);

        let mut shifted = m.clone();
        shifted.guesses = None;
        shifted.token = "ZxCvbn".into();
        if let Pattern::Spatial(sm) = &mut shifted.pattern {
            sm.shifted_count = 2;
        }
        let expected = base * (n_choose_k(6, 2) + n_choose_k(6, 1));
        assert!((model.estimate_guesses(&mut shifted, 6) - expected).abs() < 1e-3);

        let mut all_shifted = m.clone();
        all_shifted.guesses = None;
        all_shifted.token = "ZXCVBN".into();
        if let Pattern::Spatial(sm) = &mut all_shifted.pattern {
            sm.shifted_count = 6;
        }
        assert!((model.estimate_guesses(&mut all_shifted, 6) - base * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spatial_guesses_with_turns() {
        let model = model();
        let sm = SpatialMatch {
            graph: "qwerty".into(),
            family: GraphFamily::Keyboard,
            turns: 3,
            shifted_count: 0,
        };
        let starts = model.keyboard.starting_positions as f64;
        let degree = model.keyboard.average_degree;
        let mut expected = 0.0;
        for len in 2..=7usize {
            for turns in 1..=3usize.min(len - 1) {
                expected += n_choose_k(len - 1, turns - 1) * starts * degree.powi(turns as i32);
            }
        }
        let mut m = Match::new(0, 6, "zxcftzh", Pattern::Spatial(sm));
        assert!((model.estimate_guesses(&mut m, 7) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_sequence_guesses() {
        let cases = [
            ("ab", true, 4.0 * 2.0),
            ("XYZ", true, 26.0 * 3.0),
            ("4567", true, 10.0 * 4.0),
            ("7654", false, 10.0 * 4.0 * 2.0),
            ("ZYX", false, 4.0 * 3.0 * 2.0),
        ];
        for (token, ascending, expected) in cases {
            let sm = SequenceMatch {
                sequence_name: "lower",
                sequence_space: 26,
                ascending,
            };
            assert_eq!(sequence_guesses(token, &sm), expected, "{token}");
        }
    }

    #[test]
    fn test_repeat_guesses() {
        let rm = RepeatMatch {
            base_token: "abc".into(),
            base_guesses: 42.0,
            base_matches: Vec::new(),
            repeat_count: 3,
        };
        assert_eq!(repeat_guesses(&rm), 126.0);
    }

    #[test]
    fn test_regex_guesses() {
        let model = model();
        let rm = |name: &str, captured: &str| RegexMatch {
            regex_name: name.into(),
            captured: captured.into(),
        };
        assert_eq!(model.regex_guesses(6, &rm("alpha_lower", "aizocd")), 26f64.powi(6));
        assert_eq!(model.regex_guesses(5, &rm("alphanumeric", "a1b2c")), 62f64.powi(5));
        assert_eq!(
            model.regex_guesses(4, &rm(RECENT_YEAR, "1972")),
            (YEAR - 1972) as f64
        );
        assert_eq!(
            model.regex_guesses(4, &rm(RECENT_YEAR, "2015")),
            MIN_YEAR_SPACE as f64
        );
        assert_eq!(model.regex_guesses(3, &rm("custom", "zzz")), 1000.0);
    }

    #[test]
    fn test_date_guesses() {
        let model = model();
        let plain = DateMatch {
            year: 1923,
            month: 1,
            day: 1,
            separator: None,
        };
        assert_eq!(model.date_guesses(&plain), 365.0 * (YEAR - 1923) as f64);

        let recent = DateMatch {
            year: YEAR,
            month: 4,
            day: 1,
            separator: Some('/'),
        };
        assert_eq!(model.date_guesses(&recent), 365.0 * MIN_YEAR_SPACE as f64 * 4.0);
    }

    #[test]
    fn test_model_falls_back_between_families() {
        let graphs = builtin_graphs().unwrap();
        let keypad_only: Vec<_> = graphs
            .into_iter()
            .filter(|g| g.family() == GraphFamily::Keypad)
            .collect();
        let model = GuessModel::new(YEAR, &keypad_only);
        assert_eq!(model.keyboard, model.keypad);

        let empty = GuessModel::new(YEAR, &[]);
        assert_eq!(empty.keyboard, GraphStats::default());
    }
}
