//! Minimum-guesses match sequence search
//!
//! Dynamic program over password prefixes. For every prefix end `k` and
//! sequence length `l` it keeps the best sequence found so far, scored as
//! `l! * prod(guesses) + MIN_GUESSES_BEFORE_GROWING_SEQUENCE^(l - 1)`.
//! Gaps between matches are filled with bruteforce matches.

use std::collections::BTreeMap;

use tracing::trace;

use crate::guesses::{factorial, saturate, GuessModel};
use crate::types::{Match, MatchSequence, Pattern};

pub const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;

/// Best known sequence of a given length ending at a given position
#[derive(Debug, Clone, Copy)]
struct Step {
    /// Index of the sequence's last match in the candidate arena
    index: usize,
    /// Product of the guesses of every match in the sequence
    pi: f64,
    /// Overall score of the sequence
    g: f64,
}

struct Search<'a> {
    password: &'a [char],
    model: &'a GuessModel,
    exclude_additive: bool,
    candidates: Vec<Match>,
    /// `steps[k][l]`: best length-`l` sequence covering `password[..=k]`
    steps: Vec<BTreeMap<usize, Step>>,
}

impl<'a> Search<'a> {
    fn new(password: &'a [char], model: &'a GuessModel, exclude_additive: bool) -> Self {
        Self {
            password,
            model,
            exclude_additive,
            candidates: Vec::new(),
            steps: vec![BTreeMap::new(); password.len()],
        }
    }

    /// Try a length-`l` sequence ending with candidate `index`.
    ///
    /// `prev_pi` is the product term of the length-`(l - 1)` sequence ending
    /// right before the candidate. Returns whether the table changed.
    fn update(&mut self, index: usize, l: usize, prev_pi: f64) -> bool {
        let n = self.password.len();
        let candidate = &mut self.candidates[index];
        let k = candidate.j;
        let mut pi = self.model.estimate_guesses(candidate, n);
        if l > 1 {
            pi = saturate(pi * prev_pi);
        }
        let mut g = factorial(l) * pi;
        if !self.exclude_additive {
            g += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi((l - 1) as i32);
        }
        let g = saturate(g);

        // a sequence with l or fewer matches that does at least as well wins
        let dominated = self
            .steps[k]
            .iter()
            .any(|(&competing_l, competing)| competing_l <= l && competing.g <= g);
        if dominated {
            return false;
        }
        self.steps[k].insert(l, Step { index, pi, g });
        true
    }

    fn push_candidate(&mut self, m: Match) -> usize {
        self.candidates.push(m);
        self.candidates.len() - 1
    }

    fn bruteforce(&self, i: usize, j: usize) -> Match {
        let token: String = self.password[i..=j].iter().collect();
        Match::new(i, j, token, Pattern::Bruteforce)
    }

    /// Consider bruteforce matches ending at `k`
    fn bruteforce_update(&mut self, k: usize) {
        // a single bruteforce match spanning the whole prefix
        let whole = self.bruteforce(0, k);
        let index = self.push_candidate(whole);
        self.update(index, 1, 1.0);

        for i in 1..=k {
            // two adjacent bruteforce matches never beat one spanning both
            let extendable: Vec<(usize, f64)> = self.steps[i - 1]
                .iter()
                .filter(|(_, step)| !self.candidates[step.index].is_bruteforce())
                .map(|(&l, step)| (l, step.pi))
                .collect();
            if extendable.is_empty() {
                continue;
            }
            let candidate = self.bruteforce(i, k);
            let index = self.push_candidate(candidate);
            let mut used = false;
            for (l, pi) in extendable {
                used |= self.update(index, l + 1, pi);
            }
            if !used {
                self.candidates.pop();
            }
        }
    }

    /// Walk back from the best entry at the last position
    fn unwind(&self) -> (f64, Vec<Match>) {
        let Some(last) = self.steps.last() else {
            return (1.0, Vec::new());
        };
        let mut best: Option<(usize, f64)> = None;
        for (&l, step) in last {
            if best.map_or(true, |(_, g)| step.g < g) {
                best = Some((l, step.g));
            }
        }
        let Some((mut l, guesses)) = best else {
            return (1.0, Vec::new());
        };

        let mut sequence = Vec::with_capacity(l);
        let mut k = Some(self.password.len() - 1);
        while let Some(end) = k {
            let Some(step) = self.steps[end].get(&l) else {
                break;
            };
            let m = &self.candidates[step.index];
            sequence.push(m.clone());
            k = m.i.checked_sub(1);
            l -= 1;
        }
        sequence.reverse();
        (guesses, sequence)
    }
}

/// Find the sequence of non-overlapping matches covering `password` that
/// minimizes the estimated number of guesses.
///
/// Positions the matches do not cover are filled with bruteforce matches.
/// With `exclude_additive` the score drops the term that penalizes longer
/// sequences. Matches that fall outside the password are ignored.
pub fn most_guessable_match_sequence(
    password: &str,
    matches: Vec<Match>,
    model: &GuessModel,
    exclude_additive: bool,
) -> MatchSequence {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    let mut search = Search::new(&chars, model, exclude_additive);

    // candidates grouped by end position, ordered by start within a group
    let mut by_end: Vec<Vec<usize>> = vec![Vec::new(); n];
    for m in matches {
        if m.i > m.j || m.j >= n {
            continue;
        }
        let end = m.j;
        let index = search.push_candidate(m);
        by_end[end].push(index);
    }
    for group in &mut by_end {
        group.sort_by_key(|&index| search.candidates[index].i);
    }

    for (k, group) in by_end.iter().enumerate() {
        for &index in group {
            let start = search.candidates[index].i;
            if start == 0 {
                search.update(index, 1, 1.0);
                continue;
            }
            let previous: Vec<(usize, f64)> = search.steps[start - 1]
                .iter()
                .map(|(&l, step)| (l, step.pi))
                .collect();
            for (l, pi) in previous {
                search.update(index, l + 1, pi);
            }
        }
        search.bruteforce_update(k);
    }

    let (guesses, sequence) = search.unwind();
    trace!(
        chars = n,
        candidates = search.candidates.len(),
        sequence_len = sequence.len(),
        guesses,
        "match sequence search finished"
    );
    MatchSequence {
        password: password.to_owned(),
        guesses,
        guesses_log10: guesses.log10(),
        sequence,
    }
}
