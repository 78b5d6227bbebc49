//! Constant-step sequence recognizer (`abcd`, `9753`, `ZYX`)

use super::slice_token;
use crate::types::{sort_matches, Match, Pattern, SequenceMatch};

/// Largest codepoint step still counted as a sequence
pub const MAX_DELTA: i64 = 5;

/// Runs of chars whose codepoints step by the same non-zero delta of at
/// most [`MAX_DELTA`].
///
/// Two-char runs only count with a step of exactly 1.
pub fn sequence_match(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    if n < 2 {
        return matches;
    }

    let delta_at = |k: usize| password[k] as i64 - password[k - 1] as i64;
    let mut i = 0;
    let mut last_delta = delta_at(1);
    for k in 2..n {
        let delta = delta_at(k);
        if delta == last_delta {
            continue;
        }
        let j = k - 1;
        push_run(password, i, j, last_delta, &mut matches);
        i = j;
        last_delta = delta;
    }
    push_run(password, i, n - 1, last_delta, &mut matches);

    sort_matches(&mut matches);
    matches
}

fn push_run(password: &[char], i: usize, j: usize, delta: i64, matches: &mut Vec<Match>) {
    let step = delta.abs();
    if !(j - i > 1 || step == 1) || step == 0 || step > MAX_DELTA {
        return;
    }
    let run = &password[i..=j];
    let (sequence_name, sequence_space) = if run.iter().all(char::is_ascii_lowercase) {
        ("lower", 26)
    } else if run.iter().all(char::is_ascii_uppercase) {
        ("upper", 26)
    } else if run.iter().all(char::is_ascii_digit) {
        ("digits", 10)
    } else {
        // other alphabets are scored like the roman one
        ("unicode", 26)
    };
    matches.push(Match::new(
        i,
        j,
        slice_token(password, i, j),
        Pattern::Sequence(SequenceMatch {
            sequence_name,
            sequence_space,
            ascending: delta > 0,
        }),
    ));
}
