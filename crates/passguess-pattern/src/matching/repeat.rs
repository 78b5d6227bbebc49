//! Repeated unit recognizer (`aaa`, `abcabcabc`)

use super::slice_token;
use crate::matcher::Session;
use crate::types::{sort_matches, Match, Pattern, RepeatMatch};

/// A unit repeated back to back, starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeat {
    start: usize,
    unit: usize,
    count: usize,
}

impl Repeat {
    fn len(&self) -> usize {
        self.unit * self.count
    }
}

fn repeats_at(chars: &[char], start: usize, unit: usize) -> bool {
    start + 2 * unit <= chars.len() && chars[start..start + unit] == chars[start + unit..start + 2 * unit]
}

/// Leftmost repeat at or after `from`.
///
/// At that position, `longest_unit` picks the longest unit that repeats,
/// otherwise the shortest. The unit is then extended over as many copies as
/// follow.
fn find_repeat(chars: &[char], from: usize, longest_unit: bool) -> Option<Repeat> {
    let n = chars.len();
    for start in from..n {
        let max_unit = (n - start) / 2;
        let unit = if longest_unit {
            (1..=max_unit).rev().find(|&u| repeats_at(chars, start, u))
        } else {
            (1..=max_unit).find(|&u| repeats_at(chars, start, u))
        };
        let Some(unit) = unit else {
            continue;
        };
        let mut count = 2;
        while start + (count + 1) * unit <= n
            && chars[start..start + unit] == chars[start + count * unit..start + (count + 1) * unit]
        {
            count += 1;
        }
        return Some(Repeat { start, unit, count });
    }
    None
}

/// Shortest unit that tiles all of `token`
fn minimal_unit(token: &[char]) -> usize {
    let n = token.len();
    (1..=n)
        .find(|&u| n % u == 0 && (u..n).all(|k| token[k] == token[k - u]))
        .unwrap_or(n)
}

/// Back to back repeats of a unit, each scored through the unit's own
/// optimal match sequence
pub fn repeat_match(password: &[char], session: &Session<'_>) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut from = 0;
    while from < password.len() {
        let (Some(greedy), Some(lazy)) = (
            find_repeat(password, from, true),
            find_repeat(password, from, false),
        ) else {
            break;
        };

        // greedy wins on 'aabaab', lazy on 'aaaaa'
        let (found, unit) = if greedy.len() > lazy.len() {
            let span = &password[greedy.start..greedy.start + greedy.len()];
            (greedy, minimal_unit(span))
        } else {
            (lazy, lazy.unit)
        };

        let i = found.start;
        let j = i + found.len() - 1;
        let base_token = slice_token(password, i, i + unit - 1);
        let base_chars: Vec<char> = base_token.chars().collect();
        let base = session.most_guessable_chars(&base_token, &base_chars);
        matches.push(Match::new(
            i,
            j,
            slice_token(password, i, j),
            Pattern::Repeat(RepeatMatch {
                base_token,
                base_guesses: base.guesses,
                base_matches: base.sequence,
                repeat_count: found.len() / unit,
            }),
        ));
        from = j + 1;
    }
    sort_matches(&mut matches);
    matches
}
