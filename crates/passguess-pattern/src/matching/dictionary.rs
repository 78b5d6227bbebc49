//! Dictionary and reversed-dictionary recognizers

use passguess_data::RankedDictionary;

use super::{lowercase_char, slice_token};
use crate::types::{sort_matches, DictionaryMatch, Match, Pattern};

/// Every substring whose lowercase form is ranked in one of `dictionaries`
pub fn dictionary_match(password: &[char], dictionaries: &[&RankedDictionary]) -> Vec<Match> {
    scan(password, dictionaries, Some)
}

/// Like [`dictionary_match`], restricted to substrings that contain at least
/// one `marked` position
pub(crate) fn dictionary_match_marked(
    password: &[char],
    dictionaries: &[&RankedDictionary],
    marked: &[bool],
) -> Vec<Match> {
    // next_marked[i]: first marked position at or after i
    let mut next_marked = vec![None; password.len() + 1];
    for i in (0..password.len()).rev() {
        next_marked[i] = if marked.get(i).copied().unwrap_or(false) {
            Some(i)
        } else {
            next_marked[i + 1]
        };
    }
    scan(password, dictionaries, |i| next_marked[i])
}

/// Look up `password[i..=j]` for every `j >= first_end(i)`
fn scan(
    password: &[char],
    dictionaries: &[&RankedDictionary],
    first_end: impl Fn(usize) -> Option<usize>,
) -> Vec<Match> {
    let lower: Vec<char> = password.iter().copied().map(lowercase_char).collect();
    let n = lower.len();
    let mut matches = Vec::new();
    for dictionary in dictionaries {
        let max_len = dictionary.max_word_len();
        for i in 0..n {
            let Some(first) = first_end(i) else {
                break;
            };
            let end = n.min(i + max_len);
            if first >= end {
                continue;
            }
            let mut word: String = lower[i..first].iter().collect();
            for j in first..end {
                word.push(lower[j]);
                if let Some(rank) = dictionary.rank(&word) {
                    matches.push(Match::new(
                        i,
                        j,
                        slice_token(password, i, j),
                        Pattern::Dictionary(DictionaryMatch::new(
                            word.clone(),
                            rank,
                            dictionary.name(),
                        )),
                    ));
                }
            }
        }
    }
    sort_matches(&mut matches);
    matches
}

/// Dictionary matches of the reversed password, mapped back onto the
/// original positions
pub fn reverse_dictionary_match(
    password: &[char],
    dictionaries: &[&RankedDictionary],
) -> Vec<Match> {
    let n = password.len();
    let reversed: Vec<char> = password.iter().rev().copied().collect();
    let mut matches = dictionary_match(&reversed, dictionaries);
    for m in &mut matches {
        (m.i, m.j) = (n - 1 - m.j, n - 1 - m.i);
        m.token = m.token.chars().rev().collect();
        if let Pattern::Dictionary(dm) = &mut m.pattern {
            dm.reversed = true;
        }
    }
    sort_matches(&mut matches);
    matches
}
