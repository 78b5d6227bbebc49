//! Dictionary recognizer with leet substitutions undone

use std::collections::{BTreeMap, BTreeSet, HashSet};

use passguess_data::{LeetTable, RankedDictionary};

use super::dictionary::dictionary_match_marked;
use super::lowercase_char;
use crate::types::{sort_matches, Match, Pattern};

/// Prune `table` to the glyphs that occur in `password`, keeping table order
pub fn relevant_l33t_subtable(password: &[char], table: &LeetTable) -> LeetTable {
    let present: HashSet<char> = password.iter().copied().collect();
    table
        .iter()
        .filter_map(|(letter, glyphs)| {
            let relevant: Vec<char> = glyphs.iter().copied().filter(|g| present.contains(g)).collect();
            (!relevant.is_empty()).then(|| (*letter, relevant))
        })
        .collect()
}

/// Every consistent glyph -> letter assignment `table` allows.
///
/// A glyph listed under several letters (`1` for `i` and `l`) yields one
/// assignment per letter. An empty table yields one empty assignment.
pub fn enumerate_l33t_subs(table: &LeetTable) -> Vec<BTreeMap<char, char>> {
    let mut subs: Vec<Vec<(char, char)>> = vec![Vec::new()];
    for (letter, glyphs) in table {
        let mut next = Vec::new();
        for &glyph in glyphs {
            for sub in &subs {
                match sub.iter().position(|&(g, _)| g == glyph) {
                    None => {
                        let mut extended = sub.clone();
                        extended.push((glyph, *letter));
                        next.push(extended);
                    }
                    Some(dup) => {
                        let mut alternative = sub.clone();
                        alternative.remove(dup);
                        alternative.push((glyph, *letter));
                        next.push(sub.clone());
                        next.push(alternative);
                    }
                }
            }
        }
        subs = dedup_subs(next);
    }
    subs.into_iter().map(|sub| sub.into_iter().collect()).collect()
}

fn dedup_subs(subs: Vec<Vec<(char, char)>>) -> Vec<Vec<(char, char)>> {
    let mut seen = BTreeSet::new();
    subs.into_iter()
        .filter(|sub| {
            let mut label = sub.clone();
            label.sort_unstable();
            seen.insert(label)
        })
        .collect()
}

/// Dictionary matches that only appear once leet glyphs are translated back.
///
/// Tokens without a substitution and single-char tokens are dropped.
pub fn l33t_match(
    password: &[char],
    dictionaries: &[&RankedDictionary],
    table: &LeetTable,
) -> Vec<Match> {
    let mut matches = Vec::new();
    for sub in enumerate_l33t_subs(&relevant_l33t_subtable(password, table)) {
        if sub.is_empty() {
            break;
        }
        let subbed: Vec<char> = password
            .iter()
            .map(|c| sub.get(c).copied().unwrap_or(*c))
            .collect();
        // a window without a substituted glyph is already a plain dictionary match
        let marked: Vec<bool> = password.iter().map(|c| sub.contains_key(c)).collect();
        for mut m in dictionary_match_marked(&subbed, dictionaries, &marked) {
            let token = &password[m.i..=m.j];
            let Pattern::Dictionary(dm) = &mut m.pattern else {
                continue;
            };
            let lowered: String = token.iter().copied().map(lowercase_char).collect();
            if lowered == dm.matched_word {
                continue;
            }
            let used: BTreeMap<char, char> = sub
                .iter()
                .filter(|(glyph, _)| token.contains(glyph))
                .map(|(&glyph, &letter)| (glyph, letter))
                .collect();
            dm.l33t = true;
            dm.sub_display = used
                .iter()
                .map(|(glyph, letter)| format!("{glyph} -> {letter}"))
                .collect::<Vec<_>>()
                .join(", ");
            dm.sub = used;
            m.token = token.iter().collect();
            if m.span() > 1 {
                matches.push(m);
            }
        }
    }
    sort_matches(&mut matches);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn table() -> LeetTable {
        vec![
            ('a', vec!['4', '@']),
            ('c', vec!['(', '{', '[', '<']),
            ('g', vec!['6', '9']),
            ('o', vec!['0']),
        ]
    }

    fn sub(pairs: &[(char, char)]) -> BTreeMap<char, char> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_relevant_subtable() {
        assert!(relevant_l33t_subtable(&chars(""), &table()).is_empty());
        assert!(relevant_l33t_subtable(&chars("abcdefgo123578!#$&*)]}>"), &table()).is_empty());
        assert_eq!(
            relevant_l33t_subtable(&chars("4"), &table()),
            vec![('a', vec!['4'])]
        );
        assert_eq!(
            relevant_l33t_subtable(&chars("4@"), &table()),
            vec![('a', vec!['4', '@'])]
        );
        assert_eq!(
            relevant_l33t_subtable(&chars("4({60"), &table()),
            vec![
                ('a', vec!['4']),
                ('c', vec!['(', '{']),
                ('g', vec!['6']),
                ('o', vec!['0']),
            ]
        );
    }

    #[test]
    fn test_enumerate_subs() {
        assert_eq!(enumerate_l33t_subs(&Vec::new()), vec![BTreeMap::new()]);
        assert_eq!(
            enumerate_l33t_subs(&vec![('a', vec!['@'])]),
            vec![sub(&[('@', 'a')])]
        );
        assert_eq!(
            enumerate_l33t_subs(&vec![('a', vec!['@', '4'])]),
            vec![sub(&[('@', 'a')]), sub(&[('4', 'a')])]
        );
        assert_eq!(
            enumerate_l33t_subs(&vec![('a', vec!['@', '4']), ('c', vec!['('])]),
            vec![sub(&[('@', 'a'), ('(', 'c')]), sub(&[('4', 'a'), ('(', 'c')])]
        );
    }

    #[test]
    fn test_enumerate_subs_shared_glyph() {
        let shared = vec![('a', vec!['@']), ('i', vec!['1']), ('l', vec!['1'])];
        assert_eq!(
            enumerate_l33t_subs(&shared),
            vec![sub(&[('@', 'a'), ('1', 'i')]), sub(&[('@', 'a'), ('1', 'l')])]
        );
    }

    fn dicts() -> (RankedDictionary, RankedDictionary) {
        (
            RankedDictionary::from_ordered("words", ["aac", "password", "paassword", "asdf0"]),
            RankedDictionary::from_ordered("words2", ["cgo"]),
        )
    }

    #[test]
    fn test_no_subs_no_matches() {
        let (w1, w2) = dicts();
        assert!(l33t_match(&chars(""), &[&w1, &w2], &table()).is_empty());
        assert!(l33t_match(&chars("password"), &[&w1, &w2], &table()).is_empty());
    }

    #[test]
    fn test_matches_common_substitutions() {
        let (w1, w2) = dicts();
        let cases = [
            ("p4ssword", "password", "words", 2, sub(&[('4', 'a')])),
            ("p@ssw0rd", "password", "words", 2, sub(&[('@', 'a'), ('0', 'o')])),
            ("aSdfO{G0asDfO", "cgo", "words2", 1, sub(&[('{', 'c'), ('0', 'o')])),
        ];
        for (password, word, dictionary, rank, expected_sub) in cases {
            let matches = l33t_match(&chars(password), &[&w1, &w2], &table());
            let hit = matches
                .iter()
                .find_map(|m| match &m.pattern {
                    Pattern::Dictionary(dm) if dm.matched_word == word => Some((m, dm)),
                    _ => None,
                })
                .unwrap_or_else(|| panic!("no match for {password}"));
            let (m, dm) = hit;
            assert!(dm.l33t);
            assert_eq!(dm.dictionary_name, dictionary);
            assert_eq!(dm.rank, rank);
            assert_eq!(dm.sub, expected_sub);
            let token: String = chars(password)[m.i..=m.j].iter().collect();
            assert_eq!(m.token, token);
        }
    }

    #[test]
    fn test_sub_display() {
        let (w1, w2) = dicts();
        let matches = l33t_match(&chars("p@ssw0rd"), &[&w1, &w2], &table());
        let Pattern::Dictionary(dm) = &matches[0].pattern else {
            panic!("expected dictionary match");
        };
        assert_eq!(dm.sub_display, "0 -> o, @ -> a");
    }

    #[test]
    fn test_doesnt_match_single_char_tokens() {
        let dict = RankedDictionary::from_ordered("words", ["a", "o"]);
        assert!(l33t_match(&chars("4 0"), &[&dict], &table()).is_empty());
    }

    #[test]
    fn test_long_glyph_runs() {
        let (w1, w2) = dicts();
        let password = format!("{}p4ssword{}", "4@(0".repeat(40), "{6".repeat(40));
        let matches = l33t_match(&chars(&password), &[&w1, &w2], &table());
        assert!(matches.iter().any(|m| m.i == 160 && m.token == "p4ssword"));
        for m in &matches {
            let Pattern::Dictionary(dm) = &m.pattern else {
                panic!("expected dictionary match");
            };
            assert!(!dm.sub.is_empty());
            assert!(dm.sub.keys().all(|glyph| m.token.contains(*glyph)));
        }
    }

    #[test]
    fn test_doesnt_mix_substitutions_for_one_letter() {
        let (w1, w2) = dicts();
        // '4' and '@' never stand in for 'a' in the same token
        assert!(l33t_match(&chars("p4@ssword"), &[&w1, &w2], &table()).is_empty());
    }
}
