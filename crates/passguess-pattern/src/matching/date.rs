//! Calendar date recognizer
//!
//! A date is three integers, one of them a 2 or 4 digit year at either end,
//! a month from 1 to 12 and a day from 1 to 31, written either as 4 to 8
//! digits (`1191`, `11111991`) or with two identical separators (`1.1.91`,
//! `11/11/1991`). Day and month ranges are not checked against the calendar.

use once_cell::sync::Lazy;
use regex::Regex;

use super::slice_token;
use crate::types::{sort_matches, DateMatch, Match, Pattern};

pub const DATE_MIN_YEAR: i32 = 1000;
pub const DATE_MAX_YEAR: i32 = 2050;

/// Cut points `(k, l)` for unseparated tokens, by token length
const DATE_SPLITS: [&[(usize, usize)]; 5] = [
    &[(1, 2), (2, 3)],
    &[(1, 3), (2, 3)],
    &[(1, 2), (2, 4), (4, 5)],
    &[(1, 3), (2, 3), (4, 5), (4, 6)],
    &[(2, 4), (4, 6)],
];

static SEPARATED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,4})([\s/\\_.-])([0-9]{1,2})([\s/\\_.-])([0-9]{1,4})$")
        .expect("valid separated date regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dmy {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Every date in `password`, minus those lying inside another date.
///
/// When an unseparated token splits into several valid dates, the one whose
/// year is closest to `reference_year` is kept.
pub fn date_match(password: &[char], reference_year: i32) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();

    for i in 0..n.saturating_sub(3) {
        for j in (i + 3)..(i + 8).min(n) {
            let token = &password[i..=j];
            if !token.iter().all(char::is_ascii_digit) {
                continue;
            }
            if let Some(dmy) = best_split(token, reference_year) {
                matches.push(date(password, i, j, dmy, None));
            }
        }
    }

    for i in 0..n.saturating_sub(5) {
        for j in (i + 5)..(i + 10).min(n) {
            let token = slice_token(password, i, j);
            let Some(caps) = SEPARATED_DATE.captures(&token) else {
                continue;
            };
            if caps[2] != caps[4] {
                continue;
            }
            let ints = [parse_int(&caps[1]), parse_int(&caps[3]), parse_int(&caps[5])];
            if let Some(dmy) = map_ints_to_dmy(ints) {
                matches.push(date(password, i, j, dmy, caps[2].chars().next()));
            }
        }
    }

    // '2015_06_04' also yields '15_06_04', '5_06_04', ..., keep only the widest
    let mut kept: Vec<Match> = matches
        .iter()
        .enumerate()
        .filter(|(index, m)| {
            !matches
                .iter()
                .enumerate()
                .any(|(other_index, other)| other_index != *index && other.i <= m.i && other.j >= m.j)
        })
        .map(|(_, m)| m.clone())
        .collect();
    sort_matches(&mut kept);
    kept
}

fn date(password: &[char], i: usize, j: usize, dmy: Dmy, separator: Option<char>) -> Match {
    Match::new(
        i,
        j,
        slice_token(password, i, j),
        Pattern::Date(DateMatch {
            year: dmy.year,
            month: dmy.month,
            day: dmy.day,
            separator,
        }),
    )
}

fn parse_int(digits: &str) -> i32 {
    digits
        .bytes()
        .fold(0, |value, digit| value * 10 + i32::from(digit - b'0'))
}

fn best_split(token: &[char], reference_year: i32) -> Option<Dmy> {
    let splits = DATE_SPLITS.get(token.len().checked_sub(4)?)?;
    let digits: String = token.iter().collect();
    let mut best: Option<Dmy> = None;
    for &(k, l) in splits.iter() {
        let ints = [
            parse_int(&digits[..k]),
            parse_int(&digits[k..l]),
            parse_int(&digits[l..]),
        ];
        let Some(candidate) = map_ints_to_dmy(ints) else {
            continue;
        };
        let closer = best.map_or(true, |b| {
            (candidate.year - reference_year).abs() < (b.year - reference_year).abs()
        });
        if closer {
            best = Some(candidate);
        }
    }
    best
}

/// Read three integers as a day, month and year in any plausible order
pub(crate) fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    // years never sit in the middle
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }
    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        over_31 += usize::from(int > 31);
        over_12 += usize::from(int > 12);
        under_1 += usize::from(int <= 0);
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let year_splits = [(ints[2], [ints[0], ints[1]]), (ints[0], [ints[1], ints[2]])];

    // a four digit year has to leave a valid day and month
    for &(year, rest) in &year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            let (day, month) = map_ints_to_dm(rest)?;
            return Some(Dmy { year, month, day });
        }
    }

    year_splits.iter().find_map(|&(year, rest)| {
        map_ints_to_dm(rest).map(|(day, month)| Dmy {
            year: two_to_four_digit_year(year),
            month,
            day,
        })
    })
}

/// `(day, month)` from two integers, trying the given order first
pub(crate) fn map_ints_to_dm(ints: [i32; 2]) -> Option<(u32, u32)> {
    [(ints[0], ints[1]), (ints[1], ints[0])]
        .into_iter()
        .find(|&(d, m)| (1..=31).contains(&d) && (1..=12).contains(&m))
        .map(|(d, m)| (d as u32, m as u32))
}

pub(crate) fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2020;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dates(password: &str) -> Vec<(usize, usize, i32, u32, u32, Option<char>)> {
        date_match(&chars(password), YEAR)
            .into_iter()
            .map(|m| match m.pattern {
                Pattern::Date(dm) => (m.i, m.j, dm.year, dm.month, dm.day, dm.separator),
                other => panic!("unexpected {}", other.name()),
            })
            .collect()
    }

    #[test]
    fn test_two_to_four_digit_year() {
        assert_eq!(two_to_four_digit_year(87), 1987);
        assert_eq!(two_to_four_digit_year(51), 1951);
        assert_eq!(two_to_four_digit_year(50), 2050);
        assert_eq!(two_to_four_digit_year(15), 2015);
        assert_eq!(two_to_four_digit_year(0), 2000);
        assert_eq!(two_to_four_digit_year(1991), 1991);
    }

    #[test]
    fn test_map_ints_to_dmy() {
        let dmy = |year, month, day| Some(Dmy { year, month, day });
        assert_eq!(map_ints_to_dmy([13, 2, 1921]), dmy(1921, 2, 13));
        assert_eq!(map_ints_to_dmy([2015, 6, 4]), dmy(2015, 4, 6));
        assert_eq!(map_ints_to_dmy([1, 1, 91]), dmy(1991, 1, 1));
        assert_eq!(map_ints_to_dmy([13, 13, 13]), None);
        assert_eq!(map_ints_to_dmy([1, 0, 1]), None);
        assert_eq!(map_ints_to_dmy([1, 32, 1]), None);
        assert_eq!(map_ints_to_dmy([500, 1, 1]), None);
        assert_eq!(map_ints_to_dmy([2051, 1, 1]), None);
        // a four digit year that leaves no valid day and month
        assert_eq!(map_ints_to_dmy([1321, 13, 13]), None);
    }

    #[test]
    fn test_separators() {
        for separator in ["", " ", "-", "/", "\\", "_", "."] {
            let password = format!("13{separator}2{separator}1921");
            let n = password.chars().count();
            assert_eq!(
                dates(&password),
                vec![(0, n - 1, 1921, 2, 13, separator.chars().next())],
                "{password:?}"
            );
        }
    }

    #[test]
    fn test_mixed_separators_are_rejected() {
        // only the unseparated '1988' survives
        assert_eq!(dates("12/3-1988"), vec![(5, 8, 2008, 8, 19, None)]);
    }

    #[test]
    fn test_date_orders() {
        let cases = [
            ("8/8/88", 1988, 8, 8),
            ("88/8/8", 1988, 8, 8),
            ("1/2/91", 1991, 2, 1),
            ("91/2/1", 1991, 1, 2),
            ("2015_06_04", 2015, 4, 6),
        ];
        for (password, year, month, day) in cases {
            let found = dates(password);
            assert_eq!(found.len(), 1, "{password}");
            let (i, j, y, m, d, _) = found[0];
            assert_eq!((i, j), (0, password.len() - 1), "{password}");
            assert_eq!((y, m, d), (year, month, day), "{password}");
        }
    }

    #[test]
    fn test_closest_year_wins() {
        assert_eq!(dates("111504"), vec![(0, 5, 2004, 11, 15, None)]);
    }

    #[test]
    fn test_surrounded_dates() {
        for (prefix, suffix) in [("a", "!"), ("abc", "xyz")] {
            let password = format!("{prefix}1/1/91{suffix}");
            let i = prefix.len();
            assert_eq!(dates(&password), vec![(i, i + 5, 1991, 1, 1, Some('/'))]);
        }
    }

    #[test]
    fn test_overlapping_dates() {
        let found = dates("12/20/1991.12.20");
        assert!(found.contains(&(0, 9, 1991, 12, 20, Some('/'))));
        assert!(found.contains(&(6, 15, 1991, 12, 20, Some('.'))));
    }

    #[test]
    fn test_submatches_are_dropped() {
        // '13/13/1' and '3/13/13' are dates, the whole token is not
        let found = dates("13/13/13");
        assert!(!found.is_empty());
        assert!(found.iter().all(|d| (d.0, d.1) != (0, 7)));
        let found = dates("2015_06_04");
        assert_eq!(found, vec![(0, 9, 2015, 4, 6, Some('_'))]);
    }
}
