//! Leet substitution table

/// Ordered letter -> substitute glyphs table
pub type LeetTable = Vec<(char, Vec<char>)>;

const DEFAULT_TABLE: [(char, &str); 12] = [
    ('a', "4@"),
    ('b', "8"),
    ('c', "({[<"),
    ('e', "3"),
    ('g', "69"),
    ('i', "1!|"),
    ('l', "1|7"),
    ('o', "0"),
    ('s', "$5"),
    ('t', "+7"),
    ('x', "%"),
    ('z', "2"),
];

/// The common substitutions (`a -> 4 @`, `e -> 3`, ...)
pub fn default_leet_table() -> LeetTable {
    DEFAULT_TABLE
        .iter()
        .map(|(letter, glyphs)| (*letter, glyphs.chars().collect()))
        .collect()
}
