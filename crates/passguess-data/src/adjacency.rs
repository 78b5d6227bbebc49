//! Keyboard and keypad adjacency graphs
//!
//! A graph maps every key glyph to a fixed-length list of neighbor slots, one
//! slot per compass direction. A slot holds the glyphs printed on the
//! neighboring key: the unshifted glyph first, then the shifted one (if any).

use std::collections::{HashMap, HashSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::DataError;

pub const QWERTY_LAYOUT: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?
"#;

pub const DVORAK_LAYOUT: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '" ,< .> pP yY fF gG cC rR lL /? =+ \|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ
"#;

pub const KEYPAD_LAYOUT: &str = r#"
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
"#;

pub const MAC_KEYPAD_LAYOUT: &str = r#"
  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 .
"#;

/// Neighbor directions for staggered keyboards: left, top-left, top-right,
/// right, bottom-right, bottom-left.
const SLANTED_DIRECTIONS: [(i64, i64); 6] = [(-1, 0), (0, -1), (1, -1), (1, 0), (0, 1), (-1, 1)];

/// Neighbor directions for grid keypads, clockwise from the left.
const ALIGNED_DIRECTIONS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Broad class of a graph, which decides how spatial patterns are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFamily {
    /// Staggered typing keyboards (qwerty, dvorak). Shift state is tracked.
    Keyboard,
    /// Numeric keypads laid out on a grid
    Keypad,
}

impl GraphFamily {
    /// Number of neighbor slots every key carries
    pub fn slot_count(self) -> usize {
        match self {
            GraphFamily::Keyboard => SLANTED_DIRECTIONS.len(),
            GraphFamily::Keypad => ALIGNED_DIRECTIONS.len(),
        }
    }

    fn from_slot_count(count: usize) -> Option<Self> {
        match count {
            6 => Some(GraphFamily::Keyboard),
            8 => Some(GraphFamily::Keypad),
            _ => None,
        }
    }
}

/// Summary numbers used when estimating spatial pattern guesses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of keys a pattern can start on
    pub starting_positions: usize,
    /// Mean count of non-empty neighbor slots per key
    pub average_degree: f64,
}

/// A named adjacency graph
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph {
    name: String,
    family: GraphFamily,
    neighbors: HashMap<char, Vec<Option<String>>>,
    shifted: HashSet<char>,
}

impl AdjacencyGraph {
    /// Build a graph from a layout diagram.
    ///
    /// Keys are whitespace separated tokens of equal length. On slanted
    /// layouts each row is indented one column further than the row above it.
    pub fn from_layout(
        name: impl Into<String>,
        layout: &str,
        slanted: bool,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let token_len = layout
            .split_whitespace()
            .next()
            .map(|token| token.chars().count())
            .ok_or_else(|| DataError::EmptyGraph(name.clone()))?;
        let x_unit = token_len + 1;

        let mut positions: HashMap<(i64, i64), &str> = HashMap::new();
        for (y, line) in layout.split('\n').enumerate() {
            let slant = if slanted { y.saturating_sub(1) } else { 0 };
            for (column, token) in tokens_with_columns(line) {
                if token.chars().count() != token_len
                    || column < slant
                    || (column - slant) % x_unit != 0
                {
                    return Err(DataError::MisalignedLayout {
                        graph: name,
                        token: token.to_string(),
                    });
                }
                let x = ((column - slant) / x_unit) as i64;
                positions.insert((x, y as i64), token);
            }
        }

        let directions: &[(i64, i64)] = if slanted {
            &SLANTED_DIRECTIONS
        } else {
            &ALIGNED_DIRECTIONS
        };

        let mut neighbors = HashMap::new();
        for (&(x, y), token) in &positions {
            let slots: Vec<Option<String>> = directions
                .iter()
                .map(|(dx, dy)| positions.get(&(x + dx, y + dy)).map(|t| t.to_string()))
                .collect();
            for key in token.chars() {
                neighbors.insert(key, slots.clone());
            }
        }

        Self::from_neighbors(name, neighbors)
    }

    /// Build a graph from an explicit key -> slots mapping.
    ///
    /// The family is inferred from the slot count (6 keyboard, 8 keypad).
    pub fn from_neighbors(
        name: impl Into<String>,
        neighbors: HashMap<char, Vec<Option<String>>>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let expected = neighbors
            .values()
            .next()
            .map(Vec::len)
            .ok_or_else(|| DataError::EmptyGraph(name.clone()))?;

        for (&key, slots) in &neighbors {
            if slots.len() != expected {
                return Err(DataError::SlotCountMismatch {
                    graph: name,
                    key,
                    found: slots.len(),
                    expected,
                });
            }
        }

        let family = GraphFamily::from_slot_count(expected)
            .ok_or_else(|| DataError::UnsupportedSlotCount(name.clone(), expected))?;

        let shifted = neighbors
            .values()
            .flatten()
            .flatten()
            .filter_map(|slot| slot.chars().nth(1))
            .collect();

        Ok(Self {
            name,
            family,
            neighbors,
            shifted,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> GraphFamily {
        self.family
    }

    /// Neighbor slots of `key`, empty when the key is not on this graph
    pub fn neighbors(&self, key: char) -> &[Option<String>] {
        self.neighbors.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `glyph` is typed with shift held on this graph
    pub fn is_shifted(&self, glyph: char) -> bool {
        self.shifted.contains(&glyph)
    }

    /// Number of keys (glyphs) on the graph
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let starting_positions = self.neighbors.len();
        if starting_positions == 0 {
            return GraphStats::default();
        }
        let degree_sum: usize = self
            .neighbors
            .values()
            .map(|slots| slots.iter().filter(|slot| slot.is_some()).count())
            .sum();
        GraphStats {
            starting_positions,
            average_degree: degree_sum as f64 / starting_positions as f64,
        }
    }
}

/// Split a layout row into `(char column, token)` pairs
fn tokens_with_columns(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    for (column, (offset, c)) in line.char_indices().enumerate() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some((column, offset)),
            (true, Some((token_column, from))) => {
                tokens.push((token_column, &line[from..offset]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some((token_column, from)) = start {
        tokens.push((token_column, &line[from..]));
    }
    tokens
}

/// The four built-in graphs: qwerty, dvorak, keypad, mac_keypad
pub fn builtin_graphs() -> Result<Vec<AdjacencyGraph>, DataError> {
    Ok(vec![
        AdjacencyGraph::from_layout("qwerty", QWERTY_LAYOUT, true)?,
        AdjacencyGraph::from_layout("dvorak", DVORAK_LAYOUT, true)?,
        AdjacencyGraph::from_layout("keypad", KEYPAD_LAYOUT, false)?,
        AdjacencyGraph::from_layout("mac_keypad", MAC_KEYPAD_LAYOUT, false)?,
    ])
}

/// Load graphs from JSON shaped like `{"qwerty": {"a": ["`~", null, ...]}}`.
///
/// Graphs come back in document order.
pub fn load_adjacency_graphs<R: Read>(reader: R) -> Result<Vec<AdjacencyGraph>, DataError> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .map(|(name, value)| {
            let keys: HashMap<String, Vec<Option<String>>> = serde_json::from_value(value)?;
            let mut neighbors = HashMap::with_capacity(keys.len());
            for (key, slots) in keys {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(glyph), None) => {
                        neighbors.insert(glyph, slots);
                    }
                    _ => return Err(DataError::InvalidKey { graph: name, key }),
                }
            }
            AdjacencyGraph::from_neighbors(name, neighbors)
        })
        .collect()
}
