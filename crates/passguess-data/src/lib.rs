//! PassGuess Data Assets
//!
//! Frequency dictionaries, keyboard adjacency graphs and the leet table
//! consumed by the pattern recognizers.

mod adjacency;
mod case;
mod error;
mod frequency;
mod leet;

pub use adjacency::{
    builtin_graphs, load_adjacency_graphs, AdjacencyGraph, GraphFamily, GraphStats,
    DVORAK_LAYOUT, KEYPAD_LAYOUT, MAC_KEYPAD_LAYOUT, QWERTY_LAYOUT,
};
pub use case::{fold_case, lowercase_char};
pub use error::DataError;
pub use frequency::{builtin_dictionaries, load_frequency_lists, RankedDictionary};
pub use leet::{default_leet_table, LeetTable};
