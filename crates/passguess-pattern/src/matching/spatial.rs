//! Keyboard walk recognizer

use passguess_data::{AdjacencyGraph, GraphFamily};

use super::slice_token;
use crate::types::{sort_matches, Match, Pattern, SpatialMatch};

/// Chains of at least 3 adjacent keys on any of `graphs`
pub fn spatial_match(password: &[char], graphs: &[AdjacencyGraph]) -> Vec<Match> {
    let mut matches: Vec<Match> = graphs
        .iter()
        .flat_map(|graph| graph_walks(password, graph))
        .collect();
    sort_matches(&mut matches);
    matches
}

fn graph_walks(password: &[char], graph: &AdjacencyGraph) -> Vec<Match> {
    let n = password.len();
    // keypads have no shift level
    let counts_shift = graph.family() == GraphFamily::Keyboard;
    let mut matches = Vec::new();
    let mut i = 0;
    while i + 1 < n {
        let mut j = i + 1;
        let mut last_direction = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(counts_shift && graph.is_shifted(password[i]));

        loop {
            let mut found = false;
            if j < n {
                let current = password[j];
                for (direction, slot) in graph.neighbors(password[j - 1]).iter().enumerate() {
                    let Some(position) = slot
                        .as_deref()
                        .and_then(|glyphs| glyphs.chars().position(|g| g == current))
                    else {
                        continue;
                    };
                    found = true;
                    // second glyph on a key means shift was held
                    if counts_shift && position == 1 {
                        shifted_count += 1;
                    }
                    // every walk starts with a turn
                    if last_direction != Some(direction) {
                        turns += 1;
                        last_direction = Some(direction);
                    }
                    break;
                }
            }

            if found {
                j += 1;
                continue;
            }
            // chains of 1 or 2 keys are too common to count
            if j - i > 2 {
                matches.push(Match::new(
                    i,
                    j - 1,
                    slice_token(password, i, j - 1),
                    Pattern::Spatial(SpatialMatch {
                        graph: graph.name().to_owned(),
                        family: graph.family(),
                        turns,
                        shifted_count,
                    }),
                ));
            }
            i = j;
            break;
        }
    }
    matches
}
