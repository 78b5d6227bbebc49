//! Pattern recognizers
//!
//! Every recognizer works on the password as a slice of chars and reports
//! matches sorted on `(i, j)`.

pub mod date;
pub mod dictionary;
pub mod leet;
pub mod regex;
pub mod repeat;
pub mod sequence;
pub mod spatial;

pub(crate) use passguess_data::lowercase_char;

pub(crate) fn slice_token(chars: &[char], i: usize, j: usize) -> String {
    chars[i..=j].iter().collect()
}
