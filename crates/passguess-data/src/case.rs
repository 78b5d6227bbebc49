//! Case folding shared by dictionary keys and password substrings

/// Lowercase a single char, keeping it as is when its lowercase form is not
/// exactly one char. Keeps positions aligned with the original password.
pub fn lowercase_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// [`lowercase_char`] over every char of `text`.
///
/// Unlike `str::to_lowercase` this never changes the char count and ignores
/// context, so a final `Σ` folds to `σ` like any other.
pub fn fold_case(text: &str) -> String {
    text.chars().map(lowercase_char).collect()
}
