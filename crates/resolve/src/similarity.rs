//! Token-order-insensitive name similarity.

/// Fuzzy similarity in `[0, 100]` between two normalized company names.
///
/// Token-sort variant: whitespace tokens are sorted and rejoined before
/// scoring, so "widgets acme" and "acme widgets" compare as equal. The
/// underlying edit-distance score comes from `strsim`.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = sort_tokens(a);
    let b = sort_tokens(b);
    if a == b {
        return 100;
    }
    (strsim::normalized_levenshtein(&a, &b) * 100.0).round() as u8
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
