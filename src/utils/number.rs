/// Parses an integer-like amount such as `3 500`, `3,500` or `3.500`.
///
/// Spaces (regular and non-breaking), commas and periods are all treated as
/// group separators and dropped, so `3.500` reads as 3500, never 3.5.
/// Anything else left over means no number.
pub fn parse_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{a0}' | ' ' | ',' | '.'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
