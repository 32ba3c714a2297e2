use inlinable_string::{InlinableString, StringExt};
use num_bigint::BigInt;

pub fn char_to_string(c: char) -> InlinableString {
    let mut s = InlinableString::new();
    s.push(c);
    s
}

// "[+-]?[0-9]+": assignment values take at most one sign
pub fn is_signed_literal(text: &str) -> bool {
    let digits = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// bare literal with any number of leading signs (and surrounding spaces);
// the sign chain collapses by minus parity
pub fn parse_literal(line: &str) -> Option<BigInt> {
    let text = line.trim();
    let digits = text.trim_start_matches(|c| c == '+' || c == '-');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let signs = &text[..text.len() - digits.len()];
    let value: BigInt = digits.parse().ok()?;
    if signs.matches('-').count() % 2 == 1 {
        Some(-value)
    } else {
        Some(value)
    }
}
