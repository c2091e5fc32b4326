// Natural string comparison for sort-by-title / sort-by-url.
// Stands in for the host locale collation with numeric comparison enabled:
// text runs compare by code point (case-sensitive), ASCII digit runs compare
// by numeric value, so "Tab 2" sorts before "Tab 10".

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compares two strings with numeric substrings ordered by value.
///
/// Equal keys return `Ordering::Equal`; callers rely on a stable sort to
/// keep the original relative order in that case.
pub fn compare(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    match take_number(&mut left).cmp(&take_number(&mut right)) {
                        Ordering::Equal => {}
                        ordering => return ordering,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            left.next();
                            right.next();
                        }
                        ordering => return ordering,
                    }
                }
            }
        }
    }
}

/// Consumes a run of ASCII digits and returns its numeric value.
/// Saturates rather than overflowing on absurdly long runs.
fn take_number(chars: &mut Peekable<Chars>) -> u128 {
    let mut value: u128 = 0;
    while let Some(c) = chars.peek().copied() {
        let Some(digit) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(digit as u128);
        chars.next();
    }
    value
}
