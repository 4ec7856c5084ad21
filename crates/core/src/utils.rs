//! Shared numeric and string helpers used across crates.

// ── Rounding ────────────────────────────────────────────────────────

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

// ── Strings ─────────────────────────────────────────────────────────

/// Keep at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Largest char boundary `<= idx`.
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= idx`.
pub fn ceil_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.666_666), 0.67);
        assert_eq!(round2(-0.333_3), -0.33);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        // Multi-byte characters count once each
        assert_eq!(truncate_chars("€€€€", 2), "€€");
    }

    #[test]
    fn test_char_boundaries() {
        let s = "a€b"; // '€' occupies bytes 1..4
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(ceil_char_boundary(s, 2), 4);
        assert_eq!(floor_char_boundary(s, 99), s.len());
    }
}
