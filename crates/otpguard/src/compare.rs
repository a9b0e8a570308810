//! Timing-safe string comparison

/// Returns true if `a` and `b` hold the same bytes
///
/// Equal-length inputs are compared in full by accumulating the XOR of every byte pair, so the
/// time taken doesn't depend on where the first difference is.  Inputs of different length return
/// `false` immediately, which reveals that the lengths differ (and nothing else).
pub fn equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings() {
        assert!(equal("abc", "abc"));
        assert!(equal("", ""));
        assert!(equal("287082", "287082"));
    }

    #[test]
    fn differing_strings() {
        assert!(!equal("abc", "abd"));
        assert!(!equal("abc", "xbc"));
        assert!(!equal("287082", "287083"));
    }

    #[test]
    fn differing_lengths() {
        assert!(!equal("abc", "ab"));
        assert!(!equal("", "a"));
    }
}
