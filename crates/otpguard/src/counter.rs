//! Moving factor helpers
//!
//! RFC 4226 feeds the HMAC an 8-byte big-endian counter.  For TOTP that counter is the number of
//! whole periods elapsed since the Unix epoch.

use chrono::Utc;

/// Serializes `n` into the 8-byte big-endian buffer used as the HMAC message
///
/// The full `u64` range is represented exactly; there is no wraparound.
pub fn number_to_buffer(n: u64) -> [u8; 8] {
    n.to_be_bytes()
}

/// Current Unix time in whole seconds
///
/// A wall clock set before 1970 is clamped to zero rather than wrapping.
pub fn unix_now() -> u64 {
    let now = Utc::now().timestamp();
    if now < 0 {
        tracing::warn!(now, "system clock reports a pre-epoch time, clamping to 0");
        0
    } else {
        now as u64
    }
}

/// Time step containing `now`
///
/// # Arguments
/// * `now` - Unix time in seconds
/// * `period` - Length of a time step in seconds, must be non-zero
pub fn counter_at(now: u64, period: u64) -> u64 {
    now / period
}

/// Seconds left before the step containing `now` rolls over
pub fn remaining_seconds(now: u64, period: u64) -> u64 {
    period - (now % period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_big_endian() {
        assert_eq!(number_to_buffer(0), [0; 8]);
        assert_eq!(number_to_buffer(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            number_to_buffer(0x0102_0304_0506_0708),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(number_to_buffer(u64::MAX), [0xff; 8]);
    }

    #[test]
    fn rfc6238_time_steps() {
        // T values from RFC 6238 appendix B
        assert_eq!(counter_at(59, 30), 0x1);
        assert_eq!(counter_at(1111111109, 30), 0x23523EC);
        assert_eq!(counter_at(1111111111, 30), 0x23523ED);
        assert_eq!(counter_at(1234567890, 30), 0x273EF07);
        assert_eq!(counter_at(2000000000, 30), 0x3F940AA);
        assert_eq!(counter_at(20000000000, 30), 0x27BC86AA);
    }

    #[test]
    fn counter_is_exact_near_u64_max() {
        assert_eq!(counter_at(u64::MAX, 1), u64::MAX);
        assert_eq!(counter_at(u64::MAX, 30), u64::MAX / 30);
    }

    #[test]
    fn remaining_within_step() {
        assert_eq!(remaining_seconds(0, 30), 30);
        assert_eq!(remaining_seconds(29, 30), 1);
        assert_eq!(remaining_seconds(30, 30), 30);
        assert_eq!(remaining_seconds(59, 30), 1);
    }

    #[test]
    fn clock_is_after_epoch() {
        // 2020-01-01T00:00:00Z
        assert!(unix_now() > 1_577_836_800);
    }
}
