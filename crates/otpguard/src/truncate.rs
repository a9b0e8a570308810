//! RFC 4226 Dynamic Truncation

/// Reduces an HMAC digest to an integer in `0..10^digits`
///
/// # Arguments
/// * `mac` - HMAC output; at least 20 bytes for every supported algorithm
/// * `digits` - number of decimal digits in the resulting code
pub fn truncate(mac: &[u8], digits: u32) -> u64 {
    // NOTE: the offset is a nibble (max 15), so offset + 3 is at most 18 and always inside even a
    // 20-byte SHA-1 digest.
    let offset = usize::from(mac[mac.len() - 1] & 0xf);
    let bin_code: u32 = (u32::from(mac[offset] & 0x7f) << 24)
        | (u32::from(mac[offset + 1]) << 16)
        | (u32::from(mac[offset + 2]) << 8)
        | u32::from(mac[offset + 3]);

    u64::from(bin_code) % 10_u64.pow(digits)
}

/// Left-pads `code` with zeros to exactly `digits` characters
pub fn pad(code: u64, digits: u32) -> String {
    format!("{:0width$}", code, width = digits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4226 section 5.4
    const SAMPLE: [u8; 20] = [
        0x1f, 0x86, 0x98, 0x69, 0x0e, 0x02, 0xca, 0x16, 0x61, 0x85, 0x50, 0xef, 0x7f, 0x19, 0xda,
        0x8e, 0x94, 0x5b, 0x55, 0x5a,
    ];

    #[test]
    fn rfc4226_example() {
        assert_eq!(truncate(&SAMPLE, 6), 872921);
    }

    #[test]
    fn ten_digits_keeps_full_value() {
        // 0x50ef7f19 is below 10^10, so nothing is reduced away
        assert_eq!(truncate(&SAMPLE, 10), 0x50ef7f19);
    }

    #[test]
    fn sign_bit_is_cleared() {
        let mut mac = [0xffu8; 20];
        mac[19] = 0xf0; // offset 0
        assert_eq!(truncate(&mac, 10), 0x7fff_ffff);
    }

    #[test]
    fn maximum_offset_stays_in_bounds() {
        for len in [20, 32, 64] {
            let mut mac = vec![0u8; len];
            mac[len - 1] = 0x0f;
            mac[15..19].copy_from_slice(&[0, 0, 0x30, 0x39]);
            assert_eq!(truncate(&mac, 6), 12345);
        }
    }

    #[test]
    fn pads_to_width() {
        assert_eq!(pad(0, 6), "000000");
        assert_eq!(pad(12345, 6), "012345");
        assert_eq!(pad(7081804, 8), "07081804");
        assert_eq!(pad(2147483647, 10), "2147483647");
    }
}
