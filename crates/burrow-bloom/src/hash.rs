//! The hash families behind filter bit positions.
//!
//! The set is fixed and versioned by [`HASH_SCHEME_VERSION`]. Bits set under
//! one version mean nothing under another, so any change to these functions
//! (or to how positions are derived from them) must bump the version.

use sha2::{Digest, Sha256};

/// Version of the hash scheme used to place bits.
pub const HASH_SCHEME_VERSION: u32 = 2;

const MIX_SEED: u64 = 0x517c_c1b7_2722_0a95;

/// Initial CRC state for the high half of [`crc64_wide`].
const CRC_HIGH_SEED: u32 = 0x9e37_79b9;

/// Seeded multiply/rotate mixing hash over the input bytes.
pub fn mix64(data: &[u8]) -> u64 {
    let mut hash = MIX_SEED ^ data.len() as u64;
    for &byte in data {
        hash ^= (byte as u64).wrapping_mul(0x1000_0000_01b3);
        hash = hash.rotate_left(13).wrapping_mul(0xff51_afd7_ed55_8ccd);
    }
    hash ^ (hash >> 33)
}

/// Two CRC-32 (IEEE) checksums joined into 64 bits.
///
/// The low half is the plain checksum, the high half restarts from
/// `CRC_HIGH_SEED`. Positions must be able to reach filters larger than
/// `2^32` bits.
pub fn crc64_wide(data: &[u8]) -> u64 {
    let mut high = crc32fast::Hasher::new_with_initial(CRC_HIGH_SEED);
    high.update(data);
    (u64::from(high.finalize()) << 32) | u64::from(crc32fast::hash(data))
}

/// First 8 bytes of the SHA-256 digest, big-endian.
pub fn sha256_prefix(data: &[u8]) -> u64 {
    let digest = Sha256::digest(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Yields `count` bit positions in `[0, bit_count)` for `data`.
///
/// The first three positions come straight from the three families. Further
/// positions use enhanced triple hashing `h1 + i*h2 + i^2*h3`.
pub(crate) fn positions(data: &[u8], count: u32, bit_count: u64) -> impl Iterator<Item = u64> {
    let families = [mix64(data), crc64_wide(data), sha256_prefix(data)];
    (0..u64::from(count)).map(move |i| {
        let raw = match i {
            0..=2 => families[i as usize],
            _ => families[0]
                .wrapping_add(i.wrapping_mul(families[1]))
                .wrapping_add(i.wrapping_mul(i).wrapping_mul(families[2])),
        };
        raw % bit_count
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_are_pinned() {
        // Changing any of these values requires bumping HASH_SCHEME_VERSION.
        assert_eq!(crc64_wide(b"123456789") & 0xffff_ffff, 0xCBF4_3926);
        assert_ne!(crc64_wide(b"123456789") >> 32, 0xCBF4_3926);
        assert_eq!(sha256_prefix(b"abc"), 0xba78_16bf_8f01_cfea);
        assert_eq!(mix64(b"abc"), mix64(b"abc"));
        assert_ne!(mix64(b"abc"), mix64(b"abd"));
        assert_eq!(HASH_SCHEME_VERSION, 2);
    }

    #[test]
    fn positions_stay_in_range() {
        for key in ["", "a", "abc1234", "https://example.com/some/long/path"] {
            let all: Vec<_> = positions(key.as_bytes(), 12, 1_000).collect();
            assert_eq!(all.len(), 12);
            assert!(all.iter().all(|&p| p < 1_000));
        }
    }

    #[test]
    fn first_positions_use_each_family() {
        let data = b"Zx81Qa0";
        let bits = 1 << 20;
        let first: Vec<_> = positions(data, 3, bits).collect();
        assert_eq!(
            first,
            vec![mix64(data) % bits, crc64_wide(data) % bits, sha256_prefix(data) % bits]
        );
    }

    #[test]
    fn every_family_reaches_past_four_billion_bits() {
        const KEYS: usize = 20_000;
        let bits: u64 = 1 << 40;
        let low = 1u64 << 32;

        let mut high_hits = [0usize; 3];
        for i in 0..KEYS {
            let key = format!("key-{i}");
            for (slot, pos) in positions(key.as_bytes(), 3, bits).enumerate() {
                assert!(pos < bits);
                if pos >= low {
                    high_hits[slot] += 1;
                }
            }
        }

        // a uniform position lands below 2^32 with probability 2^-8
        for (slot, hits) in high_hits.iter().enumerate() {
            assert!(*hits > KEYS * 95 / 100, "position {slot}: {hits} of {KEYS} above 2^32");
        }
    }
}
