//! Pseudo random functions instantiated with SHA256Compress.
//!
//! Each PRF hashes a single 64 byte block with the SHA-256 compression
//! function. The high four bits of the first byte separate the uses, so
//! the first 32 byte input must be a 252 bit value.
//!
//! <https://zips.z.cash/protocol/protocol.pdf#concreteprfs>

use byteorder::{BigEndian, ByteOrder};
use sha2::digest::generic_array::GenericArray;

/// H256: the SHA-256 initial state.
const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// SHA256Compress: one application of the SHA-256 compression function,
/// without padding.
pub(crate) fn sha256_compress(block: &[u8; 64]) -> [u8; 32] {
    let mut state = SHA256_IV;

    sha2::compress256(&mut state, &[*GenericArray::from_slice(&block[..])]);

    let mut derived_bytes = [0u8; 32];
    BigEndian::write_u32_into(&state, &mut derived_bytes);

    derived_bytes
}

/// Hashes `x || y` with the 4 bit domain `prefix` in the high bits of `x`.
fn prf(prefix: u8, x: &[u8; 32], y: &[u8; 32]) -> [u8; 32] {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(&x[..]);
    block[0] &= 0x0f;
    block[0] |= prefix << 4;
    block[32..].copy_from_slice(&y[..]);

    sha256_compress(&block)
}

/// The index bit used by `PRF^pk` and `PRF^rho`.
fn index_bit(index: usize) -> u8 {
    debug_assert!(index < 2, "Sprout PRFs only separate two indexes");
    (index & 1) as u8
}

/// PRF^addr(a_sk, t) = SHA256Compress(1100 || a_sk || t || [0; 31])
pub(crate) fn prf_addr(a_sk: &[u8; 32], t: u8) -> [u8; 32] {
    let mut y = [0u8; 32];
    y[0] = t;

    prf(0b1100, a_sk, &y)
}

/// PRF^nf(a_sk, rho) = SHA256Compress(1110 || a_sk || rho)
pub(crate) fn prf_nf(a_sk: &[u8; 32], rho: &[u8; 32]) -> [u8; 32] {
    prf(0b1110, a_sk, rho)
}

/// PRF^pk(a_sk, i, h_sig) = SHA256Compress(0 || i || 00 || a_sk || h_sig)
///
/// `index` is zero-based.
pub(crate) fn prf_pk(a_sk: &[u8; 32], index: usize, h_sig: &[u8; 32]) -> [u8; 32] {
    prf(index_bit(index) << 2, a_sk, h_sig)
}

/// PRF^rho(phi, i, h_sig) = SHA256Compress(0 || i || 10 || phi || h_sig)
///
/// `index` is zero-based.
pub(crate) fn prf_rho(phi: &[u8; 32], index: usize, h_sig: &[u8; 32]) -> [u8; 32] {
    prf((index_bit(index) << 2) | 0b0010, phi, h_sig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_matches_merkle_crh_of_empty_leaves() {
        let _init_guard = sprout_test::init();

        // The first empty Sprout tree node above the leaves.
        let expected = "da5698be17b9b46962335799779fbeca8ce5d491c0d26243bafef9ea1837a9d8";

        assert_eq!(hex::encode(sha256_compress(&[0u8; 64])), expected);
    }

    #[test]
    fn prfs_are_domain_separated() {
        let _init_guard = sprout_test::init();

        let x = [0x0a; 32];
        let y = [0x0b; 32];

        let outputs = [
            prf_nf(&x, &y),
            prf_pk(&x, 0, &y),
            prf_pk(&x, 1, &y),
            prf_rho(&x, 0, &y),
            prf_rho(&x, 1, &y),
        ];

        for (i, a) in outputs.iter().enumerate() {
            for b in outputs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn prf_ignores_high_nibble_of_first_input() {
        let _init_guard = sprout_test::init();

        let mut x = [0x0a; 32];
        let y = [0x0b; 32];
        let expected = prf_nf(&x, &y);

        x[0] |= 0xf0;
        assert_eq!(prf_nf(&x, &y), expected);
    }
}
