//! Reed-Solomon error correction for both symbol families.
//!
//! Data Matrix and QR both use systematic RS codes over GF(256) but with
//! different primitive polynomials and different generator roots (Data
//! Matrix starts at alpha^1, QR at alpha^0). Encoding is the remainder
//! of the message polynomial times x^n divided by the generator,
//! computed by iterative synthetic division.

use crate::error::Error;
use crate::gf::{self, Field};

/// Generator polynomial coefficients for the Data Matrix ECC lengths in
/// the single-block range (10x10 through 26x26). Leading coefficient
/// first; values are the ISO/IEC 16022 constants.
#[rustfmt::skip]
const DM_GENERATORS: [&[u8]; 9] = [
    // 5
    &[1, 62, 111, 15, 48, 228],
    // 7
    &[1, 254, 92, 240, 134, 144, 68, 23],
    // 10
    &[1, 61, 110, 255, 116, 248, 223, 166, 185, 24, 28],
    // 12
    &[1, 242, 100, 178, 97, 213, 142, 42, 61, 91, 158, 153, 41],
    // 14
    &[1, 185, 83, 186, 18, 45, 138, 119, 157, 9, 95, 252, 192, 97, 156],
    // 18
    &[1, 188, 90, 48, 225, 254, 94, 129, 109, 213, 241, 61, 66, 75, 188, 39, 100, 195, 83],
    // 20
    &[1, 172, 186, 174, 27, 82, 108, 79, 253, 145, 153, 160, 188, 2, 168, 71, 233, 9, 244, 195, 15],
    // 24
    &[1, 193, 50, 96, 184, 181, 12, 124, 254, 172, 5, 21, 155, 223, 251, 197, 155, 21, 176, 39, 109, 205, 88, 190, 52],
    // 28
    &[1, 255, 93, 168, 233, 151, 120, 136, 141, 213, 110, 138, 17, 121, 249, 34, 75, 53, 170, 151, 37, 174, 103, 96, 71, 97, 43, 231, 211],
];

/// Block ECC lengths that occur in QR versions 1-6.
const QR_ECC_LENGTHS: [usize; 12] = [7, 10, 13, 15, 16, 17, 18, 20, 22, 24, 26, 28];

/// Remainder of `data(x) * x^n mod g(x)` over `field`. `g` carries the
/// leading 1, so the remainder has `g.len() - 1` coefficients.
fn rs_remainder(field: &Field, data: &[u8], g: &[u8]) -> Vec<u8> {
    let ecc_len = g.len() - 1;
    // one scratch slot past the end keeps the shift branch-free
    let mut ecc = vec![0u8; ecc_len + 1];
    for &a in data {
        let k = ecc[0] ^ a;
        for j in 0..ecc_len {
            ecc[j] = ecc[j + 1] ^ field.mul(k, g[j + 1]);
        }
    }
    ecc.truncate(ecc_len);
    ecc
}

/// Generator polynomial with roots alpha^first .. alpha^(first+n-1),
/// built by convolution. Leading coefficient first.
fn generator(field: &Field, first_root: u8, n: usize) -> Vec<u8> {
    // g starts as the constant 1; each step multiplies by (x + root),
    // coefficients kept highest degree first
    let mut g = vec![1u8];
    for i in 0..n {
        let root = field.alog(((first_root as usize + i) % 255) as u8);
        let mut next = vec![0u8; g.len() + 1];
        for (j, &c) in g.iter().enumerate() {
            // c * x shifts left (same index in the longer vector);
            // c * root lands one slot lower
            next[j] ^= c;
            next[j + 1] ^= field.mul(c, root);
        }
        g = next;
    }
    g
}

/// Data Matrix ECC200 codewords for `data`. `ecc_len` must be one of the
/// tabulated lengths for the supported symbol sizes.
pub fn data_matrix_ecc(data: &[u8], ecc_len: usize) -> Result<Vec<u8>, Error> {
    let g = DM_GENERATORS
        .iter()
        .find(|g| g.len() - 1 == ecc_len)
        .ok_or(Error::UnsupportedSize(
            "no Data Matrix factor table for this ECC length",
        ))?;
    Ok(rs_remainder(&gf::DATA_MATRIX, data, g))
}

/// QR ECC codewords for one block. `ecc_len` must be a block ECC length
/// used by versions 1-6.
pub fn qr_ecc(data: &[u8], ecc_len: usize) -> Result<Vec<u8>, Error> {
    if !QR_ECC_LENGTHS.contains(&ecc_len) {
        return Err(Error::UnsupportedSize("no QR factor table for this ECC length"));
    }
    let g = generator(&gf::QR, 0, ecc_len);
    Ok(rs_remainder(&gf::QR, data, &g))
}
