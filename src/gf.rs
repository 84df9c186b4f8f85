//! GF(256) arithmetic for the two Reed-Solomon code families.
//!
//! Data Matrix (ISO/IEC 16022) and QR (ISO/IEC 18004) both work over
//! GF(2^8) but reduce by different primitive polynomials, so the crate
//! carries two independent table sets. Mixing them up produces ECC that
//! is wrong in a way no local test catches, hence the distinct `Field`
//! values rather than a shared table with a runtime flag.

/// Primitive polynomial for Data Matrix ECC200: x^8+x^5+x^3+x^2+1.
pub const POLY_DATA_MATRIX: u16 = 0x12D;
/// Primitive polynomial for QR: x^8+x^4+x^3+x^2+1.
pub const POLY_QR: u16 = 0x11D;

/// One GF(256) instance: log/antilog tables for a fixed polynomial.
pub struct Field {
    log: [u8; 256],
    alog: [u8; 256],
}

const fn build_alog(poly: u16) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x >= 256 {
            x ^= poly;
        }
        i += 1;
    }
    // index 255 aliases alpha^0 so reduced exponents never go out of range
    table[255] = table[0];
    table
}

const fn build_log(alog: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[alog[i] as usize] = i as u8;
        i += 1;
    }
    // log[0] stays 0 as a sentinel; mul() never dereferences it
    table
}

const fn build_field(poly: u16) -> Field {
    let alog = build_alog(poly);
    Field {
        log: build_log(&alog),
        alog,
    }
}

/// GF(256) with polynomial 301, used by Data Matrix ECC200.
pub static DATA_MATRIX: Field = build_field(POLY_DATA_MATRIX);
/// GF(256) with polynomial 285, used by QR.
pub static QR: Field = build_field(POLY_QR);

impl Field {
    /// Discrete log of `x`. Contract: `x != 0`.
    #[inline]
    pub fn log(&self, x: u8) -> u8 {
        assert!(x != 0, "gf: log(0) is undefined");
        self.log[x as usize]
    }

    /// Generator raised to `n`, `n` in 0..=254.
    #[inline]
    pub fn alog(&self, n: u8) -> u8 {
        self.alog[n as usize]
    }

    /// Field multiplication via the log/antilog tables.
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let n = (self.log[a as usize] as u16 + self.log[b as usize] as u16) % 255;
        self.alog[n as usize]
    }
}
