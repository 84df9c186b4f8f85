//! EAN-13 and UPC-A encoders.
//!
//! A symbol is 95 modules: guard bars, six left digits whose L/G parity
//! pattern hides the leading thirteenth digit, a center guard, and six
//! right digits in the R set. UPC-A is EAN-13 with a leading zero.
//!
//! A supplied check digit that does not match the computed one is
//! reported as a [`Warning`]; the symbol is still produced with the
//! supplied digit, so deliberately wrong symbols can be made for
//! testing scanners.

use crate::checksum;
use crate::error::{Error, Warning};
use crate::grid::{Module, ModuleGrid};

const QUIET_ZONE: usize = 9;

/// Left-hand odd-parity patterns for the digits 0-9.
const L_PATTERNS: [[bool; 7]; 10] = [
    [false, false, false, true, true, false, true],
    [false, false, true, true, false, false, true],
    [false, false, true, false, false, true, true],
    [false, true, true, true, true, false, true],
    [false, true, false, false, false, true, true],
    [false, true, true, false, false, false, true],
    [false, true, false, true, true, true, true],
    [false, true, true, true, false, true, true],
    [false, true, true, false, true, true, true],
    [false, false, false, true, false, true, true],
];

/// Left-hand even-parity patterns.
const G_PATTERNS: [[bool; 7]; 10] = [
    [false, true, false, false, true, true, true],
    [false, true, true, false, false, true, true],
    [false, false, true, true, false, true, true],
    [false, true, false, false, false, false, true],
    [false, false, true, true, true, false, true],
    [false, true, true, true, false, false, true],
    [false, false, false, false, true, false, true],
    [false, false, true, false, false, false, true],
    [false, false, false, true, false, false, true],
    [false, false, true, false, true, true, true],
];

/// Which of the six left positions use the G set, per first digit.
const FIRST_DIGIT_USE_G: [[bool; 6]; 10] = [
    [false, false, false, false, false, false],
    [false, false, true, false, true, true],
    [false, false, true, true, false, true],
    [false, false, true, true, true, false],
    [false, true, false, false, true, true],
    [false, true, true, false, false, true],
    [false, true, true, true, false, false],
    [false, true, false, true, false, true],
    [false, true, false, true, true, false],
    [false, true, true, false, true, false],
];

fn parse_digits(s: &str) -> Result<Vec<u8>, Error> {
    if !s.bytes().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput("article numbers are decimal digits"));
    }
    Ok(s.bytes().map(|c| c - b'0').collect())
}

/// Encode an EAN-13 symbol. `digits` is either the 12-digit article
/// number (the check digit is computed) or all 13 digits (the supplied
/// check digit is verified and used as given).
pub fn ean13(digits: &str) -> Result<(ModuleGrid, Option<Warning>), Error> {
    let mut d = parse_digits(digits)?;
    let warning = match d.len() {
        12 => {
            d.push(checksum::mod10(&d));
            None
        }
        13 => {
            let computed = checksum::mod10(&d[..12]);
            if d[12] != computed {
                Some(Warning::ChecksumMismatch { supplied: d[12], computed })
            } else {
                None
            }
        }
        _ => return Err(Error::InvalidInput("EAN-13 takes 12 or 13 digits")),
    };
    Ok((render(&d), warning))
}

/// Encode a UPC-A symbol from 11 digits (check computed) or 12 digits
/// (check verified). The layout is EAN-13 with a leading zero.
pub fn upc_a(digits: &str) -> Result<(ModuleGrid, Option<Warning>), Error> {
    let d = parse_digits(digits)?;
    if !(d.len() == 11 || d.len() == 12) {
        return Err(Error::InvalidInput("UPC-A takes 11 or 12 digits"));
    }
    let mut prefixed = String::with_capacity(digits.len() + 1);
    prefixed.push('0');
    prefixed.push_str(digits);
    ean13(&prefixed)
}

/// The 95-module layout for 13 digits.
fn render(d: &[u8]) -> ModuleGrid {
    debug_assert_eq!(d.len(), 13);
    let mut grid = ModuleGrid::new(95, 1, QUIET_ZONE);
    let mut col = 0;
    let push = |grid: &mut ModuleGrid, col: &mut usize, bits: &[bool]| {
        for &b in bits {
            if b {
                grid.set(0, *col, Module::Mark);
            }
            *col += 1;
        }
    };
    push(&mut grid, &mut col, &[true, false, true]);
    let use_g = FIRST_DIGIT_USE_G[d[0] as usize];
    for (i, &digit) in d[1..7].iter().enumerate() {
        let table = if use_g[i] { &G_PATTERNS } else { &L_PATTERNS };
        push(&mut grid, &mut col, &table[digit as usize]);
    }
    push(&mut grid, &mut col, &[false, true, false, true, false]);
    for &digit in &d[7..13] {
        // right-hand patterns are the complement of the L set
        let inverted: Vec<bool> = L_PATTERNS[digit as usize].iter().map(|b| !b).collect();
        push(&mut grid, &mut col, &inverted);
    }
    push(&mut grid, &mut col, &[true, false, true]);
    debug_assert_eq!(col, 95);
    grid
}
