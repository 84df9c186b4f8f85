//! Code 39 encoder.
//!
//! Every character is nine elements (five bars, four spaces) of which
//! exactly three are wide, at the 2:1 wide/narrow ratio. The element
//! widths follow the standard's weighted construction: two wide bars
//! pick a digit from the 1-2-4-7 weighting, one wide space picks the
//! character group. Characters are separated by a one-module gap and
//! the symbol is framed by `*` start/stop characters.

use crate::checksum;
use crate::error::Error;
use crate::grid::{Module, ModuleGrid};

const QUIET_ZONE: usize = 10;

/// Check-character alphabet in value order.
const CHARSET: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Wide-bar index pairs for the digit cycle 1..9, 0 (zero-based bar
/// positions out of five).
const WIDE_BARS: [(usize, usize); 10] = [
    (0, 4), // 1
    (1, 4), // 2
    (0, 1), // 3
    (2, 4), // 4
    (0, 2), // 5
    (1, 2), // 6
    (3, 4), // 7
    (0, 3), // 8
    (1, 3), // 9
    (2, 3), // 0
];

/// The nine element widths for one character, bar first.
fn element_widths(c: u8) -> Option<[u8; 9]> {
    // cycle index into WIDE_BARS and the wide space (zero-based out of
    // four); the $/+% group instead has three wide spaces
    let (cycle, wide_space) = match c {
        b'1'..=b'9' => ((c - b'1') as usize, Some(1)),
        b'0' => (9, Some(1)),
        b'A'..=b'J' => ((c - b'A') as usize, Some(2)),
        b'K'..=b'T' => ((c - b'K') as usize, Some(3)),
        b'U'..=b'Z' => ((c - b'U') as usize, Some(0)),
        b'-' => (6, Some(0)),
        b'.' => (7, Some(0)),
        b' ' => (8, Some(0)),
        b'*' => (9, Some(0)),
        b'$' => (0, None),
        b'/' => (1, None),
        b'+' => (2, None),
        b'%' => (3, None),
        _ => return None,
    };
    let mut bars = [1u8; 5];
    let mut spaces = [1u8; 4];
    match wide_space {
        Some(s) => {
            let (a, b) = WIDE_BARS[cycle];
            bars[a] = 2;
            bars[b] = 2;
            spaces[s] = 2;
        }
        None => {
            // $ / + % leave every bar narrow and widen all spaces but
            // one: the narrow space walks from last to first
            for (i, w) in spaces.iter_mut().enumerate() {
                if i != 3 - cycle {
                    *w = 2;
                }
            }
        }
    }
    Some([
        bars[0], spaces[0], bars[1], spaces[1], bars[2], spaces[2], bars[3], spaces[3], bars[4],
    ])
}

fn value_of(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&x| x == c).map(|v| v as u8)
}

/// Encode `text` (the CHARSET alphabet, `*` excluded) into a symbol,
/// optionally with the mod-43 check character before the stop.
pub fn symbol(text: &str, with_check: bool) -> Result<ModuleGrid, Error> {
    let mut values = Vec::with_capacity(text.len());
    for c in text.bytes() {
        values.push(
            value_of(c).ok_or(Error::InvalidInput("character outside the Code 39 alphabet"))?,
        );
    }
    let mut chars: Vec<u8> = Vec::with_capacity(text.len() + 3);
    chars.push(b'*');
    chars.extend(text.bytes());
    if with_check {
        chars.push(CHARSET[checksum::mod43(&values) as usize]);
    }
    chars.push(b'*');

    // 12 modules per character plus a 1-module gap after each but the last
    let width = chars.len() * 13 - 1;
    let mut grid = ModuleGrid::new(width, 1, QUIET_ZONE);
    let mut col = 0;
    for (n, &c) in chars.iter().enumerate() {
        let widths = element_widths(c).expect("chars built from the alphabet");
        for (i, &w) in widths.iter().enumerate() {
            if i % 2 == 0 {
                for k in 0..w as usize {
                    grid.set(0, col + k, Module::Mark);
                }
            }
            col += w as usize;
        }
        if n + 1 < chars.len() {
            col += 1;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(c: u8) -> String {
        element_widths(c).unwrap().iter().map(|w| (w + b'0') as char).collect()
    }

    #[test]
    fn reference_patterns() {
        assert_eq!(pattern(b'0'), "111221211");
        assert_eq!(pattern(b'1'), "211211112");
        assert_eq!(pattern(b'A'), "211112112");
        assert_eq!(pattern(b'*'), "121121211");
        assert_eq!(pattern(b'%'), "111212121");
        assert_eq!(pattern(b'$'), "121212111");
    }

    #[test]
    fn every_character_is_twelve_modules() {
        for &c in CHARSET.iter().chain([&b'*']) {
            let total: u8 = element_widths(c).unwrap().iter().sum();
            assert_eq!(total, 12, "char {}", c as char);
        }
    }

    #[test]
    fn framed_by_start_stop() {
        let grid = symbol("A", false).unwrap();
        // *, gap, A, gap, * -> 12 + 1 + 12 + 1 + 12
        assert_eq!(grid.width(), 38);
        let star = "100101101101";
        let row: String = (0..grid.width())
            .map(|c| if grid.is_mark(0, c) { '1' } else { '0' })
            .collect();
        assert!(row.starts_with(star));
        assert!(row.ends_with(star));
        // inter-character gaps are light
        assert!(!grid.is_mark(0, 12));
        assert!(!grid.is_mark(0, 25));
    }

    #[test]
    fn check_character_appended() {
        // "ABC" values sum to 33 -> check 'X'; four data+check chars
        let with = symbol("ABC", true).unwrap();
        let without = symbol("ABC", false).unwrap();
        assert_eq!(with.width(), without.width() + 13);
        let x_alone = symbol("ABCX", false).unwrap();
        assert_eq!(with, x_alone);
    }

    #[test]
    fn rejects_lowercase_and_star() {
        assert!(matches!(symbol("abc", false), Err(Error::InvalidInput(_))));
        assert!(matches!(symbol("A*B", false), Err(Error::InvalidInput(_))));
    }
}
