//! QR module placement: function patterns, the boustrophedon data
//! walk, masking, and format information.

use super::tables::{self, EcLevel};
use crate::error::Error;
use crate::grid::{Module, ModuleGrid};

/// BCH(15, 5) generator for the format information.
const FORMAT_BCH_POLY: u16 = 0x537;
/// XOR applied to the format bits so no level/mask yields all zeroes.
const FORMAT_MASK: u16 = 0x5412;

/// The 15 format bits for a level and mask: 5 data bits, 10 BCH
/// remainder bits, then the fixed mask pattern.
pub fn format_bits(level: EcLevel, mask: u8) -> u16 {
    let data = (level.format_bits() << 3) | mask as u16;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_BCH_POLY);
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

/// Mask predicate: invert the module at (row, col)?
fn mask_bit(mask: u8, row: usize, col: usize) -> bool {
    let (x, y) = (col, row);
    match mask {
        0 => (x + y) % 2 == 0,
        1 => y % 2 == 0,
        2 => x % 3 == 0,
        3 => (x + y) % 3 == 0,
        4 => (y / 2 + x / 3) % 2 == 0,
        5 => x * y % 2 + x * y % 3 == 0,
        6 => (x * y % 2 + x * y % 3) % 2 == 0,
        7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
        _ => unreachable!("mask validated at the interface"),
    }
}

/// Function-pattern layer: the modules no data or mask may touch, with
/// their fixed values. Format areas are reserved here and written by
/// `draw_format` after masking.
struct FunctionMap {
    size: usize,
    is_function: Vec<bool>,
}

impl FunctionMap {
    fn set(&mut self, grid: &mut ModuleGrid, row: usize, col: usize, dark: bool) {
        self.is_function[row * self.size + col] = true;
        grid.set(row, col, if dark { Module::Mark } else { Module::Space });
    }

    fn contains(&self, row: usize, col: usize) -> bool {
        self.is_function[row * self.size + col]
    }
}

fn draw_function_patterns(grid: &mut ModuleGrid, version: u8) -> FunctionMap {
    let size = tables::dimension(version);
    let mut map = FunctionMap {
        size,
        is_function: vec![false; size * size],
    };

    // timing tracks
    for i in 0..size {
        map.set(grid, 6, i, i % 2 == 0);
        map.set(grid, i, 6, i % 2 == 0);
    }
    // finder patterns with separators, drawn as clipped 9x9 blocks
    for (cr, cc) in [(3i32, 3i32), (3, size as i32 - 4), (size as i32 - 4, 3)] {
        for dr in -4..=4i32 {
            for dc in -4..=4i32 {
                let (r, c) = (cr + dr, cc + dc);
                if r < 0 || c < 0 || r >= size as i32 || c >= size as i32 {
                    continue;
                }
                let dist = dr.abs().max(dc.abs());
                map.set(grid, r as usize, c as usize, dist != 2 && dist != 4);
            }
        }
    }
    // single alignment pattern on versions 2 and up
    if version >= 2 {
        let center = size - 7;
        for dr in -2..=2i32 {
            for dc in -2..=2i32 {
                let dist = dr.abs().max(dc.abs());
                map.set(
                    grid,
                    (center as i32 + dr) as usize,
                    (center as i32 + dc) as usize,
                    dist != 1,
                );
            }
        }
    }
    // reserve the format areas and the dark module; the strips next to
    // the top-left finder cross the timing tracks at index 6, already
    // drawn dark above
    for i in 0..8 {
        if i != 6 {
            map.set(grid, i, 8, false);
            map.set(grid, 8, i, false);
        }
        map.set(grid, 8, size - 1 - i, false);
        map.set(grid, size - 1 - i, 8, false);
    }
    map.set(grid, 8, 8, false);
    map.set(grid, size - 8, 8, true);
    map
}

/// Write both copies of the format information. Coordinates follow the
/// standard's clockwise reading around the top-left finder and the
/// split second copy under the top-right and beside the bottom-left.
fn draw_format(grid: &mut ModuleGrid, map: &mut FunctionMap, level: EcLevel, mask: u8) {
    let bits = format_bits(level, mask);
    let size = map.size;
    let bit = |i: usize| (bits >> i) & 1 != 0;

    // first copy, around the top-left finder
    for i in 0..=5 {
        map.set(grid, i, 8, bit(i));
    }
    map.set(grid, 7, 8, bit(6));
    map.set(grid, 8, 8, bit(7));
    map.set(grid, 8, 7, bit(8));
    for i in 9..15 {
        map.set(grid, 8, 14 - i, bit(i));
    }
    // second copy, split across the two far finders
    for i in 0..8 {
        map.set(grid, 8, size - 1 - i, bit(i));
    }
    for i in 8..15 {
        map.set(grid, size - 15 + i, 8, bit(i));
    }
    map.set(grid, size - 8, 8, true);
}

/// Zigzag the codeword bits through the non-function modules: two-wide
/// columns from the right edge, alternating upward and downward, with
/// the column holding the vertical timing track skipped. Any leftover
/// (remainder) modules stay light before masking.
fn draw_codewords(grid: &mut ModuleGrid, map: &FunctionMap, codewords: &[u8]) {
    let size = map.size;
    let total_bits = codewords.len() * 8;
    let mut i = 0usize;
    let mut right = size as i32 - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            for j in 0..2 {
                let col = (right - j) as usize;
                let upward = ((right + 1) & 2) == 0;
                let row = if upward { size - 1 - vert } else { vert };
                if !map.contains(row, col) && i < total_bits {
                    if codewords[i >> 3] & (0x80 >> (i & 7)) != 0 {
                        grid.set(row, col, Module::Mark);
                    }
                    i += 1;
                }
            }
        }
        right -= 2;
    }
    debug_assert_eq!(i, total_bits);
}

/// Invert every non-function module the mask predicate selects.
fn apply_mask(grid: &mut ModuleGrid, map: &FunctionMap, mask: u8) {
    for row in 0..map.size {
        for col in 0..map.size {
            if !map.contains(row, col) && mask_bit(mask, row, col) {
                let flipped = if grid.is_mark(row, col) {
                    Module::Space
                } else {
                    Module::Mark
                };
                grid.set(row, col, flipped);
            }
        }
    }
}

/// Assemble a finished symbol from an interleaved codeword stream.
pub fn place(
    codewords: &[u8],
    version: u8,
    level: EcLevel,
    mask: u8,
) -> Result<ModuleGrid, Error> {
    if mask > 7 {
        return Err(Error::InvalidInput("mask pattern is 0..=7"));
    }
    let size = tables::dimension(version);
    let mut grid = ModuleGrid::new(size, size, 4);
    let mut map = draw_function_patterns(&mut grid, version);
    draw_codewords(&mut grid, &map, codewords);
    apply_mask(&mut grid, &map, mask);
    draw_format(&mut grid, &mut map, level, mask);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bits_reference() {
        // ISO 18004 worked example: level M, mask 5 -> 100000011001110
        assert_eq!(format_bits(EcLevel::M, 5), 0b100000011001110);
        // no combination may collapse to all zeroes or all ones
        for level in [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H] {
            for mask in 0..8 {
                let f = format_bits(level, mask) & 0x7FFF;
                assert!(f != 0 && f != 0x7FFF);
            }
        }
    }

    #[test]
    fn format_bits_are_valid_bch_codewords() {
        // before the fixed XOR, every codeword's BCH remainder is zero
        for level in [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H] {
            for mask in 0..8 {
                let mut word = format_bits(level, mask) ^ FORMAT_MASK;
                for _ in 0..10 {
                    word = (word << 1) ^ ((word >> 14) * (FORMAT_BCH_POLY << 5));
                }
                assert_eq!(word & 0x7FFF, 0);
            }
        }
    }

    #[test]
    fn function_modules_cover_the_expected_count() {
        for version in 1..=6u8 {
            let size = tables::dimension(version);
            let mut grid = ModuleGrid::new(size, size, 4);
            let map = draw_function_patterns(&mut grid, version);
            let function = map.is_function.iter().filter(|&&f| f).count();
            let expected = size * size
                - 8 * tables::TOTAL_CODEWORDS[version as usize - 1]
                - tables::remainder_bits(version);
            assert_eq!(function, expected, "version {version}");
        }
    }

    #[test]
    fn data_walk_consumes_every_codeword_bit() {
        // the debug assertion in draw_codewords checks the count; run
        // it across all versions with the worst-case stream length
        for version in 1..=6u8 {
            let total = tables::TOTAL_CODEWORDS[version as usize - 1];
            let size = tables::dimension(version);
            let mut grid = ModuleGrid::new(size, size, 4);
            let map = draw_function_patterns(&mut grid, version);
            draw_codewords(&mut grid, &map, &vec![0xFF; total]);
        }
    }

    #[test]
    fn masking_is_an_involution_off_function_modules() {
        let mut grid = ModuleGrid::new(21, 21, 4);
        let map = draw_function_patterns(&mut grid, 1);
        let before = grid.clone();
        apply_mask(&mut grid, &map, 3);
        assert_ne!(grid, before);
        apply_mask(&mut grid, &map, 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn dark_module_survives_every_mask() {
        for mask in 0..8 {
            let grid = place(&[0u8; 26], 1, EcLevel::L, mask).unwrap();
            assert!(grid.is_mark(21 - 8, 8));
        }
    }

    #[test]
    fn timing_tracks_cross_the_format_strips_intact() {
        // the format reservation borders the top-left finder on row 8
        // and column 8; the timing modules there, (6, 8) and (8, 6),
        // stay dark and the whole track keeps alternating
        for mask in 0..8 {
            let grid = place(&[0u8; 26], 1, EcLevel::L, mask).unwrap();
            assert!(grid.is_mark(6, 8), "mask {mask}");
            assert!(grid.is_mark(8, 6), "mask {mask}");
            for i in 8..13 {
                assert_eq!(grid.is_mark(6, i), i % 2 == 0, "mask {mask}");
                assert_eq!(grid.is_mark(i, 6), i % 2 == 0, "mask {mask}");
            }
        }
    }

    #[test]
    fn invalid_mask_rejected() {
        assert!(matches!(
            place(&[0u8; 26], 1, EcLevel::L, 8),
            Err(Error::InvalidInput(_))
        ));
    }
}
