//! Version property table for QR versions 1 through 6.

use crate::error::Error;

/// Error correction level. The discriminant is the user-facing 0..=3
/// ordering; the format-info bit pattern differs (see `format_bits`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl EcLevel {
    /// The two-bit code carried in the format information.
    pub fn format_bits(self) -> u16 {
        match self {
            EcLevel::L => 0b01,
            EcLevel::M => 0b00,
            EcLevel::Q => 0b11,
            EcLevel::H => 0b10,
        }
    }

    pub fn from_index(n: u8) -> Result<Self, Error> {
        match n {
            0 => Ok(EcLevel::L),
            1 => Ok(EcLevel::M),
            2 => Ok(EcLevel::Q),
            3 => Ok(EcLevel::H),
            _ => Err(Error::InvalidInput("error correction level is 0..=3")),
        }
    }
}

/// Capacity row for one (version, level) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLevel {
    /// Total data codewords across all blocks.
    pub data_codewords: usize,
    /// ECC codewords per block.
    pub ecc_per_block: usize,
    /// Number of Reed-Solomon blocks.
    pub blocks: usize,
}

/// Indexed `[version - 1][level as usize]`, levels ordered L, M, Q, H.
#[rustfmt::skip]
pub const PROPERTIES: [[VersionLevel; 4]; 6] = [
    [
        VersionLevel { data_codewords: 19, ecc_per_block: 7, blocks: 1 },
        VersionLevel { data_codewords: 16, ecc_per_block: 10, blocks: 1 },
        VersionLevel { data_codewords: 13, ecc_per_block: 13, blocks: 1 },
        VersionLevel { data_codewords: 9, ecc_per_block: 17, blocks: 1 },
    ],
    [
        VersionLevel { data_codewords: 34, ecc_per_block: 10, blocks: 1 },
        VersionLevel { data_codewords: 28, ecc_per_block: 16, blocks: 1 },
        VersionLevel { data_codewords: 22, ecc_per_block: 22, blocks: 1 },
        VersionLevel { data_codewords: 16, ecc_per_block: 28, blocks: 1 },
    ],
    [
        VersionLevel { data_codewords: 55, ecc_per_block: 15, blocks: 1 },
        VersionLevel { data_codewords: 44, ecc_per_block: 26, blocks: 1 },
        VersionLevel { data_codewords: 34, ecc_per_block: 18, blocks: 2 },
        VersionLevel { data_codewords: 26, ecc_per_block: 22, blocks: 2 },
    ],
    [
        VersionLevel { data_codewords: 80, ecc_per_block: 20, blocks: 1 },
        VersionLevel { data_codewords: 64, ecc_per_block: 18, blocks: 2 },
        VersionLevel { data_codewords: 48, ecc_per_block: 26, blocks: 2 },
        VersionLevel { data_codewords: 36, ecc_per_block: 16, blocks: 4 },
    ],
    [
        VersionLevel { data_codewords: 108, ecc_per_block: 26, blocks: 1 },
        VersionLevel { data_codewords: 86, ecc_per_block: 24, blocks: 2 },
        VersionLevel { data_codewords: 62, ecc_per_block: 18, blocks: 4 },
        VersionLevel { data_codewords: 46, ecc_per_block: 22, blocks: 4 },
    ],
    [
        VersionLevel { data_codewords: 136, ecc_per_block: 18, blocks: 2 },
        VersionLevel { data_codewords: 108, ecc_per_block: 16, blocks: 4 },
        VersionLevel { data_codewords: 76, ecc_per_block: 24, blocks: 4 },
        VersionLevel { data_codewords: 60, ecc_per_block: 28, blocks: 4 },
    ],
];

/// Total codewords (data + ECC) per version, before remainder bits.
pub const TOTAL_CODEWORDS: [usize; 6] = [26, 44, 70, 100, 134, 172];

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 6;

pub fn dimension(version: u8) -> usize {
    17 + 4 * version as usize
}

/// Bits left over after the codeword stream fills the module grid.
pub fn remainder_bits(version: u8) -> usize {
    if version == 1 {
        0
    } else {
        7
    }
}

pub fn properties(version: u8, level: EcLevel) -> Result<VersionLevel, Error> {
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::UnsupportedSize("QR versions 1 through 6"));
    }
    Ok(PROPERTIES[version as usize - 1][level as usize])
}

/// Smallest version whose data capacity holds `bits` payload bits at
/// the given level.
pub fn fitting(bits: usize, level: EcLevel) -> Result<u8, Error> {
    for v in MIN_VERSION..=MAX_VERSION {
        let p = PROPERTIES[v as usize - 1][level as usize];
        if p.data_codewords * 8 >= bits {
            return Ok(v);
        }
    }
    let max = PROPERTIES[MAX_VERSION as usize - 1][level as usize].data_codewords;
    Err(Error::CapacityExceeded {
        needed: bits.div_ceil(8),
        capacity: max,
    })
}

/// Data codeword count per block, short blocks first. The last
/// `data % blocks` blocks carry one extra codeword.
pub fn block_lengths(p: VersionLevel) -> Vec<usize> {
    let base = p.data_codewords / p.blocks;
    let long = p.data_codewords % p.blocks;
    (0..p.blocks)
        .map(|i| if i < p.blocks - long { base } else { base + 1 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_sum_to_version_totals() {
        for v in MIN_VERSION..=MAX_VERSION {
            for row in PROPERTIES[v as usize - 1] {
                assert_eq!(
                    row.data_codewords + row.ecc_per_block * row.blocks,
                    TOTAL_CODEWORDS[v as usize - 1],
                    "version {v}"
                );
                let split: usize = block_lengths(row).iter().sum();
                assert_eq!(split, row.data_codewords, "version {v}");
            }
        }
    }

    #[test]
    fn grid_accounts_for_every_codeword() {
        // modules minus function patterns equals codeword bits plus the
        // remainder bits
        for v in MIN_VERSION..=MAX_VERSION {
            let dim = dimension(v);
            let finders = 3 * 64; // 7x7 finder plus separator, 8x8 each
            let timing = 2 * (dim - 16);
            // the single alignment pattern sits clear of the timing tracks
            let alignment = if v >= 2 { 25 } else { 0 };
            let format = 2 * 15 + 1;
            let function = finders + timing + alignment + format;
            assert_eq!(
                dim * dim - function,
                TOTAL_CODEWORDS[v as usize - 1] * 8 + remainder_bits(v),
                "version {v}"
            );
        }
    }

    #[test]
    fn uneven_split_puts_short_blocks_first() {
        // version 5, level Q: 62 data codewords over 4 blocks
        let p = properties(5, EcLevel::Q).unwrap();
        assert_eq!(block_lengths(p), [15, 15, 16, 16]);
        // single block stays whole
        let p1 = properties(1, EcLevel::H).unwrap();
        assert_eq!(block_lengths(p1), [9]);
    }

    #[test]
    fn version_fitting() {
        assert_eq!(fitting(19 * 8, EcLevel::L).unwrap(), 1);
        assert_eq!(fitting(19 * 8 + 1, EcLevel::L).unwrap(), 2);
        assert!(matches!(
            fitting(137 * 8, EcLevel::L),
            Err(Error::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn out_of_range_version_rejected() {
        assert!(matches!(properties(0, EcLevel::L), Err(Error::UnsupportedSize(_))));
        assert!(matches!(properties(7, EcLevel::L), Err(Error::UnsupportedSize(_))));
    }
}
