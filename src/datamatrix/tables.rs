//! Symbol property table for the supported square ECC200 sizes.

use crate::error::Error;

/// One row of the ISO/IEC 16022 symbol attribute table. All supported
/// sizes are square and single-block, so data and ECC counts are whole
/// symbol counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSize {
    /// Symbol edge length in modules, finder pattern included.
    pub dim: usize,
    /// Data codeword capacity.
    pub data_codewords: usize,
    /// Error correction codewords.
    pub ecc_codewords: usize,
}

impl SymbolSize {
    /// Edge length of the data region (the symbol minus the finder and
    /// clock track).
    pub fn data_region_dim(&self) -> usize {
        self.dim - 2
    }

    pub fn total_codewords(&self) -> usize {
        self.data_codewords + self.ecc_codewords
    }
}

/// Square sizes 10x10 through 26x26, ascending.
pub const SYMBOL_SIZES: [SymbolSize; 9] = [
    SymbolSize { dim: 10, data_codewords: 3, ecc_codewords: 5 },
    SymbolSize { dim: 12, data_codewords: 5, ecc_codewords: 7 },
    SymbolSize { dim: 14, data_codewords: 8, ecc_codewords: 10 },
    SymbolSize { dim: 16, data_codewords: 12, ecc_codewords: 12 },
    SymbolSize { dim: 18, data_codewords: 18, ecc_codewords: 14 },
    SymbolSize { dim: 20, data_codewords: 22, ecc_codewords: 18 },
    SymbolSize { dim: 22, data_codewords: 30, ecc_codewords: 20 },
    SymbolSize { dim: 24, data_codewords: 36, ecc_codewords: 24 },
    SymbolSize { dim: 26, data_codewords: 44, ecc_codewords: 28 },
];

/// Smallest symbol holding `data_len` data codewords.
pub fn fitting(data_len: usize) -> Result<SymbolSize, Error> {
    SYMBOL_SIZES
        .iter()
        .copied()
        .find(|s| s.data_codewords >= data_len)
        .ok_or(Error::CapacityExceeded {
            needed: data_len,
            capacity: SYMBOL_SIZES[SYMBOL_SIZES.len() - 1].data_codewords,
        })
}

/// Row for an exact edge length, for callers that pin the symbol size.
pub fn exact(dim: usize) -> Result<SymbolSize, Error> {
    SYMBOL_SIZES
        .iter()
        .copied()
        .find(|s| s.dim == dim)
        .ok_or(Error::UnsupportedSize("Data Matrix sizes are the squares 10 through 26"))
}
