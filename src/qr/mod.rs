//! QR encoder for versions 1 through 6.
//!
//! ```
//! use embosscode::qr::{self, EcLevel, QrOptions, Segment};
//!
//! let grid = qr::encode(
//!     &[Segment::Numeric("01234567")],
//!     &QrOptions { level: EcLevel::M, version: None, mask: 0 },
//! )
//! .unwrap();
//! assert_eq!(grid.width(), 21);
//! ```

pub mod encode;
pub mod placement;
pub mod tables;

use crate::error::Error;
use crate::grid::ModuleGrid;
pub use encode::Segment;
pub use tables::EcLevel;

/// Symbol parameters. `version: None` picks the smallest version that
/// fits; the mask is always caller-chosen (0..=7), never auto-selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    pub level: EcLevel,
    pub version: Option<u8>,
    pub mask: u8,
}

/// Encode segments into a finished symbol: segment bits, terminator
/// and padding, per-block ECC, interleave, placement, mask, format.
pub fn encode(segments: &[Segment], opts: &QrOptions) -> Result<ModuleGrid, Error> {
    let (stream, version) = codewords(segments, opts)?;
    placement::place(&stream, version, opts.level, opts.mask)
}

/// The interleaved codeword stream and the version it targets, without
/// placing it.
pub fn codewords(segments: &[Segment], opts: &QrOptions) -> Result<(Vec<u8>, u8), Error> {
    let version = match opts.version {
        Some(v) => {
            let p = tables::properties(v, opts.level)?;
            let bits = encode::payload_bits(segments)?;
            if bits > p.data_codewords * 8 {
                return Err(Error::CapacityExceeded {
                    needed: bits.div_ceil(8),
                    capacity: p.data_codewords,
                });
            }
            v
        }
        None => tables::fitting(encode::payload_bits(segments)?, opts.level)?,
    };
    let data = encode::data_codewords(segments, version, opts.level)?;
    let p = tables::properties(version, opts.level)?;
    let stream = encode::interleave(&data, p)?;
    Ok((stream, version))
}

/// Expert bypass: place an already-interleaved codeword stream
/// (caller-computed, ECC included) with the given parameters. The
/// stream length must match the version's total codeword count.
pub fn place_raw(
    codewords: &[u8],
    version: u8,
    level: EcLevel,
    mask: u8,
) -> Result<ModuleGrid, Error> {
    tables::properties(version, level)?;
    if codewords.len() != tables::TOTAL_CODEWORDS[version as usize - 1] {
        return Err(Error::InvalidInput(
            "raw placement needs exactly the version's total codeword count",
        ));
    }
    placement::place(codewords, version, level, mask)
}
