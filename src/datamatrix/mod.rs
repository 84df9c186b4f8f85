//! Data Matrix ECC200 encoder for the square sizes 10x10 through 26x26.
//!
//! The usual path is the fluent [`DataMatrixEncoder`]: append runs of
//! payload in the encodation mode of your choice, then seal into a
//! [`ModuleGrid`]. Mode latch codewords (230 for C40, 239 for Text,
//! 231 for Base 256, 254 to return to ASCII) are inserted between runs
//! automatically.
//!
//! ```
//! use embosscode::datamatrix::DataMatrixEncoder;
//!
//! let grid = DataMatrixEncoder::new().append_ascii("123456").symbol().unwrap();
//! assert_eq!(grid.width(), 10);
//! ```

pub mod encode;
pub mod placement;
pub mod tables;

use crate::ecc;
use crate::error::Error;
use crate::grid::ModuleGrid;
pub use tables::{SymbolSize, SYMBOL_SIZES};

const LATCH_C40: u8 = 230;
const LATCH_BASE256: u8 = 231;
const LATCH_TEXT: u8 = 239;
const UNLATCH: u8 = 254;

#[derive(Debug, Clone)]
enum Segment {
    Ascii(Vec<u8>),
    C40(Vec<u8>),
    Text(Vec<u8>),
    Base256(Vec<u8>),
}

/// Builder over a sequence of encodation runs.
#[derive(Debug, Clone, Default)]
pub struct DataMatrixEncoder {
    segments: Vec<Segment>,
}

impl DataMatrixEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run in ASCII encodation (digit pairs compress 2:1).
    pub fn append_ascii(mut self, text: &str) -> Self {
        self.segments.push(Segment::Ascii(text.as_bytes().to_vec()));
        self
    }

    /// Append a run in C40 encodation (upper case and digits, 1.5:1).
    pub fn append_c40(mut self, text: &str) -> Self {
        self.segments.push(Segment::C40(text.as_bytes().to_vec()));
        self
    }

    /// Append a run in Text encodation (lower case and digits, 1.5:1).
    pub fn append_text(mut self, text: &str) -> Self {
        self.segments.push(Segment::Text(text.as_bytes().to_vec()));
        self
    }

    /// Append arbitrary bytes in Base 256 encodation.
    pub fn append_bytes(mut self, bytes: &[u8]) -> Self {
        self.segments.push(Segment::Base256(bytes.to_vec()));
        self
    }

    /// Seal into the smallest symbol that fits.
    pub fn symbol(self) -> Result<ModuleGrid, Error> {
        let (codewords, size) = self.codewords(None)?;
        Ok(placement::place(&codewords, size))
    }

    /// Seal into a fixed symbol size (edge length in modules).
    pub fn symbol_with_dim(self, dim: usize) -> Result<ModuleGrid, Error> {
        let size = tables::exact(dim)?;
        let (codewords, size) = self.codewords(Some(size))?;
        Ok(placement::place(&codewords, size))
    }

    /// The full codeword stream (padded data followed by ECC) and the
    /// symbol size it targets, without placing it. `pinned` fixes the
    /// size; `None` picks the smallest fit.
    pub fn codewords(self, pinned: Option<SymbolSize>) -> Result<(Vec<u8>, SymbolSize), Error> {
        let (mut data, size) = self.data_codewords(pinned)?;
        encode::pad(&mut data, size.data_codewords)?;
        let parity = ecc::data_matrix_ecc(&data, size.ecc_codewords)?;
        data.extend_from_slice(&parity);
        Ok((data, size))
    }

    /// Unpadded data codewords plus the chosen size.
    fn data_codewords(self, pinned: Option<SymbolSize>) -> Result<(Vec<u8>, SymbolSize), Error> {
        let mut out: Vec<u8> = Vec::new();
        let last = self.segments.len().wrapping_sub(1);
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Ascii(bytes) => out.extend(encode::ascii(bytes)),
                Segment::C40(bytes) => {
                    out.push(LATCH_C40);
                    out.extend(encode::tri(encode::TriMode::C40, bytes)?);
                    out.push(UNLATCH);
                }
                Segment::Text(bytes) => {
                    out.push(LATCH_TEXT);
                    out.extend(encode::tri(encode::TriMode::Text, bytes)?);
                    out.push(UNLATCH);
                }
                Segment::Base256(bytes) => {
                    out.push(LATCH_BASE256);
                    // a trailing run that lands exactly on a symbol
                    // boundary uses the to-end-of-symbol length prefix
                    let start = out.len() + 1;
                    let exact_len = out.len() + 1 + bytes.len();
                    let to_end = i == last
                        && match pinned {
                            Some(s) => s.data_codewords == exact_len,
                            None => SYMBOL_SIZES.iter().any(|s| s.data_codewords == exact_len),
                        };
                    out.extend(encode::base256(bytes, start, to_end)?);
                }
            }
        }
        let size = match pinned {
            Some(s) => {
                if out.len() > s.data_codewords {
                    return Err(Error::CapacityExceeded {
                        needed: out.len(),
                        capacity: s.data_codewords,
                    });
                }
                s
            }
            None => tables::fitting(out.len())?,
        };
        Ok((out, size))
    }
}

/// Expert bypass: place an already-complete codeword stream (data plus
/// ECC, caller-computed) into a symbol of the given edge length. No
/// encoding, padding, or ECC is applied, so deliberately corrupt
/// streams are accepted as long as the length matches.
pub fn place_raw(codewords: &[u8], dim: usize) -> Result<ModuleGrid, Error> {
    let size = tables::exact(dim)?;
    if codewords.len() != size.total_codewords() {
        return Err(Error::InvalidInput(
            "raw placement needs exactly the symbol's total codeword count",
        ));
    }
    Ok(placement::place(codewords, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_digits_pick_the_10x10() {
        let (cw, size) = DataMatrixEncoder::new()
            .append_ascii("123456")
            .codewords(None)
            .unwrap();
        assert_eq!(size.dim, 10);
        assert_eq!(cw, [142, 164, 186, 114, 25, 5, 88, 102]);
    }

    #[test]
    fn c40_run_latches_and_unlatches() {
        let (cw, _) = DataMatrixEncoder::new()
            .append_c40("AIM")
            .codewords(None)
            .unwrap();
        assert_eq!(cw[0], LATCH_C40);
        assert_eq!(&cw[1..3], [91, 11]);
        assert_eq!(cw[3], UNLATCH);
    }

    #[test]
    fn mixed_runs_keep_order() {
        let (cw, _) = DataMatrixEncoder::new()
            .append_ascii("A")
            .append_text("abc")
            .append_ascii("7")
            .codewords(None)
            .unwrap();
        assert_eq!(cw[0], b'A' + 1);
        assert_eq!(cw[1], LATCH_TEXT);
        assert_eq!(cw[4], UNLATCH);
        assert_eq!(cw[5], b'7' + 1);
    }

    #[test]
    fn trailing_base256_takes_the_to_end_prefix() {
        // latch + zero prefix + 10 bytes = 12 codewords = 16x16 exactly
        let (cw, size) = DataMatrixEncoder::new()
            .append_bytes(&[0xAA; 10])
            .codewords(None)
            .unwrap();
        assert_eq!(size.dim, 16);
        assert_eq!(cw.len(), size.total_codewords());
        assert_eq!(cw[0], LATCH_BASE256);
        // position 2, byte 0: pseudo = (149 * 2) % 255 + 1 = 44
        assert_eq!(cw[1], 44);
    }

    #[test]
    fn pinned_size_rejects_overflow() {
        let err = DataMatrixEncoder::new()
            .append_ascii("ABCDEFGH")
            .symbol_with_dim(10)
            .unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { .. }));
    }

    #[test]
    fn pinned_size_pads_up() {
        let (cw, size) = DataMatrixEncoder::new()
            .append_ascii("A")
            .codewords(Some(tables::exact(12).unwrap()))
            .unwrap();
        assert_eq!(size.dim, 12);
        assert_eq!(cw.len(), 12);
        assert_eq!(cw[1], 129);
    }

    #[test]
    fn place_raw_checks_length_only() {
        assert!(place_raw(&[0; 8], 10).is_ok());
        assert!(matches!(
            place_raw(&[0; 7], 10),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(place_raw(&[0; 8], 11), Err(Error::UnsupportedSize(_))));
    }

    #[test]
    fn golden_10x10_symbol() {
        // "123456" end to end; spot-check the finder and a data module
        let grid = DataMatrixEncoder::new()
            .append_ascii("123456")
            .symbol()
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (10, 10));
        assert!(grid.is_mark(0, 0));
        assert!(grid.is_mark(9, 9));
    }
}
