//! Barcode symbol encoders producing module grids.
//!
//! Five symbologies share one output type, [`ModuleGrid`]: a
//! rectangular field of marks and spaces plus the quiet-zone width the
//! symbology mandates. Nothing here rasterizes or does I/O; the grid is
//! meant to be turned into embossed dots, pixels, or SCAD geometry by
//! the caller (an optional `embedded-graphics` adapter lives behind the
//! feature of the same name).
//!
//! - [`ean`]: EAN-13 and UPC-A, with check digit verification
//! - [`code39`]: Code 39 with optional mod-43 check character
//! - [`code128`]: Code 128 sets A, B, and C
//! - [`datamatrix`]: Data Matrix ECC200, square sizes 10x10 to 26x26
//! - [`qr`]: QR versions 1 to 6, all four correction levels
//!
//! The 2D encoders also expose `place_raw` bypasses that lay out a
//! caller-computed codeword stream untouched, for symbols meant to be
//! wrong on purpose.
//!
//! ```
//! use embosscode::qr::{self, EcLevel, QrOptions, Segment};
//!
//! let grid = qr::encode(
//!     &[Segment::Byte(b"https://example.com")],
//!     &QrOptions { level: EcLevel::M, version: None, mask: 4 },
//! )
//! .unwrap();
//! for row in grid.rows() {
//!     // one slice of marks/spaces per module row
//!     assert_eq!(row.len(), grid.width());
//! }
//! ```

pub mod bits;
pub mod checksum;
pub mod code128;
pub mod code39;
pub mod datamatrix;
pub mod ean;
pub mod ecc;
pub mod error;
pub mod gf;
pub mod grid;
pub mod qr;
#[cfg(feature = "embedded-graphics")]
pub mod render;

pub use error::{Error, Warning};
pub use grid::{Module, ModuleGrid};
