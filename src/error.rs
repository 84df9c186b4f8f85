use thiserror::Error;

/// Hard failures. Every variant is detected before any output is
/// produced; the crate never returns a codeword stream that does not
/// match its declared capacity and ECC parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The payload, after padding, does not fit the target symbol.
    #[error("payload needs {needed} codewords but the symbol holds {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// No property-table or factor-table entry for the requested
    /// size/version/ECC combination. A capability ceiling, not a bug.
    #[error("unsupported size: {0}")]
    UnsupportedSize(&'static str),

    /// Out-of-range or malformed parameter, rejected at the boundary.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Non-fatal diagnostics. A symbol carrying warnings was still fully
/// generated; intentionally-corrupt symbols are a supported use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The caller-supplied check digit does not match the computed one.
    /// The symbol is generated with the supplied digit.
    ChecksumMismatch { supplied: u8, computed: u8 },
}
