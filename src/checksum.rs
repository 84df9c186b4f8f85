//! Check digit and check character calculators for the linear
//! symbologies.

/// Weighted mod-10 check digit (UPC-A, EAN-13). Digits are the payload
/// without the check position; the rightmost payload digit gets weight 3.
pub fn mod10(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Code 128 check character: weighted sum of symbol values mod 103.
/// `values` starts with the start code (weight 1); following symbols
/// get their 1-based position as weight.
pub fn mod103(values: &[u8]) -> u8 {
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v as u32 * (i as u32).max(1))
        .sum();
    (sum % 103) as u8
}

/// Code 39 check character: sum of symbol values mod 43.
pub fn mod43(values: &[u8]) -> u8 {
    let sum: u32 = values.iter().map(|&v| v as u32).sum();
    (sum % 43) as u8
}
