//! QR segment encoding, terminator/padding, and block interleaving.

use super::tables::{self, EcLevel, VersionLevel};
use crate::bits::{self, Bitfield};
use crate::ecc;
use crate::error::Error;

/// Alternating pad codewords after the terminator.
const PAD_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// One run of payload in a single mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Numeric(&'a str),
    Alphanumeric(&'a str),
    Byte(&'a [u8]),
}

impl Segment<'_> {
    fn mode_indicator(&self) -> u16 {
        match self {
            Segment::Numeric(_) => 0b0001,
            Segment::Alphanumeric(_) => 0b0010,
            Segment::Byte(_) => 0b0100,
        }
    }

    /// Character count field width for versions 1 through 9.
    fn count_width(&self) -> u8 {
        match self {
            Segment::Numeric(_) => 10,
            Segment::Alphanumeric(_) => 9,
            Segment::Byte(_) => 8,
        }
    }

    fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(s) | Segment::Alphanumeric(s) => s.len(),
            Segment::Byte(b) => b.len(),
        }
    }

    /// Header plus body bitfields for this segment.
    pub fn to_bits(&self, out: &mut Vec<Bitfield>) -> Result<(), Error> {
        let count = self.char_count();
        if count >= 1 << self.count_width() {
            return Err(Error::InvalidInput("segment too long for its count field"));
        }
        out.push(Bitfield::new(self.mode_indicator(), 4));
        out.push(Bitfield::new(count as u16, self.count_width()));
        match self {
            Segment::Numeric(s) => numeric_bits(s, out),
            Segment::Alphanumeric(s) => alphanumeric_bits(s, out),
            Segment::Byte(b) => {
                out.extend(b.iter().map(|&x| Bitfield::byte(x)));
                Ok(())
            }
        }
    }
}

/// Groups of 3 digits pack into 10 bits; a 2-digit or 1-digit tail
/// packs into 7 or 4 bits.
fn numeric_bits(s: &str, out: &mut Vec<Bitfield>) -> Result<(), Error> {
    let digits = s.as_bytes();
    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput("numeric mode only encodes digits"));
    }
    for group in digits.chunks(3) {
        let v = group.iter().fold(0u16, |acc, &d| acc * 10 + (d - b'0') as u16);
        out.push(Bitfield::new(v, [4, 7, 10][group.len() - 1]));
    }
    Ok(())
}

/// Value of a character in the 45-symbol alphanumeric alphabet.
fn alphanumeric_value(c: u8) -> Result<u16, Error> {
    Ok(match c {
        b'0'..=b'9' => (c - b'0') as u16,
        b'A'..=b'Z' => (c - b'A') as u16 + 10,
        b' ' => 36,
        b'$' => 37,
        b'%' => 38,
        b'*' => 39,
        b'+' => 40,
        b'-' => 41,
        b'.' => 42,
        b'/' => 43,
        b':' => 44,
        _ => return Err(Error::InvalidInput("character outside the alphanumeric set")),
    })
}

/// Pairs pack as v1 * 45 + v2 into 11 bits; an odd tail takes 6 bits.
fn alphanumeric_bits(s: &str, out: &mut Vec<Bitfield>) -> Result<(), Error> {
    for pair in s.as_bytes().chunks(2) {
        match pair {
            [a, b] => out.push(Bitfield::new(
                alphanumeric_value(*a)? * 45 + alphanumeric_value(*b)?,
                11,
            )),
            [a] => out.push(Bitfield::new(alphanumeric_value(*a)?, 6)),
            _ => unreachable!(),
        }
    }
    Ok(())
}

/// Encode segments into the full data codeword stream for one
/// (version, level): headers and bodies, the up-to-4-bit terminator,
/// zero bits to the byte boundary, then alternating pad codewords.
pub fn data_codewords(
    segments: &[Segment],
    version: u8,
    level: EcLevel,
) -> Result<Vec<u8>, Error> {
    let p = tables::properties(version, level)?;
    let capacity_bits = p.data_codewords * 8;

    let mut fields: Vec<Bitfield> = Vec::new();
    for seg in segments {
        seg.to_bits(&mut fields)?;
    }
    let used = bits::bit_len(&fields);
    if used > capacity_bits {
        return Err(Error::CapacityExceeded {
            needed: used.div_ceil(8),
            capacity: p.data_codewords,
        });
    }
    // terminator shrinks to the room left; a full stream takes none
    let term = (capacity_bits - used).min(4);
    if term > 0 {
        fields.push(Bitfield::new(0, term as u8));
    }
    let (mut codewords, tail) = bits::pack(&fields);
    if let Some(t) = tail {
        codewords.push((t.value << (8 - t.width)) as u8);
    }
    for (i, _) in (codewords.len()..p.data_codewords).enumerate() {
        codewords.push(PAD_CODEWORDS[i % 2]);
    }
    Ok(codewords)
}

/// Total payload bits the segments need, for version selection.
pub fn payload_bits(segments: &[Segment]) -> Result<usize, Error> {
    let mut fields = Vec::new();
    for seg in segments {
        seg.to_bits(&mut fields)?;
    }
    Ok(bits::bit_len(&fields))
}

/// Split data codewords into blocks (short blocks first), compute each
/// block's ECC, and interleave: data column-wise with exhausted short
/// blocks skipped, then ECC column-wise.
pub fn interleave(data: &[u8], p: VersionLevel) -> Result<Vec<u8>, Error> {
    debug_assert_eq!(data.len(), p.data_codewords);
    let lengths = tables::block_lengths(p);
    let mut blocks: Vec<&[u8]> = Vec::with_capacity(p.blocks);
    let mut offset = 0;
    for len in &lengths {
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }
    let ecc_blocks: Vec<Vec<u8>> = blocks
        .iter()
        .map(|b| ecc::qr_ecc(b, p.ecc_per_block))
        .collect::<Result<_, _>>()?;

    let longest = *lengths.last().unwrap_or(&0);
    let mut out = Vec::with_capacity(p.data_codewords + p.ecc_per_block * p.blocks);
    for i in 0..longest {
        for b in &blocks {
            if i < b.len() {
                out.push(b[i]);
            }
        }
    }
    for i in 0..p.ecc_per_block {
        for e in &ecc_blocks {
            out.push(e[i]);
        }
    }
    Ok(out)
}
