//! Data Matrix mode encoders and the randomized padding engine.
//!
//! Each encoder turns a run of input into codewords for one encodation
//! mode. Mode latching (230/239/231/254) is the builder's job in
//! `super`; these functions only see the run they own.

use crate::error::Error;

/// C40/Text shift codes inside the basic set.
const SHIFT1: u8 = 0;
const SHIFT2: u8 = 1;
const SHIFT3: u8 = 2;

/// Upper shift prefix in ASCII mode.
const UPPER_SHIFT: u8 = 235;

/// ASCII encodation: digit pairs compress to one codeword, other bytes
/// encode as value + 1, and bytes above 127 get an upper-shift prefix.
pub fn ascii(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let c = input[i];
        if c.is_ascii_digit() && i + 1 < input.len() && input[i + 1].is_ascii_digit() {
            out.push((c - b'0') * 10 + (input[i + 1] - b'0') + 130);
            i += 2;
        } else if c < 128 {
            out.push(c + 1);
            i += 1;
        } else {
            out.push(UPPER_SHIFT);
            out.push(c - 128 + 1);
            i += 1;
        }
    }
    out
}

/// Character-to-value expansion shared by C40 and Text. The two modes
/// differ only in which letter case sits in the basic set and in the
/// shift-3 page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriMode {
    C40,
    Text,
}

fn tri_values(mode: TriMode, c: u8, out: &mut Vec<u8>) -> Result<(), Error> {
    match c {
        b' ' => out.push(3),
        b'0'..=b'9' => out.push(c - b'0' + 4),
        0..=31 => {
            out.push(SHIFT1);
            out.push(c);
        }
        33..=47 => {
            out.push(SHIFT2);
            out.push(c - 33);
        }
        58..=64 => {
            out.push(SHIFT2);
            out.push(c - 58 + 15);
        }
        91..=95 => {
            out.push(SHIFT2);
            out.push(c - 91 + 22);
        }
        b'A'..=b'Z' => match mode {
            TriMode::C40 => out.push(c - b'A' + 14),
            TriMode::Text => {
                out.push(SHIFT3);
                out.push(c - b'A' + 1);
            }
        },
        b'a'..=b'z' => match mode {
            TriMode::C40 => {
                out.push(SHIFT3);
                out.push(c - 96);
            }
            TriMode::Text => out.push(c - b'a' + 14),
        },
        96 => match mode {
            TriMode::C40 => {
                out.push(SHIFT3);
                out.push(0);
            }
            TriMode::Text => {
                out.push(SHIFT3);
                out.push(0);
            }
        },
        123..=127 => {
            out.push(SHIFT3);
            match mode {
                TriMode::C40 => out.push(c - 96),
                TriMode::Text => out.push(c - 123 + 27),
            }
        }
        _ => return Err(Error::InvalidInput("C40/Text modes only cover 7-bit ASCII")),
    }
    Ok(())
}

/// C40 or Text encodation: expand to 6-bit values, pack triples as
/// v1*1600 + v2*40 + v3 + 1 into two codewords each. A trailing partial
/// triple is dropped; callers that care route the tail through ASCII
/// mode instead.
pub fn tri(mode: TriMode, input: &[u8]) -> Result<Vec<u8>, Error> {
    let mut values = Vec::with_capacity(input.len() * 2);
    for &c in input {
        tri_values(mode, c, &mut values)?;
    }
    let mut out = Vec::with_capacity(values.len() / 3 * 2);
    for triple in values.chunks_exact(3) {
        let v = triple[0] as u16 * 1600 + triple[1] as u16 * 40 + triple[2] as u16 + 1;
        out.push((v >> 8) as u8);
        out.push((v & 0xFF) as u8);
    }
    Ok(out)
}

/// 255-state randomization for Base 256 codewords. `position` is the
/// 1-based index of the codeword in the finished symbol stream.
fn randomize_255(byte: u8, position: usize) -> u8 {
    let pseudo = (149 * position) % 255 + 1;
    ((byte as usize + pseudo) % 256) as u8
}

/// Base 256 encodation: length prefix plus raw bytes, every codeword
/// randomized by its position in the symbol. `start_position` is the
/// 1-based symbol position the first emitted codeword will occupy.
/// `fills_symbol` replaces the prefix with a single zero, meaning "to
/// end of symbol".
pub fn base256(
    input: &[u8],
    start_position: usize,
    fills_symbol: bool,
) -> Result<Vec<u8>, Error> {
    if input.len() > 1555 {
        return Err(Error::InvalidInput("Base 256 run longer than 1555 bytes"));
    }
    let mut plain = Vec::with_capacity(input.len() + 2);
    if fills_symbol {
        plain.push(0);
    } else if input.len() < 250 {
        plain.push(input.len() as u8);
    } else {
        plain.push(249 + (input.len() / 250) as u8);
        plain.push((input.len() % 250) as u8);
    }
    plain.extend_from_slice(input);
    Ok(plain
        .iter()
        .enumerate()
        .map(|(i, &b)| randomize_255(b, start_position + i))
        .collect())
}

/// 253-state pad codeword for a 1-based symbol position.
fn randomize_253(position: usize) -> u8 {
    let pseudo = (149 * position) % 253 + 1;
    let pad = 129 + pseudo;
    if pad > 254 {
        (pad - 254) as u8
    } else {
        pad as u8
    }
}

/// Pad `codewords` in place up to `capacity`: one end-of-message
/// codeword (129) first, then randomized pads. Positions are 1-based
/// over the whole data stream. A full stream needs no end-of-message.
pub fn pad(codewords: &mut Vec<u8>, capacity: usize) -> Result<(), Error> {
    if codewords.len() > capacity {
        return Err(Error::CapacityExceeded {
            needed: codewords.len(),
            capacity,
        });
    }
    if codewords.len() < capacity {
        codewords.push(129);
    }
    while codewords.len() < capacity {
        codewords.push(randomize_253(codewords.len() + 1));
    }
    Ok(())
}
