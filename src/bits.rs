//! Variable-width bit fields and MSB-first packing.
//!
//! QR mode encoders emit values that are 1 to 16 bits wide; the stream
//! is packed most-significant-bit first into bytes, and the final byte
//! may be incomplete. The padding stage needs to know about that
//! trailing partial field, so `pack` returns it explicitly instead of
//! zero-extending behind the caller's back.

/// A not-yet-byte-aligned quantity: `width` bits (1..=16) of `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitfield {
    pub value: u16,
    pub width: u8,
}

impl Bitfield {
    pub fn new(value: u16, width: u8) -> Self {
        assert!(width >= 1 && width <= 16, "bitfield width must be 1..=16");
        assert!(
            width == 16 || value < (1 << width),
            "bitfield value does not fit its width"
        );
        Self { value, width }
    }

    /// A plain byte modeled as a width-8 field.
    pub fn byte(value: u8) -> Self {
        Self { value: value as u16, width: 8 }
    }
}

/// Total width of a field sequence in bits.
pub fn bit_len(fields: &[Bitfield]) -> usize {
    fields.iter().map(|f| f.width as usize).sum()
}

/// Pack `fields` MSB-first. Returns the complete bytes and, when the
/// total width is not a multiple of 8, the trailing partial bitfield
/// (its value holds the leftover high bits, right-aligned).
pub fn pack(fields: &[Bitfield]) -> (Vec<u8>, Option<Bitfield>) {
    let total = bit_len(fields);
    let mut out = Vec::with_capacity(total / 8 + 1);
    let mut acc: u32 = 0;
    let mut used: u8 = 0;
    for f in fields {
        acc = (acc << f.width) | f.value as u32;
        used += f.width;
        while used >= 8 {
            used -= 8;
            out.push((acc >> used) as u8);
            acc &= (1 << used) - 1;
        }
    }
    let tail = if used > 0 {
        Some(Bitfield::new(acc as u16, used))
    } else {
        None
    };
    (out, tail)
}

/// Re-split a packed stream by the original widths. Test/verification
/// aid for the lossless-packing property.
pub fn unpack(bytes: &[u8], tail: Option<Bitfield>, widths: &[u8]) -> Vec<Bitfield> {
    let mut bits: Vec<bool> = Vec::with_capacity(bytes.len() * 8 + 16);
    for &b in bytes {
        for i in (0..8).rev() {
            bits.push((b >> i) & 1 != 0);
        }
    }
    if let Some(t) = tail {
        for i in (0..t.width).rev() {
            bits.push((t.value >> i) & 1 != 0);
        }
    }
    let mut out = Vec::with_capacity(widths.len());
    let mut pos = 0;
    for &w in widths {
        let mut v: u16 = 0;
        for _ in 0..w {
            v = (v << 1) | bits[pos] as u16;
            pos += 1;
        }
        out.push(Bitfield::new(v, w));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_msb_first() {
        // the start of a QR byte-mode stream: mode, count, first byte
        let fields = [
            Bitfield::new(0b0100, 4),
            Bitfield::new(5, 8),
            Bitfield::byte(b'H'),
        ];
        let (bytes, tail) = pack(&fields);
        // 0100 | 00000101 | 01001000 -> two bytes and a 4-bit tail
        assert_eq!(bytes, [0x40, 0x54]);
        assert_eq!(tail, Some(Bitfield::new(0b1000, 4)));
    }

    #[test]
    fn trailing_partial_is_reported() {
        let fields = [Bitfield::new(0b101, 3), Bitfield::new(0x1FF, 9), Bitfield::new(0b11, 2)];
        let (bytes, tail) = pack(&fields);
        assert_eq!(bytes, [0b1011_1111]);
        assert_eq!(tail, Some(Bitfield::new(0b11_1111, 6)));
    }

    #[test]
    fn pack_unpack_round_trip() {
        let fields = [
            Bitfield::new(1, 1),
            Bitfield::new(0, 1),
            Bitfield::new(0x7FF, 11),
            Bitfield::new(0b0101, 4),
            Bitfield::new(0xFFFF, 16),
            Bitfield::new(0x2C, 7),
            Bitfield::new(3, 10),
        ];
        let widths: Vec<u8> = fields.iter().map(|f| f.width).collect();
        let (bytes, tail) = pack(&fields);
        assert_eq!(unpack(&bytes, tail, &widths), fields);
    }

    #[test]
    fn exact_byte_multiple_has_no_tail() {
        let (bytes, tail) = pack(&[Bitfield::byte(0xAB), Bitfield::byte(0xCD)]);
        assert_eq!(bytes, [0xAB, 0xCD]);
        assert!(tail.is_none());
    }
}
