//! Code 128 encoder (ISO/IEC 15417).
//!
//! Payload is appended as runs in a fixed code set; the first run's
//! start code and the code-set switches between later runs come out of
//! the builder. Each symbol value renders as three bars and three
//! spaces whose widths sum to 11 modules; the stop pattern carries an
//! extra two-module termination bar.

use crate::checksum;
use crate::error::Error;
use crate::grid::{Module, ModuleGrid};

/// Function and shift symbols, for caller-composed value sequences.
pub const FNC3: u8 = 96;
pub const FNC2: u8 = 97;
pub const SHIFT: u8 = 98;
pub const FNC1: u8 = 102;

pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;
pub const SWITCH_A: u8 = 101;
pub const SWITCH_B: u8 = 100;
pub const SWITCH_C: u8 = 99;
pub const STOP: u8 = 106;

const QUIET_ZONE: usize = 10;

/// Bar/space widths for symbol values 0 through 106, three bars and
/// three spaces each, bar first.
#[rustfmt::skip]
const WIDTHS: [&[u8; 6]; 107] = [
    b"212222", b"222122", b"222221", b"121223", b"121322", b"131222",
    b"122213", b"122312", b"132212", b"221213", b"221312", b"231212",
    b"112232", b"122132", b"122231", b"113222", b"123122", b"123221",
    b"223211", b"221132", b"221231", b"213212", b"223112", b"312131",
    b"311222", b"321122", b"321221", b"312212", b"322112", b"322211",
    b"212123", b"212321", b"232121", b"111323", b"131123", b"131321",
    b"112313", b"132113", b"132311", b"211313", b"231113", b"231311",
    b"112133", b"112331", b"132131", b"113123", b"113321", b"133121",
    b"313121", b"211331", b"231131", b"213113", b"213311", b"213131",
    b"311123", b"311321", b"331121", b"312113", b"312311", b"332111",
    b"314111", b"221411", b"431111", b"111224", b"111422", b"121124",
    b"121421", b"141122", b"141221", b"112214", b"112412", b"122114",
    b"122411", b"142112", b"142211", b"241211", b"221114", b"413111",
    b"241112", b"134111", b"111242", b"121142", b"121241", b"114212",
    b"124112", b"124211", b"411212", b"421112", b"421211", b"212141",
    b"214121", b"412121", b"111143", b"111341", b"131141", b"114113",
    b"114311", b"411113", b"411311", b"113141", b"114131", b"311141",
    b"411131", b"211412", b"211214", b"211232", b"233111",
];

/// Symbol values for a run in code set A (upper case, digits, and the
/// control characters).
pub fn values_a(text: &str) -> Result<Vec<u8>, Error> {
    text.bytes()
        .map(|c| match c {
            0x20..=0x5F => Ok(c - 0x20),
            0x00..=0x1F => Ok(c + 64),
            _ => Err(Error::InvalidInput("code set A covers ASCII 0 through 95")),
        })
        .collect()
}

/// Symbol values for a run in code set B (the full printable range).
pub fn values_b(text: &str) -> Result<Vec<u8>, Error> {
    text.bytes()
        .map(|c| match c {
            0x20..=0x7F => Ok(c - 0x20),
            _ => Err(Error::InvalidInput("code set B covers ASCII 32 through 127")),
        })
        .collect()
}

/// Symbol values for a run in code set C: digit pairs, one value per
/// pair. An odd trailing digit is dropped.
pub fn values_c(digits: &str) -> Result<Vec<u8>, Error> {
    let bytes = digits.as_bytes();
    if !bytes.iter().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput("code set C only encodes digits"));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|p| (p[0] - b'0') * 10 + (p[1] - b'0'))
        .collect())
}

#[derive(Debug, Clone)]
enum Run {
    A(String),
    B(String),
    C(String),
}

/// Builder over code-set runs. The caller picks the sets; no automatic
/// set optimization is attempted.
#[derive(Debug, Clone, Default)]
pub struct Code128Encoder {
    runs: Vec<Run>,
}

impl Code128Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_a(mut self, text: &str) -> Self {
        self.runs.push(Run::A(text.to_owned()));
        self
    }

    pub fn append_b(mut self, text: &str) -> Self {
        self.runs.push(Run::B(text.to_owned()));
        self
    }

    pub fn append_c(mut self, digits: &str) -> Self {
        self.runs.push(Run::C(digits.to_owned()));
        self
    }

    /// Symbol values before the check character and stop: start code,
    /// runs, and a switch code ahead of every run after the first.
    pub fn values(&self) -> Result<Vec<u8>, Error> {
        if self.runs.is_empty() {
            return Err(Error::InvalidInput("a Code 128 symbol needs at least one run"));
        }
        let mut out = Vec::new();
        for (i, run) in self.runs.iter().enumerate() {
            let (start, switch, body) = match run {
                Run::A(t) => (START_A, SWITCH_A, values_a(t)?),
                Run::B(t) => (START_B, SWITCH_B, values_b(t)?),
                Run::C(t) => (START_C, SWITCH_C, values_c(t)?),
            };
            out.push(if i == 0 { start } else { switch });
            out.extend(body);
        }
        Ok(out)
    }

    /// Seal: append the mod-103 check character and the stop pattern,
    /// then render.
    pub fn symbol(self) -> Result<ModuleGrid, Error> {
        let values = self.values()?;
        Ok(render(&values))
    }
}

/// Expert bypass: render caller-supplied symbol values. The sequence
/// must open with a start code; any later start code is normalized to
/// the matching switch. The check character and stop are appended.
pub fn symbol_from_values(values: &[u8]) -> Result<ModuleGrid, Error> {
    let Some((&first, rest)) = values.split_first() else {
        return Err(Error::InvalidInput("a Code 128 symbol needs at least one value"));
    };
    if !(START_A..=START_C).contains(&first) {
        return Err(Error::InvalidInput("value sequence must open with a start code"));
    }
    let mut normalized = Vec::with_capacity(values.len());
    normalized.push(first);
    for &v in rest {
        normalized.push(match v {
            START_A => SWITCH_A,
            START_B => SWITCH_B,
            START_C => SWITCH_C,
            0..=102 => v,
            _ => return Err(Error::InvalidInput("symbol values are 0 through 105")),
        });
    }
    Ok(render(&normalized))
}

/// Widths to modules: alternating bar/space runs, check character and
/// stop included.
fn render(values: &[u8]) -> ModuleGrid {
    let check = checksum::mod103(values);
    // 11 modules per value incl. check and stop, plus the 2-module
    // termination bar
    let width = (values.len() + 2) * 11 + 2;
    let mut grid = ModuleGrid::new(width, 1, QUIET_ZONE);
    let mut col = 0;
    for &v in values.iter().chain([&check, &STOP]) {
        for (i, &w) in WIDTHS[v as usize].iter().enumerate() {
            let n = (w - b'0') as usize;
            if i % 2 == 0 {
                for k in 0..n {
                    grid.set(0, col + k, Module::Mark);
                }
            }
            col += n;
        }
    }
    // termination bar
    grid.set(0, col, Module::Mark);
    grid.set(0, col + 1, Module::Mark);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(grid: &ModuleGrid) -> String {
        (0..grid.width())
            .map(|c| if grid.is_mark(0, c) { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn widths_all_sum_to_eleven() {
        for (v, w) in WIDTHS.iter().enumerate() {
            let sum: u8 = w.iter().map(|c| c - b'0').sum();
            assert_eq!(sum, 11, "value {v}");
        }
    }

    #[test]
    fn known_patterns() {
        // value 0 (space in sets A and B)
        assert_eq!(WIDTHS[0], b"212222");
        let grid = render(&[START_B]);
        assert!(row(&grid).starts_with("11010010000"));
        // stop with termination: 2331112
        assert!(row(&grid).ends_with("1100011101011"));
    }

    #[test]
    fn set_values() {
        assert_eq!(values_a("A \x07").unwrap(), vec![33, 0, 71]);
        assert_eq!(values_b("Wiki").unwrap(), vec![55, 73, 75, 73]);
        assert_eq!(values_c("123456").unwrap(), vec![12, 34, 56]);
        assert!(values_a("a").is_err());
        assert!(values_b("\x1F").is_err());
        assert!(values_c("12x").is_err());
    }

    #[test]
    fn odd_trailing_digit_is_dropped() {
        assert_eq!(values_c("12345").unwrap(), vec![12, 34]);
    }

    #[test]
    fn builder_emits_start_then_switches() {
        let values = Code128Encoder::new()
            .append_b("AB")
            .append_c("1234")
            .values()
            .unwrap();
        assert_eq!(values, vec![START_B, 33, 34, SWITCH_C, 12, 34]);
    }

    #[test]
    fn symbol_width_accounts_for_check_and_stop() {
        let grid = Code128Encoder::new().append_c("12").symbol().unwrap();
        // start + one pair + check + stop = 4 values, 46 modules
        assert_eq!(grid.width(), 4 * 11 + 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.quiet_zone(), 10);
    }

    #[test]
    fn raw_values_normalize_inner_starts() {
        // a start code mid-stream becomes the matching switch
        let grid = symbol_from_values(&[START_B, 33, START_C, 12]).unwrap();
        let built = Code128Encoder::new()
            .append_b("A")
            .append_c("12")
            .symbol()
            .unwrap();
        assert_eq!(row(&grid), row(&built));
    }

    #[test]
    fn raw_values_must_open_with_a_start() {
        assert!(matches!(
            symbol_from_values(&[33, 34]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(symbol_from_values(&[]), Err(Error::InvalidInput(_))));
    }
}
