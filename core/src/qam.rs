//! 16-QAM constellation mapping and bounded quantization.
//!
//! Each component of a symbol comes from the {-3, -1, 1, 3} grid normalized
//! by 4. The level table is indexed by the 2-bit value, so "00" maps to the
//! highest level and "11" to the lowest.

use crate::error::{ModemError, Result};
use crate::QAM_BITS_PER_SYMBOL;

/// Normalized component levels indexed by the 2-bit value.
pub const IQ_LEVELS: [f64; 4] = [0.75, 0.25, -0.25, -0.75];

const BIT_PAIRS: [&str; 4] = ["00", "01", "10", "11"];

/// Tolerance for matching a quantized level against the table.
const LEVEL_EPSILON: f64 = 1e-6;

/// One 16-QAM symbol: in-phase and quadrature amplitude indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QamSymbol {
    pub i: f64,
    pub q: f64,
}

fn bit_value(ch: char) -> Result<usize> {
    match ch {
        '0' => Ok(0),
        '1' => Ok(1),
        other => Err(ModemError::InvalidBitValue { ch: other }),
    }
}

/// Group a binary message into 4-bit symbols: bits 0-1 select I, bits 2-3
/// select Q. The length must be a multiple of 4.
pub fn map_bits_to_symbols(bits: &str) -> Result<Vec<QamSymbol>> {
    if bits.len() % QAM_BITS_PER_SYMBOL != 0 {
        return Err(ModemError::InvalidBitLength { len: bits.len() });
    }

    let digits: Vec<usize> = bits.chars().map(bit_value).collect::<Result<_>>()?;
    let symbols = digits
        .chunks(QAM_BITS_PER_SYMBOL)
        .map(|group| QamSymbol {
            i: IQ_LEVELS[group[0] * 2 + group[1]],
            q: IQ_LEVELS[group[2] * 2 + group[3]],
        })
        .collect();
    Ok(symbols)
}

/// Quantize a raw recovered component to the nearest odd-integer grid point,
/// normalized back to the level table scale: floor(x * 2) * 2 + 1, over 4.
pub fn quantize_level(raw: f64) -> f64 {
    (((raw * 2.0).floor() * 2.0) + 1.0) / 4.0
}

/// Map a quantized level back to its 2-bit code. `None` when the level fell
/// outside the table, which the demodulator treats as channel distortion.
pub fn level_to_bits(level: f64) -> Option<&'static str> {
    IQ_LEVELS
        .iter()
        .position(|&candidate| (candidate - level).abs() < LEVEL_EPSILON)
        .map(|index| BIT_PAIRS[index])
}
