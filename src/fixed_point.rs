use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EncodeError;

pub const FRACTION_BITS: u32 = 15;
pub const SCALE: f64 = (1u32 << FRACTION_BITS) as f64;
pub const HEX_DIGITS: usize = 4;

/// Only an amplitude of exactly +1.0 can hit this (it scales to 2^15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Clamp to `i16::MIN..=i16::MAX`.
    #[default]
    Saturate,
    /// Keep the low 16 bits, so 32768 becomes `8000`.
    Wrap,
    /// Fail the whole table.
    Reject,
}

pub fn quantize(index: usize, amplitude: f64, policy: OverflowPolicy) -> Result<i16, EncodeError> {
    if !amplitude.is_finite() {
        return Err(EncodeError::NotFinite { index });
    }

    let value = (amplitude * SCALE).trunc() as i64;
    if let Ok(word) = i16::try_from(value) {
        return Ok(word);
    }

    match policy {
        OverflowPolicy::Saturate => {
            let word = value.clamp(i16::MIN as i64, i16::MAX as i64) as i16;
            warn!(index, value, word, "fixed-point overflow, saturating");
            Ok(word)
        }
        OverflowPolicy::Wrap => {
            let word = value as i16;
            warn!(index, value, word, "fixed-point overflow, wrapping");
            Ok(word)
        }
        OverflowPolicy::Reject => Err(EncodeError::Overflow { index, value }),
    }
}

pub fn to_amplitude(word: i16) -> f64 {
    word as f64 / SCALE
}

pub fn to_hex(word: i16) -> String {
    format!("{:04x}", word as u16)
}

/// Parses exactly four hex digits as a two's-complement word.
pub fn from_hex(token: &str) -> Option<i16> {
    if token.len() != HEX_DIGITS || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(token, 16).ok().map(|raw| raw as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        let step = 1.0 / SCALE;
        assert_eq!(quantize(0, 2.9 * step, OverflowPolicy::Reject), Ok(2));
        assert_eq!(quantize(0, -2.9 * step, OverflowPolicy::Reject), Ok(-2));
    }

    #[test]
    fn full_scale_positive_follows_policy() {
        assert_eq!(quantize(7, 1.0, OverflowPolicy::Saturate), Ok(i16::MAX));
        assert_eq!(quantize(7, 1.0, OverflowPolicy::Wrap), Ok(i16::MIN));
        assert_eq!(
            quantize(7, 1.0, OverflowPolicy::Reject),
            Err(EncodeError::Overflow { index: 7, value: 32768 })
        );
    }

    #[test]
    fn full_scale_negative_fits() {
        assert_eq!(quantize(0, -1.0, OverflowPolicy::Reject), Ok(i16::MIN));
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(
            quantize(3, f64::NAN, OverflowPolicy::Saturate),
            Err(EncodeError::NotFinite { index: 3 })
        );
    }

    #[test]
    fn hex_is_padded_lowercase_twos_complement() {
        assert_eq!(to_hex(0), "0000");
        assert_eq!(to_hex(0x5a82), "5a82");
        assert_eq!(to_hex(-1), "ffff");
        assert_eq!(to_hex(i16::MIN), "8000");
        assert_eq!(to_hex(10), "000a");
    }

    #[test]
    fn from_hex_rejects_wrong_width() {
        assert_eq!(from_hex("5a82"), Some(0x5a82));
        assert_eq!(from_hex("FFFF"), Some(-1));
        assert_eq!(from_hex("a82"), None);
        assert_eq!(from_hex("05a82"), None);
        assert_eq!(from_hex("+a82"), None);
        assert_eq!(from_hex("zzzz"), None);
    }
}
