//! Per-scheme bit-to-waveform engine.
//!
//! Every scheme emits `samples_per_bit` consecutive carrier samples per bit
//! (per 4-bit symbol for 16-QAM) with a single time variable advanced by the
//! sample duration, so the waveform is continuous across bit boundaries.

use std::f64::consts::FRAC_PI_2;

use crate::carrier::carrier_sample;
use crate::config::SchemeConfig;
use crate::error::{ModemError, Result};
use crate::qam;
use crate::scheme::Scheme;
use crate::{DEFAULT_AMPLITUDE_INDEX, DEFAULT_FREQUENCY_INDEX, DEFAULT_PHASE};

pub struct Modulator {
    config: SchemeConfig,
}

impl Modulator {
    pub fn new(config: SchemeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Turn a binary message into a waveform using the given scheme.
    pub fn modulate(&self, bits: &str, scheme: Scheme) -> Result<Vec<f64>> {
        validate_bits(bits)?;
        match scheme {
            Scheme::Ask => Ok(self.ask_modulation(bits)),
            Scheme::Psk => Ok(self.psk_modulation(bits)),
            Scheme::Fsk => Ok(self.fsk_modulation(bits)),
            Scheme::Qam16 => self.qam16_modulation(bits),
        }
    }

    /// ASK: the bit selects the amplitude index, carrier frequency and
    /// phase stay fixed.
    fn ask_modulation(&self, bits: &str) -> Vec<f64> {
        let config = &self.config;
        let window = config.window_len();
        let mut signal = Vec::with_capacity(bits.len() * window);
        let mut time = 0.0;
        for bit in bits.chars() {
            let amplitude_index = if bit == '1' {
                config.ask_one_sign
            } else {
                config.ask_zero_sign
            };
            for _ in 0..window {
                signal.push(carrier_sample(
                    amplitude_index,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                ));
                time += config.sample_duration;
            }
        }
        signal
    }

    /// PSK: the bit selects the carrier phase.
    fn psk_modulation(&self, bits: &str) -> Vec<f64> {
        let config = &self.config;
        let window = config.window_len();
        let mut signal = Vec::with_capacity(bits.len() * window);
        let mut time = 0.0;
        for bit in bits.chars() {
            let phase = if bit == '1' {
                config.psk_one_sign
            } else {
                config.psk_zero_sign
            };
            for _ in 0..window {
                signal.push(carrier_sample(
                    DEFAULT_AMPLITUDE_INDEX,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE + phase,
                ));
                time += config.sample_duration;
            }
        }
        signal
    }

    /// FSK: the bit selects the carrier-frequency multiplier.
    fn fsk_modulation(&self, bits: &str) -> Vec<f64> {
        let config = &self.config;
        let window = config.window_len();
        let mut signal = Vec::with_capacity(bits.len() * window);
        let mut time = 0.0;
        for bit in bits.chars() {
            let frequency_index = if bit == '1' {
                config.fsk_one_sign
            } else {
                config.fsk_zero_sign
            };
            for _ in 0..window {
                signal.push(carrier_sample(
                    DEFAULT_AMPLITUDE_INDEX,
                    frequency_index,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                ));
                time += config.sample_duration;
            }
        }
        signal
    }

    /// 16-QAM: each 4-bit symbol rides orthogonal cosine/sine carriers,
    /// summed per sample. One symbol occupies one bit window.
    fn qam16_modulation(&self, bits: &str) -> Result<Vec<f64>> {
        let symbols = qam::map_bits_to_symbols(bits)?;

        let config = &self.config;
        let window = config.window_len();
        let mut signal = Vec::with_capacity(symbols.len() * window);
        let mut time = 0.0;
        for symbol in &symbols {
            for _ in 0..window {
                let in_phase = carrier_sample(
                    symbol.i,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                );
                let quadrature = carrier_sample(
                    symbol.q,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE - FRAC_PI_2,
                );
                signal.push(in_phase + quadrature);
                time += config.sample_duration;
            }
        }
        Ok(signal)
    }
}

fn validate_bits(bits: &str) -> Result<()> {
    match bits.chars().find(|&ch| ch != '0' && ch != '1') {
        Some(ch) => Err(ModemError::InvalidBitValue { ch }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamStore;
    use crate::QAM_BITS_PER_SYMBOL;

    fn modulator() -> Modulator {
        let config = SchemeConfig::load(&ParamStore::with_defaults()).unwrap();
        Modulator::new(config)
    }

    #[test]
    fn test_binary_schemes_signal_length() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        let bits = "01101001";
        for scheme in [Scheme::Ask, Scheme::Psk, Scheme::Fsk] {
            let signal = modulator.modulate(bits, scheme).unwrap();
            assert_eq!(signal.len(), bits.len() * window, "scheme {scheme}");
        }
    }

    #[test]
    fn test_qam16_signal_length() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        let bits = "0110100111001010";
        let signal = modulator.modulate(bits, Scheme::Qam16).unwrap();
        assert_eq!(signal.len(), bits.len() / QAM_BITS_PER_SYMBOL * window);
    }

    #[test]
    fn test_qam16_rejects_length_not_multiple_of_four() {
        let modulator = modulator();
        match modulator.modulate("10101", Scheme::Qam16) {
            Err(ModemError::InvalidBitLength { len }) => assert_eq!(len, 5),
            other => panic!("expected InvalidBitLength, got {other:?}"),
        }
    }

    #[test]
    fn test_non_binary_message_rejected_for_all_schemes() {
        let modulator = modulator();
        for scheme in Scheme::ALL {
            assert!(matches!(
                modulator.modulate("01x1", scheme),
                Err(ModemError::InvalidBitValue { ch: 'x' })
            ));
        }
    }

    #[test]
    fn test_ask_amplitude_tracks_bits() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        let signal = modulator.modulate("01", Scheme::Ask).unwrap();
        // First sample of each window is the cosine peak times the level
        assert!((signal[0] - 0.2).abs() < 1e-9);
        assert!((signal[window] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_psk_one_bit_inverts_carrier() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        let zero = modulator.modulate("0", Scheme::Psk).unwrap();
        let one = modulator.modulate("1", Scheme::Psk).unwrap();
        // 180 degree phase level flips the sign sample for sample
        for index in 0..window {
            assert!((zero[index] + one[index]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fsk_one_bit_doubles_cycles() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        let one = modulator.modulate("1", Scheme::Fsk).unwrap();
        // Multiplier 2 completes a full cycle in half a window
        assert!((one[0] - 1.0).abs() < 1e-9);
        assert!((one[window / 2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_is_continuous_across_bits() {
        let modulator = modulator();
        let window = modulator.config().window_len();
        // A constant-bit ASK waveform must be periodic across the boundary
        let signal = modulator.modulate("11", Scheme::Ask).unwrap();
        for index in 0..window {
            assert!((signal[index] - signal[index + window]).abs() < 1e-9);
        }
    }
}
