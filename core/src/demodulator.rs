//! Per-scheme waveform-to-bit engine.
//!
//! The signal is partitioned into consecutive non-overlapping windows of
//! `samples_per_bit` samples; a trailing partial window is silently dropped.
//! Reference time for the correlators is the global sample index over the
//! sample rate, matching the continuous time base of the modulator.

use std::f64::consts::FRAC_PI_2;

use log::warn;

use crate::carrier::carrier_sample;
use crate::config::SchemeConfig;
use crate::error::{ModemError, Result};
use crate::qam;
use crate::scheme::Scheme;
use crate::{DEFAULT_FREQUENCY_INDEX, DEFAULT_PHASE, QAM_RADIUS_BOUND};

pub struct Demodulator {
    config: SchemeConfig,
}

impl Demodulator {
    pub fn new(config: SchemeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Recover the binary message from a waveform using the given scheme.
    pub fn demodulate(&self, signal: &[f64], scheme: Scheme) -> Result<String> {
        match scheme {
            Scheme::Ask => Ok(self.ask_demodulation(signal)),
            Scheme::Psk => Ok(self.psk_demodulation(signal)),
            Scheme::Fsk => Ok(self.fsk_demodulation(signal)),
            Scheme::Qam16 => self.qam16_demodulation(signal),
        }
    }

    /// ASK energy detector: mean rectified amplitude per window against the
    /// zero-sign level.
    fn ask_demodulation(&self, signal: &[f64]) -> String {
        let window = self.config.window_len();
        let threshold = self.config.ask_zero_sign;
        let total_units = signal.len() / window;

        let mut bits = String::with_capacity(total_units);
        for unit in 0..total_units {
            let chunk = &signal[unit * window..(unit + 1) * window];
            let mean = chunk.iter().map(|sample| sample.abs()).sum::<f64>() / window as f64;
            bits.push(if mean > threshold { '1' } else { '0' });
        }
        bits
    }

    /// PSK correlation detector against the zero-phase and one-phase
    /// reference carriers. Ties resolve to '1'.
    fn psk_demodulation(&self, signal: &[f64]) -> String {
        let config = &self.config;
        let window = config.window_len();
        let total_units = signal.len() / window;

        let mut bits = String::with_capacity(total_units);
        for unit in 0..total_units {
            let mut correlation_zero = 0.0;
            let mut correlation_one = 0.0;
            for offset in 0..window {
                let index = unit * window + offset;
                let time = index as f64 / config.sample_rate;
                let value = signal[index];
                correlation_zero += carrier_sample(
                    value,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE + config.psk_zero_sign,
                );
                correlation_one += carrier_sample(
                    value,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE + config.psk_one_sign,
                );
            }
            bits.push(if correlation_zero > correlation_one { '0' } else { '1' });
        }
        bits
    }

    /// FSK correlation detector against the zero-sign and one-sign frequency
    /// references. Ties resolve to '0'.
    fn fsk_demodulation(&self, signal: &[f64]) -> String {
        let config = &self.config;
        let window = config.window_len();
        let total_units = signal.len() / window;

        let mut bits = String::with_capacity(total_units);
        for unit in 0..total_units {
            let mut correlation_zero = 0.0;
            let mut correlation_one = 0.0;
            for offset in 0..window {
                let index = unit * window + offset;
                let time = index as f64 / config.sample_rate;
                let value = signal[index];
                correlation_zero += carrier_sample(
                    value,
                    config.fsk_zero_sign,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                );
                correlation_one += carrier_sample(
                    value,
                    config.fsk_one_sign,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                );
            }
            bits.push(if correlation_one > correlation_zero { '1' } else { '0' });
        }
        bits
    }

    /// 16-QAM matched filter with bounded quantization: accumulate I/Q
    /// correlations, undo the factor-of-two integration attenuation, then
    /// quantize each axis. A point farther than the radius bound from its
    /// quantized neighbour fails the whole call.
    fn qam16_demodulation(&self, signal: &[f64]) -> Result<String> {
        let config = &self.config;
        let window = config.window_len();
        let total_units = signal.len() / window;

        let mut bits = String::with_capacity(total_units * crate::QAM_BITS_PER_SYMBOL);
        for unit in 0..total_units {
            let mut i_accumulator = 0.0;
            let mut q_accumulator = 0.0;
            for offset in 0..window {
                let index = unit * window + offset;
                let time = index as f64 * config.sample_duration;
                let value = signal[index];
                i_accumulator += carrier_sample(
                    value,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE,
                );
                q_accumulator += carrier_sample(
                    value,
                    DEFAULT_FREQUENCY_INDEX,
                    config.carrier_frequency,
                    time,
                    DEFAULT_PHASE - FRAC_PI_2,
                );
            }

            // Averaging a modulated carrier halves the recovered component,
            // so double after normalizing by the window length.
            let i_raw = i_accumulator / window as f64 * 2.0;
            let q_raw = q_accumulator / window as f64 * 2.0;

            let i_level = qam::quantize_level(i_raw);
            let q_level = qam::quantize_level(q_raw);
            let distance = (i_raw - i_level).powi(2) + (q_raw - q_level).powi(2);
            if distance > QAM_RADIUS_BOUND * QAM_RADIUS_BOUND {
                warn!("16-QAM window {unit} outside the constellation radius, squared distance {distance}");
                return Err(ModemError::SymbolOutOfBounds { distance });
            }

            let i_bits = qam::level_to_bits(i_level)
                .ok_or(ModemError::SymbolOutOfBounds { distance })?;
            let q_bits = qam::level_to_bits(q_level)
                .ok_or(ModemError::SymbolOutOfBounds { distance })?;
            bits.push_str(i_bits);
            bits.push_str(q_bits);
        }
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamStore;
    use crate::modulator::Modulator;

    fn engines() -> (Modulator, Demodulator) {
        let config = SchemeConfig::load(&ParamStore::with_defaults()).unwrap();
        (Modulator::new(config.clone()), Demodulator::new(config))
    }

    #[test]
    fn test_ask_scenario_0110() {
        let (modulator, demodulator) = engines();
        let signal = modulator.modulate("0110", Scheme::Ask).unwrap();
        assert_eq!(demodulator.demodulate(&signal, Scheme::Ask).unwrap(), "0110");
    }

    #[test]
    fn test_qam16_scenario_1010() {
        let (modulator, demodulator) = engines();
        let signal = modulator.modulate("1010", Scheme::Qam16).unwrap();
        assert_eq!(signal.len(), demodulator.config().window_len());
        assert_eq!(demodulator.demodulate(&signal, Scheme::Qam16).unwrap(), "1010");
    }

    #[test]
    fn test_trailing_partial_window_dropped() {
        let (modulator, demodulator) = engines();
        let mut signal = modulator.modulate("01", Scheme::Ask).unwrap();
        // Half a window of stray samples must not produce an extra bit
        signal.extend(std::iter::repeat(0.3).take(demodulator.config().window_len() / 2));
        assert_eq!(demodulator.demodulate(&signal, Scheme::Ask).unwrap(), "01");
    }

    #[test]
    fn test_empty_signal_yields_empty_message() {
        let (_, demodulator) = engines();
        for scheme in Scheme::ALL {
            assert_eq!(demodulator.demodulate(&[], scheme).unwrap(), "");
        }
    }

    #[test]
    fn test_psk_tie_resolves_to_one() {
        let (_, demodulator) = engines();
        // An all-zero window correlates identically with both references
        let silence = vec![0.0; demodulator.config().window_len()];
        assert_eq!(demodulator.demodulate(&silence, Scheme::Psk).unwrap(), "1");
    }

    #[test]
    fn test_fsk_tie_resolves_to_zero() {
        let (_, demodulator) = engines();
        let silence = vec![0.0; demodulator.config().window_len()];
        assert_eq!(demodulator.demodulate(&silence, Scheme::Fsk).unwrap(), "0");
    }

    #[test]
    fn test_qam16_out_of_bounds_symbol_fails() {
        let (modulator, demodulator) = engines();
        // Doubling the waveform moves both components to 0.5, mid-cell on
        // each axis, which exceeds the radius bound
        let signal: Vec<f64> = modulator
            .modulate("0101", Scheme::Qam16)
            .unwrap()
            .iter()
            .map(|sample| sample * 2.0)
            .collect();
        assert!(matches!(
            demodulator.demodulate(&signal, Scheme::Qam16),
            Err(ModemError::SymbolOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_qam16_on_grid_but_out_of_table_fails() {
        let (modulator, demodulator) = engines();
        // Tripling maps 0.75 to 2.25, exactly on the extended quantization
        // grid, so only the table lookup can reject it
        let signal: Vec<f64> = modulator
            .modulate("0000", Scheme::Qam16)
            .unwrap()
            .iter()
            .map(|sample| sample * 3.0)
            .collect();
        assert!(matches!(
            demodulator.demodulate(&signal, Scheme::Qam16),
            Err(ModemError::SymbolOutOfBounds { .. })
        ));
    }
}
