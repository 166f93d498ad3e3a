//! Carrier wave sample generator shared by every scheme.

use std::f64::consts::PI;

use crate::CARRIER_AMPLITUDE;

/// One sample of the cosine carrier:
/// `amplitude_index * CARRIER_AMPLITUDE * cos(2π * frequency_index * carrier_frequency * time + phase)`
///
/// The amplitude and frequency indices scale the shared base amplitude and
/// the configured carrier frequency; the demodulators also reuse this with a
/// received sample as the amplitude index to accumulate correlations.
pub fn carrier_sample(
    amplitude_index: f64,
    frequency_index: f64,
    carrier_frequency: f64,
    time: f64,
    phase: f64,
) -> f64 {
    let amplitude = amplitude_index * CARRIER_AMPLITUDE;
    let frequency = frequency_index * carrier_frequency;
    amplitude * (2.0 * PI * frequency * time + phase).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_carrier_peaks_at_time_zero() {
        assert_eq!(carrier_sample(1.0, 1.0, 100.0, 0.0, 0.0), 1.0);
        assert_eq!(carrier_sample(0.5, 1.0, 100.0, 0.0, 0.0), 0.5);
    }

    #[test]
    fn test_carrier_phase_shift() {
        // cos(-pi/2 + theta) = sin(theta); at t = 0 that is zero
        let sample = carrier_sample(1.0, 1.0, 100.0, 0.0, -FRAC_PI_2);
        assert!(sample.abs() < 1e-12);
    }

    #[test]
    fn test_carrier_frequency_index_scales_period() {
        // With frequency index 2 the carrier completes a full cycle in half
        // the time: cos(2pi * 200 * 0.005) = cos(2pi) = 1
        let sample = carrier_sample(1.0, 2.0, 100.0, 0.005, 0.0);
        assert!((sample - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_carrier_amplitude_index_zero_silences() {
        for step in 0..10 {
            let time = step as f64 * 1e-3;
            assert_eq!(carrier_sample(0.0, 1.0, 100.0, time, 0.0), 0.0);
        }
    }
}
