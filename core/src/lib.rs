//! Digital-radio physical layer simulator
//!
//! Models four generation-tagged modulation schemes — ASK ("2G"), PSK ("3G"),
//! FSK ("4G") and 16-QAM ("5G") — plus an additive-Gaussian channel with a
//! causal exponential smoothing filter.

pub mod carrier;
pub mod channel;
pub mod config;
pub mod demodulator;
pub mod error;
pub mod modem;
pub mod modulator;
pub mod qam;
pub mod scheme;
pub mod source;

pub use channel::Channel;
pub use config::{ParamStore, ParamValue, SchemeConfig};
pub use demodulator::Demodulator;
pub use error::{ModemError, Result};
pub use modem::Modem;
pub use modulator::Modulator;
pub use scheme::Scheme;

// Carrier configuration
pub const CARRIER_AMPLITUDE: f64 = 1.0;
pub const DEFAULT_AMPLITUDE_INDEX: f64 = 1.0;
pub const DEFAULT_FREQUENCY_INDEX: f64 = 1.0;
pub const DEFAULT_PHASE: f64 = 0.0;

// Channel configuration
pub const NOISE_LEVEL: f64 = 0.07; // std deviation of the Gaussian noise
pub const NOISE_FILTER_ALPHA: f64 = 0.7; // smoothing coefficient

// 16-QAM configuration
pub const QAM_BITS_PER_SYMBOL: usize = 4;
pub const QAM_RADIUS_BOUND: f64 = 0.3;
