//! Carrier parameter store and the validated per-scheme configuration.
//!
//! The store mirrors the external key/value database the modem reads its
//! parameters from: typed scalars behind string keys. `SchemeConfig::load`
//! pulls every required key up front and fails the whole load on the first
//! missing or mistyped entry, so a constructed config is always complete.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::error::{ModemError, Result};

pub const ASK_ZERO_SIGN_KEY: &str = "ask.zero_sign";
pub const ASK_ONE_SIGN_KEY: &str = "ask.one_sign";
pub const PSK_ZERO_SIGN_KEY: &str = "psk.zero_sign_deg";
pub const PSK_ONE_SIGN_KEY: &str = "psk.one_sign_deg";
pub const FSK_ZERO_SIGN_KEY: &str = "fsk.zero_sign";
pub const FSK_ONE_SIGN_KEY: &str = "fsk.one_sign";
pub const CARRIER_FREQUENCY_KEY: &str = "carrier.frequency";
pub const SAMPLE_RATE_KEY: &str = "sample.rate";

/// Typed scalar held by the parameter store.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Text(String),
}

/// In-memory key/value store supplying the carrier parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    values: HashMap<String, ParamValue>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock parameter set used by the CLI and the test suites.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.insert(ASK_ZERO_SIGN_KEY, ParamValue::Float(0.2));
        store.insert(ASK_ONE_SIGN_KEY, ParamValue::Float(0.8));
        store.insert(PSK_ZERO_SIGN_KEY, ParamValue::Float(0.0));
        store.insert(PSK_ONE_SIGN_KEY, ParamValue::Float(180.0));
        store.insert(FSK_ZERO_SIGN_KEY, ParamValue::Float(1.0));
        store.insert(FSK_ONE_SIGN_KEY, ParamValue::Float(2.0));
        store.insert(CARRIER_FREQUENCY_KEY, ParamValue::Float(100.0));
        // The sample rate arrives from the store as text, like the
        // original database row it stands in for.
        store.insert(SAMPLE_RATE_KEY, ParamValue::Text("10000".into()));
        store
    }

    pub fn insert(&mut self, key: &str, value: ParamValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    fn float(&self, key: &str) -> Result<f64> {
        match self.get(key) {
            Some(ParamValue::Float(value)) => Ok(*value),
            Some(_) => Err(ModemError::InvalidParameter(format!(
                "{key} is not a float"
            ))),
            None => Err(ModemError::MissingParameter(key.to_string())),
        }
    }

    fn text(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(ParamValue::Text(value)) => Ok(value),
            Some(_) => Err(ModemError::InvalidParameter(format!(
                "{key} is not text"
            ))),
            None => Err(ModemError::MissingParameter(key.to_string())),
        }
    }
}

/// Immutable carrier configuration shared read-only by both engines.
///
/// The bit rate is set equal to the carrier frequency, so every bit window
/// spans a whole number of carrier cycles at frequency index 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeConfig {
    pub carrier_frequency: f64,
    pub bit_rate: f64,
    pub sample_rate: f64,
    pub sample_duration: f64,
    pub samples_per_bit: f64,
    /// ASK amplitude levels for bit 0 / bit 1.
    pub ask_zero_sign: f64,
    pub ask_one_sign: f64,
    /// PSK phase levels in radians for bit 0 / bit 1.
    pub psk_zero_sign: f64,
    pub psk_one_sign: f64,
    /// FSK carrier-frequency multipliers for bit 0 / bit 1.
    pub fsk_zero_sign: f64,
    pub fsk_one_sign: f64,
}

impl SchemeConfig {
    /// Load and validate every parameter, all-or-nothing.
    pub fn load(store: &ParamStore) -> Result<Self> {
        let ask_zero_sign = store.float(ASK_ZERO_SIGN_KEY)?;
        let ask_one_sign = store.float(ASK_ONE_SIGN_KEY)?;
        // Phase levels are stored in degrees, converted once here.
        let psk_zero_sign = store.float(PSK_ZERO_SIGN_KEY)? * PI / 180.0;
        let psk_one_sign = store.float(PSK_ONE_SIGN_KEY)? * PI / 180.0;
        let fsk_zero_sign = store.float(FSK_ZERO_SIGN_KEY)?;
        let fsk_one_sign = store.float(FSK_ONE_SIGN_KEY)?;
        let carrier_frequency = store.float(CARRIER_FREQUENCY_KEY)?;

        let sample_rate: f64 = store
            .text(SAMPLE_RATE_KEY)?
            .parse()
            .map_err(|_| {
                ModemError::InvalidParameter(format!(
                    "{SAMPLE_RATE_KEY} is not a number"
                ))
            })?;
        if sample_rate <= 0.0 || carrier_frequency <= 0.0 {
            return Err(ModemError::InvalidParameter(
                "sample rate and carrier frequency must be positive".into(),
            ));
        }
        // The bit rate equals the carrier frequency, so a carrier above the
        // sample rate would leave zero whole samples per bit window.
        if carrier_frequency > sample_rate {
            return Err(ModemError::InvalidParameter(format!(
                "carrier frequency {carrier_frequency} exceeds sample rate {sample_rate}"
            )));
        }

        let bit_rate = carrier_frequency;
        Ok(Self {
            carrier_frequency,
            bit_rate,
            sample_rate,
            sample_duration: 1.0 / sample_rate,
            samples_per_bit: sample_rate / bit_rate,
            ask_zero_sign,
            ask_one_sign,
            psk_zero_sign,
            psk_one_sign,
            fsk_zero_sign,
            fsk_one_sign,
        })
    }

    /// Number of whole samples making up one bit (or 16-QAM symbol) window.
    pub fn window_len(&self) -> usize {
        self.samples_per_bit as usize
    }
}
