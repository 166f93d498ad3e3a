//! Facade tying the two engines to one validated configuration.

use crate::config::{ParamStore, SchemeConfig};
use crate::demodulator::Demodulator;
use crate::error::Result;
use crate::modulator::Modulator;
use crate::scheme::Scheme;

pub struct Modem {
    modulator: Modulator,
    demodulator: Demodulator,
}

impl Modem {
    /// Load the configuration from the parameter store once; any missing or
    /// mistyped parameter aborts construction.
    pub fn new(store: &ParamStore) -> Result<Self> {
        Ok(Self::with_config(SchemeConfig::load(store)?))
    }

    pub fn with_config(config: SchemeConfig) -> Self {
        Self {
            modulator: Modulator::new(config.clone()),
            demodulator: Demodulator::new(config),
        }
    }

    pub fn config(&self) -> &SchemeConfig {
        self.modulator.config()
    }

    pub fn modulate(&self, bits: &str, scheme: Scheme) -> Result<Vec<f64>> {
        self.modulator.modulate(bits, scheme)
    }

    pub fn demodulate(&self, signal: &[f64], scheme: Scheme) -> Result<String> {
        self.demodulator.demodulate(signal, scheme)
    }

    /// Tag-based dispatch for callers holding a generation string.
    pub fn modulate_tag(&self, bits: &str, tag: &str) -> Result<Vec<f64>> {
        self.modulate(bits, Scheme::from_tag(tag)?)
    }

    pub fn demodulate_tag(&self, signal: &[f64], tag: &str) -> Result<String> {
        self.demodulate(signal, Scheme::from_tag(tag)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModemError;

    #[test]
    fn test_modem_from_default_store() {
        let modem = Modem::new(&ParamStore::with_defaults()).unwrap();
        assert_eq!(modem.config().window_len(), 100);
    }

    #[test]
    fn test_construction_fails_on_incomplete_store() {
        let store = ParamStore::new();
        assert!(matches!(
            Modem::new(&store),
            Err(ModemError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_tag_dispatch() {
        let modem = Modem::new(&ParamStore::with_defaults()).unwrap();
        let signal = modem.modulate_tag("0110", "2G").unwrap();
        assert_eq!(modem.demodulate_tag(&signal, "2G").unwrap(), "0110");
    }

    #[test]
    fn test_unknown_tag_is_an_error_both_ways() {
        let modem = Modem::new(&ParamStore::with_defaults()).unwrap();
        assert!(matches!(
            modem.modulate_tag("0110", "6G"),
            Err(ModemError::UnknownGeneration(_))
        ));
        assert!(matches!(
            modem.demodulate_tag(&[0.0; 100], "6G"),
            Err(ModemError::UnknownGeneration(_))
        ));
    }
}
