//! Closed set of modulation schemes keyed by their generation tag.

use std::fmt;

use crate::error::{ModemError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Amplitude-shift keying ("2G")
    Ask,
    /// Phase-shift keying ("3G")
    Psk,
    /// Frequency-shift keying ("4G")
    Fsk,
    /// 16-point quadrature amplitude modulation ("5G")
    Qam16,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [Scheme::Ask, Scheme::Psk, Scheme::Fsk, Scheme::Qam16];

    /// Parse a generation tag. Anything outside "2G".."5G" is rejected
    /// explicitly rather than silently producing an empty result.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "2G" => Ok(Scheme::Ask),
            "3G" => Ok(Scheme::Psk),
            "4G" => Ok(Scheme::Fsk),
            "5G" => Ok(Scheme::Qam16),
            other => Err(ModemError::UnknownGeneration(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Scheme::Ask => "2G",
            Scheme::Psk => "3G",
            Scheme::Fsk => "4G",
            Scheme::Qam16 => "5G",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::Ask => "ASK",
            Scheme::Psk => "PSK",
            Scheme::Fsk => "FSK",
            Scheme::Qam16 => "16-QAM",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_tag(scheme.tag()).unwrap(), scheme);
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        for tag in ["1G", "6G", "2g", "", "LTE"] {
            match Scheme::from_tag(tag) {
                Err(ModemError::UnknownGeneration(reported)) => {
                    assert_eq!(reported, tag)
                }
                other => panic!("expected UnknownGeneration for {tag:?}, got {other:?}"),
            }
        }
    }
}
