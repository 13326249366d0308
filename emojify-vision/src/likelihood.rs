//! Ordinal confidence scale used by every face attribute.
//!
//! Cloud Vision reports likelihoods as names (`"VERY_LIKELY"`) over REST,
//! while older metadata files store the numeric value. Both forms are
//! accepted when deserializing; the numeric form is written back out.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Likelihood {
    #[default]
    Unknown = 0,
    VeryUnlikely = 1,
    Unlikely = 2,
    Possible = 3,
    Likely = 4,
    VeryLikely = 5,
}

impl Likelihood {
    pub const ALL: [Likelihood; 6] = [
        Likelihood::Unknown,
        Likelihood::VeryUnlikely,
        Likelihood::Unlikely,
        Likelihood::Possible,
        Likelihood::Likely,
        Likelihood::VeryLikely,
    ];

    pub fn from_value(value: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(value).ok()?).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNKNOWN" => Some(Likelihood::Unknown),
            "VERY_UNLIKELY" => Some(Likelihood::VeryUnlikely),
            "UNLIKELY" => Some(Likelihood::Unlikely),
            "POSSIBLE" => Some(Likelihood::Possible),
            "LIKELY" => Some(Likelihood::Likely),
            "VERY_LIKELY" => Some(Likelihood::VeryLikely),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Likelihood::Unknown => "UNKNOWN",
            Likelihood::VeryUnlikely => "VERY_UNLIKELY",
            Likelihood::Unlikely => "UNLIKELY",
            Likelihood::Possible => "POSSIBLE",
            Likelihood::Likely => "LIKELY",
            Likelihood::VeryLikely => "VERY_LIKELY",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Likelihood {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Likelihood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LikelihoodVisitor;

        impl<'de> de::Visitor<'de> for LikelihoodVisitor {
            type Value = Likelihood;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a likelihood name or an integer in 0..=5")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Likelihood, E> {
                Likelihood::from_value(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Likelihood, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Likelihood::from_value)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Likelihood, E> {
                Likelihood::from_name(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(LikelihoodVisitor)
    }
}
