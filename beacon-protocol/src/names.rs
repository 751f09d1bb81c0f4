//! Name-keyed wire vocabulary
//!
//! Commands carry their verb, strip and color as plain strings. Each of
//! those has a closed vocabulary on the controller side, but a sender can put
//! anything on the wire. [`Named`] keeps an unrecognized name around instead
//! of rejecting the whole frame, so the dispatcher decides what an unknown
//! strip or color means.

use core::fmt;
use core::marker::PhantomData;

use heapless::String;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// Longest unknown name retained verbatim (longer names are truncated)
pub const MAX_NAME_LEN: usize = 24;

/// A closed set of values with fixed wire names
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every value, in canonical order
    const ALL: &'static [Self];

    /// Wire name of this value
    fn name(self) -> &'static str;

    /// Look a value up by its wire name (case-sensitive)
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }
}

/// A vocabulary value, or the raw name if it was not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Named<T> {
    Known(T),
    Unknown(String<MAX_NAME_LEN>),
}

impl<T: Vocabulary> Named<T> {
    /// Classify a wire name
    pub fn parse(name: &str) -> Self {
        match T::from_name(name) {
            Some(value) => Named::Known(value),
            None => {
                let mut raw = String::new();
                for c in name.chars() {
                    if raw.push(c).is_err() {
                        break;
                    }
                }
                Named::Unknown(raw)
            }
        }
    }

    /// The recognized value, if any
    pub fn known(&self) -> Option<T> {
        match self {
            Named::Known(value) => Some(*value),
            Named::Unknown(_) => None,
        }
    }

    /// Wire name as it would be sent
    pub fn as_str(&self) -> &str {
        match self {
            Named::Known(value) => value.name(),
            Named::Unknown(raw) => raw.as_str(),
        }
    }
}

impl<T: Vocabulary> From<T> for Named<T> {
    fn from(value: T) -> Self {
        Named::Known(value)
    }
}

impl<T: Vocabulary> Serialize for Named<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: Vocabulary> Deserialize<'de> for Named<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(NameVisitor(PhantomData))
    }
}

struct NameVisitor<T>(PhantomData<T>);

impl<'de, T: Vocabulary> Visitor<'de> for NameVisitor<T> {
    type Value = Named<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a name string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Named::parse(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Color, StripId};

    #[test]
    fn test_parse_known_name() {
        assert_eq!(Named::<Color>::parse("redLow"), Named::Known(Color::RedLow));
        assert_eq!(
            Named::<StripId>::parse("cornerR"),
            Named::Known(StripId::CornerR)
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let named = Named::<Color>::parse("Red");
        assert_eq!(named.known(), None);
        assert_eq!(named.as_str(), "Red");
    }

    #[test]
    fn test_unknown_name_truncated() {
        let long = "aVeryLongColorNameThatKeepsGoingAndGoing";
        let named = Named::<Color>::parse(long);
        assert_eq!(named.as_str(), &long[..MAX_NAME_LEN]);
    }

    #[test]
    fn test_vocabulary_names_are_unique() {
        for (i, a) in Color::ALL.iter().enumerate() {
            for b in &Color::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
