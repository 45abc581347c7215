//! Permissive keyword scales.
//!
//! Agents emit scale keywords (`"small"`, `"diagonal"`, ...) but are free to
//! send anything. Known keywords map onto typed variants; everything else is
//! preserved verbatim in an `Other` variant so downstream stages can pass it
//! through instead of rejecting the whole component.

use std::fmt;

use serde::de::{self, DeserializeOwned, Visitor};
use serde_json::{Map, Value};

/// Accepts strings, numbers and booleans, yielding their textual form.
pub(crate) struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

/// Textual form of a scalar JSON value; `None` for null, arrays and objects.
pub(crate) fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numbers, or strings holding a number.
pub(crate) fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Reads `key` as `T`, treating a value of the wrong shape as absent.
pub(crate) fn lenient_field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

macro_rules! scale {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            /// Value outside the known scale, kept verbatim.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($token => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_any($crate::domain::scale::LenientText)
                    .map(Self::from)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    scale!(Size { Small => "small", Large => "large" });

    #[test]
    fn known_keywords_map_to_variants() {
        let size: Size = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(size, Size::Small);
        assert!(size.is_known());
    }

    #[test]
    fn unknown_keywords_and_numbers_pass_through() {
        let size: Size = serde_json::from_str("\"huge\"").unwrap();
        assert_eq!(size, Size::Other("huge".into()));

        let numeric: Size = serde_json::from_str("12").unwrap();
        assert_eq!(numeric.as_str(), "12");
        assert!(!numeric.is_known());
    }

    #[test]
    fn lenient_helpers_skip_non_scalars() {
        use serde_json::json;

        assert_eq!(super::lenient_text(&json!(7)).as_deref(), Some("7"));
        assert_eq!(super::lenient_text(&json!(null)), None);
        assert_eq!(super::lenient_text(&json!(["a"])), None);
        assert_eq!(super::lenient_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(super::lenient_number(&json!("thick")), None);
    }

    #[test]
    fn serializes_back_to_the_raw_token() {
        let json = serde_json::to_string(&Size::Other("3px".into())).unwrap();
        assert_eq!(json, "\"3px\"");
    }
}
