//! DynamoDB `AttributeValue` wire type with custom serialization.
//!
//! On the wire an attribute value is a single-key JSON object such as
//! `{"S": "hello"}` or `{"L": [{"N": "1"}]}`. Binary payloads travel as
//! standard base64 strings.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One row returned by the store: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Type keys accepted on the wire, in DynamoDB documentation order.
pub const TYPE_DESCRIPTORS: &[&str] = &["B", "BOOL", "BS", "L", "M", "N", "NS", "NULL", "S", "SS"];

/// DynamoDB attribute value in wire form.
///
/// Numbers stay string-encoded so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Binary blob.
    B(bytes::Bytes),
    /// Boolean.
    Bool(bool),
    /// Set of binary blobs.
    Bs(Vec<bytes::Bytes>),
    /// Ordered list of values.
    L(Vec<AttributeValue>),
    /// String-keyed map of values.
    M(HashMap<String, AttributeValue>),
    /// Number, string-encoded.
    N(String),
    /// Set of numbers, string-encoded.
    Ns(Vec<String>),
    /// Null marker. DynamoDB only accepts `true`.
    Null(bool),
    /// UTF-8 string.
    S(String),
    /// Set of UTF-8 strings.
    Ss(Vec<String>),
}

impl AttributeValue {
    /// Returns the DynamoDB type descriptor (`"S"`, `"N"`, `"BOOL"`, ...).
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::B(_) => "B",
            Self::Bool(_) => "BOOL",
            Self::Bs(_) => "BS",
            Self::L(_) => "L",
            Self::M(_) => "M",
            Self::N(_) => "N",
            Self::Ns(_) => "NS",
            Self::Null(_) => "NULL",
            Self::S(_) => "S",
            Self::Ss(_) => "SS",
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let tag = self.type_descriptor();
        match self {
            Self::B(b) => map.serialize_entry(tag, &STANDARD.encode(b))?,
            Self::Bool(b) | Self::Null(b) => map.serialize_entry(tag, b)?,
            Self::Bs(v) => {
                let encoded: Vec<String> = v.iter().map(|b| STANDARD.encode(b)).collect();
                map.serialize_entry(tag, &encoded)?;
            }
            Self::L(list) => map.serialize_entry(tag, list)?,
            Self::M(m) => {
                let sorted: BTreeMap<&String, &AttributeValue> = m.iter().collect();
                map.serialize_entry(tag, &sorted)?;
            }
            Self::N(s) | Self::S(s) => map.serialize_entry(tag, s)?,
            Self::Ns(v) | Self::Ss(v) => map.serialize_entry(tag, v)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

fn decode_base64<E: de::Error>(encoded: &str) -> Result<bytes::Bytes, E> {
    STANDARD
        .decode(encoded)
        .map(bytes::Bytes::from)
        .map_err(E::custom)
}

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a DynamoDB AttributeValue object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom(
                "AttributeValue must have exactly one key",
            ));
        };

        let value = match key.as_str() {
            "B" => AttributeValue::B(decode_base64::<M::Error>(&map.next_value::<String>()?)?),
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "BS" => {
                let encoded: Vec<String> = map.next_value()?;
                AttributeValue::Bs(
                    encoded
                        .iter()
                        .map(|e| decode_base64::<M::Error>(e))
                        .collect::<Result<Vec<_>, M::Error>>()?,
                )
            }
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "S" => AttributeValue::S(map.next_value()?),
            "SS" => AttributeValue::Ss(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, TYPE_DESCRIPTORS)),
        };

        if let Some(extra) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "AttributeValue must have exactly one key, found both {key} and {extra}"
            )));
        }

        Ok(value)
    }
}
