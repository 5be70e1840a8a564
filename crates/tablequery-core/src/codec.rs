//! Attribute value codec.
//!
//! Callers describe expression attribute values as DynamoDB-style JSON
//! documents (`{"S": "abc"}`, `{"L": [{"N": "1"}]}`, ...). This module parses
//! those documents into a [`Document`], checks that every level populates
//! exactly one type key, and converts the result into the wire
//! [`AttributeValue`]. In the other direction it flattens returned items into
//! a single JSON string for output.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Deserialize;
use tablequery_model::attribute_value::TYPE_DESCRIPTORS;
use tablequery_model::{AttributeValue, Item};

use crate::error::{QueryError, TableQueryResult};

/// A caller-supplied attribute value after decoding.
///
/// Mirrors the ten DynamoDB type keys. Binary payloads are already
/// base64-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// `B`
    Binary(Bytes),
    /// `BOOL`
    Bool(bool),
    /// `BS`
    BinarySet(Vec<Bytes>),
    /// `L`
    List(Vec<Document>),
    /// `M`
    Map(BTreeMap<String, Document>),
    /// `N`
    Number(String),
    /// `NS`
    NumberSet(Vec<String>),
    /// `NULL`
    Null(bool),
    /// `S`
    String(String),
    /// `SS`
    StringSet(Vec<String>),
}

/// The document as written by the caller: any subset of type keys.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(rename = "B")]
    b: Option<String>,
    #[serde(rename = "BOOL")]
    boolean: Option<bool>,
    #[serde(rename = "BS")]
    bs: Option<Vec<String>>,
    #[serde(rename = "L")]
    l: Option<Vec<RawDocument>>,
    #[serde(rename = "M")]
    m: Option<BTreeMap<String, RawDocument>>,
    #[serde(rename = "N")]
    n: Option<String>,
    #[serde(rename = "NS")]
    ns: Option<Vec<String>>,
    #[serde(rename = "NULL")]
    null: Option<bool>,
    #[serde(rename = "S")]
    s: Option<String>,
    #[serde(rename = "SS")]
    ss: Option<Vec<String>>,
}

impl RawDocument {
    fn populated(&self) -> Vec<&'static str> {
        let present = [
            self.b.is_some(),
            self.boolean.is_some(),
            self.bs.is_some(),
            self.l.is_some(),
            self.m.is_some(),
            self.n.is_some(),
            self.ns.is_some(),
            self.null.is_some(),
            self.s.is_some(),
            self.ss.is_some(),
        ];
        TYPE_DESCRIPTORS
            .iter()
            .zip(present)
            .filter_map(|(tag, set)| set.then_some(*tag))
            .collect()
    }

    fn into_document(self, path: &str) -> TableQueryResult<Document> {
        let tags = self.populated();
        if tags.len() != 1 {
            let found = if tags.is_empty() {
                "none".to_owned()
            } else {
                tags.join(", ")
            };
            return Err(QueryError::Decode(format!(
                "at {path}: expected exactly one of {}, found {found}",
                TYPE_DESCRIPTORS.join(", ")
            )));
        }

        let Self {
            b,
            boolean,
            bs,
            l,
            m,
            n,
            ns,
            null,
            s,
            ss,
        } = self;

        if let Some(encoded) = b {
            return decode_binary(&encoded, path).map(Document::Binary);
        }
        if let Some(value) = boolean {
            return Ok(Document::Bool(value));
        }
        if let Some(set) = bs {
            return set
                .iter()
                .enumerate()
                .map(|(i, encoded)| decode_binary(encoded, &format!("{path}[{i}]")))
                .collect::<TableQueryResult<Vec<_>>>()
                .map(Document::BinarySet);
        }
        if let Some(list) = l {
            return list
                .into_iter()
                .enumerate()
                .map(|(i, raw)| raw.into_document(&format!("{path}[{i}]")))
                .collect::<TableQueryResult<Vec<_>>>()
                .map(Document::List);
        }
        if let Some(map) = m {
            return map
                .into_iter()
                .map(|(key, raw)| {
                    let doc = raw.into_document(&format!("{path}.{key}"))?;
                    Ok::<_, QueryError>((key, doc))
                })
                .collect::<TableQueryResult<BTreeMap<_, _>>>()
                .map(Document::Map);
        }
        if let Some(number) = n {
            return Ok(Document::Number(number));
        }
        if let Some(set) = ns {
            return Ok(Document::NumberSet(set));
        }
        if let Some(value) = null {
            return Ok(Document::Null(value));
        }
        if let Some(string) = s {
            return Ok(Document::String(string));
        }
        ss.map(Document::StringSet)
            .ok_or_else(|| QueryError::Decode(format!("at {path}: no type key populated")))
    }
}

fn decode_binary(encoded: &str, path: &str) -> TableQueryResult<Bytes> {
    STANDARD
        .decode(encoded)
        .map(Bytes::from)
        .map_err(|e| QueryError::Decode(format!("at {path}: invalid base64: {e}")))
}

/// Decode a double-encoded attribute value.
///
/// `raw` is a JSON string literal whose contents are the attribute value
/// document, e.g. `"{\"S\":\"example\"}"`. The literal is unescaped once and
/// the result handed to [`parse`].
pub fn decode(raw: &str) -> TableQueryResult<Document> {
    let text: String = serde_json::from_str(raw)
        .map_err(|e| QueryError::Decode(format!("cannot unescape string literal: {e}")))?;
    parse(&text)
}

/// Parse an attribute value document that is already plain JSON text.
pub fn parse(text: &str) -> TableQueryResult<Document> {
    let raw: RawDocument =
        serde_json::from_str(text).map_err(|e| QueryError::Decode(e.to_string()))?;
    raw.into_document("$")
}

/// Convert a decoded document into its wire form.
///
/// `None` is a valid input (an unset placeholder) and yields `Ok(None)`.
/// Every well-formed document converts; values the store refuses, such as an
/// empty set, are passed through and rejected by the store itself.
pub fn to_wire(doc: Option<&Document>) -> TableQueryResult<Option<AttributeValue>> {
    Ok(doc.map(convert))
}

fn convert(doc: &Document) -> AttributeValue {
    match doc {
        Document::Binary(b) => AttributeValue::B(b.clone()),
        Document::Bool(value) => AttributeValue::Bool(*value),
        Document::BinarySet(set) => AttributeValue::Bs(set.clone()),
        Document::List(items) => AttributeValue::L(items.iter().map(convert).collect()),
        Document::Map(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), convert(value)))
                .collect(),
        ),
        Document::Number(number) => AttributeValue::N(number.clone()),
        Document::NumberSet(set) => AttributeValue::Ns(set.clone()),
        Document::Null(value) => AttributeValue::Null(*value),
        Document::String(string) => AttributeValue::S(string.clone()),
        Document::StringSet(set) => AttributeValue::Ss(set.clone()),
    }
}

/// Flatten an item into a JSON object string of attribute name to wire value.
///
/// Keys come out sorted at every depth, so the same item always flattens to
/// the same string.
pub fn flatten(item: &Item) -> TableQueryResult<String> {
    let ordered: BTreeMap<&String, &AttributeValue> = item.iter().collect();
    serde_json::to_string(&ordered).map_err(QueryError::Serialization)
}
