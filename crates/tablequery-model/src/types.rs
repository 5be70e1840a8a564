//! Enums and capacity structs shared by the `Query` request and response.
//!
//! Enum variants use Rust `PascalCase` with `#[serde(rename)]` onto the
//! `SCREAMING_SNAKE_CASE` strings DynamoDB puts on the wire.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attributes to retrieve in a `Query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Select {
    /// All attributes of the item.
    #[default]
    #[serde(rename = "ALL_ATTRIBUTES")]
    AllAttributes,
    /// All attributes projected into the queried index.
    #[serde(rename = "ALL_PROJECTED_ATTRIBUTES")]
    AllProjectedAttributes,
    /// Only the attributes named by the projection expression.
    #[serde(rename = "SPECIFIC_ATTRIBUTES")]
    SpecificAttributes,
    /// Only the count of matching items.
    #[serde(rename = "COUNT")]
    Count,
}

impl Select {
    /// Returns the DynamoDB wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllAttributes => "ALL_ATTRIBUTES",
            Self::AllProjectedAttributes => "ALL_PROJECTED_ATTRIBUTES",
            Self::SpecificAttributes => "SPECIFIC_ATTRIBUTES",
            Self::Count => "COUNT",
        }
    }
}

impl std::fmt::Display for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Select {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL_ATTRIBUTES" => Ok(Self::AllAttributes),
            "ALL_PROJECTED_ATTRIBUTES" => Ok(Self::AllProjectedAttributes),
            "SPECIFIC_ATTRIBUTES" => Ok(Self::SpecificAttributes),
            "COUNT" => Ok(Self::Count),
            other => Err(format!(
                "expected one of ALL_ATTRIBUTES, ALL_PROJECTED_ATTRIBUTES, \
                 SPECIFIC_ATTRIBUTES, COUNT, got {other:?}"
            )),
        }
    }
}

/// Controls whether consumed capacity information is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnConsumedCapacity {
    /// Capacity for the table and every index involved.
    #[serde(rename = "INDEXES")]
    Indexes,
    /// Only the total consumed capacity.
    #[serde(rename = "TOTAL")]
    Total,
    /// No capacity report (default).
    #[default]
    #[serde(rename = "NONE")]
    None,
}

impl ReturnConsumedCapacity {
    /// Returns the DynamoDB wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexes => "INDEXES",
            Self::Total => "TOTAL",
            Self::None => "NONE",
        }
    }
}

impl std::fmt::Display for ReturnConsumedCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnConsumedCapacity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDEXES" => Ok(Self::Indexes),
            "TOTAL" => Ok(Self::Total),
            "NONE" => Ok(Self::None),
            other => Err(format!("expected one of INDEXES, TOTAL, NONE, got {other:?}")),
        }
    }
}

/// Capacity units consumed by one table or index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capacity {
    /// Read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// Write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// Total capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
}

impl Capacity {
    /// Add another report's units into this one.
    pub fn absorb(&mut self, other: &Capacity) {
        add_units(&mut self.read_capacity_units, other.read_capacity_units);
        add_units(&mut self.write_capacity_units, other.write_capacity_units);
        add_units(&mut self.capacity_units, other.capacity_units);
    }
}

/// Capacity consumed by an operation across table and indexes.
///
/// Returned when `ReturnConsumedCapacity` is `TOTAL` or `INDEXES`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The table the capacity was charged to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Total capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
    /// Read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// Write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// Capacity consumed by the base table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Capacity>,
    /// Capacity consumed by each local secondary index.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub local_secondary_indexes: HashMap<String, Capacity>,
    /// Capacity consumed by each global secondary index.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub global_secondary_indexes: HashMap<String, Capacity>,
}

impl ConsumedCapacity {
    /// Merge a later page's report into a running total.
    ///
    /// Units are summed field by field; the table name is kept from the first
    /// report that carries one.
    pub fn absorb(&mut self, other: &ConsumedCapacity) {
        if self.table_name.is_none() {
            self.table_name.clone_from(&other.table_name);
        }
        add_units(&mut self.capacity_units, other.capacity_units);
        add_units(&mut self.read_capacity_units, other.read_capacity_units);
        add_units(&mut self.write_capacity_units, other.write_capacity_units);
        if let Some(table) = &other.table {
            self.table.get_or_insert_with(Capacity::default).absorb(table);
        }
        for (name, cap) in &other.local_secondary_indexes {
            self.local_secondary_indexes
                .entry(name.clone())
                .or_default()
                .absorb(cap);
        }
        for (name, cap) in &other.global_secondary_indexes {
            self.global_secondary_indexes
                .entry(name.clone())
                .or_default()
                .absorb(cap);
        }
    }
}

fn add_units(total: &mut Option<f64>, more: Option<f64>) {
    if let Some(more) = more {
        *total = Some(total.unwrap_or(0.0) + more);
    }
}
