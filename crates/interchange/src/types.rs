//! Typed structs representing a variable export document.
//!
//! Field names follow Rust conventions; the JSON names (`modeId`,
//! `defaultModeId`, `resolvedType`, `valuesByMode`) are handled in
//! [`crate::deserialize`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level export document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariablesExport {
    /// Collections in document order. Routing and output order follow it.
    pub collections: Vec<Collection>,
}

impl VariablesExport {
    /// Total number of variables across all collections.
    pub fn variable_count(&self) -> usize {
        self.collections.iter().map(|c| c.variables.len()).sum()
    }
}

// ── Collection ──────────────────────────────────────────────────────

/// A named group of variables sharing a set of modes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub name: String,
    pub modes: Vec<Mode>,
    pub default_mode_id: Option<String>,
    pub variables: Vec<Variable>,
}

impl Collection {
    /// The mode used by single-mode collections.
    ///
    /// `defaultModeId` wins when it names a declared mode; otherwise the
    /// first declared mode is used.
    pub fn default_mode(&self) -> Option<&Mode> {
        self.default_mode_id
            .as_deref()
            .and_then(|id| self.modes.iter().find(|m| m.mode_id == id))
            .or_else(|| self.modes.first())
    }
}

/// A named variant within a collection (e.g. "Light", "Dark").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

// ── Variable ────────────────────────────────────────────────────────

/// The declared type of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableType {
    Color,
    Float,
    Boolean,
    String,
    /// Any type string not listed above, kept verbatim.
    Other(String),
}

impl VariableType {
    pub fn parse(s: &str) -> Self {
        match s {
            "COLOR" => VariableType::Color,
            "FLOAT" => VariableType::Float,
            "BOOLEAN" => VariableType::Boolean,
            "STRING" => VariableType::String,
            other => VariableType::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Color => write!(f, "COLOR"),
            VariableType::Float => write!(f, "FLOAT"),
            VariableType::Boolean => write!(f, "BOOLEAN"),
            VariableType::String => write!(f, "STRING"),
            VariableType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A single variable definition with one raw value per mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: String,
    /// Slash-delimited hierarchical name, e.g. `"Spacing/Small"`.
    pub name: String,
    pub resolved_type: VariableType,
    /// Mode id -> raw value. `null` values are not stored.
    pub values_by_mode: BTreeMap<String, RawValue>,
}

impl Variable {
    pub fn value_for(&self, mode_id: &str) -> Option<&RawValue> {
        self.values_by_mode.get(mode_id)
    }
}

// ── Raw values ──────────────────────────────────────────────────────

/// A raw per-mode value as found in the export.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    Color(Rgba),
    /// Reference to another variable. `id` is `None` when the alias record
    /// carries no usable identifier.
    Alias { id: Option<String> },
    /// Anything else: arrays, unrecognized objects, non-numeric channels.
    Unsupported(serde_json::Value),
}

/// A terminal scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Bool(bool),
    String(String),
}

/// A color record with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}
