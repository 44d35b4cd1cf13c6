//! Pass 3: value resolution -- follow alias chains to a terminal value
//! for one (variable, mode) pair.
//!
//! Alias targets are read with the *referencing* variable's mode id, not
//! by mode name. A target in a collection whose mode ids differ therefore
//! resolves to [`Unresolved::MissingModeValue`].

use crate::color::rgba_to_hex;
use crate::pass2_index::VariableIndex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tokenbake_interchange::{RawValue, Scalar, Variable};

/// A terminal value: never an alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Scalar(Scalar),
    /// `#rrggbb` or `#rrggbbaa`.
    Color(String),
}

impl ResolvedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Scalar(Scalar::String(s)) | ResolvedValue::Color(s) => Some(s),
            ResolvedValue::Scalar(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResolvedValue::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

/// Why a (variable, mode) pair has no value. Never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unresolved {
    /// No value for the mode id on the variable or on an alias target.
    MissingModeValue,
    /// Alias to an id that is not in the index, or with no id at all.
    DanglingAlias,
    /// Alias chain revisits an id.
    CyclicAlias,
    /// Raw value is neither scalar, color, nor alias.
    UnsupportedValue,
}

impl Unresolved {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unresolved::MissingModeValue => "missing_mode_value",
            Unresolved::DanglingAlias => "dangling_alias",
            Unresolved::CyclicAlias => "cyclic_alias",
            Unresolved::UnsupportedValue => "unsupported_value",
        }
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving one (variable, mode) pair, with the alias ids
/// followed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub value: Result<ResolvedValue, Unresolved>,
    pub chain: Vec<&'a str>,
}

/// Resolve `variable` for `mode_id`.
pub fn resolve(
    index: &VariableIndex<'_>,
    variable: &Variable,
    mode_id: &str,
) -> Result<ResolvedValue, Unresolved> {
    resolve_chain(index, variable, mode_id).value
}

/// Resolve `variable` for `mode_id`, recording every alias hop.
pub fn resolve_chain<'a>(
    index: &VariableIndex<'a>,
    variable: &'a Variable,
    mode_id: &str,
) -> Resolution<'a> {
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut chain: Vec<&'a str> = Vec::new();
    let mut current = variable;

    let value = loop {
        let Some(raw) = current.value_for(mode_id) else {
            break Err(Unresolved::MissingModeValue);
        };

        match raw {
            RawValue::Alias { id } => {
                let Some(target_id) = id.as_deref() else {
                    break Err(Unresolved::DanglingAlias);
                };
                if visited.contains(target_id) {
                    break Err(Unresolved::CyclicAlias);
                }
                let Some(entry) = index.get(target_id) else {
                    break Err(Unresolved::DanglingAlias);
                };
                let target = entry.variable;
                visited.insert(target.id.as_str());
                chain.push(target.id.as_str());
                current = target;
            }
            RawValue::Color(c) => break Ok(ResolvedValue::Color(rgba_to_hex(c))),
            RawValue::Scalar(s) => break Ok(ResolvedValue::Scalar(s.clone())),
            RawValue::Unsupported(_) => break Err(Unresolved::UnsupportedValue),
        }
    };

    Resolution { value, chain }
}
