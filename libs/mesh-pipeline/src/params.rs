//! # Node Parameters
//!
//! Loosely typed option maps read from graph descriptions. Numeric getters
//! accept JSON numbers and numeric strings; anything else is a
//! [`NodeError::MalformedParameter`]. Missing keys and `null` fall back to
//! the caller's default.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::NodeError;

/// Option map of a node or of the whole graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Json>);

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value; anything but an object yields empty params.
    pub fn from_json(value: Json) -> Self {
        match value {
            Json::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Raw access to a parameter. `null` counts as absent.
    pub fn get(&self, name: &str) -> Option<&Json> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Json) {
        self.0.insert(name.into(), value);
    }

    /// Returns true when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads an optional finite number.
    pub fn f64_opt(&self, name: &str) -> Result<Option<f64>, NodeError> {
        self.get(name).map(|v| number(name, v)).transpose()
    }

    /// Reads a finite number, falling back to `default` when absent.
    pub fn f64_or(&self, name: &str, default: f64) -> Result<f64, NodeError> {
        Ok(self.f64_opt(name)?.unwrap_or(default))
    }

    /// Reads a 3-vector given as `[x, y, z]`; a single number is splatted.
    pub fn vec3_or(&self, name: &str, default: DVec3) -> Result<DVec3, NodeError> {
        match self.get(name) {
            None => Ok(default),
            Some(Json::Array(items)) => match items.as_slice() {
                [x, y, z] => Ok(DVec3::new(
                    number(name, x)?,
                    number(name, y)?,
                    number(name, z)?,
                )),
                _ => Err(NodeError::malformed(
                    name,
                    format!("expected 3 components, got {}", items.len()),
                )),
            },
            Some(scalar) => Ok(DVec3::splat(number(name, scalar)?)),
        }
    }

    /// Reads an optional non-negative integer such as a random seed.
    pub fn u64_opt(&self, name: &str) -> Result<Option<u64>, NodeError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Json::Number(n) => n.as_u64(),
            Json::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| {
            NodeError::malformed(name, format!("expected unsigned integer, got {value}"))
        })
    }

    /// Reads an optional string.
    pub fn str_opt(&self, name: &str) -> Result<Option<&str>, NodeError> {
        match self.get(name) {
            None => Ok(None),
            Some(Json::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(NodeError::malformed(
                name,
                format!("expected string, got {other}"),
            )),
        }
    }

    /// Reads a flag using JSON truthiness: `false`, `0`, `""` and absence
    /// are false, everything else is true.
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            None => false,
            Some(Json::Bool(b)) => *b,
            Some(Json::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0),
            Some(Json::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Returns a nested object as params, or empty params when absent or
    /// not an object.
    pub fn object(&self, name: &str) -> Params {
        match self.get(name) {
            Some(Json::Object(map)) => Params(map.clone()),
            _ => Params::default(),
        }
    }

    /// Returns a copy of `self` with every entry of `top` written over it.
    pub fn overlay(&self, top: &Params) -> Params {
        let mut merged = self.0.clone();
        merged.extend(top.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Params(merged)
    }
}

fn number(name: &str, value: &Json) -> Result<f64, NodeError> {
    let parsed = match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(NodeError::malformed(
            name,
            format!("expected number, got {value}"),
        )),
    }
}
