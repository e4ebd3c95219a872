// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The scalar value exchanged with the host and stored in presets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative tolerance used when comparing numeric values.
pub const SCALAR_EPSILON: f64 = 1e-6;

/// The primitive kind of a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// A boolean flag.
    Bool,
    /// A signed integer.
    Int,
    /// A double precision float.
    Float,
}

/// A tagged scalar: the only kind of value a host attribute or a preset field holds.
///
/// Serialized untagged, so JSON `true`, `1920` and `5.6` map to `Bool`, `Int`
/// and `Float` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
}

impl Scalar {
    /// Returns the kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
        }
    }

    /// Interprets the value as a boolean. Numbers are `true` when non-zero.
    pub fn as_bool(&self) -> bool {
        match *self {
            Scalar::Bool(b) => b,
            Scalar::Int(i) => i != 0,
            Scalar::Float(f) => f != 0.0,
        }
    }

    /// Interprets the value as an integer. Floats are rounded to the nearest integer.
    pub fn as_int(&self) -> i64 {
        match *self {
            Scalar::Bool(b) => i64::from(b),
            Scalar::Int(i) => i,
            Scalar::Float(f) => f.round() as i64,
        }
    }

    /// Interprets the value as a float.
    pub fn as_float(&self) -> f64 {
        match *self {
            Scalar::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Scalar::Int(i) => i as f64,
            Scalar::Float(f) => f,
        }
    }

    /// Converts the value to the requested kind.
    pub fn coerce_to(&self, kind: ScalarKind) -> Scalar {
        match kind {
            ScalarKind::Bool => Scalar::Bool(self.as_bool()),
            ScalarKind::Int => Scalar::Int(self.as_int()),
            ScalarKind::Float => Scalar::Float(self.as_float()),
        }
    }

    /// Loose equality used to decide whether a preset value matches a live value.
    ///
    /// Two booleans compare exactly. Anything else compares numerically, booleans
    /// counting as 0 or 1, with a relative tolerance of [`SCALAR_EPSILON`].
    pub fn matches(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => approx::relative_eq!(
                self.as_float(),
                other.as_float(),
                epsilon = SCALAR_EPSILON,
                max_relative = SCALAR_EPSILON
            ),
        }
    }
}

impl fmt::Display for Scalar {
    /// Formats the value the way a text field shows it: floats rounded to 3 decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(v) => write!(f, "{}", (v * 1000.0).round() / 1000.0),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_keep_their_kind() {
        let values: Vec<Scalar> = serde_json::from_str("[true, 1920, 5.6]").unwrap();
        assert_eq!(
            values,
            vec![Scalar::Bool(true), Scalar::Int(1920), Scalar::Float(5.6)]
        );
        assert_eq!(serde_json::to_string(&values).unwrap(), "[true,1920,5.6]");
    }

    #[test]
    fn coercion_follows_target_kind() {
        assert_eq!(Scalar::Float(1079.9999).coerce_to(ScalarKind::Int), Scalar::Int(1080));
        assert_eq!(Scalar::Int(0).coerce_to(ScalarKind::Bool), Scalar::Bool(false));
        assert_eq!(Scalar::Bool(true).coerce_to(ScalarKind::Float), Scalar::Float(1.0));
    }

    #[test]
    fn matches_is_loose_across_numeric_kinds() {
        assert!(Scalar::Int(3).matches(&Scalar::Float(3.0)));
        assert!(Scalar::Bool(true).matches(&Scalar::Int(1)));
        assert!(Scalar::Float(0.1 + 0.2).matches(&Scalar::Float(0.3)));
        assert!(!Scalar::Float(5.6).matches(&Scalar::Float(8.0)));
        assert!(!Scalar::Bool(true).matches(&Scalar::Bool(false)));
    }

    #[test]
    fn display_rounds_floats() {
        assert_eq!(Scalar::Float(2.718_281).to_string(), "2.718");
        assert_eq!(Scalar::Int(64).to_string(), "64");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
    }
}
