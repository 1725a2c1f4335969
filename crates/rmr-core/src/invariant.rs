//! Structural invariant checker
//!
//! Two copies of a model substructure must be equal everywhere except in the
//! fields a rule licenses to change. The checker deep-copies both sides,
//! sets every licensed path to `null` on both, and then compares the
//! neutralized copies over the whole tree. A licensed member missing from an
//! object is inserted as `null`, so a stage may fill in a field another stage
//! left empty or absent.
//!
//! Comparison semantics:
//! - objects are key-indexed maps (member order is irrelevant)
//! - arrays are compared element-wise, in order
//! - numbers compare numerically, so `150` equals `150.0`

use crate::error::Result;
use crate::path::FieldPath;
use serde_json::Value;

/// Outcome of one invariant check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantOutcome {
    Holds,
    /// The neutralized copies differ; `at` is the first differing location.
    Broken { at: String },
}

impl InvariantOutcome {
    pub fn holds(&self) -> bool {
        matches!(self, InvariantOutcome::Holds)
    }
}

/// Deep equality with a set of neutralized field paths
#[derive(Debug, Clone, Default)]
pub struct StructuralInvariant {
    paths: Vec<FieldPath>,
}

impl StructuralInvariant {
    /// Exact equality, nothing neutralized
    pub fn exact() -> Self {
        Self::default()
    }

    pub fn neutralizing<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| FieldPath::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    /// Compares two substructures. A side that is absent is treated as
    /// `null`, so a substructure missing from both documents holds.
    pub fn check(&self, left: Option<&Value>, right: Option<&Value>) -> InvariantOutcome {
        let mut left = left.cloned().unwrap_or(Value::Null);
        let mut right = right.cloned().unwrap_or(Value::Null);
        neutralize(&mut left, &self.paths);
        neutralize(&mut right, &self.paths);

        match first_difference(&left, &right) {
            None => InvariantOutcome::Holds,
            Some(at) => InvariantOutcome::Broken { at },
        }
    }
}

/// Sets every location reachable through `paths` to `null`.
pub fn neutralize(value: &mut Value, paths: &[FieldPath]) {
    for path in paths {
        path.assign(value, &Value::Null);
    }
}

/// Deep value equality
pub fn values_equal(left: &Value, right: &Value) -> bool {
    first_difference(left, right).is_none()
}

/// Location of the first difference between two trees, if any.
pub fn first_difference(left: &Value, right: &Value) -> Option<String> {
    let mut location = String::from("$");
    if diff_at(left, right, &mut location) {
        Some(location)
    } else {
        None
    }
}

fn diff_at(left: &Value, right: &Value, location: &mut String) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x != y,
            _ => a.as_f64() != b.as_f64(),
        },
        (Value::Array(a), Value::Array(b)) => {
            let mark = location.len();
            for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                location.push_str(&format!("[{}]", i));
                if diff_at(x, y, location) {
                    return true;
                }
                location.truncate(mark);
            }
            if a.len() != b.len() {
                location.push_str(&format!("[{}]", a.len().min(b.len())));
                return true;
            }
            false
        }
        (Value::Object(a), Value::Object(b)) => {
            let mark = location.len();
            for (key, x) in a {
                location.push('.');
                location.push_str(key);
                match b.get(key) {
                    Some(y) => {
                        if diff_at(x, y, location) {
                            return true;
                        }
                    }
                    None => return true,
                }
                location.truncate(mark);
            }
            if let Some(key) = b.keys().find(|k| !a.contains_key(k.as_str())) {
                location.push('.');
                location.push_str(key);
                return true;
            }
            false
        }
        _ => left != right,
    }
}
