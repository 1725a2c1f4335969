//! Field paths into a nested document
//!
//! A path is a dot-separated list of keys, each optionally followed by
//! sequence selectors: `thermal_blocks[*].exterior_walls[0].area`. A path may
//! start with a selector (`[*].power`) when it is applied to a sequence.

use crate::error::{Result, RmrError};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member
    Key(String),
    /// Every element of a sequence
    Each,
    /// One element of a sequence
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |why: &str| RmrError::Model(format!("invalid field path '{}': {}", raw, why));

        if raw.is_empty() {
            return Err(invalid("empty path"));
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }

            let (key, mut rest) = match part.find('[') {
                Some(i) => (&part[..i], &part[i..]),
                None => (part, ""),
            };
            if key.contains(']') {
                return Err(invalid("unexpected ']'"));
            }
            if !key.is_empty() {
                segments.push(Segment::Key(key.to_string()));
            }

            while !rest.is_empty() {
                if !rest.starts_with('[') {
                    return Err(invalid("expected '['"));
                }
                let close = rest.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let inner = &rest[1..close];
                let segment = if inner == "*" {
                    Segment::Each
                } else {
                    let index = inner
                        .parse::<usize>()
                        .map_err(|_| invalid("selector must be '*' or an index"))?;
                    Segment::Index(index)
                };
                segments.push(segment);
                rest = &rest[close + 1..];
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All values the path resolves to, in document order.
    pub fn resolve<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut found = Vec::new();
        collect(root, &self.segments, &mut found);
        found
    }

    /// Sets every location the path reaches to `new`.
    ///
    /// A final key missing from an object is inserted. Other unresolvable
    /// branches are skipped and no intermediate containers are created.
    pub fn assign(&self, root: &mut Value, new: &Value) {
        assign_at(root, &self.segments, new);
    }
}

fn collect<'a>(value: &'a Value, segments: &[Segment], found: &mut Vec<&'a Value>) {
    let Some((head, tail)) = segments.split_first() else {
        found.push(value);
        return;
    };
    match head {
        Segment::Key(key) => {
            if let Some(child) = value.get(key.as_str()) {
                collect(child, tail, found);
            }
        }
        Segment::Each => {
            if let Value::Array(items) = value {
                for item in items {
                    collect(item, tail, found);
                }
            }
        }
        Segment::Index(i) => {
            if let Some(child) = value.get(*i) {
                collect(child, tail, found);
            }
        }
    }
}

fn assign_at(value: &mut Value, segments: &[Segment], new: &Value) {
    match segments {
        [] => *value = new.clone(),
        [Segment::Key(key)] => {
            if let Value::Object(members) = value {
                members.insert(key.clone(), new.clone());
            }
        }
        [head, tail @ ..] => match head {
            Segment::Key(key) => {
                if let Some(child) = value.get_mut(key.as_str()) {
                    assign_at(child, tail, new);
                }
            }
            Segment::Each => {
                if let Value::Array(items) = value {
                    for item in items {
                        assign_at(item, tail, new);
                    }
                }
            }
            Segment::Index(i) => {
                if let Some(child) = value.get_mut(*i) {
                    assign_at(child, tail, new);
                }
            }
        },
    }
}

impl FromStr for FieldPath {
    type Err = RmrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
