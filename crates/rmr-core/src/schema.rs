//! Schema validation collaborator
//!
//! Schema conformance is checked by an external validator. Its outcome is
//! logged next to rule results but never feeds the failure flags.

use crate::error::{Result, RmrError};
use crate::stage::{Stage, STAGE_FIELD};
use crate::store::DocumentStore;
use crate::triplet::Triplet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A schema violation as reported by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaViolation {
    pub message: String,
    /// The offending value
    pub value: Value,
    /// The violated schema rule (e.g. `required`, `enum`)
    pub rule: String,
    /// The rule's formal definition
    pub definition: Value,
}

pub trait SchemaValidator {
    fn validate(&self, document: &Value) -> std::result::Result<(), SchemaViolation>;
}

/// Minimal validator: required top-level members and a legal stage tag.
#[derive(Debug, Clone)]
pub struct RequiredFields {
    required: Vec<String>,
}

impl RequiredFields {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::new([STAGE_FIELD, "climate_zone"])
    }
}

impl SchemaValidator for RequiredFields {
    fn validate(&self, document: &Value) -> std::result::Result<(), SchemaViolation> {
        let Some(object) = document.as_object() else {
            return Err(SchemaViolation {
                message: "document must be an object".to_string(),
                value: document.clone(),
                rule: "type".to_string(),
                definition: Value::String("object".to_string()),
            });
        };

        if let Some(missing) = self.required.iter().find(|k| !object.contains_key(k.as_str())) {
            return Err(SchemaViolation {
                message: format!("document must contain ['{}'] properties", missing),
                value: document.clone(),
                rule: "required".to_string(),
                definition: Value::from(self.required.clone()),
            });
        }

        if let Some(tag) = object.get(STAGE_FIELD) {
            let legal = tag.as_str().and_then(Stage::parse).is_some();
            if !legal {
                return Err(SchemaViolation {
                    message: format!("{} must be one of USER, PROPOSED, BASELINE", STAGE_FIELD),
                    value: tag.clone(),
                    rule: "enum".to_string(),
                    definition: Value::from(
                        Stage::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Validates the three stage documents, logging each violation.
pub fn validate_triplet(
    validator: &dyn SchemaValidator,
    triplet: &Triplet,
) -> Vec<(Stage, SchemaViolation)> {
    let mut violations = Vec::new();
    for stage in Stage::ALL {
        if let Err(violation) = validator.validate(triplet.model(stage).document()) {
            tracing::warn!(
                stage = %stage,
                rule = %violation.rule,
                value = %violation.value,
                "schema violation: {}",
                violation.message
            );
            violations.push((stage, violation));
        }
    }
    violations
}

/// Result of validating one file in a batch
#[derive(Debug)]
pub enum DocumentCheck {
    Valid,
    Invalid(SchemaViolation),
    Unreadable(RmrError),
}

/// Validates every `*.json` instance in `dir` (schema files, `*.schema.json`,
/// are skipped). A bad file never stops the batch; only an unreadable
/// directory is an error. A directory entry that cannot be read is reported
/// as `Unreadable` against `dir`.
pub fn validate_documents(
    validator: &dyn SchemaValidator,
    store: &dyn DocumentStore,
    dir: &Path,
) -> Result<Vec<(PathBuf, DocumentCheck)>> {
    let entries = fs::read_dir(dir).map_err(|e| RmrError::io(dir, e))?;
    Ok(validate_entries(
        validator,
        store,
        dir,
        entries.map(|entry| entry.map(|e| e.path())),
    ))
}

fn validate_entries<I>(
    validator: &dyn SchemaValidator,
    store: &dyn DocumentStore,
    dir: &Path,
    entries: I,
) -> Vec<(PathBuf, DocumentCheck)>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut paths = Vec::new();
    let mut unreadable = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if name.ends_with(".json") && !name.ends_with(".schema.json") {
                    paths.push(path);
                }
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "unreadable directory entry: {}", e);
                unreadable.push((dir.to_path_buf(), DocumentCheck::Unreadable(RmrError::io(dir, e))));
            }
        }
    }
    paths.sort();

    let mut results = Vec::with_capacity(paths.len() + unreadable.len());
    for path in paths {
        let check = match store.load(&path) {
            Ok(document) => match validator.validate(&document) {
                Ok(()) => DocumentCheck::Valid,
                Err(violation) => {
                    tracing::warn!(
                        file = %path.display(),
                        rule = %violation.rule,
                        "invalid value {}: {}",
                        violation.value,
                        violation.message
                    );
                    DocumentCheck::Invalid(violation)
                }
            },
            Err(err) => {
                tracing::warn!(file = %path.display(), "unreadable document: {}", err);
                DocumentCheck::Unreadable(err)
            }
        };
        results.push((path, check));
    }
    results.extend(unreadable);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_required_fields_pass() {
        let doc = json!({ "transformation_stage": "USER", "climate_zone": "CZ4A" });
        assert!(RequiredFields::default().validate(&doc).is_ok());
    }

    #[test]
    fn test_missing_required_member() {
        let violation = RequiredFields::default()
            .validate(&json!({ "transformation_stage": "USER" }))
            .unwrap_err();
        assert_eq!(violation.rule, "required");
        assert!(violation.message.contains("climate_zone"));
    }

    #[test]
    fn test_illegal_stage_tag() {
        let doc = json!({ "transformation_stage": "DRAFT", "climate_zone": "CZ4A" });
        let violation = RequiredFields::default().validate(&doc).unwrap_err();
        assert_eq!(violation.rule, "enum");
        assert_eq!(violation.value, json!("DRAFT"));
    }

    #[test]
    fn test_validate_triplet_leaves_flags_alone() {
        let triplet = Triplet::from_document(&json!({}), "t").unwrap();
        let violations = validate_triplet(&RequiredFields::default(), &triplet);
        assert_eq!(violations.len(), 3);
        assert!(!triplet.flags().any());
    }

    #[test]
    fn test_validate_documents_batch() {
        let dir = TempDir::new().unwrap();
        let good = json!({ "transformation_stage": "BASELINE", "climate_zone": "CZ2A" });
        JsonFileStore.save(&dir.path().join("a.baseline.json"), &good).unwrap();
        JsonFileStore.save(&dir.path().join("b.user.json"), &json!({})).unwrap();
        JsonFileStore.save(&dir.path().join("rmr.schema.json"), &json!({})).unwrap();
        std::fs::write(dir.path().join("c.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let results =
            validate_documents(&RequiredFields::default(), &JsonFileStore, dir.path()).unwrap();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0].1, DocumentCheck::Valid));
        assert!(matches!(results[1].1, DocumentCheck::Invalid(_)));
        assert!(matches!(results[2].1, DocumentCheck::Unreadable(_)));
    }

    #[test]
    fn test_unreadable_entry_is_reported() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("a.user.json");
        JsonFileStore
            .save(&good, &json!({ "transformation_stage": "USER", "climate_zone": "CZ2A" }))
            .unwrap();
        let entries = vec![
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "entry denied")),
            Ok(good.clone()),
        ];

        let results = validate_entries(&RequiredFields::default(), &JsonFileStore, dir.path(), entries);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        assert!(matches!(results[0].1, DocumentCheck::Valid));
        assert_eq!(results[1].0, dir.path());
        match &results[1].1 {
            DocumentCheck::Unreadable(RmrError::Io { path, .. }) => assert_eq!(path.as_path(), dir.path()),
            other => panic!("expected an unreadable entry, got {:?}", other),
        }
    }
}
