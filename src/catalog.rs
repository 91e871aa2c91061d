use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::Problem;
use crate::error::{CuratorError, Result};

/// Compiled once; the embedded schema is a build-time asset.
static CATALOG_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema: &'static Value = Box::leak(Box::new(
        serde_json::from_str(include_str!("../schemas/catalog.v1.json"))
            .expect("embedded catalog schema is valid JSON"),
    ));
    JSONSchema::options()
        .compile(schema)
        .expect("embedded catalog schema compiles")
});

/// Bulk read/write of the catalog document. The whole collection is
/// materialized on load and written back in one piece; there is no partial
/// or streaming access.
pub struct CatalogStore {
    path: PathBuf,
}

/// Result of a persist call.
#[derive(Debug, Clone)]
pub struct PersistOutcome {
    /// False when the on-disk document already matched and no write happened.
    pub written: bool,
    /// Hex sha256 of the serialized document.
    pub sha256: String,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and deserialize the full document, checking its shape against
    /// the embedded schema first.
    pub fn load(&self) -> Result<Vec<Problem>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CuratorError::Config(format!(
                "Failed to read catalog '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let document: Value = serde_json::from_str(&content)?;
        validate_document(&document)?;

        let problems: Vec<Problem> = serde_json::from_value(document)?;
        debug!(count = problems.len(), "loaded catalog");
        Ok(problems)
    }

    /// Serialize and write the full document. The write is skipped when the
    /// serialized bytes hash to what is already on disk, so re-running an
    /// unchanged pipeline leaves the file untouched.
    pub fn persist(&self, problems: &[Problem]) -> Result<PersistOutcome> {
        let mut payload = serde_json::to_string_pretty(problems)?;
        payload.push('\n');
        let sha256 = document_digest(payload.as_bytes());

        if let Ok(existing) = fs::read(&self.path) {
            if document_digest(&existing) == sha256 {
                debug!(%sha256, "catalog unchanged, skipping write");
                return Ok(PersistOutcome {
                    written: false,
                    sha256,
                });
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        debug!(%sha256, count = problems.len(), "catalog written");
        Ok(PersistOutcome {
            written: true,
            sha256,
        })
    }
}

/// Check a raw document against the catalog schema, reporting the first few
/// violations with their instance paths.
pub fn validate_document(document: &Value) -> Result<()> {
    if let Err(errors) = CATALOG_SCHEMA.validate(document) {
        let messages: Vec<String> = errors
            .take(5)
            .map(|e| format!("{} (at {})", e, e.instance_path))
            .collect();
        return Err(CuratorError::Schema(messages.join("; ")));
    }
    Ok(())
}

/// Hex sha256 digest of a serialized document.
pub fn document_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CatalogStore {
        CatalogStore::new(dir.path().join("problems.json"))
    }

    #[test]
    fn test_round_trip_preserves_unmodeled_fields() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let document = json!([{
            "id": 1,
            "title": "Two Sum",
            "slug": "two-sum",
            "algorithmType": "two_pointer",
            "thinking_guide": {"naive_approach": ["Brute force checking all possibilities."]}
        }]);
        fs::write(store.path(), serde_json::to_string_pretty(&document).unwrap()).unwrap();

        let problems = store.load().unwrap();
        store.persist(&problems).unwrap();

        let reloaded: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(reloaded, document);
    }

    #[test]
    fn test_persist_skips_unchanged_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let problems = vec![Problem::new(1, "Two Sum", "two-sum")];

        let first = store.persist(&problems).unwrap();
        let second = store.persist(&problems).unwrap();

        assert!(first.written);
        assert!(!second.written);
        assert_eq!(first.sha256, second.sha256);
    }

    #[test]
    fn test_schema_violation_fails_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // Record is missing its title.
        fs::write(store.path(), r#"[{"id": 1, "slug": "two-sum"}]"#).unwrap();

        match store.load() {
            Err(CuratorError::Schema(message)) => assert!(message.contains("title")),
            other => panic!("expected schema error, got {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn test_non_array_document_fails_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"problems": []}"#).unwrap();
        assert!(matches!(store.load(), Err(CuratorError::Schema(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        match store.load() {
            Err(CuratorError::Config(message)) => assert!(message.contains("problems.json")),
            other => panic!("expected config error, got {:?}", other.map(|p| p.len())),
        }
    }
}
