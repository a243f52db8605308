//! Fixture documents read from the test data directory.

use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory fixtures are read from, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "performance-testdata";

/// Errors loading a fixture document. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: no data", .path.display())]
    Empty { path: PathBuf },

    #[error("{}: expected a document, found {found}", .path.display())]
    NotADocument { path: PathBuf, found: &'static str },
}

impl FixtureError {
    /// Path of the fixture that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Parse { path, .. }
            | Self::Empty { path }
            | Self::NotADocument { path, .. } => path,
        }
    }
}

/// Read the first JSON document from `data_dir/name`.
///
/// The top-level value must be an object. Trailing documents in the file are
/// ignored.
pub fn read_json_file(data_dir: &Path, name: &str) -> Result<Value, FixtureError> {
    let path = data_dir.join(name);
    let file = File::open(&path).map_err(|source| FixtureError::Open {
        path: path.clone(),
        source,
    })?;

    let mut documents =
        serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<Value>();

    match documents.next() {
        Some(Ok(doc @ Value::Object(_))) => {
            tracing::debug!("Loaded fixture {}", path.display());
            Ok(doc)
        }
        Some(Ok(other)) => Err(FixtureError::NotADocument {
            path,
            found: json_kind(&other),
        }),
        Some(Err(source)) => Err(FixtureError::Parse { path, source }),
        None => Err(FixtureError::Empty { path }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_reads_first_document() {
        let dir = TempDir::new().unwrap();
        write(&dir, "two.json", r#"{"a": 1} {"b": 2}"#);
        let doc = read_json_file(dir.path(), "two.json").unwrap();
        assert_eq!(doc, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let err = read_json_file(dir.path(), "absent.json").unwrap_err();
        assert!(matches!(err, FixtureError::Open { .. }));
        assert!(err.to_string().contains("absent.json"));
        assert_eq!(err.path(), dir.path().join("absent.json"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.json", r#"{"a": "#);
        let err = read_json_file(dir.path(), "bad.json").unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
        assert!(err.to_string().starts_with(&dir.path().join("bad.json").display().to_string()));
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "empty.json", "  \n");
        let err = read_json_file(dir.path(), "empty.json").unwrap_err();
        assert!(matches!(err, FixtureError::Empty { .. }));
        assert!(err.to_string().ends_with(": no data"));
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        let dir = TempDir::new().unwrap();
        for (name, contents, kind) in [
            ("scalar.json", "42", "number"),
            ("array.json", "[1, 2]", "array"),
            ("string.json", r#""doc""#, "string"),
        ] {
            write(&dir, name, contents);
            let err = read_json_file(dir.path(), name).unwrap_err();
            assert!(matches!(err, FixtureError::NotADocument { found, .. } if found == kind));
            assert_eq!(err.path(), dir.path().join(name));
            assert!(err.to_string().ends_with(&format!("expected a document, found {kind}")));
        }
    }
}
