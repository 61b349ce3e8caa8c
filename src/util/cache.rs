//! Per-engine-version data cache.
//!
//! Interrogating UnrealBuildTool takes a long time, so its results are kept
//! in one JSON document per engine version hash:
//! `<config dir>/cache/<hash>.json`, a flat key/value object.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::core::errors::InterrogateError;
use crate::util::fs::{ensure_dir, read_to_string, remove_dir_all_if_exists, write_string};

/// Key/value store keyed by `(engine version hash, key)`.
pub trait DataCache {
    /// Retrieve a cached value, `None` on a miss.
    fn get(&self, version_hash: &str, key: &str) -> Result<Option<Value>>;

    /// Store a value, replacing any previous one.
    fn set(&self, version_hash: &str, key: &str, value: Value) -> Result<()>;

    /// Drop everything cached for every engine version.
    fn clear(&self) -> Result<()>;
}

/// [`DataCache`] backed by JSON files in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileCache { dir: dir.into() }
    }

    /// Directory holding the cache files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file for an engine version hash.
    pub fn file_for(&self, version_hash: &str) -> PathBuf {
        self.dir.join(format!("{}.json", version_hash))
    }

    fn load(&self, path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }

        let contents = read_to_string(path)?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|e| InterrogateError::DataFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(InterrogateError::DataFormat {
                path: path.to_path_buf(),
                message: "expected a JSON object at the top level".to_string(),
            }
            .into()),
        }
    }
}

impl DataCache for JsonFileCache {
    fn get(&self, version_hash: &str, key: &str) -> Result<Option<Value>> {
        let mut data = self.load(&self.file_for(version_hash))?;
        Ok(data.remove(key))
    }

    fn set(&self, version_hash: &str, key: &str, value: Value) -> Result<()> {
        let path = self.file_for(version_hash);
        let mut data = self.load(&path)?;
        data.insert(key.to_string(), value);

        ensure_dir(&self.dir)?;
        write_string(&path, &Value::Object(data).to_string())
    }

    fn clear(&self) -> Result<()> {
        remove_dir_all_if_exists(&self.dir)
    }
}
