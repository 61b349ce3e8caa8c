//! Test utilities and mocks for ue4cli unit tests.
//!
//! Provides an in-memory [`DataCache`] and a scripted [`ExportRunner`] that
//! stands in for UnrealBuildTool.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{export_document, zlib_and_png_modules, MemoryCache, ScriptedRunner};
//!
//! let cache = MemoryCache::default();
//! let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use crate::interrogator::catalog::ExportRunner;
use crate::util::cache::DataCache;
use crate::util::process::ProcessOutput;

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory [`DataCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<(String, String), Value>>,
}

impl MemoryCache {
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl DataCache for MemoryCache {
    fn get(&self, version_hash: &str, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&(version_hash.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&self, version_hash: &str, key: &str, value: Value) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert((version_hash.to_string(), key.to_string()), value);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// One recorded [`ExportRunner::run_export`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub target: String,
    pub platform: String,
    pub configuration: String,
    pub args: Vec<String>,
}

/// [`ExportRunner`] that returns a canned result and optionally writes a
/// canned export document to the requested output file.
#[derive(Debug)]
pub struct ScriptedRunner {
    export: Option<Value>,
    output: ProcessOutput,
    sentinel: Option<PathBuf>,
    delete_during_export: Option<PathBuf>,
    sentinel_seen: Mutex<Option<bool>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    fn new(export: Option<Value>, output: ProcessOutput) -> Self {
        ScriptedRunner {
            export,
            output,
            sentinel: None,
            delete_during_export: None,
            sentinel_seen: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Succeeds and writes `document` as the export.
    pub fn writing(document: Value) -> Self {
        Self::new(
            Some(document),
            ProcessOutput {
                command: String::new(),
                status: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            },
        )
    }

    /// Succeeds without writing anything.
    pub fn silent() -> Self {
        Self::new(
            None,
            ProcessOutput {
                command: String::new(),
                status: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            },
        )
    }

    /// Exits with `status` and the given output.
    pub fn failing(status: i32, stdout: &str, stderr: &str) -> Self {
        Self::new(
            None,
            ProcessOutput {
                command: String::new(),
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Record whether `path` exists while the export runs.
    pub fn watching_sentinel(mut self, path: PathBuf) -> Self {
        self.sentinel = Some(path);
        self
    }

    /// Delete `path` while the export runs.
    pub fn deleting_during_export(mut self, path: PathBuf) -> Self {
        self.delete_during_export = Some(path);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether the watched sentinel existed during the last export.
    pub fn sentinel_seen(&self) -> Option<bool> {
        *self.sentinel_seen.lock().unwrap()
    }
}

impl ExportRunner for ScriptedRunner {
    fn run_export(
        &self,
        target: &str,
        platform: &str,
        configuration: &str,
        args: &[String],
    ) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(RecordedCall {
            target: target.to_string(),
            platform: platform.to_string(),
            configuration: configuration.to_string(),
            args: args.to_vec(),
        });

        if let Some(sentinel) = &self.sentinel {
            *self.sentinel_seen.lock().unwrap() = Some(sentinel.exists());
        }

        if let Some(path) = &self.delete_during_export {
            std::fs::remove_file(path)?;
        }

        if let Some(document) = &self.export {
            let output = args
                .iter()
                .find_map(|a| {
                    a.strip_prefix("-OutputFile=")
                        .or_else(|| a.strip_prefix("-jsonexport="))
                })
                .expect("export arguments carry an output file");
            std::fs::write(output, document.to_string())?;
        }

        Ok(ProcessOutput {
            command: format!(
                "Build.sh {} {} {} {}",
                target,
                platform,
                configuration,
                args.join(" ")
            ),
            ..self.output.clone()
        })
    }
}

/// Log sink for asserting on emitted `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Run `f` with every event at `INFO` and above written to this sink.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
