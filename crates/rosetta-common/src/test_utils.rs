//! Test utilities and shared test helpers for Rosetta.
//!
//! This module provides log capture, temporary file fixtures, and sample
//! catalogs that can be used across all crates in the workspace for unit and
//! integration testing.

use std::io;
use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, fmt::MakeWriter};

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written output split into non-empty lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "tracing-subscriber")]
impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a scoped subscriber and returns its result together with
/// every log line emitted on this thread while it ran.
#[cfg(all(feature = "tracing-subscriber", feature = "tracing"))]
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let buffer = LogBuffer::default();
    let subscriber = fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.lines())
}

/// Lines of captured output emitted at `WARN` level.
pub fn warnings(lines: &[String]) -> Vec<&String> {
    lines.iter().filter(|line| line.contains("WARN")).collect()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Catalog documents used across the workspace tests.
pub mod catalog_fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// A small catalog with a regional fallback, plural keys and options.
    pub const SAMPLE_CATALOG_JSON: &str = r#"{
    "en": {
        "greet": "Hi {user}",
        "farewell": "Goodbye",
        "itemSingular": "{count} item",
        "itemPlural": "{count} items",
        "inbox": ["You have one message", "You have {count} messages"]
    },
    "es": {
        "farewell": "Adiós",
        "itemSingular": "{count} elemento",
        "itemPlural": "{count} elementos"
    },
    "options": {
        "plural_rule": "n != 1",
        "plural_number": 2,
        "suppress_warnings": false
    }
}"#;

    /// The same catalog expressed as YAML.
    pub const SAMPLE_CATALOG_YAML: &str = r#"
en:
  greet: "Hi {user}"
  farewell: Goodbye
  itemSingular: "{count} item"
  itemPlural: "{count} items"
  inbox:
    - You have one message
    - "You have {count} messages"
es:
  farewell: Adiós
  itemSingular: "{count} elemento"
  itemPlural: "{count} elementos"
options:
  plural_rule: "n != 1"
  plural_number: 2
  suppress_warnings: false
"#;

    /// The same catalog expressed as TOML.
    pub const SAMPLE_CATALOG_TOML: &str = r#"
[en]
greet = "Hi {user}"
farewell = "Goodbye"
itemSingular = "{count} item"
itemPlural = "{count} items"
inbox = ["You have one message", "You have {count} messages"]

[es]
farewell = "Adiós"
itemSingular = "{count} elemento"
itemPlural = "{count} elementos"

[options]
plural_rule = "n != 1"
plural_number = 2
suppress_warnings = false
"#;

    /// Writes `content` to `dir/name` and returns the full path.
    pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }
}
