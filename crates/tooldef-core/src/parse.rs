//! Line scanner for configuration files.
//!
//! Each non-comment line is either a `DEFINE name = value` macro or a
//! `TARGET_TOOLCHAIN_ARCH_COMMAND_ATTRIBUTE = value` property. Malformed lines
//! are recorded as diagnostics and skipped; they never abort the scan.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ToolDefError};
use crate::record::{Define, Property, KEY_COMPONENTS};

const DEFINE_PREFIX: &str = "DEFINE ";

/// A skipped input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

/// Everything scanned from one file, in input order.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub defines: Vec<Define>,
    pub properties: Vec<Property>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read and scan a configuration file.
pub fn load_file(path: &Path) -> Result<ParsedFile> {
    if !path.exists() {
        return Err(ToolDefError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let parsed = parse_str(&content);
    debug!(
        path = %path.display(),
        defines = parsed.defines.len(),
        properties = parsed.properties.len(),
        skipped = parsed.diagnostics.len(),
        "scanned configuration file"
    );
    Ok(parsed)
}

/// Scan configuration text.
pub fn parse_str(input: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix(DEFINE_PREFIX) {
            match rest.split_once('=') {
                Some((name, value)) => parsed
                    .defines
                    .push(Define::new(name.trim(), value.trim())),
                None => parsed.skip(line_no, format!("Invalid define {}", rest.trim())),
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            parsed.skip(line_no, format!("Invalid property {}", line.trim()));
            continue;
        };
        let key = key.trim();
        match Property::from_raw(key, value.trim()) {
            Some(property) => parsed.properties.push(property),
            None => parsed.skip(
                line_no,
                format!(
                    "Invalid property {key} (expected {KEY_COMPONENTS} components, found {})",
                    key.split('_').count()
                ),
            ),
        }
    }

    parsed
}

impl ParsedFile {
    fn skip(&mut self, line: usize, message: String) {
        warn!(line, "{message}");
        self.diagnostics.push(Diagnostic { line, message });
    }
}
