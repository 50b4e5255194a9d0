//! Error types for configuration preprocessing.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::record::Define;

/// Errors that abort a preprocessing run.
#[derive(Debug, thiserror::Error)]
pub enum ToolDefError {
    /// A resolver pass made no progress while defines were still pending.
    #[error("can't resolve defines:{}", format_unresolved(.unresolved))]
    UnresolvedDefines {
        /// Every pending define with its partially substituted value.
        unresolved: Vec<Define>,
    },

    /// A property references a macro absent from the resolved table.
    #[error("unresolved define {name} in property {property}")]
    UnresolvedReference {
        /// The missing macro name.
        name: String,
        /// Full name of the property holding the reference.
        property: String,
    },

    /// Input file not found.
    #[error("input file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Invalid export layout or selection.
    #[error("configuration error: {detail}")]
    Config {
        /// Description of the problem.
        detail: String,
    },

    /// I/O error reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_unresolved(unresolved: &[Define]) -> String {
    let mut out = String::new();
    for define in unresolved {
        let _ = write!(out, "\n  unresolved define {}:\t{}", define.name, define.value);
    }
    out
}

/// Result type for preprocessing operations.
pub type Result<T> = std::result::Result<T, ToolDefError>;
