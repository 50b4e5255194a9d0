//! Rendering grouped flags to the flat output file.
//!
//! Each emitted group is introduced by a `# ARCH COMMAND` comment and ends
//! with a blank line. A property renders as `FULL_NAME = value`; in pretty
//! mode a long value renders as `FULL_NAME =` followed by one indented token
//! per line.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, ToolDefError};
use crate::filter::{group_flags, FlagGroup};
use crate::record::{Property, PropertyKey, WILDCARD};
use crate::tokenize::{tokenize_flags, DEFAULT_PRETTY_THRESHOLD};

const INDENT: &str = "    ";

/// Architectures enumerated when exporting, in output order.
pub const DEFAULT_ARCHITECTURES: &[&str] =
    &["IA32", "X64", "EBC", "ARM", "AARCH64", "RISCV64", "LOONGARCH64"];

/// Named commands enumerated for each architecture, in output order.
pub const DEFAULT_COMMANDS: &[&str] = &[
    "PP", "CC", "DLINK", "DLINK2", "SLINK", "ASM", "NASM", "ASLPP", "ASLCC", "ASLDLINK", "VFRPP",
    "APP", "ASL", "OBJCOPY", "RC",
];

/// How exported groups are enumerated and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    /// Architecture enumeration order.
    pub architectures: Vec<String>,
    /// Named commands; the `*` bucket is appended by [`Self::command_buckets`].
    pub commands: Vec<String>,
    /// Attribute every exported property must carry.
    pub attribute: String,
    /// Output base name when no toolchain is selected.
    pub fallback_name: String,
    /// Split long values into one token per line.
    pub pretty: bool,
    /// Values longer than this are split in pretty mode.
    pub pretty_threshold: usize,
    /// Emit `*_*_*_*_…` catch-all records.
    pub include_catch_all: bool,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            architectures: DEFAULT_ARCHITECTURES.iter().map(|s| s.to_string()).collect(),
            commands: DEFAULT_COMMANDS.iter().map(|s| s.to_string()).collect(),
            attribute: "FLAGS".to_string(),
            fallback_name: "tools".to_string(),
            pretty: true,
            pretty_threshold: DEFAULT_PRETTY_THRESHOLD,
            include_catch_all: false,
        }
    }
}

impl ExportLayout {
    /// Named commands followed by the trailing `*` bucket.
    pub fn command_buckets(&self) -> Vec<String> {
        let mut buckets: Vec<String> = self
            .commands
            .iter()
            .filter(|c| c.as_str() != WILDCARD)
            .cloned()
            .collect();
        buckets.push(WILDCARD.to_string());
        buckets
    }

    /// `<Toolchain>_flags.txt`, or the fallback base name for a wildcard toolchain.
    pub fn file_name(&self, selection: &PropertyKey) -> String {
        let base = if selection.toolchain.is_empty() || selection.toolchain == WILDCARD {
            self.fallback_name.as_str()
        } else {
            selection.toolchain.as_str()
        };
        format!("{base}_flags.txt")
    }

    /// Reject layouts that can never produce a usable flag file.
    pub fn validate(&self) -> Result<()> {
        let detail = if self.architectures.is_empty() {
            "architectures must not be empty"
        } else if self.attribute.is_empty() {
            "attribute must not be empty"
        } else if self.fallback_name.is_empty() {
            "fallback name must not be empty"
        } else {
            return Ok(());
        };
        Err(ToolDefError::Config {
            detail: detail.to_string(),
        })
    }
}

/// Rendered output ready to be written.
#[derive(Debug, Clone)]
pub(crate) struct Rendered {
    pub(crate) text: String,
    pub(crate) groups: usize,
    pub(crate) entries: usize,
}

/// Outcome of [`write_flags`].
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub groups: usize,
    pub entries: usize,
}

/// Render one property line (or block, for long pretty values).
pub(crate) fn render_property(property: &Property, layout: &ExportLayout) -> String {
    let name = property.full_name();
    if layout.pretty && property.value.len() > layout.pretty_threshold {
        let mut out = format!("{name} =\n");
        for token in tokenize_flags(&property.value) {
            let _ = writeln!(out, "{INDENT}{token}");
        }
        out
    } else {
        format!("{name} = {}\n", property.value)
    }
}

/// Render groups in order.
pub(crate) fn render_groups(groups: &[FlagGroup], layout: &ExportLayout) -> Rendered {
    let mut text = String::new();
    let mut entries = 0;
    for group in groups {
        let _ = writeln!(text, "# {} {}", group.arch, group.command);
        for property in &group.properties {
            text.push_str(&render_property(property, layout));
            entries += 1;
        }
        text.push('\n');
    }
    Rendered {
        text,
        groups: groups.len(),
        entries,
    }
}

/// Group resolved properties and render them.
pub(crate) fn render_flags(
    properties: &[Property],
    selection: &PropertyKey,
    layout: &ExportLayout,
) -> Rendered {
    render_groups(&group_flags(properties, selection, layout), layout)
}

/// Render resolved properties and write them to `dir/<file_name>`.
///
/// Nothing is created unless the layout is valid and rendering succeeds.
pub fn write_flags(
    dir: &Path,
    properties: &[Property],
    selection: &PropertyKey,
    layout: &ExportLayout,
) -> Result<ExportSummary> {
    layout.validate()?;
    let rendered = render_flags(properties, selection, layout);
    let path = dir.join(layout.file_name(selection));
    std::fs::write(&path, &rendered.text)?;
    info!(
        path = %path.display(),
        groups = rendered.groups,
        entries = rendered.entries,
        "wrote flag file"
    );
    Ok(ExportSummary {
        path,
        groups: rendered.groups,
        entries: rendered.entries,
    })
}
