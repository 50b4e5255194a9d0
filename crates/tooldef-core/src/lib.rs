//! Preprocessing for `tools_def` style build configuration files.
//!
//! A configuration file holds `DEFINE` macros and properties keyed by
//! `TARGET_TOOLCHAIN_ARCH_COMMAND_ATTRIBUTE`. Processing runs in stages:
//!
//! - [`parse`] — scan lines into defines, properties and diagnostics
//! - [`define`] — resolve defines to a flat [`MacroTable`] by fixed-point iteration
//! - [`property`] — substitute the table into property values
//! - [`filter`] — wildcard matching, partitioning and flag grouping
//! - [`tokenize`] — split long flag values into sorted tokens
//! - [`export`] — render grouped flags to the output file

pub mod define;
pub mod error;
pub mod export;
pub mod filter;
pub mod macros;
pub mod parse;
pub mod property;
pub mod record;
pub mod tokenize;

pub use define::resolve_defines;
pub use error::{Result, ToolDefError};
pub use export::{write_flags, ExportLayout, ExportSummary};
pub use filter::{filter, group_flags, partition, FlagGroup};
pub use macros::MacroTable;
pub use parse::{load_file, parse_str, Diagnostic, ParsedFile};
pub use property::resolve_properties;
pub use record::{Define, MatchPolicy, Property, PropertyKey, WILDCARD};
pub use tokenize::tokenize_flags;

/// Resolved output of one configuration file.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub macros: MacroTable,
    pub properties: Vec<Property>,
}

/// Resolve the defines of `parsed`, then its property values.
pub fn resolve(parsed: &ParsedFile) -> Result<Resolution> {
    let macros = resolve_defines(&parsed.defines)?;
    let properties = resolve_properties(&parsed.properties, &macros)?;
    Ok(Resolution { macros, properties })
}
