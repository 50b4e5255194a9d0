//! Substitution of resolved macros into property values.

use tracing::debug;

use crate::error::{Result, ToolDefError};
use crate::macros::{expand, MacroTable};
use crate::record::Property;

/// Expand every macro reference in every property value.
///
/// A single pass against the finished table. The first reference to a name
/// missing from the table aborts the whole step; output keeps input order.
pub fn resolve_properties(properties: &[Property], table: &MacroTable) -> Result<Vec<Property>> {
    let mut resolved = Vec::with_capacity(properties.len());
    for property in properties {
        let expansion = expand(&property.value, table);
        if let Some(name) = expansion.missing.into_iter().next() {
            return Err(ToolDefError::UnresolvedReference {
                name,
                property: property.full_name(),
            });
        }
        resolved.push(Property::new(property.key.clone(), expansion.value));
    }
    debug!(properties = resolved.len(), "resolved property values");
    Ok(resolved)
}
