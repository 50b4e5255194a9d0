//! Fixed-point resolution of `DEFINE` macros.
//!
//! Defines may reference each other in any order. Each pass walks the pending
//! list and resolves every entry whose references are all known at that point
//! of the pass, so an entry can use a define resolved earlier in the same
//! pass. A pass that resolves nothing is final.

use tracing::debug;

use crate::error::{Result, ToolDefError};
use crate::macros::{expand, has_references, MacroTable};
use crate::record::Define;

/// Resolve `defines` into a flat table with no remaining references.
///
/// On failure the error carries every still-pending define with its
/// partially substituted value, in pending-list order.
pub fn resolve_defines(defines: &[Define]) -> Result<MacroTable> {
    let mut table = MacroTable::new();
    let mut pending: Vec<Define> = defines.to_vec();
    let mut pass = 0usize;

    while !pending.is_empty() {
        pass += 1;
        let mut deferred = Vec::new();
        let mut progressed = false;

        for mut define in pending {
            if !has_references(&define.value) {
                table.insert(define.name, define.value);
                progressed = true;
                continue;
            }

            let expansion = expand(&define.value, &table);
            let complete = expansion.is_complete();
            define.value = expansion.value;
            if complete {
                table.insert(define.name, define.value);
                progressed = true;
            } else {
                deferred.push(define);
            }
        }

        debug!(
            pass,
            resolved = table.len(),
            deferred = deferred.len(),
            "define resolution pass"
        );

        if !progressed {
            return Err(ToolDefError::UnresolvedDefines {
                unresolved: deferred,
            });
        }
        pending = deferred;
    }

    Ok(table)
}
