//! `tooldef --list` — print resolved properties matching the selection.

use tooldef_core::{filter, MatchPolicy, Property, PropertyKey};

/// Print every property matching `selection` on target, toolchain,
/// architecture and command. Returns the number printed.
pub fn run(properties: &[Property], selection: &PropertyKey, include_catch_all: bool) -> usize {
    let matches = filter(
        properties,
        selection,
        MatchPolicy::IgnoringAttribute,
        include_catch_all,
    );
    if matches.is_empty() {
        println!("No matches for {selection}");
        return 0;
    }
    for property in &matches {
        println!("{} = {}", property.full_name(), property.value);
    }
    matches.len()
}
