//! `DEF(name)` macro references and the resolved macro table.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A macro reference: the name is everything between `DEF(` and the first `)`.
static MACRO_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DEF\((.*?)\)").expect("static regex must compile"));

/// Fully resolved macro values, keyed by define name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    values: HashMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a resolved value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MacroTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// Result of expanding the references in one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The value with every known reference substituted.
    pub value: String,
    /// Names that were not in the table, in order of appearance.
    pub missing: Vec<String>,
}

impl Expansion {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Whether `value` contains at least one macro reference.
pub fn has_references(value: &str) -> bool {
    MACRO_REF.is_match(value)
}

/// Replace every non-overlapping reference in `value` that `table` knows.
///
/// Unknown references stay in place verbatim and are reported in
/// [`Expansion::missing`]. Substituted text is not rescanned.
pub fn expand(value: &str, table: &MacroTable) -> Expansion {
    let mut missing = Vec::new();
    let expanded = MACRO_REF.replace_all(value, |caps: &Captures<'_>| {
        let name = &caps[1];
        match table.get(name) {
            Some(resolved) => resolved.to_string(),
            None => {
                missing.push(name.to_string());
                caps[0].to_string()
            }
        }
    });
    Expansion {
        value: expanded.into_owned(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(value: &str) -> Vec<&str> {
        MACRO_REF
            .captures_iter(value)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    #[test]
    fn references_in_order() {
        assert_eq!(references("DEF(A) -x DEF(B)DEF(A)"), vec!["A", "B", "A"]);
        assert!(references("plain -flags").is_empty());
    }

    #[test]
    fn reference_stops_at_first_paren() {
        assert_eq!(references("DEF(A)) DEF(x(y))"), vec!["A", "x(y"]);
    }

    #[test]
    fn incomplete_reference_is_literal() {
        assert!(!has_references("DEF(A"));
        assert!(has_references("DEF()"));
        assert_eq!(references("DEF()"), vec![""]);
    }

    #[test]
    fn expand_substitutes_every_occurrence() {
        let table: MacroTable = [("A", "1")].into_iter().collect();
        let expansion = expand("DEF(A)-DEF(A)", &table);
        assert_eq!(expansion.value, "1-1");
        assert!(expansion.is_complete());
    }

    #[test]
    fn expand_keeps_missing_references() {
        let table: MacroTable = [("A", "1")].into_iter().collect();
        let expansion = expand("DEF(A) DEF(B) DEF(C)", &table);
        assert_eq!(expansion.value, "1 DEF(B) DEF(C)");
        assert_eq!(expansion.missing, vec!["B", "C"]);
    }

    #[test]
    fn expand_does_not_rescan_substituted_text() {
        let table: MacroTable = [("A", "DEF(")].into_iter().collect();
        let expansion = expand("DEF(A)B)", &table);
        assert_eq!(expansion.value, "DEF(B)");
        assert!(expansion.is_complete());
    }

    #[test]
    fn table_overwrite_and_sorted() {
        let mut table = MacroTable::new();
        table.insert("B", "2");
        table.insert("A", "1");
        table.insert("B", "3");
        assert_eq!(table.len(), 2);
        assert_eq!(table.sorted(), vec![("A", "1"), ("B", "3")]);
    }
}
