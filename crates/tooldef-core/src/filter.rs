//! Template filtering, partitioning, and per-architecture flag grouping.

use tracing::trace;

use crate::export::ExportLayout;
use crate::record::{MatchPolicy, Property, PropertyKey, WILDCARD};

/// Properties whose key matches `template`, in input order.
///
/// Catch-all records (`*_*_*_*_…`) match every template; they are dropped
/// unless `include_catch_all` is set.
pub fn filter<'a>(
    properties: &'a [Property],
    template: &PropertyKey,
    policy: MatchPolicy,
    include_catch_all: bool,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|p| include_catch_all || !p.is_star())
        .filter(|p| p.matches(template, policy))
        .collect()
}

/// Split `properties` into `(matches, non_matches)` in one traversal.
///
/// Both halves keep input order and together hold exactly the input.
pub fn partition(
    properties: Vec<Property>,
    template: &PropertyKey,
    policy: MatchPolicy,
) -> (Vec<Property>, Vec<Property>) {
    properties
        .into_iter()
        .partition(|p| p.matches(template, policy))
}

/// One emitted (architecture, command) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagGroup {
    pub arch: String,
    pub command: String,
    pub properties: Vec<Property>,
}

/// Carve `properties` into per-architecture, per-command flag groups.
///
/// The pool is first narrowed to `selection` (all five components). Each
/// architecture then takes its matches out of the pool, and each command in
/// turn takes its matches out of the architecture's slice, so a property
/// lands in at most one group. The command list always ends with the `*`
/// bucket. Empty groups are omitted.
pub fn group_flags(
    properties: &[Property],
    selection: &PropertyKey,
    layout: &ExportLayout,
) -> Vec<FlagGroup> {
    let candidates: Vec<Property> = properties
        .iter()
        .filter(|p| layout.include_catch_all || !p.is_star())
        .cloned()
        .collect();
    let (mut pool, _) = partition(candidates, selection, MatchPolicy::IncludingAttribute);

    let attribute = if is_wildcard(&selection.attribute) {
        layout.attribute.clone()
    } else {
        selection.attribute.clone()
    };
    let base = PropertyKey::new(
        selection.target.clone(),
        selection.toolchain.clone(),
        WILDCARD,
        WILDCARD,
        attribute,
    );

    let mut groups = Vec::new();
    for arch in enumerate_axis(&selection.arch, &layout.architectures) {
        let arch_template = base.clone().with_arch(arch.clone());
        let (mut arch_pool, rest) = partition(pool, &arch_template, MatchPolicy::IncludingAttribute);
        pool = rest;

        for command in enumerate_axis(&selection.command, &layout.command_buckets()) {
            let template = arch_template.clone().with_command(command.clone());
            let (matched, rest) = partition(arch_pool, &template, MatchPolicy::IncludingAttribute);
            arch_pool = rest;
            trace!(%arch, %command, matched = matched.len(), "flag group");
            if !matched.is_empty() {
                groups.push(FlagGroup {
                    arch: arch.clone(),
                    command,
                    properties: matched,
                });
            }
        }
    }
    groups
}

fn is_wildcard(component: &str) -> bool {
    component.is_empty() || component == WILDCARD
}

/// A concrete selector restricts the enumeration to itself.
fn enumerate_axis(selected: &str, values: &[String]) -> Vec<String> {
    if is_wildcard(selected) {
        values.to_vec()
    } else {
        vec![selected.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(raw: &[(&str, &str)]) -> Vec<Property> {
        raw.iter()
            .map(|(k, v)| Property::from_raw(k, v).unwrap())
            .collect()
    }

    fn layout(arches: &[&str], commands: &[&str]) -> ExportLayout {
        ExportLayout {
            architectures: arches.iter().map(|s| s.to_string()).collect(),
            commands: commands.iter().map(|s| s.to_string()).collect(),
            ..ExportLayout::default()
        }
    }

    fn names(group: &FlagGroup) -> Vec<String> {
        group.properties.iter().map(Property::full_name).collect()
    }

    #[test]
    fn filter_catch_all_toggle() {
        let set = props(&[
            ("*_*_*_*_FLAGS", "v1"),
            ("GCC5_GCC5_AARCH64_DLINK_FLAGS", "v2"),
        ]);
        let template = PropertyKey::new("", "GCC5", "AARCH64", "DLINK", "");

        let all = filter(&set, &template, MatchPolicy::IgnoringAttribute, true);
        assert_eq!(all.len(), 2);

        let specific = filter(&set, &template, MatchPolicy::IgnoringAttribute, false);
        assert_eq!(specific.len(), 1);
        assert_eq!(specific[0].value, "v2");
    }

    #[test]
    fn filter_including_attribute() {
        let set = props(&[("*_GCC5_X64_CC_FLAGS", "a"), ("*_GCC5_X64_CC_PATH", "b")]);
        let template = PropertyKey::any().with_attribute("PATH");
        let hits = filter(&set, &template, MatchPolicy::IncludingAttribute, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "b");
        assert_eq!(filter(&set, &template, MatchPolicy::IgnoringAttribute, false).len(), 2);
    }

    #[test]
    fn partition_keeps_order_and_everything() {
        let set = props(&[
            ("*_GCC5_X64_CC_FLAGS", "1"),
            ("*_CLANG_X64_CC_FLAGS", "2"),
            ("*_GCC5_IA32_CC_FLAGS", "3"),
            ("*_CLANG_IA32_CC_FLAGS", "4"),
        ]);
        let template = PropertyKey::any().with_toolchain("GCC5");
        let (hit, miss) = partition(set, &template, MatchPolicy::IncludingAttribute);
        let hit: Vec<_> = hit.iter().map(|p| p.value.as_str()).collect();
        let miss: Vec<_> = miss.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(hit, vec!["1", "3"]);
        assert_eq!(miss, vec!["2", "4"]);
    }

    #[test]
    fn group_by_arch_then_command() {
        let set = props(&[
            ("*_GCC5_X64_DLINK_FLAGS", "xd"),
            ("*_GCC5_X64_CC_FLAGS", "xc"),
            ("*_GCC5_AARCH64_CC_FLAGS", "ac"),
            ("*_GCC5_X64_OBJCOPY_FLAGS", "xo"),
            ("*_GCC5_X64_CC_PATH", "path"),
        ]);
        let selection = PropertyKey::any().with_toolchain("GCC5");
        let groups = group_flags(&set, &selection, &layout(&["X64", "AARCH64"], &["CC", "DLINK"]));

        let keys: Vec<_> = groups
            .iter()
            .map(|g| (g.arch.as_str(), g.command.as_str()))
            .collect();
        assert_eq!(keys, vec![("X64", "CC"), ("X64", "DLINK"), ("X64", "*"), ("AARCH64", "CC")]);
        assert_eq!(names(&groups[2]), vec!["*_GCC5_X64_OBJCOPY_FLAGS"]);
    }

    #[test]
    fn wildcard_component_emitted_once() {
        let set = props(&[("*_GCC5_*_CC_FLAGS", "all arches"), ("*_GCC5_AARCH64_CC_FLAGS", "a")]);
        let selection = PropertyKey::any().with_toolchain("GCC5");
        let groups = group_flags(&set, &selection, &layout(&["X64", "AARCH64"], &["CC"]));

        let total: usize = groups.iter().map(|g| g.properties.len()).sum();
        assert_eq!(total, 2);
        assert_eq!(groups[0].arch, "X64");
        assert_eq!(names(&groups[0]), vec!["*_GCC5_*_CC_FLAGS"]);
        assert_eq!(groups[1].arch, "AARCH64");
    }

    #[test]
    fn selection_narrows_pool_and_axes() {
        let set = props(&[
            ("*_GCC5_X64_CC_FLAGS", "gcc"),
            ("*_CLANG_X64_CC_FLAGS", "clang"),
            ("*_GCC5_*_DLINK_FLAGS", "any arch"),
        ]);
        let selection = PropertyKey::any().with_toolchain("GCC5").with_arch("AARCH64");
        let groups = group_flags(&set, &selection, &layout(&["X64", "AARCH64"], &["CC", "DLINK"]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].arch, "AARCH64");
        assert_eq!(groups[0].command, "DLINK");
    }

    #[test]
    fn catch_all_excluded_unless_requested() {
        let set = props(&[("*_*_*_*_FLAGS", "generic"), ("*_GCC5_X64_CC_FLAGS", "x")]);
        let selection = PropertyKey::any();
        let mut layout = layout(&["X64"], &["CC"]);

        let groups = group_flags(&set, &selection, &layout);
        assert_eq!(names(&groups[0]), vec!["*_GCC5_X64_CC_FLAGS"]);

        layout.include_catch_all = true;
        let groups = group_flags(&set, &selection, &layout);
        assert_eq!(names(&groups[0]), vec!["*_*_*_*_FLAGS", "*_GCC5_X64_CC_FLAGS"]);
    }

    #[test]
    fn selected_attribute_replaces_flag_attribute() {
        let set = props(&[("*_GCC5_X64_CC_FLAGS", "flags"), ("*_GCC5_X64_CC_PATH", "gcc")]);
        let selection = PropertyKey::any().with_attribute("PATH");
        let groups = group_flags(&set, &selection, &layout(&["X64"], &["CC"]));
        assert_eq!(names(&groups[0]), vec!["*_GCC5_X64_CC_PATH"]);
    }

    #[test]
    fn unknown_arch_never_emitted() {
        let set = props(&[("*_GCC5_MIPS_CC_FLAGS", "m")]);
        let groups = group_flags(&set, &PropertyKey::any(), &layout(&["X64"], &["CC"]));
        assert!(groups.is_empty());
    }
}
