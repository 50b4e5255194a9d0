//! Property and define records, and the wildcard key matching model.
//!
//! A property key has five `_`-separated components:
//! `TARGET_TOOLCHAIN_ARCH_COMMAND_ATTRIBUTE`. Any component may be the
//! wildcard `*`. The same type doubles as a match template, where an empty
//! component behaves like `*`.

use std::fmt;

/// The wildcard key component.
pub const WILDCARD: &str = "*";

/// Number of `_`-separated components in a property key.
pub const KEY_COMPONENTS: usize = 5;

/// Which key components take part in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Target, toolchain, architecture and command. Used for display filtering.
    IgnoringAttribute,
    /// All five components. Used for flag-group filtering.
    IncludingAttribute,
}

/// The five-part key of a property, also used as a match template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub target: String,
    pub toolchain: String,
    pub arch: String,
    pub command: String,
    pub attribute: String,
}

impl PropertyKey {
    /// Build a key from its five components.
    pub fn new(
        target: impl Into<String>,
        toolchain: impl Into<String>,
        arch: impl Into<String>,
        command: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            toolchain: toolchain.into(),
            arch: arch.into(),
            command: command.into(),
            attribute: attribute.into(),
        }
    }

    /// The all-wildcard template. Every key matches it.
    pub fn any() -> Self {
        Self::new(WILDCARD, WILDCARD, WILDCARD, WILDCARD, WILDCARD)
    }

    /// Split `key` on `_` into exactly five components.
    ///
    /// Returns `None` when the component count is anything else.
    pub fn parse(key: &str) -> Option<Self> {
        let parts: Vec<&str> = key.split('_').collect();
        match parts.as_slice() {
            [target, toolchain, arch, command, attribute] => {
                Some(Self::new(*target, *toolchain, *arch, *command, *attribute))
            }
            _ => None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Canonical `TARGET_TOOLCHAIN_ARCH_COMMAND_ATTRIBUTE` form.
    pub fn full_name(&self) -> String {
        [
            self.target.as_str(),
            self.toolchain.as_str(),
            self.arch.as_str(),
            self.command.as_str(),
            self.attribute.as_str(),
        ]
        .join("_")
    }

    /// True when target, toolchain, architecture and command are all `*`.
    pub fn is_star(&self) -> bool {
        self.target == WILDCARD
            && self.toolchain == WILDCARD
            && self.arch == WILDCARD
            && self.command == WILDCARD
    }

    /// Match against `template` using the selected policy.
    pub fn matches(&self, template: &PropertyKey, policy: MatchPolicy) -> bool {
        match policy {
            MatchPolicy::IgnoringAttribute => self.matches_ignoring_attribute(template),
            MatchPolicy::IncludingAttribute => self.matches_including_attribute(template),
        }
    }

    /// Four-component match: target, toolchain, architecture, command.
    pub fn matches_ignoring_attribute(&self, template: &PropertyKey) -> bool {
        component_matches(&self.target, &template.target)
            && component_matches(&self.toolchain, &template.toolchain)
            && component_matches(&self.arch, &template.arch)
            && component_matches(&self.command, &template.command)
    }

    /// Five-component match including the attribute.
    pub fn matches_including_attribute(&self, template: &PropertyKey) -> bool {
        self.matches_ignoring_attribute(template)
            && component_matches(&self.attribute, &template.attribute)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.target, self.toolchain, self.arch, self.command, self.attribute
        )
    }
}

fn component_matches(own: &str, wanted: &str) -> bool {
    wanted.is_empty() || wanted == WILDCARD || own == WILDCARD || own == wanted
}

/// A keyed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: String,
}

impl Property {
    pub fn new(key: PropertyKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Build a property from a raw `_`-separated key.
    ///
    /// Returns `None` when the key does not have exactly five components.
    pub fn from_raw(key: &str, value: &str) -> Option<Self> {
        PropertyKey::parse(key).map(|key| Self::new(key, value))
    }

    pub fn full_name(&self) -> String {
        self.key.full_name()
    }

    pub fn is_star(&self) -> bool {
        self.key.is_star()
    }

    pub fn matches(&self, template: &PropertyKey, policy: MatchPolicy) -> bool {
        self.key.matches(template, policy)
    }
}

/// A `DEFINE name = value` macro declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: String,
}

impl Define {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
