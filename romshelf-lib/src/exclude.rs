//! Exclusion rules: which file names a scan skips.
//!
//! Rules come in three shapes (exact name, glob, prefix regex) and are
//! grouped per [`FileClass`]. Single ROM files additionally support an
//! extension list. A name is excluded if any rule of its class matches.

use globset::{Glob, GlobMatcher};
use regex::Regex;
use romshelf_core::util::file_extension;
use romshelf_core::{Result, ShelfError};

use crate::config::{ExclusionConfig, NameRules};

/// What kind of filesystem entry a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// Platform directories under the library root.
    Platform,
    /// Single ROM files, and the parts inside a ROM directory.
    Single,
    /// ROM directories (multi-file titles).
    Multi,
    /// Entries in the resource cache.
    Resource,
}

/// One compiled exclusion rule.
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// The name equals this string.
    Exact(String),
    /// Shell-style glob, case-sensitive, matched against the whole name.
    Glob(GlobMatcher),
    /// Regular expression anchored at the start of the name.
    PrefixRegex(Regex),
}

impl ExclusionRule {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn glob(pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern).map_err(|e| ShelfError::invalid_pattern(pattern, e))?;
        Ok(Self::Glob(glob.compile_matcher()))
    }

    pub fn prefix_regex(pattern: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{pattern})"))
            .map(Self::PrefixRegex)
            .map_err(|e| ShelfError::invalid_pattern(pattern, e))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Glob(matcher) => matcher.is_match(name),
            Self::PrefixRegex(regex) => regex.is_match(name),
        }
    }
}

/// All rules that apply to one file class.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ExclusionRule>,
    /// Lowercase, without leading dot.
    extensions: Vec<String>,
}

impl RuleSet {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self {
            rules,
            extensions: Vec::new(),
        }
    }

    /// Compile the name rules of a config section.
    pub fn from_names(config: &NameRules) -> Result<Self> {
        let mut rules = Vec::with_capacity(
            config.names.len() + config.patterns.len() + config.regex.len(),
        );
        rules.extend(config.names.iter().map(ExclusionRule::exact));
        for pattern in &config.patterns {
            rules.push(ExclusionRule::glob(pattern)?);
        }
        for pattern in &config.regex {
            rules.push(ExclusionRule::prefix_regex(pattern)?);
        }
        Ok(Self::new(rules))
    }

    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.extensions.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(name)) || self.matches_extension(name)
    }

    fn matches_extension(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return false;
        }
        file_extension(name).is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(ext))
        })
    }
}

/// Compiled exclusion rules for every file class.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    platform: RuleSet,
    single: RuleSet,
    multi: RuleSet,
    resource: RuleSet,
}

impl ExclusionFilter {
    /// Compile the `[exclude]` section. Invalid globs or regexes are reported
    /// here, never at match time.
    pub fn new(config: &ExclusionConfig) -> Result<Self> {
        Ok(Self {
            platform: RuleSet::new(
                config.platforms.iter().map(ExclusionRule::exact).collect(),
            ),
            single: RuleSet::from_names(&config.single.rules)?
                .with_extensions(&config.single.extensions),
            multi: RuleSet::from_names(&config.multi)?,
            resource: RuleSet::from_names(&config.resource)?,
        })
    }

    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace the rules of one class.
    pub fn with_rules(mut self, class: FileClass, rules: RuleSet) -> Self {
        match class {
            FileClass::Platform => self.platform = rules,
            FileClass::Single => self.single = rules,
            FileClass::Multi => self.multi = rules,
            FileClass::Resource => self.resource = rules,
        }
        self
    }

    pub fn rules(&self, class: FileClass) -> &RuleSet {
        match class {
            FileClass::Platform => &self.platform,
            FileClass::Single => &self.single,
            FileClass::Multi => &self.multi,
            FileClass::Resource => &self.resource,
        }
    }

    pub fn is_excluded(&self, name: &str, class: FileClass) -> bool {
        self.rules(class).matches(name)
    }

    /// Keep the names that are not excluded, in their original order.
    pub fn filter<S: AsRef<str>>(&self, names: Vec<S>, class: FileClass) -> Vec<S> {
        names
            .into_iter()
            .filter(|name| !self.is_excluded(name.as_ref(), class))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/exclude_tests.rs"]
mod tests;
