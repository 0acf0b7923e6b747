//! Absolute-date pattern library for the compliance guard

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex matched against whole string values
    pub pattern: String,
    /// Human-readable shape, e.g. "MM/DD/YYYY"
    #[serde(default)]
    pub description: Option<String>,
    /// Disabled patterns are parsed but never applied
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Library key, e.g. `iso_date`
    pub name: String,
    /// Human-readable shape
    pub description: Option<String>,
    /// Compiled regex
    pub regex: Regex,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Deny set of absolute-date shapes plus an allow set of exempt values
#[derive(Debug, Clone)]
pub struct DatePatternSet {
    deny: Vec<CompiledPattern>,
    allow: Vec<Regex>,
}

impl DatePatternSet {
    /// Loads a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read date pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Builds a pattern set from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse date pattern library TOML")?;

        let mut deny = Vec::new();
        for (name, def) in library.patterns {
            if !def.enabled {
                tracing::debug!(pattern = %name, "Skipping disabled date pattern");
                continue;
            }

            let regex = Regex::new(&def.pattern)
                .with_context(|| format!("Invalid regex in pattern '{name}': {}", def.pattern))?;
            deny.push(CompiledPattern {
                name,
                description: def.description,
                regex,
            });
        }

        if deny.is_empty() {
            anyhow::bail!("Date pattern library defines no enabled patterns");
        }

        Ok(Self {
            deny,
            allow: Vec::new(),
        })
    }

    /// The built-in library: ISO date, ISO datetime, MM/DD/YYYY, and DD-MM-YYYY/MM-DD-YYYY
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../patterns/date_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Removes the named patterns from the deny set.
    ///
    /// Unknown names are an error so that a typo cannot silently leave a
    /// pattern active.
    pub fn without(mut self, names: &[String]) -> Result<Self> {
        for name in names {
            let before = self.deny.len();
            self.deny.retain(|pattern| &pattern.name != name);
            if self.deny.len() == before {
                anyhow::bail!("Cannot disable unknown date pattern '{name}'");
            }
        }

        if self.deny.is_empty() {
            anyhow::bail!("All date patterns are disabled; the compliance guard would accept anything");
        }

        Ok(self)
    }

    /// Adds regexes for values that must never be flagged (e.g. coded IDs shaped like dates)
    pub fn with_allow_patterns(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            let regex = Regex::new(pattern)
                .with_context(|| format!("Invalid allow pattern: {pattern}"))?;
            self.allow.push(regex);
        }
        Ok(self)
    }

    /// The deny pattern a value matches, if any and if it is not allow-listed
    pub fn find_match(&self, value: &str) -> Option<&CompiledPattern> {
        if self.allow.iter().any(|regex| regex.is_match(value)) {
            return None;
        }
        self.deny.iter().find(|pattern| pattern.regex.is_match(value))
    }

    /// All active deny patterns
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.deny
    }
}
