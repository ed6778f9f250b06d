use regex::Regex;

use crate::config::SamplesConfig;
use crate::error::{LogweaveError, Result};

/// Applies the configured sample-name cleaning rules.
///
/// Suffixes are stripped repeatedly, longest first, so `tumor.sorted.log`
/// with suffixes `[".log", ".sorted"]` cleans to `tumor`. Regex replacements
/// run after stripping. A name that cleans to nothing falls back to the raw
/// name: identity must survive cleaning.
pub struct SampleNameCleaner {
    suffixes: Vec<String>,
    replacements: Vec<(Regex, String)>,
}

impl SampleNameCleaner {
    /// Compile the cleaner from config rules.
    ///
    /// # Errors
    /// Returns a configuration error for an invalid replacement regex.
    pub fn from_rules(rules: &SamplesConfig) -> Result<Self> {
        let mut suffixes = rules.strip_suffixes.clone();
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut replacements = Vec::with_capacity(rules.replace.len());
        for rule in &rules.replace {
            let regex = Regex::new(&rule.pattern).map_err(|e| {
                LogweaveError::Config(format!(
                    "Invalid sample replacement pattern '{}': {e}",
                    rule.pattern
                ))
            })?;
            replacements.push((regex, rule.with.clone()));
        }

        Ok(Self {
            suffixes,
            replacements,
        })
    }

    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        let mut name = raw.trim().to_string();

        loop {
            let before = name.len();
            for suffix in &self.suffixes {
                if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
                    name = stripped.to_string();
                }
            }
            if name.len() == before {
                break;
            }
        }

        for (regex, with) in &self.replacements {
            name = regex.replace_all(&name, with.as_str()).into_owned();
        }

        let name = name.trim();
        if name.is_empty() {
            raw.trim().to_string()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
#[path = "samples_tests.rs"]
mod tests;
