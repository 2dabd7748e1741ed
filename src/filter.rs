use crate::error::{Error, Result};
use regex::Regex;

/// Drops titles matching any of a set of regex patterns
#[derive(Debug, Default)]
pub struct TitleFilter {
    exclude_regexes: Vec<Regex>,
}

impl TitleFilter {
    /// Compiles the exclusion patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::Config(format!("bad exclude pattern `{pattern}`: {e}")))?;
            exclude_regexes.push(regex);
        }

        Ok(Self { exclude_regexes })
    }

    /// Whether a normalized title should be kept
    pub fn should_keep(&self, title: &str) -> bool {
        for regex in &self.exclude_regexes {
            if regex.is_match(title) {
                ::log::debug!("Title filter rejected: {}", title);
                return false;
            }
        }
        true
    }
}
