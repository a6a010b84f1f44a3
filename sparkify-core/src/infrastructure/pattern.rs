// sparkify-core/src/infrastructure/pattern.rs

use regex::Regex;
use std::path::PathBuf;

use crate::infrastructure::error::InfrastructureError;

/// A compiled glob over `/`-separated relative paths.
///
/// * `*` matches any run of characters inside one segment
/// * `?` matches one character inside one segment
/// * `**` as a whole segment matches zero or more directories
#[derive(Debug, Clone)]
pub struct GlobPattern {
    regex: Regex,
    base: PathBuf,
}

impl GlobPattern {
    pub fn compile(pattern: &str) -> Result<Self, InfrastructureError> {
        let segments: Vec<&str> = pattern
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        let mut expr = String::from("^");
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            if *segment == "**" {
                expr.push_str(if last { ".*" } else { "(?:[^/]+/)*" });
                continue;
            }
            for ch in segment.chars() {
                match ch {
                    '*' => expr.push_str("[^/]*"),
                    '?' => expr.push_str("[^/]"),
                    c => expr.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
                }
            }
            if !last {
                expr.push('/');
            }
        }
        expr.push('$');

        // Walking starts at the deepest directory without wildcards.
        let base: PathBuf = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .take_while(|s| !has_wildcard(s))
            .collect();

        Ok(Self {
            regex: Regex::new(&expr)?,
            base,
        })
    }

    /// Literal directory prefix of the pattern (may be empty).
    pub fn base_dir(&self) -> &std::path::Path {
        &self.base
    }

    /// `relative` must use `/` separators.
    pub fn is_match(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
    }
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?'])
}
