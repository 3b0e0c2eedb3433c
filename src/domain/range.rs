//! Version ranges in the npm style used by trace-log tooling
//!
//! Accepts comparator sets such as `">=7.0.0 <9.0.0"`, comma-separated sets,
//! `||` alternatives, hyphen ranges (`"1.2.3 - 2.0.0"`), caret/tilde ranges
//! and wildcards. Each alternative is lowered onto a `semver::VersionReq`.

use crate::domain::version::VersionTag;
use crate::error::{Result, TraceModelError};
use semver::VersionReq;
use std::fmt;
use std::str::FromStr;

/// A parsed version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    source: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse a range string
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let mut alternatives = Vec::new();

        for alternative in trimmed.split("||") {
            let req_text = lower_alternative(alternative.trim())?;
            let req = VersionReq::parse(&req_text).map_err(|e| {
                TraceModelError::invalid_argument(format!(
                    "Invalid version range '{}': {}",
                    text, e
                ))
            })?;
            alternatives.push(req);
        }

        Ok(VersionRange {
            source: trimmed.to_string(),
            alternatives,
        })
    }

    /// Range matching every version
    pub fn any() -> Self {
        VersionRange {
            source: "*".to_string(),
            alternatives: vec![VersionReq::STAR],
        }
    }

    /// Containment test on the numeric triple.
    ///
    /// Extra components never exclude a version. The sentinels carry
    /// `0.0.0` and `MAX.MAX.MAX`, so they land below and above every bound.
    pub fn contains(&self, version: &VersionTag) -> bool {
        let release = version.to_semver();
        self.alternatives.iter().any(|req| req.matches(&release))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Rewrite one npm-style alternative into the comma-separated syntax of
/// `semver::VersionReq`.
fn lower_alternative(alternative: &str) -> Result<String> {
    if alternative.is_empty() || matches!(alternative, "*" | "x" | "X") {
        return Ok("*".to_string());
    }

    let tokens: Vec<&str> = alternative
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();

    // "A - B" is inclusive on both ends
    if tokens.len() == 3 && tokens[1] == "-" {
        return Ok(format!(">={}, <={}", tokens[0], tokens[2]));
    }

    let mut comparators = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in tokens {
        if token.chars().all(|c| "<>=~^".contains(c)) {
            if pending_op.is_some() {
                return Err(TraceModelError::invalid_argument(format!(
                    "Invalid version range '{}': dangling operator",
                    alternative
                )));
            }
            pending_op = Some(token);
            continue;
        }

        let comparator = match pending_op.take() {
            Some(op) => format!("{}{}", op, token),
            None => exact_if_bare(token),
        };
        comparators.push(comparator);
    }

    if pending_op.is_some() {
        return Err(TraceModelError::invalid_argument(format!(
            "Invalid version range '{}': dangling operator",
            alternative
        )));
    }

    Ok(comparators.join(", "))
}

/// A bare version means an exact match in npm ranges, but a caret match in
/// `semver::VersionReq`. Wildcard forms keep their meaning unchanged.
fn exact_if_bare(token: &str) -> String {
    let starts_with_op = token.starts_with(|c: char| "<>=~^".contains(c));
    let has_wildcard = token
        .split('.')
        .any(|part| matches!(part, "*" | "x" | "X"));

    if starts_with_op || has_wildcard {
        token.to_string()
    } else {
        format!("={}", token)
    }
}

impl FromStr for VersionRange {
    type Err = TraceModelError;

    fn from_str(s: &str) -> Result<Self> {
        VersionRange::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
