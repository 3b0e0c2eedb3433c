use crate::domain::range::VersionRange;
use crate::error::{Result, TraceModelError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Secondary ordering component of a [`VersionTag`].
///
/// Variant order is significant: the derived `Ord` places `Earliest` before any
/// real build components and `Latest` after them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extra {
    Earliest,
    Components(Vec<String>),
    Latest,
}

/// Release identifier of a trace-log producer.
///
/// Ordered by `(major, minor, patch)` and then by [`Extra`]. Extra components
/// compare element-wise as strings; a strict prefix ranks lower.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTag {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub extra: Extra,
}

fn version_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^[vV]?(\d+)(?:\.(\d+))?(?:\.(\d+))?((?:\.[0-9A-Za-z]+)*)(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
            )
        })
        .as_ref()
        .map_err(|e| TraceModelError::invalid_argument(format!("Invalid version pattern: {}", e)))
}

impl VersionTag {
    /// Orders before every other version.
    pub const EARLIEST: VersionTag = VersionTag {
        major: 0,
        minor: 0,
        patch: 0,
        extra: Extra::Earliest,
    };

    /// Orders after every other version.
    pub const LATEST: VersionTag = VersionTag {
        major: u64::MAX,
        minor: u64::MAX,
        patch: u64::MAX,
        extra: Extra::Latest,
    };

    /// Create a release version with no extra components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionTag {
            major,
            minor,
            patch,
            extra: Extra::Components(Vec::new()),
        }
    }

    /// Create a release version carrying extra disambiguating components
    pub fn with_extra<I, S>(major: u64, minor: u64, patch: u64, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VersionTag {
            major,
            minor,
            patch,
            extra: Extra::Components(extra.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a version from signed components, rejecting negative values
    pub fn try_from_parts(major: i64, minor: i64, patch: i64) -> Result<Self> {
        let convert = |label: &str, value: i64| {
            u64::try_from(value).map_err(|_| {
                TraceModelError::invalid_argument(format!(
                    "{} version component must be non-negative, got {}",
                    label, value
                ))
            })
        };

        Ok(VersionTag::new(
            convert("major", major)?,
            convert("minor", minor)?,
            convert("patch", patch)?,
        ))
    }

    /// Create a version from floating-point components, as handed over by
    /// loosely typed front ends. Components must be finite non-negative integers.
    pub fn try_from_f64_parts(major: f64, minor: f64, patch: f64) -> Result<Self> {
        let convert = |label: &str, value: f64| {
            if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64
            {
                return Err(TraceModelError::invalid_argument(format!(
                    "{} version component must be a non-negative integer, got {}",
                    label, value
                )));
            }
            Ok(value as u64)
        };

        Ok(VersionTag::new(
            convert("major", major)?,
            convert("minor", minor)?,
            convert("patch", patch)?,
        ))
    }

    /// Parse a version string (e.g. "9.4.146.24-node.11" -> 9.4.146 + [24, node, 11]).
    ///
    /// Missing minor or patch components default to 0. Dot components past the
    /// third, pre-release identifiers and build metadata all become extra
    /// components, in that order.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let captures = version_pattern()?.captures(trimmed).ok_or_else(|| {
            TraceModelError::invalid_argument(format!("Invalid version format: '{}'", text))
        })?;

        let number = |index: usize, label: &str| -> Result<u64> {
            match captures.get(index) {
                Some(m) => m.as_str().parse::<u64>().map_err(|_| {
                    TraceModelError::invalid_argument(format!(
                        "Invalid {} version: {}",
                        label,
                        m.as_str()
                    ))
                }),
                None => Ok(0),
            }
        };

        let major = number(1, "major")?;
        let minor = number(2, "minor")?;
        let patch = number(3, "patch")?;

        let extra: Vec<String> = [4, 5, 6]
            .iter()
            .filter_map(|&index| captures.get(index))
            .flat_map(|m| m.as_str().split('.'))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        Ok(VersionTag::with_extra(major, minor, patch, extra))
    }

    /// Three-way comparison returning -1, 0 or 1
    pub fn compare(a: &VersionTag, b: &VersionTag) -> i32 {
        match a.cmp(b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Whether this version lies inside `range`
    pub fn satisfies(&self, range: &VersionRange) -> bool {
        range.contains(self)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.extra, Extra::Earliest | Extra::Latest)
    }

    /// Extra components, empty for sentinels
    pub fn extra_components(&self) -> &[String] {
        match &self.extra {
            Extra::Components(parts) => parts,
            Extra::Earliest | Extra::Latest => &[],
        }
    }

    /// Numeric triple as a plain semver release, used for range matching
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTag {
    type Err = TraceModelError;

    fn from_str(s: &str) -> Result<Self> {
        VersionTag::parse(s)
    }
}

impl From<&semver::Version> for VersionTag {
    fn from(version: &semver::Version) -> Self {
        let extra = version
            .pre
            .as_str()
            .split('.')
            .chain(version.build.as_str().split('.'))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        VersionTag::with_extra(version.major, version.minor, version.patch, extra)
    }
}

impl From<semver::Version> for VersionTag {
    fn from(version: semver::Version) -> Self {
        VersionTag::from(&version)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Extra::Earliest => write!(f, "<earliest>"),
            Extra::Latest => write!(f, "<latest>"),
            Extra::Components(parts) => {
                write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
                if !parts.is_empty() {
                    write!(f, "-{}", parts.join("."))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_pattern_builds() {
        let pattern = version_pattern().unwrap();
        assert!(pattern.is_match("9.4.146.24-node.11"));
        assert!(std::ptr::eq(pattern, version_pattern().unwrap()));
    }

    #[test]
    fn test_version_parse() {
        let v = VersionTag::parse("v9.1.0").unwrap();
        assert_eq!(v, VersionTag::new(9, 1, 0));
    }

    #[test]
    fn test_version_parse_uppercase_v() {
        assert_eq!(VersionTag::parse("V1.2.3").unwrap(), VersionTag::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_short_forms() {
        assert_eq!(VersionTag::parse("9").unwrap(), VersionTag::new(9, 0, 0));
        assert_eq!(VersionTag::parse("9.4").unwrap(), VersionTag::new(9, 4, 0));
    }

    #[test]
    fn test_version_parse_v8_style() {
        let v = VersionTag::parse("9.4.146.24-node.11").unwrap();
        assert_eq!(v.major, 9);
        assert_eq!(v.minor, 4);
        assert_eq!(v.patch, 146);
        assert_eq!(v.extra_components(), &["24", "node", "11"]);
    }

    #[test]
    fn test_version_parse_build_metadata() {
        let v = VersionTag::parse("1.2.3-beta.1+exp").unwrap();
        assert_eq!(v, VersionTag::with_extra(1, 2, 3, ["beta", "1", "exp"]));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(VersionTag::parse("").is_err());
        assert!(VersionTag::parse("x.y.z").is_err());
        assert!(VersionTag::parse("1..2").is_err());
        assert!(VersionTag::parse("99999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_try_from_parts_rejects_negative() {
        assert!(VersionTag::try_from_parts(1, -1, 0).is_err());
        assert_eq!(
            VersionTag::try_from_parts(1, 2, 3).unwrap(),
            VersionTag::new(1, 2, 3)
        );
    }

    #[test]
    fn test_try_from_f64_parts_rejects_non_integral() {
        assert!(VersionTag::try_from_f64_parts(1.5, 0.0, 0.0).is_err());
        assert!(VersionTag::try_from_f64_parts(-1.0, 0.0, 0.0).is_err());
        assert!(VersionTag::try_from_f64_parts(f64::NAN, 0.0, 0.0).is_err());
        assert_eq!(
            VersionTag::try_from_f64_parts(8.0, 5.0, 1.0).unwrap(),
            VersionTag::new(8, 5, 1)
        );
    }

    #[test]
    fn test_compare_numeric_first() {
        let a = VersionTag::with_extra(1, 2, 3, ["zzz"]);
        let b = VersionTag::new(1, 2, 4);
        assert_eq!(VersionTag::compare(&a, &b), -1);
        assert_eq!(VersionTag::compare(&b, &a), 1);
    }

    #[test]
    fn test_compare_extras_as_strings() {
        let a = VersionTag::with_extra(1, 0, 0, ["10"]);
        let b = VersionTag::with_extra(1, 0, 0, ["9"]);
        assert!(a < b);
    }

    #[test]
    fn test_compare_prefix_ranks_lower() {
        let short = VersionTag::with_extra(1, 0, 0, ["node"]);
        let long = VersionTag::with_extra(1, 0, 0, ["node", "11"]);
        assert!(short < long);
        assert!(VersionTag::new(1, 0, 0) < short);
    }

    #[test]
    fn test_sentinels_bound_equal_numeric_parts() {
        let earliest_zero = VersionTag::EARLIEST;
        let zero = VersionTag::new(0, 0, 0);
        assert!(earliest_zero < zero);

        let max = VersionTag::with_extra(u64::MAX, u64::MAX, u64::MAX, ["z"]);
        assert!(VersionTag::LATEST > max);
        assert_eq!(VersionTag::EARLIEST, VersionTag::EARLIEST.clone());
    }

    #[test]
    fn test_equal_versions() {
        let a = VersionTag::parse("8.5.1-node").unwrap();
        let b = VersionTag::with_extra(8, 5, 1, ["node"]);
        assert_eq!(VersionTag::compare(&a, &b), 0);
    }

    #[test]
    fn test_from_semver() {
        let sv = semver::Version::parse("10.2.154-node.4+abc").unwrap();
        let v = VersionTag::from(&sv);
        assert_eq!(v, VersionTag::with_extra(10, 2, 154, ["node", "4", "abc"]));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(VersionTag::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            VersionTag::parse("9.4.146.24").unwrap().to_string(),
            "9.4.146-24"
        );
        assert_eq!(VersionTag::EARLIEST.to_string(), "<earliest>");
        assert_eq!(VersionTag::LATEST.to_string(), "<latest>");
    }
}
