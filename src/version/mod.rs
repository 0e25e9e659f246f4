//! Semantic version model
//!
//! Strict `major.minor.patch[-prerelease]` grammar with bump helpers. The
//! numeric triple orders first; a release outranks any prerelease of the
//! same triple.

pub mod sync;

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub use sync::{bump_at_root, BumpOutcome, VersionSynchronizer};

static SEMVER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z.-]+))?$")
        .expect("valid semver regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

/// Which segment a bump increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(Error::UnknownBumpKind { value: other.to_string() }),
        }
    }
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Version {
        Version { major, minor, patch, prerelease: None }
    }

    /// Compute the next version. The prerelease label, when given, is
    /// attached verbatim after validation; otherwise the result is a plain
    /// release even if `self` had a prerelease.
    pub fn bump(&self, kind: BumpKind, prerelease: Option<&str>) -> Result<Version, Error> {
        let prerelease = match prerelease {
            Some(label) => Some(validate_prerelease(label)?.to_string()),
            None => None,
        };
        let mut next = match kind {
            BumpKind::Major => Version::new(self.major + 1, 0, 0),
            BumpKind::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => Version::new(self.major, self.minor, self.patch + 1),
        };
        next.prerelease = prerelease;
        Ok(next)
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

/// A label must be non-empty dot-separated tokens of `[0-9A-Za-z-]`.
fn validate_prerelease(label: &str) -> Result<&str, Error> {
    let valid = !label.is_empty()
        && label.split('.').all(|token| {
            !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        });
    if valid {
        Ok(label)
    } else {
        Err(Error::InvalidPrerelease { value: label.to_string() })
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        let caps = SEMVER_RE
            .captures(trimmed)
            .ok_or_else(|| Error::InvalidVersion { value: s.to_string() })?;
        // The regex only admits decimal digit runs, so the parses hold
        // unless a segment overflows u64.
        let segment = |i: usize| {
            caps[i].parse::<u64>().map_err(|_| Error::InvalidVersion { value: s.to_string() })
        };
        Ok(Version {
            major: segment(1)?,
            minor: segment(2)?,
            patch: segment(3)?,
            prerelease: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> Ordering {
        self.triple().cmp(&other.triple()).then_with(|| {
            match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            }
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
