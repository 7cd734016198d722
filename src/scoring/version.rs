//! Version-range applicability
//!
//! Decides whether an installed version falls inside a finding's affected
//! window. The policy is explicit because advisory range strings are
//! otherwise opaque to this pipeline:
//!
//! - `affected_range` is read as the first affected release,
//!   `patched_range` as the first fixed release
//! - affected iff `affected_range <= version < patched_range`
//! - a missing bound is unbounded on that side
//! - no range information at all means the finding applies to every version
//!
//! Bounds compare as SemVer when both sides parse, otherwise fall back to
//! lexicographic string comparison. Gem versions are usually SemVer-shaped;
//! the fallback keeps four-segment Rails-style versions from panicking.

use crate::models::VulnerabilityFinding;
use std::cmp::Ordering;

/// Does this finding apply to the given installed version?
pub fn is_affected(finding: &VulnerabilityFinding, version: &str) -> bool {
    let introduced = finding.affected_range.as_deref();
    let patched = finding.patched_range.as_deref();

    if let Some(introduced) = introduced {
        if compare(version, introduced) == Ordering::Less {
            return false;
        }
    }
    if let Some(patched) = patched {
        if compare(version, patched) != Ordering::Less {
            return false;
        }
    }
    true
}

/// Compare two version strings, SemVer-first with string fallback.
fn compare(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
