//! Package version model (`epoch:pkgver-pkgrel`) and its ordering
//!
//! Ordering follows pacman's `vercmp`: epochs compare first, then the upstream
//! version, then the package release. Version strings are compared segment by
//! segment, with numeric runs treated as numbers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

/// A parsed package version
#[derive(Debug, Clone)]
pub struct Version {
    /// Ordering override, 0 when absent
    pub epoch: u64,
    /// Upstream version (pkgver)
    pub version: String,
    /// Packaging release counter (pkgrel), empty when absent
    pub release: String,
}

impl Version {
    /// Parse `[epoch:]version[-release]`
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let raw = raw.trim();
        let invalid = || VersionError::Invalid(raw.to_string());

        let (epoch, rest) = match raw.split_once(':') {
            Some((epoch, rest)) => {
                if rest.contains(':') {
                    return Err(invalid());
                }
                (epoch.parse::<u64>().map_err(|_| invalid())?, rest)
            }
            None => (0, raw),
        };

        let (version, release) = match rest.split_once('-') {
            Some((version, release)) => {
                if release.contains('-') {
                    return Err(invalid());
                }
                (version, release)
            }
            None => (rest, ""),
        };

        if !is_valid_pkgver(version) {
            return Err(invalid());
        }

        Ok(Self {
            epoch,
            version: version.to_string(),
            release: release.to_string(),
        })
    }

    /// Same version with a different upstream part
    pub fn with_upstream(&self, upstream: &Version) -> Self {
        Self {
            epoch: self.epoch,
            version: upstream.version.clone(),
            release: self.release.clone(),
        }
    }

    /// `version-release` without the epoch, as shown in reports
    pub fn version_release(&self) -> String {
        if self.release.is_empty() {
            self.version.clone()
        } else {
            format!("{}-{}", self.version, self.release)
        }
    }
}

fn is_valid_pkgver(version: &str) -> bool {
    let mut chars = version.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '~'))
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.version_release())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| vercmp(&self.version, &other.version))
            .then_with(|| vercmp(&self.release, &other.release))
    }
}

// Equality follows the ordering, so `1.001` and `1.1` are the same version
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings the way pacman's `vercmp` does
///
/// Both strings are split into alternating numeric and alphabetic segments,
/// any other characters acting as separators. Numeric segments compare by
/// value, alphabetic segments lexicographically, and a numeric segment is
/// always newer than an alphabetic one.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a.as_bytes();
    let mut two = b.as_bytes();

    while !one.is_empty() && !two.is_empty() {
        let sep1 = leading(one, |c| !c.is_ascii_alphanumeric());
        let sep2 = leading(two, |c| !c.is_ascii_alphanumeric());
        one = &one[sep1..];
        two = &two[sep2..];

        if one.is_empty() || two.is_empty() {
            break;
        }

        // More separators means a newer version: 1.0..1 > 1.0.1
        if sep1 != sep2 {
            return sep1.cmp(&sep2);
        }

        let is_num = one[0].is_ascii_digit();
        let segment = |s: &[u8]| {
            if is_num {
                leading(s, |c| c.is_ascii_digit())
            } else {
                leading(s, |c| c.is_ascii_alphabetic())
            }
        };
        let len1 = segment(one);
        let len2 = segment(two);

        // Segments of different types: numeric is newer
        if len2 == 0 {
            return if is_num {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let (seg1, seg2) = (&one[..len1], &two[..len2]);
        let ord = if is_num {
            compare_numeric(seg1, seg2)
        } else {
            seg1.cmp(seg2)
        };
        if ord != Ordering::Equal {
            return ord;
        }

        one = &one[len1..];
        two = &two[len2..];
    }

    if one.is_empty() && two.is_empty() {
        return Ordering::Equal;
    }

    // A remaining alpha segment never beats an exhausted string: 1.0a < 1.0
    let one_alpha = one.first().is_some_and(u8::is_ascii_alphabetic);
    let two_alpha = two.first().is_some_and(u8::is_ascii_alphabetic);
    if (one.is_empty() && !two_alpha) || one_alpha {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn leading(s: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    s.iter().take_while(|&&c| pred(c)).count()
}

fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_zeros(a);
    let b = trim_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_zeros(s: &[u8]) -> &[u8] {
    let zeros = leading(s, |c| c == b'0');
    &s[zeros..]
}
