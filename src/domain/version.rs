use crate::error::{BumpError, Result};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version file content (e.g., "1.2.3\n" -> Version(1,2,3))
    ///
    /// Surrounding whitespace is ignored. Each of the three components must be
    /// a plain run of ASCII digits.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim();

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(BumpError::malformed(
                trimmed,
                format!("expected MAJOR.MINOR.PATCH, found {} part(s)", parts.len()),
            ));
        }

        let major = parse_component(trimmed, "major", parts[0])?;
        let minor = parse_component(trimmed, "minor", parts[1])?;
        let patch = parse_component(trimmed, "patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to bump type
    ///
    /// Fails only when the incremented component would overflow.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = |name: &str| {
            BumpError::malformed(self.to_string(), format!("{} version would overflow", name))
        };

        let bumped = match bump_type {
            VersionBump::Major => Version {
                major: self.major.checked_add(1).ok_or_else(|| overflow("major"))?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(|| overflow("minor"))?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(|| overflow("patch"))?,
            },
        };

        Ok(bumped)
    }
}

fn parse_component(content: &str, name: &str, raw: &str) -> Result<u64> {
    // u64::from_str also accepts a leading '+', which a version file never should
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BumpError::malformed(
            content,
            format!("invalid {} version '{}'", name, raw),
        ));
    }

    raw.parse::<u64>().map_err(|_| {
        BumpError::malformed(
            content,
            format!("{} version '{}' is out of range", name, raw),
        )
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionBump {
    /// Resolve the bump kind from the command-line flags.
    ///
    /// Major takes precedence over minor; patch is the default.
    pub fn from_flags(major: bool, minor: bool) -> Self {
        if major {
            VersionBump::Major
        } else if minor {
            VersionBump::Minor
        } else {
            VersionBump::Patch
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}
