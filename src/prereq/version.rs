// src/prereq/version.rs

use std::fmt;

use regex::Regex;

use crate::errors::{InstallerError, Result};

/// Oldest supported interpreter (inclusive).
pub const MIN_SUPPORTED: (u32, u32) = (3, 9);
/// First unsupported interpreter (exclusive upper bound).
pub const MAX_EXCLUSIVE: (u32, u32) = (3, 12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

const VERSION_PATTERN: &str = r"^Python\s+(\d+)\.(\d+)(?:\.(\d+))?";

/// Parse the output of `python --version` (e.g. `Python 3.11.4`).
pub fn parse_python_version(output: &str) -> Result<PythonVersion> {
    let trimmed = output.trim();
    let re = Regex::new(VERSION_PATTERN).map_err(anyhow::Error::from)?;
    let caps = re.captures(trimmed).ok_or_else(|| {
        InstallerError::Prerequisite(format!("invalid Python version format: {trimmed}"))
    })?;

    let number = |i: usize| -> Result<Option<u32>> {
        caps.get(i)
            .map(|m| {
                m.as_str().parse::<u32>().map_err(|_| {
                    InstallerError::Prerequisite(format!(
                        "invalid Python version component: {}",
                        m.as_str()
                    ))
                })
            })
            .transpose()
    };

    Ok(PythonVersion {
        major: number(1)?.unwrap_or_default(),
        minor: number(2)?.unwrap_or_default(),
        patch: number(3)?,
    })
}

pub fn supported_range() -> String {
    format!(
        ">= {}.{}, < {}.{}",
        MIN_SUPPORTED.0, MIN_SUPPORTED.1, MAX_EXCLUSIVE.0, MAX_EXCLUSIVE.1
    )
}

/// Accept versions in `[MIN_SUPPORTED, MAX_EXCLUSIVE)`.
pub fn ensure_supported(version: PythonVersion) -> Result<()> {
    let v = (version.major, version.minor);

    if v < MIN_SUPPORTED {
        return Err(InstallerError::Prerequisite(format!(
            "Python {}.{} or higher is required, but found {version}",
            MIN_SUPPORTED.0, MIN_SUPPORTED.1
        )));
    }
    if v >= MAX_EXCLUSIVE {
        return Err(InstallerError::Prerequisite(format!(
            "Python {version} is not supported (supported range: {})",
            supported_range()
        )));
    }
    Ok(())
}
