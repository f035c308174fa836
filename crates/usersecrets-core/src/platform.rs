//! Platform families and their host-style names

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Unknown platform: {0}")]
    Unknown(String),
}

/// The operating system whose path conventions apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any other Unix-like system (BSDs, illumos, AIX, Android)
    OtherUnix,
}

impl Platform {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::OtherUnix,
        }
    }

    /// Windows uses the roaming profile; everything else uses the home directory
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "win32",
            Self::MacOs => "darwin",
            Self::Linux => "linux",
            Self::OtherUnix => "unix",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    /// Accepts both Node-style (`win32`, `darwin`) and Rust-style
    /// (`windows`, `macos`) names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win32" | "windows" | "win" => Ok(Self::Windows),
            "darwin" | "macos" | "osx" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "unix" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "aix" | "sunos"
            | "solaris" | "illumos" | "android" => Ok(Self::OtherUnix),
            _ => Err(PlatformError::Unknown(s.to_string())),
        }
    }
}
