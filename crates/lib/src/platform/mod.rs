//! Platform classification and storage root resolution.

pub mod paths;

use std::fmt;
use std::io;

use thiserror::Error;

/// Platform families that get distinct save directory layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
  Windows,
  Mac,
  Unix,
  /// Sandboxed or unrecognised hosts; data lives in the local storage directory
  Other,
}

impl Platform {
  /// Classify the platform this process is running on
  pub fn current() -> Self {
    Self::from_os(std::env::consts::OS)
  }

  /// Classify an OS name as reported by `std::env::consts::OS`
  pub fn from_os(os: &str) -> Self {
    match os {
      "windows" => Self::Windows,
      "macos" => Self::Mac,
      "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris" | "illumos" => Self::Unix,
      _ => Self::Other,
    }
  }

  /// Returns the lowercase string identifier for this platform
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::Mac => "mac",
      Self::Unix => "unix",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Errors raised while discovering host storage directories
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("failed to determine home directory")]
  NoHomeDirectory,

  #[error("failed to determine current directory: {0}")]
  CurrentDir(#[source] io::Error),

  #[error("application identifier '{0}' does not name a single directory")]
  InvalidAppId(String),
}
