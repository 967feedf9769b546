//! Storage root resolution.
//!
//! The root for an application depends on the platform family and on two directories the host
//! provides: the external storage directory (the user's home) and the local storage directory
//! (the working directory, or the app sandbox on mobile hosts).
//!
//! | Platform  | Root                                                   |
//! |-----------|--------------------------------------------------------|
//! | Windows   | `<external>/AppData/Roaming/<app_id>`                  |
//! | Mac       | `<external>/Library/Application Support/<app_id>`      |
//! | Unix      | `<external>/.<app_id after its first '.'>`             |
//! | Other     | `<local>`                                              |

use std::env;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::{Platform, PlatformError};
use crate::consts::{EXTERNAL_DIR_ENV, LOCAL_DIR_ENV, ROOT_ENV};
use crate::store::types::StoreError;

/// The two root directories a host provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDirs {
  /// Per-user storage, usually the home directory
  pub external: PathBuf,
  /// Process-local storage, usually the working directory or an app sandbox
  pub local: PathBuf,
}

impl HostDirs {
  pub fn new(external: impl Into<PathBuf>, local: impl Into<PathBuf>) -> Self {
    Self {
      external: external.into(),
      local: local.into(),
    }
  }

  /// Discover the host directories from the environment.
  ///
  /// `PLAYERDATA_EXTERNAL_DIR` and `PLAYERDATA_LOCAL_DIR` take precedence over the home
  /// directory and the current directory respectively.
  pub fn current() -> Result<Self, PlatformError> {
    let external = match env_override(EXTERNAL_DIR_ENV)? {
      Some(path) => path,
      None => home_dir()?,
    };
    let local = match env_override(LOCAL_DIR_ENV)? {
      Some(path) => path,
      None => env::current_dir().map_err(PlatformError::CurrentDir)?,
    };
    Ok(Self { external, local })
  }
}

/// Read a path override from the environment, made absolute against the current directory.
fn env_override(var: &str) -> Result<Option<PathBuf>, PlatformError> {
  let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) else {
    return Ok(None);
  };
  let path = PathBuf::from(value);
  if path.is_absolute() {
    return Ok(Some(path));
  }
  warn!(var, path = %path.display(), "relative path override, resolving against current directory");
  std::path::absolute(&path)
    .map(Some)
    .map_err(PlatformError::CurrentDir)
}

#[cfg(windows)]
fn home_dir() -> Result<PathBuf, PlatformError> {
  env::var_os("USERPROFILE")
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .ok_or(PlatformError::NoHomeDirectory)
}

#[cfg(not(windows))]
fn home_dir() -> Result<PathBuf, PlatformError> {
  env::var_os("HOME")
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .ok_or(PlatformError::NoHomeDirectory)
}

/// Directory name used for an application on Unix, without the leading dot.
///
/// Everything up to and including the first `.` is dropped, so `com.example.Game` becomes
/// `example.Game`. Identifiers without a dot, or with nothing after their first dot, are used
/// as-is.
pub fn unix_dir_name(app_id: &str) -> &str {
  match app_id.split_once('.') {
    Some((_, rest)) if !rest.is_empty() => rest,
    _ => app_id,
  }
}

/// Compute the storage root for `app_id` on `platform`.
///
/// Pure: the result depends only on the arguments. It is absolute whenever the host
/// directories are. On Windows, Mac and Unix the application gets its own subdirectory, so the
/// derived directory name must be a single plain path component; anything else (empty, `.`,
/// `..`, containing a separator) fails with [`PlatformError::InvalidAppId`].
pub fn resolve_root(app_id: &str, platform: Platform, dirs: &HostDirs) -> Result<PathBuf, PlatformError> {
  let root = match platform {
    Platform::Windows => dirs
      .external
      .join("AppData")
      .join("Roaming")
      .join(app_dir(app_id, app_id)?),
    Platform::Mac => dirs
      .external
      .join("Library")
      .join("Application Support")
      .join(app_dir(app_id, app_id)?),
    Platform::Unix => {
      let name = format!(".{}", unix_dir_name(app_id));
      dirs.external.join(app_dir(app_id, &name)?)
    }
    Platform::Other => dirs.local.clone(),
  };
  Ok(root)
}

/// Check that `name`, derived from `app_id`, names exactly one subdirectory.
fn app_dir<'a>(app_id: &str, name: &'a str) -> Result<&'a str, PlatformError> {
  let mut components = Path::new(name).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(_)), None) => Ok(name),
    _ => Err(PlatformError::InvalidAppId(app_id.to_string())),
  }
}

/// Storage root for `app_id` on the current host.
///
/// `PLAYERDATA_ROOT` replaces the resolved root when set.
pub fn storage_root(app_id: &str) -> Result<PathBuf, PlatformError> {
  if let Some(root) = env_override(ROOT_ENV)? {
    debug!(root = %root.display(), "storage root overridden by {}", ROOT_ENV);
    return Ok(root);
  }

  let platform = Platform::current();
  let root = resolve_root(app_id, platform, &HostDirs::current()?)?;
  debug!(app_id, %platform, root = %root.display(), "resolved storage root");
  Ok(root)
}

/// Join path segments onto `root`.
///
/// Segments are always relative to `root`: root and drive prefixes are dropped and `.` is
/// ignored, so the result stays under `root`. A segment containing `..` fails with
/// [`StoreError::InvalidSegment`]; a sequence that names nothing below `root` (empty, or only
/// separators) fails with [`StoreError::InvalidPath`].
pub fn join_path<S: AsRef<str>>(root: &Path, segments: &[S]) -> Result<PathBuf, StoreError> {
  let mut path = root.to_path_buf();
  let mut named = false;
  for segment in segments {
    let segment = segment.as_ref();
    for component in Path::new(segment).components() {
      match component {
        Component::Normal(part) => {
          path.push(part);
          named = true;
        }
        Component::ParentDir => return Err(StoreError::InvalidSegment(segment.to_string())),
        Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
      }
    }
  }

  if !named {
    return Err(StoreError::InvalidPath);
  }
  Ok(path)
}
