//! Store configuration and error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::codec::{BoxError, Format};
use crate::platform::PlatformError;

/// Which kind of host a store serves.
///
/// Both variants behave identically except for [`wipe`](super::DocumentStore::wipe): a desktop
/// store removes its root directory, a sandboxed store empties it and keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
  #[default]
  Desktop,
  Sandboxed,
}

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The path segment sequence was empty.
  #[error("no path specified")]
  InvalidPath,

  /// A path segment would leave the storage root.
  #[error("path segment '{0}' leaves the storage root")]
  InvalidSegment(String),

  /// A codec failed to encode or decode a document.
  #[error("failed to process {format} document '{path}': {source}")]
  Serialization {
    path: PathBuf,
    format: Format,
    #[source]
    source: BoxError,
  },

  /// Any other filesystem failure.
  #[error("storage error at '{path}': {source}")]
  Storage {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The storage root could not be resolved.
  #[error(transparent)]
  Platform(#[from] PlatformError),
}

impl StoreError {
  pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Storage {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn serialization(path: impl Into<PathBuf>, format: Format, source: BoxError) -> Self {
    Self::Serialization {
      path: path.into(),
      format,
      source,
    }
  }
}
