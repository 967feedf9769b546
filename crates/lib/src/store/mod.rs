//! File-backed document store.
//!
//! A [`DocumentStore`] owns a storage root and performs typed reads and writes of documents
//! addressed by path segments relative to it.
//!
//! # Storage Layout
//!
//! ```text
//! {root}/
//! ├── settings.json       # store.write_json(&settings, &["settings.json"])
//! └── saves/
//!     └── slot1.xml       # store.write_xml(&save, &["saves", "slot1.xml"])
//! ```
//!
//! The root is created lazily by the first write or `create_directory`; reads, deletes,
//! existence checks and `wipe` never create it. Writes overwrite in place and are not
//! atomic: a failed write may leave a truncated file behind.

pub mod codec;
pub mod types;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::platform::paths::{HostDirs, join_path, storage_root};
use codec::{Codec, JsonCodec, XmlCodec};
use types::{StoreError, Variant};

/// Reads and writes documents under a storage root.
#[derive(Debug, Clone)]
pub struct DocumentStore<J = JsonCodec, X = XmlCodec> {
  root: PathBuf,
  variant: Variant,
  json: J,
  xml: X,
}

impl DocumentStore {
  /// Create a store rooted at `root` with the default codecs.
  pub fn new(root: impl Into<PathBuf>, variant: Variant) -> Self {
    Self {
      root: root.into(),
      variant,
      json: JsonCodec::default(),
      xml: XmlCodec,
    }
  }

  /// Create a desktop store for `app_id`, rooted at its platform save directory.
  pub fn desktop(app_id: &str) -> Result<Self, StoreError> {
    Ok(Self::new(storage_root(app_id)?, Variant::Desktop))
  }

  /// Create a sandboxed store rooted at the host's local storage directory.
  pub fn sandboxed() -> Result<Self, StoreError> {
    let dirs = HostDirs::current()?;
    Ok(Self::new(dirs.local, Variant::Sandboxed))
  }
}

impl<J: Codec, X: Codec> DocumentStore<J, X> {
  /// Replace the JSON and XML codecs.
  pub fn with_codecs<J2: Codec, X2: Codec>(self, json: J2, xml: X2) -> DocumentStore<J2, X2> {
    DocumentStore {
      root: self.root,
      variant: self.variant,
      json,
      xml,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn variant(&self) -> Variant {
    self.variant
  }

  /// Resolve path segments to an absolute path under the root.
  pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Result<PathBuf, StoreError> {
    join_path(&self.root, path)
  }

  pub fn read_xml<T: DeserializeOwned, S: AsRef<str>>(&self, path: &[S]) -> Result<T, StoreError> {
    self.read_document(&self.xml, path)
  }

  pub fn write_xml<T: Serialize + ?Sized, S: AsRef<str>>(&self, value: &T, path: &[S]) -> Result<(), StoreError> {
    self.write_document(&self.xml, value, path)
  }

  pub fn read_json<T: DeserializeOwned, S: AsRef<str>>(&self, path: &[S]) -> Result<T, StoreError> {
    self.read_document(&self.json, path)
  }

  pub fn write_json<T: Serialize + ?Sized, S: AsRef<str>>(&self, value: &T, path: &[S]) -> Result<(), StoreError> {
    self.write_document(&self.json, value, path)
  }

  /// Read the raw contents of a file.
  pub fn read_string<S: AsRef<str>>(&self, path: &[S]) -> Result<String, StoreError> {
    let file = self.resolve(path)?;
    read_text(&file)
  }

  /// Overwrite a file with `text`, creating its parent directory if needed.
  pub fn write_string<S: AsRef<str>>(&self, text: &str, path: &[S]) -> Result<(), StoreError> {
    let file = self.resolve(path)?;
    ensure_directory_exists_for_file(&file)?;
    write_text(&file, text)
  }

  /// Delete a file, or a directory and everything in it.
  ///
  /// Returns `Ok(false)` if nothing existed at the path.
  pub fn delete<S: AsRef<str>>(&self, path: &[S]) -> Result<bool, StoreError> {
    let target = self.resolve(path)?;
    let result = if target.is_dir() {
      fs::remove_dir_all(&target)
    } else {
      fs::remove_file(&target)
    };

    match result {
      Ok(()) => {
        debug!(path = %target.display(), "deleted");
        Ok(true)
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(e) => Err(StoreError::storage(target, e)),
    }
  }

  /// True if the path exists and is not a directory.
  pub fn has_file<S: AsRef<str>>(&self, path: &[S]) -> Result<bool, StoreError> {
    let target = self.resolve(path)?;
    let found = target.exists() && !target.is_dir();
    trace!(path = %target.display(), found, "has_file");
    Ok(found)
  }

  /// True if the path exists and is a directory.
  pub fn has_directory<S: AsRef<str>>(&self, path: &[S]) -> Result<bool, StoreError> {
    let target = self.resolve(path)?;
    let found = target.is_dir();
    trace!(path = %target.display(), found, "has_directory");
    Ok(found)
  }

  /// Create a directory and any missing ancestors. No-op if the path already exists.
  pub fn create_directory<S: AsRef<str>>(&self, path: &[S]) -> Result<(), StoreError> {
    let target = self.resolve(path)?;
    if target.exists() {
      return Ok(());
    }
    self.ensure_root_exists()?;
    debug!(path = %target.display(), "creating directory");
    fs::create_dir_all(&target).map_err(|e| StoreError::storage(&target, e))
  }

  /// Remove everything stored under the root.
  ///
  /// A desktop store also removes the root itself; a sandboxed store leaves it in place, empty.
  /// Does nothing if the root does not exist.
  pub fn wipe(&self) -> Result<(), StoreError> {
    if !self.root.exists() {
      trace!(root = %self.root.display(), "wipe: root does not exist");
      return Ok(());
    }

    debug!(root = %self.root.display(), variant = ?self.variant, "wiping store");
    match self.variant {
      Variant::Desktop => fs::remove_dir_all(&self.root).map_err(|e| StoreError::storage(&self.root, e)),
      Variant::Sandboxed => empty_directory(&self.root),
    }
  }

  fn ensure_root_exists(&self) -> Result<(), StoreError> {
    if self.root.exists() {
      return Ok(());
    }
    debug!(root = %self.root.display(), "creating storage root");
    fs::create_dir_all(&self.root).map_err(|e| StoreError::storage(&self.root, e))
  }

  fn read_document<C: Codec, T: DeserializeOwned, S: AsRef<str>>(
    &self,
    codec: &C,
    path: &[S],
  ) -> Result<T, StoreError> {
    let file = self.resolve(path)?;
    let text = read_text(&file)?;
    codec
      .decode(&text)
      .map_err(|e| StoreError::serialization(&file, codec.format(), e))
  }

  fn write_document<C: Codec, T: Serialize + ?Sized, S: AsRef<str>>(
    &self,
    codec: &C,
    value: &T,
    path: &[S],
  ) -> Result<(), StoreError> {
    let file = self.resolve(path)?;
    ensure_directory_exists_for_file(&file)?;
    let text = codec
      .encode(value)
      .map_err(|e| StoreError::serialization(&file, codec.format(), e))?;
    write_text(&file, &text)
  }
}

/// Make sure a file can be written at `file`.
///
/// Only the file itself and its immediate parent are checked. When the parent is missing it is
/// created together with any missing ancestors, the storage root included.
fn ensure_directory_exists_for_file(file: &Path) -> Result<(), StoreError> {
  if file.exists() {
    return Ok(());
  }
  let Some(parent) = file.parent() else {
    return Ok(());
  };
  if parent.exists() {
    return Ok(());
  }
  debug!(path = %parent.display(), "creating parent directory");
  fs::create_dir_all(parent).map_err(|e| StoreError::storage(parent, e))
}

fn read_text(file: &Path) -> Result<String, StoreError> {
  trace!(path = %file.display(), "reading");
  fs::read_to_string(file).map_err(|e| StoreError::storage(file, e))
}

fn write_text(file: &Path, text: &str) -> Result<(), StoreError> {
  debug!(path = %file.display(), bytes = text.len(), "writing");
  fs::write(file, text).map_err(|e| StoreError::storage(file, e))
}

/// Remove every entry of `dir`, keeping `dir` itself.
fn empty_directory(dir: &Path) -> Result<(), StoreError> {
  let entries = fs::read_dir(dir).map_err(|e| StoreError::storage(dir, e))?;
  for entry in entries {
    let entry = entry.map_err(|e| StoreError::storage(dir, e))?;
    let path = entry.path();
    let file_type = entry.file_type().map_err(|e| StoreError::storage(&path, e))?;
    let result = if file_type.is_dir() {
      fs::remove_dir_all(&path)
    } else {
      fs::remove_file(&path)
    };
    result.map_err(|e| StoreError::storage(&path, e))?;
  }
  Ok(())
}
