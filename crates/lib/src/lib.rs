//! playerdata: per-application save directories and a file-backed document store
//!
//! This crate provides the two pieces a game needs to persist player data:
//! - `platform`: resolves the storage root for an application identifier on each platform
//!   family and joins path segments under it
//! - `store`: `DocumentStore`, typed XML/JSON/text reads and writes plus directory management
//!   relative to that root
//!
//! Every call touches the filesystem directly. Nothing is cached between calls and no locking
//! is performed; callers sharing paths across threads synchronize externally.

pub mod consts;
pub mod platform;
pub mod store;

pub use platform::paths::{HostDirs, join_path, resolve_root, storage_root, unix_dir_name};
pub use platform::{Platform, PlatformError};
pub use store::codec::{BoxError, Codec, Format, JsonCodec, XmlCodec};
pub use store::types::{StoreError, Variant};
pub use store::DocumentStore;
