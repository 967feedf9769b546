//! Environment variables recognised when resolving storage locations.

/// Replaces the resolved storage root entirely.
pub const ROOT_ENV: &str = "PLAYERDATA_ROOT";

/// Overrides the external storage directory (the user's home directory by default).
pub const EXTERNAL_DIR_ENV: &str = "PLAYERDATA_EXTERNAL_DIR";

/// Overrides the local storage directory (the process working directory by default).
pub const LOCAL_DIR_ENV: &str = "PLAYERDATA_LOCAL_DIR";
