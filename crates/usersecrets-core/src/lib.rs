//! usersecrets-core - Shared functionality for the usersecrets tool
//!
//! Knows which platform we are on and where that platform keeps
//! per-user data. Nothing here touches the filesystem.

pub mod paths;
pub mod platform;

pub use paths::{Paths, PathsError};
pub use platform::{Platform, PlatformError};
