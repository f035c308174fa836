//! usersecrets - Find or create the secrets file for a .NET project
//!
//! "Secrets live next to you, not next to your code."
//!
//! A project names its secrets store with a `UserSecretsId` in its
//! project file. The values live in a per-user directory keyed by that
//! id, outside the source tree. This crate makes sure the id exists,
//! makes sure the store exists, and hands back the path.

pub mod config;
pub mod descriptor;
pub mod editor;
pub mod error;
pub mod host;
pub mod identifier;
pub mod resolver;
pub mod store;

pub use config::UserSecretsConfig;
pub use descriptor::{DescriptorMutator, Embedded, PatternMutator};
pub use editor::{SecretsEditor, SecretsReport};
pub use error::{Result, UserSecretsError};
pub use host::{Host, TerminalHost};
pub use identifier::SecretsId;
pub use resolver::{IdentifierResolver, Resolution};
pub use store::{SecretsFile, SecretsLocator, PLACEHOLDER, SECRETS_FILE_NAME};
