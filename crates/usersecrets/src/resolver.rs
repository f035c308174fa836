//! Read-or-mint resolution of a project's UserSecretsId

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::descriptor::{
    extract_identifier, read_descriptor, DescriptorMutator, Embedded, PatternMutator,
};
use crate::error::{Result, UserSecretsError};
use crate::identifier::SecretsId;

/// Outcome of resolving a project file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub descriptor: PathBuf,
    pub id: SecretsId,
    /// A new identifier was generated on this run
    pub minted: bool,
    /// The identifier is stored in the project file
    pub persisted: bool,
}

/// Finds the UserSecretsId of a project, minting and saving one if needed.
///
/// The project file is read fresh on every call. Once an id is written it
/// is returned unchanged by every later call, with no further writes.
pub struct IdentifierResolver {
    mutator: Box<dyn DescriptorMutator>,
    /// Fail instead of carrying on when the id cannot be saved
    strict: bool,
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self::new(PatternMutator)
    }
}

impl IdentifierResolver {
    pub fn new(mutator: impl DescriptorMutator + 'static) -> Self {
        Self {
            mutator: Box::new(mutator),
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn resolve(&self, descriptor: &Path) -> Result<Resolution> {
        let content = read_descriptor(descriptor)?;

        if let Some(id) = extract_identifier(&content)? {
            return Ok(Resolution {
                descriptor: descriptor.to_path_buf(),
                id,
                minted: false,
                persisted: true,
            });
        }

        let id = SecretsId::mint();
        info!("Minted UserSecretsId {} for {}", id, descriptor.display());

        let embedded = self.mutator.embed(descriptor, &id)?;
        if embedded == Embedded::NoAnchor && self.strict {
            return Err(UserSecretsError::NoInsertionAnchor(descriptor.to_path_buf()));
        }

        Ok(Resolution {
            descriptor: descriptor.to_path_buf(),
            id,
            minted: true,
            persisted: embedded.persisted(),
        })
    }
}
