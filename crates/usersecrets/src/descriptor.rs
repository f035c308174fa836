//! Project descriptor handling
//!
//! The project file (.csproj and friends) is treated as text. We look for
//! one element and, when it is missing, splice it in with a minimal edit
//! so the rest of the file keeps its formatting and comments byte for byte.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Result, UserSecretsError};
use crate::identifier::SecretsId;

/// Project file extensions recognised when given a directory
pub const DESCRIPTOR_EXTENSIONS: &[&str] = &["csproj", "fsproj", "vbproj"];

/// A <UserSecretsId> element on a single line, value captured lazily
const ID_PATTERN: &str = r"<UserSecretsId>([^\r\n\x{2028}\x{2029}]*?)</UserSecretsId>";

/// Where an identifier ended up after an embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Embedded {
    /// Written into an existing but empty <UserSecretsId></UserSecretsId>
    EmptyElement,
    /// Added to the first existing <PropertyGroup>
    PropertyGroup,
    /// Wrapped in a new <PropertyGroup> right after <Project>
    NewPropertyGroup,
    /// Neither anchor found; the file was not touched
    NoAnchor,
}

impl Embedded {
    pub fn persisted(&self) -> bool {
        !matches!(self, Embedded::NoAnchor)
    }
}

/// Writes an identifier into a project file.
///
/// The text-pattern implementation is the default; a markup-aware one can
/// replace it without changing callers.
pub trait DescriptorMutator {
    fn embed(&self, descriptor: &Path, id: &SecretsId) -> Result<Embedded>;
}

/// Inserts the element with plain text surgery
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMutator;

impl DescriptorMutator for PatternMutator {
    fn embed(&self, descriptor: &Path, id: &SecretsId) -> Result<Embedded> {
        let content = read_descriptor(descriptor)?;
        let (updated, embedded) = insert_identifier(&content, id)?;

        if !embedded.persisted() {
            warn!(
                "No <PropertyGroup> or <Project> in {}, UserSecretsId not saved",
                descriptor.display()
            );
            return Ok(embedded);
        }

        // Not atomic: a crash mid-write can truncate the project file
        fs::write(descriptor, updated).map_err(|e| UserSecretsError::io(descriptor, e))?;
        info!("Added UserSecretsId {} to {}", id, descriptor.display());

        Ok(embedded)
    }
}

/// Read a project file as UTF-8 text
pub fn read_descriptor(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| UserSecretsError::io(path, e))
}

/// Find the value of the first <UserSecretsId> element.
///
/// Malformed markup is not an error; it just doesn't match. An empty
/// first element counts as no identifier.
pub fn extract_identifier(content: &str) -> Result<Option<SecretsId>> {
    let id_re = Regex::new(ID_PATTERN)?;

    let mut values = id_re.captures_iter(content).map(|caps| caps[1].to_string());
    let first = values.next();

    if let Some(ref id) = first {
        let others = values.count();
        if others > 0 {
            warn!(
                "Found {} UserSecretsId elements, using the first ({})",
                others + 1,
                id
            );
        }
        debug!("Found UserSecretsId {}", id);
    }

    Ok(first.filter(|id| !id.is_empty()).map(SecretsId::new))
}

/// Splice a <UserSecretsId> element into project file text.
///
/// An empty first <UserSecretsId> is filled in place so it can't shadow
/// the new one. Returns the new text and where the element went. When
/// there is no anchor the text comes back unchanged.
pub fn insert_identifier(content: &str, id: &SecretsId) -> Result<(String, Embedded)> {
    let id_re = Regex::new(ID_PATTERN)?;
    if let Some(value) = id_re.captures(content).and_then(|caps| caps.get(1)) {
        if value.is_empty() {
            return Ok((splice(content, value.start(), id.as_str()), Embedded::EmptyElement));
        }
    }

    let property_group_re = Regex::new(r"<PropertyGroup[^>]*>")?;
    if let Some(tag) = property_group_re.find(content) {
        let element = format!("\n    <UserSecretsId>{}</UserSecretsId>", id);
        return Ok((splice(content, tag.end(), &element), Embedded::PropertyGroup));
    }

    let project_re = Regex::new(r"<Project[^>]*>")?;
    if let Some(tag) = project_re.find(content) {
        let group = format!(
            "\n  <PropertyGroup>\n    <UserSecretsId>{}</UserSecretsId>\n  </PropertyGroup>",
            id
        );
        return Ok((splice(content, tag.end(), &group), Embedded::NewPropertyGroup));
    }

    Ok((content.to_string(), Embedded::NoAnchor))
}

fn splice(content: &str, at: usize, insert: &str) -> String {
    let mut out = String::with_capacity(content.len() + insert.len());
    out.push_str(&content[..at]);
    out.push_str(insert);
    out.push_str(&content[at..]);
    out
}

/// Turn a user-supplied path into a project file path.
///
/// Files are taken as-is. A directory must contain exactly one project
/// file with a known extension.
pub fn discover(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let mut found = vec![];
    for entry in fs::read_dir(path).map_err(|e| UserSecretsError::io(path, e))? {
        let entry = entry.map_err(|e| UserSecretsError::io(path, e))?;
        let candidate = entry.path();
        let is_project = candidate
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| DESCRIPTOR_EXTENSIONS.contains(&ext))
            .unwrap_or(false);

        if is_project && candidate.is_file() {
            found.push(candidate);
        }
    }

    match found.len() {
        0 => Err(UserSecretsError::NoDescriptor(path.to_path_buf())),
        1 => Ok(found.remove(0)),
        n => Err(UserSecretsError::AmbiguousDescriptor(path.to_path_buf(), n)),
    }
}
