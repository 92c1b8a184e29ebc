//! Directory-backed template store.
//!
//! Templates are `*.md` files directly under the store directory; the file
//! stem is the template name. Every read re-scans the directory.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::TemplateError;

use super::kind::{TemplateKind, TemplateMetadata};

/// File extension of template documents.
pub const TEMPLATE_EXTENSION: &str = "md";

/// A single path component: no separators, no NUL, not `.`/`..`.
static TEMPLATE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/\\\x00]+$").expect("Invalid regex"));

/// A template loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: String,
    pub content: String,
    pub file_path: String,
    pub metadata: TemplateMetadata,
}

/// Listing entry: a loaded template, or the read error for that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    Loaded(Template),
    Failed { file_path: String, error: String },
}

impl TemplateEntry {
    pub fn content(&self) -> Option<&str> {
        match self {
            TemplateEntry::Loaded(template) => Some(&template.content),
            TemplateEntry::Failed { .. } => None,
        }
    }
}

/// Template store rooted at a directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Open a store, creating the directory if it does not exist.
    ///
    /// A directory that cannot be created is logged; listings then fail.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let store = Self { dir: dir.into() };
        if let Err(e) = store.ensure_dir() {
            warn!("{}", e);
        }
        store
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<(), TemplateError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| TemplateError::CreateDirFailed {
            path: self.dir.clone(),
            source,
        })
    }

    /// Path of the file backing `name`.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }

    /// Load every template in the directory, keyed by name.
    ///
    /// A file that cannot be read becomes a [`TemplateEntry::Failed`] entry;
    /// only an unreadable directory fails the whole listing.
    pub fn get_all_templates(&self) -> Result<BTreeMap<String, TemplateEntry>, TemplateError> {
        let entries = std::fs::read_dir(&self.dir).map_err(TemplateError::ReadFailed)?;

        let mut templates = BTreeMap::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };

            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }

            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };

            let file_path = path.to_string_lossy().to_string();
            let entry = match std::fs::read_to_string(&path) {
                Ok(content) => TemplateEntry::Loaded(Template {
                    metadata: TemplateKind::from_name(&name).metadata(),
                    name: name.clone(),
                    content,
                    file_path,
                }),
                Err(e) => TemplateEntry::Failed {
                    file_path,
                    error: TemplateError::ReadFailed(e).to_string(),
                },
            };
            templates.insert(name, entry);
        }

        debug!("Loaded {} templates from {:?}", templates.len(), self.dir);
        Ok(templates)
    }

    /// Look up a single template by name.
    pub fn get_template(&self, name: &str) -> Option<TemplateEntry> {
        match self.get_all_templates() {
            Ok(mut templates) => templates.remove(name),
            Err(e) => {
                warn!("Failed to list templates in {:?}: {}", self.dir, e);
                None
            }
        }
    }

    /// Names of every template in the directory.
    pub fn list_available_templates(&self) -> Vec<String> {
        match self.get_all_templates() {
            Ok(templates) => templates.into_keys().collect(),
            Err(e) => {
                warn!("Failed to list templates in {:?}: {}", self.dir, e);
                Vec::new()
            }
        }
    }

    /// Write `content` verbatim to `<dir>/<name>.md`, replacing any existing file.
    ///
    /// Returns `false` on any failure.
    pub fn create_custom_template(&self, name: &str, content: &str) -> bool {
        match self.write_template(name, content) {
            Ok(path) => {
                debug!("Wrote template {} to {:?}", name, path);
                true
            }
            Err(e) => {
                warn!("Error creating template {}: {}", name, e);
                false
            }
        }
    }

    fn write_template(&self, name: &str, content: &str) -> Result<PathBuf, TemplateError> {
        if !is_valid_template_name(name) {
            return Err(TemplateError::InvalidName(name.to_string()));
        }

        self.ensure_dir()?;
        let path = self.template_path(name);
        let write_err = |source| TemplateError::WriteFailed {
            path: path.clone(),
            source,
        };

        // Temp file lives in the same directory so persist is a rename.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        Ok(path)
    }

    /// Write the built-in templates that are missing from the directory.
    ///
    /// Existing files are left untouched. Returns the names written.
    pub fn seed_builtin_templates(&self) -> Result<Vec<String>, TemplateError> {
        let mut written = Vec::new();

        for kind in TemplateKind::BUILTIN {
            let Some(content) = kind.builtin_content() else {
                continue;
            };
            if self.template_path(kind.name()).exists() {
                continue;
            }
            self.write_template(kind.name(), content)?;
            written.push(kind.name().to_string());
        }

        Ok(written)
    }
}

/// Whether `name` can be used as a template file stem.
pub fn is_valid_template_name(name: &str) -> bool {
    name != "." && name != ".." && TEMPLATE_NAME_RE.is_match(name)
}
