//! Template registry for directory-based template loading.
//!
//! [`TemplateRegistry`] is the directory loader behind
//! [`TemplateLocator::Directory`](super::TemplateLocator::Directory). It walks
//! one or more template directories and maps template names to files.
//!
//! # Template Resolution
//!
//! Files are referenced by their path relative to the directory root, using
//! forward slashes. Names can be given with or without extension:
//!
//! | File Path | Resolves From |
//! |-----------|---------------|
//! | `templates/template.html` | `"template.html"`, `"template"` |
//! | `templates/partials/card.jinja` | `"partials/card.jinja"`, `"partials/card"` |
//!
//! Templates are handed to the engine under their name *with* extension, so
//! `{% include %}` and `{% extends %}` inside templates use that form.
//!
//! # Supported Extensions
//!
//! Recognized in priority order (see [`TEMPLATE_EXTENSIONS`]). If a
//! directory holds `card.html` and `card.txt`, the extensionless name
//! `"card"` resolves to `card.html`.
//!
//! # Collision Handling
//!
//! - Same directory, different extensions: higher priority extension wins
//! - Different directories, same name: [`RegistryError::Collision`]
//!
//! # Example
//!
//! ```rust,ignore
//! let mut registry = TemplateRegistry::new();
//! registry.add_template_dir("./templates")?;
//! let file = registry.resolve("template")?;
//! let content = registry.get_content("template")?;
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".html", ".htm", ".jinja", ".j2", ".tera", ".txt"];

/// A template file discovered during directory walking.
///
/// Content is not read at discovery time; see [`TemplateRegistry::get_content`].
///
/// For a file at `/app/templates/partials/card.html` with root `/app/templates`:
///
/// ```rust,ignore
/// TemplateFile {
///     name: "partials/card".to_string(),
///     name_with_ext: "partials/card.html".to_string(),
///     absolute_path: PathBuf::from("/app/templates/partials/card.html"),
///     source_dir: PathBuf::from("/app/templates"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Resolution name without extension (e.g., "template" or "partials/card")
    pub name: String,
    /// Resolution name with extension (e.g., "template.html")
    pub name_with_ext: String,
    /// Absolute path to the template file
    pub absolute_path: PathBuf,
    /// The template directory root this file belongs to
    pub source_dir: PathBuf,
}

impl TemplateFile {
    /// Creates a new template file descriptor.
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        TEMPLATE_EXTENSIONS
            .iter()
            .position(|ext| self.name_with_ext.ends_with(ext))
            .unwrap_or(usize::MAX)
    }
}

/// Error type for template registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two template directories contain files that resolve to the same name.
    #[error(
        "template collision detected for \"{name}\":\n  - {} (from {})\n  - {} (from {})",
        .existing_path.display(),
        .existing_dir.display(),
        .conflicting_path.display(),
        .conflicting_dir.display()
    )]
    Collision {
        name: String,
        existing_path: PathBuf,
        existing_dir: PathBuf,
        conflicting_path: PathBuf,
        conflicting_dir: PathBuf,
    },

    /// Template not found in registry.
    #[error("template not found: \"{name}\"")]
    NotFound { name: String },

    /// A template directory or file could not be read.
    #[error("failed to read template \"{}\": {message}", .path.display())]
    Read { path: PathBuf, message: String },
}

/// Registry mapping template names to files in one or more directories.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    /// Files keyed by name with extension.
    files: HashMap<String, TemplateFile>,
    /// Extensionless name → name with extension of the winning file.
    stems: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Creates an empty template registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `path` and registers every template found below it.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read or a name collides with a
    /// template from a previously added directory.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RegistryError> {
        let files = walk_template_dir(path)?;
        self.add_from_files(files)
    }

    /// Registers already-discovered template files.
    pub fn add_from_files(&mut self, files: Vec<TemplateFile>) -> Result<(), RegistryError> {
        for file in files {
            if let Some(existing) = self.files.get(&file.name_with_ext) {
                return Err(collision(&file.name_with_ext, existing, &file));
            }

            match self.stems.get(&file.name) {
                Some(winner) => {
                    let existing = &self.files[winner];
                    if existing.source_dir != file.source_dir {
                        return Err(collision(&file.name, existing, &file));
                    }
                    if file.extension_priority() < existing.extension_priority() {
                        self.stems
                            .insert(file.name.clone(), file.name_with_ext.clone());
                    }
                }
                None => {
                    self.stems
                        .insert(file.name.clone(), file.name_with_ext.clone());
                }
            }

            self.files.insert(file.name_with_ext.clone(), file);
        }
        Ok(())
    }

    /// Resolves a template name, with or without extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no file matches.
    pub fn resolve(&self, name: &str) -> Result<&TemplateFile, RegistryError> {
        self.files
            .get(name)
            .or_else(|| self.stems.get(name).and_then(|full| self.files.get(full)))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Reads the content of a template from disk.
    pub fn get_content(&self, name: &str) -> Result<String, RegistryError> {
        let file = self.resolve(name)?;
        read_template(&file.absolute_path)
    }

    /// Reads every registered template as `(name_with_ext, content)` pairs,
    /// sorted by name.
    pub fn load_all(&self) -> Result<Vec<(String, String)>, RegistryError> {
        let mut names: Vec<&String> = self.files.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let content = read_template(&self.files[name].absolute_path)?;
                Ok((name.clone(), content))
            })
            .collect()
    }

    /// Returns the number of registered template files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns an iterator over all registered names with extension.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }
}

fn collision(name: &str, existing: &TemplateFile, conflicting: &TemplateFile) -> RegistryError {
    RegistryError::Collision {
        name: name.to_string(),
        existing_path: existing.absolute_path.clone(),
        existing_dir: existing.source_dir.clone(),
        conflicting_path: conflicting.absolute_path.clone(),
        conflicting_dir: conflicting.source_dir.clone(),
    }
}

fn read_template(path: &Path) -> Result<String, RegistryError> {
    std::fs::read_to_string(path).map_err(|e| RegistryError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Walks a template directory and collects template files.
///
/// The directory is traversed recursively; files without a recognized
/// extension ([`TEMPLATE_EXTENSIONS`]) and symlinked directories are skipped.
/// Symlinked files are read through their link. The result is sorted by
/// name with extension.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be traversed.
pub fn walk_template_dir(root: impl AsRef<Path>) -> Result<Vec<TemplateFile>, RegistryError> {
    let root = root.as_ref();
    let root = root.canonicalize().map_err(|e| RegistryError::Read {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    walk_recursive(&root, &root, &mut files)?;
    files.sort_by(|a, b| a.name_with_ext.cmp(&b.name_with_ext));
    Ok(files)
}

fn walk_recursive(
    current: &Path,
    root: &Path,
    files: &mut Vec<TemplateFile>,
) -> Result<(), RegistryError> {
    let read_err = |e: std::io::Error| RegistryError::Read {
        path: current.to_path_buf(),
        message: e.to_string(),
    };

    for entry in std::fs::read_dir(current).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;
        let path = entry.path();

        if file_type.is_dir() {
            walk_recursive(&path, root, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            // Symlinked directories are not followed; a link back up the tree would loop.
            log::debug!("skipping symlinked directory {}", path.display());
        } else if path.is_file() {
            if let Some(file) = try_parse_file(&path, root) {
                files.push(file);
            }
        }
    }

    Ok(())
}

/// Builds a [`TemplateFile`] if `path` has a recognized extension.
fn try_parse_file(path: &Path, root: &Path) -> Option<TemplateFile> {
    let relative = path.strip_prefix(root).ok()?;
    let name_with_ext = relative
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");

    let extension = TEMPLATE_EXTENSIONS
        .iter()
        .find(|ext| name_with_ext.ends_with(*ext))?;
    let name = name_with_ext.strip_suffix(extension)?.to_string();

    Some(TemplateFile::new(name, name_with_ext, path, root))
}
