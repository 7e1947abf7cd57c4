//! Where a view finds its template.

use std::fmt;
use std::path::PathBuf;

/// Tells a view where its template document lives.
///
/// - [`File`](Self::File): a single template file, registered with the
///   engine under its file name.
/// - [`Directory`](Self::Directory): a template directory loaded through
///   [`TemplateRegistry`](super::TemplateRegistry); every template below
///   `root` is registered so templates can include or extend each other,
///   and `name` is rendered.
/// - [`Inline`](Self::Inline): template source given directly.
/// - [`Embedded`](Self::Embedded): a named template set compiled into the
///   binary (typically with `include_str!`), registered like a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocator {
    File(PathBuf),
    Directory {
        root: PathBuf,
        name: String,
    },
    Inline(String),
    Embedded {
        templates: &'static [(&'static str, &'static str)],
        name: String,
    },
}

impl TemplateLocator {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TemplateLocator::File(path.into())
    }

    pub fn directory(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        TemplateLocator::Directory {
            root: root.into(),
            name: name.into(),
        }
    }

    pub fn inline(source: impl Into<String>) -> Self {
        TemplateLocator::Inline(source.into())
    }

    /// `templates` holds `(name, source)` pairs; `name` is the one rendered.
    pub fn embedded(
        templates: &'static [(&'static str, &'static str)],
        name: impl Into<String>,
    ) -> Self {
        TemplateLocator::Embedded {
            templates,
            name: name.into(),
        }
    }
}

impl fmt::Display for TemplateLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateLocator::File(path) => write!(f, "file {}", path.display()),
            TemplateLocator::Directory { root, name } => {
                write!(f, "template \"{}\" in {}", name, root.display())
            }
            TemplateLocator::Inline(_) => f.write_str("inline template"),
            TemplateLocator::Embedded { name, .. } => write!(f, "embedded template \"{}\"", name),
        }
    }
}
