//! Template-engine rendering of record views.
//!
//! Views render a record sequence through an interchangeable
//! [`TemplateEngine`]. The engine is picked when the view is built; the code
//! that builds the data does not change between engines.
//!
//! ## Engines
//!
//! | Engine | Backend | Notes |
//! |--------|---------|-------|
//! | [`MiniJinjaEngine`] | `minijinja` | Jinja2 syntax, undefined variables are errors |
//! | [`TeraEngine`] | `tera` | Jinja2-like syntax, templates registered as a set |
//!
//! ## Locating Templates
//!
//! A [`TemplateLocator`] names either a single file, a template directory
//! plus the template to render, or inline source. Directories are walked by
//! [`TemplateRegistry`]; recognized extensions are listed in
//! [`TEMPLATE_EXTENSIONS`].
//!
//! ## Key Types
//!
//! - [`RecordView`]: engine + locator + binding name, renders `&[Hotel]`
//! - [`render_located`]: one-shot rendering with arbitrary [`Bindings`]
//! - [`TemplateRegistry`]: name resolution for template directories
//!
//! [`Hotel`]: crate::Hotel

mod engine;
mod locator;
pub mod registry;
mod tera_engine;
mod view;

pub use engine::{EngineKind, MiniJinjaEngine, TemplateEngine};
pub use locator::TemplateLocator;
pub use registry::{
    walk_template_dir, RegistryError, TemplateFile, TemplateRegistry, TEMPLATE_EXTENSIONS,
};
pub use tera_engine::TeraEngine;
pub use view::{render_located, Bindings, RecordView, DEFAULT_BINDING};
