//! # Hotel Render - Record Listings Through Interchangeable Renderers
//!
//! `hotel-render` turns an ordered list of [`Hotel`] records into a text
//! document. Two rendering styles are provided:
//!
//! - [`substitution`]: plain-text templates with marker tokens replaced in
//!   order, one record at a time
//! - [`template`]: structured views rendered through a pluggable
//!   [`TemplateEngine`] ([`MiniJinjaEngine`] or [`TeraEngine`])
//!
//! Records are always injected by the caller, either built in code or loaded
//! from a [`Catalog`] file.
//!
//! ## Core Concepts
//!
//! - [`Hotel`]: immutable record with `name`, `rating`, `image_url`
//! - [`Catalog`]: ordered record list, sample data or JSON/YAML/CSV file
//! - [`TemplateLocator`]: single file, template directory, or inline source
//! - [`RecordView`]: binds records under a variable name and renders them
//! - [`RenderError`]: read failures and engine failures, never recovered
//!
//! ## Quick Start
//!
//! ```rust
//! use hotel_render::{substitute, Catalog, Placeholders};
//!
//! let template = "<li>###HOTELNAME### - ###STARS###</li>\n".repeat(3);
//! let out = substitute(&template, Catalog::sample().hotels(), &Placeholders::default());
//! assert_eq!(
//!     out.text,
//!     "<li>Salon De The - 3 Stars</li>\n\
//!      <li>Hotel Dananas - 5 Stars</li>\n\
//!      <li>Pizza Hawai - 3 Stars</li>\n"
//! );
//! ```
//!
//! ## Swapping Engines
//!
//! ```rust
//! use hotel_render::{Catalog, EngineKind, RecordView, TemplateLocator};
//!
//! let template = "{% for h in hotels %}{{ h.name }}|{% endfor %}";
//! let hotels = Catalog::sample();
//!
//! for kind in [EngineKind::MiniJinja, EngineKind::Tera] {
//!     let mut view = RecordView::new(kind.create(), TemplateLocator::inline(template));
//!     let output = view.render(hotels.hotels()).unwrap();
//!     assert_eq!(output, "Salon De The|Hotel Dananas|Pizza Hawai|");
//! }
//! ```

pub mod catalog;
mod error;
mod record;
pub mod substitution;
pub mod template;

pub use catalog::{Catalog, CatalogError};
pub use error::RenderError;
pub use record::Hotel;
pub use substitution::{
    render_file, substitute, Placeholders, Substituted, HOTEL_NAME_TOKEN, STARS_TOKEN,
};
pub use template::{
    render_located, Bindings, EngineKind, MiniJinjaEngine, RecordView, RegistryError,
    TemplateEngine, TemplateLocator, TemplateRegistry, TeraEngine,
};
