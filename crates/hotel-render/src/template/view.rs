//! Structured-view rendering.
//!
//! A view binds a record sequence under a variable name and renders it
//! through a [`TemplateEngine`] found by a [`TemplateLocator`]:
//!
//! ```rust,ignore
//! use hotel_render::{Catalog, RecordView, TemplateLocator};
//! use hotel_render::template::MiniJinjaEngine;
//!
//! let mut view = RecordView::new(
//!     Box::new(MiniJinjaEngine::new()),
//!     TemplateLocator::file("templates/minijinja/template.html"),
//! );
//! let html = view.render(Catalog::sample().hotels())?;
//! ```
//!
//! File and directory templates are read from disk on every render and nothing is
//! cached between calls, so edits are picked up without restarting.
//! Engine failures are returned to the caller unchanged.

use serde::Serialize;

use super::engine::TemplateEngine;
use super::locator::TemplateLocator;
use super::registry::TemplateRegistry;
use crate::error::RenderError;
use crate::record::Hotel;

/// Variable name records are bound under unless overridden.
pub const DEFAULT_BINDING: &str = "hotels";

/// Named variables exposed to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    vars: serde_json::Map<String, serde_json::Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, replacing any previous binding with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] if `value` cannot be serialized.
    pub fn bind<T: Serialize + ?Sized>(
        mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, RenderError> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// In-place form of [`bind`](Self::bind).
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), RenderError> {
        self.vars.insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The bindings as the JSON object handed to engines.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.vars.clone())
    }
}

/// Renders the template at `locator` with `bindings`.
///
/// Templates previously registered with `engine` are dropped first; filters
/// and other engine configuration are kept.
///
/// # Errors
///
/// Read failures, unknown template names, and engine parse or render
/// errors are all returned unchanged.
pub fn render_located(
    engine: &mut dyn TemplateEngine,
    locator: &TemplateLocator,
    bindings: &Bindings,
) -> Result<String, RenderError> {
    let data = bindings.to_value();
    log::debug!("rendering {} with {}", locator, engine.name());

    match locator {
        TemplateLocator::Inline(source) => engine.render_template(source, &data),
        TemplateLocator::File(path) => {
            let source = std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());

            engine.clear_templates();
            engine.add_template(&name, &source)?;
            engine.render_named(&name, &data)
        }
        TemplateLocator::Directory { root, name } => {
            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(root)?;
            let target = registry.resolve(name)?.name_with_ext.clone();
            log::debug!(
                "loaded {} templates from {}, rendering {}",
                registry.len(),
                root.display(),
                target
            );

            engine.clear_templates();
            engine.add_templates(registry.load_all()?)?;
            engine.render_named(&target, &data)
        }
        TemplateLocator::Embedded { templates, name } => {
            let sources = templates
                .iter()
                .map(|(n, s)| (n.to_string(), s.to_string()))
                .collect();

            engine.clear_templates();
            engine.add_templates(sources)?;
            engine.render_named(name, &data)
        }
    }
}

/// A record view: an engine, a template locator and a binding name.
///
/// # Example
///
/// ```rust
/// use hotel_render::{Hotel, RecordView, TemplateLocator};
/// use hotel_render::template::TeraEngine;
///
/// let mut view = RecordView::new(
///     Box::new(TeraEngine::new()),
///     TemplateLocator::inline("{% for h in hotels %}{{ h.name }} ({{ h.rating }})\n{% endfor %}"),
/// );
/// let hotels = [
///     Hotel::with_stars("Salon De The", 3, "https://example.com/a.jpg"),
///     Hotel::with_stars("Hotel Dananas", 5, "https://example.com/b.jpg"),
/// ];
/// let output = view.render(&hotels).unwrap();
/// assert_eq!(output, "Salon De The (3 Stars)\nHotel Dananas (5 Stars)\n");
/// ```
pub struct RecordView {
    engine: Box<dyn TemplateEngine>,
    locator: TemplateLocator,
    binding: String,
}

impl RecordView {
    /// Creates a view binding records under [`DEFAULT_BINDING`].
    pub fn new(engine: Box<dyn TemplateEngine>, locator: TemplateLocator) -> Self {
        Self {
            engine,
            locator,
            binding: DEFAULT_BINDING.to_string(),
        }
    }

    /// Binds records under `name` instead.
    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding = name.into();
        self
    }

    pub fn locator(&self) -> &TemplateLocator {
        &self.locator
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Renders `records`, passed through unmodified under the view's binding.
    pub fn render(&mut self, records: &[Hotel]) -> Result<String, RenderError> {
        let bindings = Bindings::new().bind(self.binding.as_str(), records)?;
        render_located(self.engine.as_mut(), &self.locator, &bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{EngineKind, MiniJinjaEngine};
    use serde_json::json;

    fn hotels() -> Vec<Hotel> {
        vec![
            Hotel::new("Salon De The", "3 Stars", "https://example.com/1.jpg"),
            Hotel::new("Hotel Dananas", "5 Stars", "https://example.com/2.jpg"),
        ]
    }

    #[test]
    fn test_bindings_serialize_records_unchanged() {
        let bindings = Bindings::new().bind("hotels", &hotels()).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.get("hotels").unwrap(),
            &json!([
                {"name": "Salon De The", "rating": "3 Stars", "image_url": "https://example.com/1.jpg"},
                {"name": "Hotel Dananas", "rating": "5 Stars", "image_url": "https://example.com/2.jpg"}
            ])
        );
    }

    #[test]
    fn test_bindings_rebind_replaces() {
        let mut bindings = Bindings::new();
        bindings.insert("title", "a").unwrap();
        bindings.insert("title", "b").unwrap();
        assert_eq!(bindings.to_value(), json!({"title": "b"}));
    }

    #[test]
    fn test_render_inline_each_engine() {
        let template = "{% for h in hotels %}{{ h.name }}={{ h.rating }};{% endfor %}";
        for kind in [EngineKind::MiniJinja, EngineKind::Tera] {
            let mut view = RecordView::new(kind.create(), TemplateLocator::inline(template));
            let output = view.render(&hotels()).unwrap();
            assert_eq!(output, "Salon De The=3 Stars;Hotel Dananas=5 Stars;");
        }
    }

    #[test]
    fn test_custom_binding_name() {
        let mut view = RecordView::new(
            Box::new(MiniJinjaEngine::new()),
            TemplateLocator::inline("{{ listings | length }}"),
        )
        .with_binding("listings");
        assert_eq!(view.binding(), "listings");
        assert_eq!(view.render(&hotels()).unwrap(), "2");
    }

    #[test]
    fn test_wrong_binding_name_fails() {
        let mut view = RecordView::new(
            Box::new(MiniJinjaEngine::new()),
            TemplateLocator::inline("{% for h in hotels %}{{ h.name }}{% endfor %}"),
        )
        .with_binding("rooms");
        assert!(matches!(
            view.render(&hotels()),
            Err(RenderError::Template(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut view = RecordView::new(
            Box::new(MiniJinjaEngine::new()),
            TemplateLocator::file("/nonexistent/template.html"),
        );
        assert!(matches!(view.render(&hotels()), Err(RenderError::Io { .. })));
    }

    #[test]
    fn test_missing_directory_is_registry_error() {
        let mut view = RecordView::new(
            EngineKind::Tera.create(),
            TemplateLocator::directory("/nonexistent/templates", "template.html"),
        );
        assert!(matches!(
            view.render(&hotels()),
            Err(RenderError::Registry(_))
        ));
    }

    const EMBEDDED: &[(&str, &str)] = &[
        ("base.txt", "[{% block body %}{% endblock %}]"),
        (
            "list.txt",
            "{% extends \"base.txt\" %}{% block body %}{% for h in hotels %}{{ h.name }};{% endfor %}{% endblock %}",
        ),
    ];

    #[test]
    fn test_render_embedded_each_engine() {
        for kind in [EngineKind::MiniJinja, EngineKind::Tera] {
            let mut view =
                RecordView::new(kind.create(), TemplateLocator::embedded(EMBEDDED, "list.txt"));
            let output = view.render(&hotels()).unwrap();
            assert_eq!(output, "[Salon De The;Hotel Dananas;]", "engine {kind:?}");
        }
    }

    #[test]
    fn test_embedded_unknown_name() {
        let mut view = RecordView::new(
            EngineKind::Tera.create(),
            TemplateLocator::embedded(EMBEDDED, "absent.txt"),
        );
        assert!(matches!(
            view.render(&hotels()),
            Err(RenderError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_engine_name() {
        let view = RecordView::new(EngineKind::Tera.create(), TemplateLocator::inline(""));
        assert_eq!(view.engine_name(), "tera");
    }
}
