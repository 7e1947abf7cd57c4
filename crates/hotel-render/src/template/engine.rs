//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which lets a view render
//! through different template backends without touching the code that builds
//! its data. Two implementations ship with the crate: [`MiniJinjaEngine`]
//! and [`TeraEngine`](super::TeraEngine).

use minijinja::{Environment, UndefinedBehavior, Value};

use crate::error::RenderError;

/// A template engine that can render templates with data.
///
/// Data is handed over as a `serde_json::Value`, normally an object whose
/// keys are the template's variable names. Everything about template syntax
/// (loops, conditionals, escaping, caching) belongs to the engine; failures
/// are reported as [`RenderError`] and never recovered from here.
pub trait TemplateEngine: Send + Sync {
    /// Short engine identifier used in logs.
    fn name(&self) -> &'static str;

    /// Renders a template string with the given data.
    ///
    /// This compiles and renders the template in one step without
    /// registering it.
    fn render_template(&self, template: &str, data: &serde_json::Value)
        -> Result<String, RenderError>;

    /// Adds a named template to the engine.
    ///
    /// The template is compiled and cached for later use via [`render_named`](Self::render_named).
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Adds a set of templates that may refer to each other.
    ///
    /// Engines that resolve `extends`/`include` when a template is added
    /// should override this to register the whole set at once.
    fn add_templates(&mut self, templates: Vec<(String, String)>) -> Result<(), RenderError> {
        for (name, source) in &templates {
            self.add_template(name, source)?;
        }
        Ok(())
    }

    /// Renders a previously registered template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;

    /// Drops every registered template.
    fn clear_templates(&mut self);
}

/// Which engine a view should render through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    MiniJinja,
    Tera,
}

impl EngineKind {
    /// Builds a fresh engine of this kind with default settings.
    pub fn create(self) -> Box<dyn TemplateEngine> {
        match self {
            EngineKind::MiniJinja => Box::new(MiniJinjaEngine::new()),
            EngineKind::Tera => Box::new(super::TeraEngine::new()),
        }
    }
}

/// MiniJinja-based template engine.
///
/// Jinja2-compatible syntax with loops, conditionals, macros, includes and
/// template inheritance. Undefined variables are errors, so a template that
/// iterates a binding the caller forgot fails instead of rendering empty.
/// Templates whose names end in `.html`, `.htm` or `.xml` are HTML-escaped.
///
/// # Example
///
/// ```rust
/// use hotel_render::template::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_template("{% for h in hotels %}{{ h.name }};{% endfor %}",
///         &json!({"hotels": [{"name": "Salon De The"}, {"name": "Pizza Hawai"}]}))
///     .unwrap();
/// assert_eq!(output, "Salon De The;Pizza Hawai;");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine with strict undefined handling.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register custom filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn name(&self) -> &'static str {
        "minijinja"
    }

    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    fn clear_templates(&mut self) {
        self.env.clear_templates();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: usize,
    }

    #[test]
    fn test_minijinja_engine_simple() {
        let engine = MiniJinjaEngine::new();
        let data = TestData {
            name: "World".into(),
            count: 42,
        };
        let data_value = serde_json::to_value(&data).unwrap();
        let output = engine
            .render_template("Hello, {{ name }}! ({{ count }})", &data_value)
            .unwrap();
        assert_eq!(output, "Hello, World! (42)");
    }

    #[test]
    fn test_minijinja_engine_with_loop() {
        let engine = MiniJinjaEngine::new();
        let data = json!({"items": ["a", "b", "c"]});
        let output = engine
            .render_template("{% for item in items %}{{ item }},{% endfor %}", &data)
            .unwrap();
        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_minijinja_engine_named_template() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .add_template("greeting", "Hello, {{ name }}!")
            .unwrap();
        assert!(engine.has_template("greeting"));

        let output = engine
            .render_named("greeting", &json!({"name": "World"}))
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_minijinja_engine_template_error() {
        let engine = MiniJinjaEngine::new();
        let result = engine.render_template("{{ unclosed", &serde_json::Value::Null);
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn test_minijinja_engine_undefined_variable_is_error() {
        let engine = MiniJinjaEngine::new();
        let result = engine.render_template(
            "{% for h in hotels %}{{ h }}{% endfor %}",
            &json!({"rooms": []}),
        );
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn test_minijinja_engine_missing_named_template() {
        let engine = MiniJinjaEngine::new();
        let result = engine.render_named("absent.html", &json!({}));
        assert!(matches!(result, Err(RenderError::TemplateNotFound(_))));
    }

    #[test]
    fn test_minijinja_engine_html_names_are_escaped() {
        let mut engine = MiniJinjaEngine::new();
        engine.add_template("page.html", "{{ name }}").unwrap();
        engine.add_template("page.txt", "{{ name }}").unwrap();
        let data = json!({"name": "Bed & Breakfast"});
        assert_eq!(
            engine.render_named("page.html", &data).unwrap(),
            "Bed &amp; Breakfast"
        );
        assert_eq!(
            engine.render_named("page.txt", &data).unwrap(),
            "Bed & Breakfast"
        );
    }

    #[test]
    fn test_minijinja_engine_clear_templates() {
        let mut engine = MiniJinjaEngine::new();
        engine.add_template("a", "A").unwrap();
        engine.clear_templates();
        assert!(!engine.has_template("a"));
    }

    #[test]
    fn test_engine_kind_create() {
        assert_eq!(EngineKind::MiniJinja.create().name(), "minijinja");
        assert_eq!(EngineKind::Tera.create().name(), "tera");
    }
}
