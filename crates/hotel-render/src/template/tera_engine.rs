//! Tera-based template engine.

use tera::{Context, Tera};

use super::TemplateEngine;
use crate::error::RenderError;

/// Suffixes Tera HTML-escapes by default.
const DEFAULT_AUTOESCAPE: &[&str] = &[".html", ".htm", ".xml"];

/// Template engine backed by [Tera](https://keats.github.io/tera/).
///
/// Tera resolves `{% extends %}` chains when templates are added, so a
/// directory of templates must be registered in one call; this engine
/// overrides [`TemplateEngine::add_templates`] accordingly. Missing
/// variables are always errors in Tera.
///
/// Filters, testers and functions registered through
/// [`tera_mut`](Self::tera_mut) apply to inline and named templates alike and
/// survive [`clear_templates`](TemplateEngine::clear_templates).
///
/// # Example
///
/// ```rust
/// use hotel_render::template::{TemplateEngine, TeraEngine};
/// use serde_json::json;
///
/// let mut engine = TeraEngine::new();
/// engine
///     .add_template("list.txt", "{% for h in hotels %}{{ h.name }}/{{ h.rating }} {% endfor %}")
///     .unwrap();
/// let output = engine
///     .render_named("list.txt", &json!({"hotels": [{"name": "Hotel Dananas", "rating": "5 Stars"}]}))
///     .unwrap();
/// assert_eq!(output, "Hotel Dananas/5 Stars ");
/// ```
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Creates an empty engine with Tera's default autoescape suffixes.
    pub fn new() -> Self {
        Self::with_autoescape(DEFAULT_AUTOESCAPE.to_vec())
    }

    /// Creates an empty engine escaping only templates ending in `suffixes`.
    ///
    /// Pass an empty list to disable escaping entirely.
    pub fn with_autoescape(suffixes: Vec<&'static str>) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(suffixes);
        Self { tera }
    }

    /// Returns the underlying Tera instance.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Returns the underlying Tera instance mutably, e.g. to register filters.
    pub fn tera_mut(&mut self) -> &mut Tera {
        &mut self.tera
    }

    fn context(data: &serde_json::Value) -> Result<Context, RenderError> {
        match data {
            serde_json::Value::Null => Ok(Context::new()),
            _ => Ok(Context::from_serialize(data)?),
        }
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for TeraEngine {
    fn name(&self) -> &'static str {
        "tera"
    }

    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let context = Self::context(data)?;
        // render_str needs &mut; a clone keeps registered filters without
        // leaving the one-off template behind.
        let mut tera = self.tera.clone();
        Ok(tera.render_str(template, &context)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.tera.add_raw_template(name, source)?;
        Ok(())
    }

    fn add_templates(&mut self, templates: Vec<(String, String)>) -> Result<(), RenderError> {
        self.tera.add_raw_templates(templates)?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let context = Self::context(data)?;
        Ok(self.tera.render(name, &context)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    fn clear_templates(&mut self) {
        self.tera.templates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_tera_engine_simple() {
        let engine = TeraEngine::new();
        let output = engine
            .render_template("Hello, {{ name }}!", &json!({"name": "World"}))
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_tera_engine_with_loop() {
        let engine = TeraEngine::new();
        let output = engine
            .render_template(
                "{% for item in items %}{{ item }},{% endfor %}",
                &json!({"items": ["a", "b", "c"]}),
            )
            .unwrap();
        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_tera_engine_null_data() {
        let engine = TeraEngine::new();
        let output = engine
            .render_template("static", &serde_json::Value::Null)
            .unwrap();
        assert_eq!(output, "static");
    }

    #[test]
    fn test_tera_engine_syntax_error() {
        let engine = TeraEngine::new();
        let result = engine.render_template("{{ unclosed", &json!({}));
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn test_tera_engine_missing_variable() {
        let engine = TeraEngine::new();
        let result = engine.render_template("{% for h in hotels %}{{ h }}{% endfor %}", &json!({}));
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn test_tera_engine_missing_named_template() {
        let engine = TeraEngine::new();
        let result = engine.render_named("absent.html", &json!({}));
        assert!(matches!(result, Err(RenderError::TemplateNotFound(_))));
    }

    #[test]
    fn test_tera_engine_inheritance_registered_together() {
        let mut engine = TeraEngine::new();
        engine
            .add_templates(vec![
                (
                    "child.txt".to_string(),
                    "{% extends \"base.txt\" %}{% block body %}{{ name }}{% endblock %}"
                        .to_string(),
                ),
                (
                    "base.txt".to_string(),
                    "[{% block body %}{% endblock %}]".to_string(),
                ),
            ])
            .unwrap();
        let output = engine
            .render_named("child.txt", &json!({"name": "Pizza Hawai"}))
            .unwrap();
        assert_eq!(output, "[Pizza Hawai]");
    }

    #[test]
    fn test_tera_engine_autoescape_by_suffix() {
        let mut engine = TeraEngine::new();
        engine.add_template("a.html", "{{ name }}").unwrap();
        engine.add_template("a.txt", "{{ name }}").unwrap();
        let data = json!({"name": "Bed & Breakfast"});
        assert_eq!(
            engine.render_named("a.html", &data).unwrap(),
            "Bed &amp; Breakfast"
        );
        assert_eq!(engine.render_named("a.txt", &data).unwrap(), "Bed & Breakfast");
    }

    #[test]
    fn test_tera_engine_autoescape_disabled() {
        let mut engine = TeraEngine::with_autoescape(vec![]);
        engine.add_template("a.html", "{{ name }}").unwrap();
        let output = engine
            .render_named("a.html", &json!({"name": "Bed & Breakfast"}))
            .unwrap();
        assert_eq!(output, "Bed & Breakfast");
    }

    #[test]
    fn test_tera_engine_clear_keeps_autoescape() {
        let mut engine = TeraEngine::with_autoescape(vec![]);
        engine.add_template("a.html", "A").unwrap();
        assert!(engine.has_template("a.html"));

        engine.clear_templates();
        assert!(!engine.has_template("a.html"));

        engine.add_template("b.html", "{{ v }}").unwrap();
        let output = engine.render_named("b.html", &json!({"v": "<b>"})).unwrap();
        assert_eq!(output, "<b>");
    }

    fn shout(value: &tera::Value, _: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let text = value.as_str().unwrap_or_default();
        Ok(tera::Value::String(text.to_uppercase()))
    }

    #[test]
    fn test_tera_engine_clear_keeps_filters() {
        let mut engine = TeraEngine::new();
        engine.tera_mut().register_filter("shout", shout);
        engine.add_template("a.txt", "{{ name | shout }}").unwrap();
        engine.clear_templates();

        engine.add_template("b.txt", "{{ name | shout }}!").unwrap();
        let output = engine
            .render_named("b.txt", &json!({"name": "Pizza Hawai"}))
            .unwrap();
        assert_eq!(output, "PIZZA HAWAI!");
    }

    #[test]
    fn test_tera_engine_inline_uses_filters() {
        let mut engine = TeraEngine::new();
        engine.tera_mut().register_filter("shout", shout);
        let output = engine
            .render_template("{{ name | shout }}", &json!({"name": "Salon De The"}))
            .unwrap();
        assert_eq!(output, "SALON DE THE");
        assert!(!engine.has_template("__tera_one_off"));
    }
}
