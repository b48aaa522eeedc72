//! Template renderer.

use handlebars::{no_escape, Handlebars};
use serde_json::json;

/// Renderer for the issue comment template.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    ///
    /// Escaping is disabled so markdown in the comment passes through
    /// untouched, and strict mode is on so a template referencing anything
    /// but `pr` is reported instead of rendering empty.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    /// Renders the comment template for one closed issue.
    ///
    /// The template sees a single variable, `pr`, holding the number of the
    /// merged pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the template has invalid syntax or references
    /// variables other than `pr`.
    pub fn render_comment(
        &self,
        template: &str,
        pr_number: u64,
    ) -> Result<String, super::TemplateError> {
        let data = json!({ "pr": pr_number });
        Ok(self.handlebars.render_template(template, &data)?)
    }
}
