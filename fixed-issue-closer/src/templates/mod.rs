//! Comment template rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::TemplateRenderer;
