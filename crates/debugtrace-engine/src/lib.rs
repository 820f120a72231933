// Engine module - value to text rendering
// Sits between the value model (types) and the tracer that writes lines (runtime)

mod options;
mod renderer;

pub use options::RenderOptions;
pub use renderer::Renderer;

use debugtrace_core::TextEncoder;
use debugtrace_types::{Traceable, Value};

/// Render a value model into lines using the given options.
pub fn render_lines(
    value: &Value,
    options: &RenderOptions<'_>,
    encoder: &dyn TextEncoder,
) -> Vec<String> {
    Renderer::new(options, encoder).render(value)
}

/// Convert and render a host value in one step.
pub fn render<T: Traceable + ?Sized>(
    value: &T,
    options: &RenderOptions<'_>,
    encoder: &dyn TextEncoder,
) -> Vec<String> {
    render_lines(&value.to_value(), options, encoder)
}
