//! Template port — opaque payload rendering.
//!
//! Two collaborators use it: one rewriting inbound state/position payloads
//! before they are parsed, one producing the outbound set-position payload
//! from the requested percentage.

/// Why a template could not render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("payload is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("no scalar value at {0:?}")]
    MissingValue(String),
}

/// Renders a payload into another payload.
pub trait PayloadTemplate: Send + Sync {
    /// Render `input` (a raw inbound payload or an outbound percentage).
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the template cannot be applied.
    fn render(&self, input: &str) -> Result<String, RenderError>;
}

impl<F> PayloadTemplate for F
where
    F: Fn(&str) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, input: &str) -> Result<String, RenderError> {
        self(input)
    }
}
