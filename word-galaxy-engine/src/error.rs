//! Engine error taxonomy.
//!
//! Malformed word data never produces an error; it resolves to documented defaults
//! in [`crate::galaxy::item`]. Errors are reserved for unusable hosts and for
//! requests that cannot be interpreted at all.

/// Errors surfaced to the embedding host or the RPC bridge.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    /// No render target exists, so nothing useful can be displayed.
    #[error("Render surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A filter field carried a token outside its fixed set.
    #[error("Unknown {field} filter value: {value:?}")]
    UnknownFilterValue {
        field: &'static str,
        value: String,
    },

    /// A payload did not have the expected JSON shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

pub type GalaxyResult<T> = Result<T, GalaxyError>;
