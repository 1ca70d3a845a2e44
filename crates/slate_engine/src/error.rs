//! Engine and backend error types

use thiserror::Error;

/// Errors raised by backend adapters
#[derive(Error, Debug)]
pub enum BackendError {
    /// Failed to create the native window
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// Failed to create the renderer/surface
    #[error("renderer creation failed: {0}")]
    RendererCreation(String),

    /// Failed to load a font file
    #[error("font load failed: {0}")]
    FontLoad(String),

    /// Failed to load or decode an image
    #[error("image load failed: {0}")]
    ImageLoad(String),

    /// The native event queue is unavailable
    #[error("event pump unavailable: {0}")]
    EventPump(String),

    /// Presenting the frame failed
    #[error("present failed: {0}")]
    Present(String),

    /// Generic backend error
    #[error("backend error: {0}")]
    Other(String),
}

/// Errors raised by the shared engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Font slot index outside the fixed table
    #[error("invalid font slot {slot} (table holds {capacity} slots)")]
    InvalidFontSlot { slot: u16, capacity: usize },

    /// The per-frame arena cannot satisfy the request
    #[error("frame arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted { requested: usize, remaining: usize },

    /// The arena's backing allocation failed at startup
    #[error("frame arena allocation failed for {capacity} bytes")]
    ArenaAllocation { capacity: usize },

    /// Malformed shell configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
