//! Per-frame bump arena
//!
//! Transient per-element data (formatted strings, scratch buffers) is
//! allocated here and thrown away wholesale when the next frame begins.
//! Allocations return plain offset handles instead of references, so a
//! handle outliving the reset cannot dangle; it just reads the next
//! frame's bytes, which is why handles should never be stored across
//! frames.

use crate::error::{EngineError, Result};

/// Offset handle into the arena, valid until the next [`FrameArena::reset`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaHandle {
    offset: usize,
    len: usize,
}

/// Bump allocator reset once per frame
pub struct FrameArena {
    buffer: Vec<u8>,
    cursor: usize,
}

impl FrameArena {
    /// Reserve the backing buffer up front. A failed reservation is an
    /// initialization error, not a panic.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| EngineError::ArenaAllocation { capacity })?;
        buffer.resize(capacity, 0);
        Ok(Self { buffer, cursor: 0 })
    }

    /// Discard every allocation made since the previous reset
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Copy `bytes` into the arena
    pub fn alloc(&mut self, bytes: &[u8]) -> Result<ArenaHandle> {
        let remaining = self.remaining();
        if bytes.len() > remaining {
            return Err(EngineError::ArenaExhausted {
                requested: bytes.len(),
                remaining,
            });
        }
        let offset = self.cursor;
        self.buffer[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
        Ok(ArenaHandle {
            offset,
            len: bytes.len(),
        })
    }

    /// Copy a string into the arena
    pub fn alloc_str(&mut self, text: &str) -> Result<ArenaHandle> {
        self.alloc(text.as_bytes())
    }

    pub fn get(&self, handle: ArenaHandle) -> &[u8] {
        &self.buffer[handle.offset..handle.offset + handle.len]
    }

    /// Read a handle back as UTF-8; only meaningful for handles from
    /// [`FrameArena::alloc_str`] in the current frame
    pub fn get_str(&self, handle: ArenaHandle) -> Option<&str> {
        std::str::from_utf8(self.get(handle)).ok()
    }
}
