//! Shared glyph mesh cache
//!
//! Each key owns a once-cell, so concurrent first requests for the same
//! glyph wait for a single triangulation instead of repeating it. Results
//! are immutable and handed out as `Arc`s. Failures are cached as well:
//! building is deterministic, a second attempt would fail the same way.

use super::mesh::GlyphMesh;
use crate::error::MeshResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

/// Identifies one glyph mesh: font, code point, size and style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    font: Arc<str>,
    code_point: char,
    size_bits: u32,
    style: FontStyle,
}

impl GlyphKey {
    pub fn new(font: impl Into<Arc<str>>, code_point: char, size: f32, style: FontStyle) -> Self {
        Self {
            font: font.into(),
            code_point,
            size_bits: size.to_bits(),
            style,
        }
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn code_point(&self) -> char {
        self.code_point
    }

    pub fn size(&self) -> f32 {
        f32::from_bits(self.size_bits)
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }
}

type Slot = Arc<OnceLock<MeshResult<Arc<GlyphMesh>>>>;

#[derive(Debug, Default)]
pub struct GlyphCache {
    slots: Mutex<HashMap<GlyphKey, Slot>>,
    builds: AtomicUsize,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mesh for `key`, running `build` if no one has yet.
    /// Identical keys always get the same `Arc`.
    pub fn get_or_build<F>(&self, key: GlyphKey, build: F) -> MeshResult<Arc<GlyphMesh>>
    where
        F: FnOnce() -> MeshResult<GlyphMesh>,
    {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        // the map lock is released here, other glyphs build in parallel
        slot.get_or_init(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            debug!("Building glyph mesh for {:?} at {}px", key.code_point, key.size());
            build().map(Arc::new)
        })
        .clone()
    }

    /// A finished mesh, if one was built successfully
    pub fn get(&self, key: &GlyphKey) -> Option<Arc<GlyphMesh>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key)?.get()?.as_ref().ok().cloned()
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times a build closure actually ran
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
