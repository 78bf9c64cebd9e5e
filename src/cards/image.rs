//! Image identities and the pool they are collected into.
//!
//! ## ImageRef
//!
//! The engine never looks at pixels. The media adapter hands out an
//! `ImageRef` per photo when it is ingested and keeps the actual image
//! data on its side. Two visually identical photos taken twice are two
//! different `ImageRef`s.
//!
//! ## ImagePool
//!
//! Photos arrive from two sources that both append to the same pool:
//! - the library picker, returning any number of images in any order
//! - the camera, returning exactly one image per capture
//!
//! The pool is capped; images beyond the capacity are rejected.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::PoolError;

/// Opaque identity of a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageRef(pub u64);

impl ImageRef {
    /// Create a new image reference.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image({})", self.0)
    }
}

/// Bounded, ordered collection of distinct images awaiting a game.
#[derive(Clone, Debug, Default)]
pub struct ImagePool {
    images: Vec<ImageRef>,
    /// Identity index over `images`.
    members: FxHashSet<ImageRef>,
    capacity: usize,
}

impl ImagePool {
    /// Create an empty pool holding at most `capacity` images.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            images: Vec::new(),
            members: FxHashSet::default(),
            capacity,
        }
    }

    /// Add images from the library picker.
    ///
    /// Images are accepted in the order given until the pool is full.
    /// Returns how many were accepted; full-pool and duplicate rejections
    /// are skipped, not reported.
    pub fn add_picked(&mut self, images: impl IntoIterator<Item = ImageRef>) -> usize {
        images
            .into_iter()
            .filter(|&image| self.push(image).is_ok())
            .count()
    }

    /// Add a single camera capture.
    pub fn add_captured(&mut self, image: ImageRef) -> Result<(), PoolError> {
        self.push(image)
    }

    fn push(&mut self, image: ImageRef) -> Result<(), PoolError> {
        if self.is_full() {
            return Err(PoolError::Full {
                capacity: self.capacity,
            });
        }
        if !self.members.insert(image) {
            return Err(PoolError::Duplicate(image));
        }
        self.images.push(image);
        Ok(())
    }

    /// Remove the image at `position`, shifting later images down.
    pub fn remove(&mut self, position: usize) -> Result<ImageRef, PoolError> {
        if position >= self.images.len() {
            return Err(PoolError::NoSuchPosition(position));
        }
        let image = self.images.remove(position);
        self.members.remove(&image);
        Ok(image)
    }

    /// Drop every image.
    pub fn clear(&mut self) {
        self.images.clear();
        self.members.clear();
    }

    #[must_use]
    pub fn contains(&self, image: ImageRef) -> bool {
        self.members.contains(&image)
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.images.len())
    }

    /// A full pool is required to start a game.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.images.len() >= self.capacity
    }
}
