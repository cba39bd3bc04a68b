//! Incremental result reveal.
//!
//! The grid shows an initial window of results and grows it by a fixed step
//! on demand ("Load More"). This is a presentation concern layered on top of
//! the engine's sorted/filtered output; [`Page`] holds no engine state and
//! ignoring it costs nothing.

/// A grow-only window over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    visible: usize,
    step: usize,
}

impl Page {
    pub const DEFAULT_SIZE: usize = 12;

    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_SIZE)
    }

    /// A window with a custom initial size and step (configurable page
    /// size). A size of zero would never reveal anything and `load_more`
    /// could never grow it, so it is clamped to 1.
    pub fn with_size(size: usize) -> Self {
        let size = size.max(1);
        Self {
            visible: size,
            step: size,
        }
    }

    /// Grow the window by one step.
    pub fn load_more(&mut self) {
        self.visible += self.step;
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// The currently revealed prefix of `items`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    pub fn has_more<T>(&self, items: &[T]) -> bool {
        items.len() > self.visible
    }

    /// How many results remain hidden.
    pub fn remaining<T>(&self, items: &[T]) -> usize {
        items.len().saturating_sub(self.visible)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
