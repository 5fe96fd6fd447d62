//! Clamped cursor for the case carousel.
//!
//! The carousel steps through a finite list of cards. It never wraps:
//! `next_card()` on the last position and `prev_card()` on the first are no-ops.
//! With a window of `w` visible cards the cursor stops at `len - w`, the
//! position where the last card comes into view.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    len: usize,
    window: usize,
    index: usize,
}

impl Carousel {
    /// A carousel over `len` cards showing `window` at a time.
    /// A window of 0 is treated as 1.
    pub fn new(len: usize, window: usize) -> Self {
        Self {
            len,
            window: window.max(1),
            index: 0,
        }
    }

    /// Start at `index`, clamped into range.
    pub fn starting_at(len: usize, window: usize, index: usize) -> Self {
        let mut carousel = Self::new(len, window);
        carousel.index = index.min(carousel.max_index());
        carousel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn max_index(&self) -> usize {
        self.len.saturating_sub(self.window)
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index < self.max_index()
    }

    /// Advance one card. Returns whether the cursor moved.
    pub fn next_card(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back one card. Returns whether the cursor moved.
    pub fn prev_card(&mut self) -> bool {
        if self.has_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Indices of the cards currently in view.
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.index..(self.index + self.window).min(self.len)
    }
}
