// SPDX-License-Identifier: MIT
//! # Output Sizes and the Power-of-Two Ladder
//!
//! Output resolutions come from one of two targets:
//! 1. **PowerOfTwo**: a descending ladder of power-of-two sizes, one file per rung
//! 2. **Exact**: a single caller-chosen size, not necessarily a power of two
//!
//! ## Ladder Rules
//!
//! - Each axis starts at `2^floor(log2(dim))`, computed independently
//! - Every following rung halves both axes with integer division
//! - The first rung is unconditional; later rungs need both axes `>= min`
//! - A minimum of 0 is treated as 1 so no rung is ever zero-sized

use std::fmt;
use std::iter::FusedIterator;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Number of pixels covered by this size.
    pub fn area(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Both axes halved (integer division).
    pub fn halved(self) -> Self {
        Self {
            w: self.w / 2,
            h: self.h / 2,
        }
    }

    /// Largest power-of-two size not exceeding `self` on each axis.
    pub fn lower_power_of_two(self) -> Self {
        Self {
            w: lower_power_of_two(self.w),
            h: lower_power_of_two(self.h),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Largest power of two `<= v`, i.e. `2^floor(log2(v))`. Returns 0 for 0.
pub fn lower_power_of_two(v: u32) -> u32 {
    if v == 0 {
        0
    } else {
        1 << (u32::BITS - 1 - v.leading_zeros())
    }
}

/// Defines which output sizes a conversion produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleTarget {
    /// Descending power-of-two ladder down to `min_dimension`.
    PowerOfTwo { min_dimension: u32 },
    /// One output at exactly this size.
    Exact(Size),
}

/// Lazy, finite power-of-two resolution ladder.
///
/// Behaves like a do-while loop: the first rung is yielded unconditionally,
/// and each later rung only if both of its axes are at least the minimum.
#[derive(Clone, Debug)]
pub struct Pow2Ladder {
    next: Option<Size>,
    min_dimension: u32,
}

impl Pow2Ladder {
    pub fn new(source: Size, min_dimension: u32) -> Self {
        let first = source.lower_power_of_two();
        Self {
            next: (!first.is_empty()).then_some(first),
            min_dimension: min_dimension.max(1),
        }
    }
}

impl Iterator for Pow2Ladder {
    type Item = Size;

    fn next(&mut self) -> Option<Size> {
        let current = self.next.take()?;
        let half = current.halved();
        if half.w >= self.min_dimension && half.h >= self.min_dimension {
            self.next = Some(half);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(_) => (1, None),
        }
    }
}

impl FusedIterator for Pow2Ladder {}
