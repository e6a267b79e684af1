//! Axis-aligned rectangle overlap tests and minimum-overlap resolution
//!
//! All solid geometry in the game is axis-aligned: actors are rectangles and
//! level collision is a grid of 16x16 tiles. Resolution picks the axis of
//! minimum penetration, with the comparison order below acting as the
//! tie-break.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB intersection test (touching edges do not overlap)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.pos.x
            && self.pos.x < other.right()
            && self.bottom() > other.pos.y
            && self.pos.y < other.bottom()
    }

    /// Penetration depth along each axis direction against `block`.
    ///
    /// Only meaningful when the rectangles overlap; all four depths are
    /// positive in that case.
    pub fn overlap_depths(&self, block: &Aabb) -> OverlapDepths {
        OverlapDepths {
            top: self.bottom() - block.pos.y,
            bottom: block.bottom() - self.pos.y,
            left: self.right() - block.pos.x,
            right: block.right() - self.pos.x,
        }
    }
}

/// How far the actor has sunk into a block from each side
#[derive(Debug, Clone, Copy)]
pub struct OverlapDepths {
    /// Actor bottom past block top (landing)
    pub top: f32,
    /// Block bottom past actor top (head bump)
    pub bottom: f32,
    /// Actor right past block left
    pub left: f32,
    /// Block right past actor left
    pub right: f32,
}

/// Axis selected by minimum-overlap resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAxis {
    Top,
    Bottom,
    Left,
    Right,
}

impl OverlapDepths {
    /// True when the top depth is the minimum, ties included.
    ///
    /// This is the only case the grounding-only resolver acts on.
    pub fn grounds(&self) -> bool {
        self.top <= self.bottom && self.top <= self.left && self.top <= self.right
    }

    /// Axis of strictly-minimum overlap.
    ///
    /// Each axis must beat every other axis outright; an exact tie between
    /// the two smallest depths resolves to `None` and leaves the actor
    /// where it is. Matches the full resolver's comparison chain.
    pub fn min_axis(&self) -> Option<ResolveAxis> {
        if self.top < self.bottom && self.top < self.left && self.top < self.right {
            Some(ResolveAxis::Top)
        } else if self.bottom < self.top && self.bottom < self.left && self.bottom < self.right {
            Some(ResolveAxis::Bottom)
        } else if self.left < self.right && self.left < self.top && self.left < self.bottom {
            Some(ResolveAxis::Left)
        } else if self.right < self.left && self.right < self.top && self.right < self.bottom {
            Some(ResolveAxis::Right)
        } else {
            None
        }
    }
}
