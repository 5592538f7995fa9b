//! 2d-tree.
//!
//! A mutable set of points in the plane, stored in a binary tree whose levels split on the x and
//! y coordinate in strictly alternating sequence.
//!
//! # Contracts:
//! - Coordinates must be finite. Points and rectangles that break this are rejected with
//!   [`Error`] before the tree is touched.
//! - The tree is never rebalanced; its shape depends on insertion order. Use
//!   [`KdTree::from_points`] to build a balanced tree from a known set.
//!
pub mod draw;
pub mod error;
pub mod kdtree;
pub mod point_set;

pub use draw::{Canvas, Color, Shape};
pub use error::{Error, Result};
pub use kdtree::KdTree;
pub use point_set::PointSet;

use std::cmp::Ordering;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Splitting axis of a tree level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
}

impl Axis {
    pub fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Axis used by the nodes at `depth`, the root being depth 0
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub [f64; 2]);

impl Deref for Point {
    type Target = [f64; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }

    pub fn dist_sq(&self, rhs: &Self) -> f64 {
        let x = self[0] - rhs[0];
        let y = self[1] - rhs[1];
        x * x + y * y
    }

    /// Order by x, ties broken by y.
    /// Total for finite coordinates and consistent with `==`, so `-0.0` and `0.0` tie.
    pub fn cmp_x(&self, rhs: &Self) -> Ordering {
        cmp_f64(self[0], rhs[0]).then_with(|| cmp_f64(self[1], rhs[1]))
    }

    /// Order by y, ties broken by x
    pub fn cmp_y(&self, rhs: &Self) -> Ordering {
        cmp_f64(self[1], rhs[1]).then_with(|| cmp_f64(self[0], rhs[0]))
    }

    pub fn cmp_on(&self, axis: Axis, rhs: &Self) -> Ordering {
        match axis {
            Axis::X => self.cmp_x(rhs),
            Axis::Y => self.cmp_y(rhs),
        }
    }

    /// Copy of `self` with the `axis` coordinate replaced by `value`
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.0[axis.index()] = value;
        self
    }
}

// NaN never gets past argument validation
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Closed axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Rect {
    pub const UNIT: Rect = Rect {
        min: Point([0.0, 0.0]),
        max: Point([1.0, 1.0]),
    };

    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Point::new(xmin, ymin),
            max: Point::new(xmax, ymax),
        }
    }

    pub fn xmin(&self) -> f64 {
        self.min[0]
    }
    pub fn ymin(&self) -> f64 {
        self.min[1]
    }
    pub fn xmax(&self) -> f64 {
        self.max[0]
    }
    pub fn ymax(&self) -> f64 {
        self.max[1]
    }

    /// Finite bounds with `min <= max` on both axes
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min[0] <= self.max[0]
            && self.min[1] <= self.max[1]
    }

    pub fn contains(&self, point: &Point) -> bool {
        let [x, y] = **point;
        self.min[0] <= x && self.min[1] <= y && x <= self.max[0] && y <= self.max[1]
    }

    /// Split along the line `axis = at` into the lower and the upper half.
    pub fn split(&self, axis: Axis, at: f64) -> (Rect, Rect) {
        let lower = Rect {
            min: self.min,
            max: self.max.with(axis, at),
        };
        let upper = Rect {
            min: self.min.with(axis, at),
            max: self.max,
        };
        (lower, upper)
    }
}
