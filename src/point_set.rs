//! Brute-force point set. Same contract as [`crate::KdTree`]: logarithmic membership, linear
//! range and nearest-neighbour scans. Meant as a reference to compare the tree against.
use crate::draw::Canvas;
use crate::error::{check_point, check_rect, Result};
use crate::{Point, Rect};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// `Point` under the x order. Only finite points are ever wrapped, so the order is total.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Key(Point);

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_x(&other.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointSet {
    set: BTreeSet<Key>,
}

impl PointSet {
    pub fn new() -> Self {
        Self {
            set: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Return whether the point was added
    pub fn insert(&mut self, point: Point) -> Result<bool> {
        let point = check_point(point)?;
        Ok(self.set.insert(Key(point)))
    }

    pub fn contains(&self, point: Point) -> Result<bool> {
        let point = check_point(point)?;
        Ok(self.set.contains(&Key(point)))
    }

    pub fn range(&self, rect: Rect) -> Result<Vec<Point>> {
        let rect = check_rect(rect)?;
        Ok(self.iter().filter(|p| rect.contains(p)).collect())
    }

    pub fn nearest(&self, query: Point) -> Result<Option<Point>> {
        let query = check_point(query)?;

        let mut champion = None;
        let mut best = f64::INFINITY;
        for p in self.iter() {
            let d = p.dist_sq(&query);
            if champion.is_none() || d < best {
                best = d;
                champion = Some(p);
            }
        }
        Ok(champion)
    }

    /// Points in x order
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.set.iter().map(|k| k.0)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for p in self.iter() {
            canvas.point(p);
        }
    }
}
