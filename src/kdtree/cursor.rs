use crate::{Axis, Point, Rect};

/// Where a traversal stands: the splitting axis of the current node and the rectangle its
/// subtree is confined to. Neither is stored on the nodes; both follow from the path taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub axis: Axis,
    pub bounds: Rect,
    pub depth: usize,
}

impl Cursor {
    pub fn root(bounds: Rect) -> Self {
        Self {
            axis: Axis::X,
            bounds,
            depth: 0,
        }
    }

    /// Cursors of the left and the right child of the node keyed `key`
    pub fn children(&self, key: &Point) -> (Cursor, Cursor) {
        let (lower, upper) = self.bounds.split(self.axis, key[self.axis.index()]);
        let step = |bounds| Cursor {
            axis: self.axis.flip(),
            bounds,
            depth: self.depth + 1,
        };
        (step(lower), step(upper))
    }

    /// The splitting segment of `key`, clipped to the current bounds
    pub fn split_line(&self, key: &Point) -> (Point, Point) {
        let a = self.axis.index();
        let mut from = self.bounds.min;
        let mut to = self.bounds.max;
        from.0[a] = key[a];
        to.0[a] = key[a];
        (from, to)
    }
}
