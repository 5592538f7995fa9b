mod cursor;

pub use cursor::Cursor;

use crate::draw::{Canvas, Color};
use crate::error::{check_point, check_rect, Result};
use crate::{Axis, Point, Rect};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace, warn};

/// Slices longer than this are split across threads when building in bulk
pub const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Inserts landing deeper than this are logged, the tree is degrading into a list
pub const DEGENERATE_DEPTH: usize = 1 << 10;

type Link = Option<Box<Node>>;

struct Node {
    key: Point,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: Point) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// Child on the side of `point`, and the one on the other side.
    /// Ties on the splitting coordinate are decided by the other coordinate.
    fn sides(&self, axis: Axis, point: &Point) -> (&Link, &Link) {
        if point.cmp_on(axis, &self.key) == Ordering::Greater {
            (&self.right, &self.left)
        } else {
            (&self.left, &self.right)
        }
    }
}

/// Set of points organised as a 2d-tree.
///
/// Every point in the left subtree of a node compares less than or equal to the node's key on
/// the node's splitting axis, every point in the right subtree greater. The root splits on x,
/// its children on y, and so forth.
pub struct KdTree {
    root: Link,
    len: usize,
    // number of levels
    height: usize,
    domain: Rect,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.len)
            .field("height", &self.height)
            .field("domain", &self.domain)
            .finish()
    }
}

impl Drop for KdTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl KdTree {
    /// Empty tree over the unit square
    pub fn new() -> Self {
        Self::with_domain(Rect::UNIT)
    }

    /// Empty tree whose root covers `domain`.
    /// The domain only bounds the rectangles handed out by [`KdTree::cells`] and the drawing;
    /// points outside of it are still accepted.
    pub fn with_domain(domain: Rect) -> Self {
        assert!(domain.is_valid(), "invalid domain {:?}", domain);
        Self {
            root: None,
            len: 0,
            height: 0,
            domain,
        }
    }

    pub fn from_points<It>(points: It) -> Result<Self>
    where
        It: IntoIterator<Item = Point>,
    {
        Self::from_points_in(Rect::UNIT, points)
    }

    /// Build a balanced tree holding `points`. Duplicates are stored once.
    pub fn from_points_in<It>(domain: Rect, points: It) -> Result<Self>
    where
        It: IntoIterator<Item = Point>,
    {
        let mut points = points
            .into_iter()
            .map(check_point)
            .collect::<Result<Vec<_>>>()?;
        points.sort_unstable_by(Point::cmp_x);
        points.dedup();

        let mut tree = Self::with_domain(domain);
        let (root, height) = build(points.as_mut_slice(), Axis::X);
        tree.root = root;
        tree.len = points.len();
        tree.height = height;
        debug!(len = tree.len, height, "built balanced tree");
        Ok(tree)
    }

    /// Insert the points one by one, stopping at the first invalid one
    pub fn extend<It>(&mut self, points: It) -> Result<()>
    where
        It: IntoIterator<Item = Point>,
    {
        for p in points {
            self.insert(p)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, 0 for an empty tree
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn domain(&self) -> Rect {
        self.domain
    }

    pub fn clear(&mut self) {
        // dropping a long chain of boxes recursively may blow the stack
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
        self.height = 0;
    }

    /// Return whether the point was added; `false` if an equal point is already present.
    pub fn insert(&mut self, point: Point) -> Result<bool> {
        let point = check_point(point)?;

        let mut link = &mut self.root;
        let mut axis = Axis::X;
        let mut depth = 0;
        while let Some(node) = link {
            if node.key == point {
                return Ok(false);
            }
            link = if point.cmp_on(axis, &node.key) == Ordering::Greater {
                &mut node.right
            } else {
                &mut node.left
            };
            axis = axis.flip();
            depth += 1;
        }
        *link = Some(Box::new(Node::new(point)));
        self.len += 1;

        trace!(?point, depth, "inserted");
        if depth >= self.height {
            self.height = depth + 1;
            if self.height == DEGENERATE_DEPTH + 1 {
                warn!(
                    len = self.len,
                    height = self.height,
                    "tree is degenerating, consider building it with from_points"
                );
            }
        }
        Ok(true)
    }

    pub fn contains(&self, point: Point) -> Result<bool> {
        let point = check_point(point)?;

        let mut link = &self.root;
        let mut axis = Axis::X;
        while let Some(node) = link {
            if node.key == point {
                return Ok(true);
            }
            link = node.sides(axis, &point).0;
            axis = axis.flip();
        }
        Ok(false)
    }

    /// Every point inside `rect`, boundary included, in no particular order.
    ///
    /// The traversal is lazy; a subtree is entered only if `rect` reaches across the parent's
    /// splitting line into it.
    pub fn range(&self, rect: Rect) -> Result<Range<'_>> {
        let rect = check_rect(rect)?;
        Ok(Range {
            rect,
            stack: self.root.as_deref().map(|n| (n, Axis::X)).into_iter().collect(),
        })
    }

    /// The stored point closest to `query`, `None` if the tree is empty.
    ///
    /// The subtree on the query's side of a splitting line is searched first. The other one is
    /// skipped unless the squared distance from the query to the splitting line is strictly
    /// smaller than the best distance found so far. That line distance only looks at the
    /// splitting coordinate, so it is a looser bound than the distance to the subtree's rectangle.
    pub fn nearest(&self, query: Point) -> Result<Option<Point>> {
        let query = check_point(query)?;

        let mut champion = None;
        let mut best = f64::INFINITY;

        // (node, axis, lower bound on the distance of anything in the subtree)
        let mut stack: Vec<(&Node, Axis, f64)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, Axis::X, f64::NEG_INFINITY)));
        while let Some((node, axis, bound)) = stack.pop() {
            if bound >= best {
                continue;
            }
            let d = query.dist_sq(&node.key);
            // far apart points may overflow to an infinite distance, the first one still counts
            if champion.is_none() || d < best {
                best = d;
                champion = Some(node.key);
            }

            let a = axis.index();
            let line = query[a] - node.key[a];
            let (near, far) = node.sides(axis, &query);
            // far goes under near so it is only looked at once near is exhausted
            if let Some(far) = far.as_deref() {
                stack.push((far, axis.flip(), line * line));
            }
            if let Some(near) = near.as_deref() {
                stack.push((near, axis.flip(), f64::NEG_INFINITY));
            }
        }
        Ok(champion)
    }

    /// Every stored point, parents before children
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    /// Every stored point together with the traversal context of its node: the splitting axis
    /// and the rectangle of the node's subtree, starting from the domain at the root.
    pub fn cells(&self) -> Cells<'_> {
        let root = Cursor::root(self.domain);
        Cells {
            stack: self.root.as_deref().map(|n| (n, root)).into_iter().collect(),
        }
    }

    /// Debug rendering: the domain border and the points in black, x-splits as red vertical
    /// segments and y-splits as blue horizontal segments, clipped to their node's rectangle.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.border(&self.domain);
        for (key, cursor) in self.cells() {
            canvas.point(key);
            let (from, to) = cursor.split_line(&key);
            let color = match cursor.axis {
                Axis::X => Color::Red,
                Axis::Y => Color::Blue,
            };
            canvas.line(from, to, color);
        }
    }
}

/// Balanced subtree of `points`, which must be distinct. Returns the subtree and its height.
fn build(points: &mut [Point], axis: Axis) -> (Link, usize) {
    if points.is_empty() {
        return (None, 0);
    }
    let len = points.len();
    let mid = len / 2;
    points.select_nth_unstable_by(mid, |a, b| a.cmp_on(axis, b));

    let (lo, rest) = points.split_at_mut(mid);
    let key = rest[0];
    let hi = &mut rest[1..];
    let next = axis.flip();
    let ((left, lh), (right, rh)) = if len > PARALLEL_THRESHOLD {
        rayon::join(|| build(lo, next), || build(hi, next))
    } else {
        (build(lo, next), build(hi, next))
    };

    let node = Node { key, left, right };
    (Some(Box::new(node)), 1 + lh.max(rh))
}

/// Lazy result of [`KdTree::range`]
pub struct Range<'a> {
    rect: Rect,
    stack: Vec<(&'a Node, Axis)>,
}

impl<'a> Iterator for Range<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while let Some((node, axis)) = self.stack.pop() {
            let a = axis.index();
            let may_go_left = self.rect.min[a] <= node.key[a];
            let may_go_right = self.rect.max[a] >= node.key[a];

            if may_go_right {
                if let Some(right) = node.right.as_deref() {
                    self.stack.push((right, axis.flip()));
                }
            }
            if may_go_left {
                if let Some(left) = node.left.as_deref() {
                    self.stack.push((left, axis.flip()));
                }
            }
            if self.rect.contains(&node.key) {
                return Some(node.key);
            }
        }
        None
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(node.key)
    }
}

pub struct Cells<'a> {
    stack: Vec<(&'a Node, Cursor)>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (Point, Cursor);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, cursor) = self.stack.pop()?;
        let (left, right) = cursor.children(&node.key);
        self.stack.extend(node.right.as_deref().map(|n| (n, right)));
        self.stack.extend(node.left.as_deref().map(|n| (n, left)));
        Some((node.key, cursor))
    }
}
