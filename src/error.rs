use crate::{Point, Rect};
use thiserror::Error;

/// Rejected arguments. The offending value is handed back to the caller.
#[derive(Debug, Clone, Copy, Error)]
pub enum Error {
    #[error("invalid point {0:?}: coordinates must be finite")]
    InvalidPoint(Point),

    #[error("invalid rectangle {0:?}: bounds must be finite with min <= max")]
    InvalidRect(Rect),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_point(point: Point) -> Result<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Error::InvalidPoint(point))
    }
}

pub(crate) fn check_rect(rect: Rect) -> Result<Rect> {
    if rect.is_valid() {
        Ok(rect)
    } else {
        Err(Error::InvalidRect(rect))
    }
}
