use crate::axis::Axis;
use crate::point::Point;

/// Row-major walk over a `rows x cols` plane at a fixed depth.
///
/// The plane is oriented on `axis`, so the same loop body visits X, Y or Z
/// slices without the caller juggling component order.
#[derive(Debug, Clone)]
pub struct PlaneIter {
    axis: Axis,
    depth: i32,
    rows: i32,
    cols: i32,
    row: i32,
    col: i32,
}

impl PlaneIter {
    pub fn new(axis: Axis, depth: i32, rows: i32, cols: i32) -> Self {
        Self {
            axis,
            depth,
            rows: rows.max(0),
            cols: cols.max(0),
            row: 0,
            col: 0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Iterator for PlaneIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.cols == 0 || self.row >= self.rows {
            return None;
        }
        let p = Point::on(self.axis, self.row, self.col, self.depth);
        self.col += 1;
        if self.col == self.cols {
            self.col = 0;
            self.row += 1;
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cols == 0 || self.row >= self.rows {
            0
        } else {
            let cells = (self.rows - self.row) as u64 * self.cols as u64 - self.col as u64;
            usize::try_from(cells).unwrap_or(usize::MAX)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PlaneIter {}
