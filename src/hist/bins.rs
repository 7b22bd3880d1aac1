//! Uniform percentage bins.

use crate::error::Error;

/// A uniform binning of the percentage domain: `k = round(100 / width)` bins
/// with centers `0, w, 2w, .., 100 - w` and edges offset half a width below,
/// so integer percentages land in the middle of a bin.
///
/// Indexing follows the usual histogram convention: bins are half-open on the
/// right except the last, whose right edge is inclusive; values outside the
/// edge range fall into no bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    width: f64,
    count: usize,
}

impl BinGrid {
    /// Validates `width` and derives the bin count. Non-finite, non-positive,
    /// or over-100 widths are invalid.
    pub fn new(width: f64) -> Result<Self, Error> {
        if !width.is_finite() || width <= 0.0 || width > 100.0 {
            return Err(Error::InvalidParameter(format!(
                "bin width must be in (0, 100], got {width}"
            )));
        }
        let count = (100.0 / width).round() as usize;
        Ok(Self { width, count })
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bin width in percentage points.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The `k` bin midpoints, starting at 0.
    pub fn centers(&self) -> Vec<f64> {
        (0..self.count).map(|i| i as f64 * self.width).collect()
    }

    /// The `k + 1` bin boundaries, from `-width/2` upward.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.count)
            .map(|i| i as f64 * self.width - self.width / 2.0)
            .collect()
    }

    /// The bin containing `value`, or `None` when it falls outside the edges.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        let half = self.width / 2.0;
        let top = self.count as f64 * self.width - half;
        if !value.is_finite() || value < -half || value > top {
            return None;
        }
        let index = ((value + half) / self.width).floor() as usize;
        Some(index.min(self.count - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::BinGrid;

    #[test]
    fn quarter_point_grid_shape() {
        let grid = BinGrid::new(0.25).unwrap();
        assert_eq!(grid.len(), 400);

        let centers = grid.centers();
        assert_eq!(centers.len(), 400);
        assert_eq!(centers[0], 0.0);
        assert!((centers[399] - 99.75).abs() < 1e-9);

        let edges = grid.edges();
        assert_eq!(edges.len(), 401);
        assert!((edges[0] + 0.125).abs() < 1e-9);
    }

    #[test]
    fn ten_point_grid_shape() {
        let grid = BinGrid::new(10.0).unwrap();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.centers(), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
    }

    #[test]
    fn centers_map_to_their_own_bin() {
        let grid = BinGrid::new(0.5).unwrap();
        for (index, center) in grid.centers().iter().enumerate() {
            assert_eq!(grid.index_of(*center), Some(index));
        }
    }

    #[test]
    fn edge_semantics() {
        let grid = BinGrid::new(10.0).unwrap();
        // Left edge of the first bin is inclusive.
        assert_eq!(grid.index_of(-5.0), Some(0));
        assert_eq!(grid.index_of(-5.0001), None);
        // Interior edges belong to the bin on their right.
        assert_eq!(grid.index_of(5.0), Some(1));
        assert_eq!(grid.index_of(4.9999), Some(0));
        // The final right edge is inclusive, anything past it is dropped.
        assert_eq!(grid.index_of(95.0), Some(9));
        assert_eq!(grid.index_of(95.0001), None);
    }

    #[test]
    fn fifty_percent_lands_mid_grid() {
        let grid = BinGrid::new(10.0).unwrap();
        assert_eq!(grid.index_of(50.0), Some(5));
        assert_eq!(grid.centers()[5], 50.0);
    }

    #[test]
    fn invalid_widths_are_rejected() {
        assert!(BinGrid::new(0.0).is_err());
        assert!(BinGrid::new(-1.0).is_err());
        assert!(BinGrid::new(150.0).is_err());
        assert!(BinGrid::new(f64::NAN).is_err());
        assert!(BinGrid::new(f64::INFINITY).is_err());
    }
}
