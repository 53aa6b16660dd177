//! Recentering: translate a selection of measured points so their mean lands
//! on a target center. Zones never move; only the points do.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::filter::{filtered_indices, BinSelection};
use crate::data::model::{Dataset, Point};

// ---------------------------------------------------------------------------
// Offset – a single (dx, dy) translation
// ---------------------------------------------------------------------------

/// A uniform translation vector, computed once per (row selection, target)
/// pair and passed by value to every downstream consumer via
/// [`crate::data::model::Coordinates::Shifted`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Offset { dx, dy }
    }

    /// Whether this offset leaves every point where it is.
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Translate a single point.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x + self.dx, point.y + self.dy)
    }
}

// ---------------------------------------------------------------------------
// Offset calculation
// ---------------------------------------------------------------------------

/// Offset that moves the arithmetic mean of `points` onto `target_center`.
///
/// Empty input yields [`Offset::ZERO`]: recentering is unavailable, not an
/// error, and callers render "no shift" rather than failing. For non-empty
/// input, applying the result to the same points makes their mean equal the
/// target to floating-point tolerance.
pub fn compute_offset(points: &[Point], target_center: Point) -> Offset {
    if points.is_empty() {
        return Offset::ZERO;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    Offset::new(target_center.x - mean_x, target_center.y - mean_y)
}

/// Offset over every bin-code-selected row across all supplied datasets.
///
/// One offset per selection: the same vector must serve classification,
/// occupancy statistics, and regression so that "moved" results stay mutually
/// consistent.
pub fn offset_for_selection(
    datasets: &[Dataset],
    selected_bin_codes: &BinSelection,
    target_center: Point,
) -> Offset {
    let points: Vec<Point> = datasets
        .iter()
        .flat_map(|ds| {
            filtered_indices(ds, selected_bin_codes)
                .into_iter()
                .map(|i| ds.rows[i].point())
                .collect::<Vec<_>>()
        })
        .collect();
    let offset = compute_offset(&points, target_center);
    debug!(
        "offset over {} selected rows: ({:+.6}, {:+.6})",
        points.len(),
        offset.dx,
        offset.dy
    );
    offset
}
