//! Zone-edge slope and ideal-line geometry: supporting math for the
//! "ideal bin line" overlay drawn through a target point, parallel to the
//! ascending edges of the zone the point falls in.

use serde::{Deserialize, Serialize};

use crate::data::model::Point;
use crate::zone::{Zone, ZoneCatalog};

/// Slopes are rounded to this many decimal digits before de-duplication so
/// the two ascending edges of a parallelogram merge into one slope.
const SLOPE_DECIMALS: i32 = 6;

/// Half-width of the rendered ideal line around its anchor x, in
/// chromaticity units. Wide enough to span a zone quad.
pub const IDEAL_LINE_HALF_WIDTH: f64 = 0.02;

// ---------------------------------------------------------------------------
// Containing-zone lookup
// ---------------------------------------------------------------------------

/// The first zone in catalog declaration order containing `point`, if any.
///
/// Declaration order is the documented tie-break for points inside several
/// overlapping zones; callers relying on a different priority must reorder
/// their catalog.
pub fn find_containing_zone<'a>(point: Point, catalog: &'a ZoneCatalog) -> Option<&'a Zone> {
    catalog.zones().iter().find(|zone| zone.contains(point))
}

// ---------------------------------------------------------------------------
// Positive edge slope
// ---------------------------------------------------------------------------

/// Outcome of the positive-edge-slope computation on a quadrilateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PositiveSlope {
    /// Exactly one distinct positive finite slope: the zone behaves as a
    /// parallelogram with one ascending edge direction.
    Unique(f64),
    /// The zone is not a parallelogram and several distinct positive slopes
    /// survive rounding. Which one is "the" edge direction is undefined, so
    /// the ambiguity is surfaced instead of picking one.
    Ambiguous(Vec<f64>),
}

/// Distinct positive finite edge slopes of a quadrilateral zone, after
/// rounding to 6 decimals.
///
/// Returns `None` for non-quadrilateral zones and for quads with no
/// ascending non-vertical edge. Vertical edges (undefined slope) are
/// excluded by an explicit branch, never a division fault.
pub fn positive_edge_slope(zone: &Zone) -> Option<PositiveSlope> {
    if zone.vertices.len() != 4 {
        return None;
    }

    let factor = 10f64.powi(SLOPE_DECIMALS);
    let mut slopes: Vec<f64> = Vec::with_capacity(4);
    for i in 0..4 {
        let a = zone.vertices[i];
        let b = zone.vertices[(i + 1) % 4];
        if b.x == a.x {
            continue; // vertical edge, undefined slope
        }
        let slope = ((b.y - a.y) / (b.x - a.x) * factor).round() / factor;
        if slope > 0.0 && !slopes.contains(&slope) {
            slopes.push(slope);
        }
    }

    match slopes.len() {
        0 => None,
        1 => Some(PositiveSlope::Unique(slopes[0])),
        _ => Some(PositiveSlope::Ambiguous(slopes)),
    }
}

// ---------------------------------------------------------------------------
// Ideal line
// ---------------------------------------------------------------------------

/// A line through an anchor point with a given slope, sampled for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealLine {
    pub slope: f64,
    pub intercept: f64,
    /// Human-readable equation, e.g. `y = 1.8519x + -0.242922`.
    pub equation: String,
    /// Two sample points at anchor x ± [`IDEAL_LINE_HALF_WIDTH`].
    pub endpoints: [Point; 2],
}

/// Line through `point` with `slope`, sampled at x ± the fixed half-width.
/// Purely a presentation helper for the chart overlay.
pub fn ideal_line(point: Point, slope: f64) -> IdealLine {
    let intercept = point.y - slope * point.x;
    let xs = [point.x - IDEAL_LINE_HALF_WIDTH, point.x + IDEAL_LINE_HALF_WIDTH];
    IdealLine {
        slope,
        intercept,
        equation: format!("y = {slope:.4}x + {intercept:.6}"),
        endpoints: [
            Point::new(xs[0], slope * xs[0] + intercept),
            Point::new(xs[1], slope * xs[1] + intercept),
        ],
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::zone::presets::ncsp_catalog;

    #[test]
    fn containing_zone_uses_declaration_order() {
        let catalog = ZoneCatalog::new(
            "overlap",
            [
                ("FIRST", vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
                ("SECOND", vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]),
            ],
        )
        .unwrap();
        let zone = find_containing_zone(Point::new(0.5, 0.5), &catalog).unwrap();
        assert_eq!(zone.name, "FIRST");
        assert!(find_containing_zone(Point::new(5.0, 5.0), &catalog).is_none());
    }

    #[test]
    fn parallelogram_has_a_unique_positive_slope() {
        let catalog = ncsp_catalog().unwrap();
        let dk32 = catalog.get("DK32").unwrap();
        // Ascending edges of DK32 rise 0.005 over 0.0027.
        match positive_edge_slope(dk32).unwrap() {
            PositiveSlope::Unique(slope) => {
                assert_relative_eq!(slope, 0.005 / 0.0027, epsilon = 1e-6);
            }
            other => panic!("expected a unique slope, got {other:?}"),
        }
    }

    #[test]
    fn non_parallelogram_is_ambiguous() {
        let zone = Zone::new(
            "SKEW",
            [(0.0, 0.0), (1.0, 1.0), (2.0, 0.9), (1.0, -2.0)],
        )
        .unwrap();
        match positive_edge_slope(&zone).unwrap() {
            PositiveSlope::Ambiguous(slopes) => assert!(slopes.len() >= 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn vertical_and_flat_edges_are_excluded() {
        // Axis-aligned rectangle: two vertical edges, two horizontal.
        let zone = Zone::new("RECT", [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        assert!(positive_edge_slope(&zone).is_none());
    }

    #[test]
    fn triangle_is_not_eligible() {
        let zone = Zone::new("TRI", [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]).unwrap();
        assert!(positive_edge_slope(&zone).is_none());
    }

    #[test]
    fn ideal_line_passes_through_the_anchor() {
        let anchor = Point::new(0.2771, 0.26);
        let line = ideal_line(anchor, 1.8519);
        assert_relative_eq!(line.intercept, 0.26 - 1.8519 * 0.2771, epsilon = 1e-12);
        assert_relative_eq!(line.endpoints[0].x, 0.2571, epsilon = 1e-12);
        assert_relative_eq!(line.endpoints[1].x, 0.2971, epsilon = 1e-12);
        for p in &line.endpoints {
            assert_relative_eq!(p.y, line.slope * p.x + line.intercept, epsilon = 1e-12);
        }
        assert!(line.equation.starts_with("y = 1.8519x"));
    }
}
