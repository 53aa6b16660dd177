//! Color-specification zones and point-in-polygon classification.
//!
//! A [`Zone`] is a named simple polygon in chromaticity space; a
//! [`ZoneCatalog`] is an ordered collection of zones for one product family.
//! Catalog declaration order is significant: it is the documented tie-break
//! for the first-match containing-zone lookup in [`crate::geometry`].

pub mod presets;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::model::Point;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Zone – one named polygon
// ---------------------------------------------------------------------------

/// A named polygon in chromaticity space. The vertex sequence defines the
/// boundary with implicit closure (last vertex connects back to the first).
/// Zone geometry is immutable catalog data; classification and recentering
/// never move it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub vertices: Vec<Point>,
}

impl Zone {
    /// Build a zone, rejecting degenerate polygons (<3 vertices).
    pub fn new(
        name: impl Into<String>,
        vertices: impl IntoIterator<Item = impl Into<Point>>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let vertices: Vec<Point> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() < 3 {
            return Err(ConfigError::DegenerateZone {
                name,
                count: vertices.len(),
            });
        }
        Ok(Zone { name, vertices })
    }

    /// Ray-casting containment test.
    ///
    /// An edge crosses the horizontal ray from `point` when exactly one of
    /// its endpoints lies strictly above the point's y. For crossing edges
    /// the `<=` comparison against the intersection x makes points on those
    /// edges classify as inside; this boundary convention keeps zone-edge
    /// adjacency symmetric with the catalog's intended tiling and must not
    /// be "improved". Horizontal edges never satisfy the crossing test, so
    /// the division by Δy is always safe.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y > point.y) != (b.y > point.y) {
                let x_intersect = (point.y - a.y) * (b.x - a.x) / (b.y - a.y) + a.x;
                if point.x <= x_intersect {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

// ---------------------------------------------------------------------------
// ZoneCatalog – the ordered zone collection for one product family
// ---------------------------------------------------------------------------

/// An ordered, immutable mapping from zone name to polygon, scoped to one
/// product family or sub-type. Iteration order is declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    pub name: String,
    zones: Vec<Zone>,
}

impl ZoneCatalog {
    /// Build a catalog from (name, vertices) pairs, validating each zone.
    pub fn new(
        name: impl Into<String>,
        zones: impl IntoIterator<Item = (impl Into<String>, Vec<(f64, f64)>)>,
    ) -> Result<Self, ConfigError> {
        let zones = zones
            .into_iter()
            .map(|(zone_name, vertices)| Zone::new(zone_name, vertices))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ZoneCatalog {
            name: name.into(),
            zones,
        })
    }

    /// Parse a catalog from a JSON array of `{ "name": ..., "vertices":
    /// [[x, y], ...] }` objects. The array order becomes declaration order.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct ZoneDef {
            name: String,
            vertices: Vec<(f64, f64)>,
        }
        let defs: Vec<ZoneDef> = serde_json::from_str(json)?;
        Self::new(name, defs.into_iter().map(|d| (d.name, d.vertices)))
    }

    /// Zones in declaration order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look up a zone by name.
    pub fn get(&self, zone_name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == zone_name)
    }

    /// Zone names in declaration order.
    pub fn zone_names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    /// All zones from `selected` that contain `point`, in declaration order.
    ///
    /// Zones may overlap; every match is reported, none resolved. Selected
    /// names absent from the catalog are ignored.
    pub fn find_zones(&self, point: Point, selected: &BTreeSet<String>) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| selected.contains(&z.name) && z.contains(point))
            .map(|z| z.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Zone {
        Zone::new("SQ", [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn interior_and_exterior_points() {
        let sq = unit_square();
        assert!(sq.contains(Point::new(0.5, 0.5)));
        assert!(!sq.contains(Point::new(2.0, 2.0)));
        assert!(!sq.contains(Point::new(-0.1, 0.5)));
    }

    #[test]
    fn boundary_follows_the_le_convention() {
        let sq = unit_square();
        // (1, 0.5) lies on the right edge: the edge crosses the ray and
        // 1.0 <= 1.0 toggles, so the point is inside per the convention.
        assert!(sq.contains(Point::new(1.0, 0.5)));
        // (0, 0.5) on the left edge: both left and right edges toggle,
        // cancelling out — outside under the same convention.
        assert!(!sq.contains(Point::new(0.0, 0.5)));
    }

    #[test]
    fn horizontal_edges_do_not_divide_by_zero() {
        let sq = unit_square();
        // Ray at the exact height of the bottom edge.
        let p = Point::new(0.5, 0.0);
        // Must not panic; result follows the strict-> crossing test.
        let _ = sq.contains(p);
    }

    #[test]
    fn degenerate_zone_is_rejected() {
        let err = Zone::new("BAD", [(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DegenerateZone { count: 2, .. }
        ));
    }

    #[test]
    fn find_zones_reports_overlaps_in_declaration_order() {
        let catalog = ZoneCatalog::new(
            "test",
            [
                ("B", vec![(0.5, 0.0), (1.5, 0.0), (1.5, 1.0), (0.5, 1.0)]),
                ("A", vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            ],
        )
        .unwrap();
        let selected: BTreeSet<String> = ["A".to_string(), "B".to_string()].into();
        let hits = catalog.find_zones(Point::new(0.75, 0.5), &selected);
        assert_eq!(hits, vec!["B", "A"]);
    }

    #[test]
    fn find_zones_respects_the_selection() {
        let catalog = ZoneCatalog::new(
            "test",
            [("A", vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])],
        )
        .unwrap();
        let none: BTreeSet<String> = BTreeSet::new();
        assert!(catalog.find_zones(Point::new(0.5, 0.5), &none).is_empty());
    }

    #[test]
    fn catalog_parses_from_json() {
        let json = r#"[
            { "name": "DK32", "vertices": [[0.2743, 0.265], [0.277, 0.27], [0.2825, 0.27], [0.2798, 0.265]] }
        ]"#;
        let catalog = ZoneCatalog::from_json("custom", json).unwrap();
        assert_eq!(catalog.zone_names(), vec!["DK32"]);
        assert!(catalog.get("DK32").unwrap().contains(Point::new(0.278, 0.267)));
    }

    #[test]
    fn catalog_construction_rejects_bad_zones() {
        let result = ZoneCatalog::new("bad", [("X", vec![(0.0, 0.0)])]);
        assert!(result.is_err());
    }
}
