use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::offset::Offset;

// ---------------------------------------------------------------------------
// Point – a chromaticity coordinate
// ---------------------------------------------------------------------------

/// A CIE 1931 (x, y) chromaticity coordinate. No identity beyond its
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// PosValue / PositionKey – die location on the map
// ---------------------------------------------------------------------------

/// One half of a position key. Measurement exports carry die positions either
/// as map indices (integers) or as wafer-region labels (strings); both must
/// join exactly across datasets, so floats are deliberately not representable
/// here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for PosValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosValue::Int(i) => write!(f, "{i}"),
            PosValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for PosValue {
    fn from(i: i64) -> Self {
        PosValue::Int(i)
    }
}

impl From<&str> for PosValue {
    fn from(s: &str) -> Self {
        PosValue::Text(s.to_string())
    }
}

/// The two-field die location used to pair measurements across datasets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    pub pos_x: PosValue,
    pub pos_y: PosValue,
}

impl PositionKey {
    pub fn new(pos_x: impl Into<PosValue>, pos_y: impl Into<PosValue>) -> Self {
        PositionKey {
            pos_x: pos_x.into(),
            pos_y: pos_y.into(),
        }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pos_x, self.pos_y)
    }
}

// ---------------------------------------------------------------------------
// Row – one measured die
// ---------------------------------------------------------------------------

/// A single measured unit (one row of the source table).
///
/// `bin_code` is the tester's pre-classification and is used only as a row
/// filter. The optional attributes feed production-distribution statistics;
/// absent values map to the missing bin label downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub pos: PositionKey,
    pub ciex: f64,
    pub ciey: f64,
    pub bin_code: String,
    pub peak_wavelength: Option<f64>,
    pub luminous_flux: Option<f64>,
    pub forward_voltage: Option<f64>,
}

impl Row {
    /// The measured chromaticity coordinate, untranslated.
    pub fn point(&self) -> Point {
        Point::new(self.ciex, self.ciey)
    }
}

// ---------------------------------------------------------------------------
// Dataset – one named collection of rows
// ---------------------------------------------------------------------------

/// A named collection of measured rows, one per uploaded source. Datasets are
/// independent of each other; row order is ingestion order and is the stable
/// processing order for every downstream computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Dataset {
            name: name.into(),
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The sorted set of distinct bin codes present in this dataset.
    pub fn bin_codes(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.bin_code.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Coordinates – raw vs. recentered coordinate mode
// ---------------------------------------------------------------------------

/// Which coordinates a computation should see.
///
/// The offset is carried by value so that classification, occupancy
/// statistics, and regression all consume the *same* translation for a given
/// row selection. Compute it once via [`crate::offset::offset_for_selection`]
/// and pass the resulting mode everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coordinates {
    /// Use the measured coordinates as-is.
    Raw,
    /// Translate every measured coordinate by the given offset. Zone
    /// geometry is never translated.
    Shifted(Offset),
}

impl Coordinates {
    /// Resolve a measured point to the coordinate this mode classifies.
    pub fn resolve(&self, point: Point) -> Point {
        match self {
            Coordinates::Raw => point,
            Coordinates::Shifted(offset) => offset.apply(point),
        }
    }
}
