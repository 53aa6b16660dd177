//! Scalar-to-bin mapping for secondary production attributes.
//!
//! A [`BinSet`] is an ordered list of named half-open intervals over one row
//! attribute. Mapping resolves to the first matching bin in declared order;
//! missing values and values outside every bin get dedicated sentinel labels
//! that can never collide with a real bin name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::Row;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// BinAttribute – which optional row field a bin set ranges over
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinAttribute {
    PeakWavelength,
    LuminousFlux,
    ForwardVoltage,
}

impl BinAttribute {
    /// Extract the attribute value from a row, if measured.
    pub fn of(&self, row: &Row) -> Option<f64> {
        match self {
            BinAttribute::PeakWavelength => row.peak_wavelength,
            BinAttribute::LuminousFlux => row.luminous_flux,
            BinAttribute::ForwardVoltage => row.forward_voltage,
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            BinAttribute::PeakWavelength => "nm",
            BinAttribute::LuminousFlux => "lm",
            BinAttribute::ForwardVoltage => "V",
        }
    }
}

// ---------------------------------------------------------------------------
// Bin / BinSet
// ---------------------------------------------------------------------------

/// A named half-open interval `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl Bin {
    fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

/// An ordered collection of bins over one attribute. Declared order drives
/// first-match resolution and output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSet {
    pub name: String,
    pub attribute: BinAttribute,
    bins: Vec<Bin>,
}

impl BinSet {
    /// Build a bin set from (name, min, max) triples, failing fast on empty
    /// intervals, overlapping bins, or a declared order that does not ascend
    /// by lower bound.
    pub fn new(
        name: impl Into<String>,
        attribute: BinAttribute,
        bins: impl IntoIterator<Item = (impl Into<String>, f64, f64)>,
    ) -> Result<Self, ConfigError> {
        let bins: Vec<Bin> = bins
            .into_iter()
            .map(|(bin_name, min, max)| Bin {
                name: bin_name.into(),
                min,
                max,
            })
            .collect();

        for bin in &bins {
            if !(bin.min < bin.max) {
                return Err(ConfigError::EmptyBin {
                    name: bin.name.clone(),
                    min: bin.min,
                    max: bin.max,
                });
            }
        }
        for pair in bins.windows(2) {
            if pair[1].min < pair[0].min {
                return Err(ConfigError::UnorderedBins {
                    name: pair[1].name.clone(),
                });
            }
            if pair[1].min < pair[0].max {
                return Err(ConfigError::OverlappingBins {
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        Ok(BinSet {
            name: name.into(),
            attribute,
            bins,
        })
    }

    /// Parse a bin set from a JSON array of `{ "name": ..., "min": ...,
    /// "max": ... }` objects; array order is the declared order.
    pub fn from_json(
        name: impl Into<String>,
        attribute: BinAttribute,
        json: &str,
    ) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct BinDef {
            name: String,
            min: f64,
            max: f64,
        }
        let defs: Vec<BinDef> = serde_json::from_str(json)?;
        Self::new(name, attribute, defs.into_iter().map(|d| (d.name, d.min, d.max)))
    }

    /// Bins in declared order.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

// ---------------------------------------------------------------------------
// BinLabel and the mapping itself
// ---------------------------------------------------------------------------

/// The outcome of mapping one value against a bin set. The two sentinels are
/// distinct variants, so they cannot collide with any real bin name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinLabel {
    Named(String),
    /// The attribute was not measured, or was NaN.
    Missing,
    /// A measured value outside every declared bin.
    OutOfRange,
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinLabel::Named(name) => write!(f, "{name}"),
            BinLabel::Missing => write!(f, "NaN"),
            BinLabel::OutOfRange => write!(f, "Out of Range"),
        }
    }
}

/// Map a value to the first bin (declared order) whose `[min, max)` interval
/// contains it. `None` and NaN map to [`BinLabel::Missing`]; values matching
/// no bin map to [`BinLabel::OutOfRange`].
pub fn value_to_bin(value: Option<f64>, binset: &BinSet) -> BinLabel {
    let value = match value {
        Some(v) if !v.is_nan() => v,
        _ => return BinLabel::Missing,
    };
    for bin in binset.bins() {
        if bin.contains(value) {
            return BinLabel::Named(bin.name.clone());
        }
    }
    BinLabel::OutOfRange
}
