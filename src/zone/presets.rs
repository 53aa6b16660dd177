//! Fixed production catalogs and bin sets.
//!
//! Zone vertices and bin ranges are specification constants from the color
//! engineering group; they are construction-validated like any caller-supplied
//! catalog but never change at runtime.

use crate::bins::{BinAttribute, BinSet};
use crate::data::model::Point;
use crate::error::ConfigError;

use super::ZoneCatalog;

/// Default recentering target: the shared DK33/DL33 corner of the NCSP grid.
pub const DEFAULT_TARGET_CENTER: Point = Point { x: 0.2771, y: 0.26 };

/// Finished-product (NCSP) color zones.
pub fn ncsp_catalog() -> Result<ZoneCatalog, ConfigError> {
    ZoneCatalog::new(
        "NCSP",
        [
            ("DK32", vec![(0.2743, 0.265), (0.277, 0.27), (0.2825, 0.27), (0.2798, 0.265)]),
            ("DK33", vec![(0.2715, 0.26), (0.2743, 0.265), (0.2798, 0.265), (0.2771, 0.26)]),
            ("DK34", vec![(0.2688, 0.255), (0.2715, 0.26), (0.2771, 0.26), (0.2743, 0.255)]),
            ("DK35", vec![(0.2661, 0.25), (0.2688, 0.255), (0.2743, 0.255), (0.2716, 0.25)]),
            ("DL32", vec![(0.2798, 0.265), (0.2825, 0.27), (0.288, 0.27), (0.2853, 0.265)]),
            ("DL33", vec![(0.2771, 0.26), (0.2798, 0.265), (0.2853, 0.265), (0.2826, 0.26)]),
            ("DL34", vec![(0.2743, 0.255), (0.2771, 0.26), (0.2826, 0.26), (0.2799, 0.255)]),
            ("DL35", vec![(0.2716, 0.25), (0.2743, 0.255), (0.2799, 0.255), (0.2771, 0.25)]),
            ("DM32", vec![(0.2853, 0.265), (0.288, 0.27), (0.2936, 0.27), (0.2908, 0.265)]),
            ("DM33", vec![(0.2826, 0.26), (0.2853, 0.265), (0.2908, 0.265), (0.2881, 0.26)]),
            ("DM34", vec![(0.2799, 0.255), (0.2826, 0.26), (0.2881, 0.26), (0.2854, 0.255)]),
            ("DM35", vec![(0.2771, 0.25), (0.2799, 0.255), (0.2854, 0.255), (0.2827, 0.25)]),
        ],
    )
}

/// CSP color zones, first-molding sub-type.
pub fn csp_molded_catalog() -> Result<ZoneCatalog, ConfigError> {
    ZoneCatalog::new(
        "CSP-M",
        [
            ("DK32_M", vec![(0.2999, 0.3401), (0.3026, 0.3451), (0.3081, 0.3451), (0.3054, 0.3401)]),
            ("DK33_M", vec![(0.2971, 0.3351), (0.2999, 0.3401), (0.3054, 0.3401), (0.3027, 0.3351)]),
            ("DK34_M", vec![(0.2944, 0.3301), (0.2971, 0.3351), (0.3027, 0.3351), (0.2999, 0.3301)]),
            ("DK35_M", vec![(0.2917, 0.3251), (0.2944, 0.3301), (0.2999, 0.3301), (0.2972, 0.3251)]),
            ("DL32_M", vec![(0.3054, 0.3401), (0.3081, 0.3451), (0.3136, 0.3451), (0.3109, 0.3401)]),
            ("DL33_M", vec![(0.3027, 0.3351), (0.3054, 0.3401), (0.3109, 0.3401), (0.3082, 0.3351)]),
            ("DL34_M", vec![(0.2999, 0.3301), (0.3027, 0.3351), (0.3082, 0.3351), (0.3055, 0.3301)]),
            ("DL35_M", vec![(0.2972, 0.3251), (0.2999, 0.3301), (0.3055, 0.3301), (0.3027, 0.3251)]),
        ],
    )
}

/// CSP color zones, dry-cut sub-type.
pub fn csp_dry_cut_catalog() -> Result<ZoneCatalog, ConfigError> {
    ZoneCatalog::new(
        "CSP-C",
        [
            ("DK32_C", vec![(0.3117, 0.3540), (0.3144, 0.3590), (0.3199, 0.3590), (0.3172, 0.3540)]),
            ("DK33_C", vec![(0.3089, 0.3490), (0.3117, 0.3540), (0.3172, 0.3540), (0.3145, 0.3490)]),
            ("DK34_C", vec![(0.3062, 0.3440), (0.3089, 0.3490), (0.3145, 0.3490), (0.3117, 0.3440)]),
            ("DK35_C", vec![(0.3035, 0.3390), (0.3062, 0.3440), (0.3117, 0.3440), (0.3090, 0.3390)]),
            ("DL32_C", vec![(0.3172, 0.3540), (0.3199, 0.3590), (0.3254, 0.3590), (0.3227, 0.3540)]),
            ("DL33_C", vec![(0.3145, 0.3490), (0.3172, 0.3540), (0.3227, 0.3540), (0.3200, 0.3490)]),
            ("DL34_C", vec![(0.3117, 0.3440), (0.3145, 0.3490), (0.3200, 0.3490), (0.3173, 0.3440)]),
            ("DL35_C", vec![(0.3090, 0.3390), (0.3117, 0.3440), (0.3173, 0.3440), (0.3145, 0.3390)]),
        ],
    )
}

/// Peak-wavelength production bins (nm).
pub fn wavelength_bins() -> Result<BinSet, ConfigError> {
    BinSet::new(
        "Wavelength",
        BinAttribute::PeakWavelength,
        [
            ("H", 446.0, 448.0),
            ("J", 448.0, 450.0),
            ("K", 450.0, 452.0),
            ("L", 452.0, 454.0),
            ("M", 454.0, 456.0),
            ("N", 456.0, 458.0),
            ("P", 458.0, 460.0),
        ],
    )
}

/// Luminous-flux production bins (lm).
pub fn flux_bins() -> Result<BinSet, ConfigError> {
    BinSet::new(
        "Brightness",
        BinAttribute::LuminousFlux,
        [
            ("CP", 2.8, 3.04),
            ("CQ", 3.04, 3.30),
            ("CR", 3.3, 3.59),
            ("CS", 3.59, 3.9),
            ("CT", 3.9, 4.19),
        ],
    )
}

/// Forward-voltage production bins (V).
pub fn voltage_bins() -> Result<BinSet, ConfigError> {
    BinSet::new(
        "Voltage",
        BinAttribute::ForwardVoltage,
        [("N4", 5.4, 5.6), ("S4", 5.6, 5.8), ("W4", 5.8, 6.0)],
    )
}
