//! Chromaticity zone classification and yield statistics for LED production.
//!
//! The crate is a stateless computation library: callers supply in-memory
//! [`data::model::Dataset`]s (one per measurement export) and a
//! [`zone::ZoneCatalog`] of color-specification polygons, and get back
//! classification labels, per-zone yield tables, bin histograms, regression
//! fits, and paired color differences. File ingestion and chart rendering
//! live outside this crate.
//!
//! Typical flow:
//! ```
//! use chromabin::analysis::occupancy;
//! use chromabin::data::filter::select_all;
//! use chromabin::data::model::{Coordinates, Dataset};
//! use chromabin::offset::offset_for_selection;
//! use chromabin::zone::presets::{ncsp_catalog, DEFAULT_TARGET_CENTER};
//!
//! let datasets: Vec<Dataset> = vec![/* supplied by the ingestion layer */];
//! let catalog = ncsp_catalog().unwrap();
//! let selection = select_all(&datasets);
//! let zones = catalog.zone_names().into_iter().map(String::from).collect();
//!
//! // One offset per selection, threaded everywhere "moved" results are used.
//! let offset = offset_for_selection(&datasets, &selection, DEFAULT_TARGET_CENTER);
//! let report = occupancy::aggregate(
//!     &datasets,
//!     &selection,
//!     &zones,
//!     &catalog,
//!     Coordinates::Shifted(offset),
//! );
//! assert!(report.per_dataset.is_empty());
//! ```

pub mod analysis;
pub mod bins;
pub mod cache;
pub mod data;
pub mod error;
pub mod geometry;
pub mod offset;
pub mod zone;

pub use analysis::colordiff::{color_difference, ColorDiffRow};
pub use analysis::distribution::{cross_tabulate, production_distribution, CrossTab, Distribution};
pub use analysis::occupancy::{aggregate, OccupancyReport, NO_MATCH_LABEL};
pub use analysis::regression::{regress, regress_datasets, RegressionResult};
pub use bins::{value_to_bin, BinAttribute, BinLabel, BinSet};
pub use data::model::{Coordinates, Dataset, Point, PositionKey, Row};
pub use error::ConfigError;
pub use geometry::{find_containing_zone, ideal_line, positive_edge_slope, PositiveSlope};
pub use offset::{compute_offset, offset_for_selection, Offset};
pub use zone::{Zone, ZoneCatalog};
