/// Analysis layer: pure transforms over filtered datasets.
///
/// Architecture:
/// ```text
///   Dataset + BinSelection ──┬──▶ occupancy    zone membership, yield table
///                            ├──▶ distribution bin histograms, cross-tabs
///                            ├──▶ regression   OLS fit of ciey on ciex
///                            └──▶ colordiff    paired Δx, Δy, distance
/// ```
/// All transforms share the same row abstraction and, when "moved"
/// coordinates are requested, the same explicitly-passed offset.
pub mod colordiff;
pub mod distribution;
pub mod occupancy;
pub mod regression;
