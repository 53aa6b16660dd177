//! Generate a deterministic synthetic production batch and print the yield
//! report the library computes for it: zone occupancy, wavelength
//! distribution, and per-lot regression, in both raw and recentered modes.

use std::collections::BTreeSet;

use anyhow::Result;

use chromabin::analysis::{distribution, occupancy, regression};
use chromabin::data::filter::select_all;
use chromabin::data::model::{Coordinates, Dataset, PositionKey, Row};
use chromabin::offset::offset_for_selection;
use chromabin::zone::presets::{ncsp_catalog, wavelength_bins, DEFAULT_TARGET_CENTER};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn generate_lot(name: &str, center: (f64, f64), rows: usize, rng: &mut SimpleRng) -> Dataset {
    let rows = (0..rows)
        .map(|i| {
            let ciex = rng.gauss(center.0, 0.0020);
            let ciey = rng.gauss(center.1, 0.0018);
            Row {
                pos: PositionKey::new((i % 40) as i64, (i / 40) as i64),
                ciex,
                ciey,
                bin_code: "DK32".to_string(),
                peak_wavelength: Some(rng.gauss(452.0, 2.5)),
                luminous_flux: Some(rng.gauss(3.5, 0.25)),
                forward_voltage: Some(rng.gauss(5.7, 0.12)),
            }
        })
        .collect();
    Dataset::new(name, rows)
}

fn print_report(title: &str, report: &occupancy::OccupancyReport) {
    println!("\n== Zone occupancy ({title}) ==");
    for occ in &report.per_dataset {
        println!("{} ({} rows)", occ.dataset, occ.total);
        for (zone, tally) in &occ.zones {
            println!("  {zone:<10} {:>5}  {:>6.2}%", tally.count, tally.percentage);
        }
        println!(
            "  {:<10} {:>5}  {:>6.2}%",
            occupancy::NO_MATCH_LABEL,
            occ.unmatched.count,
            occ.unmatched.percentage
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let datasets = vec![
        generate_lot("lot_A", (0.2780, 0.2672), 400, &mut rng),
        generate_lot("lot_B", (0.2762, 0.2641), 400, &mut rng),
    ];

    let catalog = ncsp_catalog()?;
    let selection = select_all(&datasets);
    let zones: BTreeSet<String> = catalog.zone_names().into_iter().map(String::from).collect();

    let raw = occupancy::aggregate(&datasets, &selection, &zones, &catalog, Coordinates::Raw);
    print_report("raw", &raw);

    let offset = offset_for_selection(&datasets, &selection, DEFAULT_TARGET_CENTER);
    println!(
        "\nRecentering offset onto {}: ({:+.6}, {:+.6})",
        DEFAULT_TARGET_CENTER, offset.dx, offset.dy
    );
    let moved = occupancy::aggregate(
        &datasets,
        &selection,
        &zones,
        &catalog,
        Coordinates::Shifted(offset),
    );
    print_report("recentered", &moved);

    println!("\n== Wavelength distribution ==");
    let bins = wavelength_bins()?;
    for dist in distribution::production_distribution(&moved.rows, &bins) {
        println!("{} ({} rows)", dist.dataset, dist.total);
        for row in &dist.rows {
            if row.count > 0 {
                println!("  {:<13} {:>5}  {:>6.2}%", row.label.to_string(), row.count, row.percentage);
            }
        }
        if let Some(dominant) = dist.dominant_bin() {
            println!("  dominant: {} ({:.2}%)", dominant.label, dominant.percentage);
        }
    }

    println!("\n== Regression (recentered coordinates) ==");
    for (name, fit) in regression::regress_datasets(&datasets, &selection, Coordinates::Shifted(offset)) {
        println!(
            "{name}: slope {:.4}, intercept {:.6}, R² {:.4}, p {:.3e}, stderr {:.4}, rss {:.3e}",
            fit.slope, fit.intercept, fit.r_squared, fit.p_value, fit.std_err, fit.rss
        );
    }

    Ok(())
}
