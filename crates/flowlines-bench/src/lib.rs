//! Benchmark profiles for the Flowlines toolkit.
//!
//! - [`reference_profile`]: the default visualization settings
//! - [`stress_profile`]: a denser grid and longer runs
//! - [`ring_seeds`]: deterministic seeds on a circle

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flowlines::{GridSpec, VisualizationConfig};
use flowlines_core::Vec2;

/// The default visualization: 200x200 grid, 3 seeds x 800 steps, 500
/// streak ticks.
pub fn reference_profile() -> VisualizationConfig {
    VisualizationConfig::default()
}

/// 1000x1000 grid, 64 seeds x 5000 steps, 5000 streak ticks emitting every
/// tick.
pub fn stress_profile() -> VisualizationConfig {
    let mut config = VisualizationConfig::default();
    config.grid = GridSpec {
        resolution: 1000,
        ..GridSpec::default()
    };
    config.pathlines.steps = 5000;
    config.pathlines.seeds = ring_seeds(64, 1.0);
    config.streaklines.steps = 5000;
    config.streaklines.emission_period = 1;
    config
}

/// `count` seeds evenly spaced on a circle of `radius` about the origin.
pub fn ring_seeds(count: usize, radius: f64) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / count as f64;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}
