//! Batch runs over many configurations.
//!
//! Each configuration is built and run to its own `sim_time` in isolation.
//! With the `parallel` feature the runs are spread over Rayon's thread pool;
//! the results come back in input order either way.

use hl_core::HarvestConfig;
use tracing::info;

use crate::{NoopObserver, RunSummary, SimBuilder, SimResult};

/// Run every configuration and summarise it.
///
/// An invalid configuration fails only its own slot.
pub fn run_sweep(configs: &[HarvestConfig]) -> Vec<SimResult<RunSummary>> {
    info!(runs = configs.len(), parallel = cfg!(feature = "parallel"), "sweep started");

    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        configs.par_iter().map(run_one).collect()
    }
}

/// Copies of `base` for every (drone count, fatigue threshold) pair, drone
/// count outermost.
pub fn grid(base: &HarvestConfig, drones: &[usize], thresholds: &[u32]) -> Vec<HarvestConfig> {
    drones
        .iter()
        .flat_map(|&num_drones| {
            thresholds.iter().map(move |&fatigue_threshold| HarvestConfig {
                num_drones,
                fatigue_threshold,
                ..base.clone()
            })
        })
        .collect()
}

fn run_one(config: &HarvestConfig) -> SimResult<RunSummary> {
    let mut sim = SimBuilder::new(config.clone()).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.summary())
}
