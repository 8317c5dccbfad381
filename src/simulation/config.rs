//! Simulation configuration and construction-time validation
//!
//! Every invalid configuration is rejected here, before any cycle runs; the
//! cycle simulator itself raises no recoverable errors.

use anyhow::{bail, Result};

use super::types::NodeId;

/// A scheduled emergency-vehicle crossing.
#[derive(Debug, Clone, Copy)]
pub struct AmbulanceEvent {
    /// 1-based cycle on which the ambulance crosses the grid.
    pub trigger_cycle: u32,
    pub source: NodeId,
    pub destination: NodeId,
}

/// Full configuration surface for one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of cycles the caller intends to simulate.
    pub cycles: u32,
    /// Signal time distributed among the four directions each cycle.
    pub cycle_seconds: u32,
    /// Vehicles served per second of green time.
    pub service_rate: f64,
    /// Upper bound (inclusive) of the uniform per-lane arrival draw.
    pub max_arrival_per_lane: u32,
    /// Queue total that adds one hop of routing cost: entering a node costs
    /// `1 + total_queue / congestion_divisor`.
    pub congestion_divisor: u32,
    /// Upper bound (inclusive) of the initial per-lane queue draw; 0 starts
    /// the grid empty.
    pub initial_queue_max: u32,
    /// Optional scheduled ambulance crossing.
    pub ambulance: Option<AmbulanceEvent>,
}

impl Default for SimConfig {
    /// Defaults mirror the classic interactive run: one 30-second cycle on a
    /// 2x2 grid at 0.5 vehicles/second, with randomized initial traffic.
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            cycles: 1,
            cycle_seconds: 30,
            service_rate: 0.5,
            max_arrival_per_lane: 5,
            congestion_divisor: 5,
            initial_queue_max: 19,
            ambulance: None,
        }
    }
}

impl SimConfig {
    /// Reject every invalid configuration before the simulation starts.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            bail!(
                "grid dimensions must be positive (got {}x{})",
                self.rows,
                self.cols
            );
        }
        if self.cycles == 0 {
            bail!("cycle count must be positive");
        }
        if self.cycle_seconds == 0 {
            bail!("cycle duration must be positive");
        }
        if !(self.service_rate.is_finite() && self.service_rate > 0.0) {
            bail!(
                "service rate must be a positive number (got {})",
                self.service_rate
            );
        }
        if self.congestion_divisor == 0 {
            bail!("congestion divisor must be positive");
        }
        if let Some(event) = &self.ambulance {
            let node_count = self.rows * self.cols;
            if event.trigger_cycle == 0 {
                bail!("ambulance trigger cycle is 1-based and must be positive");
            }
            if event.source.index() >= node_count {
                bail!(
                    "ambulance source node {} is outside the {}-node grid",
                    event.source,
                    node_count
                );
            }
            if event.destination.index() >= node_count {
                bail!(
                    "ambulance destination node {} is outside the {}-node grid",
                    event.destination,
                    node_count
                );
            }
        }
        Ok(())
    }
}
