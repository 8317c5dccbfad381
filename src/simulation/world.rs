//! Main simulation world that ties everything together
//!
//! One `run_cycle` call advances the whole grid by exactly one cycle:
//! arrivals, optional ambulance routing, allocation + service, and metric
//! accumulation. Each step completes for every node before the next step
//! starts: these are cycle-wide barriers, not per-node interleaving.

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::allocator::{allocate, AllocationPolicy};
use super::config::{AmbulanceEvent, SimConfig};
use super::grid::SimGrid;
use super::intersection::SimIntersection;
use super::types::{Direction, NodeId};

/// Process-scoped accumulators across all simulated cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationMetrics {
    /// Vehicles that arrived at any lane, across all cycles.
    pub total_arrived: u64,
    /// Vehicles served (departed), across all cycles.
    pub total_served: u64,
    /// Sum of every node's post-service queue total, every cycle.
    pub cumulative_queue_sum: u64,
}

/// Both routes computed on an ambulance cycle, as inclusive node sequences.
#[derive(Debug, Clone)]
pub struct AmbulanceRoutes {
    /// Hop-count shortest route.
    pub distance_path: Vec<NodeId>,
    /// Route biased away from congested intersections; the one the
    /// ambulance follows.
    pub congestion_path: Vec<NodeId>,
}

/// Read-only view of the grid after one simulated cycle.
#[derive(Debug, Clone)]
pub struct CycleSnapshot {
    /// 1-based cycle number.
    pub cycle: u32,
    pub intersections: Vec<SimIntersection>,
    /// Present only on the cycle the ambulance event fired.
    pub ambulance: Option<AmbulanceRoutes>,
}

/// End-of-run scalars exposed to the caller.
#[derive(Debug, Clone, Copy)]
pub struct SimulationReport {
    pub total_arrived: u64,
    pub total_served: u64,
    /// Average post-cycle queue length per node; 0.0 when no cycles ran.
    pub average_queue_length: f64,
}

/// The main simulation world.
///
/// Sole writer of intersection state; the grid topology is read-only after
/// construction.
pub struct SimWorld {
    config: SimConfig,

    /// Grid topology and route search.
    pub grid: SimGrid,

    /// All intersections, indexed by node id.
    pub intersections: Vec<SimIntersection>,

    metrics: SimulationMetrics,

    /// Cycles simulated so far.
    cycles_run: u32,

    /// Optional seeded RNG for reproducible simulations.
    rng: Option<StdRng>,
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: Option<StdRng>) -> Result<Self> {
        config.validate()?;

        if let Some(event) = &config.ambulance {
            if event.trigger_cycle > config.cycles {
                warn!(
                    "ambulance trigger cycle {} is beyond the configured {} cycles; the event will never fire",
                    event.trigger_cycle, config.cycles
                );
            }
        }

        let grid = SimGrid::new(config.rows, config.cols)?;
        let intersections = (0..grid.node_count())
            .map(|id| SimIntersection::new(NodeId(id)))
            .collect();

        let mut world = Self {
            config,
            grid,
            intersections,
            metrics: SimulationMetrics::default(),
            cycles_run: 0,
            rng,
        };

        if world.config.initial_queue_max > 0 {
            let max = world.config.initial_queue_max;
            for index in 0..world.intersections.len() {
                for direction in Direction::ALL {
                    let initial = world.random_range(0..=max);
                    world.intersections[index].queues[direction.index()] = initial;
                }
            }
        }

        Ok(world)
    }

    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_internal(config, None)
    }

    /// Create a world with a seeded RNG for reproducible simulations.
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, Some(StdRng::seed_from_u64(seed)))
    }

    /// Get a random value in the given range, using the seeded RNG if available.
    fn random_range(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[allow(dead_code)]
    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// Cycles simulated so far.
    pub fn cycles_run(&self) -> u32 {
        self.cycles_run
    }

    /// Advance the whole grid by exactly one cycle.
    pub fn run_cycle(&mut self) -> Result<CycleSnapshot> {
        let cycle = self.cycles_run + 1;

        // Overrides are only valid for the cycle the ambulance crosses.
        for intersection in &mut self.intersections {
            intersection.clear_ambulance_override();
        }

        // Arrival: every node takes in traffic before any node is served.
        let max_arrival = self.config.max_arrival_per_lane;
        for index in 0..self.intersections.len() {
            for direction in Direction::ALL {
                let arrived = self.random_range(0..=max_arrival);
                self.intersections[index].queues[direction.index()] += arrived;
                self.metrics.total_arrived += arrived as u64;
            }
        }

        // Routing: mark the ambulance's outbound direction at every node it
        // leaves, before any allocation happens.
        let scheduled = self.config.ambulance;
        let ambulance = match scheduled {
            Some(event) if event.trigger_cycle == cycle => Some(self.route_ambulance(event)?),
            _ => None,
        };

        // Allocation + service, per intersection independently.
        let cycle_seconds = self.config.cycle_seconds;
        let service_rate = self.config.service_rate;
        for intersection in &mut self.intersections {
            let policy = match intersection.ambulance_override {
                Some(direction) => AllocationPolicy::AmbulancePriority(direction),
                None => AllocationPolicy::Fair,
            };
            let allocation = allocate(policy, &intersection.queues, cycle_seconds);
            intersection.green_direction = Some(allocation.green);

            for direction in Direction::ALL {
                let seconds = allocation.times[direction.index()];
                let capacity = (service_rate * seconds as f64 + 1e-9).floor() as u32;
                let served = capacity.min(intersection.queues[direction.index()]);
                intersection.queues[direction.index()] -= served;
                self.metrics.total_served += served as u64;
            }

            self.metrics.cumulative_queue_sum += intersection.total_queue() as u64;
        }

        self.cycles_run = cycle;
        debug!(
            "cycle {}: arrived={} served={} cumulative_queue_sum={}",
            cycle,
            self.metrics.total_arrived,
            self.metrics.total_served,
            self.metrics.cumulative_queue_sum
        );

        Ok(CycleSnapshot {
            cycle,
            intersections: self.intersections.clone(),
            ambulance,
        })
    }

    /// Compute both candidate routes for the scheduled ambulance crossing and
    /// mark override flags along the congestion-aware one.
    fn route_ambulance(&mut self, event: AmbulanceEvent) -> Result<AmbulanceRoutes> {
        let congestion: Vec<u32> = self
            .intersections
            .iter()
            .map(|intersection| intersection.total_queue())
            .collect();

        let distance_path = self
            .grid
            .shortest_path(event.source, event.destination)
            .context("no hop-count route between two valid grid nodes")?;
        let congestion_path = self
            .grid
            .congestion_aware_path(
                event.source,
                event.destination,
                &congestion,
                self.config.congestion_divisor,
            )
            .context("no congestion-aware route between two valid grid nodes")?;

        for pair in congestion_path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let direction = Direction::between(self.grid.coords(from), self.grid.coords(to))
                .context("route step between non-adjacent nodes")?;
            self.intersections[from.index()].set_ambulance_override(direction);
        }

        Ok(AmbulanceRoutes {
            distance_path,
            congestion_path,
        })
    }

    /// End-of-run scalars. The average is per node per cycle and defined as
    /// zero when no cycles ran.
    pub fn report(&self) -> SimulationReport {
        let average_queue_length = if self.cycles_run == 0 {
            0.0
        } else {
            self.metrics.cumulative_queue_sum as f64
                / (self.cycles_run as f64 * self.grid.node_count() as f64)
        };
        SimulationReport {
            total_arrived: self.metrics.total_arrived,
            total_served: self.metrics.total_served,
            average_queue_length,
        }
    }
}
