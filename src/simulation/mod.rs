//! Standalone grid traffic simulation module
//!
//! All core simulation logic lives here: grid topology and routing,
//! per-intersection queue state, green-time allocation, and the cycle
//! simulator. It runs headless; the CLI binary supplies configuration and
//! renders the per-cycle snapshots.

mod allocator;
mod config;
mod grid;
mod intersection;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use allocator::{allocate, fair_split, AllocationPolicy, GreenAllocation};
#[allow(unused_imports)]
pub use config::{AmbulanceEvent, SimConfig};
#[allow(unused_imports)]
pub use grid::SimGrid;
#[allow(unused_imports)]
pub use intersection::SimIntersection;
#[allow(unused_imports)]
pub use types::{Direction, NodeId};
#[allow(unused_imports)]
pub use world::{AmbulanceRoutes, CycleSnapshot, SimWorld, SimulationMetrics, SimulationReport};
