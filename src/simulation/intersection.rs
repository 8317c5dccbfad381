//! Per-node intersection state
//!
//! One record per grid node, mutated in place every cycle by the simulator.

use super::types::{Direction, NodeId};

/// A signalized intersection in the grid.
#[derive(Debug, Clone)]
pub struct SimIntersection {
    pub id: NodeId,
    /// Vehicles waiting to depart this intersection, per outbound direction.
    pub queues: [u32; 4],
    /// Direction that received the largest (or overridden) share in the most
    /// recently simulated cycle; `None` before any cycle runs.
    pub green_direction: Option<Direction>,
    /// Outbound direction of an ambulance traversing this node during the
    /// current cycle; cleared at the start of every cycle.
    pub ambulance_override: Option<Direction>,
}

impl SimIntersection {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            queues: [0; 4],
            green_direction: None,
            ambulance_override: None,
        }
    }

    /// Vehicles queued across all four directions.
    pub fn total_queue(&self) -> u32 {
        self.queues.iter().sum()
    }

    /// Queue length for one direction.
    pub fn queue(&self, direction: Direction) -> u32 {
        self.queues[direction.index()]
    }

    /// Flag the outbound direction an ambulance will take through this node.
    /// The first flag set in a cycle wins; later calls are ignored.
    pub fn set_ambulance_override(&mut self, direction: Direction) {
        if self.ambulance_override.is_none() {
            self.ambulance_override = Some(direction);
        }
    }

    /// Clear the override at the start of a cycle.
    pub fn clear_ambulance_override(&mut self) {
        self.ambulance_override = None;
    }
}
