//! Grid topology and route search
//!
//! Builds the 4-neighbor adjacency graph for an R x C grid and answers
//! shortest-path queries over it. Both route variants run A* with a null
//! heuristic, which is plain Dijkstra; they differ only in edge cost.

use anyhow::{bail, Result};
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::{Direction, NodeId};

/// The immutable grid road graph.
///
/// Nodes are laid out row-major; every pair of cardinal neighbors is
/// connected by a directed arc in each direction, so adjacency is symmetric
/// with equal weight. No diagonals, no wraparound. Built once at simulation
/// start and read-only afterwards.
pub struct SimGrid {
    rows: usize,
    cols: usize,

    /// The underlying petgraph directed graph.
    graph: DiGraph<NodeId, ()>,

    /// Maps node ids to their indices in the graph.
    node_to_index: HashMap<NodeId, NodeIndex>,

    /// Maps graph indices back to node ids.
    index_to_node: HashMap<NodeIndex, NodeId>,
}

impl SimGrid {
    /// Build the topology for a `rows x cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            bail!("grid dimensions must be positive (got {}x{})", rows, cols);
        }

        let mut graph = DiGraph::new();
        let mut node_to_index = HashMap::new();
        let mut index_to_node = HashMap::new();

        for id in 0..rows * cols {
            let node = NodeId(id);
            let index = graph.add_node(node);
            node_to_index.insert(node, index);
            index_to_node.insert(index, node);
        }

        let node_at = |row: usize, col: usize| NodeId(row * cols + col);
        for row in 0..rows {
            for col in 0..cols {
                let from = node_to_index[&node_at(row, col)];
                for direction in Direction::ALL {
                    let (dr, dc) = direction.offset();
                    let (nr, nc) = (row as isize + dr, col as isize + dc);
                    if nr >= 0 && (nr as usize) < rows && nc >= 0 && (nc as usize) < cols {
                        let to = node_to_index[&node_at(nr as usize, nc as usize)];
                        graph.add_edge(from, to, ());
                    }
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            graph,
            node_to_index,
            index_to_node,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of grid nodes.
    pub fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// The node at the given grid coordinates.
    #[allow(dead_code)]
    pub fn node_at(&self, row: usize, col: usize) -> NodeId {
        NodeId(row * self.cols + col)
    }

    /// Grid coordinates of a node.
    pub fn coords(&self, node: NodeId) -> (usize, usize) {
        (node.index() / self.cols, node.index() % self.cols)
    }

    /// Whether the id names a node on this grid.
    #[allow(dead_code)]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Directly reachable neighbors of a node.
    #[allow(dead_code)]
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let Some(index) = self.node_to_index.get(&node) else {
            return Vec::new();
        };
        self.graph
            .neighbors(*index)
            .map(|neighbor| self.index_to_node[&neighbor])
            .collect()
    }

    /// Hop-count shortest path from `source` to `destination`, inclusive of
    /// both endpoints. `source == destination` yields the single-node path.
    /// Returns `None` only if the destination is unreachable, which cannot
    /// happen for two valid nodes of a connected grid.
    pub fn shortest_path(&self, source: NodeId, destination: NodeId) -> Option<Vec<NodeId>> {
        self.search(source, destination, |_| 1)
    }

    /// Congestion-aware shortest path: entering node `v` costs
    /// `1 + congestion[v] / divisor`, which shifts the route away from busy
    /// intersections as queues build. `congestion` holds each node's total
    /// queue length at search time, indexed by node id, so two calls issued
    /// at different cycles may return different paths over the same grid.
    pub fn congestion_aware_path(
        &self,
        source: NodeId,
        destination: NodeId,
        congestion: &[u32],
        divisor: u32,
    ) -> Option<Vec<NodeId>> {
        self.search(source, destination, |entered| {
            1 + congestion.get(entered.index()).copied().unwrap_or(0) / divisor
        })
    }

    /// Dijkstra via petgraph's A* with a null heuristic. `enter_cost` prices
    /// an edge by the node it leads into.
    fn search<F>(
        &self,
        source: NodeId,
        destination: NodeId,
        mut enter_cost: F,
    ) -> Option<Vec<NodeId>>
    where
        F: FnMut(NodeId) -> u32,
    {
        let start = self.node_to_index.get(&source)?;
        let goal = self.node_to_index.get(&destination)?;

        let (_, path) = astar(
            &self.graph,
            *start,
            |index| index == *goal,
            |edge| enter_cost(self.index_to_node[&edge.target()]),
            |_| 0,
        )?;

        Some(
            path.into_iter()
                .map(|index| self.index_to_node[&index])
                .collect(),
        )
    }
}
