//! Grid Signal Simulation Library
//!
//! Simulates traffic flow over a rectangular grid of signalized
//! intersections, cycle by cycle, including emergency-vehicle routing and
//! signal priority.

pub mod simulation;
