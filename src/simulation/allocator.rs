//! Green-time allocation for one intersection and one cycle
//!
//! Pure functions with no side effects and no global state. The cycle
//! simulator resolves an [`AllocationPolicy`] per node per cycle and calls
//! [`allocate`] with it.

use super::types::Direction;

/// How the upcoming cycle's green time is split at one intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPolicy {
    /// Proportional-fair split over the four queues.
    Fair,
    /// An ambulance leaves this node in the given direction: the entire
    /// cycle goes to that direction and fairness is suspended.
    AmbulancePriority(Direction),
}

/// Outcome of allocation: per-direction seconds plus the recorded green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreenAllocation {
    /// Seconds granted per direction; always sums to the cycle duration.
    pub times: [u32; 4],
    /// Direction holding right-of-way this cycle.
    pub green: Direction,
}

/// Split `cycle_seconds` across the four directions under `policy`.
pub fn allocate(
    policy: AllocationPolicy,
    queues: &[u32; 4],
    cycle_seconds: u32,
) -> GreenAllocation {
    match policy {
        AllocationPolicy::AmbulancePriority(direction) => {
            let mut times = [0; 4];
            times[direction.index()] = cycle_seconds;
            GreenAllocation {
                times,
                green: direction,
            }
        }
        AllocationPolicy::Fair => {
            let times = fair_split(queues, cycle_seconds);
            GreenAllocation {
                times,
                green: largest_share(&times),
            }
        }
    }
}

/// Proportional-fair split of `cycle_seconds` over the four queues.
///
/// With no queued vehicles the cycle is split into equal quarters and the
/// integer-division remainder goes entirely to North. Otherwise every
/// direction gets `round(cycle_seconds * queue / total)` with a floor of one
/// second, and the total is reconciled back to exactly `cycle_seconds`:
/// over-allocation is clawed back from the smallest queues, shortfall is
/// topped up on the largest, ties resolved first-in-N,S,E,W both ways.
pub fn fair_split(queues: &[u32; 4], cycle_seconds: u32) -> [u32; 4] {
    let total: u32 = queues.iter().sum();
    if total == 0 {
        let mut times = [cycle_seconds / 4; 4];
        times[Direction::North.index()] += cycle_seconds % 4;
        return times;
    }

    let mut times = [0u32; 4];
    let mut assigned = 0u32;
    for i in 0..4 {
        let share = (queues[i] as f64 / total as f64) * cycle_seconds as f64;
        times[i] = (share.round() as u32).max(1);
        assigned += times[i];
    }

    // Claw back over-allocation from the least-loaded directions while the
    // one-second floor can still hold.
    while assigned > cycle_seconds {
        match smallest_queue_above(queues, &times, 1) {
            Some(i) => {
                times[i] -= 1;
                assigned -= 1;
            }
            None => break,
        }
    }
    // The floors cannot all hold when cycle_seconds < 4; relax them rather
    // than hand out more time than the cycle has.
    while assigned > cycle_seconds {
        match smallest_queue_above(queues, &times, 0) {
            Some(i) => {
                times[i] -= 1;
                assigned -= 1;
            }
            None => break,
        }
    }
    // Top up any shortfall on the most-loaded direction.
    while assigned < cycle_seconds {
        let i = largest_queue(queues);
        times[i] += 1;
        assigned += 1;
    }

    times
}

/// Direction index with the smallest queue among those allocated more than
/// `floor` seconds; the first match in N,S,E,W order wins ties.
fn smallest_queue_above(queues: &[u32; 4], times: &[u32; 4], floor: u32) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in 0..4 {
        if times[i] > floor && best.map_or(true, |b| queues[i] < queues[b]) {
            best = Some(i);
        }
    }
    best
}

/// Direction index with the largest queue; the first match wins ties.
fn largest_queue(queues: &[u32; 4]) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if queues[i] > queues[best] {
            best = i;
        }
    }
    best
}

/// Direction with the largest allocated share; first in N,S,E,W on ties.
fn largest_share(times: &[u32; 4]) -> Direction {
    let mut best = 0;
    for i in 1..4 {
        if times[i] > times[best] {
            best = i;
        }
    }
    Direction::ALL[best]
}
