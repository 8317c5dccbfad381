//! Green-time allocator validation
//!
//! Exercises the proportional-fair split, its tie-breaks, and the
//! ambulance-priority policy.

use signal_grid::simulation::{allocate, fair_split, AllocationPolicy, Direction};

#[test]
fn test_zero_queues_split_evenly_with_remainder_to_north() {
    assert_eq!(fair_split(&[0, 0, 0, 0], 30), [9, 7, 7, 7]);
    assert_eq!(fair_split(&[0, 0, 0, 0], 32), [8, 8, 8, 8]);
    assert_eq!(fair_split(&[0, 0, 0, 0], 3), [3, 0, 0, 0]);
}

#[test]
fn test_split_always_sums_to_cycle_seconds() {
    let vectors: [[u32; 4]; 7] = [
        [0, 0, 0, 0],
        [10, 0, 0, 0],
        [1, 1, 1, 1],
        [1, 2, 3, 4],
        [50, 1, 1, 1],
        [0, 200, 3, 0],
        [7, 7, 7, 7],
    ];
    for queues in vectors {
        for cycle_seconds in 1..=60 {
            let times = fair_split(&queues, cycle_seconds);
            let sum: u32 = times.iter().sum();
            assert_eq!(
                sum, cycle_seconds,
                "queues {:?}, cycle {}: got {:?}",
                queues, cycle_seconds, times
            );
        }
    }
}

#[test]
fn test_every_direction_keeps_a_second_once_traffic_exists() {
    let times = fair_split(&[40, 0, 0, 0], 30);
    assert_eq!(times, [27, 1, 1, 1]);
}

#[test]
fn test_rounding_drift_is_clawed_back_from_the_smallest_queue() {
    // Shares round to 19 + 6 + 1 + 1 = 27; the two extra seconds come off
    // the South queue (smallest among those above the floor), not North.
    assert_eq!(fair_split(&[9, 3, 0, 0], 25), [19, 4, 1, 1]);

    // Equal quarters round 7.5 up to 8 each; North gives both seconds back
    // as the first tie in compass order.
    assert_eq!(fair_split(&[1, 1, 1, 1], 30), [6, 8, 8, 8]);
}

#[test]
fn test_shortfall_is_topped_up_on_the_largest_queue() {
    assert_eq!(fair_split(&[1, 1, 1, 4], 10), [1, 1, 1, 7]);
}

#[test]
fn test_ambulance_priority_ignores_the_queue_state() {
    let allocation = allocate(
        AllocationPolicy::AmbulancePriority(Direction::East),
        &[12, 40, 0, 3],
        30,
    );
    assert_eq!(allocation.times, [0, 0, 30, 0]);
    assert_eq!(allocation.green, Direction::East);
}

#[test]
fn test_fair_green_takes_the_largest_share_first_in_compass_order() {
    // Equal 8-second shares: the first direction in N,S,E,W order wins.
    let allocation = allocate(AllocationPolicy::Fair, &[0, 0, 0, 0], 32);
    assert_eq!(allocation.green, Direction::North);

    let allocation = allocate(AllocationPolicy::Fair, &[1, 5, 2, 1], 27);
    assert_eq!(allocation.times, [3, 15, 6, 3]);
    assert_eq!(allocation.green, Direction::South);
}
