//! CLI smoke tests
//!
//! Runs the binary the way a user would and checks the rendered output and
//! logged summary.

use std::process::Command;

#[test]
fn test_headless_run_logs_the_completion_summary() {
    let output = Command::new("cargo")
        .args([
            "run", "--quiet", "--", "--rows", "2", "--cols", "2", "--cycles", "3", "--seed", "42",
        ])
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to execute simulation");

    assert!(
        output.status.success(),
        "simulation failed to run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "missing completion banner. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Total vehicles arrived:"));
    assert!(stderr.contains("Total vehicles served:"));
    assert!(stderr.contains("Average post-cycle queue length:"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Initial network state:"));
    assert!(stdout.contains("=== Cycle 3 Network State ==="));
}

#[test]
fn test_ambulance_flags_print_both_routes() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--quiet",
            "--",
            "--rows",
            "1",
            "--cols",
            "2",
            "--cycles",
            "1",
            "--max-arrival-per-lane",
            "0",
            "--initial-queue-max",
            "0",
            "--ambulance-cycle",
            "1",
            "--ambulance-from",
            "0",
            "--ambulance-to",
            "1",
        ])
        .output()
        .expect("failed to execute simulation");

    assert!(
        output.status.success(),
        "simulation failed to run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ambulance route (distance): 0 -> 1"));
    assert!(stdout.contains("Ambulance route (congestion-aware): 0 -> 1"));
    assert!(stdout.contains("G:E"));
}

#[test]
fn test_out_of_range_ambulance_node_fails_fast() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--quiet",
            "--",
            "--rows",
            "2",
            "--cols",
            "2",
            "--ambulance-cycle",
            "1",
            "--ambulance-from",
            "0",
            "--ambulance-to",
            "9",
        ])
        .output()
        .expect("failed to execute simulation");

    assert!(
        !output.status.success(),
        "an out-of-range destination must be rejected at startup"
    );
}
