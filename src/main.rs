mod simulation;

use anyhow::Result;
use clap::Parser;
use log::info;

use simulation::{
    AmbulanceEvent, AmbulanceRoutes, Direction, NodeId, SimConfig, SimIntersection, SimWorld,
};

#[derive(Parser)]
#[command(name = "signal_grid")]
#[command(about = "Signalized grid traffic simulation with emergency routing")]
struct Cli {
    /// Grid rows
    #[arg(long, default_value = "2")]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value = "2")]
    cols: usize,

    /// Number of cycles to simulate
    #[arg(long, default_value = "1")]
    cycles: u32,

    /// Signal time per intersection per cycle, in seconds
    #[arg(long, default_value = "30")]
    cycle_seconds: u32,

    /// Vehicles served per second of green time
    #[arg(long, default_value = "0.5")]
    service_rate: f64,

    /// Largest per-lane arrival count drawn each cycle
    #[arg(long, default_value = "5")]
    max_arrival_per_lane: u32,

    /// Queue total that adds one hop of routing cost
    #[arg(long, default_value = "5")]
    congestion_divisor: u32,

    /// Largest initial per-lane queue; 0 starts the grid empty
    #[arg(long, default_value = "19")]
    initial_queue_max: u32,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Cycle (1-based) on which the ambulance crosses the grid
    #[arg(long, requires = "ambulance_from")]
    ambulance_cycle: Option<u32>,

    /// Node id the ambulance starts from
    #[arg(long, requires = "ambulance_to")]
    ambulance_from: Option<usize>,

    /// Node id the ambulance is headed to
    #[arg(long, requires = "ambulance_cycle")]
    ambulance_to: Option<usize>,
}

impl Cli {
    fn to_config(&self) -> SimConfig {
        let ambulance = match (self.ambulance_cycle, self.ambulance_from, self.ambulance_to) {
            (Some(trigger_cycle), Some(from), Some(to)) => Some(AmbulanceEvent {
                trigger_cycle,
                source: NodeId(from),
                destination: NodeId(to),
            }),
            _ => None,
        };
        SimConfig {
            rows: self.rows,
            cols: self.cols,
            cycles: self.cycles,
            cycle_seconds: self.cycle_seconds,
            service_rate: self.service_rate,
            max_arrival_per_lane: self.max_arrival_per_lane,
            congestion_divisor: self.congestion_divisor,
            initial_queue_max: self.initial_queue_max,
            ambulance,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.to_config();

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    println!("\nInitial network state:");
    print_network_state(0, &world.intersections, world.grid.rows(), world.grid.cols());

    for _ in 0..cli.cycles {
        let snapshot = world.run_cycle()?;
        if let Some(routes) = &snapshot.ambulance {
            print_ambulance_routes(routes);
        }
        print_network_state(
            snapshot.cycle,
            &snapshot.intersections,
            world.grid.rows(),
            world.grid.cols(),
        );
    }

    let report = world.report();
    info!("=== SIMULATION COMPLETE ===");
    info!("Cycles simulated: {}", world.cycles_run());
    info!("Total vehicles arrived: {}", report.total_arrived);
    info!("Total vehicles served: {}", report.total_served);
    info!(
        "Average post-cycle queue length: {:.2}",
        report.average_queue_length
    );

    Ok(())
}

/// Print one bracketed cell per node with its four queue lengths and, once a
/// cycle has run, the recorded green direction.
fn print_network_state(cycle: u32, intersections: &[SimIntersection], rows: usize, cols: usize) {
    println!("\n=== Cycle {} Network State ===", cycle);
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            let intersection = &intersections[row * cols + col];
            line.push_str(&format!(
                "[Node {}] (N:{} S:{} E:{} W:{})",
                intersection.id,
                intersection.queue(Direction::North),
                intersection.queue(Direction::South),
                intersection.queue(Direction::East),
                intersection.queue(Direction::West),
            ));
            if let Some(green) = intersection.green_direction {
                line.push_str(&format!(" G:{}", green));
            }
            line.push_str("  ");
        }
        println!("{}", line);
    }
    println!("==============================");
}

/// Print both candidate emergency routes as node sequences.
fn print_ambulance_routes(routes: &AmbulanceRoutes) {
    println!(
        "Ambulance route (distance): {}",
        format_path(&routes.distance_path)
    );
    println!(
        "Ambulance route (congestion-aware): {}",
        format_path(&routes.congestion_path)
    );
}

fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
