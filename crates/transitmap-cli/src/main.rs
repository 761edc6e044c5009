use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use transitmap_lib::{load_network, plan_route, Edge, RoutePlan, TransportNetwork};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transport network utilities")]
struct Cli {
    /// Path to the delimited network file.
    #[arg(long)]
    network: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two stop names over the loaded network.
    Route {
        /// Starting stop name.
        #[arg(long = "from")]
        from: String,
        /// Destination stop name.
        #[arg(long = "to")]
        to: String,
        /// Print the plan as JSON instead of the stop chain.
        #[arg(long)]
        json: bool,
    },
    /// List the stop names of the loaded network.
    Stops,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let network = load(&cli.network)?;
    match cli.command {
        Command::Route { from, to, json } => handle_route(&network, &from, &to, json),
        Command::Stops => handle_stops(&network),
    }
}

fn load(path: &Path) -> Result<TransportNetwork> {
    load_network(path).with_context(|| format!("failed to load network from {}", path.display()))
}

fn handle_route(network: &TransportNetwork, from: &str, to: &str, json: bool) -> Result<()> {
    let plan = plan_route(network, from, to)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn handle_stops(network: &TransportNetwork) -> Result<()> {
    let mut names: Vec<&str> = network.stops().into_iter().map(|stop| stop.name()).collect();
    names.sort_unstable();
    names.dedup();
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Render the plan as a stop chain followed by one annotation per hop.
fn print_plan(plan: &RoutePlan) {
    let mut chain = plan.start.name().to_string();
    for segment in &plan.segments {
        chain.push_str(" --> ");
        chain.push_str(segment.destination().name());
    }
    println!("{chain}");

    for segment in &plan.segments {
        println!(
            "  {} -> {}  line {} variant {}  {}s",
            segment.origin().name(),
            segment.destination().name(),
            segment.line_name(),
            segment.variant_name(),
            segment.travel_duration().as_secs(),
        );
    }
    println!(
        "{} hops, {}s total",
        plan.hop_count(),
        plan.total_duration().as_secs()
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
