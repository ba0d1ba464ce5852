use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use roadnav_cli::commands::locations::handle_locations_command;
use roadnav_cli::commands::route::{handle_route_command, parse_speed, RouteCommandArgs};
use roadnav_cli::commands::load_network_or_demo;
use roadnav_cli::commands::stats::handle_stats_command;
use roadnav_cli::logging::{init_logging, LogFormat};
use roadnav_cli::output::OutputFormat;
use roadnav_lib::DEFAULT_SPEED_KMH;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest-path routing over road networks")]
struct Cli {
    /// JSON network definition. Defaults to the built-in demo city.
    #[arg(long, global = true, env = "ROADNAV_NETWORK")]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log line format (written to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two locations.
    Route {
        /// Starting location id or name.
        #[arg(long = "from")]
        from: String,
        /// Destination location id or name.
        #[arg(long = "to")]
        to: String,
        /// Print the step-by-step search trace.
        #[arg(long)]
        trace: bool,
        /// Average speed in km/h used for the time estimate.
        #[arg(long, default_value_t = DEFAULT_SPEED_KMH, value_parser = parse_speed)]
        speed: f64,
        /// Give up after settling this many intersections.
        #[arg(long)]
        max_settled: Option<usize>,
    },
    /// List every location in the network.
    Locations,
    /// Connectivity and all-pairs distance statistics for the network.
    Stats {
        /// Include the full distance matrix.
        #[arg(long)]
        matrix: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let network = load_network_or_demo(cli.network.as_deref())?;

    match cli.command {
        Command::Route {
            from,
            to,
            trace,
            speed,
            max_settled,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                trace,
                speed,
                max_settled,
            };
            handle_route_command(&network, cli.format, &args)
        }
        Command::Locations => handle_locations_command(&network, cli.format),
        Command::Stats { matrix } => handle_stats_command(&network, cli.format, matrix),
    }
}
