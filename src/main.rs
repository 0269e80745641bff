use chrono::Local;
use clap::{Args, Parser, Subcommand};
use fare_engine::config::ResolverConfig;
use fare_engine::distance::{known_places, DistanceResolver};
use fare_engine::estimate::{estimate_trip, TripRequest};
use fare_engine::fare::{self, FareRequest, TimeOfDay, VehicleClass};
use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Taxi fare estimator for Indian cities.
///
/// Resolves the trip distance (live Distance Matrix lookup when an API key is
/// configured, otherwise a built-in gazetteer) and prices it per vehicle class.
///
/// Examples:
///   fare estimate --from "Bandra Station" --to "BKC Complex"
///   fare estimate --from Mumbai --to Pune --vehicle suv --time night --passengers 5
///   fare quote --vehicle sedan --distance 18.5
///   fare distance --from Delhi --to Agra --offline
///   fare vehicles
#[derive(Parser)]
#[command(name = "fare", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Offline mode: only use the built-in gazetteer.
    #[arg(long, global = true)]
    offline: bool,

    /// Seed for the estimated-distance offsets (reproducible output).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Distance Matrix API key. Overrides FARE_MAPS_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Live lookup timeout in seconds. Overrides FARE_LOOKUP_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the distance between two places and price the trip.
    Estimate {
        #[command(flatten)]
        route: Route,

        /// Vehicle class. Defaults to the usual choice for the party size.
        #[arg(long, value_parser = parse_vehicle)]
        vehicle: Option<VehicleClass>,

        #[command(flatten)]
        ride: Ride,
    },
    /// Price a trip of known length.
    Quote {
        #[arg(long, value_parser = parse_vehicle)]
        vehicle: VehicleClass,

        /// Trip length in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,

        #[command(flatten)]
        ride: Ride,
    },
    /// Resolve the distance between two places.
    Distance {
        #[command(flatten)]
        route: Route,
    },
    /// List vehicle classes and their rates.
    Vehicles,
    /// List the built-in gazetteer.
    Places,
}

#[derive(Args)]
struct Route {
    /// Pickup location (free text).
    #[arg(long = "from")]
    pickup: String,

    /// Dropoff location (free text).
    #[arg(long = "to")]
    dropoff: String,
}

#[derive(Args)]
struct Ride {
    /// "day" or "night". Defaults to the current local time.
    #[arg(long, value_parser = parse_time)]
    time: Option<TimeOfDay>,

    #[arg(long, default_value_t = 2)]
    passengers: u32,
}

impl Ride {
    fn time_of_day(&self) -> TimeOfDay {
        self.time.unwrap_or_else(|| TimeOfDay::at(Local::now().time()))
    }
}

fn parse_vehicle(s: &str) -> Result<VehicleClass, String> {
    s.parse().map_err(|e: fare::FareError| e.to_string())
}

fn parse_time(s: &str) -> Result<TimeOfDay, String> {
    s.parse().map_err(|e: fare::FareError| e.to_string())
}

#[derive(Serialize)]
struct VehicleRow {
    class: VehicleClass,
    #[serde(flatten)]
    profile: &'static fare::VehicleProfile,
    demand_factor: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut resolver = build_resolver(&cli);

    let json = match &cli.command {
        Command::Estimate { route, vehicle, ride } => {
            let request = TripRequest {
                pickup: route.pickup.clone(),
                dropoff: route.dropoff.clone(),
                vehicle: vehicle.unwrap_or_else(|| fare::suggest_vehicle(ride.passengers)),
                time_of_day: ride.time_of_day(),
                passengers: ride.passengers,
            };
            let estimate = estimate_trip(&mut resolver, &request).unwrap_or_else(|e| fail(&e));
            eprintln!("  {}", estimate.summary());
            to_json(&estimate)
        }
        Command::Quote { vehicle, distance, ride } => {
            let quote = FareRequest::new(*vehicle, *distance, ride.time_of_day(), ride.passengers)
                .and_then(|request| fare::quote(&request))
                .unwrap_or_else(|e| fail(&e));
            to_json(&quote)
        }
        Command::Distance { route } => to_json(&resolver.resolve(&route.pickup, &route.dropoff)),
        Command::Vehicles => {
            let rows: Vec<VehicleRow> = VehicleClass::ALL
                .iter()
                .map(|&class| VehicleRow {
                    class,
                    profile: class.profile(),
                    demand_factor: class.demand_factor(),
                })
                .collect();
            to_json(&rows)
        }
        Command::Places => to_json(&known_places()),
    };

    println!("{}", json);
}

fn build_resolver(cli: &Cli) -> DistanceResolver {
    let mut config = ResolverConfig::from_env();
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    let mut resolver = if cli.offline {
        DistanceResolver::offline()
    } else {
        DistanceResolver::new(&config)
    };
    if let Some(seed) = cli.seed {
        resolver = resolver.with_seed(seed);
    }
    resolver
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(&e))
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
