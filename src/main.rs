use clap::Parser;
use geo::point;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use taxi_router::route_network::RouteCorpus;
use taxi_router::{plan, PlanRequest};

/// Plans a minibus taxi itinerary between two coordinates over a route
/// corpus exported as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding routes, waypoints, directions and taxi ranks
    corpus: PathBuf,
    #[arg(long)]
    source_lat: f64,
    #[arg(long)]
    source_lng: f64,
    #[arg(long)]
    source_province: String,
    #[arg(long)]
    dest_lat: f64,
    #[arg(long)]
    dest_lng: f64,
    #[arg(long)]
    dest_province: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let file = match File::open(&args.corpus) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open corpus {}: {err}", args.corpus.display());
            return ExitCode::FAILURE;
        }
    };
    let corpus: RouteCorpus = match serde_json::from_reader(BufReader::new(file)) {
        Ok(corpus) => corpus,
        Err(err) => {
            eprintln!("corpus {} is not valid: {err}", args.corpus.display());
            return ExitCode::FAILURE;
        }
    };

    let request = PlanRequest {
        source: point!(x: args.source_lng, y: args.source_lat),
        source_province: args.source_province,
        destination: point!(x: args.dest_lng, y: args.dest_lat),
        destination_province: args.dest_province,
    };

    //shrink the corpus to the provinces the request touches before planning
    let corpus = corpus.filter_provinces(&request.source_province, &request.destination_province);
    info!(
        "planning over {} routes across {} ranks",
        corpus.routes.len(),
        corpus.taxi_ranks.len()
    );

    match plan(&corpus, &request) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("cannot serialize itinerary: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("no itinerary: {err}");
            ExitCode::FAILURE
        }
    }
}
