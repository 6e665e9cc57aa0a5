//! Map Overlay CLI
//!
//! Usage:
//!   map-overlay [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>    Map configuration (TOML format)
//!   -f, --format <FORMAT>  Output format: svg or json
//!   -v, --verbose          Log skipped records and viewport decisions
//!   --print-config         Print the annotated default configuration
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use map_overlay::{render_svg, skip_report, MapConfig, Orchestrator, ProviderReadiness, DEFAULT_CONFIG};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "map-overlay")]
#[command(about = "Render polygon and polyline records onto a map preview")]
struct Cli {
    /// Records JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Map configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Log skipped records and viewport decisions
    #[arg(short, long)]
    verbose: bool,

    /// Print the annotated default configuration
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if cli.print_config {
        print!("{}", DEFAULT_CONFIG);
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => match MapConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => MapConfig::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let records = match config.attributes.parse_records(&source) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let orchestrator = match Orchestrator::from_config(&config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let frame = match orchestrator.refresh(&records, ProviderReadiness::Ready) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        for skipped in &frame.skipped {
            eprintln!("{}", skip_report(skipped, &records));
        }
    }

    match cli.format {
        OutputFormat::Svg => println!("{}", render_svg(&frame, &config.svg)),
        OutputFormat::Json => match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn print_intro() {
    println!(
        r#"Map Overlay - polygon and polyline overlays from coordinate strings

USAGE:
    map-overlay [OPTIONS] [FILE]
    cat records.json | map-overlay

OPTIONS:
    -c, --config <FILE>   Map configuration (TOML file)
    -f, --format <FMT>    svg (default) or json
    -v, --verbose         Log skipped records and viewport decisions
    --print-config        Print the annotated default configuration
    -h, --help            Print help

QUICK START:
    echo '[{{"ObjectType": "Polygon", "Coordinates": "(52.1,5.1),(52.2,5.3),(52.0,5.4)"}}]' \
        | map-overlay > map.svg

Records are JSON objects; coordinates are "(lat,lng),(lat,lng)" or
"[lat,lng],[lat,lng]". Run --print-config to see every setting."#
    );
}
