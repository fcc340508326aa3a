//! Road Line CLI
//!
//! Usage:
//!   road-line [OPTIONS] [ANCHORS]
//!
//! Options:
//!   -c, --config <FILE>      Road-line configuration (TOML format)
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   --scroll <Y>             Scroll to this offset after loading (repeatable)
//!   -d, --debug              Print segments and enable debug logging
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use road_line::{simulate, RenderConfig, RenderError, RoadLineConfig, Stylesheet};

#[derive(Parser)]
#[command(name = "road-line")]
#[command(about = "Draw curved road lines between page anchors as the page scrolls")]
struct Cli {
    /// Anchor document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Road-line configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Scroll offsets to replay after the initial load, in order
    #[arg(long = "scroll", value_name = "Y")]
    scrolls: Vec<f64>,

    /// Debug mode: print every segment and log at debug level
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let road = match &cli.config {
        Some(path) => {
            let content = read_or_exit(path);
            RoadLineConfig::from_str(&content)
                .unwrap_or_else(|e| exit_with(e.into(), &content, path))
        }
        None => RoadLineConfig::default(),
    };

    let stylesheet = match &cli.stylesheet {
        Some(path) => {
            let content = read_or_exit(path);
            Stylesheet::from_str(&content).unwrap_or_else(|e| exit_with(e.into(), &content, path))
        }
        None => Stylesheet::default(),
    };

    let (source, source_name) = match &cli.input {
        Some(path) => (read_or_exit(path), path.clone()),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            (buffer, PathBuf::from("<stdin>"))
        }
    };

    let config = RenderConfig::new()
        .with_road(road)
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);
    match simulate(&source, &config, &cli.scrolls) {
        Ok(simulation) => {
            log::info!(
                "settled after {:?}, anchors revealed: {:?}",
                simulation.elapsed,
                simulation.revealed
            );
            println!("{}", simulation.svg);
        }
        Err(e) => exit_with(e, &source, &source_name),
    }
}

fn read_or_exit(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn exit_with(err: RenderError, source: &str, path: &Path) -> ! {
    let filename = path.display().to_string();
    match err.source_error() {
        Some(located) => eprint!("{}", located.format(source, &filename)),
        None => eprintln!("Error: {}", err),
    }
    std::process::exit(1);
}
