//! sortviz headless runner
//!
//! Runs one unpaced sort and prints the run report as JSON.

use std::path::PathBuf;

use log::info;

use sortviz::{Algorithm, PacingConfig, Settings, SortSession};

/// Runner configuration
struct Config {
    /// Catalog entry to run
    algorithm: Algorithm,
    /// Column count override
    columns: Option<usize>,
    /// Settings file to start from
    settings_path: Option<PathBuf>,
    /// Force concurrent network phases
    parallel: bool,
}

fn print_help() {
    println!("sortviz-run - run one sort headlessly");
    println!();
    println!("USAGE:");
    println!("    sortviz-run <ALGORITHM> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --columns <N>         Number of columns [default: from settings]");
    println!("    -s, --settings <FILE>     Settings JSON to load");
    println!("    -p, --parallel            Run network phases concurrently");
    println!("    -h, --help                Print help information");
    println!();
    println!("ALGORITHMS:");
    for algorithm in Algorithm::ALL {
        println!("    {algorithm}");
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut algorithm = None;
    let mut columns = None;
    let mut settings_path = None;
    let mut parallel = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--columns" | "-c" => {
                let Some(value) = args.get(i + 1) else {
                    fail("--columns requires a value");
                };
                columns = Some(
                    value
                        .parse::<usize>()
                        .unwrap_or_else(|_| fail(&format!("invalid column count: {value}"))),
                );
                i += 2;
            }
            "--settings" | "-s" => {
                let Some(value) = args.get(i + 1) else {
                    fail("--settings requires a value");
                };
                settings_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--parallel" | "-p" => {
                parallel = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => fail(&format!("unknown argument: {arg}")),
            name => {
                if algorithm.is_some() {
                    fail(&format!("unexpected argument: {name}"));
                }
                algorithm = Some(name.parse::<Algorithm>().unwrap_or_else(|e| fail(&e.to_string())));
                i += 1;
            }
        }
    }

    let Some(algorithm) = algorithm else {
        fail("missing <ALGORITHM>; see --help");
    };
    Config {
        algorithm,
        columns,
        settings_path,
        parallel,
    }
}

fn main() {
    env_logger::init();
    let config = parse_args();

    let mut settings = match &config.settings_path {
        Some(path) => Settings::load(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => Settings::default(),
    };
    settings.algorithm = config.algorithm;
    settings.pacing = PacingConfig::unpaced();
    if let Some(columns) = config.columns {
        settings.column_count = columns;
    }
    if config.parallel {
        settings.algorithm_options.parallel = true;
    }
    if settings.snap_column_count() {
        info!("Snapped to {} columns for {}", settings.column_count, settings.algorithm);
    }

    let mut session = SortSession::new(settings).unwrap_or_else(|e| fail(&e.to_string()));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap_or_else(|e| fail(&format!("cannot start runtime: {e}")));

    let report = runtime
        .block_on(session.run())
        .unwrap_or_else(|e| fail(&e.to_string()));
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("cannot serialize report: {e}")),
    }
    if !report.is_completed() {
        std::process::exit(2);
    }
}
