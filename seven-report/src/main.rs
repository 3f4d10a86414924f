use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use seven_report::{App, TestReport};

/// Interactive viewer for seven test reports.
#[derive(Parser)]
#[command(name = "seven-report", version)]
struct Args {
    /// Report JSON produced by the test runner; a built-in sample renders
    /// when omitted.
    report: Option<PathBuf>,

    /// Write debug logs to this file (stdout belongs to the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Complete section slides instantly.
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let log_file = File::create(path).expect("Failed to create log file");
        WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
            .expect("Failed to initialize logger");
    }

    let report = match &args.report {
        Some(path) => match TestReport::from_json_file(path) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => TestReport::sample(),
    };

    let mut app = App::new(&report, args.reduced_motion);
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
