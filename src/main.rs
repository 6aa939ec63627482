//! copymarks - exam copy-marks lookup by barcode
//!
//! Thin CLI over the lookup core: normalizes input, dispatches, prints.

use clap::Parser;
use copymarks::cli::{Cli, Command};
use copymarks::{
    parse_bar_codes, BatchConfig, BatchDispatcher, BatchReport, LookupConfig, MarksClient,
    MarksRow, Outcome,
};
use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(if cli.quiet { Level::WARN } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Print error using Display (not Debug) to keep it readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = LookupConfig::new()
        .with_endpoint(&cli.endpoint)?
        .with_session(cli.session.clone())
        .with_concurrency(cli.concurrency)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    match cli.command {
        Command::Lookup { bar_code } => {
            let bar_code = bar_code.trim();
            if bar_code.is_empty() {
                println!("Nothing to process: no barcode given.");
                return Ok(ExitCode::SUCCESS);
            }

            let client = MarksClient::new(config)?;
            match client.lookup(bar_code).await {
                Outcome::Success(rows) => {
                    for row in &rows {
                        print_row(row);
                    }
                }
                Outcome::NoData => println!("No data found for barcode {}.", bar_code),
                Outcome::Error(e) => {
                    eprintln!("Error: {}: {}", bar_code, e);
                    return Ok(ExitCode::FAILURE);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch { file, sequential } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let bar_codes = parse_bar_codes(&text);
            if bar_codes.is_empty() {
                println!("Nothing to process: input contained no barcodes.");
                return Ok(ExitCode::SUCCESS);
            }

            let client = MarksClient::new(config)?;
            let batch_config = BatchConfig::new()
                .with_concurrency(if sequential { 1 } else { cli.concurrency })
                .with_timeout(Duration::from_secs(cli.timeout_secs));
            let dispatcher = BatchDispatcher::with_config(client, batch_config);

            let report = dispatcher.dispatch_report(bar_codes).await;
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_row(row: &MarksRow) {
    println!("Details for Bar Code: {}", row.bar_code);
    println!("  Center Name:        {}", row.center_name);
    println!("  Faculty Name:       {}", row.name);
    println!("  Contact No.:        {}", row.contact_no);
    println!("  Catch No.:          {}", row.catch_no);
    println!("  Paper Name:         {}", row.paper_name);
    println!("  Evaluation Session: {}", row.eval_session);
    println!("  Checked Type:       {}", row.checked_type);
    println!("  Checked:            {}", if row.checked { "Yes" } else { "No" });
    println!("  Total Marks:        {}", row.total_marks);
    println!("  Obtained Marks:     {}", row.obt_marks);
    println!("---");
}

fn print_report(report: &BatchReport) {
    for row in &report.rows {
        print_row(row);
    }

    if !report.no_data.is_empty() {
        println!("No data found for: {}", report.no_data.join(", "));
    }

    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    println!(
        "Processed {} barcode(s): {} row(s), {} without data, {} error(s).",
        report.total,
        report.rows.len(),
        report.no_data.len(),
        report.errors.len()
    );
}
