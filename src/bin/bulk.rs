use clap::Parser;
use mindcheck::config::{Config, ReportFormat};
use mindcheck::{read_bulk, run, telemetry, AssessmentResult, AssessmentType, Error};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::warn;

/// Score a CSV of answers: `id,q1,q2,...` with one respondent per row.
#[derive(Parser)]
struct Args {
    path: PathBuf,

    /// phq9, gad7, wellbeing or generic
    #[arg(long, short, default_value = "phq9")]
    assessment: AssessmentType,

    /// Directory holding mindcheck.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// text or json (overrides the config file)
    #[arg(long)]
    format: Option<ReportFormat>,
}

#[derive(Serialize)]
struct Row<'a, T: Serialize> {
    id: &'a str,
    #[serde(flatten)]
    outcome: T,
}

#[derive(Serialize)]
struct Failure {
    error: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let config = Config::load(&args.config_dir)?;
    telemetry::init(&config.telemetry)?;
    let format = args.format.unwrap_or(config.report.format);

    let reader = BufReader::new(File::open(&args.path)?);
    let mut failures = 0usize;
    for (row, parsed) in read_bulk(reader, args.assessment).enumerate() {
        match parsed {
            Ok((id, answers)) => match run(args.assessment, &answers) {
                Ok(result) => print_result(format, &id, &result)?,
                Err(e) => {
                    failures += 1;
                    print_failure(format, &id, &e)?;
                }
            },
            Err(e) => {
                failures += 1;
                warn!(row = row + 1, error = %e, "skipping row");
                print_failure(format, &format!("row {}", row + 1), &e)?;
            }
        }
    }

    if failures > 0 {
        warn!(failures, "some rows could not be scored");
    }
    Ok(())
}

fn print_result(format: ReportFormat, id: &str, result: &AssessmentResult) -> Result<(), Error> {
    match format {
        ReportFormat::Text => println!(
            "id = {}, score = {}/{}, severity = {}, urgent = {}",
            id,
            result.total_score(),
            result.max_score(),
            result.severity_level(),
            result.requires_urgent_notice()
        ),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string(&Row {
                id,
                outcome: result
            })?
        ),
    }
    Ok(())
}

fn print_failure(format: ReportFormat, id: &str, e: &Error) -> Result<(), Error> {
    match format {
        ReportFormat::Text => println!("id = {}, error = {}", id, e),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string(&Row {
                id,
                outcome: Failure {
                    error: e.to_string()
                },
            })?
        ),
    }
    Ok(())
}
