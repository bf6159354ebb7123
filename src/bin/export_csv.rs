use std::path::PathBuf;

use anyhow::{Context, Result};

use fpl_terminal::bootstrap_fetch::fetch_bootstrap;
use fpl_terminal::csv_export::export_snapshot;
use fpl_terminal::error::PipelineError;
use fpl_terminal::snapshot::build_snapshot;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let out_dir = parse_out_dir_arg()
        .or_else(|| {
            std::env::var("FPL_OUT_DIR")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let bootstrap = match fetch_bootstrap() {
        Ok(bootstrap) => {
            println!("The API request was successful.");
            bootstrap
        }
        Err(PipelineError::FetchStatus(code)) => {
            println!("Error: The API request failed with status code {code}.");
            return Err(PipelineError::FetchStatus(code).into());
        }
        Err(err) => return Err(err).context("bootstrap request failed"),
    };

    let snapshot = build_snapshot(&bootstrap).context("bootstrap payload did not build")?;
    let report = export_snapshot(&out_dir, &snapshot)?;

    println!("Export complete");
    println!("Dir: {}", report.dir.display());
    println!("teams.csv: {} rows", report.teams);
    println!("goalkeepers.csv: {} rows", report.goalkeepers);
    println!("defenders.csv: {} rows", report.defenders);
    println!("midfielders.csv: {} rows", report.midfielders);
    println!("forwards.csv: {} rows", report.forwards);
    println!("injuries.csv: {} rows", report.injuries);
    println!("penalty_taker.csv: {} rows", report.penalty_takers);
    println!("setpiece.csv: {} rows", report.set_piece_takers);
    if let Some(next) = snapshot.round.next.as_deref() {
        let deadline = snapshot.round.next_deadline.as_deref().unwrap_or("TBC");
        println!("Next round: {next} (deadline {deadline})");
    }

    Ok(())
}

fn parse_out_dir_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--out=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--out" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
