use chrono::{Local, NaiveDate};
use clap::Args;
use pomodoro_core::Store;

use super::CliResult;

#[derive(Args)]
pub struct StatsArgs {
    /// Report as of this date (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(store: &Store, args: StatsArgs) -> CliResult {
    let as_of = args.date.unwrap_or_else(|| Local::now().date_naive());
    let report = store.summarize(as_of)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
