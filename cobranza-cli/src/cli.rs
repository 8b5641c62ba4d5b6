use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use cobranza::{CustomUnit, RecurrenceKind, ScheduleDraft};

#[derive(Debug, Parser)]
#[command(name = "cobranza")]
#[command(about = "Preview upcoming dates of recurring charges, payroll and expenses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the next dates of a schedule
    Preview {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// How many dates to print (defaults to `default_count` from the config)
        #[arg(long)]
        count: Option<usize>,
        /// Print a JSON array instead of one date per line
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON form payload and print the normalized schedule
    Check {
        /// Path to a JSON file with startDate, kind, endDate, customInterval and customUnit
        file: PathBuf,
    },
    /// Print the first date after a given day
    Next {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// Reference day (defaults to the start date)
        #[arg(long)]
        after: Option<NaiveDate>,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// First day of the schedule (YYYY-MM-DD), not itself listed
    #[arg(long)]
    pub start: NaiveDate,
    /// weekly, monthly, quarterly, yearly or custom (Spanish tags accepted)
    #[arg(long)]
    pub kind: RecurrenceKind,
    /// Interval for custom schedules
    #[arg(long, allow_negative_numbers = true)]
    pub interval: Option<f64>,
    /// Unit for custom schedules: days, weeks or months
    #[arg(long)]
    pub unit: Option<CustomUnit>,
    /// Last day on which an occurrence may fall (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl From<ScheduleArgs> for ScheduleDraft {
    fn from(args: ScheduleArgs) -> Self {
        ScheduleDraft {
            start_date: args.start,
            end_date: args.end,
            kind: args.kind,
            custom_interval: args.interval,
            custom_unit: args.unit,
        }
    }
}
