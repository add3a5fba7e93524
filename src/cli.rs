use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use arbmark::{AggFunc, DisplayFormat, Frequency, MergeHow};

#[derive(Parser, Debug)]
#[command(
    name = "arbmark",
    about = "Groupings, calendars and table helpers for labour-market statistics",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.arbmark/config.toml, fallback ~/.config/arbmark/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List monthly or quarterly periods between two periods, inclusive
    Interval {
        start: String,
        end: String,
        /// Separator between year and unit, e.g. "k" for 2023k1
        #[arg(long, default_value = "")]
        sep: String,
        /// monthly or quarterly (only the first letter counts)
        #[arg(long, default_value = "monthly")]
        freq: Frequency,
    },

    /// First and last date of a quarter
    Quarter { year: String, quarter: String },

    /// Test date ranges against the reference day, week or Tuesday
    Reference {
        #[arg(value_enum)]
        kind: ReferenceKind,
        /// Date ranges as FROM..TO
        #[arg(required = true, value_parser = parse_date_range)]
        ranges: Vec<(NaiveDate, NaiveDate)>,
    },

    /// Count days of a kind in each date range
    Workdays {
        /// Date ranges as FROM..TO
        #[arg(required = true, value_parser = parse_date_range)]
        ranges: Vec<(NaiveDate, NaiveDate)>,
        #[arg(long, value_enum, default_value = "workdays")]
        count: DayKind,
    },

    /// List Norwegian public holidays
    Holidays {
        from_year: i32,
        /// Last year, inclusive [default: FROM_YEAR]
        to_year: Option<i32>,
    },

    /// Classify values into a standard grouping
    Group {
        #[arg(value_enum)]
        kind: GroupKind,
        /// Values to classify; "NA" is a missing value. Sector values are SECTOR:SUBSECTOR.
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
        #[arg(long, value_enum, default_value = "label")]
        display: DisplayArg,
        /// Year of the regional codes (mainland, county)
        #[arg(long)]
        year: Option<i32>,
        /// Keep non-mainland counties 21-24 (county)
        #[arg(long)]
        detailed: bool,
        /// Use the built-in industry mapping instead of fetching it (nace17)
        #[arg(long)]
        offline: bool,
    },

    /// Format numbers for StatBank
    Format {
        #[arg(value_enum)]
        kind: FormatKind,
        /// Numbers; "NA" is a missing value
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
        /// Round to 10^UNIT (integer)
        #[arg(long, default_value_t = 0)]
        unit: i32,
        /// Decimal places (percent)
        #[arg(long, default_value_t = 1)]
        decimals: i32,
    },

    /// Categorize numbers with a named range format
    Ranges {
        format: String,
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
        /// JSON file with range formats [default: formats.path from config]
        #[arg(long)]
        formats: Option<PathBuf>,
    },

    /// Find the latest version of a versioned file
    Latest {
        dir: String,
        name: String,
        #[arg(long, default_value = ".parquet")]
        ext: String,
    },

    /// Merge two JSON tables and report the merge types
    Merge {
        left: PathBuf,
        right: PathBuf,
        #[arg(long, value_enum, default_value = "inner")]
        how: HowArg,
        /// Key column (repeatable)
        #[arg(long)]
        on: Vec<String>,
        /// Write the merged table here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Totals and subtotals over every combination of group columns
    Sums {
        table: PathBuf,
        /// Group column (repeatable)
        #[arg(long = "group", required = true)]
        groups: Vec<String>,
        /// Value column (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,
        /// Aggregation as COLUMN=FUNC[,FUNC...] (repeatable)
        #[arg(long, value_parser = parse_agg)]
        agg: Vec<(String, Vec<AggFunc>)>,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReferenceKind {
    Day,
    Week,
    Tuesday,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum DayKind {
    Days,
    Workdays,
    Holidays,
    Weekends,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum GroupKind {
    AgeDetailed,
    Age5,
    CompanySize,
    WorldRegion,
    Nace47,
    Nace17,
    Occupation,
    Sector,
    ShiftWork,
    Mainland,
    County,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum FormatKind {
    Integer,
    Percent,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum DisplayArg {
    Label,
    Number,
    Combined,
    Arblonn,
}

impl From<&DisplayArg> for DisplayFormat {
    fn from(arg: &DisplayArg) -> Self {
        match arg {
            DisplayArg::Label => DisplayFormat::Label,
            DisplayArg::Number => DisplayFormat::Number,
            DisplayArg::Combined => DisplayFormat::Combined,
            DisplayArg::Arblonn => DisplayFormat::Arblonn,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum HowArg {
    Left,
    Right,
    Outer,
    Inner,
    Cross,
}

impl From<&HowArg> for MergeHow {
    fn from(arg: &HowArg) -> Self {
        match arg {
            HowArg::Left => MergeHow::Left,
            HowArg::Right => MergeHow::Right,
            HowArg::Outer => MergeHow::Outer,
            HowArg::Inner => MergeHow::Inner,
            HowArg::Cross => MergeHow::Cross,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", s, e))
}

/// `2023-01-01..2023-01-31`
pub fn parse_date_range(s: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (from, to) = s
        .split_once("..")
        .ok_or_else(|| format!("expected FROM..TO, got '{}'", s))?;
    Ok((parse_date(from)?, parse_date(to)?))
}

/// `D=sum,mean`
pub fn parse_agg(s: &str) -> Result<(String, Vec<AggFunc>), String> {
    let (column, funcs) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=FUNC[,FUNC...], got '{}'", s))?;
    let funcs = funcs
        .split(',')
        .map(|f| f.parse::<AggFunc>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((column.trim().to_string(), funcs))
}
