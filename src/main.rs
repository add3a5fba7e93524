//! `arbmark`: command-line front end to the labour-market statistics helpers.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Install the `tracing` subscriber (`RUST_LOG`, or `info` with `--verbose`).
//! 3. Load config ([`arbmark::config::load_config`]).
//! 4. Run the subcommand and print its result as tables or, with `--json`, JSON.

mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use arbmark::config::{load_config, load_range_formats, Config};
use arbmark::functions::{files, interval, merge, quarter, ranges, reference, statbank, workdays};
use arbmark::groups::nace::NaceVariant;
use arbmark::groups::region::RegionCodes;
use arbmark::groups::{
    age, company_size, country_origin, nace, occupation, region, sector, shift_work,
};
use arbmark::klass::KlassClient;
use arbmark::report::terminal;
use arbmark::{DisplayFormat, Table};

use cli::{Cli, Command, DayKind, FormatKind, GroupKind, ReferenceKind};

/// Text that stands for a missing value on the command line.
const MISSING: &str = "NA";

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    run(&cli, &config).await
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn optional(value: &str) -> Option<&str> {
    (value != MISSING).then_some(value)
}

fn parse_numbers(values: &[String]) -> Result<Vec<Option<f64>>> {
    values
        .iter()
        .map(|v| match optional(v) {
            None => Ok(None),
            Some(s) => s
                .parse::<f64>()
                .map(Some)
                .with_context(|| format!("'{}' is not a number", s)),
        })
        .collect()
}

fn split_ranges(ranges: &[(NaiveDate, NaiveDate)]) -> (Vec<NaiveDate>, Vec<NaiveDate>) {
    ranges.iter().copied().unzip()
}

fn range_texts(ranges: &[(NaiveDate, NaiveDate)]) -> (Vec<String>, Vec<String>) {
    ranges
        .iter()
        .map(|(f, t)| (f.to_string(), t.to_string()))
        .unzip()
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Command::Interval {
            start,
            end,
            sep,
            freq,
        } => {
            let periods = interval::pinterval(start, end, sep, *freq)?;
            if cli.json {
                print_json(&periods)?;
            } else {
                terminal::render_list(&periods);
            }
        }

        Command::Quarter { year, quarter } => {
            let (first, last) = quarter::first_last_date_quarter(year, quarter)?;
            if cli.json {
                print_json(&json!({ "first": first, "last": last }))?;
            } else if cli.quiet {
                println!("{} {}", first, last);
            } else {
                terminal::render_columns(&["First", "Last"], &[vec![first], vec![last]]);
            }
        }

        Command::Reference { kind, ranges } => {
            let (from, to) = split_ranges(ranges);
            let (result, header) = match kind {
                ReferenceKind::Day => (reference::ref_day(&from, &to)?, "Reference day"),
                ReferenceKind::Week => (reference::ref_week(&from, &to)?, "Reference week"),
                ReferenceKind::Tuesday => {
                    (reference::ref_tuesday(&from, &to)?, "Reference Tuesday")
                }
            };
            if cli.json {
                print_json(&result)?;
            } else {
                let (from, to) = range_texts(ranges);
                let result = result.iter().map(|b| b.to_string()).collect();
                terminal::render_columns(&["From", "To", header], &[from, to, result]);
            }
        }

        Command::Workdays { ranges, count } => {
            let (from, to) = split_ranges(ranges);
            let (counts, header) = match count {
                DayKind::Days => (workdays::count_days(&from, &to)?, "Days"),
                DayKind::Workdays => (workdays::count_workdays(&from, &to)?, "Workdays"),
                DayKind::Holidays => (workdays::count_holidays(&from, &to)?, "Holidays"),
                DayKind::Weekends => (workdays::count_weekend_days(&from, &to)?, "Weekend days"),
            };
            if cli.json {
                print_json(&counts)?;
            } else {
                let (from, to) = range_texts(ranges);
                let counts = counts.iter().map(|n| n.to_string()).collect();
                terminal::render_columns(&["From", "To", header], &[from, to, counts]);
            }
        }

        Command::Holidays { from_year, to_year } => {
            let last = to_year.unwrap_or(*from_year);
            if last < *from_year {
                bail!("last year {} is before first year {}", last, from_year);
            }
            let holidays = workdays::norwegian_holidays(*from_year..=last);
            if cli.json {
                let map: serde_json::Map<String, serde_json::Value> = holidays
                    .iter()
                    .map(|(d, name)| (d.to_string(), json!(name)))
                    .collect();
                print_json(&map)?;
            } else {
                terminal::render_holidays(&holidays);
            }
        }

        Command::Group {
            kind,
            values,
            display,
            year,
            detailed,
            offline,
        } => {
            let display = DisplayFormat::from(display);
            let groups =
                group_values(kind, values, display, *year, *detailed, *offline, config).await?;
            if cli.json {
                let rows: Vec<_> = values
                    .iter()
                    .zip(&groups)
                    .map(|(input, group)| json!({ "input": input, "group": group }))
                    .collect();
                print_json(&rows)?;
            } else if cli.quiet {
                terminal::render_list(&groups);
            } else {
                terminal::render_columns(&["Input", "Group"], &[values.clone(), groups]);
            }
        }

        Command::Format {
            kind,
            values,
            unit,
            decimals,
        } => {
            let numbers = parse_numbers(values)?;
            let formatted = match kind {
                FormatKind::Integer => statbank::sb_integer(&numbers, *unit),
                FormatKind::Percent => statbank::sb_percent(&numbers, *decimals),
            };
            if cli.json {
                print_json(&formatted)?;
            } else {
                terminal::render_list(&formatted);
            }
        }

        Command::Ranges {
            format,
            values,
            formats,
        } => {
            let Some(path) = formats.as_ref().or(config.formats.path.as_ref()) else {
                bail!("no range formats file: pass --formats or set [formats] path in the config");
            };
            let formats = load_range_formats(path)
                .with_context(|| format!("reading range formats from {}", path.display()))?;
            let numbers = parse_numbers(values)?;
            let categories = ranges::categorize_ranges(&numbers, format, &formats)?;
            if cli.json {
                print_json(&categories)?;
            } else {
                let categories = categories.into_iter().map(Option::unwrap_or_default).collect();
                terminal::render_columns(&["Value", "Category"], &[values.clone(), categories]);
            }
        }

        Command::Latest { dir, name, ext } => {
            let latest = files::read_latest(dir, name, ext)?;
            if cli.json {
                print_json(&latest)?;
            } else {
                match latest {
                    Some(path) => println!("{}", path.display()),
                    None if !cli.quiet => eprintln!("No files found."),
                    None => {}
                }
            }
        }

        Command::Merge {
            left,
            right,
            how,
            on,
            output,
        } => {
            let left_table = read_table(left)?;
            let right_table = read_table(right)?;
            let on: Vec<&str> = on.iter().map(String::as_str).collect();
            let (merged, report) =
                merge::indicate_merge(&left_table, &right_table, how.into(), &on)?;

            if let Some(path) = output {
                merged.write_json(path)?;
            }
            if cli.json {
                let mut body = json!({ "report": report });
                if output.is_none() {
                    body["table"] = merged.to_json_records();
                }
                print_json(&body)?;
            } else {
                terminal::render_merge_report(&report, cli.quiet);
                if output.is_none() && !cli.quiet {
                    terminal::render_table(&merged);
                }
            }
        }

        Command::Sums {
            table,
            groups,
            values,
            agg,
        } => {
            let data = read_table(table)?;
            let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            let values = (!values.is_empty()).then_some(values.as_slice());
            let agg = (!agg.is_empty()).then_some(agg.as_slice());

            #[allow(deprecated)]
            let sums = arbmark::functions::aggregation::proc_sums(&data, &groups, values, agg)?;

            if cli.json {
                print_json(&sums.to_json_records())?;
            } else {
                terminal::render_table(&sums);
            }
        }
    }

    Ok(())
}

fn read_table(path: &Path) -> Result<Table> {
    Table::read_json(path).with_context(|| format!("reading table from {}", path.display()))
}

fn parse_ints(values: &[String]) -> Vec<Option<i64>> {
    values
        .iter()
        .map(|v| optional(v).and_then(|s| s.trim().parse().ok()))
        .collect()
}

async fn group_values(
    kind: &GroupKind,
    values: &[String],
    display: DisplayFormat,
    year: Option<i32>,
    detailed: bool,
    offline: bool,
    config: &Config,
) -> Result<Vec<String>> {
    let texts = || values.iter().map(|v| optional(v));

    let groups = match kind {
        GroupKind::AgeDetailed => age::age_group_detailed(parse_ints(values), display),
        GroupKind::Age5 => age::age_group_5(parse_ints(values), display),
        GroupKind::CompanySize => company_size::company_size_group(parse_ints(values), display),
        GroupKind::WorldRegion => country_origin::world_region_group(texts(), display),
        GroupKind::Nace47 => nace::nace_47_group(texts(), display),
        GroupKind::Nace17 => {
            let variant = if offline {
                NaceVariant::builtin()
            } else {
                let client = KlassClient::new(&config.klass)?;
                NaceVariant::fetch(&client, config.klass.nace_variant).await?
            };
            variant
                .to_17_groups(texts(), display == DisplayFormat::Label)
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect()
        }
        GroupKind::Occupation => occupation::occupation_main_group(texts()),
        GroupKind::Sector => {
            let pairs = texts().map(|v| match v {
                Some(v) => match v.split_once(':') {
                    Some((s, sub)) => (Some(s), optional(sub)),
                    None => (Some(v), None),
                },
                None => (None, None),
            });
            sector::sector_group(pairs, display)
        }
        GroupKind::ShiftWork => shift_work::shift_work_code(texts()),
        GroupKind::Mainland | GroupKind::County => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let client = KlassClient::new(&config.klass)?;
            let codes = RegionCodes::fetch(&client, &config.klass, year).await?;
            if matches!(kind, GroupKind::Mainland) {
                region::classify_mainland(texts(), &codes)
            } else {
                region::classify_county(texts(), &codes, detailed)
            }
        }
    };
    Ok(groups)
}
