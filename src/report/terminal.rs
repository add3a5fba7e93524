use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as TextTable};

use crate::models::{MergeReport, MergeType};
use crate::table::{Table, Value};

fn header_row(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(headers: &[&str]) -> TextTable {
    let mut table = TextTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header_row(headers));
    table
}

fn merge_type_color(merge_type: MergeType) -> Color {
    match merge_type {
        MergeType::OneToOne => Color::Green,
        MergeType::ManyToOne | MergeType::OneToMany => Color::Yellow,
        MergeType::ManyToMany => Color::Red,
        MergeType::OneToZero | MergeType::ZeroToOne => Color::Cyan,
        MergeType::ManyToZero | MergeType::ZeroToMany => Color::Magenta,
    }
}

pub fn merge_report_table(report: &MergeReport) -> TextTable {
    let mut table = new_table(&["Merge type", "Entries"]);
    for (merge_type, count) in &report.counts {
        table.add_row(vec![
            Cell::new(merge_type.to_string()).fg(merge_type_color(*merge_type)),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print the merge summary. In quiet mode only the one-line totals are shown.
pub fn render_merge_report(report: &MergeReport, quiet: bool) {
    if quiet {
        let parts: Vec<String> = report
            .counts
            .iter()
            .map(|(t, n)| format!("{}: {}", t, n))
            .collect();
        println!("Total: {}  {}", report.total, parts.join("  "));
        return;
    }

    println!("\n {} v{}", "arbmark".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Sum of entries after merge: {}\n", report.total.to_string().bold());
    println!("{}", merge_report_table(report));
}

pub fn holiday_table(holidays: &BTreeMap<NaiveDate, &'static str>) -> TextTable {
    let mut table = new_table(&["Date", "Weekday", "Holiday"]);
    for (date, name) in holidays {
        table.add_row(vec![
            Cell::new(date.format("%Y-%m-%d")),
            Cell::new(date.weekday()),
            Cell::new(name),
        ]);
    }
    table
}

pub fn render_holidays(holidays: &BTreeMap<NaiveDate, &'static str>) {
    if holidays.is_empty() {
        println!(" {}", "No holidays in range.".dimmed());
        return;
    }
    println!("{}", holiday_table(holidays));
}

/// Any [`Table`], missing values shown dimmed.
pub fn data_table(data: &Table) -> TextTable {
    let headers: Vec<&str> = data.columns.iter().map(String::as_str).collect();
    let mut table = new_table(&headers);
    for row in &data.rows {
        table.add_row(
            row.iter()
                .map(|v| match v {
                    Value::Null => Cell::new("NaN").fg(Color::DarkGrey),
                    Value::Int(_) | Value::Float(_) => {
                        Cell::new(v.to_string()).set_alignment(CellAlignment::Right)
                    }
                    Value::Str(s) => Cell::new(s),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn render_table(data: &Table) {
    println!("{}", data_table(data));
}

/// Input values side by side with their computed results.
pub fn columns_table(headers: &[&str], columns: &[Vec<String>]) -> TextTable {
    let mut table = new_table(headers);
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..height {
        table.add_row(
            columns
                .iter()
                .map(|col| Cell::new(col.get(i).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn render_columns(headers: &[&str], columns: &[Vec<String>]) {
    println!("{}", columns_table(headers, columns));
}

/// Plain list output, one value per line.
pub fn render_list(values: &[String]) {
    for value in values {
        println!("{}", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_report_table_lists_types() {
        let report = MergeReport {
            total: 3,
            counts: vec![(MergeType::OneToOne, 2), (MergeType::OneToZero, 1)],
        };
        let rendered = merge_report_table(&report).to_string();
        assert!(rendered.contains("one-to-one"));
        assert!(rendered.contains("one-to-zero"));
        assert!(rendered.contains("Merge type"));
    }

    #[test]
    fn test_holiday_table() {
        let mut holidays = BTreeMap::new();
        holidays.insert(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(), "Grunnlovsdag");
        let rendered = holiday_table(&holidays).to_string();
        assert!(rendered.contains("2024-05-17"));
        assert!(rendered.contains("Fri"));
        assert!(rendered.contains("Grunnlovsdag"));
    }

    #[test]
    fn test_data_table_shows_missing() {
        let data = Table::from_rows(
            vec!["id".to_string(), "b".to_string()],
            vec![vec![Value::Int(1), Value::Null]],
        )
        .unwrap();
        let rendered = data_table(&data).to_string();
        assert!(rendered.contains("NaN"));
        assert!(rendered.contains("id"));
    }

    #[test]
    fn test_columns_table_pads_short_columns() {
        let columns = vec![
            vec!["24".to_string(), "67".to_string()],
            vec!["20-24".to_string()],
        ];
        let rendered = columns_table(&["Input", "Group"], &columns).to_string();
        assert!(rendered.contains("67"));
        assert!(rendered.contains("20-24"));
    }
}
