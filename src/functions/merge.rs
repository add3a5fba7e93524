//! Table joins that report the cardinality of every merged row.

use std::collections::HashMap;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{MergeHow, MergeReport, MergeType};
use crate::table::{Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    LeftOnly,
    RightOnly,
    Both,
}

fn classify(side: Side, dup_left: bool, dup_right: bool) -> MergeType {
    match (side, dup_left, dup_right) {
        (Side::LeftOnly, false, _) => MergeType::OneToZero,
        (Side::RightOnly, _, false) => MergeType::ZeroToOne,
        (Side::LeftOnly, true, _) => MergeType::ManyToZero,
        (Side::RightOnly, _, true) => MergeType::ZeroToMany,
        (Side::Both, false, false) => MergeType::OneToOne,
        (Side::Both, true, false) => MergeType::ManyToOne,
        (Side::Both, false, true) => MergeType::OneToMany,
        (Side::Both, true, true) => MergeType::ManyToMany,
    }
}

fn key_indices(table: &Table, on: &[&str], side: &str) -> Result<Vec<usize>> {
    let mut missing = Vec::new();
    let mut indices = Vec::with_capacity(on.len());
    for col in on {
        match table.column_index(col) {
            Some(i) => indices.push(i),
            None => missing.push(format!("{} ({})", col, side)),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(Error::MissingColumns(missing))
    }
}

fn key_of(row: &[Value], indices: &[usize]) -> Vec<Value> {
    indices.iter().map(|&i| row[i].key()).collect()
}

fn key_counts(table: &Table, indices: &[usize]) -> HashMap<Vec<Value>, usize> {
    let mut counts = HashMap::new();
    for row in &table.rows {
        *counts.entry(key_of(row, indices)).or_insert(0) += 1;
    }
    counts
}

/// Output layout: which source column feeds each output column.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Join key; taken from whichever side has the row.
    Key { left: usize, right: usize },
    Left(usize),
    Right(usize),
}

fn layout(left: &Table, right: &Table, on: &[&str]) -> (Vec<String>, Vec<Source>) {
    let is_key = |c: &str| on.contains(&c);
    let mut columns = Vec::new();
    let mut sources = Vec::new();

    for (i, col) in left.columns.iter().enumerate() {
        if is_key(col.as_str()) {
            let r = right.column_index(col).unwrap_or(i);
            columns.push(col.clone());
            sources.push(Source::Key { left: i, right: r });
        } else if right.column_index(col).is_some() {
            columns.push(format!("{}_x", col));
            sources.push(Source::Left(i));
        } else {
            columns.push(col.clone());
            sources.push(Source::Left(i));
        }
    }
    for (i, col) in right.columns.iter().enumerate() {
        if is_key(col.as_str()) {
            continue;
        }
        if left.column_index(col).is_some() {
            columns.push(format!("{}_y", col));
        } else {
            columns.push(col.clone());
        }
        sources.push(Source::Right(i));
    }
    (columns, sources)
}

fn build_row(sources: &[Source], left: Option<&[Value]>, right: Option<&[Value]>) -> Vec<Value> {
    sources
        .iter()
        .map(|source| match *source {
            Source::Key { left: l, right: r } => left
                .map(|row| row[l].clone())
                .or_else(|| right.map(|row| row[r].clone()))
                .unwrap_or(Value::Null),
            Source::Left(i) => left.map(|row| row[i].clone()).unwrap_or(Value::Null),
            Source::Right(i) => right.map(|row| row[i].clone()).unwrap_or(Value::Null),
        })
        .collect()
}

/// Merge two tables and classify every resulting row by merge type.
///
/// Rows follow the left table for `left`, `inner` and `cross` joins and the right
/// table for `right` joins. Outer joins are sorted by key, with rows sharing a key
/// kept in left-then-right order. Non-key columns present on both sides get `_x`
/// and `_y` suffixes.
pub fn indicate_merge(
    left: &Table,
    right: &Table,
    how: MergeHow,
    on: &[&str],
) -> Result<(Table, MergeReport)> {
    if how == MergeHow::Cross {
        if !on.is_empty() {
            return Err(Error::InvalidMerge(
                "cross joins cannot take key columns".to_string(),
            ));
        }
    } else if on.is_empty() {
        return Err(Error::InvalidMerge(format!(
            "{} join needs at least one key column",
            how
        )));
    }

    let left_keys = key_indices(left, on, "left")?;
    let right_keys = key_indices(right, on, "right")?;
    let left_counts = key_counts(left, &left_keys);
    let right_counts = key_counts(right, &right_keys);
    let is_dup = |counts: &HashMap<Vec<Value>, usize>, key: &Vec<Value>| {
        counts.get(key).copied().unwrap_or(0) > 1
    };

    let mut right_index: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        right_index.entry(key_of(row, &right_keys)).or_default().push(i);
    }
    let mut left_index: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
    for (i, row) in left.rows.iter().enumerate() {
        left_index.entry(key_of(row, &left_keys)).or_default().push(i);
    }

    let (columns, sources) = layout(left, right, on);

    // (sort key, row, merge type)
    let mut merged: Vec<(Vec<Value>, Vec<Value>, MergeType)> = Vec::new();

    match how {
        MergeHow::Cross => {
            let dup_left = left.len() > 1;
            let dup_right = right.len() > 1;
            for l in &left.rows {
                for r in &right.rows {
                    let row = build_row(&sources, Some(l.as_slice()), Some(r.as_slice()));
                    merged.push((Vec::new(), row, classify(Side::Both, dup_left, dup_right)));
                }
            }
        }
        MergeHow::Right => {
            for r in &right.rows {
                let key = key_of(r, &right_keys);
                let dup_left = is_dup(&left_counts, &key);
                let dup_right = is_dup(&right_counts, &key);
                match left_index.get(&key) {
                    Some(matches) => {
                        for &li in matches {
                            let l = left.rows[li].as_slice();
                            let row = build_row(&sources, Some(l), Some(r.as_slice()));
                            let merge_type = classify(Side::Both, dup_left, dup_right);
                            merged.push((key.clone(), row, merge_type));
                        }
                    }
                    None => {
                        let row = build_row(&sources, None, Some(r.as_slice()));
                        let merge_type = classify(Side::RightOnly, dup_left, dup_right);
                        merged.push((key, row, merge_type));
                    }
                }
            }
        }
        MergeHow::Left | MergeHow::Inner | MergeHow::Outer => {
            for l in &left.rows {
                let key = key_of(l, &left_keys);
                let dup_left = is_dup(&left_counts, &key);
                let dup_right = is_dup(&right_counts, &key);
                match right_index.get(&key) {
                    Some(matches) => {
                        for &ri in matches {
                            let r = right.rows[ri].as_slice();
                            let row = build_row(&sources, Some(l.as_slice()), Some(r));
                            let merge_type = classify(Side::Both, dup_left, dup_right);
                            merged.push((key.clone(), row, merge_type));
                        }
                    }
                    None if how != MergeHow::Inner => {
                        let row = build_row(&sources, Some(l.as_slice()), None);
                        let merge_type = classify(Side::LeftOnly, dup_left, dup_right);
                        merged.push((key, row, merge_type));
                    }
                    None => {}
                }
            }
            if how == MergeHow::Outer {
                for r in &right.rows {
                    let key = key_of(r, &right_keys);
                    if left_index.contains_key(&key) {
                        continue;
                    }
                    let dup_right = is_dup(&right_counts, &key);
                    let row = build_row(&sources, None, Some(r.as_slice()));
                    merged.push((key, row, classify(Side::RightOnly, false, dup_right)));
                }
                merged.sort_by(|a, b| a.0.cmp(&b.0));
            }
        }
    }

    let mut counts: HashMap<MergeType, usize> = HashMap::new();
    for (_, _, merge_type) in &merged {
        *counts.entry(*merge_type).or_insert(0) += 1;
    }
    let mut counts: Vec<(MergeType, usize)> = counts.into_iter().collect();
    counts.sort_by_key(|(t, _)| t.to_string());

    let report = MergeReport {
        total: merged.len(),
        counts,
    };
    info!(how = %how, total = report.total, "sum of entries after merge");
    for (merge_type, n) in &report.counts {
        info!(merge_type = %merge_type, count = n, "entries of merge type");
    }

    let table = Table {
        columns,
        rows: merged.into_iter().map(|(_, row, _)| row).collect(),
    };
    Ok((table, report))
}
