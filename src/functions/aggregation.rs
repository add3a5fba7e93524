//! Totals and subtotals over every combination of grouping columns.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::error::{Error, Result};
use crate::models::AggFunc;
use crate::table::{Table, Value};

/// Value columns paired with the functions applied to them, in output order.
pub type AggSpec = Vec<(String, Vec<AggFunc>)>;

pub const TOTAL: &str = "Total";
pub const LEVEL_COLUMN: &str = "level";

/// All index combinations of size `k` out of `n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return out;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

fn aggregate(func: AggFunc, values: &[&Value]) -> Value {
    let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_null()).collect();
    let numbers = || present.iter().filter_map(|v| v.as_f64()).collect::<Vec<f64>>();

    match func {
        AggFunc::Sum => {
            let int_sum = present.iter().try_fold(0i64, |acc, v| match v {
                Value::Int(i) => acc.checked_add(*i),
                _ => None,
            });
            // Falls back to a float sum on mixed columns and on i64 overflow.
            match int_sum {
                Some(total) => Value::Int(total),
                None => Value::Float(numbers().iter().sum()),
            }
        }
        AggFunc::Mean => {
            let nums = numbers();
            if nums.is_empty() {
                Value::Null
            } else {
                Value::Float(nums.iter().sum::<f64>() / nums.len() as f64)
            }
        }
        AggFunc::Median => {
            let mut nums = numbers();
            if nums.is_empty() {
                return Value::Null;
            }
            nums.sort_by(|a, b| a.total_cmp(b));
            let mid = nums.len() / 2;
            if nums.len() % 2 == 0 {
                Value::Float((nums[mid - 1] + nums[mid]) / 2.0)
            } else {
                Value::Float(nums[mid])
            }
        }
        AggFunc::Min => present.iter().min().map(|v| (*v).clone()).unwrap_or(Value::Null),
        AggFunc::Max => present.iter().max().map(|v| (*v).clone()).unwrap_or(Value::Null),
        AggFunc::Count => Value::Int(present.len() as i64),
        AggFunc::Nunique => {
            let distinct: HashSet<&Value> = present.iter().copied().collect();
            Value::Int(distinct.len() as i64)
        }
        AggFunc::First => present.first().map(|v| (*v).clone()).unwrap_or(Value::Null),
        AggFunc::Last => present.last().map(|v| (*v).clone()).unwrap_or(Value::Null),
    }
}

fn output_columns(groups: &[&str], spec: &AggSpec) -> Vec<String> {
    let mut columns: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
    for (col, funcs) in spec {
        if funcs.len() == 1 {
            columns.push(col.clone());
        } else {
            columns.extend(funcs.iter().map(|f| format!("{}_{}", col, f)));
        }
    }
    columns.push(LEVEL_COLUMN.to_string());
    columns
}

/// Aggregate `table` for the grand total and for every combination of `groups`.
///
/// Level 0 is the grand total, level `i` groups by `i` of the columns. Group
/// columns not used at a level hold `"Total"`. Rows with a missing value in a
/// grouping column are left out of that grouping. Whole-number float keys are
/// grouped, and written, as integers.
///
/// When `values` is `None` the keys of `agg` are used; when `agg` is `None`
/// every value column is summed and must be numeric.
#[deprecated(note = "use the all-combinations aggregator of the SSB toolkit instead")]
pub fn proc_sums(
    table: &Table,
    groups: &[&str],
    values: Option<&[&str]>,
    agg: Option<&[(String, Vec<AggFunc>)]>,
) -> Result<Table> {
    warn!("proc_sums is outdated; use the all-combinations aggregator instead");

    let values: Vec<String> = match (values, agg) {
        (Some(v), _) => v.iter().map(|s| s.to_string()).collect(),
        (None, Some(a)) => a.iter().map(|(c, _)| c.clone()).collect(),
        (None, None) => Vec::new(),
    };

    let mut required: Vec<&str> = Vec::new();
    let agg_columns = agg.into_iter().flatten().map(|(c, _)| c.as_str());
    for col in groups
        .iter()
        .copied()
        .chain(values.iter().map(String::as_str))
        .chain(agg_columns)
    {
        if !required.contains(&col) {
            required.push(col);
        }
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|c| table.column_index(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let spec: AggSpec = match agg {
        Some(a) => a.to_vec(),
        None => {
            let non_numeric: Vec<String> = values
                .iter()
                .filter(|c| {
                    table
                        .column(c)
                        .map(|col| col.iter().any(|v| !v.is_null() && !v.is_numeric()))
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
            if !non_numeric.is_empty() {
                return Err(Error::NonNumericColumns(non_numeric));
            }
            values.iter().map(|c| (c.clone(), vec![AggFunc::Sum])).collect()
        }
    };

    let group_idx: Vec<usize> = groups
        .iter()
        .filter_map(|g| table.column_index(g))
        .collect();
    let spec_idx: Vec<(usize, &Vec<AggFunc>)> = spec
        .iter()
        .filter_map(|(c, funcs)| table.column_index(c).map(|i| (i, funcs)))
        .collect();

    let mut result = Table::new(output_columns(groups, &spec));

    let summarize = |rows: &[usize]| -> Vec<Value> {
        let mut out = Vec::new();
        for (col, funcs) in &spec_idx {
            let column: Vec<&Value> = rows.iter().map(|&r| &table.rows[r][*col]).collect();
            out.extend(funcs.iter().map(|f| aggregate(*f, &column)));
        }
        out
    };

    let all_rows: Vec<usize> = (0..table.len()).collect();
    let mut total_row: Vec<Value> = groups.iter().map(|_| Value::from(TOTAL)).collect();
    total_row.extend(summarize(&all_rows));
    total_row.push(Value::Int(0));
    result.push_row(total_row)?;

    for level in 1..=groups.len() {
        for subset in combinations(groups.len(), level) {
            let mut buckets: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
            for (r, row) in table.rows.iter().enumerate() {
                let key: Vec<Value> = subset.iter().map(|&g| row[group_idx[g]].key()).collect();
                if key.iter().any(Value::is_null) {
                    continue;
                }
                buckets.entry(key).or_default().push(r);
            }

            for (key, rows) in buckets {
                let mut out: Vec<Value> = (0..groups.len())
                    .map(|g| match subset.iter().position(|&s| s == g) {
                        Some(p) => key[p].clone(),
                        None => Value::from(TOTAL),
                    })
                    .collect();
                out.extend(summarize(&rows));
                out.push(Value::Int(level as i64));
                result.push_row(out)?;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let text = r#"[
            {"A": "foo", "B": "one", "C": 1, "D": 10, "E": "1"},
            {"A": "foo", "B": "one", "C": 2, "D": 20, "E": "0"},
            {"A": "foo", "B": "two", "C": 3, "D": 30, "E": "1"},
            {"A": "bar", "B": "two", "C": 4, "D": 40, "E": "1"},
            {"A": "bar", "B": "two", "C": 5, "D": 50, "E": "0"},
            {"A": "bar", "B": "two", "C": 6, "D": 60, "E": "1"}
        ]"#;
        Table::from_json_records(text).unwrap()
    }

    fn column(table: &Table, name: &str) -> Vec<Value> {
        table.column(name).unwrap().into_iter().cloned().collect()
    }

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| Value::Int(*v)).collect()
    }

    #[test]
    fn test_combinations() {
        assert_eq!(combinations(3, 2), vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
        assert_eq!(combinations(2, 2), vec![vec![0, 1]]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn test_default_sum() {
        let result = proc_sums(&sample(), &["A", "B"], Some(&["C"][..]), None).unwrap();
        assert_eq!(result.columns, vec!["A", "B", "C", "level"]);
        assert_eq!(
            column(&result, "A"),
            texts(&["Total", "bar", "foo", "Total", "Total", "bar", "foo", "foo"])
        );
        assert_eq!(
            column(&result, "B"),
            texts(&["Total", "Total", "Total", "one", "two", "two", "one", "two"])
        );
        assert_eq!(column(&result, "C"), ints(&[21, 15, 6, 3, 18, 15, 3, 3]));
        assert_eq!(column(&result, "level"), ints(&[0, 1, 1, 1, 1, 2, 2, 2]));
    }

    #[test]
    fn test_custom_aggregations() {
        let agg = vec![
            ("C".to_string(), vec![AggFunc::Sum]),
            ("D".to_string(), vec![AggFunc::Mean]),
        ];
        let values = ["C", "D"];
        let result = proc_sums(&sample(), &["A", "B"], Some(&values[..]), Some(agg.as_slice()))
            .unwrap();
        let means: Vec<Value> = [35.0, 50.0, 20.0, 15.0, 45.0, 50.0, 15.0, 30.0]
            .iter()
            .map(|v| Value::Float(*v))
            .collect();
        assert_eq!(column(&result, "D"), means);
        assert_eq!(column(&result, "C"), ints(&[21, 15, 6, 3, 18, 15, 3, 3]));
    }

    #[test]
    fn test_count_nunique_on_text() {
        let agg = vec![("E".to_string(), vec![AggFunc::Count, AggFunc::Nunique])];
        let result = proc_sums(&sample(), &["B"], None, Some(agg.as_slice())).unwrap();
        assert_eq!(result.columns, vec!["B", "E_count", "E_nunique", "level"]);
        assert_eq!(column(&result, "B"), texts(&["Total", "one", "two"]));
        assert_eq!(column(&result, "E_count"), ints(&[6, 2, 4]));
        assert_eq!(column(&result, "E_nunique"), ints(&[2, 2, 2]));
        assert_eq!(column(&result, "level"), ints(&[0, 1, 1]));
    }

    #[test]
    fn test_null_keys_dropped() {
        let table = Table::from_json_records(
            r#"[{"g": "a", "v": 1}, {"g": null, "v": 2}, {"g": "a", "v": 3}]"#,
        )
        .unwrap();
        let result = proc_sums(&table, &["g"], Some(&["v"][..]), None).unwrap();
        assert_eq!(column(&result, "v"), ints(&[6, 4]));
    }

    #[test]
    fn test_int_sum_overflow_becomes_float() {
        let table = Table::from_json_records(
            r#"[{"g": "a", "v": 9223372036854775807}, {"g": "a", "v": 1}]"#,
        )
        .unwrap();
        let result = proc_sums(&table, &["g"], Some(&["v"][..]), None).unwrap();
        let expected = Value::Float(2f64.powi(63));
        assert_eq!(column(&result, "v"), vec![expected.clone(), expected]);
    }

    #[test]
    fn test_agg_column_must_exist() {
        let table = Table::from_json_records(r#"[{"g": "a", "v": 1}]"#).unwrap();
        let agg = vec![("zz".to_string(), vec![AggFunc::Sum])];
        assert!(matches!(
            proc_sums(&table, &["g"], Some(&["v"][..]), Some(agg.as_slice())),
            Err(Error::MissingColumns(cols)) if cols == vec!["zz".to_string()]
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            proc_sums(&sample(), &["A", "X"], Some(&["C"][..]), None),
            Err(Error::MissingColumns(cols)) if cols == vec!["X".to_string()]
        ));
        assert!(matches!(
            proc_sums(&sample(), &["A"], Some(&["E"][..]), None),
            Err(Error::NonNumericColumns(_))
        ));
    }

    #[test]
    fn test_aggregate_functions() {
        let values = [Value::Int(3), Value::Null, Value::Int(1), Value::Float(2.0)];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(aggregate(AggFunc::Sum, &refs), Value::Float(6.0));
        assert_eq!(aggregate(AggFunc::Median, &refs), Value::Float(2.0));
        assert_eq!(aggregate(AggFunc::Min, &refs), Value::Int(1));
        assert_eq!(aggregate(AggFunc::Max, &refs), Value::Int(3));
        assert_eq!(aggregate(AggFunc::Count, &refs), Value::Int(3));
        assert_eq!(aggregate(AggFunc::First, &refs), Value::Int(3));
        assert_eq!(aggregate(AggFunc::Last, &refs), Value::Float(2.0));
        assert_eq!(aggregate(AggFunc::Mean, &[]), Value::Null);
    }
}
