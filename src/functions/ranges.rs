use crate::config::RangeFormats;
use crate::error::{Error, Result};

/// Sorted left-closed bins built from one named range format.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    cutoffs: Vec<(f64, String)>,
}

impl Bins {
    /// Look up `format_name` and sort its cut-offs numerically.
    pub fn from_formats(format_name: &str, formats: &RangeFormats) -> Result<Self> {
        let format = formats
            .get(format_name)
            .ok_or_else(|| Error::UnknownFormat(format_name.to_string()))?;

        let mut cutoffs = Vec::with_capacity(format.len());
        for (key, label) in format {
            if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::NonDigitKeys(format_name.to_string()));
            }
            let cutoff: f64 = key
                .parse()
                .map_err(|_| Error::NonDigitKeys(format_name.to_string()))?;
            cutoffs.push((cutoff, label.clone()));
        }
        cutoffs.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Bins { cutoffs })
    }

    /// Label of the bin `[k_i, k_{i+1})` containing `value`; the last bin is open-ended.
    pub fn categorize(&self, value: f64) -> Option<&str> {
        if !value.is_finite() {
            return None;
        }
        let idx = self.cutoffs.partition_point(|(cutoff, _)| *cutoff <= value);
        idx.checked_sub(1).map(|i| self.cutoffs[i].1.as_str())
    }
}

/// Categorize values by the named range format.
///
/// Values below the first cut-off, missing values and non-finite values give `None`.
pub fn categorize_ranges(
    values: &[Option<f64>],
    format_name: &str,
    formats: &RangeFormats,
) -> Result<Vec<Option<String>>> {
    let bins = Bins::from_formats(format_name, formats)?;
    Ok(values
        .iter()
        .map(|v| v.and_then(|x| bins.categorize(x)).map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn formats(entries: &[(&str, &str)]) -> RangeFormats {
        let format: BTreeMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut formats = RangeFormats::new();
        formats.insert("example_format".to_string(), format);
        formats
    }

    fn example() -> RangeFormats {
        formats(&[("10", "Low"), ("20", "Medium"), ("30", "High")])
    }

    fn owned(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_categorize_ranges() {
        let values = [Some(5.0), Some(15.0), Some(25.0), None, Some(35.0), Some(45.0)];
        let result = categorize_ranges(&values, "example_format", &example()).unwrap();
        assert_eq!(
            result,
            owned(&[None, Some("Low"), Some("Medium"), None, Some("High"), Some("High")])
        );
    }

    #[test]
    fn test_edge_values_are_left_closed() {
        let values = [Some(10.0), Some(20.0), Some(30.0), Some(40.0)];
        let result = categorize_ranges(&values, "example_format", &example()).unwrap();
        assert_eq!(
            result,
            owned(&[Some("Low"), Some("Medium"), Some("High"), Some("High")])
        );
    }

    #[test]
    fn test_keys_sort_numerically() {
        let f = formats(&[("100", "Big"), ("9", "Small"), ("20", "Middle")]);
        let result = categorize_ranges(&[Some(15.0), Some(150.0)], "example_format", &f).unwrap();
        assert_eq!(result, owned(&[Some("Small"), Some("Big")]));
    }

    #[test]
    fn test_non_finite_is_none() {
        let result =
            categorize_ranges(&[Some(f64::INFINITY), Some(f64::NAN)], "example_format", &example())
                .unwrap();
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_unknown_format() {
        let err = categorize_ranges(&[Some(5.0)], "invalid_format", &example()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no format with name invalid_format within given dictionary"
        );
    }

    #[test]
    fn test_non_digit_keys() {
        let f = formats(&[("10", "Low"), ("twenty", "Medium"), ("30", "High")]);
        let err = categorize_ranges(&[Some(5.0)], "example_format", &f).unwrap_err();
        assert!(matches!(err, Error::NonDigitKeys(_)));
    }
}
