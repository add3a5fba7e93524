//! Number formatting for StatBank uploads: blanks for missing values, comma decimals.

/// Round half to even at `decimals` places; negative `decimals` round to tens,
/// hundreds and so on.
fn round_half_even(value: f64, decimals: i32) -> f64 {
    if decimals >= 0 {
        let scale = 10f64.powi(decimals);
        (value * scale).round_ties_even() / scale
    } else {
        let scale = 10f64.powi(-decimals);
        (value / scale).round_ties_even() * scale
    }
}

/// Float text with a fractional part always present, e.g. `50.0`.
fn float_repr(value: f64) -> String {
    let text = format!("{}", value);
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Round to the nearest `10^|unit|` and render as whole numbers.
///
/// Missing and non-finite values become empty strings.
pub fn sb_integer(values: &[Option<f64>], unit: i32) -> Vec<String> {
    let decimals = -unit.abs();
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => {
                let rounded = round_half_even(*x, decimals) as i64;
                rounded.to_string()
            }
            _ => String::new(),
        })
        .collect()
}

/// Render fractions as percentages rounded to `decimals` places, with a comma as
/// decimal separator.
pub fn sb_percent(values: &[Option<f64>], decimals: i32) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => {
                let percent = round_half_even(x * 100.0, decimals);
                if percent.is_finite() {
                    float_repr(percent).replace('.', ",")
                } else {
                    String::new()
                }
            }
            _ => String::new(),
        })
        .collect()
}
