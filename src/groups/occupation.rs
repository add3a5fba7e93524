/// Main group shared by armed forces occupations and STYRK major group 3.
pub const ARMED_FORCES_AND_TECHNICIANS: &str = "3_01-03";
/// Code for missing or invalid occupation codes.
pub const INVALID_OCCUPATION: &str = "0b";

/// STYRK-08 main group for one occupation code, as used by register system 1.
///
/// Codes starting with `01`, `02` or `03` (armed forces) are pooled with major
/// group 3. Otherwise the first digit 1-9 is the group.
pub fn main_group(code: &str) -> String {
    let first2: String = code.chars().take(2).collect();
    if matches!(first2.as_str(), "01" | "02" | "03") || code.starts_with('3') {
        return ARMED_FORCES_AND_TECHNICIANS.to_string();
    }
    match code.chars().next() {
        Some(c @ '1'..='9') => c.to_string(),
        _ => INVALID_OCCUPATION.to_string(),
    }
}

/// Classify a column of occupation codes (at least two digits each).
pub fn occupation_main_group<'a, I>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    codes
        .into_iter()
        .map(|c| c.map(main_group).unwrap_or_else(|| INVALID_OCCUPATION.to_string()))
        .collect()
}
