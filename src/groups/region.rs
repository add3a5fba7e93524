use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::KlassConfig;
use crate::error::{Error, Result};
use crate::klass::KlassClient;

/// County code used by KLASS for "unknown county"; never a valid county.
const UNKNOWN_COUNTY: &str = "99";
/// Non-mainland codes kept as-is by detailed county classification.
const DETAILED_NOT_MAINLAND: [&str; 4] = ["21", "22", "23", "24"];

pub const MAINLAND: &str = "FNorge";
pub const NOT_MAINLAND: &str = "IFNorge";
pub const UNSPECIFIED: &str = "Uoppgitt";

/// County and regional special codes valid in one year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionCodes {
    /// Valid county codes, `"99"` excluded.
    pub counties: Vec<String>,
    /// Regional special codes such as Svalbard and Jan Mayen.
    pub special: Vec<String>,
}

impl RegionCodes {
    pub fn new(counties: Vec<String>, special: Vec<String>) -> Self {
        let counties = counties
            .into_iter()
            .filter(|c| c != UNKNOWN_COUNTY)
            .collect();
        RegionCodes { counties, special }
    }

    /// Fetch both code lists from KLASS for January 1st of `year`.
    pub async fn fetch(client: &KlassClient, config: &KlassConfig, year: i32) -> Result<Self> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::InvalidYear(year.to_string()))?;

        let (counties, special) = futures::try_join!(
            client.fetch_codes(config.county_classification, from),
            client.fetch_codes(config.special_region_classification, from),
        )?;

        let codes = RegionCodes::new(
            counties.into_iter().map(|c| c.code).collect(),
            special.into_iter().map(|c| c.code).collect(),
        );
        info!(
            year,
            counties = codes.counties.len(),
            special = codes.special.len(),
            "loaded regional codes"
        );
        Ok(codes)
    }

    fn is_county(&self, code: &str) -> bool {
        self.counties.iter().any(|c| c == code)
    }

    fn is_special(&self, code: &str) -> bool {
        self.special.iter().any(|c| c == code)
    }
}

fn county_prefix(municipality: &str) -> String {
    municipality.chars().take(2).collect()
}

/// Mainland (`FNorge`), non-mainland (`IFNorge`) or `Uoppgitt` for one municipality.
pub fn mainland_of(municipality: Option<&str>, codes: &RegionCodes) -> &'static str {
    let Some(m) = municipality else {
        return UNSPECIFIED;
    };
    let county = county_prefix(m);
    if codes.is_county(&county) {
        MAINLAND
    } else if codes.is_special(&county) {
        NOT_MAINLAND
    } else {
        UNSPECIFIED
    }
}

/// County for one municipality, with non-mainland fallbacks.
///
/// Valid counties are kept. In detailed mode, codes 21-24 are kept and
/// everything else becomes `99`; otherwise special codes become `99g`.
pub fn county_of(municipality: Option<&str>, codes: &RegionCodes, detailed: bool) -> String {
    let Some(m) = municipality else {
        return UNKNOWN_COUNTY.to_string();
    };
    let county = county_prefix(m);
    if codes.is_county(&county) {
        return county;
    }
    if detailed {
        if DETAILED_NOT_MAINLAND.contains(&county.as_str()) {
            county
        } else {
            UNKNOWN_COUNTY.to_string()
        }
    } else if codes.is_special(&county) {
        "99g".to_string()
    } else {
        UNKNOWN_COUNTY.to_string()
    }
}

/// Classify a column of municipality numbers as mainland or not.
pub fn classify_mainland<'a, I>(municipalities: I, codes: &RegionCodes) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    municipalities
        .into_iter()
        .map(|m| mainland_of(m, codes).to_string())
        .collect()
}

/// Classify a column of municipality numbers into counties.
pub fn classify_county<'a, I>(
    municipalities: I,
    codes: &RegionCodes,
    detailed: bool,
) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    municipalities
        .into_iter()
        .map(|m| county_of(m, codes, detailed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> RegionCodes {
        RegionCodes::new(
            ["03", "11", "15", "18", "31", "99"].iter().map(|s| s.to_string()).collect(),
            ["21", "22", "23"].iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_unknown_county_removed() {
        let c = codes();
        assert!(!c.counties.contains(&"99".to_string()));
        let mut sorted = c.counties.clone();
        sorted.sort();
        assert_eq!(sorted[0], "03");
    }

    #[test]
    fn test_classify_mainland() {
        let municipalities = [Some("0301"), Some("2100"), Some("9999"), None];
        assert_eq!(
            classify_mainland(municipalities, &codes()),
            vec!["FNorge", "IFNorge", "Uoppgitt", "Uoppgitt"]
        );
    }

    #[test]
    fn test_classify_county_detailed() {
        let municipalities = [Some("0301"), Some("2111"), Some("2400"), Some("2500"), None];
        assert_eq!(
            classify_county(municipalities, &codes(), true),
            vec!["03", "21", "24", "99", "99"]
        );
    }

    #[test]
    fn test_classify_county_simplified() {
        let municipalities = [Some("1508"), Some("2111"), Some("2400"), Some("9999")];
        assert_eq!(
            classify_county(municipalities, &codes(), false),
            vec!["15", "99g", "99", "99"]
        );
    }
}
