use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a grouping renders its result.
///
/// Parsing is lenient: `"label"`, `"number"` and `"arblonn"` select their
/// variants, anything else selects [`DisplayFormat::Combined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Group label, e.g. `"20-24 år"`.
    #[default]
    Label,
    /// Group code, e.g. `"2"`.
    Number,
    /// `"<code> <label>"`.
    Combined,
    /// Wage-statistics codes; only world-region grouping has its own set.
    Arblonn,
}

impl From<&str> for DisplayFormat {
    fn from(s: &str) -> Self {
        match s {
            "label" => DisplayFormat::Label,
            "number" => DisplayFormat::Number,
            "arblonn" => DisplayFormat::Arblonn,
            _ => DisplayFormat::Combined,
        }
    }
}

impl std::fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayFormat::Label => write!(f, "label"),
            DisplayFormat::Number => write!(f, "number"),
            DisplayFormat::Combined => write!(f, "combined"),
            DisplayFormat::Arblonn => write!(f, "arblonn"),
        }
    }
}

/// Period frequency for [`crate::functions::interval::pinterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Quarterly,
}

impl Frequency {
    /// Number of units in one year.
    pub fn units_per_year(self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    /// Only the first character counts, so `"m"`, `"monthly"` and `"Månedlig"` are
    /// all monthly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('m') => Ok(Frequency::Monthly),
            Some('q') => Ok(Frequency::Quarterly),
            _ => Err(Error::InvalidFrequency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Quarterly => write!(f, "quarterly"),
        }
    }
}

/// Join strategy for [`crate::functions::merge::indicate_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeHow {
    Left,
    Right,
    Outer,
    Inner,
    Cross,
}

impl std::fmt::Display for MergeHow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeHow::Left => write!(f, "left"),
            MergeHow::Right => write!(f, "right"),
            MergeHow::Outer => write!(f, "outer"),
            MergeHow::Inner => write!(f, "inner"),
            MergeHow::Cross => write!(f, "cross"),
        }
    }
}

/// Cardinality of a merged row, read left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeType {
    OneToZero,
    ZeroToOne,
    ManyToZero,
    ZeroToMany,
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl std::fmt::Display for MergeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeType::OneToZero => write!(f, "one-to-zero"),
            MergeType::ZeroToOne => write!(f, "zero-to-one"),
            MergeType::ManyToZero => write!(f, "many-to-zero"),
            MergeType::ZeroToMany => write!(f, "zero-to-many"),
            MergeType::OneToOne => write!(f, "one-to-one"),
            MergeType::ManyToOne => write!(f, "many-to-one"),
            MergeType::OneToMany => write!(f, "one-to-many"),
            MergeType::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Summary produced alongside a merged table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Number of rows after the merge.
    pub total: usize,
    /// Row count per merge type, ordered by type name.
    pub counts: Vec<(MergeType, usize)>,
}

impl MergeReport {
    pub fn count(&self, merge_type: MergeType) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| *t == merge_type)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Aggregation applied to a value column by [`crate::functions::aggregation::proc_sums`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    Sum,
    Mean,
    Median,
    Min,
    Max,
    Count,
    Nunique,
    First,
    Last,
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(AggFunc::Sum),
            "mean" => Ok(AggFunc::Mean),
            "median" => Ok(AggFunc::Median),
            "min" => Ok(AggFunc::Min),
            "max" => Ok(AggFunc::Max),
            "count" => Ok(AggFunc::Count),
            "nunique" => Ok(AggFunc::Nunique),
            "first" => Ok(AggFunc::First),
            "last" => Ok(AggFunc::Last),
            other => Err(Error::InvalidTable(format!(
                "unknown aggregation function '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AggFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggFunc::Sum => write!(f, "sum"),
            AggFunc::Mean => write!(f, "mean"),
            AggFunc::Median => write!(f, "median"),
            AggFunc::Min => write!(f, "min"),
            AggFunc::Max => write!(f, "max"),
            AggFunc::Count => write!(f, "count"),
            AggFunc::Nunique => write!(f, "nunique"),
            AggFunc::First => write!(f, "first"),
            AggFunc::Last => write!(f, "last"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format_lenient_parse() {
        assert_eq!(DisplayFormat::from("label"), DisplayFormat::Label);
        assert_eq!(DisplayFormat::from("number"), DisplayFormat::Number);
        assert_eq!(DisplayFormat::from("arblonn"), DisplayFormat::Arblonn);
        assert_eq!(DisplayFormat::from("combined"), DisplayFormat::Combined);
        assert_eq!(DisplayFormat::from("anything"), DisplayFormat::Combined);
    }

    #[test]
    fn test_frequency_first_letter() {
        assert_eq!("quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("M".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("yearly".parse::<Frequency>().is_err());
        assert!("".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_agg_func_parse() {
        assert_eq!("Nunique".parse::<AggFunc>().unwrap(), AggFunc::Nunique);
        assert!("variance".parse::<AggFunc>().is_err());
    }
}
