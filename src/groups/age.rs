use super::{render_or, Group, Unmatched};
use crate::models::DisplayFormat;

/// Age groups used in sickness-absence statistics (SYKEFR).
pub const DETAILED_GROUPS: [Group; 14] = [
    Group { code: "1", label: "16-19 år" },
    Group { code: "2", label: "20-24 år" },
    Group { code: "3", label: "25-29 år" },
    Group { code: "4", label: "30-34 år" },
    Group { code: "5", label: "35-39 år" },
    Group { code: "6", label: "40-44 år" },
    Group { code: "7", label: "45-49 år" },
    Group { code: "8", label: "50-54 år" },
    Group { code: "9", label: "55-59 år" },
    Group { code: "10", label: "60-64 år" },
    Group { code: "11", label: "65-66 år" },
    Group { code: "12", label: "67 år" },
    Group { code: "13", label: "68 år" },
    Group { code: "14", label: "69 år" },
];

/// Age bands used in wage statistics (ARBLONN).
pub const FIVE_GROUPS: [Group; 5] = [
    Group { code: "1", label: "-24" },
    Group { code: "2", label: "25-39" },
    Group { code: "3", label: "40-54" },
    Group { code: "4", label: "55-66" },
    Group { code: "5", label: "67+" },
];

const DETAILED_UNMATCHED: Unmatched = Unmatched::uniform(".");
const FIVE_UNMATCHED: Unmatched = Unmatched::uniform("");

/// SYKEFR group for one age; ages outside 16-69 have none.
pub fn detailed_group(age: i64) -> Option<&'static Group> {
    let idx = match age {
        16..=64 => ((age - 15) / 5) as usize,
        65 | 66 => 10,
        67 => 11,
        68 => 12,
        69 => 13,
        _ => return None,
    };
    Some(&DETAILED_GROUPS[idx])
}

/// ARBLONN band for one age; negative ages have none.
pub fn five_group(age: i64) -> Option<&'static Group> {
    let idx = match age {
        0..=24 => 0,
        25..=39 => 1,
        40..=54 => 2,
        55..=66 => 3,
        67.. => 4,
        _ => return None,
    };
    Some(&FIVE_GROUPS[idx])
}

/// Group a column of ages into the 14 SYKEFR groups. Unmatched ages render as `"."`.
pub fn age_group_detailed<I>(ages: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<Option<i64>>,
{
    ages.into_iter()
        .map(|a| render_or(a.into().and_then(detailed_group), display, &DETAILED_UNMATCHED))
        .collect()
}

/// Group a column of ages into the five ARBLONN bands. Unmatched ages render empty.
pub fn age_group_5<I>(ages: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<Option<i64>>,
{
    ages.into_iter()
        .map(|a| render_or(a.into().and_then(five_group), display, &FIVE_UNMATCHED))
        .collect()
}
