use super::{render_or, Group, Unmatched};
use crate::models::DisplayFormat;

/// Employee-count bands for enterprises and establishments.
pub const GROUPS: [Group; 8] = [
    Group { code: "1", label: "Ingen ansatte" },
    Group { code: "2", label: "1-4 ansatte" },
    Group { code: "3", label: "5-9 ansatte" },
    Group { code: "4", label: "10-19 ansatte" },
    Group { code: "5", label: "20-49 ansatte" },
    Group { code: "6", label: "50-99 ansatte" },
    Group { code: "7", label: "100-249 ansatte" },
    Group { code: "8", label: "250 ansatte og over" },
];

const UNMATCHED: Unmatched = Unmatched {
    label: "Uoppgitt",
    number: "99",
    combined: "99 Uoppgitt",
};

pub fn size_group(employees: i64) -> Option<&'static Group> {
    let idx = match employees {
        0 => 0,
        1..=4 => 1,
        5..=9 => 2,
        10..=19 => 3,
        20..=49 => 4,
        50..=99 => 5,
        100..=249 => 6,
        250.. => 7,
        _ => return None,
    };
    Some(&GROUPS[idx])
}

/// Group a column of employee counts into eight size bands.
pub fn company_size_group<I>(employees: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<Option<i64>>,
{
    employees
        .into_iter()
        .map(|n| render_or(n.into().and_then(size_group), display, &UNMATCHED))
        .collect()
}
