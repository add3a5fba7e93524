use super::{render_or, Group, Unmatched};
use crate::models::DisplayFormat;

/// Public-sector groups for wage statistics.
pub const GROUPS: [Group; 5] = [
    Group { code: "110", label: "Statlig forvaltning" },
    Group { code: "550", label: "Kommunal forvaltning" },
    Group { code: "510", label: "Fylkeskommunal forvaltning" },
    Group { code: "660", label: "Kommunale foretak med ubegrenset ansvar" },
    Group { code: "680", label: "Kommunalt eide aksjeselskaper m.v." },
];

const UNMATCHED: Unmatched = Unmatched {
    label: "Uoppgitt",
    number: "999",
    combined: "999 Uoppgitt",
};

/// Subsector that separates county authorities from municipalities in sector 6500.
const COUNTY_SUBSECTOR: &str = "007";

/// Group for one sector/subsector pair. A missing subsector counts as "not 007".
pub fn sector_group_of(sector: &str, subsector: Option<&str>) -> Option<&'static Group> {
    let idx = match (sector, subsector) {
        ("6100", _) => 0,
        ("6500", Some(COUNTY_SUBSECTOR)) => 2,
        ("6500", _) => 1,
        ("1510", _) => 3,
        ("1520", _) => 4,
        _ => return None,
    };
    Some(&GROUPS[idx])
}

/// Group parallel columns of sector and subsector codes.
pub fn sector_group<'a, I>(pairs: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    pairs
        .into_iter()
        .map(|(sector, subsector)| {
            let group = sector.and_then(|s| sector_group_of(s, subsector));
            render_or(group, display, &UNMATCHED)
        })
        .collect()
}
