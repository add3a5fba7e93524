use super::{Group, Unmatched};
use crate::models::DisplayFormat;

/// World regions for three-generation country background, in priority order.
pub const GROUPS: [Group; 8] = [
    Group { code: "00", label: "Norden" },
    Group { code: "194", label: "Vest-Europa ellers" },
    Group { code: "015a", label: "EU-land i Øst-Europa" },
    Group { code: "100c", label: "Øst-Europa ellers" },
    Group { code: "694c", label: "Nord-Amerika, Oseania" },
    Group { code: "400", label: "Asia" },
    Group { code: "200b", label: "Afrika" },
    Group { code: "794a", label: "Sør- og Mellom-Amerika" },
];

/// Region codes used in wage statistics, parallel to [`GROUPS`].
pub const ARBLONN_CODES: [&str; 8] = ["200", "2", "3", "40", "350", "60", "5", "8"];

const UNMATCHED: Unmatched = Unmatched {
    label: "Ukjent",
    number: "990",
    combined: "990 Ukjent",
};
const ARBLONN_UNMATCHED: &str = "980-990";

const WESTERN_EUROPE: [i64; 28] = [
    112, 114, 117, 118, 119, 121, 123, 126, 127, 128, 129, 130, 132, 134, 137, 139, 141, 144,
    151, 153, 154, 162, 163, 164, 194, 196, 199, 500,
];
const EU_EASTERN_EUROPE: [i64; 12] = [113, 115, 122, 124, 131, 133, 136, 142, 146, 152, 157, 158];
const OTHER_EASTERN_EUROPE: [i64; 13] =
    [111, 120, 125, 135, 138, 140, 148, 155, 156, 159, 160, 161, 195];

/// Index into [`GROUPS`] for a numeric country code.
pub fn region_index(code: i64) -> Option<usize> {
    if (0..=106).contains(&code) {
        Some(0)
    } else if WESTERN_EUROPE.contains(&code) {
        Some(1)
    } else if EU_EASTERN_EUROPE.contains(&code) {
        Some(2)
    } else if OTHER_EASTERN_EUROPE.contains(&code) {
        Some(3)
    } else if code == 612 || code == 684 || (802..=899).contains(&code) {
        Some(4)
    } else if code == 143 || (404..=496).contains(&code) || (502..=599).contains(&code) {
        Some(5)
    } else if (203..=399).contains(&code) {
        Some(6)
    } else if (601..=608).contains(&code)
        || (613..=681).contains(&code)
        || (685..=799).contains(&code)
    {
        Some(7)
    } else {
        None
    }
}

fn render(idx: Option<usize>, display: DisplayFormat) -> String {
    match (idx, display) {
        (Some(i), DisplayFormat::Arblonn) => ARBLONN_CODES[i].to_string(),
        (None, DisplayFormat::Arblonn) => ARBLONN_UNMATCHED.to_string(),
        (Some(i), _) => GROUPS[i].render(display),
        (None, _) => UNMATCHED.render(display),
    }
}

/// Group a column of country-background codes (e.g. `"005"`) into world regions.
///
/// Codes that are missing or not numeric are unmatched.
pub fn world_region_group<'a, I>(origins: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    origins
        .into_iter()
        .map(|origin| {
            let idx = origin
                .and_then(|s| s.trim().parse::<i64>().ok())
                .and_then(region_index);
            render(idx, display)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_index() {
        assert_eq!(region_index(0), Some(0));
        assert_eq!(region_index(106), Some(0));
        assert_eq!(region_index(112), Some(1));
        assert_eq!(region_index(500), Some(1));
        assert_eq!(region_index(113), Some(2));
        assert_eq!(region_index(111), Some(3));
        assert_eq!(region_index(684), Some(4));
        assert_eq!(region_index(143), Some(5));
        assert_eq!(region_index(501), None);
        assert_eq!(region_index(203), Some(6));
        assert_eq!(region_index(612), Some(4));
        assert_eq!(region_index(610), None);
        assert_eq!(region_index(799), Some(7));
        assert_eq!(region_index(990), None);
    }

    #[test]
    fn test_display_formats() {
        let origins = [Some("005"), Some("404"), Some("x"), None];
        assert_eq!(
            world_region_group(origins, DisplayFormat::Label),
            vec!["Norden", "Asia", "Ukjent", "Ukjent"]
        );
        assert_eq!(
            world_region_group(origins, DisplayFormat::Number),
            vec!["00", "400", "990", "990"]
        );
        assert_eq!(
            world_region_group(origins, DisplayFormat::Arblonn),
            vec!["200", "60", "980-990", "980-990"]
        );
        assert_eq!(
            world_region_group(origins, DisplayFormat::Combined),
            vec!["00 Norden", "400 Asia", "990 Ukjent", "990 Ukjent"]
        );
    }

    #[test]
    fn test_every_code_below_800_renders() {
        for code in 0..800 {
            let s = format!("{:03}", code);
            let out = world_region_group([Some(s.as_str())], DisplayFormat::Number);
            assert!(!out[0].is_empty());
        }
    }
}
