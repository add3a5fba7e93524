use std::collections::HashMap;

use super::{render_or, Group, Unmatched};
use crate::error::Result;
use crate::klass::{KlassClient, KlassCode};
use crate::models::DisplayFormat;

/// The 47 SN2007 industry groups used in wage statistics.
pub const GROUPS_47: [Group; 47] = [
    Group { code: "01", label: "Jordbruk, skogbruk, fiske; Bergverksdrift og utvinning, utenom olje og gass" },
    Group { code: "02", label: "Annen utvinning; Bygging av skip og båter; Reparasjon og installasjon av maskiner og utstyr; Uoppgitt utvinning" },
    Group { code: "03", label: "Olje- og gassutvinning; Uoppgitt utvinning av petroleum" },
    Group { code: "04", label: "Næringsmiddel-,drikkev.,tobakkind." },
    Group { code: "05", label: "Tekstil-,bekledn.-,lærvareind." },
    Group { code: "06", label: "Trelast- og trevareind." },
    Group { code: "07", label: "Trykking, grafisk industri" },
    Group { code: "08", label: "Petrolieum, kull, kjemisk og farmasøytisk industri" },
    Group { code: "09", label: "Gummivare-, plast-,mineralproduktind." },
    Group { code: "10", label: "Metallindustri" },
    Group { code: "11", label: "Metallvareindustri" },
    Group { code: "12", label: "Data- og elektronisk industri" },
    Group { code: "13", label: "Maskinindustri" },
    Group { code: "14", label: "Transportmidelindustri, utenom 30.1; Produksjon av kjøretøy og tilhengere, unntatt motorvogner og motorsykler" },
    Group { code: "15", label: "Produksjon av skip og båter, inkl. oljeplattformer" },
    Group { code: "16", label: "Møbel og annen industri" },
    Group { code: "17", label: "Elekstrisitet, gass, damp, varmtvann" },
    Group { code: "18", label: "Vann, avløp og renovasjon" },
    Group { code: "19", label: "Bygge- og anleggsvirksomhet" },
    Group { code: "20", label: "Motorvognrep og -handel" },
    Group { code: "21", label: "Agentur- og engroshandel" },
    Group { code: "22", label: "Detaljhandel, unntatt motorvogner" },
    Group { code: "23", label: "Landtransport og rørtransport" },
    Group { code: "24", label: "Sjøfart" },
    Group { code: "25", label: "Lufttransport" },
    Group { code: "26", label: "Lagring og tjenester tilknyttet transport" },
    Group { code: "27", label: "Posttjenester" },
    Group { code: "28", label: "Overnattingsvirksomhet" },
    Group { code: "29", label: "Serveringsvirksomhet" },
    Group { code: "30", label: "Forlag, film-, TV-pr, kringkasting" },
    Group { code: "31", label: "IKT-virksomhet" },
    Group { code: "32", label: "Finansieringsvirksomhet (bank, m.m.)" },
    Group { code: "33", label: "Forsikringsvirksomhet og pensjonskasser" },
    Group { code: "34", label: "Finansiell tjenesteyting" },
    Group { code: "35", label: "Omsetning og drift av fast eiendom" },
    Group { code: "36", label: "Juridisk-, hovedkontor-, konsulentj." },
    Group { code: "37", label: "Forskning og utviklingsarbeid" },
    Group { code: "38", label: "Faglig, vitenskapelig og teknisk tjenesteyting ellers" },
    Group { code: "39", label: "Forretningsmessig tjenesteyting ellers" },
    Group { code: "40", label: "Off.adm., forsvar, sosialforsikring" },
    Group { code: "41", label: "Undervisning" },
    Group { code: "42", label: "Helsetjenester" },
    Group { code: "43", label: "Pleie og omsorg; Fritids- og sportsaktiviteter" },
    Group { code: "44", label: "Kultur, underholdning og fritid" },
    Group { code: "45", label: "Annen tjenesteyting" },
    Group { code: "46", label: "Lønnet husarbeid i private husholdninger" },
    Group { code: "47", label: "Internasjonale organisasjoner" },
];

const UNMATCHED_47: Unmatched = Unmatched {
    label: "Uoppgitt",
    number: "99",
    combined: "99 Uoppgitt",
};

/// Label used for divisions without a 17-group.
pub const UNKNOWN_17_LABEL: &str = "Uoppgitt";

/// The published industry groups with the divisions they cover.
const BUILTIN_17: [(u32, u32, &str, &str); 16] = [
    (1, 3, "01-03", "Jordbruk, skogbruk og fiske"),
    (5, 9, "05-09", "Bergverksdrift og utvinning"),
    (10, 33, "10-33", "Industri"),
    (35, 39, "35-39", "Elektrisitet, vann og renovasjon"),
    (41, 43, "41-43", "Bygge- og anleggsvirksomhet"),
    (45, 47, "45-47", "Varehandel, reparasjon av motorvogner"),
    (49, 53, "49-53", "Transport og lagring"),
    (55, 56, "55-56", "Overnattings- og serveringsvirksomhet"),
    (58, 63, "58-63", "Informasjon og kommunikasjon"),
    (64, 66, "64-66", "Finansiering og forsikring"),
    (68, 75, "68-75", "Teknisk tjenesteyting, eiendomsdrift"),
    (77, 82, "77-82", "Forretningsmessig tjenesteyting"),
    (84, 84, "84", "Off.adm., forsvar, sosialforsikring"),
    (85, 85, "85", "Undervisning"),
    (86, 88, "86-88", "Helse- og sosialtjenester"),
    (90, 99, "90-99", "Personlig tjenesteyting"),
];

/// Collapse a degenerate range such as `"84-84"` to `"84"`.
pub fn clean_nace_17_group(code: &str) -> String {
    if let Some((first, rest)) = code.split_once('-') {
        let second = rest.split('-').next().unwrap_or(rest);
        if first == second {
            return first.to_string();
        }
    }
    code.to_string()
}

/// Index into [`GROUPS_47`] from the numeric two- and three-digit prefixes.
/// The first matching rule wins.
pub fn group_index_47(nace2: Option<i64>, nace3: Option<i64>) -> Option<usize> {
    let n2 = nace2.unwrap_or(-1);
    let n3 = nace3.unwrap_or(-1);
    let idx = match (n2, n3) {
        (1..=3, _) => 0,
        (5 | 7 | 8, _) | (_, 99) => 1,
        (6, _) | (_, 91) => 2,
        (10..=12, _) => 3,
        (13..=15, _) => 4,
        (16 | 17, _) => 5,
        (18, _) => 6,
        (19..=21, _) => 7,
        (22 | 23, _) => 8,
        (24, _) => 9,
        (25, _) => 10,
        (26 | 27, _) => 11,
        (28, _) => 12,
        (29 | 33, _) | (_, 302..=309) => 13,
        (_, 301) => 14,
        (31 | 32, _) => 15,
        (35, _) => 16,
        (36..=39, _) => 17,
        (41..=43, _) => 18,
        (45, _) => 19,
        (46, _) => 20,
        (47, _) => 21,
        (49, _) => 22,
        (50, _) => 23,
        (51, _) => 24,
        (52, _) => 25,
        (53, _) => 26,
        (55, _) => 27,
        (56, _) => 28,
        (58..=60, _) => 29,
        (61..=63, _) => 30,
        (64, _) => 31,
        (65, _) => 32,
        (66, _) => 33,
        (68, _) => 34,
        (69..=71, _) => 35,
        (72, _) => 36,
        (73..=75, _) => 37,
        (77..=82, _) => 38,
        (84, _) => 39,
        (85, _) => 40,
        (86, _) => 41,
        (87 | 88, _) => 42,
        (90..=93, _) => 43,
        (94..=96, _) => 44,
        (97, _) => 45,
        (99, _) => 46,
        _ => return None,
    };
    Some(idx)
}

fn numeric_prefix(code: &str, len: usize) -> Option<i64> {
    let prefix: String = code.chars().take(len).collect();
    prefix.parse().ok()
}

/// 47-group for one SN2007 code such as `"49.100"`.
pub fn group_47(nace: &str) -> Option<&'static Group> {
    let digits = nace.replace('.', "");
    group_index_47(numeric_prefix(&digits, 2), numeric_prefix(&digits, 3)).map(|i| &GROUPS_47[i])
}

/// Group a column of SN2007 codes into the 47 wage-statistics groups.
pub fn nace_47_group<'a, I>(codes: I, display: DisplayFormat) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    codes
        .into_iter()
        .map(|c| render_or(c.and_then(group_47), display, &UNMATCHED_47))
        .collect()
}

/// Mapping from NACE divisions to the 17 published industry groups.
#[derive(Debug, Clone, Default)]
pub struct NaceVariant {
    /// Two-digit division → group code as published (possibly `"84-84"`).
    divisions: HashMap<String, String>,
    /// Group code → group name.
    names: HashMap<String, String>,
}

impl NaceVariant {
    /// Build from KLASS variant items: level 2 holds divisions, level 1 the groups.
    pub fn from_klass(items: &[KlassCode]) -> Self {
        let mut variant = NaceVariant::default();
        for item in items {
            match item.level.as_str() {
                "2" => {
                    if let Some(parent) = &item.parent_code {
                        variant.divisions.insert(item.code.clone(), parent.clone());
                    }
                }
                "1" => {
                    variant.names.insert(item.code.clone(), item.name.clone());
                }
                _ => {}
            }
        }
        variant
    }

    /// The standard published grouping, for use without network access.
    pub fn builtin() -> Self {
        let mut variant = NaceVariant::default();
        for (lo, hi, code, name) in BUILTIN_17 {
            for division in lo..=hi {
                variant
                    .divisions
                    .insert(format!("{:02}", division), code.to_string());
            }
            variant.names.insert(code.to_string(), name.to_string());
        }
        variant
    }

    /// Fetch the variant from KLASS.
    pub async fn fetch(client: &KlassClient, variant_id: u32) -> Result<Self> {
        let items = client.fetch_variant(variant_id).await?;
        Ok(Self::from_klass(&items))
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    fn raw_group(&self, nace: &str) -> Option<&String> {
        let division: String = nace.chars().take(2).collect();
        self.divisions.get(&division)
    }

    /// Cleaned group code for one NACE code, if its division is known.
    pub fn group_code(&self, nace: &str) -> Option<String> {
        self.raw_group(nace).map(|g| clean_nace_17_group(g))
    }

    /// Group name for one NACE code, `"Uoppgitt"` when unknown.
    pub fn group_label(&self, nace: &str) -> String {
        self.raw_group(nace)
            .and_then(|g| self.names.get(g))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_17_LABEL.to_string())
    }

    /// Map a column of NACE codes to group codes, or to group names with `label`.
    ///
    /// Unknown divisions give `None` for codes and `"Uoppgitt"` for names.
    pub fn to_17_groups<'a, I>(&self, codes: I, label: bool) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        codes
            .into_iter()
            .map(|c| match (c, label) {
                (Some(code), true) => Some(self.group_label(code)),
                (None, true) => Some(UNKNOWN_17_LABEL.to_string()),
                (Some(code), false) => self.group_code(code),
                (None, false) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_nace_17_group() {
        assert_eq!(clean_nace_17_group("84-84"), "84");
        assert_eq!(clean_nace_17_group("01-03"), "01-03");
        assert_eq!(clean_nace_17_group("85"), "85");
    }

    #[test]
    fn test_group_47_known_codes() {
        assert_eq!(group_47("49.100").unwrap().code, "23");
        assert_eq!(group_47("56.101").unwrap().code, "29");
        assert_eq!(group_47("84.110").unwrap().code, "40");
        assert_eq!(group_47("85.421").unwrap().code, "41");
        assert_eq!(group_47("93.130").unwrap().code, "44");
        assert_eq!(group_47("95.110").unwrap().code, "45");
    }

    #[test]
    fn test_group_47_three_digit_rules() {
        assert_eq!(group_47("09.100").unwrap().code, "03");
        assert_eq!(group_47("09.900").unwrap().code, "02");
        assert_eq!(group_47("30.110").unwrap().code, "15");
        assert_eq!(group_47("30.200").unwrap().code, "14");
        assert_eq!(group_47("33.120").unwrap().code, "14");
        assert!(group_47("30").is_none());
        assert!(group_47("xx").is_none());
    }

    #[test]
    fn test_nace_47_column_formats() {
        let codes = [Some("01.110"), Some("00.000"), None];
        assert_eq!(
            nace_47_group(codes, DisplayFormat::Number),
            vec!["01", "99", "99"]
        );
        assert_eq!(
            nace_47_group(codes, DisplayFormat::Label)[1],
            "Uoppgitt"
        );
        assert_eq!(
            nace_47_group(codes, DisplayFormat::Combined)[2],
            "99 Uoppgitt"
        );
    }

    fn item(code: &str, parent: Option<&str>, level: &str, name: &str) -> KlassCode {
        KlassCode {
            code: code.to_string(),
            parent_code: parent.map(str::to_string),
            level: level.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_variant_from_klass() {
        let variant = NaceVariant::from_klass(&[
            item("84-84", None, "1", "Offentlig administrasjon"),
            item("49-53", None, "1", "Transport og lagring"),
            item("84", Some("84-84"), "2", "Offentlig administrasjon og forsvar"),
            item("49", Some("49-53"), "2", "Landtransport"),
        ]);
        let codes = [Some("84.110"), Some("49.100"), Some("12.000"), None];
        assert_eq!(
            variant.to_17_groups(codes, false),
            vec![Some("84".to_string()), Some("49-53".to_string()), None, None]
        );
        assert_eq!(
            variant.to_17_groups(codes, true),
            vec![
                Some("Offentlig administrasjon".to_string()),
                Some("Transport og lagring".to_string()),
                Some("Uoppgitt".to_string()),
                Some("Uoppgitt".to_string()),
            ]
        );
    }

    #[test]
    fn test_builtin_variant_covers_sample_codes() {
        let variant = NaceVariant::builtin();
        let codes = ["49.100", "56.101", "84.110", "85.421", "93.130", "95.110"];
        let groups: Vec<_> = codes.iter().map(|c| variant.group_code(c)).collect();
        assert_eq!(
            groups,
            vec![
                Some("49-53".to_string()),
                Some("55-56".to_string()),
                Some("84".to_string()),
                Some("85".to_string()),
                Some("90-99".to_string()),
                Some("90-99".to_string()),
            ]
        );
        assert_eq!(variant.group_label("85.421"), "Undervisning");
    }
}
