/// Working-time arrangement code for one register value.
///
/// Shift and rota arrangements give `20`, regular day work gives `25`, and
/// missing or placeholder values (`-1`, `-2`, empty) give `99`. Anything
/// else is left blank.
pub fn shift_work_code_of(arrangement: Option<&str>) -> &'static str {
    match arrangement {
        Some("dogn355" | "helkont336" | "offshore336" | "skift365" | "andre_skift") => "20",
        Some("ikke_skift") => "25",
        Some("-2" | "-1" | "") | None => "99",
        Some(_) => "",
    }
}

/// Classify a column of working-time arrangements.
pub fn shift_work_code<'a, I>(arrangements: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    arrangements
        .into_iter()
        .map(|a| shift_work_code_of(a).to_string())
        .collect()
}
