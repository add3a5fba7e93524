//! Standard groupings of person, enterprise and job attributes.
//!
//! Each grouping has a scalar lookup returning the matched [`Group`] and a
//! column form that renders a whole column in the requested [`DisplayFormat`].
//!
//! - [`age`]: SYKEFR detail groups and ARBLONN five-band groups.
//! - [`company_size`]: employee-count bands.
//! - [`country_origin`]: world regions from three-generation country background.
//! - [`nace`]: industry groups (47 SN2007 groups, 17 published groups via KLASS).
//! - [`occupation`]: STYRK-08 main groups for register system 1.
//! - [`region`]: mainland / non-mainland and county classification via KLASS.
//! - [`sector`]: public sector groups.
//! - [`shift_work`]: working-time arrangement codes.

pub mod age;
pub mod company_size;
pub mod country_origin;
pub mod nace;
pub mod occupation;
pub mod region;
pub mod sector;
pub mod shift_work;

use crate::models::DisplayFormat;

/// One entry of a static grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub code: &'static str,
    pub label: &'static str,
}

impl Group {
    /// Render this group. [`DisplayFormat::Arblonn`] renders like `Combined`.
    pub fn render(&self, display: DisplayFormat) -> String {
        match display {
            DisplayFormat::Label => self.label.to_string(),
            DisplayFormat::Number => self.code.to_string(),
            DisplayFormat::Combined | DisplayFormat::Arblonn => {
                format!("{} {}", self.code, self.label)
            }
        }
    }
}

/// What an unmatched value becomes, per display format.
#[derive(Debug, Clone, Copy)]
pub struct Unmatched {
    pub label: &'static str,
    pub number: &'static str,
    pub combined: &'static str,
}

impl Unmatched {
    /// The same fallback for every display format.
    pub const fn uniform(value: &'static str) -> Self {
        Unmatched {
            label: value,
            number: value,
            combined: value,
        }
    }

    pub fn render(&self, display: DisplayFormat) -> String {
        match display {
            DisplayFormat::Label => self.label,
            DisplayFormat::Number => self.number,
            DisplayFormat::Combined | DisplayFormat::Arblonn => self.combined,
        }
        .to_string()
    }
}

/// Render an optional match, falling back to `unmatched`.
pub(crate) fn render_or(
    group: Option<&Group>,
    display: DisplayFormat,
    unmatched: &Unmatched,
) -> String {
    match group {
        Some(g) => g.render(display),
        None => unmatched.render(display),
    }
}
