//! `arbmark`: shared functions for Norwegian labour-market and wage statistics.
//!
//! - [`groups`] turns register codes (age, industry, sector, region, ...) into
//!   the standard publication groupings.
//! - [`functions`] covers reference periods, period intervals, the Norwegian
//!   working-day calendar, StatBank number formats, range categories, versioned
//!   file lookup, indicated merges and subtotal aggregation.
//! - [`klass`] is the async client for SSB's classification API.
//! - [`table`] is the small data frame the table functions work on.

pub mod config;
pub mod error;
pub mod functions;
pub mod groups;
pub mod klass;
pub mod models;
pub mod report;
pub mod table;

pub use error::{Error, Result};
pub use models::{AggFunc, DisplayFormat, Frequency, MergeHow, MergeReport, MergeType};
pub use table::{Table, Value};
