//! Terminal renderers for command output.
//!
//! [`terminal`] draws merge summaries, holiday calendars, tables and grouped
//! columns with `comfy-table`; `--json` output bypasses this module entirely.

pub mod terminal;
