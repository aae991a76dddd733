//! Subcommand implementations. Each prints its result to stdout, reports
//! failures through [`report_error`](crate::report_error) and exits 1.

pub(crate) mod dictionary;
pub(crate) mod query;
