//! @ai:module:intent Format the end-of-run summary for humans
//! @ai:module:layer infrastructure
//! @ai:module:public_api format_summary
//! @ai:module:depends_on writer
//! @ai:module:stateless true

use crate::event::DispatchStats;
use crate::writer::WriteSummary;
use colored::Colorize;
use std::path::Path;

/// @ai:intent Format a writer summary as human-readable text
/// @ai:effects pure
pub fn format_summary(summary: &WriteSummary, stats: &DispatchStats, path: Option<&Path>) -> String {
    let mut output = String::new();

    if let Some(path) = path {
        output.push_str(&format!(
            "Wrote {} issues to {}\n",
            summary.total(),
            path.display().to_string().bold()
        ));
    }

    if stats.skipped > 0 {
        output.push_str(&format!(
            "{}\n",
            format!("Skipped {} input lines", stats.skipped).dimmed()
        ));
    }

    if summary.errors > 0 {
        output.push_str(&format!(
            "{} errors, {} warnings\n",
            summary.errors.to_string().red().bold(),
            summary.warnings.to_string().yellow()
        ));
    } else if summary.warnings > 0 {
        output.push_str(&format!(
            "{} {} warnings\n",
            "OK".green().bold(),
            summary.warnings.to_string().yellow()
        ));
    } else {
        output.push_str(&format!("{} No issues found\n", "OK".green().bold()));
    }

    output
}
