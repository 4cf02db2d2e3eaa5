//! @ai:module:intent Read `cargo --message-format=json` output as diagnostic events
//! @ai:module:layer infrastructure
//! @ai:module:public_api CargoMessageSource, to_diagnostic
//! @ai:module:depends_on event
//!
//! Only `compiler-message` records at error or warning level become events.
//! Notes, help messages and span-less summaries ("aborting due to...",
//! "N warnings emitted") are skipped.

use crate::error::Result;
use crate::event::{DiagnosticEvent, DiagnosticHandler, DiagnosticKind, DispatchStats, EventSource};
use crate::source::for_each_line;
use serde::Deserialize;
use std::io::BufRead;
use std::path::Path;

const RUSTC_ERROR_INDEX: &str = "https://doc.rust-lang.org/error_codes";
const CLIPPY_LINT_INDEX: &str = "https://rust-lang.github.io/rust-clippy/master/index.html";

#[derive(Debug, Deserialize)]
struct CargoMessage {
    reason: String,
    #[serde(default)]
    manifest_path: Option<String>,
    #[serde(default)]
    target: Option<CargoTarget>,
    #[serde(default)]
    message: Option<CompilerMessage>,
}

#[derive(Debug, Deserialize)]
struct CargoTarget {
    #[serde(default)]
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CompilerMessage {
    message: String,
    level: String,
    #[serde(default)]
    code: Option<DiagnosticCode>,
    #[serde(default)]
    spans: Vec<Span>,
}

#[derive(Debug, Deserialize)]
struct DiagnosticCode {
    code: String,
}

#[derive(Debug, Deserialize)]
struct Span {
    file_name: String,
    line_start: u32,
    line_end: u32,
    column_start: u32,
    column_end: u32,
    #[serde(default)]
    is_primary: bool,
}

/// Parses a Cargo JSON message stream line by line and forwards diagnostics.
pub struct CargoMessageSource<R> {
    reader: R,
}

impl<R: BufRead> CargoMessageSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> EventSource for CargoMessageSource<R> {
    fn dispatch(&mut self, handler: &mut dyn DiagnosticHandler) -> Result<DispatchStats> {
        let mut stats = DispatchStats::default();

        let invalid = for_each_line(&mut self.reader, |_, line| {
            if line.trim().is_empty() {
                return Ok(());
            }

            match to_diagnostic(line) {
                Some((kind, event)) => {
                    handler.on_event(kind, &event)?;
                    stats.count(kind);
                }
                None => stats.skipped += 1,
            }
            Ok(())
        })?;
        stats.skipped += invalid;

        Ok(stats)
    }
}

/// @ai:intent Convert one Cargo message line into a diagnostic event
/// @ai:post None for non-JSON lines, non-compiler messages and non-error/warning levels
/// @ai:effects pure
pub fn to_diagnostic(line: &str) -> Option<(DiagnosticKind, DiagnosticEvent)> {
    let msg: CargoMessage = match serde_json::from_str(line) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(error = %e, "skipping non-message line");
            return None;
        }
    };
    if msg.reason != "compiler-message" {
        return None;
    }
    let compiler = msg.message?;

    let kind = match compiler.level.as_str() {
        "error" | "error: internal compiler error" => DiagnosticKind::Error,
        "warning" => DiagnosticKind::Warning,
        other => {
            tracing::debug!(level = other, "skipping compiler message");
            return None;
        }
    };

    let span = compiler
        .spans
        .iter()
        .find(|s| s.is_primary)
        .or_else(|| compiler.spans.first())?;

    let code = compiler.code.map(|c| c.code);
    let help_link = code.as_deref().and_then(docs_link);

    // The package directory names the crate; every manifest is called Cargo.toml.
    let project_file = msg
        .manifest_path
        .as_deref()
        .and_then(|manifest| Path::new(manifest).parent())
        .map(|dir| dir.to_string_lossy().into_owned());

    let event = DiagnosticEvent {
        project_file,
        file: Some(span.file_name.clone()),
        line_number: span.line_start,
        end_line_number: span.line_end,
        column_number: span.column_start,
        end_column_number: span.column_end,
        subcategory: msg.target.and_then(|t| t.kind.into_iter().next()),
        code,
        message: Some(compiler.message),
        help_link,
    };

    Some((kind, event))
}

/// @ai:intent Documentation link for rustc error codes and Clippy lints
/// @ai:example ("E0308") -> https://doc.rust-lang.org/error_codes/E0308.html
/// @ai:example ("unused_variables") -> None
/// @ai:effects pure
fn docs_link(code: &str) -> Option<String> {
    if let Some(lint) = code.strip_prefix("clippy::") {
        return Some(format!("{CLIPPY_LINT_INDEX}#{lint}"));
    }

    let is_error_code = code.len() == 5
        && code.starts_with('E')
        && code[1..].chars().all(|c| c.is_ascii_digit());
    is_error_code.then(|| format!("{RUSTC_ERROR_INDEX}/{code}.html"))
}
