//! @ai:module:intent Record build diagnostics as normalized JSON Lines
//! @ai:module:layer infrastructure
//! @ai:module:public_api paths, issue, event, config, writer, source, output, error
//!
//! # issuesink
//!
//! Observes error and warning diagnostics raised during a build and appends one
//! sparse JSON object per diagnostic to an output file, with file paths made
//! relative to the working directory.
//!
//! ## Example
//!
//! ```rust,no_run
//! use issuesink::{run, source, IssueRecordWriter, SourceKind};
//! use std::io::BufReader;
//!
//! let working_dir = std::env::current_dir().unwrap();
//! let mut writer = IssueRecordWriter::initialize(&working_dir, Some("issues.json.log")).unwrap();
//! let mut events = source::open_source(SourceKind::Cargo, BufReader::new(std::io::stdin()));
//!
//! let (summary, _stats) = run(events.as_mut(), &mut writer).unwrap();
//! println!("{} issues", summary.total());
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod issue;
pub mod output;
pub mod paths;
pub mod source;
pub mod writer;

pub use config::{LoggerConfig, LoggerParameters, SourceKind, DEFAULT_OUTPUT_FILE};
pub use error::{Error, Result};
pub use event::{DiagnosticEvent, DiagnosticHandler, DiagnosticKind, DispatchStats, EventSource};
pub use issue::{IssueRecord, Severity};
pub use output::format_summary;
pub use paths::{normalize, NormalizedPaths};
pub use writer::{run, IssueRecordWriter, IssueSink, WriteSummary};
