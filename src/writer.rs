//! @ai:module:intent Append one normalized JSON line per diagnostic to the output file
//! @ai:module:layer application
//! @ai:module:public_api IssueRecordWriter, IssueSink, WriteSummary
//! @ai:module:depends_on issue, event, config, error
//! @ai:module:thread_safe false

use crate::config::{resolve_output_path, LoggerParameters};
use crate::error::{Error, Result};
use crate::event::{DiagnosticEvent, DiagnosticHandler, DispatchStats, EventSource};
use crate::issue::{IssueRecord, Severity};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// @ai:intent Output stream that can be pushed to durable storage on shutdown
pub trait IssueSink: Write {
    /// @ai:intent Flush and persist everything written so far
    fn sync(&mut self) -> std::io::Result<()> {
        self.flush()
    }
}

impl IssueSink for BufWriter<File> {
    fn sync(&mut self) -> std::io::Result<()> {
        self.flush()?;
        self.get_ref().sync_all()
    }
}

impl IssueSink for Vec<u8> {}

impl IssueSink for std::io::Stdout {}

/// @ai:intent Record counts reported when the writer shuts down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl WriteSummary {
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

/// Streams issue records to a sink, one line per diagnostic, in arrival order.
///
/// The writer owns its sink exclusively and has no internal locking. A host
/// that dispatches from several threads must put the writer behind a `Mutex`
/// so that lines are neither interleaved nor reordered.
pub struct IssueRecordWriter<W: IssueSink = BufWriter<File>> {
    working_dir: String,
    path: Option<PathBuf>,
    sink: Option<W>,
    summary: WriteSummary,
}

impl IssueRecordWriter<BufWriter<File>> {
    /// @ai:intent Resolve the output path from host parameters and open it for writing
    /// @ai:pre working_dir was captured once at process start
    /// @ai:post the output file exists and is truncated
    /// @ai:effects fs:write
    pub fn initialize(working_dir: &Path, parameters: Option<&str>) -> Result<Self> {
        let params = LoggerParameters::parse(parameters);
        if !params.extra.is_empty() {
            tracing::debug!(extra = ?params.extra, "ignoring extra logger parameters");
        }

        let path = resolve_output_path(working_dir, &params.output);
        let file = File::create(&path).map_err(|source| Error::OutputOpen {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "writing issues");

        let mut writer = Self::with_sink(working_dir, BufWriter::new(file));
        writer.path = Some(path);
        Ok(writer)
    }
}

impl<W: IssueSink> IssueRecordWriter<W> {
    /// @ai:intent Create a writer over an already-open sink
    /// @ai:effects pure
    pub fn with_sink(working_dir: &Path, sink: W) -> Self {
        Self {
            working_dir: working_dir.to_string_lossy().into_owned(),
            path: None,
            sink: Some(sink),
            summary: WriteSummary::default(),
        }
    }

    /// Output file path, when the writer was opened from host parameters.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn summary(&self) -> WriteSummary {
        self.summary
    }

    /// @ai:intent Normalize, serialize and append a single diagnostic
    /// @ai:effects fs:write
    pub fn record(&mut self, severity: Severity, event: &DiagnosticEvent) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(Error::WriterClosed)?;

        let line = IssueRecord::from_event(&self.working_dir, severity, event).to_json_line()?;
        writeln!(sink, "{line}")?;

        match severity {
            Severity::Error => self.summary.errors += 1,
            Severity::Normal => self.summary.warnings += 1,
        }
        Ok(())
    }

    /// @ai:intent Flush and close the output stream
    /// @ai:post calling again is a no-op
    /// @ai:effects fs:write
    pub fn shutdown(&mut self) -> Result<WriteSummary> {
        if let Some(mut sink) = self.sink.take() {
            if self.summary.total() > 0 {
                sink.sync()?;
            }
            tracing::debug!(
                errors = self.summary.errors,
                warnings = self.summary.warnings,
                "issue writer closed"
            );
        }
        Ok(self.summary)
    }

    /// @ai:intent Flush and hand back the sink, for in-memory outputs
    pub fn into_inner(mut self) -> Result<Option<W>> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(self.sink.take())
    }
}

impl<W: IssueSink> DiagnosticHandler for IssueRecordWriter<W> {
    fn on_error(&mut self, event: &DiagnosticEvent) -> Result<()> {
        self.record(Severity::Error, event)
    }

    fn on_warning(&mut self, event: &DiagnosticEvent) -> Result<()> {
        self.record(Severity::Normal, event)
    }
}

/// @ai:intent Drive one host lifecycle: dispatch every event, then shut down
/// @ai:post the writer is shut down even when dispatch fails; the dispatch error wins
/// @ai:effects fs:write
pub fn run<W: IssueSink>(
    source: &mut dyn EventSource,
    writer: &mut IssueRecordWriter<W>,
) -> Result<(WriteSummary, DispatchStats)> {
    let dispatched = source.dispatch(writer);
    let summary = writer.shutdown();

    let stats = dispatched?;
    Ok((summary?, stats))
}
