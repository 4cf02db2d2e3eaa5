//! @ai:module:intent Boundary contract with the host that raises build diagnostics
//! @ai:module:layer domain
//! @ai:module:public_api DiagnosticEvent, DiagnosticKind, DiagnosticHandler, EventSource, DispatchStats
//!
//! The host delivers events one at a time on a single thread. Implementations
//! of [`EventSource`] must call the handler synchronously and in the order the
//! diagnostics were raised.

use crate::error::Result;
use crate::issue::Severity;
use serde::{Deserialize, Serialize};

/// @ai:intent Location and message metadata carried by an error or warning
/// @ai:invariant integer fields use 0 for "not reported"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticEvent {
    pub project_file: Option<String>,
    pub file: Option<String>,
    pub line_number: u32,
    pub end_line_number: u32,
    pub column_number: u32,
    pub end_column_number: u32,
    pub subcategory: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub help_link: Option<String>,
}

/// @ai:intent Which host event stream a diagnostic arrived on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Error,
    Warning,
}

impl DiagnosticKind {
    /// @ai:intent Severity tag fixed by the event stream, never by content
    /// @ai:effects pure
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::Error => Severity::Error,
            DiagnosticKind::Warning => Severity::Normal,
        }
    }
}

/// @ai:intent Listener registered against the host's error and warning streams
pub trait DiagnosticHandler {
    fn on_error(&mut self, event: &DiagnosticEvent) -> Result<()>;

    fn on_warning(&mut self, event: &DiagnosticEvent) -> Result<()>;

    /// @ai:intent Route an event to the callback for its stream
    fn on_event(&mut self, kind: DiagnosticKind, event: &DiagnosticEvent) -> Result<()> {
        match kind {
            DiagnosticKind::Error => self.on_error(event),
            DiagnosticKind::Warning => self.on_warning(event),
        }
    }
}

/// @ai:intent Counts reported by an event source after dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub errors: usize,
    pub warnings: usize,
    pub skipped: usize,
}

impl DispatchStats {
    /// @ai:intent Record a delivered event
    pub fn count(&mut self, kind: DiagnosticKind) {
        match kind {
            DiagnosticKind::Error => self.errors += 1,
            DiagnosticKind::Warning => self.warnings += 1,
        }
    }
}

/// @ai:intent Producer of diagnostic events, standing in for the host build engine
pub trait EventSource {
    /// @ai:intent Deliver every event to the handler in order
    /// @ai:post a handler error stops dispatch and is returned unchanged
    fn dispatch(&mut self, handler: &mut dyn DiagnosticHandler) -> Result<DispatchStats>;
}
