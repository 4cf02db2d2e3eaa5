//! @ai:module:intent Read host diagnostic events serialized as JSON Lines
//! @ai:module:layer infrastructure
//! @ai:module:public_api EventStreamSource, KindedEvent
//! @ai:module:depends_on event

use crate::error::Result;
use crate::event::{DiagnosticEvent, DiagnosticHandler, DiagnosticKind, DispatchStats, EventSource};
use crate::source::for_each_line;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// @ai:intent One input line: the stream the event was raised on plus its fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindedEvent {
    pub kind: DiagnosticKind,
    #[serde(flatten)]
    pub event: DiagnosticEvent,
}

/// Replays `{"kind":"error"|"warning", ...}` lines to a handler.
pub struct EventStreamSource<R> {
    reader: R,
}

impl<R: BufRead> EventStreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> EventSource for EventStreamSource<R> {
    fn dispatch(&mut self, handler: &mut dyn DiagnosticHandler) -> Result<DispatchStats> {
        let mut stats = DispatchStats::default();

        let invalid = for_each_line(&mut self.reader, |number, line| {
            if line.trim().is_empty() {
                return Ok(());
            }

            let parsed: KindedEvent = match serde_json::from_str(line) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(line = number, error = %e, "skipping malformed event");
                    stats.skipped += 1;
                    return Ok(());
                }
            };

            handler.on_event(parsed.kind, &parsed.event)?;
            stats.count(parsed.kind);
            Ok(())
        })?;
        stats.skipped += invalid;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::IssueRecordWriter;
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn test_replays_events_in_order() {
        let input = r#"{"kind":"warning","projectFile":"/build/src/App.csproj","file":"/build/src/App/Main.cs","lineNumber":12}

{"kind":"error","file":"/other/Main.cs","code":"CS1002","message":"; expected"}
"#;
        let mut source = EventStreamSource::new(Cursor::new(input));
        let mut writer = IssueRecordWriter::with_sink(Path::new("/build"), Vec::new());

        let stats = source.dispatch(&mut writer).unwrap();

        assert_eq!(stats, DispatchStats { errors: 1, warnings: 1, skipped: 0 });
        let out = String::from_utf8(writer.into_inner().unwrap().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            r#"{"fileName":"src/App/Main.cs","severity":"NORMAL","moduleName":"App.csproj","lineStart":12}"#
        );
        assert_eq!(
            lines[1],
            r#"{"fileName":"/other/Main.cs","severity":"ERROR","type":"CS1002","message":"; expected"}"#
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let input = "not json\n{\"kind\":\"info\"}\n{\"kind\":\"error\",\"message\":\"x\"}\n";
        let mut source = EventStreamSource::new(Cursor::new(input));
        let mut writer = IssueRecordWriter::with_sink(Path::new("/build"), Vec::new());

        let stats = source.dispatch(&mut writer).unwrap();

        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(writer.summary().errors, 1);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_dispatch() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"kind\":\"error\",\"message\":\"first\"}\n");
        input.extend_from_slice(b"{\"kind\":\"warning\",\"message\":\"\xff\"}\n");
        input.extend_from_slice(b"{\"kind\":\"warning\",\"message\":\"third\"}\n");
        let mut source = EventStreamSource::new(Cursor::new(input));
        let mut writer = IssueRecordWriter::with_sink(Path::new("/build"), Vec::new());

        let stats = source.dispatch(&mut writer).unwrap();

        assert_eq!(stats, DispatchStats { errors: 1, warnings: 1, skipped: 1 });
        let out = String::from_utf8(writer.into_inner().unwrap().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(r#""message":"third""#));
    }
}
