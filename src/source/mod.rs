//! @ai:module:intent Host adapters that turn build tool output into diagnostic events
//! @ai:module:layer infrastructure
//! @ai:module:public_api cargo, events, open_source
//! @ai:module:depends_on event, config

pub mod cargo;
pub mod events;

use crate::config::SourceKind;
use crate::error::Result;
use crate::event::EventSource;
use std::io::BufRead;

pub use cargo::CargoMessageSource;
pub use events::EventStreamSource;

/// @ai:intent Build the event source matching the configured stream format
/// @ai:effects pure
pub fn open_source<'a, R: BufRead + 'a>(kind: SourceKind, reader: R) -> Box<dyn EventSource + 'a> {
    match kind {
        SourceKind::Cargo => Box::new(CargoMessageSource::new(reader)),
        SourceKind::Events => Box::new(EventStreamSource::new(reader)),
    }
}

/// @ai:intent Visit each line of a stream without its terminator
/// @ai:post returns how many lines were skipped as invalid UTF-8; only reader I/O errors propagate
/// @ai:effects io:read
pub(crate) fn for_each_line<R: BufRead>(
    reader: &mut R,
    mut visit: impl FnMut(usize, &str) -> Result<()>,
) -> Result<usize> {
    let mut buf = Vec::new();
    let mut number = 0;
    let mut invalid = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(invalid);
        }
        number += 1;

        match std::str::from_utf8(&buf) {
            Ok(line) => visit(number, line.trim_end_matches(['\n', '\r']))?,
            Err(e) => {
                tracing::warn!(line = number, error = %e, "skipping line that is not valid UTF-8");
                invalid += 1;
            }
        }
    }
}
