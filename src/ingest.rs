//! Segment ingestion
//!
//! Segments are JSON objects `{"x1":..,"y1":..,"x2":..,"y2":..}`. Input is
//! either one JSON array of them or a JSON-lines stream with one per line.
//! A JSON-lines stream may also carry the bare string `"clear"` on a line of
//! its own to drop everything recorded so far.

use crate::driver::DriverMessage;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::sync::mpsc;
use turtlegcode_core::Segment;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid segment on line {line}: {source}")]
    InvalidSegment {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Segment array is not valid: {0}")]
    InvalidArray(#[source] serde_json::Error),

    #[error("Driver stopped before input was consumed")]
    DriverClosed,
}

/// One parsed input line
enum Entry {
    Segment(Segment),
    Clear,
}

fn parse_entry(line_number: usize, line: &str) -> Result<Entry, IngestError> {
    let value: Value = serde_json::from_str(line).map_err(|source| IngestError::InvalidSegment {
        line: line_number,
        source,
    })?;
    if value.as_str() == Some("clear") {
        return Ok(Entry::Clear);
    }
    serde_json::from_value(value)
        .map(Entry::Segment)
        .map_err(|source| IngestError::InvalidSegment {
            line: line_number,
            source,
        })
}

/// Parse a complete input buffer into segments.
///
/// `"clear"` entries in a JSON-lines buffer drop the segments before them.
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, IngestError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(IngestError::InvalidArray);
    }

    let mut segments = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_entry(idx + 1, line)? {
            Entry::Segment(segment) => segments.push(segment),
            Entry::Clear => segments.clear(),
        }
    }
    Ok(segments)
}

/// Stream segments from `reader` into the driver as they arrive.
///
/// Returns the number of messages sent. JSON-lines input is forwarded line by
/// line; array input is read to the end first.
pub async fn forward_segments<R>(
    mut reader: R,
    tx: &mpsc::Sender<DriverMessage>,
) -> Result<usize, IngestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut sent = 0;
    let mut line_number = 0;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(sent);
        }
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if sent == 0 && trimmed.starts_with('[') {
            let mut rest = String::new();
            reader.read_to_string(&mut rest).await?;
            line.push_str(&rest);
            for segment in parse_segments(&line)? {
                send(tx, DriverMessage::Record(segment)).await?;
                sent += 1;
            }
            return Ok(sent);
        }

        let message = match parse_entry(line_number, trimmed)? {
            Entry::Segment(segment) => DriverMessage::Record(segment),
            Entry::Clear => DriverMessage::Clear,
        };
        send(tx, message).await?;
        sent += 1;
    }
}

async fn send(tx: &mpsc::Sender<DriverMessage>, message: DriverMessage) -> Result<(), IngestError> {
    tx.send(message)
        .await
        .map_err(|_| IngestError::DriverClosed)
}
