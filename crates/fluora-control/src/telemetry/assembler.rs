//! Telemetry frame reassembly
//!
//! Fragment datagram layout: bytes 0-2 are an ignored header, byte 3 is
//! the fragment sequence number (0-12), the rest is a UTF-8 slice of one
//! JSON document. Sequence 0 opens a new frame and supersedes any partial
//! one, 1-11 accumulate in any arrival order (last write wins per slot),
//! and 12 closes the frame: the buffered fragments are joined in ascending
//! sequence order and parsed.
//!
//! There is no persistent error state. Every completion attempt, success
//! or failure, leaves the machine idle and ready for the next cycle.

use serde_json::Value;
use tracing::{debug, trace};

use super::TelemetryError;

/// Number of fragments in one telemetry frame
pub const FRAGMENT_COUNT: usize = 13;

/// Sequence number of the closing fragment
const FINAL_SEQUENCE: u8 = (FRAGMENT_COUNT - 1) as u8;
/// Offset of the sequence number within a datagram
const SEQUENCE_BYTE: usize = 3;
/// Offset of the UTF-8 payload within a datagram
const PAYLOAD_OFFSET: usize = 4;

/// Reassembles fragmented telemetry frames
#[derive(Debug, Default)]
pub struct FrameAssembler {
    slots: [Option<String>; FRAGMENT_COUNT],
}

impl FrameAssembler {
    /// Create an idle assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one datagram.
    ///
    /// Returns `Ok(Some(document))` when the datagram closed a frame that
    /// parsed as JSON and `Ok(None)` while a frame is still accumulating.
    /// A rejected datagram leaves the buffer exactly as it was; a closing
    /// fragment that fails to parse discards the whole cycle.
    pub fn feed(&mut self, datagram: &[u8]) -> Result<Option<Value>, TelemetryError> {
        if datagram.len() < PAYLOAD_OFFSET {
            return Err(TelemetryError::Truncated(datagram.len()));
        }
        let sequence = datagram[SEQUENCE_BYTE];
        if sequence > FINAL_SEQUENCE {
            return Err(TelemetryError::InvalidSequence(sequence));
        }
        let fragment = std::str::from_utf8(&datagram[PAYLOAD_OFFSET..])?.to_string();

        if sequence == 0 {
            // A new frame always supersedes an incomplete previous one
            self.clear();
        }
        self.slots[sequence as usize] = Some(fragment);
        trace!("Stored telemetry fragment {}", sequence);

        if sequence != FINAL_SEQUENCE {
            return Ok(None);
        }

        // Closing fragment: join in ascending sequence order, not arrival
        // order. A missing intermediate fragment garbles the document and
        // surfaces as an ordinary JSON parse failure.
        let payload: String = self.slots.iter().flatten().map(String::as_str).collect();
        self.clear();
        debug!("Reassembled telemetry frame ({} bytes)", payload.len());

        let doc: Value = serde_json::from_str(&payload)?;
        Ok(Some(doc))
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
