//! Fixed command encodings
//!
//! - Reset: a single `'M'` packet with body `00 01 00`
//! - Diagnostic test: banner, 18 counter messages, completion message

use core::fmt::Write;
use core::iter::FusedIterator;
use core::time::Duration;

use heapless::String;

use crate::message::MessagePackets;
use crate::packet::{Packet, PACKET_TYPE_MESSAGE};

/// Body of the reset command
pub const RESET_BODY: [u8; 3] = [0x00, 0x01, 0x00];

/// First message of the diagnostic sequence
pub const DIAGNOSTIC_BANNER: &str = "WRM Sunrise Test";

/// Last message of the diagnostic sequence
pub const DIAGNOSTIC_COMPLETE: &str = "Test complete.";

/// Marker prefixed to each diagnostic counter
pub const DIAGNOSTIC_COUNTER_MARKER: &str = "^Y";

/// Number of counter messages between banner and completion
pub const DIAGNOSTIC_COUNTER_STEPS: usize = 18;

/// Total number of diagnostic steps
pub const DIAGNOSTIC_STEPS: usize = DIAGNOSTIC_COUNTER_STEPS + 2;

/// Pause after each diagnostic step except the last
pub const DIAGNOSTIC_STEP_DELAY: Duration = Duration::from_secs(1);

/// Capacity of a diagnostic step's text
const STEP_TEXT_CAPACITY: usize = 16;

/// Encode the device reset command
pub fn encode_reset() -> Packet {
    Packet::assemble(PACKET_TYPE_MESSAGE, &[], &RESET_BODY)
}

/// One message of the diagnostic sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticStep {
    text: String<STEP_TEXT_CAPACITY>,
    delay_after: Option<Duration>,
}

impl DiagnosticStep {
    /// Text shown on the sign for this step
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Packets transmitting this step's text
    pub fn packets(&self) -> MessagePackets<'_> {
        MessagePackets::new_unchecked(self.text.as_bytes())
    }

    /// Pause to observe after this step, `None` for the final step
    pub fn delay_after(&self) -> Option<Duration> {
        self.delay_after
    }
}

/// Ordered steps of the diagnostic test
#[derive(Debug, Clone)]
pub struct DiagnosticSequence {
    next_step: usize,
}

impl DiagnosticSequence {
    fn step_text(index: usize) -> String<STEP_TEXT_CAPACITY> {
        let mut text = String::new();
        // Every step text fits STEP_TEXT_CAPACITY
        let _ = match index {
            0 => write!(text, "{}", DIAGNOSTIC_BANNER),
            i if i <= DIAGNOSTIC_COUNTER_STEPS => {
                write!(text, "{}{}", DIAGNOSTIC_COUNTER_MARKER, i - 1)
            }
            _ => write!(text, "{}", DIAGNOSTIC_COMPLETE),
        };
        text
    }
}

impl Iterator for DiagnosticSequence {
    type Item = DiagnosticStep;

    fn next(&mut self) -> Option<DiagnosticStep> {
        if self.next_step >= DIAGNOSTIC_STEPS {
            return None;
        }

        let index = self.next_step;
        self.next_step += 1;

        let delay_after = if index + 1 < DIAGNOSTIC_STEPS {
            Some(DIAGNOSTIC_STEP_DELAY)
        } else {
            None
        };

        Some(DiagnosticStep {
            text: Self::step_text(index),
            delay_after,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = DIAGNOSTIC_STEPS - self.next_step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DiagnosticSequence {}

impl FusedIterator for DiagnosticSequence {}

/// Encode the diagnostic test sequence
pub fn encode_diagnostic_sequence() -> DiagnosticSequence {
    DiagnosticSequence { next_step: 0 }
}
