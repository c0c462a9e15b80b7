// smarttag/src/protocol/frame.rs

use crate::constants::{ACK_FRAME, FRAME_MAX_PAYLOAD_LEN, FRAME_MIN_LEN, FRAME_POSTAMBLE, FRAME_PREAMBLE};
use crate::protocol::checksum::{dcs, lcs};
use crate::{Error, Result};

/// RC-S956 normal information frame.
///
/// Format: [Preamble(3)] [Len(1)] [LCS(1)] [Payload(n)] [DCS(1)] [Postamble(1)]
/// Preamble: 0x00 0x00 0xFF
/// Postamble: 0x00
///
/// The ACK packet `00 00 FF 00 FF 00` shares the preamble but is not a
/// normal frame (its LCS does not match LEN 0).
pub struct Frame;

impl Frame {
    /// Encode a payload into a full frame
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > FRAME_MAX_PAYLOAD_LEN {
            return Err(Error::BufferExceeded {
                needed: payload.len(),
                capacity: FRAME_MAX_PAYLOAD_LEN,
            });
        }

        let len = payload.len() as u8;
        let mut out = Vec::with_capacity(FRAME_MIN_LEN + payload.len());
        out.extend_from_slice(&FRAME_PREAMBLE);
        out.push(len);
        out.push(lcs(len));
        out.extend_from_slice(payload);
        out.push(dcs(payload));
        out.push(FRAME_POSTAMBLE);
        Ok(out)
    }

    /// Decode a full frame and return the payload
    pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() < FRAME_MIN_LEN {
            return Err(Error::InvalidLength {
                expected: FRAME_MIN_LEN,
                actual: frame.len(),
            });
        }

        if frame[..3] != FRAME_PREAMBLE {
            return Err(Error::FrameFormat("invalid preamble".into()));
        }

        let len = frame[3];
        let lcs_actual = frame[4];
        let lcs_expected = lcs(len);
        if lcs_actual != lcs_expected {
            return Err(Error::ChecksumMismatch {
                expected: lcs_expected,
                actual: lcs_actual,
            });
        }

        let required_len = FRAME_MIN_LEN + len as usize;
        if frame.len() != required_len {
            return Err(Error::InvalidLength {
                expected: required_len,
                actual: frame.len(),
            });
        }

        let payload_end = 5 + len as usize;
        let payload = &frame[5..payload_end];

        let dcs_actual = frame[payload_end];
        let dcs_expected = dcs(payload);
        if dcs_actual != dcs_expected {
            return Err(Error::ChecksumMismatch {
                expected: dcs_expected,
                actual: dcs_actual,
            });
        }

        if frame[payload_end + 1] != FRAME_POSTAMBLE {
            return Err(Error::FrameFormat("invalid postamble".into()));
        }

        Ok(payload.to_vec())
    }

    pub fn ack() -> [u8; 6] {
        ACK_FRAME
    }

    pub fn is_ack(frame: &[u8]) -> bool {
        frame == ACK_FRAME
    }
}
