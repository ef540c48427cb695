//! MGA-ALM frame decoding: the round trip cross check.
//!
//! Decoding is diagnostic, never on the encoder's critical path. The
//! converter can run it on every emitted frame before committing the
//! frame to the output stream, and `ubx-print` uses it to dump
//! binary streams.
use thiserror::Error;

use crate::checksum::checksum;
use crate::frame::{
    ALM_TYPE, ALM_VERSION, CLASS_MGA, FRAME_LEN, MSG_ID_GPS, MSG_ID_QZSS, PAYLOAD_LEN,
    SYNC_CHAR_1, SYNC_CHAR_2,
};
use crate::prelude::{Constellation, ScaledAlmanac, SV};

/// Frame decoding / verification errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("frame is truncated")]
    Truncated,

    #[error("invalid sync bytes")]
    BadSync,

    #[error("invalid payload length")]
    BadLength,

    #[error("invalid checksum")]
    BadChecksum,

    #[error("not an MGA GPS/QZSS message")]
    UnexpectedMessage,

    #[error("not an almanac payload")]
    UnexpectedType,

    /// Round trip mismatch: the decoded field differs from the record
    /// the frame was encoded from.
    #[error("\"{field}\" does not survive the round trip")]
    FieldMismatch { field: &'static str },
}

impl ScaledAlmanac {
    /// Decodes one complete UBX-MGA-ALM frame back into its scaled
    /// field set, validating sync bytes, length and checksum.
    pub fn from_frame(frame: &[u8]) -> Result<Self, DecodeError> {
        if frame.len() < FRAME_LEN {
            return Err(DecodeError::Truncated);
        }

        if frame.len() > FRAME_LEN {
            return Err(DecodeError::BadLength);
        }

        if frame[0] != SYNC_CHAR_1 || frame[1] != SYNC_CHAR_2 {
            return Err(DecodeError::BadSync);
        }

        let constellation = match (frame[2], frame[3]) {
            (CLASS_MGA, MSG_ID_GPS) => Constellation::GPS,
            (CLASS_MGA, MSG_ID_QZSS) => Constellation::QZSS,
            _ => return Err(DecodeError::UnexpectedMessage),
        };

        if u16_at(frame, 4) as usize != PAYLOAD_LEN {
            return Err(DecodeError::BadLength);
        }

        let (ck_a, ck_b) = checksum(&frame[2..FRAME_LEN - 2]);
        if [ck_a, ck_b] != frame[FRAME_LEN - 2..] {
            return Err(DecodeError::BadChecksum);
        }

        if frame[6] != ALM_TYPE || frame[7] != ALM_VERSION {
            return Err(DecodeError::UnexpectedType);
        }

        Ok(Self {
            sv: SV::new(constellation, frame[8]),
            health: frame[9],
            e: u16_at(frame, 10),
            alm_wna: frame[12],
            toa: frame[13],
            delta_i: i16_at(frame, 14),
            omega_dot: i16_at(frame, 16),
            sqrt_a: u32_at(frame, 18),
            omega0: i32_at(frame, 22),
            omega: i32_at(frame, 26),
            m0: i32_at(frame, 30),
            af0: i16_at(frame, 34),
            af1: i16_at(frame, 36),
        })
    }
}

/// Cross checks an emitted frame against the record it was encoded
/// from. Pluggable: correctness of the encoder never depends on it.
pub trait FrameVerifier {
    fn verify(&self, frame: &[u8], expected: &ScaledAlmanac) -> Result<(), DecodeError>;
}

/// [FrameVerifier] backed by [ScaledAlmanac::from_frame]: decodes the
/// frame and requires every field to survive the round trip.
#[derive(Debug, Default, Copy, Clone)]
pub struct MgaAlmDecoder {}

impl FrameVerifier for MgaAlmDecoder {
    fn verify(&self, frame: &[u8], expected: &ScaledAlmanac) -> Result<(), DecodeError> {
        let decoded = ScaledAlmanac::from_frame(frame)?;

        let mismatch = |field| DecodeError::FieldMismatch { field };

        if decoded.sv != expected.sv {
            return Err(mismatch("svId"));
        }
        if decoded.health != expected.health {
            return Err(mismatch("svHealth"));
        }
        if decoded.e != expected.e {
            return Err(mismatch("e"));
        }
        if decoded.alm_wna != expected.alm_wna {
            return Err(mismatch("almWNa"));
        }
        if decoded.toa != expected.toa {
            return Err(mismatch("toa"));
        }
        if decoded.delta_i != expected.delta_i {
            return Err(mismatch("deltaI"));
        }
        if decoded.omega_dot != expected.omega_dot {
            return Err(mismatch("omegaDot"));
        }
        if decoded.sqrt_a != expected.sqrt_a {
            return Err(mismatch("sqrtA"));
        }
        if decoded.omega0 != expected.omega0 {
            return Err(mismatch("omega0"));
        }
        if decoded.omega != expected.omega {
            return Err(mismatch("omega"));
        }
        if decoded.m0 != expected.m0 {
            return Err(mismatch("M0"));
        }
        if decoded.af0 != expected.af0 {
            return Err(mismatch("af0"));
        }
        if decoded.af1 != expected.af1 {
            return Err(mismatch("af1"));
        }

        Ok(())
    }
}

fn u16_at(frame: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([frame[offset], frame[offset + 1]])
}

fn i16_at(frame: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([frame[offset], frame[offset + 1]])
}

fn u32_at(frame: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        frame[offset],
        frame[offset + 1],
        frame[offset + 2],
        frame[offset + 3],
    ])
}

fn i32_at(frame: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        frame[offset],
        frame[offset + 1],
        frame[offset + 2],
        frame[offset + 3],
    ])
}
