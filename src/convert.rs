//! The conversion pipeline: YUMA text in, UBX byte stream out.
use std::io::BufRead;

use log::{debug, info};

use crate::checksum;
use crate::decode::FrameVerifier;
use crate::error::Error;
use crate::prelude::{Almanac, ScaledAlmanac};

/// YUMA to UBX-MGA-ALM batch converter.
pub struct Converter {
    verifier: Option<Box<dyn FrameVerifier>>,
}

impl Converter {
    /// Builds a new [Converter]. The checksum engine self test runs
    /// here, before any input is touched: a broken build aborts the
    /// whole run.
    pub fn new() -> Result<Self, Error> {
        checksum::self_test()?;
        Ok(Self { verifier: None })
    }

    /// Round trips every emitted frame through `verifier` before it
    /// is committed to the output stream.
    pub fn with_verifier(mut self, verifier: Box<dyn FrameVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Complete pipeline: parses the whole input, then encodes.
    pub fn convert<R: BufRead>(&self, reader: R) -> Result<Vec<u8>, Error> {
        let almanac = Almanac::from_yuma(reader)?;
        self.encode(&almanac)
    }

    /// Encodes a parsed [Almanac]: one 44 byte frame per supported
    /// record, concatenated in first seen order. Unsupported records
    /// produce nothing, which is expected, not an error. Any failure
    /// discards the entire output.
    pub fn encode(&self, almanac: &Almanac) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();

        for record in almanac.records() {
            if !record.supported {
                debug!(
                    "satellite ID {} has no UBX-MGA-ALM representation, skipped",
                    record.yuma_id
                );
                continue;
            }

            let scaled = ScaledAlmanac::from_record(record)?;
            let frame = scaled.to_frame()?;

            if let Some(verifier) = &self.verifier {
                verifier.verify(&frame, &scaled)?;
            }

            info!(
                "converted UBX-MGA almanac for {} (YUMA ID {})",
                scaled.sv, record.yuma_id
            );

            out.extend_from_slice(&frame);
        }

        Ok(out)
    }
}
