use thiserror::Error;

use crate::decode::DecodeError;
use crate::prelude::SV;

/// Conversion errors. Any of these aborts the run: no partial
/// output stream is ever committed.
#[derive(Debug, Error)]
pub enum Error {
    /// The checksum engine failed its known vector self test,
    /// which indicates a broken build. Nothing is converted.
    #[error("checksum self test failure")]
    ChecksumSelfTest,

    /// A recognized YUMA field showed up before any `ID` line,
    /// so there is no record to attach it to.
    #[error("\"{field}\" line with no active almanac record (missing ID line)")]
    OrphanField { field: &'static str },

    /// A recognized YUMA field carries a value that does not parse
    /// as the expected numeric type.
    #[error("invalid \"{field}\" value: \"{value}\"")]
    InvalidValue { field: &'static str, value: String },

    /// Record is incomplete: this field never appeared in the input.
    #[error("{sv}: missing \"{field}\" field")]
    MissingField { sv: SV, field: &'static str },

    /// The scaled value does not fit the fixed point encoding of the
    /// wire format. Wrapping it would corrupt the receiver almanac.
    #[error("{sv}: \"{field}\" overflows its fixed point encoding")]
    FixedPointOverflow { sv: SV, field: &'static str },

    /// Satellite ID with no UBX-MGA-ALM representation
    /// (geosynchronous QZSS, or outside the GPS/QZSS ranges).
    #[error("satellite ID {0} has no UBX-MGA-ALM representation")]
    UnsupportedId(u16),

    /// Only GPS and QZSS almanacs exist in the UBX-MGA-ALM message set.
    #[error("{0} has no UBX-MGA-ALM message")]
    NoWireFormat(SV),

    /// An emitted frame did not survive the round trip through the
    /// frame verifier.
    #[error("frame verification failed: {0}")]
    Verification(#[from] DecodeError),

    #[error("i/o error: {0}")]
    IO(#[from] std::io::Error),
}
