#![doc = include_str!("../README.md")]

extern crate gnss_rs as gnss;

// private modules
mod almanac;
mod checksum;
mod convert;
mod decode;
mod error;
mod frame;
mod scale;
mod yuma;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::almanac::{Almanac, AlmanacRecord, AlmanacReference};
    pub use crate::checksum::checksum;
    pub use crate::convert::Converter;
    pub use crate::decode::{DecodeError, FrameVerifier, MgaAlmDecoder};
    pub use crate::error::Error;
    pub use crate::frame::{
        CLASS_MGA, FRAME_LEN, MSG_ID_GPS, MSG_ID_QZSS, PAYLOAD_LEN, SYNC_CHAR_1, SYNC_CHAR_2,
    };
    pub use crate::scale::ScaledAlmanac;
    // re-export
    pub use gnss::prelude::{Constellation, SV};
}

// pub export
pub use error::Error;
