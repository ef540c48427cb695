//! UBX-MGA-ALM frame layout and encoding.
use crate::checksum::checksum;
use crate::error::Error;
use crate::prelude::{Constellation, ScaledAlmanac};

pub const SYNC_CHAR_1: u8 = 0xB5;
pub const SYNC_CHAR_2: u8 = 0x62;

/// Multiple GNSS Assistance message class
pub const CLASS_MGA: u8 = 0x13;

/// UBX-MGA-GPS message ID
pub const MSG_ID_GPS: u8 = 0x00;
/// UBX-MGA-QZSS message ID
pub const MSG_ID_QZSS: u8 = 0x05;

/// MGA-GPS-ALM / MGA-QZSS-ALM payload, always fixed length
pub const PAYLOAD_LEN: usize = 36;

/// Complete frame: 6 byte header, payload, 2 byte checksum
pub const FRAME_LEN: usize = 8 + PAYLOAD_LEN;

/// `type` byte selecting the almanac message within MGA-GPS/MGA-QZSS
pub(crate) const ALM_TYPE: u8 = 0x02;
pub(crate) const ALM_VERSION: u8 = 0x00;

/// Message ID for this constellation's almanac, None when the message
/// set has no almanac for it.
pub(crate) fn message_id(constellation: Constellation) -> Option<u8> {
    match constellation {
        Constellation::GPS => Some(MSG_ID_GPS),
        Constellation::QZSS => Some(MSG_ID_QZSS),
        _ => None,
    }
}

impl ScaledAlmanac {
    /// Encodes one 44 byte UBX-MGA-ALM frame, little endian fields,
    /// checksum over class through payload. All or nothing: no
    /// partial frame is ever produced.
    pub fn to_frame(&self) -> Result<Vec<u8>, Error> {
        let msg_id = message_id(self.sv.constellation).ok_or(Error::NoWireFormat(self.sv))?;

        let mut frame = Vec::with_capacity(FRAME_LEN);
        frame.push(SYNC_CHAR_1);
        frame.push(SYNC_CHAR_2);
        frame.push(CLASS_MGA);
        frame.push(msg_id);
        frame.extend_from_slice(&(PAYLOAD_LEN as u16).to_le_bytes());

        frame.push(ALM_TYPE);
        frame.push(ALM_VERSION);
        frame.push(self.sv.prn);
        frame.push(self.health);
        frame.extend_from_slice(&self.e.to_le_bytes());
        frame.push(self.alm_wna);
        frame.push(self.toa);
        frame.extend_from_slice(&self.delta_i.to_le_bytes());
        frame.extend_from_slice(&self.omega_dot.to_le_bytes());
        frame.extend_from_slice(&self.sqrt_a.to_le_bytes());
        frame.extend_from_slice(&self.omega0.to_le_bytes());
        frame.extend_from_slice(&self.omega.to_le_bytes());
        frame.extend_from_slice(&self.m0.to_le_bytes());
        frame.extend_from_slice(&self.af0.to_le_bytes());
        frame.extend_from_slice(&self.af1.to_le_bytes());
        frame.extend_from_slice(&0u32.to_le_bytes()); // reserved1

        let (ck_a, ck_b) = checksum(&frame[2..]);
        frame.push(ck_a);
        frame.push(ck_b);

        Ok(frame)
    }
}

#[cfg(test)]
mod test {
    use super::{FRAME_LEN, MSG_ID_GPS, MSG_ID_QZSS};
    use crate::checksum::checksum;
    use crate::prelude::{Constellation, ScaledAlmanac, SV};

    fn scaled(sv: SV) -> ScaledAlmanac {
        ScaledAlmanac {
            sv,
            health: 0,
            e: 16986,
            alm_wna: 12,
            toa: 123,
            delta_i: 4342,
            omega_dot: -664,
            sqrt_a: 10554572,
            omega0: 3284317,
            omega: 1201579,
            m0: -2937194,
            af0: 125,
            af1: 0,
        }
    }

    #[test]
    fn frame_layout() {
        let frame = scaled(SV::new(Constellation::GPS, 5)).to_frame().unwrap();

        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(&frame[..6], &[0xB5, 0x62, 0x13, MSG_ID_GPS, 0x24, 0x00]);
        assert_eq!(frame[6], 0x02); // type
        assert_eq!(frame[7], 0x00); // version
        assert_eq!(frame[8], 5); // svId
        assert_eq!(frame[9], 0); // svHealth
        assert_eq!(&frame[10..12], &16986u16.to_le_bytes()); // e
        assert_eq!(frame[12], 12); // almWNa
        assert_eq!(frame[13], 123); // toa
        assert_eq!(&frame[14..16], &4342i16.to_le_bytes()); // deltaI
        assert_eq!(&frame[16..18], &(-664i16).to_le_bytes()); // omegaDot
        assert_eq!(&frame[18..22], &10554572u32.to_le_bytes()); // sqrtA
        assert_eq!(&frame[38..42], &[0, 0, 0, 0]); // reserved1

        let (ck_a, ck_b) = checksum(&frame[2..42]);
        assert_eq!(&frame[42..], &[ck_a, ck_b]);
    }

    #[test]
    fn qzss_message_id() {
        let frame = scaled(SV::new(Constellation::QZSS, 1)).to_frame().unwrap();
        assert_eq!(&frame[..6], &[0xB5, 0x62, 0x13, MSG_ID_QZSS, 0x24, 0x00]);
    }

    #[test]
    fn no_almanac_message_outside_gps_qzss() {
        assert!(scaled(SV::new(Constellation::Galileo, 1)).to_frame().is_err());
    }
}
