//! UBX frame checksum (8 bit Fletcher algorithm).
use crate::error::Error;

/// CFG-MSG poll known vector, from the u-blox interface description.
const SELF_TEST_MESSAGE: [u8; 6] = [0x06, 0x01, 0x02, 0x00, 0xF0, 0x05];
const SELF_TEST_CHECKSUM: (u8, u8) = (0xFE, 0x16);

/// Returns (CK_A, CK_B) over `bytes`. In a complete frame the checksum
/// spans class, id, length and payload: both sync chars are excluded.
pub fn checksum(bytes: &[u8]) -> (u8, u8) {
    let mut ck_a = 0u8;
    let mut ck_b = 0u8;
    for byte in bytes {
        ck_a = ck_a.wrapping_add(*byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

/// Verifies the known vector. Run once before any conversion:
/// a mismatch means a broken build and is fatal.
pub fn self_test() -> Result<(), Error> {
    if checksum(&SELF_TEST_MESSAGE) == SELF_TEST_CHECKSUM {
        Ok(())
    } else {
        Err(Error::ChecksumSelfTest)
    }
}
