// Diagnostic dump of a binary UBX stream, frame by frame.
use clap::{Arg, ColorChoice, Command};
use env_logger::{Builder, Target};
use log::warn;

use std::fs;

use yuma2ubx::prelude::{
    checksum, ScaledAlmanac, CLASS_MGA, MSG_ID_GPS, MSG_ID_QZSS, PAYLOAD_LEN, SYNC_CHAR_1,
    SYNC_CHAR_2,
};

fn main() -> Result<(), yuma2ubx::Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cmd = Command::new("ubx-print")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints every UBX frame found in a binary stream")
        .arg_required_else_help(true)
        .color(ColorChoice::Always)
        .arg(Arg::new("input").required(true).help("UBX stream (binary)"));

    let matches = cmd.get_matches();
    let input = matches.get_one::<String>("input").expect("required");

    let data = fs::read(input)?;

    let mut offset = 0;
    let mut frames = 0;

    while offset + 8 <= data.len() {
        // resync byte by byte until the next sync pair
        if data[offset] != SYNC_CHAR_1 || data[offset + 1] != SYNC_CHAR_2 {
            offset += 1;
            continue;
        }

        let class = data[offset + 2];
        let msg_id = data[offset + 3];
        let length = u16::from_le_bytes([data[offset + 4], data[offset + 5]]) as usize;

        if offset + 8 + length > data.len() {
            warn!("truncated frame at offset {}", offset);
            break;
        }

        let frame = &data[offset..offset + 8 + length];

        let is_mga_alm = class == CLASS_MGA
            && (msg_id == MSG_ID_GPS || msg_id == MSG_ID_QZSS)
            && length == PAYLOAD_LEN
            && frame[6] == 0x02;

        if is_mga_alm {
            match ScaledAlmanac::from_frame(frame) {
                Ok(almanac) => println!("UBX-MGA-ALM {}", almanac),
                Err(error) => println!("UBX-MGA-ALM at offset {}: {}", offset, error),
            }
        } else {
            let (ck_a, ck_b) = checksum(&frame[2..frame.len() - 2]);
            let valid = frame[frame.len() - 2..] == [ck_a, ck_b];
            println!(
                "UBX class 0x{:02X} id 0x{:02X} length {} checksum {}",
                class,
                msg_id,
                length,
                if valid { "ok" } else { "BAD" },
            );
        }

        frames += 1;
        offset += 8 + length;
    }

    println!("{} frames", frames);

    Ok(())
}
