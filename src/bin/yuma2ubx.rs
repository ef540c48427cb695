// YUMA almanac text in, UBX-MGA-ALM binary stream out.
use clap::{Arg, ArgAction, ColorChoice, Command};
use env_logger::{Builder, Target};
use log::info;

use std::fs::File;
use std::io::{BufReader, Write};

use yuma2ubx::prelude::{Converter, MgaAlmDecoder, FRAME_LEN};

fn main() -> Result<(), yuma2ubx::Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cmd = Command::new("yuma2ubx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("YUMA almanac to u-blox UBX-MGA-ALM converter")
        .arg_required_else_help(true)
        .color(ColorChoice::Always)
        .arg(Arg::new("input").required(true).help("YUMA almanac (text)"))
        .arg(Arg::new("output").required(true).help("UBX stream (binary)"))
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Round trip every frame through the built-in decoder"),
        );

    let matches = cmd.get_matches();
    let input = matches.get_one::<String>("input").expect("required");
    let output = matches.get_one::<String>("output").expect("required");

    let mut converter = Converter::new()?;
    if matches.get_flag("verify") {
        converter = converter.with_verifier(Box::new(MgaAlmDecoder::default()));
    }

    let reader = BufReader::new(File::open(input)?);
    let ubx = converter.convert(reader)?;

    File::create(output)?.write_all(&ubx)?;

    info!(
        "{}: {} frames ({} bytes) written",
        output,
        ubx.len() / FRAME_LEN,
        ubx.len(),
    );

    Ok(())
}
