//! Line oriented YUMA almanac parsing.
use std::io::BufRead;
use std::str::FromStr;

use num_traits::cast;

use crate::almanac::Almanac;
use crate::error::Error;

// Field labels exactly as published in YUMA almanacs
const ID: &str = "ID";
const HEALTH: &str = "Health";
const ECCENTRICITY: &str = "Eccentricity";
const WEEK: &str = "week";
const TOA: &str = "Time of Applicability(s)";
const INCLINATION: &str = "Orbital Inclination(rad)";
const RATE_OF_RA: &str = "Rate of Right Ascen(r/s)";
const SQRT_A: &str = "SQRT(A)  (m 1/2)";
const RA_AT_WEEK: &str = "Right Ascen at Week(rad)";
const ARG_OF_PERIGEE: &str = "Argument of Perigee(rad)";
const MEAN_ANOMALY: &str = "Mean Anom(rad)";
const AF0: &str = "Af0(s)";
const AF1: &str = "Af1(s/s)";

const FIELDS: [&str; 12] = [
    HEALTH,
    ECCENTRICITY,
    WEEK,
    TOA,
    INCLINATION,
    RATE_OF_RA,
    SQRT_A,
    RA_AT_WEEK,
    ARG_OF_PERIGEE,
    MEAN_ANOMALY,
    AF0,
    AF1,
];

/// Parses a complete YUMA stream into an [Almanac].
/// Lines without a `:` (banners, blanks) and unrecognized labels are
/// ignored. An `ID` line opens a new active record; every recognized
/// value line mutates the most recently opened one.
pub(crate) fn parse<R: BufRead>(reader: R) -> Result<Almanac, Error> {
    let mut almanac = Almanac::default();
    let mut current: Option<usize> = None;

    for line in reader.lines() {
        let line = line?;

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field.trim(), value.trim()),
            None => continue,
        };

        if field == ID {
            let yuma_id = parse_int::<u16>(ID, value)?;
            current = Some(almanac.open(yuma_id));
            continue;
        }

        let field = match FIELDS.iter().find(|known| **known == field) {
            Some(known) => *known,
            None => continue,
        };

        let position = current.ok_or(Error::OrphanField { field })?;
        let record = almanac.record_mut(position);

        match field {
            HEALTH => record.health = Some(parse_int::<u8>(HEALTH, value)?),
            ECCENTRICITY => record.eccentricity = Some(parse_f64(ECCENTRICITY, value)?),
            WEEK => record.week = Some(parse_week(value)?),
            TOA => record.toa_s = Some(parse_f64(TOA, value)?),
            INCLINATION => record.inclination_rad = Some(parse_f64(INCLINATION, value)?),
            RATE_OF_RA => record.omega_dot_rad_s = Some(parse_f64(RATE_OF_RA, value)?),
            SQRT_A => record.sqrt_a = Some(parse_f64(SQRT_A, value)?),
            RA_AT_WEEK => record.omega0_rad = Some(parse_f64(RA_AT_WEEK, value)?),
            ARG_OF_PERIGEE => record.omega_rad = Some(parse_f64(ARG_OF_PERIGEE, value)?),
            MEAN_ANOMALY => record.m0_rad = Some(parse_f64(MEAN_ANOMALY, value)?),
            AF0 => record.af0_s = Some(parse_f64(AF0, value)?),
            AF1 => record.af1_s = Some(parse_f64(AF1, value)?),
            _ => unreachable!("not a recognized YUMA field"),
        }
    }

    Ok(almanac)
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, Error> {
    value.parse::<T>().map_err(|_| Error::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, Error> {
    value.parse::<f64>().map_err(|_| Error::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Week numbers occasionally show up float formatted ("780.0")
fn parse_week(value: &str) -> Result<u32, Error> {
    let week = parse_f64(WEEK, value)?;
    cast::<f64, u32>(week.trunc()).ok_or_else(|| Error::InvalidValue {
        field: WEEK,
        value: value.to_string(),
    })
}
