//! Physical to fixed point conversion, per the UBX-MGA-ALM scaling.
use std::f64::consts::PI;
use std::fmt;

use num_traits::NumCast;

use crate::almanac::AlmanacRecord;
use crate::error::Error;
use crate::prelude::SV;

/// Fixed point image of one [AlmanacRecord], field for field what the
/// receiver expects on the wire. Only fully populated, supported
/// records can be scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledAlmanac {
    /// [SV] identity: selects the message ID and the `svId` byte
    pub sv: SV,
    /// Health code, untouched
    pub health: u8,
    /// Eccentricity, relative to reference, 2^-21 LSB
    pub e: u16,
    /// Week number modulo 256
    pub alm_wna: u8,
    /// Time of applicability, 2^12 s LSB
    pub toa: u8,
    /// Inclination relative to reference, semicircles, 2^-19 LSB
    pub delta_i: i16,
    /// Rate of right ascension, semicircles/s, 2^-38 LSB
    pub omega_dot: i16,
    /// Square root of semi major axis, 2^-11 LSB
    pub sqrt_a: u32,
    /// Right ascension at week, semicircles, 2^-23 LSB
    pub omega0: i32,
    /// Argument of perigee, semicircles, 2^-23 LSB
    pub omega: i32,
    /// Mean anomaly, semicircles, 2^-23 LSB
    pub m0: i32,
    /// Clock bias, 2^-20 s LSB
    pub af0: i16,
    /// Clock drift, 2^-38 s/s LSB
    pub af1: i16,
}

impl ScaledAlmanac {
    /// Scales a fully populated [AlmanacRecord]. Fails on records with
    /// no wire representation, on missing fields, and on values that
    /// overflow their fixed point encoding.
    pub fn from_record(record: &AlmanacRecord) -> Result<Self, Error> {
        if !record.supported {
            return Err(Error::UnsupportedId(record.yuma_id));
        }

        // supported records always carry an identity
        let sv = record.sv.ok_or(Error::UnsupportedId(record.yuma_id))?;

        let reference = record.reference;

        let health = match record.health {
            Some(health) => health,
            None => return Err(Error::MissingField { sv, field: "Health" }),
        };

        let week = match record.week {
            Some(week) => week,
            None => return Err(Error::MissingField { sv, field: "week" }),
        };

        let eccentricity = field(record.eccentricity, sv, "Eccentricity")?;
        let toa_s = field(record.toa_s, sv, "Time of Applicability(s)")?;
        let inclination = field(record.inclination_rad, sv, "Orbital Inclination(rad)")?;
        let omega_dot = field(record.omega_dot_rad_s, sv, "Rate of Right Ascen(r/s)")?;
        let sqrt_a = field(record.sqrt_a, sv, "SQRT(A)  (m 1/2)")?;
        let omega0 = field(record.omega0_rad, sv, "Right Ascen at Week(rad)")?;
        let omega = field(record.omega_rad, sv, "Argument of Perigee(rad)")?;
        let m0 = field(record.m0_rad, sv, "Mean Anom(rad)")?;
        let af0 = field(record.af0_s, sv, "Af0(s)")?;
        let af1 = field(record.af1_s, sv, "Af1(s/s)")?;

        Ok(Self {
            sv,
            health,
            // YUMA carries absolutes, the wire format wants offsets
            e: quantize(
                (eccentricity - reference.eccentricity) / 2.0_f64.powi(-21),
                sv,
                "e",
            )?,
            alm_wna: (week % 256) as u8,
            toa: quantize(toa_s / 2.0_f64.powi(12), sv, "toa")?,
            delta_i: quantize(
                (inclination / PI - reference.inclination) / 2.0_f64.powi(-19),
                sv,
                "deltaI",
            )?,
            omega_dot: quantize(omega_dot / 2.0_f64.powi(-38) / PI, sv, "omegaDot")?,
            sqrt_a: quantize(sqrt_a / 2.0_f64.powi(-11), sv, "sqrtA")?,
            omega0: quantize(omega0 / 2.0_f64.powi(-23) / PI, sv, "omega0")?,
            omega: quantize(omega / 2.0_f64.powi(-23) / PI, sv, "omega")?,
            m0: quantize(m0 / 2.0_f64.powi(-23) / PI, sv, "M0")?,
            af0: quantize(af0 / 2.0_f64.powi(-20), sv, "af0")?,
            af1: quantize(af1 / 2.0_f64.powi(-38), sv, "af1")?,
        })
    }
}

impl fmt::Display for ScaledAlmanac {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}: health={} e={} almWNa={} toa={} deltaI={} omegaDot={} sqrtA={} omega0={} omega={} M0={} af0={} af1={}",
            self.sv,
            self.health,
            self.e,
            self.alm_wna,
            self.toa,
            self.delta_i,
            self.omega_dot,
            self.sqrt_a,
            self.omega0,
            self.omega,
            self.m0,
            self.af0,
            self.af1,
        )
    }
}

fn field(value: Option<f64>, sv: SV, field: &'static str) -> Result<f64, Error> {
    value.ok_or(Error::MissingField { sv, field })
}

/// Truncates toward zero, then range checks against the target width.
/// Truncation (not rounding) is what receivers expect: the almanac
/// interfaces define the fixed point value as the integer part.
fn quantize<T: NumCast>(value: f64, sv: SV, field: &'static str) -> Result<T, Error> {
    NumCast::from(value.trunc()).ok_or(Error::FixedPointOverflow { sv, field })
}

#[cfg(test)]
mod test {
    use super::{quantize, ScaledAlmanac};
    use crate::almanac::AlmanacRecord;
    use crate::error::Error;
    use crate::prelude::{Constellation, SV};

    fn sv() -> SV {
        SV::new(Constellation::GPS, 1)
    }

    #[test]
    fn quantization_truncates_toward_zero() {
        assert_eq!(quantize::<i16>(664.97, sv(), "x").unwrap(), 664);
        assert_eq!(quantize::<i16>(-664.97, sv(), "x").unwrap(), -664);
        assert_eq!(quantize::<i16>(0.98, sv(), "x").unwrap(), 0);
        assert_eq!(quantize::<i16>(-0.98, sv(), "x").unwrap(), 0);
    }

    #[test]
    fn quantization_rejects_overflow() {
        assert!(quantize::<i16>(32768.0, sv(), "x").is_err());
        assert!(quantize::<i16>(-32769.0, sv(), "x").is_err());
        assert!(quantize::<u8>(256.0, sv(), "x").is_err());
        assert!(quantize::<u16>(-1.0, sv(), "x").is_err());
        assert!(quantize::<u32>(f64::NAN, sv(), "x").is_err());
        assert_eq!(quantize::<i16>(32767.9, sv(), "x").unwrap(), i16::MAX);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut record = AlmanacRecord::new(5);
        record.health = Some(0);
        record.week = Some(780);
        match ScaledAlmanac::from_record(&record) {
            Err(Error::MissingField { field, .. }) => assert_eq!(field, "Eccentricity"),
            other => panic!("expected missing field error, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_records_cannot_be_scaled() {
        let record = AlmanacRecord::new(198); // geosynchronous QZSS
        assert!(matches!(
            ScaledAlmanac::from_record(&record),
            Err(Error::UnsupportedId(198))
        ));

        let record = AlmanacRecord::new(33);
        assert!(matches!(
            ScaledAlmanac::from_record(&record),
            Err(Error::UnsupportedId(33))
        ));
    }
}
