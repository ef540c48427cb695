//! Quantization round trips: reversing the scaling must land within
//! one LSB of the physical value that went in.
use std::f64::consts::PI;
use std::io::BufReader;

use crate::prelude::{Almanac, ScaledAlmanac};
use crate::tests::data::yuma_block;

fn scaled_gps5() -> ScaledAlmanac {
    let almanac = Almanac::from_yuma(BufReader::new(yuma_block(5).as_bytes())).unwrap();
    ScaledAlmanac::from_record(almanac.get(5).unwrap()).unwrap()
}

fn assert_within(physical: f64, recovered: f64, lsb: f64, field: &str) {
    assert!(
        (physical - recovered).abs() <= lsb,
        "{}: {} not within one LSB ({}) of {}",
        field,
        recovered,
        lsb,
        physical,
    );
}

#[test]
fn frame_decode_reproduces_every_scaled_field() {
    let alm = scaled_gps5();
    let frame = alm.to_frame().unwrap();
    assert_eq!(ScaledAlmanac::from_frame(&frame).unwrap(), alm);
}

#[test]
fn reverse_scaling_recovers_physical_values() {
    let alm = scaled_gps5();

    let lsb_21 = 2.0_f64.powi(-21);
    let lsb_19 = 2.0_f64.powi(-19);
    let lsb_38 = 2.0_f64.powi(-38);
    let lsb_23 = 2.0_f64.powi(-23);
    let lsb_20 = 2.0_f64.powi(-20);
    let lsb_11 = 2.0_f64.powi(-11);

    // GPS references: 0.0 eccentricity, 0.30 semicircles inclination
    assert_within(0.0081, alm.e as f64 * lsb_21, lsb_21, "e");
    assert_within(
        503808.0,
        alm.toa as f64 * 4096.0,
        4096.0,
        "toa",
    );
    assert_within(
        0.9685,
        (alm.delta_i as f64 * lsb_19 + 0.30) * PI,
        lsb_19 * PI,
        "deltaI",
    );
    assert_within(
        -7.6e-9,
        alm.omega_dot as f64 * lsb_38 * PI,
        lsb_38 * PI,
        "omegaDot",
    );
    assert_within(5153.6, alm.sqrt_a as f64 * lsb_11, lsb_11, "sqrtA");
    assert_within(1.23, alm.omega0 as f64 * lsb_23 * PI, lsb_23 * PI, "omega0");
    assert_within(0.45, alm.omega as f64 * lsb_23 * PI, lsb_23 * PI, "omega");
    assert_within(-1.1, alm.m0 as f64 * lsb_23 * PI, lsb_23 * PI, "M0");
    assert_within(0.00012, alm.af0 as f64 * lsb_20, lsb_20, "af0");
    assert_within(3.6e-12, alm.af1 as f64 * lsb_38, lsb_38, "af1");
}

#[test]
fn week_number_folds_modulo_256() {
    let alm = scaled_gps5();
    assert_eq!(alm.alm_wna, (780 % 256) as u8);
    assert_eq!(alm.alm_wna, 12);
}
