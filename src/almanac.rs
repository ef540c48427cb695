//! Per satellite almanac records and the ordered record collection.
use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Error;
use crate::prelude::{Constellation, SV};

/// Reference orbit constants, in semicircles. The wire format carries
/// eccentricity and inclination relative to these, not as absolutes.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct AlmanacReference {
    /// Reference eccentricity
    pub eccentricity: f64,
    /// Reference inclination (semicircles)
    pub inclination: f64,
}

impl AlmanacReference {
    /// Reference constants for this [SV], from IS-GPS-200 (GPS) and
    /// IS-QZSS-PNT-004 (QZSS). Geosynchronous QZSS falls through to
    /// zero references and is flagged unsupported by [AlmanacRecord].
    pub fn from_sv(sv: SV) -> Self {
        match (sv.constellation, sv.prn) {
            (Constellation::GPS, _) => Self {
                eccentricity: 0.0,
                inclination: 0.30,
            },
            (Constellation::QZSS, 1..=5) => Self {
                eccentricity: 0.06,
                inclination: 0.25,
            },
            _ => Self::default(),
        }
    }
}

/// Maps a raw YUMA satellite ID to its [SV] identity.
/// GPS occupies 1-32, the QZSS block 193-202 (PRN J01-J10).
/// Anything else has no identity and no wire format.
pub(crate) fn sv_from_yuma_id(yuma_id: u16) -> Option<SV> {
    match yuma_id {
        1..=32 => Some(SV::new(Constellation::GPS, yuma_id as u8)),
        193..=202 => Some(SV::new(Constellation::QZSS, (yuma_id - 192) as u8)),
        _ => None,
    }
}

/// One satellite almanac, in physical units as parsed from YUMA.
/// Identity, reference constants and support status are fixed the
/// instant the `ID` line is read and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct AlmanacRecord {
    /// Raw YUMA satellite ID
    pub yuma_id: u16,
    /// [SV] identity, None when `yuma_id` falls outside both ranges
    pub sv: Option<SV>,
    /// False when this record cannot be expressed as UBX-MGA-ALM.
    /// Such records are parsed and retained, but never encoded.
    pub supported: bool,
    /// Constellation reference constants
    pub reference: AlmanacReference,
    /// Health code
    pub health: Option<u8>,
    /// Eccentricity (absolute)
    pub eccentricity: Option<f64>,
    /// GPS week number
    pub week: Option<u32>,
    /// Time of applicability (s)
    pub toa_s: Option<f64>,
    /// Orbital inclination (rad)
    pub inclination_rad: Option<f64>,
    /// Rate of right ascension (rad/s)
    pub omega_dot_rad_s: Option<f64>,
    /// Square root of the semi major axis (m^0.5)
    pub sqrt_a: Option<f64>,
    /// Right ascension at week (rad)
    pub omega0_rad: Option<f64>,
    /// Argument of perigee (rad)
    pub omega_rad: Option<f64>,
    /// Mean anomaly (rad)
    pub m0_rad: Option<f64>,
    /// Clock bias (s)
    pub af0_s: Option<f64>,
    /// Clock drift (s/s)
    pub af1_s: Option<f64>,
}

impl AlmanacRecord {
    /// Opens a new record for this raw YUMA ID.
    pub fn new(yuma_id: u16) -> Self {
        let sv = sv_from_yuma_id(yuma_id);

        let supported = match sv {
            // Geosynchronous QZSS (J06-J10) has no UBX-MGA-ALM message
            Some(sv) => !(sv.constellation == Constellation::QZSS && sv.prn > 5),
            None => false,
        };

        Self {
            yuma_id,
            sv,
            supported,
            reference: sv.map(AlmanacReference::from_sv).unwrap_or_default(),
            health: None,
            eccentricity: None,
            week: None,
            toa_s: None,
            inclination_rad: None,
            omega_dot_rad_s: None,
            sqrt_a: None,
            omega0_rad: None,
            omega_rad: None,
            m0_rad: None,
            af0_s: None,
            af1_s: None,
        }
    }
}

/// Complete almanac: one [AlmanacRecord] per distinct satellite ID,
/// iterated in the order their `ID` lines were first seen.
#[derive(Debug, Default)]
pub struct Almanac {
    records: Vec<AlmanacRecord>,
    index: HashMap<u16, usize>,
}

impl Almanac {
    /// Parses a complete YUMA text stream.
    pub fn from_yuma<R: BufRead>(reader: R) -> Result<Self, Error> {
        crate::yuma::parse(reader)
    }

    /// Opens a fresh record for `yuma_id` and returns its position.
    /// A repeated ID resets the existing record in place, keeping its
    /// original iteration position.
    pub(crate) fn open(&mut self, yuma_id: u16) -> usize {
        match self.index.get(&yuma_id) {
            Some(&position) => {
                self.records[position] = AlmanacRecord::new(yuma_id);
                position
            },
            None => {
                self.records.push(AlmanacRecord::new(yuma_id));
                self.index.insert(yuma_id, self.records.len() - 1);
                self.records.len() - 1
            },
        }
    }

    pub(crate) fn record_mut(&mut self, position: usize) -> &mut AlmanacRecord {
        &mut self.records[position]
    }

    /// Records in first seen order
    pub fn records(&self) -> impl Iterator<Item = &AlmanacRecord> {
        self.records.iter()
    }

    /// Looks a record up by raw YUMA ID
    pub fn get(&self, yuma_id: u16) -> Option<&AlmanacRecord> {
        self.index.get(&yuma_id).map(|&position| &self.records[position])
    }

    /// Number of records (supported or not)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
