//! # Astrometric observations
//!
//! An [`Observation`](crate::observations::Observation) is one decoded position measurement of a
//! minor planet: epoch in **MJD (UTC)**, right ascension and declination in **radians**, an
//! optional band-corrected magnitude and the MPC code of the reporting site.
//!
//! Observations come in two kinds ([`ObservationKind`](crate::observations::ObservationKind)):
//!
//! - **Site** – taken from a fixed ground site, carrying its
//!   [`ParallaxConstant`](crate::observers::ParallaxConstant).
//! - **Satellite** – taken from a moving observer (space telescope, satellite). The
//!   geocentric offset of the observer is only known once the continuation record
//!   ("line 2") has been merged by
//!   [`merge_satellite_continuation`](crate::observations::mpc_80col_reader::merge_satellite_continuation).
//!
//! Records are decoded by [`mpc_80col_reader`](crate::observations::mpc_80col_reader).
pub mod mpc_80col_reader;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{AstronomicalUnit, MpcCode, Radian, MJD},
    observers::ParallaxConstant,
    time::mjd_to_epoch,
};

/// Observer-dependent part of an [`Observation`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationKind {
    /// Fixed ground site with known parallax constants.
    Site { parallax: ParallaxConstant },
    /// Moving observer. `offset` is the geocentric position of the observer in **AU**,
    /// `None` until the continuation line has been merged.
    Satellite {
        offset: Option<Vector3<AstronomicalUnit>>,
    },
}

/// A decoded 80-column observation
///
/// # Fields
///
/// * `designation` - The trimmed object designation (columns 1–12)
/// * `time` - The epoch of the observation (MJD, UTC)
/// * `ra` - The right ascension of the observation in Radians
/// * `dec` - The declination of the observation in Radians
/// * `magnitude` - The band-corrected magnitude, `None` when not reported
/// * `site_code` - The MPC code of the observatory (columns 78–80)
/// * `quality` - Provenance tag, a copy of the site code
/// * `kind` - Site or satellite specific data
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub designation: String,
    pub time: MJD,
    pub ra: Radian,
    pub dec: Radian,
    pub magnitude: Option<f64>,
    pub site_code: MpcCode,
    pub quality: String,
    pub kind: ObservationKind,
}

impl Observation {
    /// `true` for observations taken from a moving observer.
    pub fn is_satellite(&self) -> bool {
        matches!(self.kind, ObservationKind::Satellite { .. })
    }

    /// `false` only for a satellite observation still waiting for its continuation line.
    pub fn is_complete(&self) -> bool {
        !matches!(self.kind, ObservationKind::Satellite { offset: None })
    }

    /// Parallax constant of the fixed site, `None` for satellite observations.
    pub fn parallax(&self) -> Option<&ParallaxConstant> {
        match &self.kind {
            ObservationKind::Site { parallax } => Some(parallax),
            ObservationKind::Satellite { .. } => None,
        }
    }

    /// Geocentric offset of a satellite observer in AU, once merged.
    pub fn offset(&self) -> Option<&Vector3<AstronomicalUnit>> {
        match &self.kind {
            ObservationKind::Satellite { offset } => offset.as_ref(),
            ObservationKind::Site { .. } => None,
        }
    }

    /// The observation time as a UTC [`Epoch`].
    pub fn epoch(&self) -> Epoch {
        mjd_to_epoch(self.time)
    }
}
