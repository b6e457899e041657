//! # MPC 80-Column Record Decoder
//!
//! Decodes single **MPC 80-column** astrometric records into [`Observation`] values.
//!
//! ## Overview
//! -----------------
//! This module provides:
//! - The line-level error type [`DecodeError`].
//! - [`decode`], which turns one record into an [`Observation`] with angles in **radians**
//!   and time in **MJD**.
//! - [`merge_satellite_continuation`], which completes a satellite observation with the
//!   geocentric offset carried by its second record.
//!
//! Both functions are pure: the only shared state is the read-only
//! [`ParallaxLookup`], so they may be called concurrently.
//!
//! ## Field Layout (0-based byte ranges)
//! -----------------
//! | Field | Range | Notes |
//! |---|---|---|
//! | Designation | `0..12` | trimmed |
//! | Satellite marker | `14` | `'S'` line 1, `'s'` continuation |
//! | Date | `15..32` | `YYYY MM DD.dddddd` |
//! | Right ascension | `32..44` | `HH MM SS.sss` |
//! | Declination | `44..56` | sign + `DD MM SS.ss` |
//! | Magnitude / band | `65..70` / `70` | blank magnitude allowed |
//! | Site code | `77..80` | MPC code |
//!
//! A continuation record additionally holds the units flag (`32`, `'1'` = km) and three
//! signed offsets (`34..46`, `46..58`, `58..70`).
//!
//! ## Error Handling
//! -----------------
//! Every failure is reported as a [`DecodeError`]; decoding never panics, whatever the input.
use nalgebra::Vector3;
use thiserror::Error;

use crate::{
    constants::{KM_TO_AU, RECORD_LEN},
    conversion::{parse_dec_to_rad, parse_magnitude, parse_offset, parse_ra_to_rad},
    observations::{Observation, ObservationKind},
    observers::ParallaxLookup,
    time::parse_obs80_date,
};

/// Identity field checked when merging a satellite continuation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteField {
    Designation,
    Date,
    SiteCode,
}

impl std::fmt::Display for SatelliteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SatelliteField::Designation => write!(f, "designation"),
            SatelliteField::Date => write!(f, "date"),
            SatelliteField::SiteCode => write!(f, "obscode"),
        }
    }
}

/// Line-level decoding errors for MPC 80-column records.
///
/// Variants
/// -----------------
/// * `Length` – The record is not exactly 80 characters; payload is the length found.
/// * `NotAscii` – The record holds 80 characters but is not plain ASCII.
/// * `SatelliteContinuation` – A continuation record (column 15 is `'s'`) was given to [`decode`].
/// * `InvalidDate` – Failed to parse the date (`line[15..32]`) or the date precedes MJD 0.
/// * `InvalidRA` – Failed to parse the RA field (`line[32..44]`).
/// * `InvalidDec` – Failed to parse the Dec field (`line[44..56]`).
/// * `InvalidMagnitude` – A non-blank magnitude field (`line[65..70]`) did not parse.
/// * `UnknownSite` – The site code (`line[77..80]`) is absent from the parallax table.
/// * `InvalidOffset` – A satellite offset field did not parse.
/// * `SatelliteMismatch` – A continuation record does not describe the same observation as line 1.
/// * `OrphanContinuation` – A continuation record without a pending satellite line 1.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("observation line length = {0}, want 80")]
    Length(usize),
    #[error("observation line is not ASCII")]
    NotAscii,
    #[error("the line is a satellite continuation line")]
    SatelliteContinuation,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Error parsing RA: {0}")]
    InvalidRA(String),
    #[error("Invalid Dec value: {0}")]
    InvalidDec(String),
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),
    #[error("Unknown observatory code: {0}")]
    UnknownSite(String),
    #[error("sat obs line 2 invalid offset: {0}")]
    InvalidOffset(String),
    #[error("sat obs line 2 {field} = {line2}, line 1 was {line1}")]
    SatelliteMismatch {
        field: SatelliteField,
        line1: String,
        line2: String,
    },
    #[error("space-based observation line 2 without line 1")]
    OrphanContinuation,
}

/// Check that `line` is a plain 80-character record, so that fixed byte slicing is safe.
fn check_record(line: &str) -> Result<(), DecodeError> {
    let len = line.chars().count();
    if len != RECORD_LEN {
        return Err(DecodeError::Length(len));
    }
    if !line.is_ascii() {
        return Err(DecodeError::NotAscii);
    }
    Ok(())
}

/// `true` when column 15 flags `line` as the continuation of a satellite observation.
pub fn is_satellite_continuation(line: &str) -> bool {
    line.as_bytes().get(14) == Some(&b's')
}

/// Decode a single **MPC 80-column** record into an [`Observation`].
///
/// The site code is resolved against `lookup`. A site without fixed parallax (inner `None`)
/// or a record flagged `'S'` in column 15 gives a satellite observation, still waiting for
/// its continuation line; any other record gives a site observation.
///
/// Arguments
/// -----------------
/// * `line` – A single record, trailing newline already stripped.
/// * `lookup` – MPC site code → parallax constant table.
///
/// Return
/// ----------
/// * The decoded [`Observation`] (its designation is trimmed), or the first [`DecodeError`]
///   met, checking the fields in order: length, date, RA, Dec, magnitude, site code.
///
/// See also
/// ------------
/// * [`merge_satellite_continuation`] – Completes satellite observations.
/// * [`parse_obs80_date`] – Date field → MJD.
pub fn decode<P: ParallaxLookup + ?Sized>(
    line: &str,
    lookup: &P,
) -> Result<Observation, DecodeError> {
    check_record(line)?;

    if is_satellite_continuation(line) {
        return Err(DecodeError::SatelliteContinuation);
    }

    let date = &line[15..32];
    let time = parse_obs80_date(date)
        .filter(|mjd| *mjd >= 0.)
        .ok_or_else(|| DecodeError::InvalidDate(date.trim().to_string()))?;

    let ra = parse_ra_to_rad(line)
        .ok_or_else(|| DecodeError::InvalidRA(line[32..44].trim().to_string()))?;

    let dec = parse_dec_to_rad(line)
        .ok_or_else(|| DecodeError::InvalidDec(line[44..56].trim().to_string()))?;

    let magnitude = parse_magnitude(line).map_err(DecodeError::InvalidMagnitude)?;

    let site_code = &line[77..80];
    let parallax = lookup
        .lookup(site_code)
        .ok_or_else(|| DecodeError::UnknownSite(site_code.to_string()))?;

    let kind = match parallax {
        Some(parallax) if line.as_bytes()[14] != b'S' => ObservationKind::Site { parallax },
        _ => ObservationKind::Satellite { offset: None },
    };

    Ok(Observation {
        designation: line[..12].trim().to_string(),
        time,
        ra,
        dec,
        magnitude,
        site_code: site_code.to_string(),
        quality: site_code.to_string(),
        kind,
    })
}

/// Merge the continuation record of a space-based observation into its line 1.
///
/// The continuation must carry the same designation, date and site code as line 1. The
/// three offsets are read in kilometers when the units flag (column 33) is `'1'` and
/// converted to AU, otherwise they are taken as AU.
///
/// Arguments
/// -----------------
/// * `line` – The continuation record.
/// * `expected_designation` – Designation decoded from line 1.
/// * `obs` – The satellite observation decoded from line 1, updated in place.
///
/// Return
/// ----------
/// * `Ok(())` once the offset is stored; `obs` is left untouched on error.
///
/// Errors
/// ----------
/// * [`DecodeError::OrphanContinuation`] if `obs` is not a satellite observation awaiting
///   its offset.
/// * [`DecodeError::SatelliteMismatch`] on an identity mismatch with line 1.
/// * [`DecodeError::InvalidDate`], [`DecodeError::InvalidOffset`] on malformed fields.
pub fn merge_satellite_continuation(
    line: &str,
    expected_designation: &str,
    obs: &mut Observation,
) -> Result<(), DecodeError> {
    check_record(line)?;

    let mismatch = |field, line1: &str, line2: &str| DecodeError::SatelliteMismatch {
        field,
        line1: line1.to_string(),
        line2: line2.to_string(),
    };

    let designation = line[..12].trim();
    if designation != expected_designation {
        return Err(mismatch(
            SatelliteField::Designation,
            expected_designation,
            designation,
        ));
    }

    if !matches!(obs.kind, ObservationKind::Satellite { offset: None }) {
        return Err(DecodeError::OrphanContinuation);
    }

    let date = &line[15..32];
    let time = parse_obs80_date(date)
        .ok_or_else(|| DecodeError::InvalidDate(date.trim().to_string()))?;
    if time != obs.time {
        return Err(mismatch(
            SatelliteField::Date,
            &obs.time.to_string(),
            date.trim(),
        ));
    }

    let site_code = &line[77..80];
    if site_code != obs.site_code {
        return Err(mismatch(SatelliteField::SiteCode, &obs.site_code, site_code));
    }

    let offset_field = |range: std::ops::Range<usize>| {
        let raw = &line[range];
        parse_offset(raw).ok_or_else(|| DecodeError::InvalidOffset(raw.to_string()))
    };
    let mut offset = Vector3::new(
        offset_field(34..46)?,
        offset_field(46..58)?,
        offset_field(58..70)?,
    );
    if line.as_bytes()[32] == b'1' {
        offset *= KM_TO_AU;
    }

    obs.kind = ObservationKind::Satellite {
        offset: Some(offset),
    };
    Ok(())
}
