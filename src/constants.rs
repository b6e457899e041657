//! # Constants and type definitions for mpc80
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants used to scale parallax constants and satellite offsets
//! - Unit conversions (hours/degrees/arcseconds ↔ radians)
//! - Core type aliases used across the crate
//! - The inline container used to store the observations of one arc

use crate::observations::Observation;
use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers, as used by the MPC for satellite offsets
pub const AU_KM: f64 = 149.59787e6;

/// Earth equatorial radius in meters, as used by the MPC obscode table
pub const EARTH_RADIUS_M: f64 = 6.37814e6;

/// Earth radius expressed in astronomical units (scale for ρ·cosφ, ρ·sinφ)
pub const EARTH_RADIUS_AU: f64 = EARTH_RADIUS_M / (AU_KM * 1000.);

/// Kilometers → astronomical units
pub const KM_TO_AU: f64 = 1. / AU_KM;

/// Seconds of time → radians (1 hour of right ascension is 15°)
pub const RADSEC_TIME: f64 = std::f64::consts::PI / (12. * 3600.);

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / (180. * 3600.);

/// Width of an MPC 80-column record
pub const RECORD_LEN: usize = 80;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// MPC code identifying an observatory (3 characters)
pub type MpcCode = String;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Data containers
// -------------------------------------------------------------------------------------------------

/// A small, inline-optimized container for the observations of a single arc.
pub type Observations = SmallVec<[Observation; 6]>;
