//! # Observatory parallax constants
//!
//! Fixed ground sites are located by their **geocentric parallax constants**
//! (ρ·cosφ, ρ·sinφ) and their longitude. This module provides:
//!
//! - [`ParallaxConstant`](crate::observers::ParallaxConstant), the per-site geometry, stored with ρ·cosφ and ρ·sinφ
//!   already scaled from **Earth radii** to **AU**.
//! - The [`ParallaxLookup`](crate::observers::ParallaxLookup) trait, the narrow read-only interface the line decoder
//!   consumes: MPC site code → parallax constant.
//! - [`ParallaxMap`](crate::observers::ParallaxMap), the hash-map implementation built by
//!   [`obscode_reader`](crate::observers::obscode_reader) from an MPC `obscode.dat` table.
//!
//! ## Known code without parallax
//!
//! A lookup distinguishes three cases:
//!
//! ```text
//! None              -> unknown site code (decoding error)
//! Some(None)        -> known code without fixed-site correction (space telescopes, satellites)
//! Some(Some(p))     -> fixed ground site with parallax constant p
//! ```
//!
//! ## Sharing
//!
//! A lookup table must be fully populated before decoding starts and is never mutated
//! afterwards. Wrap it in a [`std::sync::Arc`] to share it between several
//! [`ArcSplitter`](crate::trajectories::arc_splitter::ArcSplitter)s running in parallel;
//! `&T` and `Arc<T>` implement [`ParallaxLookup`](crate::observers::ParallaxLookup) whenever `T` does.

pub mod obscode_reader;

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use ahash::RandomState;
use ordered_float::NotNan;

use crate::constants::{AstronomicalUnit, Degree, MpcCode, Radian, EARTH_RADIUS_AU};
use crate::mpc80_errors::Mpc80Error;

/// Geocentric parallax constants of a fixed observing site.
///
/// Units
/// -----
/// * `longitude`: radians, east of Greenwich.
/// * `rho_cos_phi`, `rho_sin_phi`: astronomical units (ρ in Earth radii scaled by the
///   Earth radius expressed in AU).
///
/// See also
/// ------------
/// * [`ParallaxConstant::from_earth_radii`] – Construct from obscode.dat units.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ParallaxConstant {
    /// Longitude in **radians** east of Greenwich.
    pub longitude: NotNan<Radian>,

    /// ρ·cosφ (geocentric latitude φ), in **AU**.
    pub rho_cos_phi: NotNan<AstronomicalUnit>,

    /// ρ·sinφ (geocentric latitude φ), in **AU**.
    pub rho_sin_phi: NotNan<AstronomicalUnit>,
}

impl ParallaxConstant {
    /// Build a parallax constant from the units of the MPC obscode table.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: longitude in degrees east of Greenwich.
    /// * `rho_cos_phi`, `rho_sin_phi`: parallax components in Earth radii.
    ///
    /// Return
    /// ----------
    /// * The parallax constant with components scaled to AU, or
    ///   [`Mpc80Error::InvalidParallax`] if any input is NaN.
    pub fn from_earth_radii(
        longitude: Degree,
        rho_cos_phi: f64,
        rho_sin_phi: f64,
    ) -> Result<Self, Mpc80Error> {
        let not_nan = |v: f64, name: &str| {
            NotNan::new(v).map_err(|_| Mpc80Error::InvalidParallax(format!("{name} is NaN")))
        };
        Ok(ParallaxConstant {
            longitude: not_nan(longitude.to_radians(), "longitude")?,
            rho_cos_phi: not_nan(rho_cos_phi * EARTH_RADIUS_AU, "rho_cos_phi")?,
            rho_sin_phi: not_nan(rho_sin_phi * EARTH_RADIUS_AU, "rho_sin_phi")?,
        })
    }

    /// Longitude in degrees east of Greenwich.
    pub fn longitude_deg(&self) -> Degree {
        self.longitude.into_inner().to_degrees()
    }
}

/// Read-only mapping from a 3-character MPC site code to its parallax constant.
///
/// The outer `Option` tells whether the code is known at all, the inner one whether the
/// site has a fixed-site correction.
pub trait ParallaxLookup {
    fn lookup(&self, code: &str) -> Option<Option<ParallaxConstant>>;
}

/// Lookup table from MPC code to optional [`ParallaxConstant`].
///
/// Uses [`ahash`](https://docs.rs/ahash) for fast hashing.
pub type ParallaxMap = HashMap<MpcCode, Option<ParallaxConstant>, RandomState>;

impl<S: BuildHasher> ParallaxLookup for HashMap<MpcCode, Option<ParallaxConstant>, S> {
    fn lookup(&self, code: &str) -> Option<Option<ParallaxConstant>> {
        self.get(code).copied()
    }
}

impl<T: ParallaxLookup + ?Sized> ParallaxLookup for &T {
    fn lookup(&self, code: &str) -> Option<Option<ParallaxConstant>> {
        (**self).lookup(code)
    }
}

impl<T: ParallaxLookup + ?Sized> ParallaxLookup for Arc<T> {
    fn lookup(&self, code: &str) -> Option<Option<ParallaxConstant>> {
        (**self).lookup(code)
    }
}
