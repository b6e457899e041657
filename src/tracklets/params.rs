//! # Tracklet clustering parameters
//!
//! [`TrackletParams`] gathers the time thresholds used by
//! [`find_tracklets`](crate::tracklets::find_tracklets). The defaults reproduce the reference
//! heuristic exactly; a custom set is assembled through [`TrackletParamsBuilder`], which
//! validates the values, or deserialized with `serde` (missing fields take their default)
//! and then checked with [`TrackletParams::validate`].
//!
//! Default values:
//!
//! * `tracklet_span`: 0.042 d (≈ 1 h) – any span below is one tracklet
//! * `short_span`: 0.125 d (≈ 3 h) – span accepted for short sets
//! * `max_short_count`: 5 – size of a "short" set
//! * `same_night`: 0.5 d – two observations closer than this share a night
//! * `wide_span`: 0.25 d (≈ 6 h) – span accepted whatever the number of observations
use serde::{Deserialize, Serialize};

use crate::mpc80_errors::Mpc80Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackletParams {
    /// Any set spanning less than this (days) is accepted as one tracklet.
    pub tracklet_span: f64,
    /// Sets of at most `max_short_count` observations spanning less than this (days) are accepted.
    pub short_span: f64,
    pub max_short_count: usize,
    /// Maximum separation (days) of two observations taken the same night.
    pub same_night: f64,
    /// After a failed split, a set spanning less than this (days) is accepted whatever its size.
    pub wide_span: f64,
}

impl TrackletParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`TrackletParamsBuilder`] starting from the default values.
    pub fn builder() -> TrackletParamsBuilder {
        TrackletParamsBuilder::new()
    }

    /// Check that every span is finite and strictly positive and that `max_short_count >= 1`.
    ///
    /// Errors
    /// -----------------
    /// * [`Mpc80Error::InvalidTrackletParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Mpc80Error> {
        let spans = [
            ("tracklet_span", self.tracklet_span),
            ("short_span", self.short_span),
            ("same_night", self.same_night),
            ("wide_span", self.wide_span),
        ];
        if let Some((name, _)) = spans.iter().find(|(_, v)| !(v.is_finite() && *v > 0.)) {
            return Err(Mpc80Error::InvalidTrackletParameter(format!(
                "{name} must be finite and > 0"
            )));
        }
        if self.max_short_count == 0 {
            return Err(Mpc80Error::InvalidTrackletParameter(
                "max_short_count must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TrackletParams {
    fn default() -> Self {
        TrackletParams {
            tracklet_span: 0.042,
            short_span: 0.125,
            max_short_count: 5,
            same_night: 0.5,
            wide_span: 0.25,
        }
    }
}

/// Builder for [`TrackletParams`], with validation.
#[derive(Debug, Clone)]
pub struct TrackletParamsBuilder {
    params: TrackletParams,
}

impl Default for TrackletParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackletParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: TrackletParams::default(),
        }
    }

    pub fn tracklet_span(mut self, v: f64) -> Self {
        self.params.tracklet_span = v;
        self
    }
    pub fn short_span(mut self, v: f64) -> Self {
        self.params.short_span = v;
        self
    }
    pub fn max_short_count(mut self, v: usize) -> Self {
        self.params.max_short_count = v;
        self
    }
    pub fn same_night(mut self, v: f64) -> Self {
        self.params.same_night = v;
        self
    }
    pub fn wide_span(mut self, v: f64) -> Self {
        self.params.wide_span = v;
        self
    }

    /// Finalize the builder, see [`TrackletParams::validate`] for the rules applied.
    pub fn build(self) -> Result<TrackletParams, Mpc80Error> {
        self.params.validate()?;
        Ok(self.params)
    }
}
