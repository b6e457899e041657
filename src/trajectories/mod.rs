//! # Trajectories: arcs and streaming ingestion
//!
//! Facilities to cut a stream of **MPC 80-column** records into per-object arcs.
//!
//! Modules
//! -----------------
//! * [`arc_splitter`](crate::trajectories::arc_splitter) – Resumable state machine yielding one
//!   [`ObservationArc`] at a time, with parse failures reported alongside the truncated arc.
//! * [`pipeline`](crate::trajectories::pipeline) – Bounded producer/consumer queue connecting a
//!   splitter to the tracklet clusterer.
//!
//! Data Model
//! -----------------
//! An [`ObservationArc`] is a designation plus every decoded observation of that object met
//! contiguously in the input. Records must already be grouped by designation: the splitter
//! only breaks the stream where the designation changes, it neither sorts nor merges groups,
//! and it performs no deduplication.
//!
//! See also
//! ------------
//! * [`crate::observations::mpc_80col_reader`] – Line decoder used by the splitter.
//! * [`crate::tracklets`] – Splitting an arc into observing sessions.
use crate::{
    constants::{Observations, MJD},
    tracklets::{find_tracklets, Tracklet, TrackletParams},
};

pub mod arc_splitter;
pub mod pipeline;

/// All decoded observations of one object met contiguously in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationArc {
    pub designation: String,
    pub observations: Observations,
}

impl ObservationArc {
    /// Number of observations in the arc.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Time span covered by the arc, in days.
    pub fn time_span(&self) -> Option<MJD> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some(last.time - first.time)
    }

    /// Split the arc into tracklets.
    ///
    /// Arguments
    /// -----------------
    /// * `params` – Clustering thresholds.
    ///
    /// Return
    /// ----------
    /// * The tracklets of the arc, ordered by mean time, each holding indices into
    ///   `self.observations`.
    pub fn tracklets(&self, params: &TrackletParams) -> Vec<Tracklet> {
        find_tracklets(&self.observations, params)
            .into_iter()
            .map(|indices| Tracklet::new(self.designation.clone(), indices))
            .collect()
    }
}
