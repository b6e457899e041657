//! # Tracklets: observing sessions inside an arc
//!
//! A **tracklet** is a short run of observations showing the motion of an object, typically
//! taken by one observer under the same conditions. The 80-column format does not preserve
//! this information, so [`find_tracklets`](crate::tracklets::find_tracklets) rebuilds working
//! tracklets from the observation times and observer identities alone.
//!
//! ## Heuristic
//!
//! Members are grouped by observer and sorted by time, then each group is reduced. A set `S`
//! spanning `d` days is:
//!
//! ```text
//! d < tracklet_span                              -> accepted
//! |S| <= max_short_count and d < short_span      -> accepted
//! |S| == 2                                       -> accepted if d < same_night, else two singletons
//! otherwise split at the longest gap (first one on ties) into L, R:
//!   |L| >= 3 and |R| >= 3                        -> reduce L, reduce R
//!   |L| == 2 within same_night, |R| >= 2         -> accept L, reduce R
//!   |R| == 2 within same_night, |L| >= 2         -> reduce L, accept R
//!   |S| == 3 and d < same_night                  -> accept S
//!   d < wide_span                                -> accept S
//!   else                                         -> reduce L, reduce R
//! ```
//!
//! Rules are evaluated top-down, first match wins. The result is ordered by mean time, ties
//! broken by the smallest member index so that the output never depends on hash order.
//!
//! Reduction runs on an explicit work stack rather than by recursion. Every split removes at
//! least one member from each side, so the total work is bounded by O(n²) for n members of
//! one observer and the stack never holds more than n entries.
pub mod params;

use std::collections::HashMap;

use ahash::RandomState;
use itertools::Itertools;
use log::debug;

use crate::{constants::MJD, observations::Observation};

pub use params::{TrackletParams, TrackletParamsBuilder};

/// Data needed to split an arc into tracklets.
pub trait TrackletMember {
    /// Date and time of a single observation.
    fn mjd(&self) -> MJD;
    /// String identifying the observer or site.
    fn observer(&self) -> &str;
}

impl TrackletMember for Observation {
    fn mjd(&self) -> MJD {
        self.time
    }

    fn observer(&self) -> &str {
        &self.site_code
    }
}

impl<S: AsRef<str>> TrackletMember for (MJD, S) {
    fn mjd(&self) -> MJD {
        self.0
    }

    fn observer(&self) -> &str {
        self.1.as_ref()
    }
}

impl<T: TrackletMember + ?Sized> TrackletMember for &T {
    fn mjd(&self) -> MJD {
        (**self).mjd()
    }

    fn observer(&self) -> &str {
        (**self).observer()
    }
}

/// One tracklet as indices into the clustered sequence.
///
/// `members` are in time order; `mean_time` is the arithmetic mean of their times.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackletIndices {
    pub members: Vec<usize>,
    pub mean_time: MJD,
}

impl TrackletIndices {
    fn from_dated(set: &[Dated]) -> Self {
        let sum: f64 = set.iter().map(|d| d.mjd).sum();
        TrackletIndices {
            members: set.iter().map(|d| d.index).collect(),
            mean_time: sum / set.len() as f64,
        }
    }

    fn first_index(&self) -> usize {
        self.members.iter().copied().min().unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A tracklet of a designated object: indices into the observations of its arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracklet {
    pub designation: String,
    pub members: Vec<usize>,
    pub mean_time: MJD,
}

impl Tracklet {
    pub fn new(designation: String, indices: TrackletIndices) -> Self {
        Tracklet {
            designation,
            members: indices.members,
            mean_time: indices.mean_time,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Dated {
    mjd: MJD,
    index: usize,
}

fn span(set: &[Dated]) -> MJD {
    match (set.first(), set.last()) {
        (Some(first), Some(last)) => last.mjd - first.mjd,
        _ => 0.,
    }
}

/// Position of the longest gap between consecutive members, the first one on ties.
/// `set` must hold at least two members.
fn longest_gap(set: &[Dated]) -> usize {
    let mut split = 1;
    let mut longest = set[1].mjd - set[0].mjd;
    for (s, pair) in set.windows(2).enumerate().skip(1) {
        let gap = pair[1].mjd - pair[0].mjd;
        if gap > longest {
            longest = gap;
            split = s + 1;
        }
    }
    split
}

/// Reduce one observer's time-sorted members into tracklets, appended to `out`.
fn reduce(sorted: &[Dated], params: &TrackletParams, out: &mut Vec<TrackletIndices>) {
    let mut accept = |set: &[Dated]| out.push(TrackletIndices::from_dated(set));
    let mut stack: Vec<&[Dated]> = vec![sorted];

    while let Some(set) = stack.pop() {
        let d = span(set);

        if set.len() < 2 || d < params.tracklet_span {
            accept(set);
            continue;
        }
        if set.len() <= params.max_short_count && d < params.short_span {
            accept(set);
            continue;
        }
        if set.len() == 2 {
            if d < params.same_night {
                accept(set);
            } else {
                accept(&set[..1]);
                accept(&set[1..]);
            }
            continue;
        }

        let (left, right) = set.split_at(longest_gap(set));
        if left.len() >= 3 && right.len() >= 3 {
            stack.push(right);
            stack.push(left);
        } else if left.len() == 2 && right.len() >= 2 && span(left) < params.same_night {
            accept(left);
            stack.push(right);
        } else if right.len() == 2 && left.len() >= 2 && span(right) < params.same_night {
            stack.push(left);
            accept(right);
        } else if set.len() == 3 && d < params.same_night {
            accept(set);
        } else if d < params.wide_span {
            accept(set);
        } else {
            stack.push(right);
            stack.push(left);
        }
    }
}

/// Split a sequence of observations into tracklets.
///
/// The input need not be sorted: members are grouped by [`TrackletMember::observer`] and
/// sorted by [`TrackletMember::mjd`] (stable, so equal times keep their input order) before
/// the reduction described in the [module documentation](crate::tracklets).
///
/// Arguments
/// -----------------
/// * `members` – Any sequence exposing time and observer identity.
/// * `params` – Clustering thresholds, see [`TrackletParams`].
///
/// Return
/// ----------
/// * Every tracklet, as indices into `members`, ordered by mean time (ties by smallest index).
///   Each index appears in exactly one tracklet; an empty input gives an empty output.
pub fn find_tracklets<T: TrackletMember>(
    members: &[T],
    params: &TrackletParams,
) -> Vec<TrackletIndices> {
    let mut by_observer: HashMap<&str, Vec<Dated>, RandomState> = HashMap::default();
    for (index, member) in members.iter().enumerate() {
        by_observer.entry(member.observer()).or_default().push(Dated {
            mjd: member.mjd(),
            index,
        });
    }

    let mut tracklets = Vec::new();
    for group in by_observer.values_mut() {
        group.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        reduce(group, params, &mut tracklets);
    }

    debug!(
        "{} tracklets from {} observations of {} observers",
        tracklets.len(),
        members.len(),
        by_observer.len()
    );

    tracklets
        .into_iter()
        .sorted_by(|a, b| {
            a.mean_time
                .total_cmp(&b.mean_time)
                .then_with(|| a.first_index().cmp(&b.first_index()))
        })
        .collect()
}
