//! # mpc80
//!
//! Decoding of **MPC 80-column** astrometric records, streaming of the records into
//! per-object arcs, and clustering of each arc into tracklets.
//!
//! Modules
//! -----------------
//! * [`observations`] – The decoded [`Observation`](crate::observations::Observation) and the
//!   80-column line decoder.
//! * [`observers`] – Parallax constants of the observing sites and the `ObsCodes` reader.
//! * [`trajectories`] – The resumable [`ArcSplitter`] and the tokio pipeline.
//! * [`tracklets`] – Time/observer clustering of an arc.
//! * [`time`] – Calendar date parsing.
//!
//! Quick start
//! -----------------
//! ```rust
//! use mpc80::{observers::obscode_reader::read_obscode_dat, ArcResult, ArcSplitter, TrackletParams};
//!
//! let sites = read_obscode_dat(
//!     "291 248.4009 0.84947 +0.52647 LPL/Spacewatch II\n".as_bytes(),
//! ).unwrap();
//! let records = "     NE00030  C2004 09 16.15206 16 13 11.57 +20 52 23.7          21.1 Vd     291\n";
//!
//! for result in ArcSplitter::from_reader(records.as_bytes(), &sites) {
//!     if let ArcResult::Arc(arc) = result {
//!         assert_eq!(arc.tracklets(&TrackletParams::default()).len(), 1);
//!     }
//! }
//! ```
pub mod constants;
mod conversion;
pub mod mpc80_errors;
pub mod observations;
pub mod observers;
pub mod time;
pub mod tracklets;
pub mod trajectories;

pub use mpc80_errors::Mpc80Error;
pub use observations::{mpc_80col_reader::DecodeError, Observation};
pub use tracklets::{find_tracklets, Tracklet, TrackletParams};
pub use trajectories::{
    arc_splitter::{ArcResult, ArcSplitter},
    ObservationArc,
};
