//! # Streaming pipeline: splitter → tracklets
//!
//! Connects an [`ArcSplitter`] to the tracklet clusterer through a bounded
//! [`tokio::sync::mpsc`] channel.
//!
//! The splitter runs on the blocking pool ([`tokio::task::spawn_blocking`]) since it pulls
//! records from a synchronous reader. It pushes every [`ArcResult`] with
//! [`blocking_send`](tokio::sync::mpsc::Sender::blocking_send), so a slow consumer applies
//! backpressure once `capacity` results are queued. Dropping the receiver stops the producer
//! at its next send.
//!
//! [`run_pipeline`] is the ready-made consumer: it clusters every arc (complete or
//! truncated) and collects parse failures. A fatal read error ends the stream; the arcs
//! already queued are still drained and the error is returned in the report.
//!
//! Example
//! -----------------
//! ```rust, no_run
//! use std::sync::Arc;
//! use camino::Utf8Path;
//! use mpc80::observers::obscode_reader::read_obscode_dat_file;
//! use mpc80::trajectories::{arc_splitter::ArcSplitter, pipeline::{run_pipeline, PipelineConfig}};
//!
//! # async fn demo() -> Result<(), mpc80::mpc80_errors::Mpc80Error> {
//! let sites = Arc::new(read_obscode_dat_file(Utf8Path::new("ObsCodes.txt"))?);
//! let file = std::fs::File::open("NumObs.txt")?;
//! let splitter = ArcSplitter::from_reader(std::io::BufReader::new(file), sites);
//!
//! let report = run_pipeline(splitter, &PipelineConfig::default()).await?;
//! for arc in &report.arcs {
//!     println!("{}: {} tracklets", arc.arc.designation, arc.tracklets.len());
//! }
//! # Ok(())
//! # }
//! ```
use std::io;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc, task::JoinHandle};

use super::{
    arc_splitter::{ArcResult, ArcSplitter},
    ObservationArc,
};
use crate::{
    mpc80_errors::Mpc80Error,
    observations::mpc_80col_reader::DecodeError,
    observers::ParallaxLookup,
    tracklets::{Tracklet, TrackletParams},
};

/// Settings of [`run_pipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of results the producer may queue ahead of the consumer (at least 1).
    pub capacity: usize,
    pub tracklets: TrackletParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            capacity: 64,
            tracklets: TrackletParams::default(),
        }
    }
}

/// An arc with its tracklets.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcTracklets {
    pub arc: ObservationArc,
    pub tracklets: Vec<Tracklet>,
}

/// Everything [`run_pipeline`] collected, in input order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Complete arcs, and the truncated arcs handed back with a failure.
    pub arcs: Vec<ArcTracklets>,
    pub parse_failures: Vec<DecodeError>,
    /// The read error that ended the stream early, if any.
    pub read_error: Option<io::Error>,
}

impl PipelineReport {
    fn push_arc(&mut self, arc: ObservationArc, params: &TrackletParams) {
        let tracklets = arc.tracklets(params);
        self.arcs.push(ArcTracklets { arc, tracklets });
    }

    /// Total number of tracklets found over every arc.
    pub fn tracklet_count(&self) -> usize {
        self.arcs.iter().map(|a| a.tracklets.len()).sum()
    }
}

/// Run `splitter` on the blocking pool, feeding its results into a bounded channel.
///
/// Arguments
/// -----------------
/// * `splitter` – The splitter to drain; moved to the producer task.
/// * `capacity` – Channel bound, raised to 1 if zero.
///
/// Return
/// ----------
/// * The receiving end of the channel; it closes after the last arc, or after a
///   [`ArcResult::FatalReadError`]. [`ArcResult::EndOfStream`] is never sent.
/// * The producer handle, resolving to the number of results sent.
pub fn spawn_arc_producer<I, P>(
    splitter: ArcSplitter<I, P>,
    capacity: usize,
) -> (mpsc::Receiver<ArcResult>, JoinHandle<usize>)
where
    I: Iterator<Item = io::Result<String>> + Send + 'static,
    P: ParallaxLookup + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let producer = tokio::task::spawn_blocking(move || {
        let mut sent = 0;
        for result in splitter {
            if tx.blocking_send(result).is_err() {
                debug!("arc receiver dropped after {sent} results, stopping");
                break;
            }
            sent += 1;
        }
        sent
    });
    (rx, producer)
}

/// Split a record stream into arcs and every arc into tracklets.
///
/// Arguments
/// -----------------
/// * `splitter` – Source of arcs.
/// * `config` – Channel capacity and clustering thresholds.
///
/// Return
/// ----------
/// * A [`PipelineReport`]; a fatal read error is reported in
///   [`PipelineReport::read_error`] together with every arc read before it.
///
/// Errors
/// -----------------
/// * [`Mpc80Error::InvalidTrackletParameter`] if `config.tracklets` does not validate.
/// * [`Mpc80Error::PipelineJoin`] if the producer task panicked or was cancelled.
pub async fn run_pipeline<I, P>(
    splitter: ArcSplitter<I, P>,
    config: &PipelineConfig,
) -> Result<PipelineReport, Mpc80Error>
where
    I: Iterator<Item = io::Result<String>> + Send + 'static,
    P: ParallaxLookup + Send + 'static,
{
    config.tracklets.validate()?;

    let (mut rx, producer) = spawn_arc_producer(splitter, config.capacity);
    let mut report = PipelineReport::default();

    while let Some(result) = rx.recv().await {
        match result {
            ArcResult::Arc(arc) => report.push_arc(arc, &config.tracklets),
            ArcResult::ParseFailure { error, partial } => {
                warn!("skipping record: {error}");
                if let Some(arc) = partial {
                    report.push_arc(arc, &config.tracklets);
                }
                report.parse_failures.push(error);
            }
            ArcResult::FatalReadError { error, partial } => {
                if let Some(arc) = partial {
                    report.push_arc(arc, &config.tracklets);
                }
                report.read_error = Some(error);
            }
            ArcResult::EndOfStream => {}
        }
    }

    let sent = producer
        .await
        .map_err(|err| Mpc80Error::PipelineJoin(err.to_string()))?;
    debug!(
        "pipeline done: {sent} results, {} arcs, {} tracklets, {} parse failures",
        report.arcs.len(),
        report.tracklet_count(),
        report.parse_failures.len()
    );
    Ok(report)
}
