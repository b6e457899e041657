//! # Arc splitter
//!
//! Turns "decode one record at a time" into "yield one complete arc at a time".
//!
//! An arc boundary is only visible once the first record of the *next* object has been
//! decoded, so the splitter keeps that observation pending until the following call. The
//! state carried between calls is explicit:
//!
//! ```text
//! ArcSplitter { arc under construction, pending observation, finished flag }
//! ```
//!
//! Each call to [`ArcSplitter::next_arc`] returns one [`ArcResult`]:
//!
//! * [`ArcResult::Arc`] – a complete arc (at least one observation).
//! * [`ArcResult::ParseFailure`] – a record failed to decode. Not fatal: the arc read so far
//!   is handed back with the error and the next call resumes at the following record.
//! * [`ArcResult::EndOfStream`] – the source is exhausted. Every later call returns it again.
//! * [`ArcResult::FatalReadError`] – the source itself failed. The splitter is finished.
//!
//! Records must already be grouped by designation. Satellite continuation records are
//! merged into the observation they follow and never start an entry of their own.
//!
//! A splitter is sequential and owns its source; independent streams each get their own
//! splitter and may run in parallel, sharing a read-only [`ParallaxLookup`].
use std::io::{self, BufRead};
use std::iter::FusedIterator;

use log::{debug, error, warn};

use super::ObservationArc;
use crate::{
    observations::{
        mpc_80col_reader::{
            decode, is_satellite_continuation, merge_satellite_continuation, DecodeError,
        },
        Observation,
    },
    observers::ParallaxLookup,
};

/// Outcome of one [`ArcSplitter::next_arc`] step.
#[derive(Debug)]
pub enum ArcResult {
    /// A complete arc.
    Arc(ObservationArc),
    /// A record failed to decode; `partial` holds the arc interrupted by the failure, if any.
    ParseFailure {
        error: DecodeError,
        partial: Option<ObservationArc>,
    },
    /// The source is exhausted.
    EndOfStream,
    /// The source reported an I/O failure; `partial` holds the arc read so far, if any.
    FatalReadError {
        error: io::Error,
        partial: Option<ObservationArc>,
    },
}

impl ArcResult {
    /// The arc carried by this result, complete or truncated.
    pub fn arc(&self) -> Option<&ObservationArc> {
        match self {
            ArcResult::Arc(arc) => Some(arc),
            ArcResult::ParseFailure { partial, .. } | ArcResult::FatalReadError { partial, .. } => {
                partial.as_ref()
            }
            ArcResult::EndOfStream => None,
        }
    }

    /// `false` once the caller must stop reading.
    pub fn keep_reading(&self) -> bool {
        matches!(self, ArcResult::Arc(_) | ArcResult::ParseFailure { .. })
    }
}

/// Line source built by [`ArcSplitter::from_reader`].
pub type ReaderLines<R> = std::iter::Map<io::Split<R>, fn(io::Result<Vec<u8>>) -> io::Result<String>>;

/// Strip the carriage return of a raw line and decode it lossily, so that bad bytes become a
/// decoding failure of that record instead of a fatal read error.
fn raw_to_line(raw: io::Result<Vec<u8>>) -> io::Result<String> {
    raw.map(|mut bytes| {
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    })
}

/// Resumable splitter of an 80-column record stream into [`ObservationArc`]s.
pub struct ArcSplitter<I, P> {
    lines: I,
    lookup: P,
    arc: ObservationArc,
    pending: Option<Observation>,
    finished: bool,
    line_number: usize,
}

impl<R: BufRead, P: ParallaxLookup> ArcSplitter<ReaderLines<R>, P> {
    /// Build a splitter reading newline-terminated records from `reader`.
    pub fn from_reader(reader: R, lookup: P) -> Self {
        let to_line: fn(io::Result<Vec<u8>>) -> io::Result<String> = raw_to_line;
        Self::new(reader.split(b'\n').map(to_line), lookup)
    }
}

impl<I, P> ArcSplitter<I, P>
where
    I: Iterator<Item = io::Result<String>>,
    P: ParallaxLookup,
{
    /// Build a splitter over any source of records (trailing newlines stripped).
    pub fn new(lines: I, lookup: P) -> Self {
        ArcSplitter {
            lines,
            lookup,
            arc: ObservationArc::default(),
            pending: None,
            finished: false,
            line_number: 0,
        }
    }

    /// Number of records consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Advance to the next arc boundary, parse failure or end of the source.
    pub fn next_arc(&mut self) -> ArcResult {
        if self.finished {
            return ArcResult::EndOfStream;
        }

        if let Some(obs) = self.pending.take() {
            self.arc.designation = obs.designation.clone();
            self.arc.observations.push(obs);
        }

        loop {
            let line = match self.lines.next() {
                None => {
                    self.finished = true;
                    return match self.take_arc() {
                        Some(arc) => ArcResult::Arc(arc),
                        None => ArcResult::EndOfStream,
                    };
                }
                Some(Err(err)) => {
                    self.finished = true;
                    error!("read error after line {}: {err}", self.line_number);
                    return ArcResult::FatalReadError {
                        error: err,
                        partial: self.take_arc(),
                    };
                }
                Some(Ok(line)) => line,
            };
            self.line_number += 1;

            if is_satellite_continuation(&line) {
                if let Err(err) = self.merge_continuation(&line) {
                    return self.parse_failure(err);
                }
                continue;
            }

            match decode(&line, &self.lookup) {
                Err(err) => return self.parse_failure(err),
                Ok(obs) if self.arc.is_empty() => {
                    self.arc.designation = obs.designation.clone();
                    self.arc.observations.push(obs);
                }
                Ok(obs) if obs.designation == self.arc.designation => self.append(obs),
                Ok(obs) => {
                    self.pending = Some(obs);
                    let arc = std::mem::take(&mut self.arc);
                    debug!("arc {} closed with {} observations", arc.designation, arc.len());
                    return ArcResult::Arc(arc);
                }
            }
        }
    }

    fn append(&mut self, obs: Observation) {
        if let Some(last) = self.arc.observations.last() {
            if obs.time <= last.time {
                warn!(
                    "line {}: time of {} does not increase ({} after {})",
                    self.line_number, obs.designation, obs.time, last.time
                );
            }
        }
        self.arc.observations.push(obs);
    }

    fn merge_continuation(&mut self, line: &str) -> Result<(), DecodeError> {
        let arc = &mut self.arc;
        let last = arc
            .observations
            .last_mut()
            .ok_or(DecodeError::OrphanContinuation)?;
        merge_satellite_continuation(line, &arc.designation, last)
    }

    fn parse_failure(&mut self, error: DecodeError) -> ArcResult {
        debug!("line {}: {error}", self.line_number);
        ArcResult::ParseFailure {
            error,
            partial: self.take_arc(),
        }
    }

    fn take_arc(&mut self) -> Option<ObservationArc> {
        (!self.arc.is_empty()).then(|| std::mem::take(&mut self.arc))
    }
}

/// Yields arcs and parse failures, ending at the end of the source or after the first
/// fatal read error.
impl<I, P> Iterator for ArcSplitter<I, P>
where
    I: Iterator<Item = io::Result<String>>,
    P: ParallaxLookup,
{
    type Item = ArcResult;

    fn next(&mut self) -> Option<ArcResult> {
        match self.next_arc() {
            ArcResult::EndOfStream => None,
            other => Some(other),
        }
    }
}

impl<I, P> FusedIterator for ArcSplitter<I, P>
where
    I: Iterator<Item = io::Result<String>>,
    P: ParallaxLookup,
{
}
