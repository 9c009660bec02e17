//! Sweep-line reduction of one chromosome's intervals into constant-state segments.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::aggregation::events::{boundary_events, EventKind, IntervalCollector};
use crate::core::chromosome::Chromosome;
use crate::core::interval::GenomicInterval;
use crate::error::PrepError;

/// A maximal run `[start, end)` over which the active set reports `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<V> {
    pub chromosome: Chromosome,
    pub start: u64,
    pub end: u64,
    pub value: V,
}

/// The running state of a sweep: what is active, and what it reports.
pub trait CoverageState<P> {
    type Value;

    fn enter(&mut self, interval: usize, payload: &P);

    /// # Errors
    ///
    /// Returns `PrepError::Consistency` if the interval is not active.
    fn exit(&mut self, interval: usize, payload: &P) -> Result<(), PrepError>;

    /// The value of the current segment, or `None` when nothing is active
    fn value(&self) -> Option<Self::Value>;

    fn is_empty(&self) -> bool;
}

/// Reports the single active payload that sorts first.
///
/// The payload's `Ord` is the priority; ties between equal payloads fall
/// back to interval order.
#[derive(Debug)]
pub struct PriorityState<P: Ord + Clone> {
    active: BTreeSet<(P, usize)>,
}

impl<P: Ord + Clone> Default for PriorityState<P> {
    fn default() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }
}

impl<P: Ord + Clone> CoverageState<P> for PriorityState<P> {
    type Value = P;

    fn enter(&mut self, interval: usize, payload: &P) {
        self.active.insert((payload.clone(), interval));
    }

    fn exit(&mut self, interval: usize, payload: &P) -> Result<(), PrepError> {
        if self.active.remove(&(payload.clone(), interval)) {
            Ok(())
        } else {
            Err(PrepError::consistency(format!(
                "interval {interval} exits before it enters"
            )))
        }
    }

    fn value(&self) -> Option<P> {
        self.active.first().map(|(payload, _)| payload.clone())
    }

    fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Reports how many intervals overlap the segment.
#[derive(Debug, Default)]
pub struct DepthState {
    depth: usize,
}

impl<P> CoverageState<P> for DepthState {
    type Value = usize;

    fn enter(&mut self, _interval: usize, _payload: &P) {
        self.depth += 1;
    }

    fn exit(&mut self, interval: usize, _payload: &P) -> Result<(), PrepError> {
        self.depth = self.depth.checked_sub(1).ok_or_else(|| {
            PrepError::consistency(format!("interval {interval} exits at depth zero"))
        })?;
        Ok(())
    }

    fn value(&self) -> Option<usize> {
        (self.depth > 0).then_some(self.depth)
    }

    fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

/// Sweep one chromosome's intervals, emitting a segment between every pair of
/// consecutive distinct boundary coordinates while the state is non-empty.
///
/// All events at a coordinate are applied before the segment that starts there.
///
/// # Errors
///
/// Returns `PrepError::Consistency` if an interval exits before entering, or if
/// the state is not empty once every event has been applied.
pub fn sweep<P, S>(
    chromosome: Chromosome,
    intervals: &[GenomicInterval<P>],
    mut state: S,
) -> Result<Vec<Segment<S::Value>>, PrepError>
where
    S: CoverageState<P>,
{
    let events = boundary_events(intervals);
    let mut segments = Vec::new();
    let mut last_coord: Option<u64> = None;

    let mut i = 0;
    while i < events.len() {
        let coord = events[i].coordinate;

        if let (Some(start), Some(value)) = (last_coord, state.value()) {
            segments.push(Segment {
                chromosome,
                start,
                end: coord,
                value,
            });
        }

        while i < events.len() && events[i].coordinate == coord {
            let event = events[i];
            let payload = &intervals[event.interval].payload;
            match event.kind {
                EventKind::Enter => state.enter(event.interval, payload),
                EventKind::Exit => state.exit(event.interval, payload)?,
            }
            i += 1;
        }
        last_coord = Some(coord);
    }

    if !state.is_empty() {
        return Err(PrepError::consistency(format!(
            "unbalanced intervals on {chromosome}: active set not empty after the last boundary"
        )));
    }

    Ok(segments)
}

/// Sweep every allowed chromosome of `collector` in canonical order, with a
/// fresh state per chromosome, handing each chromosome's segments to `sink`
/// before the next one is swept. Returns the number of segments emitted.
///
/// # Errors
///
/// Stops at the first chromosome whose sweep or sink fails.
pub fn sweep_chromosomes<P, S, F, K>(
    collector: IntervalCollector<P>,
    mut new_state: F,
    mut sink: K,
) -> Result<u64, PrepError>
where
    S: CoverageState<P>,
    F: FnMut() -> S,
    K: FnMut(&[Segment<S::Value>]) -> Result<(), PrepError>,
{
    let mut emitted = 0;
    for (chromosome, intervals) in collector.into_chromosomes() {
        if intervals.is_empty() {
            continue;
        }
        let found = sweep(chromosome, &intervals, new_state())?;
        debug!(
            chromosome = %chromosome,
            intervals = intervals.len(),
            segments = found.len(),
            "Swept chromosome"
        );
        sink(&found)?;
        emitted += found.len() as u64;
    }
    Ok(emitted)
}
