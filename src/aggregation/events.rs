use tracing::debug;

use crate::core::chromosome::{CanonicalSet, Chromosome, ChromosomeTable};
use crate::core::interval::GenomicInterval;

/// Which side of an interval a boundary event marks.
///
/// `Enter` orders before `Exit` so that an empty interval is balanced
/// at its own coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Enter,
    Exit,
}

/// An interval endpoint; `interval` indexes the chromosome's interval list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoundaryEvent {
    pub coordinate: u64,
    pub kind: EventKind,
    pub interval: usize,
}

/// Two events per interval, sorted by coordinate
#[must_use]
pub fn boundary_events<P>(intervals: &[GenomicInterval<P>]) -> Vec<BoundaryEvent> {
    let mut events = Vec::with_capacity(intervals.len() * 2);
    for (interval, iv) in intervals.iter().enumerate() {
        events.push(BoundaryEvent {
            coordinate: iv.start,
            kind: EventKind::Enter,
            interval,
        });
        events.push(BoundaryEvent {
            coordinate: iv.end,
            kind: EventKind::Exit,
            interval,
        });
    }
    events.sort_unstable();
    events
}

/// Groups intervals by canonical chromosome, dropping everything else.
#[derive(Debug)]
pub struct IntervalCollector<P> {
    allowed: CanonicalSet,
    table: ChromosomeTable<Vec<GenomicInterval<P>>>,
    dropped: u64,
}

impl<P> IntervalCollector<P> {
    #[must_use]
    pub fn new(allowed: CanonicalSet) -> Self {
        Self {
            allowed,
            table: ChromosomeTable::default(),
            dropped: 0,
        }
    }

    /// Add an interval on the named contig; returns false if the contig is not allowed
    pub fn push(&mut self, contig: &str, start: u64, end: u64, payload: P) -> bool {
        match self.allowed.resolve(contig) {
            Some(chromosome) => {
                self.table
                    .get_mut(chromosome)
                    .push(GenomicInterval::new(chromosome, start, end, payload));
                true
            }
            None => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Number of intervals rejected for being off the canonical set
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Allowed chromosomes in canonical order with their intervals (possibly none)
    pub fn into_chromosomes(self) -> impl Iterator<Item = (Chromosome, Vec<GenomicInterval<P>>)> {
        if self.dropped > 0 {
            debug!(dropped = self.dropped, "Ignored intervals on non-canonical contigs");
        }
        let allowed = self.allowed;
        self.table
            .into_entries()
            .filter(move |(chromosome, _)| allowed.contains(*chromosome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_sorted_with_enter_first_on_ties() {
        let chr1 = Chromosome::autosome(1).unwrap();
        let intervals = vec![
            GenomicInterval::new(chr1, 10, 20, ()),
            GenomicInterval::new(chr1, 5, 10, ()),
            GenomicInterval::new(chr1, 20, 20, ()),
        ];
        let events: Vec<(u64, EventKind, usize)> = boundary_events(&intervals)
            .into_iter()
            .map(|e| (e.coordinate, e.kind, e.interval))
            .collect();
        assert_eq!(
            events,
            vec![
                (5, EventKind::Enter, 1),
                (10, EventKind::Enter, 0),
                (10, EventKind::Exit, 1),
                (20, EventKind::Enter, 2),
                (20, EventKind::Exit, 0),
                (20, EventKind::Exit, 2),
            ]
        );
    }

    #[test]
    fn test_collector_drops_non_canonical() {
        let mut collector = IntervalCollector::new(CanonicalSet::default());
        assert!(collector.push("chr2", 1, 5, 'a'));
        assert!(collector.push("chr1", 1, 5, 'b'));
        assert!(!collector.push("chr1_random", 1, 5, 'c'));
        assert!(!collector.push("chrM", 1, 5, 'd'));
        assert_eq!(collector.dropped(), 2);

        let filled: Vec<(String, Vec<char>)> = collector
            .into_chromosomes()
            .filter(|(_, intervals)| !intervals.is_empty())
            .map(|(c, intervals)| (c.to_string(), intervals.into_iter().map(|i| i.payload).collect()))
            .collect();
        assert_eq!(
            filled,
            vec![("chr1".to_string(), vec!['b']), ("chr2".to_string(), vec!['a'])]
        );
    }

    #[test]
    fn test_collector_yields_every_allowed_chromosome() {
        let collector: IntervalCollector<()> = IntervalCollector::new(CanonicalSet::new(true));
        assert_eq!(collector.into_chromosomes().count(), 25);
    }
}
