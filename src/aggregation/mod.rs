//! Per-chromosome sweep-line aggregation of annotation intervals.
//!
//! Intervals are grouped by canonical chromosome ([`IntervalCollector`]),
//! turned into sorted enter/exit events ([`boundary_events`]) and swept
//! left to right. The [`CoverageState`] decides what each segment reports:
//!
//! | State             | Segment value                          | Used for                |
//! |-------------------|----------------------------------------|-------------------------|
//! | [`PriorityState`] | the active payload that sorts first    | RepeatMasker annotation |
//! | [`DepthState`]    | number of overlapping intervals        | segmental duplications  |

pub mod events;
pub mod sweep;

pub use events::{boundary_events, BoundaryEvent, EventKind, IntervalCollector};
pub use sweep::{sweep, sweep_chromosomes, CoverageState, DepthState, PriorityState, Segment};
