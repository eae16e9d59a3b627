//! Shuttle selection policies.
//!
//! Three related but deliberately distinct ways to pick recommended
//! shuttles from a timetable. They are kept as separate named policies
//! rather than unified behind one "nearest" function, because each feeds
//! a different notification path and their edge behavior differs: only
//! `nearest_from` depends on the stored timetable order.

use crate::domain::ClockTime;

/// The latest shuttles departing strictly before `limit`.
///
/// Result is in descending order (last catchable shuttle first), at most
/// `count` entries. Empty when no shuttle departs before `limit`.
pub fn latest_before(times: &[ClockTime], limit: ClockTime, count: usize) -> Vec<ClockTime> {
    let mut candidates: Vec<ClockTime> = times.iter().copied().filter(|t| *t < limit).collect();
    candidates.sort_by(|a, b| b.cmp(a));
    candidates.truncate(count);
    candidates
}

/// The earliest shuttles departing at or after `target`.
///
/// Result is in ascending order, at most `count` entries. Empty when
/// every shuttle has already left.
pub fn earliest_at_or_after(times: &[ClockTime], target: ClockTime, count: usize) -> Vec<ClockTime> {
    let mut candidates: Vec<ClockTime> = times.iter().copied().filter(|t| *t >= target).collect();
    candidates.sort();
    candidates.truncate(count);
    candidates
}

/// The first `count` entries at or after `target`, in timetable order.
///
/// Unlike [`earliest_at_or_after`] this does not sort: it trusts the
/// stored sequence, so an unsorted timetable yields whatever appears
/// first. Used by the proximity check.
pub fn nearest_from(times: &[ClockTime], target: ClockTime, count: usize) -> Vec<ClockTime> {
    times
        .iter()
        .copied()
        .filter(|t| *t >= target)
        .take(count)
        .collect()
}
