//! "Nth display from here" resolution.
//!
//! Monitors are identified only by their position in the window system's
//! enumeration, which may change between calls (docking, undocking, a
//! display waking up).  The search therefore re-enumerates on every pass,
//! carries its progress across passes to implement wrap-around, and gives
//! up after a fixed number of passes, falling back to the current monitor.

use crate::geometry::MonitorId;
use log::{debug, warn};

/// Default cap on enumeration passes before giving up.
pub const DEFAULT_MAX_PASSES: usize = 20;

/// Canonicalize `offset` into `[0, count)`, wrapping negative offsets.
///
/// Returns `0` when `count` is zero.
pub fn canonical_offset(offset: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count = count as i64;
    (i64::from(offset).rem_euclid(count)) as usize
}

/// Resolve the monitor `offset` steps after `current`.
///
/// `enumerate` is called once per pass and must return the monitors in the
/// order the window system currently reports them.  The first snapshot also
/// determines the monitor count used to canonicalize `offset`.  At most
/// `max_passes` snapshots are taken; if the target has not been reached by
/// then (for example because `current` vanished), `current` is returned.
pub fn resolve_monitor<F>(
    current: MonitorId,
    offset: i32,
    max_passes: usize,
    mut enumerate: F,
) -> MonitorId
where
    F: FnMut() -> Vec<MonitorId>,
{
    if offset == 0 {
        return current;
    }

    let mut snapshot = enumerate();
    let steps = canonical_offset(offset, snapshot.len());
    debug!(
        "monitor offset {} over {} monitor(s) -> {} step(s)",
        offset,
        snapshot.len(),
        steps
    );
    if steps == 0 {
        return current;
    }

    let mut found_current = false;
    let mut walked = 0;
    for pass in 0..max_passes {
        if pass > 0 {
            snapshot = enumerate();
        }
        for &id in &snapshot {
            if id == current {
                found_current = true;
            } else if found_current {
                walked += 1;
                if walked == steps {
                    return id;
                }
            }
        }
    }

    warn!(
        "could not find monitor {} steps from {} in {} pass(es), staying put",
        steps, current, max_passes
    );
    current
}

/// Single-snapshot convenience over [`resolve_monitor`].
pub fn resolve_in(current: MonitorId, offset: i32, monitors: &[MonitorId]) -> MonitorId {
    resolve_monitor(current, offset, DEFAULT_MAX_PASSES, || monitors.to_vec())
}
